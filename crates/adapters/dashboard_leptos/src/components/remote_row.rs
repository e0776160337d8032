//! One row of the remotes table.

use leptos::ev::KeyboardEvent;
use leptos::prelude::*;
use somfyctl_app::ui_event::RemoteEvent;
use somfyctl_domain::action::{RemoteAction, SettingsAction};
use somfyctl_domain::id::RemoteId;
use somfyctl_domain::remote::Remote;

/// Operations offered by the settings panel, as sent to the gateway.
const SETTINGS: [(&str, &str); 3] = [
    ("delete", "Delete"),
    ("reset", "Reset rolling code"),
    ("pair", "Pair"),
];

#[component]
pub fn RemoteRow(
    id: RemoteId,
    /// The row in the list; `None` once it is gone.
    #[prop(into)]
    row: Signal<Option<Remote>>,
    /// Receives every event raised in the row.
    on_event: Callback<RemoteEvent>,
) -> impl IntoView {
    // the name input only follows the name, not the code
    let name = Memo::new(move |_| row.with(|r| r.as_ref().map(|r| r.name.clone()).unwrap_or_default()));
    let code = Memo::new(move |_| {
        row.with(|r| r.as_ref().map(|r| r.rolling_code.to_string()).unwrap_or_default())
    });
    let (choice, set_choice) = signal(SETTINGS[0].0.to_string());

    let action_button = move |action: RemoteAction, label: &'static str| {
        view! {
            <button
                class="remote-action"
                on:click=move |_| on_event.run(RemoteEvent::ActionClicked { id, action: action.clone() })
            >
                {label}
            </button>
        }
    };

    view! {
        <tr>
            <td>{id.to_string()}</td>
            <td>
                <input
                    class="remote-name"
                    type="text"
                    prop:value=move || name.get()
                    on:keydown=move |ev: KeyboardEvent| {
                        on_event.run(RemoteEvent::NameKeyDown {
                            id,
                            key: ev.key(),
                            text: event_target_value(&ev),
                        });
                    }
                />
            </td>
            <td class="rolling-code">{move || code.get()}</td>
            <td>
                {action_button(RemoteAction::Up, "\u{25B2}")}
                {action_button(RemoteAction::Stop, "\u{25A0}")}
                {action_button(RemoteAction::Down, "\u{25BC}")}
            </td>
            <td>
                <select on:change=move |ev| set_choice.set(event_target_value(&ev))>
                    {SETTINGS
                        .iter()
                        .map(|(value, label)| view! { <option value=*value>{*label}</option> })
                        .collect_view()}
                </select>
                <button on:click=move |_| {
                    let action = SettingsAction::from(choice.get_untracked().as_str());
                    on_event.run(RemoteEvent::SettingsConfirmed { id, action });
                }>"OK"</button>
            </td>
        </tr>
    }
}
