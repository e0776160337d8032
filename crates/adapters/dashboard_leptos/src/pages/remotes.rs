//! Remotes page — the paired remotes with their rolling codes.
//!
//! Every change is applied to the [`RemoteList`] first and the request is
//! sent afterwards; a failed request settles the change according to the
//! list's failure policy.

use std::collections::HashMap;

use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;
use somfyctl_app::model::{FailurePolicy, RemoteList, Settlement};
use somfyctl_app::ui_event::RemoteEvent;
use somfyctl_domain::id::RemoteId;
use somfyctl_domain::remote::Remote;

use crate::api;
use crate::components::{RemoteRow, ToastKind, ToastProvider, use_toasts};

#[component]
pub fn Remotes() -> impl IntoView {
    let list = RwSignal::new(RemoteList::new(FailurePolicy::default()));
    let toasts = use_toasts();
    let on_event = Callback::new(move |event: RemoteEvent| handle(event, list, toasts));
    let (new_name, set_new_name) = signal(String::new());

    on_event.run(RemoteEvent::Load);

    let on_create = move |ev: SubmitEvent| {
        ev.prevent_default();
        on_event.run(RemoteEvent::CreateSubmitted {
            name: new_name.get_untracked(),
        });
        set_new_name.set(String::new());
    };

    view! {
        <div>
            <h1>"Remotes"</h1>
            <table>
                <thead>
                    <tr>
                        <th>"ID"</th>
                        <th>"Name"</th>
                        <th>"Rolling code"</th>
                        <th>"Move"</th>
                        <th>"Settings"</th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || list.with(|list| row_keys(list.rows()))
                        key=|key| *key
                        let((id, nth))
                    >
                        <RemoteRow
                            id
                            row=Signal::derive(move || {
                                list.with(|list| list.rows().iter().filter(|r| r.id == id).nth(nth).cloned())
                            })
                            on_event
                        />
                    </For>
                </tbody>
            </table>
            <form class="create-remote" on:submit=on_create>
                <input
                    type="text"
                    placeholder="Name"
                    prop:value=new_name
                    on:input=move |ev| set_new_name.set(event_target_value(&ev))
                />
                <button type="submit">"New remote"</button>
            </form>
        </div>
    }
}

/// Stable key of each row: its id and its rank among the rows sharing it.
fn row_keys(rows: &[Remote]) -> Vec<(RemoteId, usize)> {
    let mut seen: HashMap<RemoteId, usize> = HashMap::new();
    rows.iter()
        .map(|remote| {
            let nth = seen.entry(remote.id).or_default();
            let key = (remote.id, *nth);
            *nth += 1;
            key
        })
        .collect()
}

fn handle(event: RemoteEvent, list: RwSignal<RemoteList>, toasts: ToastProvider) {
    if !event.is_actionable() {
        return;
    }
    let api = api::gateway();
    let pending = match event {
        RemoteEvent::Load => {
            spawn_local(async move {
                match api.list_remotes().await {
                    Ok(remotes) => list.update(|list| list.replace(remotes)),
                    Err(err) => toasts.error(&err),
                }
            });
            return;
        }
        RemoteEvent::CreateSubmitted { name } => {
            spawn_local(async move {
                match api.create_remote(&name).await {
                    Ok(remote) => list.update(|list| list.push(remote)),
                    Err(err) => toasts.error(&err),
                }
            });
            return;
        }
        RemoteEvent::ActionClicked { id, action } => {
            list.try_update(|list| list.begin_action(id, action))
        }
        RemoteEvent::NameKeyDown { id, text, .. } => {
            list.try_update(|list| list.begin_rename(id, &text))
        }
        RemoteEvent::SettingsConfirmed { id, action } => {
            list.try_update(|list| list.begin_settings(id, action))
        }
    };
    let Some(pending) = pending else {
        return;
    };

    spawn_local(async move {
        let outcome = api.dispatch(pending.change()).await;
        let settlement = list.try_update(|list| list.settle(pending, &outcome));
        if let Err(err) = outcome {
            let text = match settlement {
                Some(Settlement::RolledBack) => format!("{err} (change undone)"),
                _ => err.to_string(),
            };
            toasts.push(ToastKind::Error, text);
        }
    });
}
