//! Configuration page — Wi-Fi station, MQTT bridge and system.

use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;
use somfyctl_app::model::{MqttForm, WifiForm};
use somfyctl_app::ui_event::ConfigEvent;
use somfyctl_domain::network::Network;
use somfyctl_domain::system::SystemInfos;

use crate::api;
use crate::components::{ToastProvider, use_toasts};

const UNKNOWN: &str = "-";

/// Reactive state of the page.
#[derive(Clone, Copy)]
struct ConfigState {
    networks: RwSignal<Vec<Network>>,
    wifi: RwSignal<WifiForm>,
    mqtt: RwSignal<MqttForm>,
    infos: RwSignal<Option<SystemInfos>>,
}

impl ConfigState {
    fn new() -> Self {
        Self {
            networks: RwSignal::new(Vec::new()),
            wifi: RwSignal::new(WifiForm::default()),
            mqtt: RwSignal::new(MqttForm::default()),
            infos: RwSignal::new(None),
        }
    }
}

#[component]
pub fn Configuration() -> impl IntoView {
    let state = ConfigState::new();
    let toasts = use_toasts();
    let on_event = Callback::new(move |event: ConfigEvent| handle(event, state, toasts));

    on_event.run(ConfigEvent::Load);

    let submit = move |event: ConfigEvent| {
        move |ev: SubmitEvent| {
            ev.prevent_default();
            on_event.run(event.clone());
        }
    };

    view! {
        <div>
            <h1>"Configuration"</h1>

            <section>
                <h2>"Wi-Fi"</h2>
                <ul class="networks">
                    {move || {
                        state
                            .networks
                            .get()
                            .into_iter()
                            .enumerate()
                            .map(|(index, network)| {
                                view! {
                                    <li on:click=move |_| on_event.run(ConfigEvent::NetworkSelected { index })>
                                        <span class="ssid">{network.ssid.clone()}</span>
                                        <span class="signal">{network.signal_label()}</span>
                                    </li>
                                }
                            })
                            .collect_view()
                    }}
                </ul>
                <form on:submit=submit(ConfigEvent::WifiSubmitted)>
                    <label>
                        "SSID"
                        <input
                            type="text"
                            prop:value=move || state.wifi.with(|f| f.ssid.clone())
                            on:input=move |ev| state.wifi.update(|f| f.ssid = event_target_value(&ev))
                        />
                    </label>
                    <label>
                        "Password"
                        <input
                            type="password"
                            prop:value=move || state.wifi.with(|f| f.password.clone())
                            on:input=move |ev| state.wifi.update(|f| f.password = event_target_value(&ev))
                        />
                    </label>
                    <button type="submit">"Save"</button>
                </form>
            </section>

            <section>
                <h2>"MQTT"</h2>
                <form on:submit=submit(ConfigEvent::MqttSubmitted)>
                    <label>
                        <input
                            type="checkbox"
                            prop:checked=move || state.mqtt.with(|f| f.enabled)
                            on:change=move |ev| state.mqtt.update(|f| f.enabled = event_target_checked(&ev))
                        />
                        "Enabled"
                    </label>
                    <label>
                        "Broker"
                        <input
                            type="text"
                            prop:value=move || state.mqtt.with(|f| f.broker.clone())
                            on:input=move |ev| state.mqtt.update(|f| f.broker = event_target_value(&ev))
                        />
                    </label>
                    <label>
                        "Port"
                        <input
                            type="text"
                            prop:value=move || state.mqtt.with(|f| f.port.clone())
                            on:input=move |ev| state.mqtt.update(|f| f.port = event_target_value(&ev))
                        />
                    </label>
                    <label>
                        "Username"
                        <input
                            type="text"
                            prop:value=move || state.mqtt.with(|f| f.username.clone())
                            on:input=move |ev| state.mqtt.update(|f| f.username = event_target_value(&ev))
                        />
                    </label>
                    <label>
                        "Password"
                        <input
                            type="password"
                            prop:value=move || state.mqtt.with(|f| f.password.clone())
                            on:input=move |ev| state.mqtt.update(|f| f.password = event_target_value(&ev))
                        />
                    </label>
                    <button type="submit">"Save"</button>
                </form>
            </section>

            <section>
                <h2>"System"</h2>
                {move || {
                    let infos = state.infos.get().unwrap_or_default();
                    view! {
                        <dl>
                            <dt>"Version"</dt>
                            <dd>{infos.version.unwrap_or_else(|| UNKNOWN.to_string())}</dd>
                            <dt>"MAC address"</dt>
                            <dd>{infos.mac_address.unwrap_or_else(|| UNKNOWN.to_string())}</dd>
                            <dt>"IP address"</dt>
                            <dd>{infos.ip_address.unwrap_or_else(|| UNKNOWN.to_string())}</dd>
                        </dl>
                    }
                }}
                <button on:click=move |_| on_event.run(ConfigEvent::RestartClicked)>"Restart"</button>
            </section>
        </div>
    }
}

fn handle(event: ConfigEvent, state: ConfigState, toasts: ToastProvider) {
    let api = api::gateway();
    match event {
        ConfigEvent::Load => spawn_local(async move {
            match api.list_networks().await {
                Ok(networks) => state.networks.set(networks),
                Err(err) => toasts.error(&err),
            }
            match api.wifi_config().await {
                Ok(config) => state.wifi.update(|form| form.prefill(&config)),
                Err(err) => toasts.error(&err),
            }
            match api.mqtt_config().await {
                Ok(config) => state.mqtt.update(|form| form.apply(&config)),
                Err(err) => toasts.error(&err),
            }
            match api.system_infos().await {
                Ok(infos) => state.infos.set(Some(infos)),
                Err(err) => toasts.error(&err),
            }
        }),
        ConfigEvent::NetworkSelected { index } => {
            if let Some(network) = state.networks.with_untracked(|n| n.get(index).cloned()) {
                state.wifi.update(|form| form.select(&network));
            }
        }
        ConfigEvent::WifiSubmitted => {
            let form = state.wifi.get_untracked();
            spawn_local(async move {
                match api.update_wifi_config(&form).await {
                    Ok(()) => toasts.info(format!("Wi-Fi settings sent for {}.", form.ssid)),
                    Err(err) => toasts.error(&err),
                }
            });
        }
        ConfigEvent::MqttSubmitted => {
            let form = state.mqtt.get_untracked();
            spawn_local(async move {
                match api.update_mqtt_config(&form).await {
                    Ok(()) => toasts.info("MQTT settings saved."),
                    Err(err) => toasts.error(&err),
                }
            });
        }
        ConfigEvent::RestartClicked => spawn_local(async move {
            match api.restart().await {
                Ok(()) => toasts.info("Restart requested."),
                Err(err) => toasts.error(&err),
            }
        }),
    }
}
