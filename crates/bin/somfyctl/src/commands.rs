//! Subcommand handlers — wire the reqwest transport into the controllers.

use anyhow::{Context, bail};

use somfyctl_adapter_http_reqwest::ReqwestTransport;
use somfyctl_adapter_virtual_gateway::{AppState, router};
use somfyctl_app::gateway::GatewayApi;
use somfyctl_app::services::network_config::NetworkConfigController;
use somfyctl_app::services::remote_list::RemoteListController;
use somfyctl_app::ui_event::{ConfigEvent, RemoteEvent};
use somfyctl_domain::action::{RemoteAction, SettingsAction};
use somfyctl_domain::endpoint::EndpointResolver;
use somfyctl_domain::id::RemoteId;

use crate::cli::{Command, MqttCommand, MqttSetArgs, RemotesCommand, SystemCommand, WifiCommand, WifiSetArgs};
use crate::config::Config;
use crate::render;

pub async fn run(command: Command, config: &Config) -> anyhow::Result<()> {
    match command {
        Command::Remotes(command) => remotes(command, config).await,
        Command::Wifi(command) => wifi(command, config).await,
        Command::Mqtt(command) => mqtt(command, config).await,
        Command::System(command) => system(command, config).await,
        Command::ServeVirtual { bind } => {
            let bind = bind.unwrap_or_else(|| config.bind_addr());
            serve_virtual(&bind).await
        }
    }
}

fn gateway_api(config: &Config) -> anyhow::Result<GatewayApi<ReqwestTransport>> {
    let transport = ReqwestTransport::new(config.timeout())?;
    Ok(GatewayApi::new(
        transport,
        EndpointResolver::new(config.gateway.base_url.as_str()),
    ))
}

async fn remotes(command: RemotesCommand, config: &Config) -> anyhow::Result<()> {
    let mut controller = RemoteListController::new(gateway_api(config)?, config.ui.failure_policy);
    let command = match command {
        RemotesCommand::Create { name } => {
            let remote = controller
                .create(&name)
                .await
                .context("failed to create remote")?;
            print!("{}", render::remotes(std::slice::from_ref(&remote)));
            return Ok(());
        }
        other => other,
    };

    controller
        .handle(RemoteEvent::Load)
        .await
        .context("failed to load remotes")?;

    let target = match command {
        RemotesCommand::List | RemotesCommand::Create { .. } => None,
        RemotesCommand::Rename { id, name } => {
            let stored = controller
                .rename(id, &name)
                .await
                .with_context(|| format!("failed to rename remote {id}"))?;
            tracing::info!(remote_id = %id, name = %stored, "remote renamed");
            Some(id)
        }
        RemotesCommand::Delete { id } => {
            settings(&mut controller, id, SettingsAction::Delete).await?;
            println!("remote {id} deleted");
            None
        }
        RemotesCommand::Action { id, action } => {
            let action = RemoteAction::from(action);
            controller
                .handle(RemoteEvent::ActionClicked {
                    id,
                    action: action.clone(),
                })
                .await
                .with_context(|| format!("failed to send {action} to remote {id}"))?;
            Some(id)
        }
        RemotesCommand::Reset { id } => {
            settings(&mut controller, id, SettingsAction::Send(RemoteAction::Reset)).await?;
            Some(id)
        }
    };

    let rows = controller.list().rows();
    match target {
        Some(id) => {
            let matching: Vec<_> = rows.iter().filter(|r| r.id == id).cloned().collect();
            print!("{}", render::remotes(&matching));
        }
        None => print!("{}", render::remotes(rows)),
    }
    Ok(())
}

async fn settings(
    controller: &mut RemoteListController<ReqwestTransport>,
    id: RemoteId,
    action: SettingsAction,
) -> anyhow::Result<()> {
    let label = action.to_string();
    controller
        .handle(RemoteEvent::SettingsConfirmed { id, action })
        .await
        .with_context(|| format!("failed to {label} remote {id}"))
}

async fn wifi(command: WifiCommand, config: &Config) -> anyhow::Result<()> {
    let mut controller = NetworkConfigController::new(gateway_api(config)?);
    match command {
        WifiCommand::Networks => {
            let networks = controller
                .load_networks()
                .await
                .context("failed to scan networks")?;
            print!("{}", render::networks(networks));
        }
        WifiCommand::Show => {
            controller
                .load_wifi_config()
                .await
                .context("failed to load wifi config")?;
            println!("ssid: {}", controller.wifi().ssid);
        }
        WifiCommand::Set(WifiSetArgs {
            ssid,
            network,
            password,
        }) => {
            if let Some(index) = network {
                controller
                    .load_networks()
                    .await
                    .context("failed to scan networks")?;
                controller
                    .handle(ConfigEvent::NetworkSelected { index })
                    .await?;
                if controller.wifi().ssid.is_empty() {
                    bail!("no network at position {index}");
                }
            } else if let Some(ssid) = ssid {
                controller.wifi_mut().ssid = ssid;
            }
            controller.wifi_mut().password = password;
            controller
                .handle(ConfigEvent::WifiSubmitted)
                .await
                .context("failed to update wifi config")?;
            println!("wifi config sent for '{}'", controller.wifi().ssid);
        }
    }
    Ok(())
}

async fn mqtt(command: MqttCommand, config: &Config) -> anyhow::Result<()> {
    let mut controller = NetworkConfigController::new(gateway_api(config)?);
    controller
        .load_mqtt_config()
        .await
        .context("failed to load mqtt config")?;

    if let MqttCommand::Set(MqttSetArgs {
        enabled,
        broker,
        port,
        username,
        password,
    }) = command
    {
        let form = controller.mqtt_mut();
        if let Some(enabled) = enabled {
            form.enabled = enabled;
        }
        if let Some(broker) = broker {
            form.broker = broker;
        }
        if let Some(port) = port {
            form.port = port;
        }
        if let Some(username) = username {
            form.username = username;
        }
        if let Some(password) = password {
            form.password = password;
        }
        controller
            .handle(ConfigEvent::MqttSubmitted)
            .await
            .context("failed to update mqtt config")?;
        controller
            .load_mqtt_config()
            .await
            .context("failed to reload mqtt config")?;
    }

    print!("{}", render::mqtt(controller.mqtt()));
    Ok(())
}

async fn system(command: SystemCommand, config: &Config) -> anyhow::Result<()> {
    let mut controller = NetworkConfigController::new(gateway_api(config)?);
    match command {
        SystemCommand::Infos => {
            let infos = controller
                .load_system_infos()
                .await
                .context("failed to load system infos")?;
            print!("{}", render::system_infos(infos));
        }
        SystemCommand::Restart => {
            controller
                .handle(ConfigEvent::RestartClicked)
                .await
                .context("failed to restart the gateway")?;
            println!("restart requested");
        }
    }
    Ok(())
}

async fn serve_virtual(bind: &str) -> anyhow::Result<()> {
    let app = router::build(AppState::default());
    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .with_context(|| format!("failed to bind {bind}"))?;
    tracing::info!(address = %listener.local_addr()?, "virtual gateway listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("virtual gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
}
