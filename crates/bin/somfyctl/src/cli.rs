//! Command-line surface.

use clap::{Args, Parser, Subcommand};

use somfyctl_domain::id::RemoteId;

use crate::config::DEFAULT_PATH;

#[derive(Debug, Parser)]
#[command(name = "somfyctl")]
#[command(about = "Drive a Somfy RTS gateway: remotes, Wi-Fi, MQTT and system")]
pub struct Cli {
    /// Configuration file.
    #[arg(long, global = true, default_value = DEFAULT_PATH)]
    pub config: String,

    /// Gateway base URL, overrides the configuration.
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Paired remotes
    #[command(subcommand)]
    Remotes(RemotesCommand),
    /// Wi-Fi station
    #[command(subcommand)]
    Wifi(WifiCommand),
    /// MQTT bridge
    #[command(subcommand)]
    Mqtt(MqttCommand),
    /// Firmware infos and restart
    #[command(subcommand)]
    System(SystemCommand),
    /// Serve an in-memory gateway
    ServeVirtual {
        /// Listen address, overrides the configuration.
        #[arg(long)]
        bind: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum RemotesCommand {
    /// List remotes with their rolling code
    List,
    /// Create a remote
    Create { name: String },
    /// Rename a remote; the name is trimmed and cut to 15 characters
    Rename { id: RemoteId, name: String },
    /// Delete a remote
    Delete { id: RemoteId },
    /// Send an action: up, stop, down or pair
    Action { id: RemoteId, action: String },
    /// Reset the rolling code to zero
    Reset { id: RemoteId },
}

#[derive(Debug, Subcommand)]
pub enum WifiCommand {
    /// Scan networks
    Networks,
    /// Show the configured ssid
    Show,
    /// Configure the station
    Set(WifiSetArgs),
}

#[derive(Debug, Args)]
pub struct WifiSetArgs {
    /// Network name; use `--network` to pick one from the scan instead
    #[arg(required_unless_present = "network")]
    pub ssid: Option<String>,
    /// Position of a network in `wifi networks`
    #[arg(long, conflicts_with = "ssid")]
    pub network: Option<usize>,
    #[arg(long, default_value = "")]
    pub password: String,
}

#[derive(Debug, Subcommand)]
pub enum MqttCommand {
    /// Show the bridge settings
    Show,
    /// Change some settings; the others keep their current value
    Set(MqttSetArgs),
}

#[derive(Debug, Args)]
pub struct MqttSetArgs {
    #[arg(long)]
    pub enabled: Option<bool>,
    #[arg(long)]
    pub broker: Option<String>,
    /// Sent as typed
    #[arg(long)]
    pub port: Option<String>,
    #[arg(long)]
    pub username: Option<String>,
    #[arg(long)]
    pub password: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum SystemCommand {
    /// Firmware version and network identity
    Infos,
    /// Restart the gateway
    Restart,
}
