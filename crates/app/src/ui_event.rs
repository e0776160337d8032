//! UI events — what a page forwards to its controller.
//!
//! A page installs one handler per container and translates the DOM event
//! into one of these values; the controller's `handle` does the rest.

use somfyctl_domain::action::{RemoteAction, SettingsAction};
use somfyctl_domain::id::RemoteId;

/// Key that commits an inline name edit.
pub const COMMIT_KEY: &str = "Enter";

/// Events of the remotes page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteEvent {
    /// Page load.
    Load,
    /// One of the per-row movement buttons.
    ActionClicked { id: RemoteId, action: RemoteAction },
    /// A key pressed in the editable name of a row, with the current text.
    NameKeyDown {
        id: RemoteId,
        key: String,
        text: String,
    },
    /// Confirmation button of the settings panel.
    SettingsConfirmed { id: RemoteId, action: SettingsAction },
    /// "New remote" button with the typed name.
    CreateSubmitted { name: String },
}

impl RemoteEvent {
    /// Whether this event leads to a request.
    #[must_use]
    pub fn is_actionable(&self) -> bool {
        match self {
            Self::NameKeyDown { key, .. } => key == COMMIT_KEY,
            _ => true,
        }
    }
}

/// Events of the configuration page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigEvent {
    /// Page load: networks, Wi-Fi ssid, MQTT settings and system infos.
    Load,
    /// A row of the scanned network list, by position.
    NetworkSelected { index: usize },
    WifiSubmitted,
    MqttSubmitted,
    RestartClicked,
}
