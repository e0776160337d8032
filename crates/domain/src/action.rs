//! Action — a command a remote transmits, or a settings operation on it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Command sent through `POST /remotes/{id}/action`.
///
/// The client forwards any value; only the known variants have a meaning on
/// the gateway, which rejects the rest.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RemoteAction {
    Up,
    Stop,
    Down,
    /// Programming frame used to pair the remote with a motor.
    Pair,
    /// Reset the rolling code to zero. Nothing is transmitted.
    Reset,
    Other(String),
}

impl RemoteAction {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Up => "up",
            Self::Stop => "stop",
            Self::Down => "down",
            Self::Pair => "pair",
            Self::Reset => "reset",
            Self::Other(raw) => raw,
        }
    }

    /// Whether sending this action emits an RTS frame and so consumes a
    /// rolling code.
    #[must_use]
    pub fn transmits(&self) -> bool {
        matches!(self, Self::Up | Self::Stop | Self::Down | Self::Pair)
    }

    /// Reject actions the gateway does not know.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnknownAction`] for [`RemoteAction::Other`].
    pub fn ensure_known(&self) -> Result<(), ValidationError> {
        match self {
            Self::Other(raw) => Err(ValidationError::UnknownAction(raw.clone())),
            _ => Ok(()),
        }
    }
}

impl From<&str> for RemoteAction {
    fn from(raw: &str) -> Self {
        match raw {
            "up" => Self::Up,
            "stop" => Self::Stop,
            "down" => Self::Down,
            "pair" => Self::Pair,
            "reset" => Self::Reset,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for RemoteAction {
    fn from(raw: String) -> Self {
        Self::from(raw.as_str())
    }
}

impl From<RemoteAction> for String {
    fn from(action: RemoteAction) -> Self {
        match action {
            RemoteAction::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl FromStr for RemoteAction {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl fmt::Display for RemoteAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operation chosen in the per-remote settings panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsAction {
    Delete,
    Send(RemoteAction),
}

impl From<&str> for SettingsAction {
    fn from(raw: &str) -> Self {
        match raw {
            "delete" => Self::Delete,
            other => Self::Send(RemoteAction::from(other)),
        }
    }
}

impl fmt::Display for SettingsAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Delete => f.write_str("delete"),
            Self::Send(action) => action.fmt(f),
        }
    }
}
