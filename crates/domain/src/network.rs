//! Networks — Wi-Fi scan results and the gateway's station settings.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A Wi-Fi network seen by the gateway during its last scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Network {
    pub ssid: String,
    /// Signal strength in dBm.
    pub rssi: i32,
}

impl Network {
    /// Human-readable signal strength, e.g. `-67 dBm`.
    #[must_use]
    pub fn signal_label(&self) -> String {
        format!("{} dBm", self.rssi)
    }
}

/// Station settings the gateway uses to join a network.
///
/// The gateway never returns the password: reading the configuration yields
/// only the ssid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WifiConfig {
    pub ssid: String,
    #[serde(default)]
    pub password: String,
}

impl WifiConfig {
    /// Check the invariants the gateway enforces on update.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptySsid`] when `ssid` is empty. An empty
    /// password is accepted (open hotspot).
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.ssid.is_empty() {
            return Err(ValidationError::EmptySsid);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_format_signal_label_in_dbm() {
        let network = Network {
            ssid: "home-net".to_string(),
            rssi: -67,
        };
        assert_eq!(network.signal_label(), "-67 dBm");
    }

    #[test]
    fn should_deserialize_config_without_password() {
        let config: WifiConfig = serde_json::from_str(r#"{"ssid":"home-net"}"#).unwrap();
        assert_eq!(config.ssid, "home-net");
        assert!(config.password.is_empty());
    }

    #[test]
    fn should_reject_empty_ssid() {
        let config = WifiConfig::default();
        assert_eq!(config.validate(), Err(ValidationError::EmptySsid));
    }

    #[test]
    fn should_accept_open_network_without_password() {
        let config = WifiConfig {
            ssid: "cafe".to_string(),
            password: String::new(),
        };
        assert!(config.validate().is_ok());
    }
}
