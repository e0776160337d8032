//! Simulated gateway device — remotes, Wi-Fi, MQTT and system state.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use somfyctl_domain::action::RemoteAction;
use somfyctl_domain::error::{CapacityError, NotFoundError, SomfyError, ValidationError};
use somfyctl_domain::id::RemoteId;
use somfyctl_domain::mqtt::MqttConfig;
use somfyctl_domain::network::{Network, WifiConfig};
use somfyctl_domain::remote::{MAX_REMOTE_NAME_LENGTH, Remote, RollingCode, validate_name};
use somfyctl_domain::system::SystemInfos;

/// Number of remotes the device can store.
pub const MAX_REMOTES: usize = 10;

/// Firmware version reported by `GET /system/infos`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

struct State {
    remotes: BTreeMap<RemoteId, Remote>,
    next_id: u64,
    wifi: WifiConfig,
    mqtt: MqttConfig,
    networks: Vec<Network>,
    restarts: usize,
}

/// In-memory stand-in for the gateway firmware.
///
/// Every operation enforces the same rules as the device and returns the
/// stored record. Nothing is ever transmitted.
pub struct VirtualGateway {
    state: Mutex<State>,
    infos: SystemInfos,
}

impl Default for VirtualGateway {
    fn default() -> Self {
        Self::with_networks(vec![
            Network {
                ssid: "home-net".to_string(),
                rssi: -48,
            },
            Network {
                ssid: "garden-ap".to_string(),
                rssi: -67,
            },
            Network {
                ssid: "neighbour".to_string(),
                rssi: -82,
            },
        ])
    }
}

impl VirtualGateway {
    /// Gateway answering `networks` to every scan.
    #[must_use]
    pub fn with_networks(networks: Vec<Network>) -> Self {
        Self {
            state: Mutex::new(State {
                remotes: BTreeMap::new(),
                next_id: 1,
                wifi: WifiConfig::default(),
                mqtt: MqttConfig::default(),
                networks,
                restarts: 0,
            }),
            infos: SystemInfos {
                version: Some(VERSION.to_string()),
                mac_address: Some("24:0A:C4:00:00:01".to_string()),
                ip_address: Some("192.168.4.1".to_string()),
            },
        }
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn remotes(&self) -> Vec<Remote> {
        self.lock().remotes.values().cloned().collect()
    }

    /// # Errors
    ///
    /// Returns [`NotFoundError`] for an unknown id.
    pub fn remote(&self, id: RemoteId) -> Result<Remote, SomfyError> {
        self.lock()
            .remotes
            .get(&id)
            .cloned()
            .ok_or_else(|| not_found(id).into())
    }

    /// Store a new remote with a zero rolling code.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a missing, empty or too long name, and
    /// a capacity error once [`MAX_REMOTES`] remotes are stored.
    pub fn create_remote(&self, name: Option<&str>) -> Result<Remote, SomfyError> {
        let name = name.ok_or(ValidationError::MissingField("name"))?;
        validate_name(name)?;

        let mut state = self.lock();
        if state.remotes.len() >= MAX_REMOTES {
            return Err(CapacityError {
                entity: "remote",
                max: MAX_REMOTES,
            }
            .into());
        }
        let id = RemoteId::new(state.next_id);
        state.next_id += 1;
        let remote = Remote::new(id, name, RollingCode::ZERO);
        state.remotes.insert(id, remote.clone());
        tracing::debug!(remote_id = %id, name, "remote created");
        Ok(remote)
    }

    /// Rename a remote. A missing or empty name leaves it unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`NotFoundError`] for an unknown id and
    /// [`ValidationError::NameTooLong`] for a name over the limit.
    pub fn rename_remote(&self, id: RemoteId, name: Option<&str>) -> Result<Remote, SomfyError> {
        let mut state = self.lock();
        let remote = state.remotes.get_mut(&id).ok_or_else(|| not_found(id))?;
        match name {
            Some(name) if name.chars().count() > MAX_REMOTE_NAME_LENGTH => {
                return Err(ValidationError::NameTooLong {
                    max: MAX_REMOTE_NAME_LENGTH,
                }
                .into());
            }
            Some(name) if !name.is_empty() => name.clone_into(&mut remote.name),
            _ => tracing::debug!(remote_id = %id, "name not specified, keeping it"),
        }
        Ok(remote.clone())
    }

    /// Remove a remote and return it.
    ///
    /// # Errors
    ///
    /// Returns [`NotFoundError`] for an unknown id.
    pub fn delete_remote(&self, id: RemoteId) -> Result<Remote, SomfyError> {
        let removed = self.lock().remotes.remove(&id).ok_or_else(|| not_found(id))?;
        tracing::debug!(remote_id = %id, "remote deleted");
        Ok(removed)
    }

    /// Operate a remote and return the confirmation message.
    ///
    /// Transmitting actions advance the rolling code by one; `reset` sets it
    /// back to zero.
    ///
    /// # Errors
    ///
    /// Returns [`NotFoundError`] for an unknown id, and a validation error
    /// for a missing or unknown action.
    pub fn operate(&self, id: RemoteId, action: Option<&str>) -> Result<String, SomfyError> {
        let action = match action {
            Some(raw) if !raw.is_empty() => RemoteAction::from(raw),
            _ => return Err(ValidationError::MissingField("action").into()),
        };

        let mut state = self.lock();
        let remote = state.remotes.get_mut(&id).ok_or_else(|| not_found(id))?;
        action.ensure_known()?;

        if action == RemoteAction::Reset {
            remote.rolling_code = RollingCode::ZERO;
            tracing::info!(remote_id = %id, "rolling code reset");
            return Ok("Rolling code reseted.".to_string());
        }

        tracing::info!(remote_id = %id, %action, rolling_code = %remote.rolling_code, "command sent");
        remote.rolling_code = remote.rolling_code.next();
        Ok(format!("Command {} sent.", action.as_str().to_uppercase()))
    }

    #[must_use]
    pub fn networks(&self) -> Vec<Network> {
        self.lock().networks.clone()
    }

    /// Stored Wi-Fi settings.
    #[must_use]
    pub fn wifi_config(&self) -> WifiConfig {
        self.lock().wifi.clone()
    }

    /// Replace the Wi-Fi settings. A missing password means an open network.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a missing or empty ssid.
    pub fn set_wifi_config(
        &self,
        ssid: Option<&str>,
        password: Option<&str>,
    ) -> Result<WifiConfig, SomfyError> {
        let config = WifiConfig {
            ssid: ssid
                .ok_or(ValidationError::MissingField("ssid"))?
                .to_string(),
            password: password.unwrap_or_default().to_string(),
        };
        config.validate()?;
        self.lock().wifi = config.clone();
        tracing::debug!(ssid = %config.ssid, "wifi config updated");
        Ok(config)
    }

    #[must_use]
    pub fn mqtt_config(&self) -> MqttConfig {
        self.lock().mqtt.clone()
    }

    /// Replace the MQTT settings. An empty broker disables the bridge.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a zero port.
    pub fn set_mqtt_config(&self, config: MqttConfig) -> Result<MqttConfig, SomfyError> {
        config.validate()?;
        let config = config.normalized();
        if config.broker.is_empty() {
            tracing::warn!("the broker is empty, mqtt will be disabled");
        }
        self.lock().mqtt = config.clone();
        Ok(config)
    }

    #[must_use]
    pub fn system_infos(&self) -> SystemInfos {
        self.infos.clone()
    }

    /// Record a restart request. State survives it.
    pub fn request_restart(&self) {
        self.lock().restarts += 1;
        tracing::info!("restart requested");
    }

    /// Number of restarts requested so far.
    #[must_use]
    pub fn restarts(&self) -> usize {
        self.lock().restarts
    }
}

fn not_found(id: RemoteId) -> NotFoundError {
    NotFoundError {
        entity: "Remote",
        id: id.to_string(),
    }
}
