//! MQTT — broker settings of the gateway's MQTT bridge.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// MQTT bridge configuration, read and replaced as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MqttConfig {
    pub enabled: bool,
    pub broker: String,
    pub port: u16,
    pub username: String,
    pub password: String,
}

impl Default for MqttConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            broker: String::new(),
            port: 1883,
            username: String::new(),
            password: String::new(),
        }
    }
}

impl MqttConfig {
    /// Check the invariants the gateway enforces on update.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::ZeroPort`] when `port` is `0`.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.port == 0 {
            return Err(ValidationError::ZeroPort);
        }
        Ok(())
    }

    /// An empty broker cannot be connected to, so it disables the bridge.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        if self.broker.is_empty() {
            self.enabled = false;
        }
        self
    }
}
