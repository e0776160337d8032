//! Configuration forms — Wi-Fi and MQTT settings as the user edits them.

use somfyctl_domain::network::{Network, WifiConfig};

use crate::gateway::MqttConfigResponse;
use crate::ports::FormPayload;

/// Wi-Fi station form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WifiForm {
    pub ssid: String,
    pub password: String,
}

impl WifiForm {
    /// Copy the ssid of a scanned network; the password is left untouched.
    pub fn select(&mut self, network: &Network) {
        self.ssid.clone_from(&network.ssid);
    }

    /// Prefill the ssid from the configuration stored on the gateway.
    pub fn prefill(&mut self, config: &WifiConfig) {
        self.ssid.clone_from(&config.ssid);
    }

    /// Body of `POST /wifi/config`. No client-side validation.
    #[must_use]
    pub fn to_payload(&self) -> FormPayload {
        FormPayload::new()
            .with("ssid", &self.ssid)
            .with("password", &self.password)
    }
}

/// MQTT bridge form.
///
/// `port` is kept as the raw text of the input and sent uncoerced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MqttForm {
    pub enabled: bool,
    pub broker: String,
    pub port: String,
    pub username: String,
    pub password: String,
}

impl MqttForm {
    /// Overwrite the fields present in a gateway answer.
    ///
    /// Absent fields keep their current value.
    pub fn apply(&mut self, config: &MqttConfigResponse) {
        if let Some(enabled) = config.enabled {
            self.enabled = enabled;
        }
        if let Some(broker) = &config.broker {
            self.broker.clone_from(broker);
        }
        if let Some(port) = config.port {
            self.port = port.to_string();
        }
        if let Some(username) = &config.username {
            self.username.clone_from(username);
        }
        if let Some(password) = &config.password {
            self.password.clone_from(password);
        }
    }

    /// Body of `POST /mqtt/config`.
    #[must_use]
    pub fn to_payload(&self) -> FormPayload {
        FormPayload::new()
            .with("enabled", self.enabled)
            .with("broker", &self.broker)
            .with("port", &self.port)
            .with("username", &self.username)
            .with("password", &self.password)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_copy_ssid_and_keep_password_on_select() {
        let mut form = WifiForm {
            ssid: "old".to_string(),
            password: "secret".to_string(),
        };
        form.select(&Network {
            ssid: "home-net".to_string(),
            rssi: -50,
        });
        assert_eq!(form.ssid, "home-net");
        assert_eq!(form.password, "secret");
    }

    #[test]
    fn should_send_both_wifi_fields() {
        let form = WifiForm {
            ssid: "home-net".to_string(),
            password: "secret".to_string(),
        };
        assert_eq!(form.to_payload().encode(), "ssid=home-net&password=secret");
    }

    #[test]
    fn should_send_empty_wifi_fields_without_validation() {
        let form = WifiForm::default();
        assert_eq!(form.to_payload().encode(), "ssid=&password=");
    }

    #[test]
    fn should_fill_every_mqtt_field_from_full_answer() {
        let mut form = MqttForm::default();
        form.apply(&MqttConfigResponse {
            enabled: Some(true),
            broker: Some("broker.local".to_string()),
            port: Some(1883),
            username: Some("hub".to_string()),
            password: Some("pw".to_string()),
        });
        assert!(form.enabled);
        assert_eq!(form.broker, "broker.local");
        assert_eq!(form.port, "1883");
        assert_eq!(form.username, "hub");
        assert_eq!(form.password, "pw");
    }

    #[test]
    fn should_leave_fields_absent_from_answer_unchanged() {
        let mut form = MqttForm {
            username: "typed".to_string(),
            ..MqttForm::default()
        };
        form.apply(&MqttConfigResponse {
            broker: Some("broker.local".to_string()),
            ..MqttConfigResponse::default()
        });
        assert_eq!(form.username, "typed");
        assert_eq!(form.broker, "broker.local");
    }

    #[test]
    fn should_send_port_uncoerced() {
        let form = MqttForm {
            enabled: true,
            broker: "b".to_string(),
            port: "18 83".to_string(),
            username: String::new(),
            password: String::new(),
        };
        let payload = form.to_payload();
        assert_eq!(payload.get("port"), Some("18 83"));
        assert_eq!(payload.get("enabled"), Some("true"));
        assert_eq!(payload.pairs().len(), 5);
    }
}
