//! JSON REST handlers for the MQTT bridge settings.

use axum::extract::State;
use axum::{Form, Json};
use serde::Deserialize;

use somfyctl_domain::error::ValidationError;
use somfyctl_domain::mqtt::MqttConfig;

use crate::error::GatewayError;
use crate::state::AppState;

/// Form body of `POST /mqtt/config`, every field as typed in the page.
#[derive(Debug, Deserialize)]
pub struct MqttForm {
    pub enabled: Option<String>,
    pub broker: Option<String>,
    pub port: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl MqttForm {
    /// Convert to a config the way the firmware reads its arguments: a port
    /// that does not parse counts as zero.
    fn into_config(self) -> Result<MqttConfig, ValidationError> {
        let broker = self.broker.ok_or(ValidationError::MissingField("broker"))?;
        let port = self
            .port
            .as_deref()
            .map(str::trim)
            .and_then(|raw| raw.parse::<u16>().ok())
            .unwrap_or(0);
        Ok(MqttConfig {
            enabled: self.enabled.as_deref() == Some("true"),
            broker,
            port,
            username: self.username.unwrap_or_default(),
            password: self.password.unwrap_or_default(),
        })
    }
}

/// `GET /api/v1/mqtt/config`
pub async fn get_config(State(state): State<AppState>) -> Json<MqttConfig> {
    Json(state.gateway.mqtt_config())
}

/// `POST /api/v1/mqtt/config`
pub async fn set_config(
    State(state): State<AppState>,
    Form(form): Form<MqttForm>,
) -> Result<Json<MqttConfig>, GatewayError> {
    let config = form.into_config()?;
    let stored = state.gateway.set_mqtt_config(config)?;
    Ok(Json(stored))
}
