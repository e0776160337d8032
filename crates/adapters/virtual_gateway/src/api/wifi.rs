//! JSON REST handlers for the Wi-Fi station.

use axum::extract::State;
use axum::{Form, Json};
use serde::{Deserialize, Serialize};

use somfyctl_domain::network::Network;

use crate::error::GatewayError;
use crate::state::AppState;

/// Form body of `POST /wifi/config`.
#[derive(Debug, Deserialize)]
pub struct WifiForm {
    pub ssid: Option<String>,
    pub password: Option<String>,
}

/// The stored Wi-Fi settings. The password never leaves the device.
#[derive(Debug, Serialize)]
pub struct WifiConfigBody {
    pub ssid: String,
}

/// `GET /api/v1/wifi/networks`
pub async fn networks(State(state): State<AppState>) -> Json<Vec<Network>> {
    Json(state.gateway.networks())
}

/// `GET /api/v1/wifi/config`
pub async fn get_config(State(state): State<AppState>) -> Json<WifiConfigBody> {
    Json(WifiConfigBody {
        ssid: state.gateway.wifi_config().ssid,
    })
}

/// `POST /api/v1/wifi/config`
pub async fn set_config(
    State(state): State<AppState>,
    Form(form): Form<WifiForm>,
) -> Result<Json<WifiConfigBody>, GatewayError> {
    let config = state
        .gateway
        .set_wifi_config(form.ssid.as_deref(), form.password.as_deref())?;
    Ok(Json(WifiConfigBody { ssid: config.ssid }))
}
