//! JSON REST handler modules, mounted under `/api/v1`.

#[allow(clippy::missing_errors_doc)]
pub mod mqtt;
#[allow(clippy::missing_errors_doc)]
pub mod remotes;
#[allow(clippy::missing_errors_doc)]
pub mod system;
#[allow(clippy::missing_errors_doc)]
pub mod wifi;

use axum::Router;
use axum::routing::{get, post};
use serde::Serialize;

use crate::state::AppState;

/// `{"message": ...}` body of command-style endpoints.
#[derive(Debug, Serialize)]
pub struct MessageBody {
    pub message: String,
}

impl MessageBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Build the `/api/v1` sub-router.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Remotes
        .route("/remotes", get(remotes::list).post(remotes::create))
        .route(
            "/remotes/{id}",
            get(remotes::get)
                .patch(remotes::rename)
                .delete(remotes::delete),
        )
        .route("/remotes/{id}/action", post(remotes::operate))
        // Wi-Fi
        .route("/wifi/networks", get(wifi::networks))
        .route("/wifi/config", get(wifi::get_config).post(wifi::set_config))
        // MQTT
        .route("/mqtt/config", get(mqtt::get_config).post(mqtt::set_config))
        // System
        .route("/system/infos", get(system::infos))
        .route("/system/restart", post(system::restart))
}
