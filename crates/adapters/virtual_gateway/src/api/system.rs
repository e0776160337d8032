//! JSON REST handlers for system infos and restart.

use axum::Json;
use axum::extract::State;

use somfyctl_domain::system::SystemInfos;

use super::MessageBody;
use crate::state::AppState;

/// `GET /api/v1/system/infos`
pub async fn infos(State(state): State<AppState>) -> Json<SystemInfos> {
    Json(state.gateway.system_infos())
}

/// `POST /api/v1/system/restart`
pub async fn restart(State(state): State<AppState>) -> Json<MessageBody> {
    state.gateway.request_restart();
    Json(MessageBody::new("Restart requested."))
}
