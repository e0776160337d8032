//! JSON REST handlers for remotes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Form, Json};
use serde::Deserialize;

use somfyctl_domain::id::RemoteId;
use somfyctl_domain::remote::Remote;

use super::MessageBody;
use crate::error::GatewayError;
use crate::state::AppState;

/// Form body of create and rename.
#[derive(Debug, Deserialize)]
pub struct NameForm {
    pub name: Option<String>,
}

/// Form body of `POST /remotes/{id}/action`.
#[derive(Debug, Deserialize)]
pub struct ActionForm {
    pub action: Option<String>,
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<Remote>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the endpoints answering a single remote.
pub enum RemoteResponse {
    Ok(Json<Remote>),
    Created(Json<Remote>),
}

impl IntoResponse for RemoteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// `GET /api/v1/remotes`
pub async fn list(State(state): State<AppState>) -> ListResponse {
    ListResponse::Ok(Json(state.gateway.remotes()))
}

/// `GET /api/v1/remotes/{id}`
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<RemoteResponse, GatewayError> {
    let id: RemoteId = id.parse()?;
    let remote = state.gateway.remote(id)?;
    Ok(RemoteResponse::Ok(Json(remote)))
}

/// `POST /api/v1/remotes`
pub async fn create(
    State(state): State<AppState>,
    Form(form): Form<NameForm>,
) -> Result<RemoteResponse, GatewayError> {
    let remote = state.gateway.create_remote(form.name.as_deref())?;
    Ok(RemoteResponse::Created(Json(remote)))
}

/// `PATCH /api/v1/remotes/{id}`
pub async fn rename(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<NameForm>,
) -> Result<RemoteResponse, GatewayError> {
    let id: RemoteId = id.parse()?;
    let remote = state.gateway.rename_remote(id, form.name.as_deref())?;
    Ok(RemoteResponse::Ok(Json(remote)))
}

/// `DELETE /api/v1/remotes/{id}`
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<RemoteResponse, GatewayError> {
    let id: RemoteId = id.parse()?;
    let remote = state.gateway.delete_remote(id)?;
    Ok(RemoteResponse::Ok(Json(remote)))
}

/// `POST /api/v1/remotes/{id}/action`
pub async fn operate(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<ActionForm>,
) -> Result<Json<MessageBody>, GatewayError> {
    let id: RemoteId = id.parse()?;
    let message = state.gateway.operate(id, form.action.as_deref())?;
    Ok(Json(MessageBody::new(message)))
}
