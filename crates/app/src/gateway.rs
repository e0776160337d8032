//! Typed gateway API — one method per REST resource of the gateway.

use serde::Deserialize;
use serde::de::DeserializeOwned;

use somfyctl_domain::action::RemoteAction;
use somfyctl_domain::endpoint::{EndpointResolver, Resource};
use somfyctl_domain::id::RemoteId;
use somfyctl_domain::network::{Network, WifiConfig};
use somfyctl_domain::remote::Remote;
use somfyctl_domain::system::SystemInfos;

use crate::model::forms::{MqttForm, WifiForm};
use crate::model::remote_list::Change;
use crate::ports::{ClientError, FormPayload, HttpTransport, Method};

/// MQTT configuration as returned by the gateway.
///
/// Fields are optional so that a partial answer only overwrites what it
/// carries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MqttConfigResponse {
    pub enabled: Option<bool>,
    pub broker: Option<String>,
    pub port: Option<u16>,
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Typed client for the gateway REST API.
#[derive(Debug, Clone)]
pub struct GatewayApi<T> {
    transport: T,
    endpoints: EndpointResolver,
}

impl<T: HttpTransport> GatewayApi<T> {
    pub fn new(transport: T, endpoints: EndpointResolver) -> Self {
        Self {
            transport,
            endpoints,
        }
    }

    #[must_use]
    pub fn endpoints(&self) -> &EndpointResolver {
        &self.endpoints
    }

    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    async fn get_as<D: DeserializeOwned>(&self, resource: Resource) -> Result<D, ClientError> {
        let url = self.endpoints.resolve(resource);
        let body = self.transport.get(&url).await?;
        decode(&url, body)
    }

    async fn send(
        &self,
        resource: Resource,
        method: Method,
        payload: &FormPayload,
    ) -> Result<serde_json::Value, ClientError> {
        let url = self.endpoints.resolve(resource);
        tracing::debug!(%method, %url, "sending gateway request");
        self.transport.send(&url, method, payload).await
    }

    /// `GET /remotes`
    ///
    /// # Errors
    ///
    /// Returns the transport failure or a [`ClientError::Parse`] when the
    /// body is not a list of remotes.
    pub async fn list_remotes(&self) -> Result<Vec<Remote>, ClientError> {
        self.get_as(Resource::Remotes).await
    }

    /// `POST /remotes` with `name`; answers the created remote.
    ///
    /// # Errors
    ///
    /// Returns the transport failure or a [`ClientError::Parse`] when the
    /// body is not a remote.
    pub async fn create_remote(&self, name: &str) -> Result<Remote, ClientError> {
        let payload = FormPayload::new().with("name", name);
        let url = self.endpoints.resolve(Resource::Remotes);
        let body = self.send(Resource::Remotes, Method::Post, &payload).await?;
        decode(&url, body)
    }

    /// `PATCH /remotes/{id}` with `name`.
    ///
    /// # Errors
    ///
    /// Returns the transport failure.
    pub async fn rename_remote(&self, id: RemoteId, name: &str) -> Result<(), ClientError> {
        let payload = FormPayload::new().with("name", name);
        self.send(Resource::Remote(id), Method::Patch, &payload)
            .await
            .map(drop)
    }

    /// `DELETE /remotes/{id}`
    ///
    /// # Errors
    ///
    /// Returns the transport failure.
    pub async fn delete_remote(&self, id: RemoteId) -> Result<(), ClientError> {
        self.send(Resource::Remote(id), Method::Delete, &FormPayload::new())
            .await
            .map(drop)
    }

    /// `POST /remotes/{id}/action` with `action`.
    ///
    /// # Errors
    ///
    /// Returns the transport failure.
    pub async fn send_action(&self, id: RemoteId, action: &RemoteAction) -> Result<(), ClientError> {
        let payload = FormPayload::new().with("action", action);
        self.send(Resource::RemoteAction(id), Method::Post, &payload)
            .await
            .map(drop)
    }

    /// Send the request matching an optimistic [`Change`].
    ///
    /// # Errors
    ///
    /// Returns the transport failure.
    pub async fn dispatch(&self, change: &Change) -> Result<(), ClientError> {
        match change {
            Change::Action { id, action } => self.send_action(*id, action).await,
            Change::Rename { id, name } => self.rename_remote(*id, name).await,
            Change::Delete { id } => self.delete_remote(*id).await,
        }
    }

    /// `GET /wifi/networks`
    ///
    /// # Errors
    ///
    /// Returns the transport failure or a [`ClientError::Parse`].
    pub async fn list_networks(&self) -> Result<Vec<Network>, ClientError> {
        self.get_as(Resource::WifiNetworks).await
    }

    /// `GET /wifi/config`; the password is never returned.
    ///
    /// # Errors
    ///
    /// Returns the transport failure or a [`ClientError::Parse`].
    pub async fn wifi_config(&self) -> Result<WifiConfig, ClientError> {
        self.get_as(Resource::WifiConfig).await
    }

    /// `POST /wifi/config` with `ssid` and `password`.
    ///
    /// # Errors
    ///
    /// Returns the transport failure.
    pub async fn update_wifi_config(&self, form: &WifiForm) -> Result<(), ClientError> {
        self.send(Resource::WifiConfig, Method::Post, &form.to_payload())
            .await
            .map(drop)
    }

    /// `GET /mqtt/config`
    ///
    /// # Errors
    ///
    /// Returns the transport failure or a [`ClientError::Parse`].
    pub async fn mqtt_config(&self) -> Result<MqttConfigResponse, ClientError> {
        self.get_as(Resource::MqttConfig).await
    }

    /// `POST /mqtt/config` with the five form fields.
    ///
    /// # Errors
    ///
    /// Returns the transport failure.
    pub async fn update_mqtt_config(&self, form: &MqttForm) -> Result<(), ClientError> {
        self.send(Resource::MqttConfig, Method::Post, &form.to_payload())
            .await
            .map(drop)
    }

    /// `GET /system/infos`
    ///
    /// # Errors
    ///
    /// Returns the transport failure or a [`ClientError::Parse`].
    pub async fn system_infos(&self) -> Result<SystemInfos, ClientError> {
        self.get_as(Resource::SystemInfos).await
    }

    /// `POST /system/restart` with an empty payload.
    ///
    /// # Errors
    ///
    /// Returns the transport failure.
    pub async fn restart(&self) -> Result<(), ClientError> {
        self.send(Resource::SystemRestart, Method::Post, &FormPayload::new())
            .await
            .map(drop)
    }
}

fn decode<D: DeserializeOwned>(url: &str, body: serde_json::Value) -> Result<D, ClientError> {
    serde_json::from_value(body).map_err(|err| ClientError::Parse {
        url: url.to_string(),
        message: err.to_string(),
    })
}

#[cfg(test)]
pub(crate) mod testing {
    //! Recording transport shared by the app tests.

    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::future::Future;

    use super::*;

    /// A request seen by [`FakeTransport`].
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Recorded {
        pub method: Method,
        pub url: String,
        pub payload: FormPayload,
    }

    /// Answers queued responses in order and records every request.
    #[derive(Default)]
    pub struct FakeTransport {
        responses: RefCell<VecDeque<Result<serde_json::Value, ClientError>>>,
        requests: RefCell<Vec<Recorded>>,
    }

    impl FakeTransport {
        pub fn respond(&self, response: Result<serde_json::Value, ClientError>) {
            self.responses.borrow_mut().push_back(response);
        }

        pub fn respond_ok(&self, body: serde_json::Value) {
            self.respond(Ok(body));
        }

        pub fn respond_unreachable(&self) {
            self.respond(Err(ClientError::Transport {
                url: "fake".to_string(),
                message: "connection refused".to_string(),
            }));
        }

        pub fn requests(&self) -> Vec<Recorded> {
            self.requests.borrow().clone()
        }

        fn next(&self, recorded: Recorded) -> Result<serde_json::Value, ClientError> {
            self.requests.borrow_mut().push(recorded);
            self.responses
                .borrow_mut()
                .pop_front()
                .unwrap_or(Ok(serde_json::Value::Null))
        }
    }

    impl HttpTransport for FakeTransport {
        fn get(&self, url: &str) -> impl Future<Output = Result<serde_json::Value, ClientError>> {
            let result = self.next(Recorded {
                method: Method::Get,
                url: url.to_string(),
                payload: FormPayload::new(),
            });
            async { result }
        }

        fn send(
            &self,
            url: &str,
            method: Method,
            payload: &FormPayload,
        ) -> impl Future<Output = Result<serde_json::Value, ClientError>> {
            let result = self.next(Recorded {
                method,
                url: url.to_string(),
                payload: payload.clone(),
            });
            async { result }
        }
    }

    pub fn api(transport: &FakeTransport) -> GatewayApi<&FakeTransport> {
        GatewayApi::new(transport, EndpointResolver::default())
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{FakeTransport, api};
    use super::*;
    use somfyctl_domain::remote::RollingCode;

    #[tokio::test]
    async fn should_decode_remote_list() {
        let transport = FakeTransport::default();
        transport.respond_ok(serde_json::json!([
            {"id": 1, "name": "Kitchen", "rolling_code": 4},
            {"id": 2, "name": "Bedroom", "rolling_code": 0}
        ]));

        let remotes = api(&transport).list_remotes().await.unwrap();

        assert_eq!(remotes.len(), 2);
        assert_eq!(remotes[0].rolling_code, RollingCode::new(4));
        assert_eq!(transport.requests()[0].url, "/api/v1/remotes");
    }

    #[tokio::test]
    async fn should_report_parse_error_when_list_has_wrong_shape() {
        let transport = FakeTransport::default();
        transport.respond_ok(serde_json::json!({"message": "nope"}));

        let err = api(&transport).list_remotes().await.unwrap_err();

        assert!(matches!(err, ClientError::Parse { .. }));
    }

    #[tokio::test]
    async fn should_post_action_as_form_field() {
        let transport = FakeTransport::default();

        api(&transport)
            .send_action(RemoteId::new(9), &RemoteAction::Up)
            .await
            .unwrap();

        let sent = &transport.requests()[0];
        assert_eq!(sent.method, Method::Post);
        assert_eq!(sent.url, "/api/v1/remotes/9/action");
        assert_eq!(sent.payload.encode(), "action=up");
    }

    #[tokio::test]
    async fn should_patch_name_on_rename() {
        let transport = FakeTransport::default();

        api(&transport)
            .rename_remote(RemoteId::new(3), "Office")
            .await
            .unwrap();

        let sent = &transport.requests()[0];
        assert_eq!(sent.method, Method::Patch);
        assert_eq!(sent.url, "/api/v1/remotes/3");
        assert_eq!(sent.payload.get("name"), Some("Office"));
    }

    #[tokio::test]
    async fn should_delete_with_empty_payload() {
        let transport = FakeTransport::default();

        api(&transport).delete_remote(RemoteId::new(5)).await.unwrap();

        let sent = &transport.requests()[0];
        assert_eq!(sent.method, Method::Delete);
        assert!(sent.payload.is_empty());
    }

    #[tokio::test]
    async fn should_restart_with_empty_post() {
        let transport = FakeTransport::default();
        transport.respond_ok(serde_json::json!({"message": "Restart requested."}));

        api(&transport).restart().await.unwrap();

        let sent = &transport.requests()[0];
        assert_eq!(sent.method, Method::Post);
        assert_eq!(sent.url, "/api/v1/system/restart");
        assert!(sent.payload.is_empty());
    }

    #[tokio::test]
    async fn should_accept_partial_mqtt_config() {
        let transport = FakeTransport::default();
        transport.respond_ok(serde_json::json!({"broker": "broker.local"}));

        let config = api(&transport).mqtt_config().await.unwrap();

        assert_eq!(config.broker.as_deref(), Some("broker.local"));
        assert!(config.port.is_none());
    }

    #[tokio::test]
    async fn should_propagate_transport_failure() {
        let transport = FakeTransport::default();
        transport.respond_unreachable();

        let err = api(&transport).system_infos().await.unwrap_err();

        assert!(matches!(err, ClientError::Transport { .. }));
    }
}
