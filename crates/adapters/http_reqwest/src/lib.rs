//! # somfyctl-adapter-http-reqwest
//!
//! Native implementation of the [`HttpTransport`] port on top of
//! [reqwest](https://docs.rs/reqwest).
//!
//! ## Responsibilities
//! - Send one request per call, form-encoding the payload
//! - Treat any non-2xx answer as [`ClientError::Status`]
//! - Parse the body as JSON, an empty body being `null`
//! - Bound every request by the configured timeout
//!
//! ## Dependency rule
//! Depends on `somfyctl-app` for the port trait. Never leaks reqwest types
//! into the application layer.

use std::future::Future;
use std::time::Duration;

use somfyctl_app::ports::transport::parse_body;
use somfyctl_app::ports::{ClientError, FormPayload, HttpTransport, Method};

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors raised while setting up the transport.
#[derive(Debug, thiserror::Error)]
pub enum TransportSetupError {
    #[error("failed to build http client: {0}")]
    Client(#[from] reqwest::Error),
}

/// [`HttpTransport`] backed by a shared [`reqwest::Client`].
///
/// Cloning is cheap: the connection pool is shared.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a transport whose requests give up after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`TransportSetupError::Client`] when the TLS backend cannot be
    /// initialised.
    pub fn new(timeout: Duration) -> Result<Self, TransportSetupError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    async fn execute(
        &self,
        url: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<serde_json::Value, ClientError> {
        let response = request.send().await.map_err(|err| transport_error(url, &err))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| transport_error(url, &err))?;

        if !status.is_success() {
            tracing::debug!(%url, status = status.as_u16(), "gateway answered with an error");
            return Err(ClientError::from_status(url, status.as_u16(), &body));
        }
        parse_body(url, &body)
    }
}

impl HttpTransport for ReqwestTransport {
    fn get(&self, url: &str) -> impl Future<Output = Result<serde_json::Value, ClientError>> {
        let request = self.client.get(url);
        async move { self.execute(url, request).await }
    }

    fn send(
        &self,
        url: &str,
        method: Method,
        payload: &FormPayload,
    ) -> impl Future<Output = Result<serde_json::Value, ClientError>> {
        let request = self
            .client
            .request(reqwest_method(method), url)
            .form(payload.pairs());
        async move { self.execute(url, request).await }
    }
}

fn reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Patch => reqwest::Method::PATCH,
        Method::Delete => reqwest::Method::DELETE,
    }
}

fn transport_error(url: &str, err: &reqwest::Error) -> ClientError {
    let message = if err.is_timeout() {
        "request timed out".to_string()
    } else {
        err.to_string()
    };
    ClientError::Transport {
        url: url.to_string(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use somfyctl_adapter_virtual_gateway::{AppState, router};
    use somfyctl_domain::remote::RollingCode;

    async fn spawn_gateway(state: AppState) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router::build(state)).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn transport() -> ReqwestTransport {
        ReqwestTransport::new(DEFAULT_TIMEOUT).unwrap()
    }

    #[tokio::test]
    async fn should_get_json_body() {
        let base = spawn_gateway(AppState::default()).await;

        let body = transport()
            .get(&format!("{base}/api/v1/wifi/networks"))
            .await
            .unwrap();

        assert!(body.as_array().is_some_and(|networks| !networks.is_empty()));
    }

    #[tokio::test]
    async fn should_send_form_encoded_payload() {
        let state = AppState::default();
        let base = spawn_gateway(state.clone()).await;

        let body = transport()
            .send(
                &format!("{base}/api/v1/remotes"),
                Method::Post,
                &FormPayload::new().with("name", "Living room"),
            )
            .await
            .unwrap();

        assert_eq!(body["name"], "Living room");
        assert_eq!(state.gateway.remotes()[0].rolling_code, RollingCode::ZERO);
    }

    #[tokio::test]
    async fn should_report_status_error_with_gateway_message() {
        let base = spawn_gateway(AppState::default()).await;
        let url = format!("{base}/api/v1/remotes/9");

        let err = transport()
            .send(&url, Method::Delete, &FormPayload::new())
            .await
            .unwrap_err();

        assert_eq!(
            err,
            ClientError::Status {
                url,
                status: 404,
                message: "Remote '9' doesn't exist".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn should_report_transport_error_when_unreachable() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = transport()
            .get(&format!("http://{addr}/api/v1/remotes"))
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::Transport { .. }));
    }

    #[test]
    fn should_map_every_method() {
        assert_eq!(reqwest_method(Method::Patch), reqwest::Method::PATCH);
        assert_eq!(reqwest_method(Method::Delete), reqwest::Method::DELETE);
    }
}
