//! Transport port — one-shot HTTP calls against the gateway.
//!
//! A transport issues a single request and hands back the parsed JSON body.
//! It never retries and never inspects the payload: mapping JSON to domain
//! types is the job of [`GatewayApi`](crate::gateway::GatewayApi).

use std::fmt;
use std::future::Future;

use serde::Deserialize;

/// HTTP verbs used by the gateway API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

impl Method {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered key/value pairs sent as `application/x-www-form-urlencoded`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormPayload {
    pairs: Vec<(String, String)>,
}

impl FormPayload {
    /// Content type every transport must set when sending a payload.
    pub const CONTENT_TYPE: &'static str = "application/x-www-form-urlencoded";

    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.pairs.push((key.into(), value.to_string()));
        self
    }

    #[must_use]
    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// Value of the first pair named `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Encode as a form body, e.g. `name=Living+room&action=up`.
    #[must_use]
    pub fn encode(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs.iter())
            .finish()
    }
}

/// Failure of a single gateway call.
///
/// Messages are kept as strings so the error stays `Clone` and can live in
/// UI state regardless of which HTTP library produced it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    /// The request never produced a response (unreachable, timeout, …).
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    /// The gateway answered with a non-2xx status.
    #[error("{url} answered HTTP {status}: {message}")]
    Status {
        url: String,
        status: u16,
        message: String,
    },

    /// The body was not JSON, or not the expected shape.
    #[error("failed to parse response from {url}: {message}")]
    Parse { url: String, message: String },
}

impl ClientError {
    /// The URL of the failed call.
    #[must_use]
    pub fn url(&self) -> &str {
        match self {
            Self::Transport { url, .. } | Self::Status { url, .. } | Self::Parse { url, .. } => {
                url
            }
        }
    }

    /// Build a [`ClientError::Status`] from a non-2xx response body.
    ///
    /// The gateway reports failures as `{"error": "..."}`; other bodies fall
    /// back to a generic `HTTP <status>` message.
    #[must_use]
    pub fn from_status(url: impl Into<String>, status: u16, body: &str) -> Self {
        #[derive(Deserialize)]
        struct ErrorBody {
            error: Option<String>,
            message: Option<String>,
        }

        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.error.or(b.message))
            .unwrap_or_else(|| format!("HTTP {status}"));
        Self::Status {
            url: url.into(),
            status,
            message,
        }
    }
}

/// Parse a successful response body. An empty body is JSON `null`.
///
/// # Errors
///
/// Returns [`ClientError::Parse`] when the body is not valid JSON.
pub fn parse_body(url: &str, body: &str) -> Result<serde_json::Value, ClientError> {
    if body.trim().is_empty() {
        return Ok(serde_json::Value::Null);
    }
    serde_json::from_str(body).map_err(|err| ClientError::Parse {
        url: url.to_string(),
        message: err.to_string(),
    })
}

/// Outbound port for HTTP calls.
///
/// Implementations must treat non-2xx responses as [`ClientError::Status`]
/// (see [`ClientError::from_status`]) and parse bodies with [`parse_body`].
pub trait HttpTransport {
    /// Issue a `GET` and return the parsed JSON body.
    fn get(&self, url: &str) -> impl Future<Output = Result<serde_json::Value, ClientError>>;

    /// Issue a request with a form-encoded body and return the parsed JSON
    /// body.
    fn send(
        &self,
        url: &str,
        method: Method,
        payload: &FormPayload,
    ) -> impl Future<Output = Result<serde_json::Value, ClientError>>;
}

impl<T: HttpTransport + ?Sized> HttpTransport for &T {
    fn get(&self, url: &str) -> impl Future<Output = Result<serde_json::Value, ClientError>> {
        (**self).get(url)
    }

    fn send(
        &self,
        url: &str,
        method: Method,
        payload: &FormPayload,
    ) -> impl Future<Output = Result<serde_json::Value, ClientError>> {
        (**self).send(url, method, payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_encode_pairs_in_insertion_order() {
        let payload = FormPayload::new()
            .with("ssid", "home-net")
            .with("password", "s3cr&t");
        assert_eq!(payload.encode(), "ssid=home-net&password=s3cr%26t");
    }

    #[test]
    fn should_encode_spaces_as_plus() {
        let payload = FormPayload::new().with("name", "Living room");
        assert_eq!(payload.encode(), "name=Living+room");
    }

    #[test]
    fn should_encode_empty_payload_as_empty_string() {
        assert_eq!(FormPayload::new().encode(), "");
    }

    #[test]
    fn should_look_up_first_value_by_key() {
        let payload = FormPayload::new().with("action", "up");
        assert_eq!(payload.get("action"), Some("up"));
        assert_eq!(payload.get("name"), None);
    }

    #[test]
    fn should_use_gateway_error_message_for_status_error() {
        let err = ClientError::from_status("/api/v1/remotes", 400, r#"{"error":"The name cannot be empty."}"#);
        assert_eq!(
            err,
            ClientError::Status {
                url: "/api/v1/remotes".to_string(),
                status: 400,
                message: "The name cannot be empty.".to_string(),
            }
        );
    }

    #[test]
    fn should_fall_back_to_status_code_when_body_is_not_json() {
        let err = ClientError::from_status("/x", 502, "<html>bad gateway</html>");
        assert_eq!(err.to_string(), "/x answered HTTP 502: HTTP 502");
    }

    #[test]
    fn should_parse_empty_body_as_null() {
        assert_eq!(parse_body("/x", "  ").unwrap(), serde_json::Value::Null);
    }

    #[test]
    fn should_report_parse_error_for_invalid_json() {
        let err = parse_body("/x", "not json").unwrap_err();
        assert!(matches!(err, ClientError::Parse { .. }));
        assert_eq!(err.url(), "/x");
    }

    #[test]
    fn should_display_method_in_uppercase() {
        assert_eq!(Method::Patch.to_string(), "PATCH");
    }
}
