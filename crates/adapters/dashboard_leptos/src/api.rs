//! Browser transport — the [`HttpTransport`] port over `fetch`.
//!
//! The dashboard is served by the gateway itself, so every call goes to the
//! page origin.

use std::future::Future;

use gloo_net::http::{Method as FetchMethod, Request, RequestBuilder, Response};
use somfyctl_app::gateway::GatewayApi;
use somfyctl_app::ports::transport::parse_body;
use somfyctl_app::ports::{ClientError, FormPayload, HttpTransport, Method};
use somfyctl_domain::endpoint::EndpointResolver;

/// [`HttpTransport`] backed by `gloo-net`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchTransport;

impl HttpTransport for FetchTransport {
    fn get(&self, url: &str) -> impl Future<Output = Result<serde_json::Value, ClientError>> {
        let url = url.to_string();
        async move {
            let response = Request::get(&url)
                .send()
                .await
                .map_err(|err| transport_error(&url, &err))?;
            check_response(&url, response).await
        }
    }

    fn send(
        &self,
        url: &str,
        method: Method,
        payload: &FormPayload,
    ) -> impl Future<Output = Result<serde_json::Value, ClientError>> {
        let url = url.to_string();
        let body = payload.encode();
        async move {
            let request = RequestBuilder::new(&url)
                .method(fetch_method(method))
                .header("Content-Type", FormPayload::CONTENT_TYPE)
                .body(body)
                .map_err(|err| transport_error(&url, &err))?;
            let response = request
                .send()
                .await
                .map_err(|err| transport_error(&url, &err))?;
            check_response(&url, response).await
        }
    }
}

/// Gateway API resolved against the page origin.
#[must_use]
pub fn gateway() -> GatewayApi<FetchTransport> {
    GatewayApi::new(FetchTransport, EndpointResolver::default())
}

async fn check_response(url: &str, response: Response) -> Result<serde_json::Value, ClientError> {
    let body = response
        .text()
        .await
        .map_err(|err| transport_error(url, &err))?;
    if !response.ok() {
        return Err(ClientError::from_status(url, response.status(), &body));
    }
    parse_body(url, &body)
}

fn fetch_method(method: Method) -> FetchMethod {
    match method {
        Method::Get => FetchMethod::GET,
        Method::Post => FetchMethod::POST,
        Method::Patch => FetchMethod::PATCH,
        Method::Delete => FetchMethod::DELETE,
    }
}

fn transport_error(url: &str, err: &gloo_net::Error) -> ClientError {
    ClientError::Transport {
        url: url.to_string(),
        message: err.to_string(),
    }
}
