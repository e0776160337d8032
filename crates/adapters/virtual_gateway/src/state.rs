//! Shared application state for axum handlers.

use std::sync::Arc;

use crate::device::VirtualGateway;

/// State shared across all handlers.
///
/// `Clone` only clones the `Arc`, so tests can keep a handle on the device
/// and inspect it after a request.
#[derive(Clone, Default)]
pub struct AppState {
    pub gateway: Arc<VirtualGateway>,
}

impl AppState {
    pub fn new(gateway: VirtualGateway) -> Self {
        Self {
            gateway: Arc::new(gateway),
        }
    }
}
