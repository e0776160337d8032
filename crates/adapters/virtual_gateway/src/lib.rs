//! # somfyctl-adapter-virtual-gateway
//!
//! In-memory gateway built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the gateway **REST API** under `/api/v1` with form-encoded
//!   request bodies and JSON responses
//! - Enforce the device rules: name length, remote capacity, known
//!   actions, rolling code bookkeeping, Wi-Fi and MQTT validation
//! - Report failures as `{"error": "..."}` with a 4xx status
//!
//! Used by `somfyctl serve-virtual` for demos and by the end-to-end tests.
//! Nothing is transmitted and nothing is persisted.
//!
//! ## Dependency rule
//! Depends on `somfyctl-domain` only. Never leaks axum types into the domain.

pub mod api;
pub mod device;
pub mod error;
pub mod router;
pub mod state;

pub use device::VirtualGateway;
pub use state::AppState;
