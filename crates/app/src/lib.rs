//! # somfyctl-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define the **port trait** that transports must implement:
//!   - `HttpTransport` — one-shot GET and form-encoded sends returning JSON
//! - Provide a typed **gateway API** on top of the port, one method per
//!   REST resource
//! - Hold the client-side **model** (remote list, configuration forms) with
//!   optimistic changes and explicit rollback
//! - Provide the **controllers** driven by UI events:
//!   - `RemoteListController` — load, action, rename, settings, create
//!   - `NetworkConfigController` — networks, Wi-Fi, MQTT, system
//!
//! ## Dependency rule
//! Depends on `somfyctl-domain` only. Never imports adapter crates. The
//! reqwest transport and the browser dashboard depend on *this* crate, not
//! the reverse. Port futures carry no `Send` bound so the same traits work
//! on the single-threaded browser event loop.

pub mod gateway;
pub mod model;
pub mod ports;
pub mod services;
pub mod ui_event;
