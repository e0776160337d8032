//! Application services — the page controllers.
//!
//! Each controller owns a [`GatewayApi`](crate::gateway::GatewayApi) over a
//! generic transport (constructor injection), keeping this layer decoupled
//! from concrete HTTP libraries.

pub mod network_config;
pub mod remote_list;
