//! # somfyctl-domain
//!
//! Pure domain model for driving a Somfy RTS gateway.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions
//! - Define **Remotes** (paired RTS transmitter identities with a rolling code)
//! - Define **Actions** (commands a remote can transmit: `up`, `stop`, `down`, …)
//! - Define **Networks**, **Wi-Fi** and **MQTT** settings of the gateway
//! - Define **System infos** reported by the gateway
//! - Resolve REST **endpoints** from a base URL
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;

pub mod action;
pub mod endpoint;
pub mod mqtt;
pub mod network;
pub mod remote;
pub mod system;
