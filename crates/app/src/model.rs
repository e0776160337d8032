//! Client-side model — the single source of truth between two fetches.
//!
//! Everything here is synchronous and IO-free so that a UI can mutate it
//! inside a reactive update and send the matching request afterwards.

pub mod forms;
pub mod remote_list;

pub use forms::{MqttForm, WifiForm};
pub use remote_list::{Change, FailurePolicy, PendingChange, RemoteList, Settlement};
