//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts via `#[from]`.

/// Top-level domain error.
#[derive(Debug, thiserror::Error)]
pub enum SomfyError {
    #[error("validation error")]
    Validation(#[from] ValidationError),

    #[error("not found")]
    NotFound(#[from] NotFoundError),

    #[error("capacity exceeded")]
    Capacity(#[from] CapacityError),
}

/// A domain invariant was violated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("the name cannot be empty")]
    EmptyName,

    #[error("the name is too long, it can contain only {max} chars")]
    NameTooLong { max: usize },

    #[error("the action '{0}' is not valid, allowed actions: up, down, stop, pair, reset")]
    UnknownAction(String),

    #[error("the ssid cannot be empty")]
    EmptySsid,

    #[error("the port cannot be equal to 0")]
    ZeroPort,

    #[error("invalid identifier '{0}'")]
    InvalidId(String),

    #[error("the {0} should be specified")]
    MissingField(&'static str),
}

/// A lookup by identifier returned nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} '{id}' doesn't exist")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}

/// The gateway has no room left for another record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("no space left on the device for a new {entity} (max {max})")]
pub struct CapacityError {
    pub entity: &'static str,
    pub max: usize,
}
