//! Endpoint resolution — maps REST resources to URLs under `/api/v1`.
//!
//! No parameter validation happens here: a bad id yields a URL the gateway
//! rejects.

use std::fmt;

use crate::id::RemoteId;

/// Path prefix of every gateway resource.
pub const API_PREFIX: &str = "api/v1";

/// A REST resource exposed by the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Remotes,
    Remote(RemoteId),
    RemoteAction(RemoteId),
    WifiNetworks,
    WifiConfig,
    MqttConfig,
    SystemInfos,
    SystemRestart,
}

impl Resource {
    /// Path relative to [`API_PREFIX`].
    #[must_use]
    pub fn path(self) -> String {
        match self {
            Self::Remotes => "remotes".to_string(),
            Self::Remote(id) => format!("remotes/{id}"),
            Self::RemoteAction(id) => format!("remotes/{id}/action"),
            Self::WifiNetworks => "wifi/networks".to_string(),
            Self::WifiConfig => "wifi/config".to_string(),
            Self::MqttConfig => "mqtt/config".to_string(),
            Self::SystemInfos => "system/infos".to_string(),
            Self::SystemRestart => "system/restart".to_string(),
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Builds absolute endpoint URLs from a base URL.
///
/// The base is either a relative root (`/`, same-origin in a browser) or an
/// absolute URL such as `http://192.168.4.1/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointResolver {
    base: String,
}

impl Default for EndpointResolver {
    fn default() -> Self {
        Self::new("/")
    }
}

impl EndpointResolver {
    #[must_use]
    pub fn new(base: impl Into<String>) -> Self {
        let mut base = base.into();
        while base.ends_with('/') {
            base.pop();
        }
        base.push('/');
        Self { base }
    }

    /// The normalised base, always ending with exactly one `/`.
    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    #[must_use]
    pub fn resolve(&self, resource: Resource) -> String {
        format!("{}{API_PREFIX}/{}", self.base, resource.path())
    }
}
