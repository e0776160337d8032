//! System infos reported by the gateway.

use serde::{Deserialize, Serialize};

/// Firmware version and network identity of the gateway.
///
/// Every field is optional: older firmware only reports a subset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemInfos {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mac_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_deserialize_partial_payload() {
        let infos: SystemInfos =
            serde_json::from_str(r#"{"version":"2.1.1","uptime":42}"#).unwrap();
        assert_eq!(infos.version.as_deref(), Some("2.1.1"));
        assert!(infos.mac_address.is_none());
        assert!(infos.ip_address.is_none());
    }
}
