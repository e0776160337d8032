//! Remote — a paired RTS transmitter identity managed by the gateway.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{SomfyError, ValidationError};
use crate::id::RemoteId;

/// Maximum number of characters in a remote name.
pub const MAX_REMOTE_NAME_LENGTH: usize = 15;

/// RTS rolling code: the frame counter used for replay protection.
///
/// The authoritative value lives on the gateway; clients only mirror it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RollingCode(u32);

impl RollingCode {
    pub const ZERO: Self = Self(0);

    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// The code the next transmitted frame will carry.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl fmt::Display for RollingCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A remote as reported by the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Remote {
    pub id: RemoteId,
    pub name: String,
    pub rolling_code: RollingCode,
}

impl Remote {
    #[must_use]
    pub fn new(id: RemoteId, name: impl Into<String>, rolling_code: RollingCode) -> Self {
        Self {
            id,
            name: name.into(),
            rolling_code,
        }
    }

    /// Check the invariants the gateway enforces on creation.
    ///
    /// # Errors
    ///
    /// Returns [`SomfyError::Validation`] when `name` is empty or longer than
    /// [`MAX_REMOTE_NAME_LENGTH`] characters.
    pub fn validate(&self) -> Result<(), SomfyError> {
        validate_name(&self.name)?;
        Ok(())
    }
}

/// Normalise a user-typed name the way the remote list does before sending.
///
/// Leading and trailing whitespace is stripped, then the result is cut to
/// [`MAX_REMOTE_NAME_LENGTH`] characters. Inner whitespace is kept and an
/// empty result is allowed.
#[must_use]
pub fn sanitize_name(raw: &str) -> String {
    raw.trim().chars().take(MAX_REMOTE_NAME_LENGTH).collect()
}

/// Check a name against the gateway rules.
///
/// # Errors
///
/// Returns [`ValidationError::EmptyName`] or [`ValidationError::NameTooLong`].
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if name.chars().count() > MAX_REMOTE_NAME_LENGTH {
        return Err(ValidationError::NameTooLong {
            max: MAX_REMOTE_NAME_LENGTH,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_trim_and_truncate_long_name() {
        assert_eq!(sanitize_name("  My Blind Name Is Long  "), "My Blind Name I");
    }

    #[test]
    fn should_keep_inner_whitespace() {
        assert_eq!(sanitize_name(" Living  room "), "Living  room");
    }

    #[test]
    fn should_allow_empty_name_after_sanitize() {
        assert_eq!(sanitize_name("   "), "");
    }

    #[test]
    fn should_count_characters_not_bytes() {
        let name = sanitize_name("ééééééééééééééééé");
        assert_eq!(name.chars().count(), MAX_REMOTE_NAME_LENGTH);
    }

    #[test]
    fn should_reject_empty_name() {
        assert_eq!(validate_name(""), Err(ValidationError::EmptyName));
    }

    #[test]
    fn should_reject_name_over_limit() {
        assert_eq!(
            validate_name("0123456789abcdef"),
            Err(ValidationError::NameTooLong { max: 15 })
        );
    }

    #[test]
    fn should_wrap_rolling_code_at_max() {
        assert_eq!(RollingCode::new(u32::MAX).next(), RollingCode::ZERO);
    }

    #[test]
    fn should_deserialize_gateway_payload() {
        let json = r#"{"id":3,"name":"Kitchen","rolling_code":12}"#;
        let remote: Remote = serde_json::from_str(json).unwrap();
        assert_eq!(remote.id, RemoteId::new(3));
        assert_eq!(remote.name, "Kitchen");
        assert_eq!(remote.rolling_code, RollingCode::new(12));
    }

    #[test]
    fn should_fail_validation_when_remote_name_empty() {
        let remote = Remote::new(RemoteId::new(1), "", RollingCode::ZERO);
        assert!(matches!(
            remote.validate(),
            Err(SomfyError::Validation(ValidationError::EmptyName))
        ));
    }
}
