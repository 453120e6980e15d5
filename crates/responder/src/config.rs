//! Responder configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Naming, tagging and limit settings for a response pass.
///
/// # Example
///
/// ```rust
/// use bulwark_responder::ResponderConfig;
///
/// let config = ResponderConfig {
///     secret_prefix: "ir/rotated".into(),
///     ..Default::default()
/// };
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponderConfig {
    /// Isolation groups are named `{prefix}-{instance_id}`.
    pub isolation_group_prefix: String,

    /// Rotated keys are stored under `{prefix}/{user}/{new_key_id}`.
    pub secret_prefix: String,

    /// Value of the `CreatedBy` tag on created isolation groups.
    pub provenance_marker: String,

    /// Concurrent access keys a user may hold.
    ///
    /// When a user is at this limit after deactivation, the oldest inactive
    /// key is deleted to make room for the replacement.
    pub max_access_keys: usize,
}

impl Default for ResponderConfig {
    fn default() -> Self {
        Self {
            isolation_group_prefix: "isolation".to_string(),
            secret_prefix: "incident-response".to_string(),
            provenance_marker: "SecurityIncidentResponse".to_string(),
            max_access_keys: 2,
        }
    }
}

impl ResponderConfig {
    /// Characters AWS rejects in group and secret names.
    const INVALID_NAME_CHARS: [char; 10] = ['<', '>', '{', '}', '[', ']', '|', '\\', '^', '`'];

    /// Check the configuration before wiring a responder.
    pub fn validate(&self) -> Result<(), ConfigError> {
        Self::validate_name("isolation_group_prefix", &self.isolation_group_prefix)?;
        Self::validate_name("secret_prefix", &self.secret_prefix)?;

        if self.secret_prefix.len() > 256 {
            return Err(ConfigError::InvalidValue {
                field: "secret_prefix",
                reason: format!("exceeds 256 character limit ({})", self.secret_prefix.len()),
            });
        }

        if self.provenance_marker.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "provenance_marker",
                reason: "must not be empty".into(),
            });
        }

        if self.max_access_keys == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_access_keys",
                reason: "must be at least 1".into(),
            });
        }

        Ok(())
    }

    fn validate_name(field: &'static str, value: &str) -> Result<(), ConfigError> {
        if value.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field,
                reason: "must not be empty".into(),
            });
        }
        if value
            .chars()
            .any(|c| c.is_whitespace() || Self::INVALID_NAME_CHARS.contains(&c))
        {
            return Err(ConfigError::InvalidValue {
                field,
                reason: "contains whitespace or characters AWS rejects (<, >, {, }, [, ], |, \\, ^, `)"
                    .into(),
            });
        }
        Ok(())
    }
}
