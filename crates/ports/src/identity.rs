//! Identity control-plane port.
//!
//! Access key lifecycle operations for a single IAM user.

use std::fmt;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use crate::PortsResult;

/// Activation state of an access key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccessKeyStatus {
    /// Key can sign requests.
    Active,
    /// Key is disabled but still present.
    Inactive,
}

impl AccessKeyStatus {
    /// Wire name used by the identity API.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
        }
    }
}

impl fmt::Display for AccessKeyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata for an access key held by a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessKeyMetadata {
    /// Access key id.
    pub access_key_id: String,
    /// Current status.
    pub status: AccessKeyStatus,
    /// When the key was created.
    pub created_at: DateTime<Utc>,
}

/// A freshly issued access key.
///
/// The secret half is only ever exposed to the secret store.
#[derive(Debug)]
pub struct IssuedAccessKey {
    /// Owning user.
    pub user_name: String,
    /// New access key id.
    pub access_key_id: String,
    /// Secret access key.
    pub secret_access_key: SecretString,
    /// Issuance time reported by the identity API.
    pub created_at: DateTime<Utc>,
}

/// Identity control-plane interface.
#[async_trait]
pub trait IdentityApi: Send + Sync {
    /// Set a key to `Inactive` without deleting it.
    async fn deactivate_access_key(&self, user_name: &str, access_key_id: &str) -> PortsResult<()>;

    /// List every access key the user holds.
    async fn list_access_keys(&self, user_name: &str) -> PortsResult<Vec<AccessKeyMetadata>>;

    /// Permanently delete a key.
    async fn delete_access_key(&self, user_name: &str, access_key_id: &str) -> PortsResult<()>;

    /// Issue a new key for the user.
    async fn create_access_key(&self, user_name: &str) -> PortsResult<IssuedAccessKey>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_wire_names() {
        assert_eq!(AccessKeyStatus::Active.to_string(), "Active");
        assert_eq!(AccessKeyStatus::Inactive.as_str(), "Inactive");
    }

    #[test]
    fn issued_key_debug_redacts_secret() {
        let key = IssuedAccessKey {
            user_name: "alice".into(),
            access_key_id: "AKIANEW".into(),
            secret_access_key: SecretString::from("super-secret".to_string()),
            created_at: Utc::now(),
        };
        let rendered = format!("{key:?}");
        assert!(rendered.contains("AKIANEW"));
        assert!(!rendered.contains("super-secret"));
    }
}
