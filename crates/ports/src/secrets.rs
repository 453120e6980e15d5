//! Secret storage port.

use async_trait::async_trait;
use secrecy::SecretString;

use crate::PortsResult;
use crate::tag::ResourceTag;

/// Parameters for a new named secret.
#[derive(Debug)]
pub struct SecretSpec {
    /// Secret name; must not already exist.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// Secret payload, usually a JSON document.
    pub secret_string: SecretString,
    /// Tags applied at creation.
    pub tags: Vec<ResourceTag>,
}

/// Secret storage interface.
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Create a new secret. Returns its ARN.
    async fn create_secret(&self, spec: &SecretSpec) -> PortsResult<String>;
}
