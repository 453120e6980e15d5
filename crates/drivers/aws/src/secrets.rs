//! Secrets Manager driver for [`SecretStore`].

use async_trait::async_trait;
use aws_sdk_secretsmanager::Client;
use bulwark_ports::{PortsError, PortsResult, SecretSpec, SecretStore};
use secrecy::ExposeSecret;

use crate::convert::secrets_tags;
use crate::error::service_error;

/// [`SecretStore`] over AWS Secrets Manager.
#[derive(Debug, Clone)]
pub struct SecretsManagerStore {
    client: Client,
}

impl SecretsManagerStore {
    /// Wrap a Secrets Manager client.
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SecretStore for SecretsManagerStore {
    #[tracing::instrument(skip(self, spec), fields(name = %spec.name))]
    async fn create_secret(&self, spec: &SecretSpec) -> PortsResult<String> {
        let tags = secrets_tags(&spec.tags);
        let output = self
            .client
            .create_secret()
            .name(&spec.name)
            .description(&spec.description)
            .secret_string(spec.secret_string.expose_secret())
            .set_tags(if tags.is_empty() { None } else { Some(tags) })
            .send()
            .await
            .map_err(|e| service_error("secretsmanager", "CreateSecret", e))?;

        output
            .arn()
            .map(str::to_owned)
            .ok_or_else(|| PortsError::missing_field("CreateSecret", "ARN"))
    }
}
