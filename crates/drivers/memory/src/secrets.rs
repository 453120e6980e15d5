//! [`SecretStore`] over the in-memory account.

use async_trait::async_trait;
use bulwark_ports::{PortsError, PortsResult, SecretSpec, SecretStore};
use secrecy::{ExposeSecret, SecretString};

use crate::operation::{Call, Operation};
use crate::state::{SecretRecord, StoredSecret};
use crate::{ACCOUNT_ID, MemoryAccount, REGION};

#[async_trait]
impl SecretStore for MemoryAccount {
    async fn create_secret(&self, spec: &SecretSpec) -> PortsResult<String> {
        let mut state = self.state.lock();
        state.admit(Call::new(Operation::CreateSecret, spec.name.as_str()))?;

        if state.secrets.iter().any(|s| s.record.name == spec.name) {
            return Err(PortsError::service(
                "secretsmanager",
                "CreateSecret",
                format!("ResourceExistsException: secret {} already exists", spec.name),
            ));
        }

        let suffix = state.next("secret");
        let arn = format!(
            "arn:aws:secretsmanager:{REGION}:{ACCOUNT_ID}:secret:{}-{suffix:06}",
            spec.name
        );
        state.secrets.push(StoredSecret {
            record: SecretRecord {
                name: spec.name.clone(),
                arn: arn.clone(),
                description: spec.description.clone(),
                tags: spec.tags.clone(),
            },
            value: SecretString::from(spec.secret_string.expose_secret().to_owned()),
        });
        Ok(arn)
    }
}
