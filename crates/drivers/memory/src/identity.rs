//! [`IdentityApi`] over the in-memory account.

use async_trait::async_trait;
use bulwark_ports::{
    AccessKeyMetadata, AccessKeyStatus, IdentityApi, IssuedAccessKey, PortsError, PortsResult,
};
use chrono::Utc;
use secrecy::SecretString;

use crate::MemoryAccount;
use crate::operation::{Call, Operation};

#[async_trait]
impl IdentityApi for MemoryAccount {
    async fn deactivate_access_key(&self, user_name: &str, access_key_id: &str) -> PortsResult<()> {
        let mut state = self.state.lock();
        state.admit(Call::new(Operation::DeactivateAccessKey, user_name))?;

        let key = state
            .keys_mut(user_name)?
            .iter_mut()
            .find(|k| k.access_key_id == access_key_id)
            .ok_or_else(|| PortsError::not_found("AccessKey", access_key_id))?;
        key.status = AccessKeyStatus::Inactive;
        Ok(())
    }

    async fn list_access_keys(&self, user_name: &str) -> PortsResult<Vec<AccessKeyMetadata>> {
        let mut state = self.state.lock();
        state.admit(Call::new(Operation::ListAccessKeys, user_name))?;
        Ok(state.keys_mut(user_name)?.clone())
    }

    async fn delete_access_key(&self, user_name: &str, access_key_id: &str) -> PortsResult<()> {
        let mut state = self.state.lock();
        state.admit(Call::new(Operation::DeleteAccessKey, user_name))?;

        let keys = state.keys_mut(user_name)?;
        let before = keys.len();
        keys.retain(|k| k.access_key_id != access_key_id);
        if keys.len() == before {
            return Err(PortsError::not_found("AccessKey", access_key_id));
        }
        Ok(())
    }

    async fn create_access_key(&self, user_name: &str) -> PortsResult<IssuedAccessKey> {
        let mut state = self.state.lock();
        state.admit(Call::new(Operation::CreateAccessKey, user_name))?;

        let held = state.keys_mut(user_name)?.len();
        if held >= self.key_limit {
            return Err(PortsError::service(
                "iam",
                "CreateAccessKey",
                format!(
                    "LimitExceeded: cannot exceed quota for AccessKeysPerUser: {}",
                    self.key_limit
                ),
            ));
        }

        let n = state.next("key");
        let access_key_id = format!("AKIAMEMORY{n:010}");
        let created_at = Utc::now();
        state.add_key(
            user_name,
            access_key_id.clone(),
            AccessKeyStatus::Active,
            created_at,
        );

        Ok(IssuedAccessKey {
            user_name: user_name.to_owned(),
            access_key_id,
            secret_access_key: SecretString::from(format!("memory-secret-{n}")),
            created_at,
        })
    }
}
