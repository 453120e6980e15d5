//! IAM driver for [`IdentityApi`].

use async_trait::async_trait;
use aws_sdk_iam::Client;
use aws_sdk_iam::types::StatusType;
use bulwark_ports::{AccessKeyMetadata, IdentityApi, IssuedAccessKey, PortsError, PortsResult};
use chrono::Utc;
use secrecy::SecretString;

use crate::convert::{key_status, to_utc};
use crate::error::service_error;

const SERVICE: &str = "iam";

/// [`IdentityApi`] over the IAM control plane.
#[derive(Debug, Clone)]
pub struct IamIdentityApi {
    client: Client,
}

impl IamIdentityApi {
    /// Wrap an IAM client.
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl IdentityApi for IamIdentityApi {
    #[tracing::instrument(skip(self))]
    async fn deactivate_access_key(&self, user_name: &str, access_key_id: &str) -> PortsResult<()> {
        self.client
            .update_access_key()
            .user_name(user_name)
            .access_key_id(access_key_id)
            .status(StatusType::Inactive)
            .send()
            .await
            .map_err(|e| service_error(SERVICE, "UpdateAccessKey", e))?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn list_access_keys(&self, user_name: &str) -> PortsResult<Vec<AccessKeyMetadata>> {
        let output = self
            .client
            .list_access_keys()
            .user_name(user_name)
            .send()
            .await
            .map_err(|e| service_error(SERVICE, "ListAccessKeys", e))?;

        output
            .access_key_metadata()
            .iter()
            .map(|key| {
                let access_key_id = key
                    .access_key_id()
                    .ok_or_else(|| PortsError::missing_field("ListAccessKeys", "AccessKeyId"))?;
                let status = key
                    .status()
                    .ok_or_else(|| PortsError::missing_field("ListAccessKeys", "Status"))?;
                let created_at = key
                    .create_date()
                    .and_then(to_utc)
                    .ok_or_else(|| PortsError::missing_field("ListAccessKeys", "CreateDate"))?;
                Ok(AccessKeyMetadata {
                    access_key_id: access_key_id.to_owned(),
                    status: key_status(status),
                    created_at,
                })
            })
            .collect()
    }

    #[tracing::instrument(skip(self))]
    async fn delete_access_key(&self, user_name: &str, access_key_id: &str) -> PortsResult<()> {
        self.client
            .delete_access_key()
            .user_name(user_name)
            .access_key_id(access_key_id)
            .send()
            .await
            .map_err(|e| service_error(SERVICE, "DeleteAccessKey", e))?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn create_access_key(&self, user_name: &str) -> PortsResult<IssuedAccessKey> {
        let output = self
            .client
            .create_access_key()
            .user_name(user_name)
            .send()
            .await
            .map_err(|e| service_error(SERVICE, "CreateAccessKey", e))?;

        let key = output
            .access_key()
            .ok_or_else(|| PortsError::missing_field("CreateAccessKey", "AccessKey"))?;

        Ok(IssuedAccessKey {
            user_name: key.user_name().to_owned(),
            access_key_id: key.access_key_id().to_owned(),
            secret_access_key: SecretString::from(key.secret_access_key().to_owned()),
            created_at: key.create_date().and_then(to_utc).unwrap_or_else(Utc::now),
        })
    }
}
