//! Credential rotation stage.
//!
//! For each valid (user, key) pair:
//! 1. deactivate (not delete) the flagged key
//! 2. if the user is at the key limit, delete the oldest inactive key
//! 3. issue a new key
//! 4. store the new key's material in the secret store
//!
//! A user at the limit with no inactive key gets no deletion; issuance then
//! fails at the platform and the item is reported as failed.
//!
//! Pruning runs after deactivation, so the flagged key is itself a
//! candidate. When it is the oldest inactive key (for example a user whose
//! two keys were both active) it is the one deleted, and only the audit
//! trail in the logs and the response records it.

use std::sync::Arc;

use bulwark_ports::{
    AccessKeyMetadata, AccessKeyStatus, IdentityApi, IssuedAccessKey, ResourceTag, SecretSpec,
    SecretStore,
};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use crate::config::ResponderConfig;
use crate::error::ResponseError;
use crate::report::{CredentialRotationResult, FailureIndicator, RotationOutcome};
use crate::request::{CompromisedUser, CredentialTarget};
use crate::tags;

/// Secret payload layout read by downstream tooling.
#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct RotatedKeyPayload<'a> {
    access_key_id: &'a str,
    secret_access_key: &'a str,
    user_name: &'a str,
    rotated_at: String,
    incident_id: &'a str,
}

/// Pick the key to delete when a user is at the key limit.
///
/// Returns the inactive key with the earliest creation time; on equal
/// times the one listed first wins. Active keys are never selected.
#[must_use]
pub fn oldest_inactive(keys: &[AccessKeyMetadata]) -> Option<&AccessKeyMetadata> {
    keys.iter()
        .filter(|key| key.status == AccessKeyStatus::Inactive)
        .min_by_key(|key| key.created_at)
}

/// Deactivates compromised keys and issues stored replacements.
pub struct CredentialRotator {
    identity: Arc<dyn IdentityApi>,
    secrets: Arc<dyn SecretStore>,
    config: Arc<ResponderConfig>,
}

impl CredentialRotator {
    /// Create a rotator over the identity and secret-store ports.
    pub fn new(
        identity: Arc<dyn IdentityApi>,
        secrets: Arc<dyn SecretStore>,
        config: Arc<ResponderConfig>,
    ) -> Self {
        Self {
            identity,
            secrets,
            config,
        }
    }

    /// Rotate one compromised credential and report the outcome.
    ///
    /// Never fails: errors are logged and folded into a `failed` result.
    #[tracing::instrument(
        skip(self, entry),
        fields(incident_id = %incident_id, iam_user = %entry.user_label().unwrap_or_default())
    )]
    pub async fn rotate(
        &self,
        incident_id: &str,
        entry: &CompromisedUser,
    ) -> CredentialRotationResult {
        let result = match entry.validate() {
            Ok(target) => self.try_rotate(incident_id, &target).await,
            Err(err) => Err(err),
        };

        match result {
            Ok(outcome) => {
                tracing::info!("Key rotated");
                CredentialRotationResult {
                    iam_user: entry.user_label(),
                    outcome,
                }
            }
            Err(err) => {
                err.log("Failed to rotate key");
                CredentialRotationResult::failed(
                    entry.user_label(),
                    FailureIndicator::for_rotation(&err),
                )
            }
        }
    }

    async fn try_rotate(
        &self,
        incident_id: &str,
        target: &CredentialTarget,
    ) -> Result<RotationOutcome, ResponseError> {
        let user = target.user.as_str();
        let flagged = target.access_key_id.as_str();

        self.identity.deactivate_access_key(user, flagged).await?;
        tracing::debug!(access_key_id = %flagged, "Deactivated flagged key");

        let keys = self.identity.list_access_keys(user).await?;
        let mut deleted_keys = Vec::new();
        if keys.len() >= self.config.max_access_keys {
            match oldest_inactive(&keys) {
                Some(oldest) => {
                    self.identity
                        .delete_access_key(user, &oldest.access_key_id)
                        .await?;
                    tracing::debug!(access_key_id = %oldest.access_key_id, "Pruned oldest inactive key");
                    deleted_keys.push(oldest.access_key_id.clone());
                }
                None => tracing::warn!(
                    held = keys.len(),
                    limit = self.config.max_access_keys,
                    "User at key limit with no inactive key to prune"
                ),
            }
        }

        let issued = self.identity.create_access_key(user).await?;
        let secret_arn = match self.store_key(incident_id, &issued).await {
            Ok(arn) => arn,
            Err(err) => {
                tracing::warn!(
                    new_key_id = %issued.access_key_id,
                    "Issued key was not recorded in the secret store"
                );
                return Err(err);
            }
        };

        Ok(RotationOutcome::Success {
            deactivated_key: flagged.to_owned(),
            deleted_keys,
            new_key_id: issued.access_key_id,
            secret_arn,
        })
    }

    async fn store_key(
        &self,
        incident_id: &str,
        issued: &IssuedAccessKey,
    ) -> Result<String, ResponseError> {
        let user = issued.user_name.as_str();
        let payload = RotatedKeyPayload {
            access_key_id: &issued.access_key_id,
            secret_access_key: issued.secret_access_key.expose_secret(),
            user_name: user,
            rotated_at: tags::timestamp(issued.created_at),
            incident_id,
        };

        let mut secret_tags = tags::incident(incident_id);
        secret_tags.push(ResourceTag::new(tags::IAM_USER, user));

        let spec = SecretSpec {
            name: format!(
                "{}/{}/{}",
                self.config.secret_prefix, user, issued.access_key_id
            ),
            description: format!("Rotated key for {user} - incident {incident_id}"),
            secret_string: SecretString::from(serde_json::to_string(&payload)?),
            tags: secret_tags,
        };

        Ok(self.secrets.create_secret(&spec).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn key(id: &str, status: AccessKeyStatus, age_days: i64) -> AccessKeyMetadata {
        let now = Utc.with_ymd_and_hms(2026, 10, 16, 0, 0, 0).unwrap();
        AccessKeyMetadata {
            access_key_id: id.to_string(),
            status,
            created_at: now - Duration::days(age_days),
        }
    }

    #[test]
    fn picks_oldest_inactive_key() {
        let keys = vec![
            key("AKIANEWER", AccessKeyStatus::Inactive, 10),
            key("AKIAOLDEST", AccessKeyStatus::Inactive, 300),
            key("AKIAACTIVE", AccessKeyStatus::Active, 900),
        ];
        assert_eq!(
            oldest_inactive(&keys).map(|k| k.access_key_id.as_str()),
            Some("AKIAOLDEST")
        );
    }

    #[test]
    fn ignores_active_keys() {
        let keys = vec![
            key("AKIAONE", AccessKeyStatus::Active, 30),
            key("AKIATWO", AccessKeyStatus::Active, 60),
        ];
        assert!(oldest_inactive(&keys).is_none());
    }

    #[test]
    fn ties_resolve_to_first_listed() {
        let keys = vec![
            key("AKIAFIRST", AccessKeyStatus::Inactive, 5),
            key("AKIASECOND", AccessKeyStatus::Inactive, 5),
        ];
        assert_eq!(oldest_inactive(&keys).unwrap().access_key_id, "AKIAFIRST");
    }

    #[test]
    fn payload_uses_pascal_case_keys() {
        let payload = RotatedKeyPayload {
            access_key_id: "AKIANEW",
            secret_access_key: "s3cr3t",
            user_name: "alice",
            rotated_at: "2026-10-16T00:00:00.000000Z".into(),
            incident_id: "run-1",
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "AccessKeyId": "AKIANEW",
                "SecretAccessKey": "s3cr3t",
                "UserName": "alice",
                "RotatedAt": "2026-10-16T00:00:00.000000Z",
                "IncidentId": "run-1"
            })
        );
    }
}
