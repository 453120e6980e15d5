#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! # Bulwark Memory Driver
//!
//! In-memory cloud account implementing every port in `bulwark-ports`:
//! [`ComputeApi`], [`IdentityApi`], [`SecretStore`] and
//! [`NotificationPublisher`].
//!
//! The account is seeded with instances and access keys, records every
//! call it receives and can be armed to fail chosen operations. Ids are
//! deterministic (`sg-00000001`, `snap-00000001`, ...) so tests can assert
//! on exact values.
//!
//! # Examples
//!
//! ```rust,no_run
//! use bulwark_driver_memory::{MemoryAccount, Operation};
//! use bulwark_ports::ComputeApi;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let account = MemoryAccount::new()
//!     .with_instance("i-0123456789abcdef0", "vpc-1", &["vol-1", "vol-2"]);
//! account.fail_on(Operation::CreateSnapshot, "vol-2");
//!
//! let vpc = account.instance_vpc("i-0123456789abcdef0").await?;
//! assert_eq!(vpc, "vpc-1");
//! # Ok(())
//! # }
//! ```
//!
//! [`ComputeApi`]: bulwark_ports::ComputeApi
//! [`IdentityApi`]: bulwark_ports::IdentityApi
//! [`SecretStore`]: bulwark_ports::SecretStore
//! [`NotificationPublisher`]: bulwark_ports::NotificationPublisher

mod compute;
mod identity;
mod notify;
pub mod operation;
mod secrets;
pub mod state;

use bulwark_ports::{AccessKeyMetadata, AccessKeyStatus};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use secrecy::ExposeSecret;

pub use operation::{Call, Operation};
pub use state::{InstanceRecord, Publication, SecretRecord, SecurityGroupRecord, SnapshotRecord};

use operation::InjectedFailure;
use state::State;

/// Default security group every seeded instance starts in.
pub const DEFAULT_GROUP: &str = "sg-default";

/// Account region used in generated ARNs.
const REGION: &str = "us-east-1";
/// Account id used in generated ARNs.
const ACCOUNT_ID: &str = "000000000000";

/// A simulated cloud account.
///
/// All state lives behind one lock that is never held across an await.
pub struct MemoryAccount {
    state: Mutex<State>,
    key_limit: usize,
}

impl Default for MemoryAccount {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryAccount {
    /// Access keys a user may hold at once, as on the real platform.
    pub const DEFAULT_KEY_LIMIT: usize = 2;

    /// Create an empty account.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State::default()),
            key_limit: Self::DEFAULT_KEY_LIMIT,
        }
    }

    /// Seed an instance in `vpc_id` with the given attached volumes.
    ///
    /// The instance starts in [`DEFAULT_GROUP`], unprotected and untagged.
    #[must_use]
    pub fn with_instance(self, instance_id: &str, vpc_id: &str, volumes: &[&str]) -> Self {
        self.state.lock().instances.insert(
            instance_id.to_owned(),
            InstanceRecord {
                instance_id: instance_id.to_owned(),
                vpc_id: vpc_id.to_owned(),
                security_groups: vec![DEFAULT_GROUP.to_owned()],
                termination_protection: false,
                volumes: volumes.iter().map(|v| (*v).to_owned()).collect(),
                tags: Vec::new(),
            },
        );
        self
    }

    /// Seed a user with no keys.
    #[must_use]
    pub fn with_user(self, user_name: &str) -> Self {
        self.state
            .lock()
            .users
            .entry(user_name.to_owned())
            .or_default();
        self
    }

    /// Seed an access key, creating the user if needed.
    #[must_use]
    pub fn with_access_key(
        self,
        user_name: &str,
        access_key_id: &str,
        status: AccessKeyStatus,
        created_at: DateTime<Utc>,
    ) -> Self {
        self.state
            .lock()
            .add_key(user_name, access_key_id.to_owned(), status, created_at);
        self
    }

    /// Override the per-user key limit enforced by `CreateAccessKey`.
    #[must_use]
    pub fn with_key_limit(mut self, limit: usize) -> Self {
        self.key_limit = limit;
        self
    }

    /// Fail every subsequent call to `operation`.
    pub fn fail(&self, operation: Operation) {
        self.state.lock().failures.push(InjectedFailure {
            operation,
            target: None,
        });
    }

    /// Fail subsequent calls to `operation` that address `target`.
    pub fn fail_on(&self, operation: Operation, target: &str) {
        self.state.lock().failures.push(InjectedFailure {
            operation,
            target: Some(target.to_owned()),
        });
    }

    /// Disarm all injected failures.
    pub fn clear_failures(&self) {
        self.state.lock().failures.clear();
    }

    /// Every call received so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().calls.clone()
    }

    /// Calls that changed (or attempted to change) account state.
    #[must_use]
    pub fn mutating_calls(&self) -> Vec<Call> {
        self.state
            .lock()
            .calls
            .iter()
            .filter(|call| call.operation.is_mutating())
            .cloned()
            .collect()
    }

    /// Calls to one operation.
    #[must_use]
    pub fn calls_to(&self, operation: Operation) -> Vec<Call> {
        self.state
            .lock()
            .calls
            .iter()
            .filter(|call| call.operation == operation)
            .cloned()
            .collect()
    }

    /// Current state of an instance.
    #[must_use]
    pub fn instance(&self, instance_id: &str) -> Option<InstanceRecord> {
        self.state.lock().instances.get(instance_id).cloned()
    }

    /// Every security group ever created, ordered by id.
    #[must_use]
    pub fn security_groups(&self) -> Vec<SecurityGroupRecord> {
        self.state.lock().groups.values().cloned().collect()
    }

    /// Every snapshot requested, in order.
    #[must_use]
    pub fn snapshots(&self) -> Vec<SnapshotRecord> {
        self.state.lock().snapshots.clone()
    }

    /// Keys a user currently holds, or `None` for an unknown user.
    #[must_use]
    pub fn access_keys(&self, user_name: &str) -> Option<Vec<AccessKeyMetadata>> {
        self.state.lock().users.get(user_name).cloned()
    }

    /// Every stored secret, in creation order.
    #[must_use]
    pub fn secrets(&self) -> Vec<SecretRecord> {
        self.state
            .lock()
            .secrets
            .iter()
            .map(|s| s.record.clone())
            .collect()
    }

    /// Plaintext value of a stored secret.
    #[must_use]
    pub fn secret_value(&self, name: &str) -> Option<String> {
        self.state
            .lock()
            .secrets
            .iter()
            .find(|s| s.record.name == name)
            .map(|s| s.value.expose_secret().to_owned())
    }

    /// Every published notification, in order.
    #[must_use]
    pub fn publications(&self) -> Vec<Publication> {
        self.state.lock().publications.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use pretty_assertions::assert_eq;

    #[test]
    fn seeded_instance_starts_in_default_group() {
        let account = MemoryAccount::new().with_instance("i-1", "vpc-1", &["vol-1"]);
        let instance = account.instance("i-1").unwrap();
        assert_eq!(instance.security_groups, vec![DEFAULT_GROUP.to_string()]);
        assert!(!instance.termination_protection);
        assert_eq!(instance.volumes, vec!["vol-1".to_string()]);
    }

    #[test]
    fn seeded_keys_keep_order() {
        let now = Utc::now();
        let account = MemoryAccount::new()
            .with_access_key("alice", "AKIAOLD", AccessKeyStatus::Inactive, now - Duration::days(90))
            .with_access_key("alice", "AKIANEW", AccessKeyStatus::Active, now);
        let ids: Vec<_> = account
            .access_keys("alice")
            .unwrap()
            .into_iter()
            .map(|k| k.access_key_id)
            .collect();
        assert_eq!(ids, vec!["AKIAOLD", "AKIANEW"]);
        assert!(account.access_keys("bob").is_none());
    }

    #[test]
    fn fresh_account_has_no_calls() {
        let account = MemoryAccount::new().with_user("carol");
        assert!(account.calls().is_empty());
        assert_eq!(account.access_keys("carol"), Some(Vec::new()));
    }
}
