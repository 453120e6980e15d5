//! Account resources held by [`MemoryAccount`](crate::MemoryAccount).

use std::collections::{BTreeMap, HashMap};

use bulwark_ports::{AccessKeyMetadata, AccessKeyStatus, PortsError, ResourceTag};
use chrono::{DateTime, Utc};
use secrecy::SecretString;

use crate::operation::{Call, InjectedFailure};

/// A compute instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceRecord {
    /// Instance id.
    pub instance_id: String,
    /// Network the instance lives in.
    pub vpc_id: String,
    /// Current group membership.
    pub security_groups: Vec<String>,
    /// API termination disabled.
    pub termination_protection: bool,
    /// Attached volume ids.
    pub volumes: Vec<String>,
    /// Tags in application order; a later key overwrites an earlier one.
    pub tags: Vec<ResourceTag>,
}

/// A security group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecurityGroupRecord {
    /// Group id.
    pub group_id: String,
    /// Group name, unique per VPC.
    pub name: String,
    /// Description given at creation.
    pub description: String,
    /// Owning VPC.
    pub vpc_id: String,
    /// Whether the default allow-all egress rule is still present.
    pub egress_open: bool,
    /// Tags.
    pub tags: Vec<ResourceTag>,
}

/// A requested volume snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotRecord {
    /// Snapshot id.
    pub snapshot_id: String,
    /// Source volume.
    pub volume_id: String,
    /// Description given at creation.
    pub description: String,
    /// Tags.
    pub tags: Vec<ResourceTag>,
}

/// A stored secret, without its value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretRecord {
    /// Secret name.
    pub name: String,
    /// Secret ARN.
    pub arn: String,
    /// Description given at creation.
    pub description: String,
    /// Tags.
    pub tags: Vec<ResourceTag>,
}

/// A published notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Publication {
    /// Destination topic.
    pub topic_arn: String,
    /// Subject line.
    pub subject: String,
    /// Message body.
    pub message: String,
    /// Assigned message id.
    pub message_id: String,
}

#[derive(Debug)]
pub(crate) struct StoredSecret {
    pub(crate) record: SecretRecord,
    pub(crate) value: SecretString,
}

#[derive(Debug, Default)]
pub(crate) struct State {
    pub(crate) instances: BTreeMap<String, InstanceRecord>,
    pub(crate) groups: BTreeMap<String, SecurityGroupRecord>,
    pub(crate) snapshots: Vec<SnapshotRecord>,
    /// Keys per user in creation order.
    pub(crate) users: BTreeMap<String, Vec<AccessKeyMetadata>>,
    pub(crate) secrets: Vec<StoredSecret>,
    pub(crate) publications: Vec<Publication>,
    pub(crate) calls: Vec<Call>,
    pub(crate) failures: Vec<InjectedFailure>,
    pub(crate) sequences: HashMap<&'static str, u64>,
}

impl State {
    /// Record the call and fail it if a matching failure is armed.
    pub(crate) fn admit(&mut self, call: Call) -> Result<(), PortsError> {
        let armed = self.failures.iter().any(|f| f.matches(&call));
        let operation = call.operation;
        self.calls.push(call);
        if armed {
            return Err(PortsError::service(
                operation.service(),
                operation.api_name(),
                "injected failure",
            ));
        }
        Ok(())
    }

    /// Next value of a per-kind counter, starting at 1.
    pub(crate) fn next(&mut self, kind: &'static str) -> u64 {
        let counter = self.sequences.entry(kind).or_insert(0);
        *counter += 1;
        *counter
    }

    pub(crate) fn instance_mut(&mut self, instance_id: &str) -> Result<&mut InstanceRecord, PortsError> {
        self.instances
            .get_mut(instance_id)
            .ok_or_else(|| PortsError::not_found("Instance", instance_id))
    }

    pub(crate) fn keys_mut(&mut self, user_name: &str) -> Result<&mut Vec<AccessKeyMetadata>, PortsError> {
        self.users
            .get_mut(user_name)
            .ok_or_else(|| PortsError::not_found("User", user_name))
    }

    pub(crate) fn add_key(
        &mut self,
        user_name: &str,
        access_key_id: String,
        status: AccessKeyStatus,
        created_at: DateTime<Utc>,
    ) {
        self.users
            .entry(user_name.to_owned())
            .or_default()
            .push(AccessKeyMetadata {
                access_key_id,
                status,
                created_at,
            });
    }
}

/// Apply tags, replacing values of keys that already exist.
pub(crate) fn merge_tags(existing: &mut Vec<ResourceTag>, incoming: &[ResourceTag]) {
    for tag in incoming {
        match existing.iter_mut().find(|t| t.key == tag.key) {
            Some(current) => current.value.clone_from(&tag.value),
            None => existing.push(tag.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_overwrites_existing_keys() {
        let mut tags = vec![ResourceTag::new("IncidentId", "old")];
        merge_tags(
            &mut tags,
            &[
                ResourceTag::new("IncidentId", "new"),
                ResourceTag::new("IsolatedAt", "now"),
            ],
        );
        assert_eq!(
            tags,
            vec![
                ResourceTag::new("IncidentId", "new"),
                ResourceTag::new("IsolatedAt", "now"),
            ]
        );
    }

    #[test]
    fn sequences_are_per_kind() {
        let mut state = State::default();
        assert_eq!(state.next("sg"), 1);
        assert_eq!(state.next("sg"), 2);
        assert_eq!(state.next("snap"), 1);
    }
}
