//! Compute control-plane port.
//!
//! Defines the instance and network-boundary operations used to isolate a
//! compromised instance. Drivers (EC2, in-memory) implement this trait.

use async_trait::async_trait;

use crate::PortsResult;
use crate::tag::ResourceTag;

/// Parameters for creating a dedicated isolation boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IsolationGroupSpec {
    /// Group name, unique per instance within the network.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// Network (VPC) the group is scoped to.
    pub vpc_id: String,
    /// Tags applied at creation.
    pub tags: Vec<ResourceTag>,
}

/// Parameters for a point-in-time volume snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotSpec {
    /// Volume to snapshot.
    pub volume_id: String,
    /// Snapshot description.
    pub description: String,
    /// Tags applied at creation.
    pub tags: Vec<ResourceTag>,
}

/// Compute control-plane interface.
///
/// Mutating calls are blocking round trips from the caller's point of view;
/// snapshot creation returns as soon as the request is accepted.
#[async_trait]
pub trait ComputeApi: Send + Sync {
    /// Resolve the network (VPC) the instance belongs to.
    async fn instance_vpc(&self, instance_id: &str) -> PortsResult<String>;

    /// Create an isolation boundary. Returns the new group id.
    async fn create_isolation_group(&self, spec: &IsolationGroupSpec) -> PortsResult<String>;

    /// Revoke the allow-all egress rule (`-1`, `0.0.0.0/0`) from a group.
    async fn revoke_all_egress(&self, group_id: &str) -> PortsResult<()>;

    /// Replace the instance's group membership with exactly `group_ids`.
    async fn replace_security_groups(
        &self,
        instance_id: &str,
        group_ids: &[String],
    ) -> PortsResult<()>;

    /// Prevent API-driven termination of the instance.
    async fn enable_termination_protection(&self, instance_id: &str) -> PortsResult<()>;

    /// Attach tags to a resource.
    async fn tag_resource(&self, resource_id: &str, tags: &[ResourceTag]) -> PortsResult<()>;

    /// List the ids of all volumes currently attached to the instance.
    async fn attached_volumes(&self, instance_id: &str) -> PortsResult<Vec<String>>;

    /// Request a snapshot. Returns the snapshot id without waiting for completion.
    async fn create_snapshot(&self, spec: &SnapshotSpec) -> PortsResult<String>;
}
