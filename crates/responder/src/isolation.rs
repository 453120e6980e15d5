//! Instance isolation stage.
//!
//! For each well-formed instance id:
//! 1. resolve the instance's VPC
//! 2. create a dedicated, tagged isolation group in that VPC
//! 3. revoke the group's default allow-all egress
//! 4. replace the instance's group membership with only that group
//! 5. enable termination protection
//! 6. tag the instance with the run id and isolation time
//! 7. request one snapshot per attached volume (not awaited to completion)
//!
//! The first failing step aborts the item. Nothing already done is undone.

use std::sync::Arc;

use bulwark_ports::{ComputeApi, IsolationGroupSpec, ResourceTag, SnapshotSpec};
use chrono::Utc;

use crate::config::ResponderConfig;
use crate::error::ResponseError;
use crate::report::{FailureIndicator, InstanceIsolationResult};
use crate::tags;
use crate::validation::{Identifier, InstanceId};

const GROUP_DESCRIPTION: &str = "Isolation SG for incident response";

/// What a successful isolation produced.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Isolation {
    group_id: String,
    snapshots: Vec<String>,
}

/// Fences compromised instances off the network and preserves their volumes.
pub struct InstanceIsolator {
    compute: Arc<dyn ComputeApi>,
    config: Arc<ResponderConfig>,
}

impl InstanceIsolator {
    /// Create an isolator over a compute port.
    pub fn new(compute: Arc<dyn ComputeApi>, config: Arc<ResponderConfig>) -> Self {
        Self { compute, config }
    }

    /// Isolate one instance and report the outcome.
    ///
    /// Never fails: errors are logged and folded into a `failed` result.
    #[tracing::instrument(
        skip(self, instance_id),
        fields(incident_id = %incident_id, instance_id = %instance_id)
    )]
    pub async fn isolate(
        &self,
        incident_id: &str,
        instance_id: &Identifier,
    ) -> InstanceIsolationResult {
        let label = instance_id.to_string();
        match self.try_isolate(incident_id, instance_id).await {
            Ok(isolation) => {
                tracing::info!(
                    group_id = %isolation.group_id,
                    snapshots = isolation.snapshots.len(),
                    "Instance isolated"
                );
                InstanceIsolationResult::success(
                    label,
                    isolation.group_id,
                    isolation.snapshots,
                )
            }
            Err(err) => {
                err.log("Failed to isolate instance");
                InstanceIsolationResult::failed(label, FailureIndicator::for_isolation(&err))
            }
        }
    }

    async fn try_isolate(
        &self,
        incident_id: &str,
        instance_id: &Identifier,
    ) -> Result<Isolation, ResponseError> {
        let instance = InstanceId::from_identifier(instance_id)?;

        let vpc_id = self.compute.instance_vpc(instance.as_str()).await?;
        let group_id = self
            .compute
            .create_isolation_group(&self.group_spec(incident_id, &instance, vpc_id))
            .await?;
        tracing::debug!(group_id = %group_id, "Created isolation group");

        match self.lock_down(incident_id, &instance, &group_id).await {
            Ok(snapshots) => Ok(Isolation {
                group_id,
                snapshots,
            }),
            Err(err) => {
                tracing::warn!(
                    group_id = %group_id,
                    "Isolation group left in place after a later step failed"
                );
                Err(err)
            }
        }
    }

    /// Steps 3–7, run once the isolation group exists.
    async fn lock_down(
        &self,
        incident_id: &str,
        instance: &InstanceId,
        group_id: &str,
    ) -> Result<Vec<String>, ResponseError> {
        let instance_id = instance.as_str();

        self.compute.revoke_all_egress(group_id).await?;
        self.compute
            .replace_security_groups(instance_id, &[group_id.to_owned()])
            .await?;
        self.compute
            .enable_termination_protection(instance_id)
            .await?;

        let mut instance_tags = tags::incident(incident_id);
        instance_tags.push(ResourceTag::new(
            tags::ISOLATED_AT,
            tags::timestamp(Utc::now()),
        ));
        self.compute.tag_resource(instance_id, &instance_tags).await?;

        let volumes = self.compute.attached_volumes(instance_id).await?;
        let mut snapshots = Vec::with_capacity(volumes.len());
        for volume_id in volumes {
            let spec = SnapshotSpec {
                volume_id,
                description: format!("Forensic snapshot - incident {incident_id}"),
                tags: tags::incident(incident_id),
            };
            let snapshot_id = self.compute.create_snapshot(&spec).await?;
            tracing::debug!(volume_id = %spec.volume_id, snapshot_id = %snapshot_id, "Snapshot requested");
            snapshots.push(snapshot_id);
        }

        Ok(snapshots)
    }

    fn group_spec(
        &self,
        incident_id: &str,
        instance: &InstanceId,
        vpc_id: String,
    ) -> IsolationGroupSpec {
        let mut group_tags = tags::incident(incident_id);
        group_tags.push(ResourceTag::new(
            tags::CREATED_BY,
            self.config.provenance_marker.as_str(),
        ));
        IsolationGroupSpec {
            name: format!("{}-{}", self.config.isolation_group_prefix, instance),
            description: GROUP_DESCRIPTION.to_string(),
            vpc_id,
            tags: group_tags,
        }
    }
}
