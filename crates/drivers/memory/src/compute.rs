//! [`ComputeApi`] over the in-memory account.

use async_trait::async_trait;
use bulwark_ports::{
    ComputeApi, IsolationGroupSpec, PortsError, PortsResult, ResourceTag, SnapshotSpec,
};

use crate::MemoryAccount;
use crate::operation::{Call, Operation};
use crate::state::{SecurityGroupRecord, SnapshotRecord, merge_tags};

#[async_trait]
impl ComputeApi for MemoryAccount {
    async fn instance_vpc(&self, instance_id: &str) -> PortsResult<String> {
        let mut state = self.state.lock();
        state.admit(Call::new(Operation::DescribeInstance, instance_id))?;
        Ok(state.instance_mut(instance_id)?.vpc_id.clone())
    }

    async fn create_isolation_group(&self, spec: &IsolationGroupSpec) -> PortsResult<String> {
        let mut state = self.state.lock();
        state.admit(Call::new(Operation::CreateSecurityGroup, spec.name.as_str()))?;

        if state
            .groups
            .values()
            .any(|g| g.vpc_id == spec.vpc_id && g.name == spec.name)
        {
            return Err(PortsError::service(
                "ec2",
                "CreateSecurityGroup",
                format!(
                    "InvalidGroup.Duplicate: group '{}' already exists in {}",
                    spec.name, spec.vpc_id
                ),
            ));
        }

        let group_id = format!("sg-{:08x}", state.next("sg"));
        state.groups.insert(
            group_id.clone(),
            SecurityGroupRecord {
                group_id: group_id.clone(),
                name: spec.name.clone(),
                description: spec.description.clone(),
                vpc_id: spec.vpc_id.clone(),
                egress_open: true,
                tags: spec.tags.clone(),
            },
        );
        Ok(group_id)
    }

    async fn revoke_all_egress(&self, group_id: &str) -> PortsResult<()> {
        let mut state = self.state.lock();
        state.admit(Call::new(Operation::RevokeEgress, group_id))?;

        let group = state
            .groups
            .get_mut(group_id)
            .ok_or_else(|| PortsError::not_found("SecurityGroup", group_id))?;
        if !group.egress_open {
            return Err(PortsError::service(
                "ec2",
                "RevokeSecurityGroupEgress",
                "InvalidPermission.NotFound: rule does not exist",
            ));
        }
        group.egress_open = false;
        Ok(())
    }

    async fn replace_security_groups(
        &self,
        instance_id: &str,
        group_ids: &[String],
    ) -> PortsResult<()> {
        let mut state = self.state.lock();
        state.admit(Call::new(Operation::ReplaceSecurityGroups, instance_id))?;

        let vpc_id = state.instance_mut(instance_id)?.vpc_id.clone();
        for group_id in group_ids {
            let group = state
                .groups
                .get(group_id)
                .ok_or_else(|| PortsError::not_found("SecurityGroup", group_id.as_str()))?;
            if group.vpc_id != vpc_id {
                return Err(PortsError::service(
                    "ec2",
                    "ModifyInstanceAttribute",
                    format!("InvalidGroup.NotFound: {group_id} is not in {vpc_id}"),
                ));
            }
        }

        state.instance_mut(instance_id)?.security_groups = group_ids.to_vec();
        Ok(())
    }

    async fn enable_termination_protection(&self, instance_id: &str) -> PortsResult<()> {
        let mut state = self.state.lock();
        state.admit(Call::new(
            Operation::EnableTerminationProtection,
            instance_id,
        ))?;
        state.instance_mut(instance_id)?.termination_protection = true;
        Ok(())
    }

    async fn tag_resource(&self, resource_id: &str, tags: &[ResourceTag]) -> PortsResult<()> {
        let mut guard = self.state.lock();
        let state = &mut *guard;
        state.admit(Call::new(Operation::CreateTags, resource_id))?;

        if let Some(instance) = state.instances.get_mut(resource_id) {
            merge_tags(&mut instance.tags, tags);
        } else if let Some(group) = state.groups.get_mut(resource_id) {
            merge_tags(&mut group.tags, tags);
        } else if let Some(snapshot) = state
            .snapshots
            .iter_mut()
            .find(|s| s.snapshot_id == resource_id)
        {
            merge_tags(&mut snapshot.tags, tags);
        } else {
            return Err(PortsError::not_found("Resource", resource_id));
        }
        Ok(())
    }

    async fn attached_volumes(&self, instance_id: &str) -> PortsResult<Vec<String>> {
        let mut state = self.state.lock();
        state.admit(Call::new(Operation::DescribeVolumes, instance_id))?;
        Ok(state
            .instances
            .get(instance_id)
            .map(|i| i.volumes.clone())
            .unwrap_or_default())
    }

    async fn create_snapshot(&self, spec: &SnapshotSpec) -> PortsResult<String> {
        let mut state = self.state.lock();
        state.admit(Call::new(Operation::CreateSnapshot, spec.volume_id.as_str()))?;

        let attached = state
            .instances
            .values()
            .any(|i| i.volumes.contains(&spec.volume_id));
        if !attached {
            return Err(PortsError::not_found("Volume", spec.volume_id.as_str()));
        }

        let snapshot_id = format!("snap-{:08x}", state.next("snap"));
        state.snapshots.push(SnapshotRecord {
            snapshot_id: snapshot_id.clone(),
            volume_id: spec.volume_id.clone(),
            description: spec.description.clone(),
            tags: spec.tags.clone(),
        });
        Ok(snapshot_id)
    }
}
