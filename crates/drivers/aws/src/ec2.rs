//! EC2 driver for [`ComputeApi`].

use async_trait::async_trait;
use aws_sdk_ec2::Client;
use aws_sdk_ec2::types::{
    AttributeBooleanValue, Filter, IpPermission, IpRange, ResourceType, TagSpecification,
};
use bulwark_ports::{
    ComputeApi, IsolationGroupSpec, PortsError, PortsResult, ResourceTag, SnapshotSpec,
};

use crate::convert::ec2_tags;
use crate::error::service_error;

const SERVICE: &str = "ec2";

/// [`ComputeApi`] over the EC2 control plane.
#[derive(Debug, Clone)]
pub struct Ec2ComputeApi {
    client: Client,
}

impl Ec2ComputeApi {
    /// Wrap an EC2 client.
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

fn tag_specification(resource_type: ResourceType, tags: &[ResourceTag]) -> TagSpecification {
    TagSpecification::builder()
        .resource_type(resource_type)
        .set_tags(Some(ec2_tags(tags)))
        .build()
}

#[async_trait]
impl ComputeApi for Ec2ComputeApi {
    #[tracing::instrument(skip(self))]
    async fn instance_vpc(&self, instance_id: &str) -> PortsResult<String> {
        let output = self
            .client
            .describe_instances()
            .instance_ids(instance_id)
            .send()
            .await
            .map_err(|e| service_error(SERVICE, "DescribeInstances", e))?;

        let instance = output
            .reservations()
            .iter()
            .flat_map(|r| r.instances())
            .next()
            .ok_or_else(|| PortsError::not_found("Instance", instance_id))?;

        instance
            .vpc_id()
            .map(str::to_owned)
            .ok_or_else(|| PortsError::missing_field("DescribeInstances", "VpcId"))
    }

    #[tracing::instrument(skip(self, spec), fields(name = %spec.name, vpc_id = %spec.vpc_id))]
    async fn create_isolation_group(&self, spec: &IsolationGroupSpec) -> PortsResult<String> {
        let output = self
            .client
            .create_security_group()
            .group_name(&spec.name)
            .description(&spec.description)
            .vpc_id(&spec.vpc_id)
            .tag_specifications(tag_specification(ResourceType::SecurityGroup, &spec.tags))
            .send()
            .await
            .map_err(|e| service_error(SERVICE, "CreateSecurityGroup", e))?;

        output
            .group_id()
            .map(str::to_owned)
            .ok_or_else(|| PortsError::missing_field("CreateSecurityGroup", "GroupId"))
    }

    #[tracing::instrument(skip(self))]
    async fn revoke_all_egress(&self, group_id: &str) -> PortsResult<()> {
        let allow_all = IpPermission::builder()
            .ip_protocol("-1")
            .ip_ranges(IpRange::builder().cidr_ip("0.0.0.0/0").build())
            .build();

        self.client
            .revoke_security_group_egress()
            .group_id(group_id)
            .ip_permissions(allow_all)
            .send()
            .await
            .map_err(|e| service_error(SERVICE, "RevokeSecurityGroupEgress", e))?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn replace_security_groups(
        &self,
        instance_id: &str,
        group_ids: &[String],
    ) -> PortsResult<()> {
        self.client
            .modify_instance_attribute()
            .instance_id(instance_id)
            .set_groups(Some(group_ids.to_vec()))
            .send()
            .await
            .map_err(|e| service_error(SERVICE, "ModifyInstanceAttribute", e))?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn enable_termination_protection(&self, instance_id: &str) -> PortsResult<()> {
        self.client
            .modify_instance_attribute()
            .instance_id(instance_id)
            .disable_api_termination(AttributeBooleanValue::builder().value(true).build())
            .send()
            .await
            .map_err(|e| service_error(SERVICE, "ModifyInstanceAttribute", e))?;
        Ok(())
    }

    #[tracing::instrument(skip(self, tags))]
    async fn tag_resource(&self, resource_id: &str, tags: &[ResourceTag]) -> PortsResult<()> {
        self.client
            .create_tags()
            .resources(resource_id)
            .set_tags(Some(ec2_tags(tags)))
            .send()
            .await
            .map_err(|e| service_error(SERVICE, "CreateTags", e))?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn attached_volumes(&self, instance_id: &str) -> PortsResult<Vec<String>> {
        let output = self
            .client
            .describe_volumes()
            .filters(
                Filter::builder()
                    .name("attachment.instance-id")
                    .values(instance_id)
                    .build(),
            )
            .send()
            .await
            .map_err(|e| service_error(SERVICE, "DescribeVolumes", e))?;

        Ok(output
            .volumes()
            .iter()
            .filter_map(|v| v.volume_id().map(str::to_owned))
            .collect())
    }

    #[tracing::instrument(skip(self, spec), fields(volume_id = %spec.volume_id))]
    async fn create_snapshot(&self, spec: &SnapshotSpec) -> PortsResult<String> {
        let output = self
            .client
            .create_snapshot()
            .volume_id(&spec.volume_id)
            .description(&spec.description)
            .tag_specifications(tag_specification(ResourceType::Snapshot, &spec.tags))
            .send()
            .await
            .map_err(|e| service_error(SERVICE, "CreateSnapshot", e))?;

        output
            .snapshot_id()
            .map(str::to_owned)
            .ok_or_else(|| PortsError::missing_field("CreateSnapshot", "SnapshotId"))
    }
}
