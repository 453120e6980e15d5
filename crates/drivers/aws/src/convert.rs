//! Conversions between SDK shapes and port types.

use aws_sdk_iam::primitives::DateTime as SmithyDateTime;
use aws_sdk_iam::types::StatusType;
use bulwark_ports::{AccessKeyStatus, ResourceTag};
use chrono::{DateTime, Utc};

/// SDK timestamp to UTC, `None` when out of chrono's range.
pub(crate) fn to_utc(at: &SmithyDateTime) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(at.secs(), at.subsec_nanos())
}

/// Anything other than `Active` cannot sign requests.
pub(crate) fn key_status(status: &StatusType) -> AccessKeyStatus {
    match status {
        StatusType::Active => AccessKeyStatus::Active,
        _ => AccessKeyStatus::Inactive,
    }
}

pub(crate) fn ec2_tags(tags: &[ResourceTag]) -> Vec<aws_sdk_ec2::types::Tag> {
    tags.iter()
        .map(|tag| {
            aws_sdk_ec2::types::Tag::builder()
                .key(&tag.key)
                .value(&tag.value)
                .build()
        })
        .collect()
}

pub(crate) fn secrets_tags(tags: &[ResourceTag]) -> Vec<aws_sdk_secretsmanager::types::Tag> {
    tags.iter()
        .map(|tag| {
            aws_sdk_secretsmanager::types::Tag::builder()
                .key(&tag.key)
                .value(&tag.value)
                .build()
        })
        .collect()
}
