//! Driver errors and SDK error mapping.

use std::error::Error as StdError;

use aws_smithy_types::error::display::DisplayErrorContext;
use bulwark_ports::PortsError;
use thiserror::Error;

/// Failure to set up the AWS drivers.
///
/// Errors from individual calls are reported as [`PortsError`] instead.
#[derive(Debug, Error)]
pub enum AwsDriverError {
    /// A configuration field holds an unusable value.
    #[error("invalid AWS config `{field}`: {reason}")]
    InvalidConfig {
        /// Offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// No region was configured and none could be resolved from the
    /// environment.
    #[error("no AWS region configured; set `aws.region` or AWS_REGION")]
    MissingRegion,
}

/// Map an SDK error to a [`PortsError::Service`], keeping its full source
/// chain in the message.
pub(crate) fn service_error<E>(service: &'static str, operation: &'static str, err: E) -> PortsError
where
    E: StdError,
{
    let err = DisplayErrorContext(err);
    tracing::debug!(service, operation, error = %err, "AWS call failed");
    PortsError::service(service, operation, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Error)]
    #[error("outer")]
    struct Outer(#[source] Inner);

    #[derive(Debug, Error)]
    #[error("UnauthorizedOperation")]
    struct Inner;

    #[test]
    fn service_error_keeps_source_chain() {
        let err = service_error("ec2", "CreateSecurityGroup", Outer(Inner));
        let rendered = err.to_string();
        assert!(rendered.starts_with("ec2 CreateSecurityGroup failed:"));
        assert!(rendered.contains("UnauthorizedOperation"));
    }
}
