//! Error types for port operations.
//!
//! Every port method returns `Result<_, PortsError>`. Drivers map their SDK
//! errors into these variants; the responder never inspects SDK types.
//! Messages may carry provider detail and are meant for operational logs
//! only, never for response payloads.

/// Error type for all port operations.
#[derive(Debug, thiserror::Error)]
pub enum PortsError {
    /// A resource the call depends on does not exist.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Kind of resource (e.g. "Instance", "AccessKey").
        entity: String,
        /// Identifier that was looked up.
        id: String,
    },

    /// The control plane rejected or failed the call.
    #[error("{service} {operation} failed: {message}")]
    Service {
        /// Service name (e.g. "ec2", "iam").
        service: &'static str,
        /// API operation (e.g. "CreateSecurityGroup").
        operation: &'static str,
        /// Provider error detail.
        message: String,
    },

    /// The call succeeded but the response lacked a required field.
    #[error("{operation} response is missing `{field}`")]
    MissingField {
        /// API operation whose response was incomplete.
        operation: &'static str,
        /// Name of the absent field.
        field: &'static str,
    },

    /// Serialization or deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Catch-all internal error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl PortsError {
    /// Convenience constructor for [`PortsError::NotFound`].
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Convenience constructor for [`PortsError::Service`].
    pub fn service(
        service: &'static str,
        operation: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self::Service {
            service,
            operation,
            message: message.into(),
        }
    }

    /// Convenience constructor for [`PortsError::MissingField`].
    pub fn missing_field(operation: &'static str, field: &'static str) -> Self {
        Self::MissingField { operation, field }
    }

    /// The API operation this error came from, when known.
    #[must_use]
    pub fn operation(&self) -> Option<&'static str> {
        match self {
            Self::Service { operation, .. } | Self::MissingField { operation, .. } => {
                Some(operation)
            }
            _ => None,
        }
    }
}

impl From<serde_json::Error> for PortsError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn not_found_convenience() {
        let err = PortsError::not_found("Instance", "i-0abc");
        match &err {
            PortsError::NotFound { entity, id } => {
                assert_eq!(entity, "Instance");
                assert_eq!(id, "i-0abc");
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
        assert_eq!(err.to_string(), "Instance not found: i-0abc");
    }

    #[test]
    fn service_error_display_names_the_call() {
        let err = PortsError::service("ec2", "CreateSecurityGroup", "quota exceeded");
        assert_eq!(
            err.to_string(),
            "ec2 CreateSecurityGroup failed: quota exceeded"
        );
        assert_eq!(err.operation(), Some("CreateSecurityGroup"));
    }

    #[test]
    fn missing_field_reports_operation() {
        let err = PortsError::missing_field("CreateSnapshot", "SnapshotId");
        assert_eq!(err.operation(), Some("CreateSnapshot"));
        assert!(err.to_string().contains("SnapshotId"));
    }

    #[test]
    fn internal_has_no_operation() {
        assert_eq!(PortsError::Internal("boom".into()).operation(), None);
    }

    #[test]
    fn serde_json_error_converts() {
        let parse: Result<serde_json::Value, _> = serde_json::from_str("{not json");
        let err: PortsError = parse.unwrap_err().into();
        assert!(matches!(err, PortsError::Serialization(_)));
    }
}
