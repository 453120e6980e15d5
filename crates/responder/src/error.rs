//! Error types for the responder.
//!
//! - [`ResponseError`]: why a single instance or credential item failed.
//!   Always logged in full, never placed in a response body.
//! - [`ConfigError`]: invalid [`ResponderConfig`](crate::ResponderConfig) or an
//!   incompletely wired [`ResponderBuilder`](crate::ResponderBuilder).

use bulwark_ports::PortsError;
use thiserror::Error;

/// Per-item failure cause.
///
/// Caught at the item boundary: the stage records a `failed` result with a
/// [`FailureIndicator`](crate::report::FailureIndicator) and moves on.
#[derive(Debug, Error)]
pub enum ResponseError {
    /// Identifier does not follow the instance id convention.
    #[error("invalid instance ID format: {value:?}")]
    InvalidInstanceId {
        /// Rejected identifier.
        value: String,
    },

    /// Identifier does not follow the access key id convention.
    ///
    /// The rejected value is not echoed: it may be a pasted secret.
    #[error("invalid access key format")]
    InvalidAccessKeyId,

    /// User name is empty, too long or has characters IAM rejects.
    #[error("invalid IAM user name: {value:?}")]
    InvalidUserName {
        /// Rejected name.
        value: String,
    },

    /// A compromised-user entry lacks one half of the pair.
    #[error("compromised user entry is missing `{field}`")]
    MissingField {
        /// Name of the absent field.
        field: &'static str,
    },

    /// An external control-plane call failed.
    #[error(transparent)]
    Port(#[from] PortsError),

    /// The rotated key payload could not be encoded.
    #[error("failed to encode secret payload: {0}")]
    Encode(#[from] serde_json::Error),
}

impl ResponseError {
    /// `true` when the item was rejected before any external call.
    #[must_use]
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidInstanceId { .. }
                | Self::InvalidAccessKeyId
                | Self::InvalidUserName { .. }
                | Self::MissingField { .. }
        )
    }

    /// The control-plane operation that failed, for port errors that name one.
    #[must_use]
    pub fn failed_operation(&self) -> Option<&'static str> {
        match self {
            Self::Port(err) => err.operation(),
            _ => None,
        }
    }

    /// Log this error at the level its cause deserves.
    ///
    /// Malformed input is a warning; a failed call is an error.
    pub(crate) fn log(&self, message: &'static str) {
        if self.is_format_error() {
            tracing::warn!(error = %self, "{message}");
        } else {
            tracing::error!(error = %self, operation = self.failed_operation(), "{message}");
        }
    }
}

/// Configuration and wiring errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A field holds a value the responder cannot work with.
    #[error("invalid value for `{field}`: {reason}")]
    InvalidValue {
        /// Offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// The builder was finished without a required port.
    #[error("responder is missing its {0} port")]
    MissingPort(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_errors_are_classified() {
        assert!(
            ResponseError::InvalidInstanceId {
                value: "badid".into()
            }
            .is_format_error()
        );
        assert!(ResponseError::InvalidAccessKeyId.is_format_error());
        assert!(ResponseError::MissingField { field: "iam_user" }.is_format_error());
        assert_eq!(ResponseError::InvalidAccessKeyId.failed_operation(), None);
    }

    #[test]
    fn port_errors_are_not_format_errors() {
        let err: ResponseError = PortsError::service("iam", "CreateAccessKey", "LimitExceeded").into();
        assert!(!err.is_format_error());
        assert_eq!(err.failed_operation(), Some("CreateAccessKey"));
        assert_eq!(err.to_string(), "iam CreateAccessKey failed: LimitExceeded");
    }

    #[test]
    fn access_key_error_does_not_echo_value() {
        assert_eq!(
            ResponseError::InvalidAccessKeyId.to_string(),
            "invalid access key format"
        );
    }
}
