//! Per-item results, the run accumulator and the returned response.
//!
//! Result entries serialize to the wire shape consumers already parse:
//! a flat object with a `status` of `success` or `failed`, success fields
//! on success and a fixed `error` indicator on failure.

use serde::{Deserialize, Serialize};

use crate::error::ResponseError;

/// Non-sensitive failure marker placed in a response body.
///
/// The underlying cause goes to the operational log only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FailureIndicator {
    /// Instance id failed the format check.
    #[serde(rename = "Invalid instance ID format")]
    InvalidInstanceId,
    /// Any external failure while isolating.
    #[serde(rename = "Isolation failed - check CloudWatch logs")]
    IsolationFailed,
    /// Access key id failed the format check.
    #[serde(rename = "Invalid access key format")]
    InvalidAccessKey,
    /// User name failed the format check.
    #[serde(rename = "Invalid IAM user name")]
    InvalidUserName,
    /// Entry lacked the user or the key.
    #[serde(rename = "Missing iam_user or access_key_id")]
    MissingTarget,
    /// Any external failure while rotating.
    #[serde(rename = "Key rotation failed - check CloudWatch logs")]
    RotationFailed,
}

impl FailureIndicator {
    /// Indicator for a failed isolation item.
    #[must_use]
    pub fn for_isolation(err: &ResponseError) -> Self {
        match err {
            ResponseError::InvalidInstanceId { .. } => Self::InvalidInstanceId,
            _ => Self::IsolationFailed,
        }
    }

    /// Indicator for a failed rotation item.
    #[must_use]
    pub fn for_rotation(err: &ResponseError) -> Self {
        match err {
            ResponseError::InvalidAccessKeyId => Self::InvalidAccessKey,
            ResponseError::InvalidUserName { .. } => Self::InvalidUserName,
            ResponseError::MissingField { .. } => Self::MissingTarget,
            _ => Self::RotationFailed,
        }
    }
}

/// Outcome of isolating one instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceIsolationResult {
    /// Identifier as supplied in the request.
    pub instance_id: String,
    /// Success details or failure indicator.
    #[serde(flatten)]
    pub outcome: IsolationOutcome,
}

/// Success/failure variant of an isolation item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum IsolationOutcome {
    /// Instance fenced off and snapshots requested.
    Success {
        /// Id of the created isolation group.
        isolation_sg: String,
        /// One requested snapshot per attached volume.
        snapshots: Vec<String>,
    },
    /// Isolation aborted for this instance.
    Failed {
        /// Generic indicator.
        error: FailureIndicator,
    },
}

impl InstanceIsolationResult {
    /// Successful isolation.
    pub fn success(
        instance_id: impl Into<String>,
        isolation_sg: impl Into<String>,
        snapshots: Vec<String>,
    ) -> Self {
        Self {
            instance_id: instance_id.into(),
            outcome: IsolationOutcome::Success {
                isolation_sg: isolation_sg.into(),
                snapshots,
            },
        }
    }

    /// Failed isolation.
    pub fn failed(instance_id: impl Into<String>, error: FailureIndicator) -> Self {
        Self {
            instance_id: instance_id.into(),
            outcome: IsolationOutcome::Failed { error },
        }
    }

    /// `true` when the outcome is [`IsolationOutcome::Success`].
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, IsolationOutcome::Success { .. })
    }
}

/// Outcome of rotating one compromised credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialRotationResult {
    /// User as supplied in the request, if it was supplied at all.
    pub iam_user: Option<String>,
    /// Success details or failure indicator.
    #[serde(flatten)]
    pub outcome: RotationOutcome,
}

/// Success/failure variant of a rotation item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum RotationOutcome {
    /// Key deactivated, replacement issued and stored.
    Success {
        /// The flagged key, now inactive.
        deactivated_key: String,
        /// Keys pruned to stay under the per-user limit.
        deleted_keys: Vec<String>,
        /// Replacement key id.
        new_key_id: String,
        /// Where the replacement's secret material lives.
        secret_arn: String,
    },
    /// Rotation aborted for this identity.
    Failed {
        /// Generic indicator.
        error: FailureIndicator,
    },
}

impl CredentialRotationResult {
    /// Failed rotation.
    pub fn failed(iam_user: Option<String>, error: FailureIndicator) -> Self {
        Self {
            iam_user,
            outcome: RotationOutcome::Failed { error },
        }
    }

    /// `true` when the outcome is [`RotationOutcome::Success`].
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, RotationOutcome::Success { .. })
    }
}

/// Success and failure counts of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Successful isolations.
    pub instances_isolated: usize,
    /// Successful rotations.
    pub keys_rotated: usize,
    /// Failed entries across both stages.
    pub failures: usize,
}

/// Accumulated results of one response pass.
///
/// Created at invocation start; results are appended in processing order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncidentRun {
    incident_id: String,
    isolation: Vec<InstanceIsolationResult>,
    key_rotation: Vec<CredentialRotationResult>,
}

impl IncidentRun {
    /// Start an empty run.
    pub fn new(incident_id: impl Into<String>) -> Self {
        Self {
            incident_id: incident_id.into(),
            isolation: Vec::new(),
            key_rotation: Vec::new(),
        }
    }

    /// Run identifier.
    #[must_use]
    pub fn incident_id(&self) -> &str {
        &self.incident_id
    }

    /// Isolation results so far.
    #[must_use]
    pub fn isolation(&self) -> &[InstanceIsolationResult] {
        &self.isolation
    }

    /// Rotation results so far.
    #[must_use]
    pub fn key_rotation(&self) -> &[CredentialRotationResult] {
        &self.key_rotation
    }

    /// Append an isolation result.
    pub fn record_isolation(&mut self, result: InstanceIsolationResult) {
        self.isolation.push(result);
    }

    /// Append a rotation result.
    pub fn record_rotation(&mut self, result: CredentialRotationResult) {
        self.key_rotation.push(result);
    }

    /// Count successes and failures.
    #[must_use]
    pub fn summary(&self) -> RunSummary {
        let instances_isolated = self.isolation.iter().filter(|r| r.is_success()).count();
        let keys_rotated = self.key_rotation.iter().filter(|r| r.is_success()).count();
        RunSummary {
            instances_isolated,
            keys_rotated,
            failures: (self.isolation.len() - instances_isolated)
                + (self.key_rotation.len() - keys_rotated),
        }
    }

    /// Wrap the run in the always-200 response.
    #[must_use]
    pub fn into_response(self) -> IncidentResponse {
        IncidentResponse {
            status_code: IncidentResponse::OK,
            body: self,
        }
    }
}

/// Response returned to the invoking context.
///
/// The status is always 200; per-item failures live inside the body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncidentResponse {
    /// HTTP-style status code.
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    /// Run results.
    pub body: IncidentRun,
}

impl IncidentResponse {
    /// The only status a completed run reports.
    pub const OK: u16 = 200;

    /// Render the proxy-integration shape, where `body` is a JSON string.
    pub fn to_proxy_json(&self) -> serde_json::Result<serde_json::Value> {
        Ok(serde_json::json!({
            "statusCode": self.status_code,
            "body": serde_json::to_string(&self.body)?,
        }))
    }
}
