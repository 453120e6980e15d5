//! Recorded calls and the operations they name.

use std::fmt;

/// A control-plane operation the account can serve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// `DescribeInstances` (VPC lookup).
    DescribeInstance,
    /// `CreateSecurityGroup`.
    CreateSecurityGroup,
    /// `RevokeSecurityGroupEgress`.
    RevokeEgress,
    /// `ModifyInstanceAttribute` (groups).
    ReplaceSecurityGroups,
    /// `ModifyInstanceAttribute` (termination protection).
    EnableTerminationProtection,
    /// `CreateTags`.
    CreateTags,
    /// `DescribeVolumes`.
    DescribeVolumes,
    /// `CreateSnapshot`.
    CreateSnapshot,
    /// `UpdateAccessKey` to `Inactive`.
    DeactivateAccessKey,
    /// `ListAccessKeys`.
    ListAccessKeys,
    /// `DeleteAccessKey`.
    DeleteAccessKey,
    /// `CreateAccessKey`.
    CreateAccessKey,
    /// `CreateSecret`.
    CreateSecret,
    /// `Publish`.
    Publish,
}

impl Operation {
    /// Service the operation belongs to.
    #[must_use]
    pub const fn service(self) -> &'static str {
        match self {
            Self::DescribeInstance
            | Self::CreateSecurityGroup
            | Self::RevokeEgress
            | Self::ReplaceSecurityGroups
            | Self::EnableTerminationProtection
            | Self::CreateTags
            | Self::DescribeVolumes
            | Self::CreateSnapshot => "ec2",
            Self::DeactivateAccessKey
            | Self::ListAccessKeys
            | Self::DeleteAccessKey
            | Self::CreateAccessKey => "iam",
            Self::CreateSecret => "secretsmanager",
            Self::Publish => "sns",
        }
    }

    /// API action name.
    #[must_use]
    pub const fn api_name(self) -> &'static str {
        match self {
            Self::DescribeInstance => "DescribeInstances",
            Self::CreateSecurityGroup => "CreateSecurityGroup",
            Self::RevokeEgress => "RevokeSecurityGroupEgress",
            Self::ReplaceSecurityGroups | Self::EnableTerminationProtection => {
                "ModifyInstanceAttribute"
            }
            Self::CreateTags => "CreateTags",
            Self::DescribeVolumes => "DescribeVolumes",
            Self::CreateSnapshot => "CreateSnapshot",
            Self::DeactivateAccessKey => "UpdateAccessKey",
            Self::ListAccessKeys => "ListAccessKeys",
            Self::DeleteAccessKey => "DeleteAccessKey",
            Self::CreateAccessKey => "CreateAccessKey",
            Self::CreateSecret => "CreateSecret",
            Self::Publish => "Publish",
        }
    }

    /// `true` for operations that change account state.
    #[must_use]
    pub const fn is_mutating(self) -> bool {
        !matches!(
            self,
            Self::DescribeInstance | Self::DescribeVolumes | Self::ListAccessKeys
        )
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.service(), self.api_name())
    }
}

/// One call received by the account, successful or not.
///
/// `target` is the resource the call addresses: an instance, group, volume
/// or resource id for compute calls, the user name for identity calls, the
/// secret name for `CreateSecret` and the topic for `Publish`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    /// Operation invoked.
    pub operation: Operation,
    /// Addressed resource.
    pub target: String,
}

impl Call {
    pub(crate) fn new(operation: Operation, target: impl Into<String>) -> Self {
        Self {
            operation,
            target: target.into(),
        }
    }
}

/// A failure armed for an operation, optionally scoped to one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct InjectedFailure {
    pub(crate) operation: Operation,
    pub(crate) target: Option<String>,
}

impl InjectedFailure {
    pub(crate) fn matches(&self, call: &Call) -> bool {
        self.operation == call.operation
            && self
                .target
                .as_deref()
                .is_none_or(|target| target == call.target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_are_not_mutating() {
        assert!(!Operation::DescribeInstance.is_mutating());
        assert!(!Operation::ListAccessKeys.is_mutating());
        assert!(Operation::CreateSecurityGroup.is_mutating());
        assert!(Operation::Publish.is_mutating());
    }

    #[test]
    fn scoped_failure_matches_only_its_target() {
        let failure = InjectedFailure {
            operation: Operation::CreateSnapshot,
            target: Some("vol-2".into()),
        };
        assert!(failure.matches(&Call::new(Operation::CreateSnapshot, "vol-2")));
        assert!(!failure.matches(&Call::new(Operation::CreateSnapshot, "vol-1")));
        assert!(!failure.matches(&Call::new(Operation::CreateTags, "vol-2")));
    }

    #[test]
    fn display_names_service_and_action() {
        assert_eq!(
            Operation::DeactivateAccessKey.to_string(),
            "iam:UpdateAccessKey"
        );
    }
}
