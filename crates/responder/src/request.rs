//! Incident request input and its normalization.
//!
//! The request accepts both a single-item field and a list field for
//! instances and for compromised users. Both shapes are folded into one
//! canonical list per stage: list entries first, then the single item.
//! Duplicates are kept and processed once per occurrence.
//!
//! Identifiers are held as [`Identifier`]s and only checked per item, so a
//! malformed entry never rejects the request. A compromised-user entry that
//! is not an object counts as an entry with neither half.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ResponseError;
use crate::validation::{AccessKeyId, Identifier, UserName};

/// Structured request handed to the responder by the invoking context.
///
/// Unknown fields are ignored so the request can be embedded in a larger
/// event document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IncidentRequest {
    /// Single compromised instance.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance_id: Option<Identifier>,

    /// Compromised instances.
    #[serde(deserialize_with = "nullable_list")]
    pub instance_ids: Vec<Identifier>,

    /// User owning [`access_key_id`](Self::access_key_id).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iam_user: Option<Identifier>,

    /// Single compromised access key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_key_id: Option<Identifier>,

    /// Compromised (user, key) pairs.
    #[serde(deserialize_with = "user_entries")]
    pub compromised_users: Vec<CompromisedUser>,

    /// Notification topic for the run summary.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sns_topic_arn: Option<Identifier>,
}

/// One compromised identity entry.
///
/// Both halves are optional on the wire: an incomplete entry becomes a
/// failed rotation result rather than a rejected request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompromisedUser {
    /// IAM user name.
    pub iam_user: Option<Identifier>,
    /// Access key to deactivate.
    pub access_key_id: Option<Identifier>,
}

/// A validated (user, key) pair ready for rotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialTarget {
    /// Owning user.
    pub user: UserName,
    /// Key to deactivate.
    pub access_key_id: AccessKeyId,
}

impl CompromisedUser {
    /// Build an entry from both halves.
    pub fn new(iam_user: impl Into<String>, access_key_id: impl Into<String>) -> Self {
        Self {
            iam_user: Some(Identifier::Text(iam_user.into())),
            access_key_id: Some(Identifier::Text(access_key_id.into())),
        }
    }

    /// The user as echoed in results and logs.
    #[must_use]
    pub fn user_label(&self) -> Option<String> {
        self.iam_user.as_ref().map(ToString::to_string)
    }

    /// Check presence and format of both halves.
    pub fn validate(&self) -> Result<CredentialTarget, ResponseError> {
        let access_key_id = self
            .access_key_id
            .as_ref()
            .ok_or(ResponseError::MissingField {
                field: "access_key_id",
            })?;
        let iam_user = self
            .iam_user
            .as_ref()
            .ok_or(ResponseError::MissingField { field: "iam_user" })?;

        let access_key_id = AccessKeyId::from_identifier(access_key_id)?;
        let user = UserName::from_identifier(iam_user)?;
        Ok(CredentialTarget {
            user,
            access_key_id,
        })
    }
}

impl IncidentRequest {
    /// Parse a request from a JSON document.
    pub fn from_json(input: &str) -> serde_json::Result<Self> {
        serde_json::from_str(input)
    }

    /// Instance identifiers in processing order, duplicates included.
    #[must_use]
    pub fn instance_targets(&self) -> Vec<&Identifier> {
        self.instance_ids
            .iter()
            .chain(self.instance_id.as_ref())
            .collect()
    }

    /// Compromised identities in processing order, duplicates included.
    ///
    /// The single-pair fields contribute an entry only when both are set.
    #[must_use]
    pub fn credential_targets(&self) -> Vec<CompromisedUser> {
        let single = match (&self.iam_user, &self.access_key_id) {
            (Some(user), Some(key)) => Some(CompromisedUser {
                iam_user: Some(user.clone()),
                access_key_id: Some(key.clone()),
            }),
            _ => None,
        };
        self.compromised_users
            .iter()
            .cloned()
            .chain(single)
            .collect()
    }

    /// Notification destination, if one was supplied as a non-empty string.
    #[must_use]
    pub fn notification_topic(&self) -> Option<&str> {
        self.sns_topic_arn
            .as_ref()
            .and_then(Identifier::as_str)
            .map(str::trim)
            .filter(|topic| !topic.is_empty())
    }
}

fn nullable_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

fn user_entries<'de, D>(deserializer: D) -> Result<Vec<CompromisedUser>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries: Vec<serde_json::Value> = nullable_list(deserializer)?;
    Ok(entries
        .into_iter()
        .map(|entry| match entry {
            serde_json::Value::Object(_) => serde_json::from_value(entry).unwrap_or_default(),
            _ => CompromisedUser::default(),
        })
        .collect())
}
