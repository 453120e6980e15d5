//! Identifier format checks.
//!
//! Every identifier is parsed into one of these newtypes before the first
//! mutating call for its item. A parse failure is a per-item failure.
//!
//! Request fields arrive as [`Identifier`]s, so a number or object where a
//! string belongs fails its own item instead of the whole request.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ResponseError;

/// An identifier as it appeared in the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Identifier {
    /// A JSON string, not yet format-checked.
    Text(String),
    /// Any other JSON value.
    Malformed(serde_json::Value),
}

impl Identifier {
    /// The string form, `None` for a non-string value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Malformed(_) => None,
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Malformed(value) => write!(f, "{value}"),
        }
    }
}

impl From<String> for Identifier {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for Identifier {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

/// Compute instance id (`i-` followed by ASCII alphanumerics).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InstanceId(String);

impl InstanceId {
    /// Required prefix.
    pub const PREFIX: &'static str = "i-";

    /// Validate and wrap a raw identifier.
    pub fn parse(raw: &str) -> Result<Self, ResponseError> {
        match raw.strip_prefix(Self::PREFIX) {
            Some(rest) if !rest.is_empty() && rest.chars().all(|c| c.is_ascii_alphanumeric()) => {
                Ok(Self(raw.to_owned()))
            }
            _ => Err(ResponseError::InvalidInstanceId {
                value: raw.to_owned(),
            }),
        }
    }

    /// Validate a request identifier.
    pub fn from_identifier(raw: &Identifier) -> Result<Self, ResponseError> {
        match raw.as_str() {
            Some(text) => Self::parse(text),
            None => Err(ResponseError::InvalidInstanceId {
                value: raw.to_string(),
            }),
        }
    }

    /// Borrow the id.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for InstanceId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Long-term access key id (`AKIA` followed by uppercase alphanumerics).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AccessKeyId(String);

impl AccessKeyId {
    /// Required prefix.
    pub const PREFIX: &'static str = "AKIA";

    /// Validate and wrap a raw key id.
    pub fn parse(raw: &str) -> Result<Self, ResponseError> {
        match raw.strip_prefix(Self::PREFIX) {
            Some(rest)
                if !rest.is_empty()
                    && rest
                        .chars()
                        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()) =>
            {
                Ok(Self(raw.to_owned()))
            }
            _ => Err(ResponseError::InvalidAccessKeyId),
        }
    }

    /// Validate a request identifier.
    pub fn from_identifier(raw: &Identifier) -> Result<Self, ResponseError> {
        raw.as_str()
            .ok_or(ResponseError::InvalidAccessKeyId)
            .and_then(Self::parse)
    }

    /// Borrow the id.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccessKeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// IAM user name (1–64 characters of `[A-Za-z0-9+=,.@_-]`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserName(String);

impl UserName {
    /// Longest name IAM accepts.
    pub const MAX_LEN: usize = 64;

    /// Validate and wrap a raw user name.
    pub fn parse(raw: &str) -> Result<Self, ResponseError> {
        let allowed = |c: char| c.is_ascii_alphanumeric() || "+=,.@_-".contains(c);
        if raw.is_empty() || raw.len() > Self::MAX_LEN || !raw.chars().all(allowed) {
            return Err(ResponseError::InvalidUserName {
                value: raw.to_owned(),
            });
        }
        Ok(Self(raw.to_owned()))
    }

    /// Validate a request identifier.
    pub fn from_identifier(raw: &Identifier) -> Result<Self, ResponseError> {
        match raw.as_str() {
            Some(text) => Self::parse(text),
            None => Err(ResponseError::InvalidUserName {
                value: raw.to_string(),
            }),
        }
    }

    /// Borrow the name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
