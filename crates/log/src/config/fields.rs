//! Global fields configuration

use serde::{Deserialize, Serialize};

/// Fields recorded on the root span, so every event carries them
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Fields {
    /// Service name
    pub service: Option<String>,
    /// Deployment environment
    pub env: Option<String>,
    /// Build version
    pub version: Option<String>,
    /// Cloud region
    pub region: Option<String>,
}

impl Fields {
    /// Read fields from `BULWARK_SERVICE`, `BULWARK_ENV`, `BULWARK_VERSION`
    /// and `AWS_REGION`.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(&|key| std::env::var(key).ok())
    }

    pub(super) fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Self {
        Self {
            service: lookup("BULWARK_SERVICE"),
            env: lookup("BULWARK_ENV"),
            version: lookup("BULWARK_VERSION"),
            region: lookup("AWS_REGION"),
        }
    }

    /// Check if no field is set
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.service.is_none() && self.env.is_none() && self.version.is_none() && self.region.is_none()
    }
}
