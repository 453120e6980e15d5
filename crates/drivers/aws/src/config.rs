//! SDK configuration loading.

use aws_config::{BehaviorVersion, Region, SdkConfig};
use serde::{Deserialize, Serialize};

use crate::error::AwsDriverError;

/// Where and as whom the drivers talk to AWS.
///
/// Unset fields fall back to the SDK's default chain (environment, shared
/// config files, instance or task role).
///
/// # Example
///
/// ```rust
/// use bulwark_driver_aws::AwsConfig;
///
/// let config = AwsConfig {
///     region: Some("eu-west-1".into()),
///     endpoint_url: Some("http://localhost:4566".into()),
///     ..Default::default()
/// };
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AwsConfig {
    /// Region override.
    pub region: Option<String>,

    /// Custom endpoint for every service (LocalStack and similar).
    pub endpoint_url: Option<String>,

    /// Named profile from the shared config files.
    pub profile: Option<String>,
}

impl AwsConfig {
    /// Check the fields that can be checked without network access.
    pub fn validate(&self) -> Result<(), AwsDriverError> {
        if let Some(region) = &self.region {
            if region.trim().is_empty() {
                return Err(AwsDriverError::InvalidConfig {
                    field: "region",
                    reason: "must not be empty".into(),
                });
            }
        }

        if let Some(endpoint) = &self.endpoint_url {
            if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
                return Err(AwsDriverError::InvalidConfig {
                    field: "endpoint_url",
                    reason: format!("must be an http(s) URL, got {endpoint:?}"),
                });
            }
        }

        Ok(())
    }
}

/// Resolve the shared SDK configuration.
///
/// Fails when no region can be resolved from the config or the
/// environment.
pub async fn load_sdk_config(config: &AwsConfig) -> Result<SdkConfig, AwsDriverError> {
    config.validate()?;

    let mut loader = aws_config::defaults(BehaviorVersion::latest());

    if let Some(region) = &config.region {
        loader = loader.region(Region::new(region.clone()));
    }

    if let Some(endpoint) = &config.endpoint_url {
        loader = loader.endpoint_url(endpoint);
    }

    if let Some(profile) = &config.profile {
        loader = loader.profile_name(profile);
    }

    let sdk_config = loader.load().await;
    let Some(region) = sdk_config.region() else {
        return Err(AwsDriverError::MissingRegion);
    };

    tracing::info!(
        region = %region,
        endpoint = ?config.endpoint_url,
        profile = ?config.profile,
        "Loaded AWS configuration"
    );

    Ok(sdk_config)
}
