#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! # Bulwark AWS Driver
//!
//! Production drivers for the ports in `bulwark-ports`:
//!
//! - [`Ec2ComputeApi`] -- security groups, instance attributes, tags, snapshots
//! - [`IamIdentityApi`] -- access key lifecycle
//! - [`SecretsManagerStore`] -- storage for newly issued keys
//! - [`SnsPublisher`] -- run summary notifications
//!
//! Clients share one [`SdkConfig`](aws_config::SdkConfig), resolved through
//! the default credential chain with optional region, endpoint and profile
//! overrides from [`AwsConfig`].
//!
//! ```rust,ignore
//! use bulwark_driver_aws::{AwsConfig, AwsServices};
//!
//! let services = AwsServices::connect(&AwsConfig::default()).await?;
//! let responder = IncidentResponder::builder()
//!     .compute(services.compute)
//!     .identity(services.identity)
//!     .secrets(services.secrets)
//!     .publisher(services.publisher)
//!     .build()?;
//! ```

mod config;
mod convert;
mod ec2;
mod error;
mod iam;
mod secrets;
mod sns;

use std::sync::Arc;

use aws_config::SdkConfig;

pub use config::{AwsConfig, load_sdk_config};
pub use ec2::Ec2ComputeApi;
pub use error::AwsDriverError;
pub use iam::IamIdentityApi;
pub use secrets::SecretsManagerStore;
pub use sns::SnsPublisher;

/// One driver per port, sharing a single SDK configuration.
#[derive(Debug, Clone)]
pub struct AwsServices {
    /// EC2 compute driver.
    pub compute: Arc<Ec2ComputeApi>,
    /// IAM identity driver.
    pub identity: Arc<IamIdentityApi>,
    /// Secrets Manager driver.
    pub secrets: Arc<SecretsManagerStore>,
    /// SNS driver.
    pub publisher: Arc<SnsPublisher>,
}

impl AwsServices {
    /// Build every driver from a resolved SDK configuration.
    #[must_use]
    pub fn from_sdk_config(sdk_config: &SdkConfig) -> Self {
        Self {
            compute: Arc::new(Ec2ComputeApi::new(aws_sdk_ec2::Client::new(sdk_config))),
            identity: Arc::new(IamIdentityApi::new(aws_sdk_iam::Client::new(sdk_config))),
            secrets: Arc::new(SecretsManagerStore::new(
                aws_sdk_secretsmanager::Client::new(sdk_config),
            )),
            publisher: Arc::new(SnsPublisher::new(aws_sdk_sns::Client::new(sdk_config))),
        }
    }

    /// Resolve the SDK configuration and build every driver.
    pub async fn connect(config: &AwsConfig) -> Result<Self, AwsDriverError> {
        let sdk_config = load_sdk_config(config).await?;
        Ok(Self::from_sdk_config(&sdk_config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bulwark_ports::{ComputeApi, IdentityApi, NotificationPublisher, SecretStore};

    /// Compile-time check: every driver can stand in for its port.
    #[test]
    fn drivers_coerce_to_ports() {
        fn _wire(services: AwsServices) {
            let _: Arc<dyn ComputeApi> = services.compute;
            let _: Arc<dyn IdentityApi> = services.identity;
            let _: Arc<dyn SecretStore> = services.secrets;
            let _: Arc<dyn NotificationPublisher> = services.publisher;
        }
    }
}
