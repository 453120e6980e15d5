//! Layered application configuration.

use std::path::Path;

use anyhow::{Context, bail};
use bulwark_driver_aws::AwsConfig;
use bulwark_responder::ResponderConfig;
use figment::Figment;
use figment::providers::{Env, Format as _, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// File picked up from the working directory when `--config` is absent.
const DEFAULT_CONFIG_FILE: &str = "bulwark.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub aws: AwsConfig,
    pub responder: ResponderConfig,
    pub log: bulwark_log::Config,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            aws: AwsConfig::default(),
            responder: ResponderConfig::default(),
            log: bulwark_log::Config::from_env(),
        }
    }
}

impl AppConfig {
    /// Defaults, then the TOML file, then `BULWARK_*` variables.
    ///
    /// `BULWARK_AWS__REGION=eu-west-1` sets `aws.region`. The flat logging
    /// variables (`BULWARK_LOG`, `BULWARK_LOG_FORMAT`) feed the defaults.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let figment = Figment::from(Serialized::defaults(Self::default()));

        let figment = match path {
            Some(path) => {
                if !path.is_file() {
                    bail!("config file {} does not exist", path.display());
                }
                figment.merge(Toml::file(path))
            }
            None => figment.merge(Toml::file(DEFAULT_CONFIG_FILE)),
        };

        figment
            .merge(Self::env())
            .extract()
            .context("invalid configuration")
    }

    fn env() -> Env {
        Env::prefixed("BULWARK_")
            .ignore(&["log", "log_format", "config"])
            .split("__")
    }
}
