//! # Bulwark Log
//!
//! Logging bootstrap for Bulwark binaries over `tracing-subscriber`.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! fn main() -> Result<(), bulwark_log::LogError> {
//!     let _guard = bulwark_log::auto_init()?;
//!
//!     tracing::info!(region = "us-east-1", "Responder starting");
//!     Ok(())
//! }
//! ```
//!
//! Events go to stderr by default so command output on stdout stays
//! machine-readable.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod builder;
mod config;
mod error;
mod writer;

pub use builder::{LoggerBuilder, LoggerGuard};
pub use config::{Config, DisplayConfig, Fields, Format, Level, WriterConfig};
pub use error::{LogError, LogResult};

/// Pick a configuration from the environment and build type, then install it.
///
/// - `BULWARK_LOG` or `RUST_LOG` set: [`Config::from_env`]
/// - debug build: [`Config::development`]
/// - otherwise: [`Config::production`]
///
/// Returns a no-op guard if a global subscriber is already installed.
pub fn auto_init() -> LogResult<LoggerGuard> {
    if tracing::dispatcher::has_been_set() {
        return Ok(LoggerGuard::noop());
    }

    let config = if std::env::var_os("BULWARK_LOG").is_some() || std::env::var_os("RUST_LOG").is_some()
    {
        Config::from_env()
    } else if cfg!(debug_assertions) {
        Config::development()
    } else {
        Config::production()
    };
    init_with(config)
}

/// Install the default configuration (compact, info).
pub fn init() -> LogResult<LoggerGuard> {
    init_with(Config::default())
}

/// Install a custom configuration.
pub fn init_with(config: Config) -> LogResult<LoggerGuard> {
    LoggerBuilder::from_config(config).build()
}
