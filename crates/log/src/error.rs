//! Logging bootstrap errors

use thiserror::Error;

/// Failure to install the logger
#[derive(Debug, Error)]
pub enum LogError {
    /// Filter directives could not be parsed
    #[error("invalid log filter '{filter}': {reason}")]
    Filter {
        /// Directives as given
        filter: String,
        /// Parser message
        reason: String,
    },

    /// A global subscriber is already installed
    #[error("logger already initialized: {0}")]
    AlreadyInitialized(String),
}

/// Result alias for logging setup
pub type LogResult<T> = Result<T, LogError>;
