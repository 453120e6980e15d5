//! Logger builder

mod format;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{Config, Fields, Format};
use crate::error::{LogError, LogResult};
use crate::writer;

/// Logger builder
#[derive(Debug, Clone, Default)]
pub struct LoggerBuilder {
    config: Config,
}

/// Keeps the root span entered for as long as it lives.
///
/// Hold it for the lifetime of `main`.
#[must_use = "dropping the guard exits the root span"]
pub struct LoggerGuard {
    _root_span: Option<tracing::span::EnteredSpan>,
}

impl LoggerBuilder {
    /// Create builder from config
    #[must_use]
    pub fn from_config(config: Config) -> Self {
        Self { config }
    }

    /// Override the filter directives
    #[must_use]
    pub fn level(mut self, level: impl Into<String>) -> Self {
        self.config.level = level.into();
        self
    }

    /// Override the output format
    #[must_use]
    pub fn format(mut self, format: Format) -> Self {
        self.config.format = format;
        self
    }

    /// Override the global fields
    #[must_use]
    pub fn fields(mut self, fields: Fields) -> Self {
        self.config.fields = fields;
        self
    }

    /// Install the global subscriber.
    ///
    /// # Errors
    ///
    /// - the filter directives cannot be parsed
    /// - a global subscriber is already installed
    pub fn build(self) -> LogResult<LoggerGuard> {
        let filter = parse_filter(&self.config.level)?;
        let writer = writer::make_writer(self.config.writer);

        tracing_subscriber::registry()
            .with(filter)
            .with(format::fmt_layer(
                self.config.format,
                &self.config.display,
                writer,
            ))
            .try_init()
            .map_err(|e| LogError::AlreadyInitialized(e.to_string()))?;

        let fields = &self.config.fields;
        let root_span = (!fields.is_empty()).then(|| {
            tracing::info_span!(
                "bulwark",
                service = fields.service.as_deref().unwrap_or(""),
                env = fields.env.as_deref().unwrap_or(""),
                version = fields.version.as_deref().unwrap_or(""),
                region = fields.region.as_deref().unwrap_or("")
            )
            .entered()
        });

        Ok(LoggerGuard {
            _root_span: root_span,
        })
    }
}

impl LoggerGuard {
    /// Guard for a logger that was installed elsewhere.
    pub(crate) fn noop() -> Self {
        Self { _root_span: None }
    }
}

pub(crate) fn parse_filter(directives: &str) -> LogResult<EnvFilter> {
    EnvFilter::try_new(directives).map_err(|e| LogError::Filter {
        filter: directives.to_owned(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_malformed_filter() {
        let err = parse_filter("info,bulwark=loud").unwrap_err();
        assert!(matches!(err, LogError::Filter { .. }));
    }

    #[test]
    fn accepts_crate_directives() {
        assert!(parse_filter("warn,bulwark_responder=debug").is_ok());
    }
}
