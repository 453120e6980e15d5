//! Configuration presets

use super::{Config, DisplayConfig, Fields, Format};

impl Config {
    /// Configuration from environment variables.
    ///
    /// - `BULWARK_LOG`, then `RUST_LOG`: filter directives
    /// - `BULWARK_LOG_FORMAT`: `pretty`, `compact` or `json`
    /// - `BULWARK_LOG_TIME`, `BULWARK_LOG_SOURCE`, `BULWARK_LOG_COLORS`
    /// - global fields, see [`Fields::from_env`]
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(&|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(level) = lookup("BULWARK_LOG").or_else(|| lookup("RUST_LOG")) {
            config.level = level;
        }

        if let Some(format) = lookup("BULWARK_LOG_FORMAT") {
            config.format = format.parse().unwrap_or(Format::Compact);
        }

        config.display.apply_env(lookup);
        config.fields = Fields::from_lookup(lookup);
        config
    }

    /// Development configuration (pretty, debug level, quiet SDK internals)
    #[must_use]
    pub fn development() -> Self {
        Self {
            level: "debug,aws_smithy_runtime=info,aws_config=info,hyper=info".to_string(),
            format: Format::Pretty,
            display: DisplayConfig {
                colors: true,
                source: true,
                ..DisplayConfig::default()
            },
            ..Self::default()
        }
    }

    /// Production configuration (JSON, info level)
    #[must_use]
    pub fn production() -> Self {
        Self {
            level: "info".to_string(),
            format: Format::Json,
            display: DisplayConfig {
                colors: false,
                source: false,
                flatten: true,
                ..DisplayConfig::default()
            },
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn env<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key| {
            vars.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| (*v).to_string())
        }
    }

    #[test]
    fn bulwark_log_wins_over_rust_log() {
        let config = Config::from_lookup(&env(&[
            ("RUST_LOG", "trace"),
            ("BULWARK_LOG", "warn,bulwark_responder=debug"),
        ]));
        assert_eq!(config.level, "warn,bulwark_responder=debug");
    }

    #[test]
    fn falls_back_to_rust_log() {
        let config = Config::from_lookup(&env(&[("RUST_LOG", "debug")]));
        assert_eq!(config.level, "debug");
    }

    #[test]
    fn unknown_format_falls_back_to_compact() {
        let config = Config::from_lookup(&env(&[("BULWARK_LOG_FORMAT", "xml")]));
        assert_eq!(config.format, Format::Compact);

        let config = Config::from_lookup(&env(&[("BULWARK_LOG_FORMAT", "json")]));
        assert_eq!(config.format, Format::Json);
    }

    #[test]
    fn fields_come_from_env() {
        let config = Config::from_lookup(&env(&[
            ("BULWARK_SERVICE", "bulwark"),
            ("AWS_REGION", "eu-west-1"),
        ]));
        assert_eq!(config.fields.service.as_deref(), Some("bulwark"));
        assert_eq!(config.fields.region.as_deref(), Some("eu-west-1"));
        assert!(config.fields.env.is_none());
    }

    #[test]
    fn production_is_json_without_colors() {
        let config = Config::production();
        assert_eq!(config.format, Format::Json);
        assert!(!config.display.colors);
    }
}
