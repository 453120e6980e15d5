//! Writer and display configuration

use serde::{Deserialize, Serialize};

/// Where formatted events go
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WriterConfig {
    /// Standard error, leaving stdout for command output
    #[default]
    Stderr,
    /// Standard output
    Stdout,
}

/// Display toggles
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Show timestamps
    pub time: bool,
    /// Show source location (`file:line`)
    pub source: bool,
    /// Show target module
    pub target: bool,
    /// Show thread IDs
    pub thread_ids: bool,
    /// Show thread names
    pub thread_names: bool,
    /// Use ANSI colors
    pub colors: bool,
    /// Include the span list in JSON events
    pub span_list: bool,
    /// Put event fields at the top level of JSON events
    pub flatten: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            time: true,
            source: cfg!(debug_assertions),
            target: true,
            thread_ids: false,
            thread_names: false,
            colors: std::io::IsTerminal::is_terminal(&std::io::stderr()),
            span_list: true,
            flatten: true,
        }
    }
}

impl DisplayConfig {
    /// Apply `BULWARK_LOG_TIME`, `BULWARK_LOG_SOURCE` and `BULWARK_LOG_COLORS`.
    pub(super) fn apply_env(&mut self, lookup: &impl Fn(&str) -> Option<String>) {
        if let Some(v) = lookup("BULWARK_LOG_TIME") {
            self.time = is_enabled(&v);
        }
        if let Some(v) = lookup("BULWARK_LOG_SOURCE") {
            self.source = is_enabled(&v);
        }
        if let Some(v) = lookup("BULWARK_LOG_COLORS") {
            self.colors = is_enabled(&v);
        }
    }
}

fn is_enabled(value: &str) -> bool {
    value != "0" && !value.eq_ignore_ascii_case("false")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_toggles_override_defaults() {
        let mut display = DisplayConfig::default();
        display.apply_env(&|key| match key {
            "BULWARK_LOG_TIME" => Some("false".into()),
            "BULWARK_LOG_COLORS" => Some("1".into()),
            _ => None,
        });
        assert!(!display.time);
        assert!(display.colors);
    }
}
