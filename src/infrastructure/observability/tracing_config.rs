use crate::presentation::config::LoggingSettings;

use super::DEFAULT_LOG_FILTER;

pub const LOG_FORMAT_VAR: &str = "LOG_FORMAT";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingConfig {
    pub environment: String,
    pub filter: String,
    pub json_format: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self::new("local", DEFAULT_LOG_FILTER, false)
    }
}

impl TracingConfig {
    pub fn new(environment: impl Into<String>, filter: impl Into<String>, json_format: bool) -> Self {
        Self {
            environment: environment.into(),
            filter: filter.into(),
            json_format,
        }
    }

    /// `LOG_FORMAT=json|text`, when set, wins over `logging.enable_json`.
    pub fn from_settings(environment: impl Into<String>, logging: &LoggingSettings) -> Self {
        let json_format = match std::env::var(LOG_FORMAT_VAR) {
            Ok(format) => format.eq_ignore_ascii_case("json"),
            Err(_) => logging.enable_json,
        };
        Self::new(environment, logging.level.clone(), json_format)
    }
}
