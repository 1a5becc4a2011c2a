//! Facade options and namespace resolution

use crate::config::MetricsConfig;
use crate::config::defaults::DEFAULT_PERIOD;
use std::path::Path;
use std::time::Duration;

/// Pure configuration for a [`Metrics`](super::Metrics) facade
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsOptions {
    /// Sampling period for tracked variables and functions
    pub track_vars_period: Duration,
    /// Namespace prefix; a `%s` is replaced with the binary name
    pub namespace_format: String,
}

impl Default for MetricsOptions {
    fn default() -> Self {
        Self {
            track_vars_period: DEFAULT_PERIOD,
            namespace_format: String::new(),
        }
    }
}

impl MetricsOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_track_vars_period(mut self, period: Duration) -> Self {
        self.track_vars_period = period;
        self
    }

    pub fn with_namespace_format(mut self, format: impl Into<String>) -> Self {
        self.namespace_format = format.into();
        self
    }

    /// Tracking period with zero mapped to the default
    pub fn effective_track_vars_period(&self) -> Duration {
        if self.track_vars_period.is_zero() {
            DEFAULT_PERIOD
        } else {
            self.track_vars_period
        }
    }
}

impl From<&MetricsConfig> for MetricsOptions {
    fn from(config: &MetricsConfig) -> Self {
        Self {
            track_vars_period: config.track_vars_period,
            namespace_format: config.namespace_format.clone(),
        }
    }
}

/// Base name of the running executable, or an empty string if unknown
pub fn binary_name() -> String {
    std::env::args_os()
        .next()
        .as_deref()
        .map(Path::new)
        .and_then(Path::file_name)
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Resolve a namespace format against the running executable's name
pub fn resolve_namespace(format: &str) -> String {
    if format.contains("%s") {
        resolve_namespace_with(format, &binary_name())
    } else {
        format.to_string()
    }
}

/// Replace the first `%s` in `format` with `binary`
pub fn resolve_namespace_with(format: &str, binary: &str) -> String {
    format.replacen("%s", binary, 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_period_uses_default() {
        let options = MetricsOptions::new().with_track_vars_period(Duration::ZERO);
        assert_eq!(options.effective_track_vars_period(), Duration::from_secs(5));

        let options = options.with_track_vars_period(Duration::from_millis(10));
        assert_eq!(options.effective_track_vars_period(), Duration::from_millis(10));
    }

    #[test]
    fn test_literal_namespace() {
        assert_eq!(resolve_namespace("api."), "api.");
        assert_eq!(resolve_namespace(""), "");
    }

    #[test]
    fn test_placeholder_namespace() {
        assert_eq!(resolve_namespace_with("%s.", "worker"), "worker.");
        assert_eq!(resolve_namespace_with("prod.%s.%s", "worker"), "prod.worker.%s");
        assert_eq!(resolve_namespace("%s."), format!("{}.", binary_name()));
    }

    #[test]
    fn test_options_from_config() {
        let config = MetricsConfig {
            namespace_format: "svc.".to_string(),
            track_vars_period: Duration::from_secs(1),
            ..Default::default()
        };
        let options = MetricsOptions::from(&config);
        assert_eq!(options.namespace_format, "svc.");
        assert_eq!(options.track_vars_period, Duration::from_secs(1));
    }
}
