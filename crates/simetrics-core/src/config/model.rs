//! Configuration data model

use super::defaults::{
    DEFAULT_BACKEND, DEFAULT_DOGSTATSD_ADDRESS, DEFAULT_PERIOD, DEFAULT_SOURCE_FORMAT,
    LIBRATO_API_URL,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Top-level metrics configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct MetricsConfig {
    /// Backend selector: `none`/`empty`, `stdout`/`console`, `librato`, `dogstatsd`/`statsd`
    pub backend: String,
    /// Namespace prefix; a `%s` is replaced with the binary name
    pub namespace_format: String,
    /// Sampling period for tracked variables and functions
    #[serde(with = "humantime_serde")]
    pub track_vars_period: Duration,
    /// Flush period for buffering sinks
    #[serde(with = "humantime_serde")]
    pub flush_period: Duration,
    /// Librato settings, used when `backend = "librato"`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub librato: Option<LibratoConfig>,
    /// DogStatsD settings, used when `backend = "dogstatsd"`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dogstatsd: Option<DogStatsdConfig>,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            backend: DEFAULT_BACKEND.to_string(),
            namespace_format: String::new(),
            track_vars_period: DEFAULT_PERIOD,
            flush_period: DEFAULT_PERIOD,
            librato: None,
            dogstatsd: None,
        }
    }
}

impl MetricsConfig {
    /// Flush period with zero mapped to the default
    pub fn effective_flush_period(&self) -> Duration {
        if self.flush_period.is_zero() {
            DEFAULT_PERIOD
        } else {
            self.flush_period
        }
    }

    /// Copy with credentials masked, for display
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if let Some(librato) = copy.librato.as_mut() {
            if !librato.token.is_empty() {
                librato.token = "********".to_string();
            }
        }
        copy
    }
}

/// Librato API settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct LibratoConfig {
    pub email: String,
    pub token: String,
    /// Source reported with each batch; `%s` expands to the host name
    pub source_format: String,
    pub api_url: String,
}

impl Default for LibratoConfig {
    fn default() -> Self {
        Self {
            email: String::new(),
            token: String::new(),
            source_format: DEFAULT_SOURCE_FORMAT.to_string(),
            api_url: LIBRATO_API_URL.to_string(),
        }
    }
}

/// DogStatsD agent settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct DogStatsdConfig {
    /// `host:port` of the agent
    pub address: String,
    /// Value of the `source:` tag; `%s` expands to the host name
    pub source_format: String,
}

impl Default for DogStatsdConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_DOGSTATSD_ADDRESS.to_string(),
            source_format: DEFAULT_SOURCE_FORMAT.to_string(),
        }
    }
}
