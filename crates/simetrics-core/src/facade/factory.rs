//! Facade construction from configuration

use super::builder::MetricsBuilder;
use super::metrics::Metrics;
use super::options::MetricsOptions;
use crate::config::MetricsConfig;
use crate::error::MetricsResult;
use crate::sink::sink_from_config;
use tracing::warn;

impl Metrics {
    /// Build a facade for `config`, failing if the sink cannot start
    pub fn try_from_config(config: &MetricsConfig) -> MetricsResult<Self> {
        MetricsBuilder::new(MetricsOptions::from(config), sink_from_config(config)).build()
    }

    /// Build a facade for `config`, falling back to [`Metrics::empty`]
    ///
    /// Must be called within a Tokio runtime for buffering sinks to start.
    pub fn from_config(config: &MetricsConfig) -> Self {
        match Self::try_from_config(config) {
            Ok(metrics) => metrics,
            Err(e) => {
                warn!(error = %e, "Failed to init the metrics. Not sending any metrics...");
                Self::empty()
            }
        }
    }
}
