//! Sink selection from configuration

use super::buffered::BufferedSink;
use super::dogstatsd::DogStatsdBackend;
use super::empty::EmptySink;
use super::librato::LibratoBackend;
use super::stdout::StdoutBackend;
use super::traits::MetricsSink;
use crate::config::MetricsConfig;
use std::sync::Arc;
use tracing::{info, warn};

/// Supported sink kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkKind {
    Empty,
    Stdout,
    Librato,
    DogStatsd,
}

impl SinkKind {
    /// Parse a backend selector, case-insensitively
    ///
    /// Returns `None` for empty or unknown selectors.
    pub fn from_selector(selector: &str) -> Option<Self> {
        match selector.trim().to_ascii_lowercase().as_str() {
            "none" | "empty" => Some(Self::Empty),
            "stdout" | "console" => Some(Self::Stdout),
            "librato" => Some(Self::Librato),
            "dogstatsd" | "statsd" => Some(Self::DogStatsd),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Empty => "none",
            Self::Stdout => "stdout",
            Self::Librato => "librato",
            Self::DogStatsd => "dogstatsd",
        }
    }
}

/// Build the sink named by `config.backend`
///
/// Unknown selectors fall back to [`EmptySink`] so that a typo never takes
/// the host application down.
pub fn sink_from_config(config: &MetricsConfig) -> Arc<dyn MetricsSink> {
    let period = config.effective_flush_period();

    match SinkKind::from_selector(&config.backend) {
        Some(SinkKind::Empty) => {
            info!("Metrics reporting is explicitly disabled.");
            Arc::new(EmptySink)
        }
        Some(SinkKind::Stdout) => {
            info!("Reporting metrics to stdout");
            Arc::new(BufferedSink::new(StdoutBackend).with_flush_period(period))
        }
        Some(SinkKind::Librato) => {
            info!("Reporting metrics to Librato");
            let librato = config.librato.clone().unwrap_or_default();
            Arc::new(LibratoBackend::new(&librato, period).into_sink())
        }
        Some(SinkKind::DogStatsd) => {
            let dogstatsd = config.dogstatsd.clone().unwrap_or_default();
            info!(address = %dogstatsd.address, "Reporting metrics to DogStatsD");
            Arc::new(BufferedSink::new(DogStatsdBackend::new(&dogstatsd)).with_flush_period(period))
        }
        None => {
            warn!(
                backend = %config.backend,
                "Undefined or unknown backend. Not sending any metrics..."
            );
            Arc::new(EmptySink)
        }
    }
}
