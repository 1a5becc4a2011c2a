//! SiMetrics Core Library
//!
//! Application-side metrics instrumentation: counters, gauges and
//! distributions are aggregated in memory and flushed periodically to a
//! pluggable backend (console, Librato, DogStatsD, or nowhere).

pub mod concurrency;
pub mod config;
pub mod distribution;
pub mod error;
pub mod facade;
pub mod sink;
pub mod store;

// Re-export commonly used types
pub use concurrency::{CancellationToken, PeriodicTask, TaskHandle};
pub use config::{DogStatsdConfig, LibratoConfig, MetricsConfig, load_config};
pub use distribution::Distribution;
pub use error::{MetricsError, MetricsResult};
pub use facade::{
    Metrics, MetricsBuilder, MetricsOptions, TimeSinceGuard, TrackedFloat, TrackingMetric,
};
pub use sink::{
    BufferedSink, DogStatsdSink, EmptySink, LibratoSink, MetricsBackend, MetricsSink, SinkKind,
    StdoutSink, sink_from_config,
};
pub use store::{MetricStore, MetricsBatch};
