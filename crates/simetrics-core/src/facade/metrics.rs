//! The metrics facade

use super::timer::TimeSinceGuard;
use crate::config::defaults::DEFAULT_PERIOD;
use crate::sink::{EmptySink, MetricsSink};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;

/// Namespaced handle for reporting metrics
///
/// Reporting never fails and never blocks on I/O. NaN values are dropped.
/// Clones and [`Metrics::with_namespace_prefix`] views share the same sink
/// and background tasks.
#[derive(Debug, Clone)]
pub struct Metrics {
    pub(super) sink: Arc<dyn MetricsSink>,
    pub(super) namespace: Arc<str>,
    pub(super) track_vars_period: Duration,
    root: CancellationToken,
    pub(super) tracking: CancellationToken,
}

impl Metrics {
    pub(super) fn from_parts(
        sink: Arc<dyn MetricsSink>,
        namespace: Arc<str>,
        track_vars_period: Duration,
        root: CancellationToken,
        tracking: CancellationToken,
    ) -> Self {
        Self {
            sink,
            namespace,
            track_vars_period,
            root,
            tracking,
        }
    }

    /// A facade that discards everything; never fails
    pub fn empty() -> Self {
        let root = CancellationToken::new();
        let tracking = root.child_token();
        Self::from_parts(
            Arc::new(EmptySink),
            Arc::from(""),
            DEFAULT_PERIOD,
            root,
            tracking,
        )
    }

    pub(super) fn qualify(&self, name: &str) -> String {
        let mut full = String::with_capacity(self.namespace.len() + name.len());
        full.push_str(&self.namespace);
        full.push_str(name);
        full
    }

    /// Add `value` to a counter
    pub fn count(&self, name: &str, value: f64) {
        if value.is_nan() {
            return;
        }
        self.sink.report_count(&self.qualify(name), value);
    }

    pub fn increment(&self, name: &str) {
        self.count(name, 1.0);
    }

    pub fn decrement(&self, name: &str) {
        self.count(name, -1.0);
    }

    /// Set a gauge
    pub fn value(&self, name: &str, value: f64) {
        if value.is_nan() {
            return;
        }
        self.sink.report_value(&self.qualify(name), value);
    }

    /// Add a distribution sample
    pub fn distribution(&self, name: &str, value: f64) {
        if value.is_nan() {
            return;
        }
        self.sink.report_distribution(&self.qualify(name), value);
    }

    /// Record the milliseconds elapsed since `start` as a distribution sample
    pub fn time_since(&self, name: &str, start: Instant) {
        self.distribution(name, start.elapsed().as_secs_f64() * 1000.0);
    }

    /// Run `f` and record its duration under `name`
    pub fn timed<T>(&self, name: &str, f: impl FnOnce() -> T) -> T {
        let start = Instant::now();
        let result = f();
        self.time_since(name, start);
        result
    }

    /// Start a timer that records under `name` when dropped
    pub fn start_timer(&self, name: &str) -> TimeSinceGuard {
        TimeSinceGuard::new(self.clone(), name)
    }

    /// Derive a view whose namespace is extended by `extra`
    pub fn with_namespace_prefix(&self, extra: &str) -> Self {
        Self {
            namespace: Arc::from(self.qualify(extra)),
            ..self.clone()
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn sink(&self) -> &Arc<dyn MetricsSink> {
        &self.sink
    }

    pub fn track_vars_period(&self) -> Duration {
        self.track_vars_period
    }

    /// Stop the flush loop and every tracker
    ///
    /// Affects every clone and derived view. Pending reports are not flushed.
    pub fn shutdown(&self) {
        self.root.cancel();
    }

    pub fn is_shut_down(&self) -> bool {
        self.root.is_cancelled()
    }
}
