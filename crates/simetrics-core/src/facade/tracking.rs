//! Periodic sampling of variables and functions

use super::metrics::Metrics;
use crate::concurrency::{PeriodicTask, TaskHandle};
use crate::sink::MetricsSink;
use std::future;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};
use tokio_util::sync::CancellationToken;
use tracing::warn;

/// An `f64` that can be shared with a tracker without locking
#[derive(Debug, Default)]
pub struct TrackedFloat(AtomicU64);

impl TrackedFloat {
    pub fn new(value: f64) -> Self {
        Self(AtomicU64::new(value.to_bits()))
    }

    pub fn get(&self) -> f64 {
        f64::from_bits(self.0.load(Ordering::Relaxed))
    }

    pub fn set(&self, value: f64) {
        self.0.store(value.to_bits(), Ordering::Relaxed);
    }
}

/// Handle to one tracker
///
/// Stopping it leaves sibling trackers running.
/// [`Metrics::stop_tracking_vars`] stops all of them at once.
#[derive(Debug)]
pub struct TrackingMetric {
    name: String,
    token: CancellationToken,
    task: Option<TaskHandle>,
}

impl TrackingMetric {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stop(&self) {
        self.token.cancel();
    }

    pub fn is_stopped(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Wait for the sampling task to exit after it was stopped
    pub async fn join(self) {
        if let Some(task) = self.task {
            task.join().await;
        }
    }
}

fn report_sample(sink: &dyn MetricsSink, name: &str, value: f64) {
    if !value.is_nan() {
        sink.report_value(name, value);
    }
}

impl Metrics {
    fn spawn_tracker<F>(&self, name: &str, mut sample: F) -> TrackingMetric
    where
        F: FnMut() -> f64 + Send + 'static,
    {
        let full_name = self.qualify(name);
        let token = self.tracking.child_token();
        let sink = Arc::clone(&self.sink);
        let metric = full_name.clone();

        let spawned = PeriodicTask::new(format!("track {}", full_name), self.track_vars_period)
            .spawn(token.clone(), move || {
                report_sample(sink.as_ref(), &metric, sample());
                future::ready(())
            });

        let task = match spawned {
            Ok(task) => Some(task),
            Err(e) => {
                warn!(metric = %full_name, error = %e, "Failed to start tracking");
                token.cancel();
                None
            }
        };

        TrackingMetric {
            name: full_name,
            token,
            task,
        }
    }

    /// Report the current value of `var` as a gauge every period
    pub fn track_var_int(&self, name: &str, var: Arc<AtomicI64>) -> TrackingMetric {
        self.spawn_tracker(name, move || var.load(Ordering::Relaxed) as f64)
    }

    /// Report the current value of `var` as a gauge every period
    pub fn track_var_float(&self, name: &str, var: Arc<TrackedFloat>) -> TrackingMetric {
        self.spawn_tracker(name, move || var.get())
    }

    /// Call `f` every period and report its result as a gauge
    pub fn track_func_int<F>(&self, name: &str, f: F) -> TrackingMetric
    where
        F: Fn() -> i64 + Send + 'static,
    {
        self.spawn_tracker(name, move || f() as f64)
    }

    /// Call `f` every period and report its result as a gauge; NaN is skipped
    pub fn track_func_float<F>(&self, name: &str, f: F) -> TrackingMetric
    where
        F: Fn() -> f64 + Send + 'static,
    {
        self.spawn_tracker(name, f)
    }

    /// Stop every tracker started from this facade or any view of it
    pub fn stop_tracking_vars(&self) {
        self.tracking.cancel();
    }
}
