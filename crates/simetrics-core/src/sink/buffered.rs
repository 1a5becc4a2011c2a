//! Sink that aggregates reports and flushes them periodically

use super::traits::{MetricsBackend, MetricsSink};
use crate::concurrency::{PeriodicTask, TaskHandle};
use crate::error::{MetricsError, MetricsResult};
use crate::store::MetricStore;
use parking_lot::Mutex;
use std::fmt;
use std::sync::{Arc, OnceLock};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Default interval between flushes
pub const SUBMIT_PERIOD: Duration = Duration::from_secs(5);

/// Aggregating sink generic over its delivery backend
pub struct BufferedSink<B: MetricsBackend> {
    backend: Arc<B>,
    store: Arc<MetricStore>,
    flush_period: Duration,
    task: Mutex<Option<TaskHandle>>,
    cancel: OnceLock<CancellationToken>,
}

impl<B: MetricsBackend> BufferedSink<B> {
    /// Create a sink flushing every [`SUBMIT_PERIOD`]
    pub fn new(backend: B) -> Self {
        Self {
            backend: Arc::new(backend),
            store: Arc::new(MetricStore::new()),
            flush_period: SUBMIT_PERIOD,
            task: Mutex::new(None),
            cancel: OnceLock::new(),
        }
    }

    /// Override the flush interval; zero keeps [`SUBMIT_PERIOD`]
    pub fn with_flush_period(mut self, period: Duration) -> Self {
        self.flush_period = if period.is_zero() {
            SUBMIT_PERIOD
        } else {
            period
        };
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Pending aggregates not yet flushed
    pub fn store(&self) -> &MetricStore {
        &self.store
    }

    pub fn flush_period(&self) -> Duration {
        self.flush_period
    }

    /// Whether the flush loop is currently alive
    pub fn is_running(&self) -> bool {
        self.task
            .lock()
            .as_ref()
            .is_some_and(|task| !task.is_stopped())
    }

    /// Reports are dropped once the flush loop has been cancelled
    fn accepts_reports(&self) -> bool {
        !self.cancel.get().is_some_and(|token| token.is_cancelled())
    }
}

/// Drain the store and hand the batch to the backend, logging any failure
async fn flush_once<B: MetricsBackend>(store: &MetricStore, backend: &B) {
    let batch = store.drain_and_reset();
    debug!(
        sink = backend.name(),
        batch_size = batch.len(),
        "Posting metrics..."
    );

    if let Err(e) = backend.transmit(&batch).await {
        warn!(sink = backend.name(), error = %e, "Failed to post metrics");
    }
}

impl<B: MetricsBackend> MetricsSink for BufferedSink<B> {
    fn name(&self) -> &str {
        self.backend.name()
    }

    fn init(&self, cancel: CancellationToken) -> MetricsResult<()> {
        let mut task = self.task.lock();
        if task.is_some() {
            return Err(MetricsError::AlreadyInitialized(self.backend.name().to_string()));
        }

        let runtime = Handle::try_current()
            .map_err(|_| MetricsError::NoRuntime(format!("{} flush", self.backend.name())))?;
        {
            let _guard = runtime.enter();
            self.backend.initialize()?;
        }

        let store = Arc::clone(&self.store);
        let backend = Arc::clone(&self.backend);
        let handle = PeriodicTask::new(format!("{} flush", self.backend.name()), self.flush_period)
            .spawn(cancel.clone(), move || {
                let store = Arc::clone(&store);
                let backend = Arc::clone(&backend);
                async move { flush_once(&store, backend.as_ref()).await }
            })?;

        info!(
            sink = self.backend.name(),
            period_ms = self.flush_period.as_millis() as u64,
            "Metrics sink started"
        );
        *task = Some(handle);
        let _ = self.cancel.set(cancel);
        Ok(())
    }

    fn report_count(&self, name: &str, value: f64) {
        if self.accepts_reports() {
            self.store.report_count(name, value);
        }
    }

    fn report_value(&self, name: &str, value: f64) {
        if self.accepts_reports() {
            self.store.report_value(name, value);
        }
    }

    fn report_distribution(&self, name: &str, value: f64) {
        if self.accepts_reports() {
            self.store.report_distribution(name, value);
        }
    }
}

impl<B: MetricsBackend> fmt::Debug for BufferedSink<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BufferedSink")
            .field("backend", &self.backend.name())
            .field("flush_period", &self.flush_period)
            .field("pending", &self.store.len())
            .field("running", &self.is_running())
            .finish()
    }
}

impl<B: MetricsBackend> Drop for BufferedSink<B> {
    fn drop(&mut self) {
        if let Some(task) = self.task.get_mut().as_ref() {
            task.stop();
        }
    }
}
