//! Sink and backend interfaces

use crate::error::MetricsResult;
use crate::store::MetricsBatch;
use async_trait::async_trait;
use std::fmt::Debug;
use tokio_util::sync::CancellationToken;

/// Destination for reported metrics
///
/// Report methods must never block on I/O or fail; they are called directly
/// from application code.
pub trait MetricsSink: Send + Sync + Debug {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Start any background machinery, bound to `cancel`
    ///
    /// Called once by the facade builder. A sink is never restarted after
    /// its token is cancelled.
    fn init(&self, cancel: CancellationToken) -> MetricsResult<()>;

    /// Report a delta for a counter
    fn report_count(&self, name: &str, value: f64);

    /// Report the current value of a gauge
    fn report_value(&self, name: &str, value: f64);

    /// Report one sample of a distribution
    fn report_distribution(&self, name: &str, value: f64);
}

/// Delivery step used by [`BufferedSink`](super::BufferedSink)
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MetricsBackend: Send + Sync + 'static {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Acquire resources needed for delivery
    ///
    /// Runs inside the Tokio runtime the flush loop will use.
    fn initialize(&self) -> MetricsResult<()> {
        Ok(())
    }

    /// Deliver one drained batch
    async fn transmit(&self, batch: &MetricsBatch) -> MetricsResult<()>;
}
