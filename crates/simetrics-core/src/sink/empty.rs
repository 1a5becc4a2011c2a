//! No-op sink

use super::traits::MetricsSink;
use crate::error::MetricsResult;
use tokio_util::sync::CancellationToken;

/// Discards every report; initialization always succeeds
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptySink;

impl MetricsSink for EmptySink {
    fn name(&self) -> &str {
        "empty"
    }

    fn init(&self, _cancel: CancellationToken) -> MetricsResult<()> {
        Ok(())
    }

    fn report_count(&self, _name: &str, _value: f64) {}

    fn report_value(&self, _name: &str, _value: f64) {}

    fn report_distribution(&self, _name: &str, _value: f64) {}
}
