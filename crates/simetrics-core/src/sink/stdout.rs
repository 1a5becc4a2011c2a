//! Console backend

use super::buffered::BufferedSink;
use super::traits::MetricsBackend;
use crate::error::MetricsResult;
use crate::store::MetricsBatch;
use async_trait::async_trait;
use std::io::Write;

/// Console sink: aggregates and prints one line per metric every flush
pub type StdoutSink = BufferedSink<StdoutBackend>;

/// Prints batches to standard output
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutBackend;

impl StdoutBackend {
    pub fn new() -> Self {
        Self
    }

    /// Render one line per metric, counters then gauges then distributions
    pub fn render(batch: &MetricsBatch) -> Vec<String> {
        let counters = batch
            .counters
            .iter()
            .map(|(name, value)| format!("Metric report counter {}={}", name, value));
        let gauges = batch
            .gauges
            .iter()
            .map(|(name, value)| format!("Metric report gauge {}={}", name, value));
        let distributions = batch
            .distributions
            .iter()
            .map(|(name, dist)| format!("Metric report distribution {}={}", name, dist));

        counters.chain(gauges).chain(distributions).collect()
    }
}

#[async_trait]
impl MetricsBackend for StdoutBackend {
    fn name(&self) -> &'static str {
        "stdout"
    }

    async fn transmit(&self, batch: &MetricsBatch) -> MetricsResult<()> {
        if batch.is_empty() {
            return Ok(());
        }

        let lines = Self::render(batch);
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        for line in &lines {
            writeln!(out, "{}", line)?;
        }
        out.flush()?;
        Ok(())
    }
}
