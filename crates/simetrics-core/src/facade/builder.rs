//! Facade builder

use super::metrics::Metrics;
use super::options::{MetricsOptions, resolve_namespace};
use crate::error::MetricsResult;
use crate::sink::MetricsSink;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Configures a [`Metrics`] facade over a sink
///
/// Creating a builder never fails; [`MetricsBuilder::build`] starts the sink
/// and is the only fallible step.
#[derive(Debug)]
pub struct MetricsBuilder {
    options: MetricsOptions,
    sink: Arc<dyn MetricsSink>,
}

impl MetricsBuilder {
    pub fn new(options: MetricsOptions, sink: Arc<dyn MetricsSink>) -> Self {
        Self { options, sink }
    }

    pub fn options(&self) -> &MetricsOptions {
        &self.options
    }

    pub fn with_options(mut self, options: MetricsOptions) -> Self {
        self.options = options;
        self
    }

    /// Initialize the sink and assemble the facade
    ///
    /// On error the caller should fall back to [`Metrics::empty`].
    pub fn build(self) -> MetricsResult<Metrics> {
        let root = CancellationToken::new();
        if let Err(e) = self.sink.init(root.child_token()) {
            root.cancel();
            return Err(e);
        }

        let tracking = root.child_token();
        let namespace = resolve_namespace(&self.options.namespace_format);
        let period = self.options.effective_track_vars_period();
        info!(
            sink = self.sink.name(),
            namespace = %namespace,
            "Metrics initialized"
        );

        Ok(Metrics::from_parts(
            self.sink,
            namespace.into(),
            period,
            root,
            tracking,
        ))
    }
}
