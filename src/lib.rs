//! SiMetrics
//!
//! Lightweight application-side metrics. Report through a [`Metrics`] facade;
//! a background task flushes aggregated values to the configured backend.
//!
//! ```
//! use simetrics::Metrics;
//!
//! let metrics = Metrics::empty().with_namespace_prefix("api.");
//! metrics.increment("requests");
//! metrics.value("queue_depth", 12.0);
//! metrics.distribution("payload_bytes", 512.0);
//! assert_eq!(metrics.namespace(), "api.");
//! ```

pub use simetrics_core::*;
