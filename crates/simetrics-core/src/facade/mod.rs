//! Public instrumentation surface
//!
//! [`Metrics`] prefixes every name with its namespace, drops NaN samples and
//! forwards to the active sink. It is cheap to clone and derive views from.

mod builder;
mod factory;
mod metrics;
mod options;
mod timer;
mod tracking;


pub use builder::MetricsBuilder;
pub use metrics::Metrics;
pub use options::{MetricsOptions, binary_name, resolve_namespace, resolve_namespace_with};
pub use timer::TimeSinceGuard;
pub use tracking::{TrackedFloat, TrackingMetric};
