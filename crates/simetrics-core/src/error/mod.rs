//! Error types for SiMetrics
//!
//! Errors only surface from construction paths (loading configuration,
//! initializing a sink, building a facade). The reporting path never returns
//! an error; transmit failures are logged by the flush loop and dropped.

mod conversions;
mod types;


pub use types::{MetricsError, MetricsResult};
