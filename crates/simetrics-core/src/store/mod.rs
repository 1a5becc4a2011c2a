//! Per-sink aggregation buffer
//!
//! Reports are merged into a mutex-guarded store and drained as a single
//! immutable [`MetricsBatch`] on every flush tick.

mod store;
mod types;


pub use store::MetricStore;
pub use types::{MetricsBatch, PendingScalar};
