//! Metric sinks
//!
//! A sink accepts reports from the facade. The no-op [`EmptySink`] discards
//! them; every other sink is a [`BufferedSink`] that aggregates reports in a
//! [`MetricStore`](crate::store::MetricStore) and periodically hands the
//! drained batch to a [`MetricsBackend`]:
//!
//! - [`StdoutBackend`]: prints each metric to the console
//! - [`LibratoBackend`]: posts to the Librato metrics API
//! - [`DogStatsdBackend`]: sends statsd datagrams over UDP

mod buffered;
mod dogstatsd;
mod empty;
mod factory;
mod librato;
mod source;
mod stdout;
mod traits;


pub use buffered::{BufferedSink, SUBMIT_PERIOD};
pub use dogstatsd::{DogStatsdBackend, DogStatsdSink, MAX_DATAGRAM_SIZE};
pub use empty::EmptySink;
pub use factory::{SinkKind, sink_from_config};
pub use librato::{LibratoBackend, LibratoSink};
pub use source::resolve_source;
pub use stdout::{StdoutBackend, StdoutSink};
pub use traits::{MetricsBackend, MetricsSink};

#[cfg(test)]
pub use traits::MockMetricsBackend;
