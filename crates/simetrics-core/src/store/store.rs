//! Mutex-guarded metric store

use super::types::{MetricsBatch, PendingScalar};
use crate::distribution::Distribution;
use parking_lot::Mutex;
use std::collections::HashMap;

#[derive(Debug, Default)]
struct StoreInner {
    scalars: HashMap<String, PendingScalar>,
    distributions: HashMap<String, Distribution>,
}

/// Pending aggregates for one sink
///
/// Every operation holds the lock only for the map mutation itself. Callers
/// must not submit NaN; filtering happens in the facade.
#[derive(Debug, Default)]
pub struct MetricStore {
    inner: Mutex<StoreInner>,
}

impl MetricStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `value` to the pending counter for `name`
    pub fn report_count(&self, name: &str, value: f64) {
        let mut guard = self.inner.lock();
        let inner = &mut *guard;
        match inner.scalars.get_mut(name) {
            Some(slot) => *slot = PendingScalar::Counter(slot.value() + value),
            None => {
                inner
                    .scalars
                    .insert(name.to_string(), PendingScalar::Counter(value));
            }
        }
    }

    /// Overwrite the pending gauge for `name`
    pub fn report_value(&self, name: &str, value: f64) {
        let mut guard = self.inner.lock();
        guard
            .scalars
            .insert(name.to_string(), PendingScalar::Gauge(value));
    }

    /// Add a sample to the pending distribution for `name`
    pub fn report_distribution(&self, name: &str, value: f64) {
        let mut guard = self.inner.lock();
        let inner = &mut *guard;
        match inner.distributions.get_mut(name) {
            Some(dist) => dist.add_entry(value),
            None => {
                inner
                    .distributions
                    .insert(name.to_string(), Distribution::from_value(value));
            }
        }
    }

    /// Take everything pending and leave the store empty
    ///
    /// The swap happens under a single lock acquisition, so each report lands
    /// in exactly one batch.
    pub fn drain_and_reset(&self) -> MetricsBatch {
        let drained = std::mem::take(&mut *self.inner.lock());
        MetricsBatch::from_parts(drained.scalars, drained.distributions)
    }

    /// Number of distinct pending metric names
    pub fn len(&self) -> usize {
        let guard = self.inner.lock();
        guard.scalars.len() + guard.distributions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
