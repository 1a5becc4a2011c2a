//! Types produced by draining a metric store

use crate::distribution::Distribution;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// A pending counter or gauge value
///
/// Counters and gauges share one key space; the tag records which kind of
/// report last touched the name.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PendingScalar {
    /// Accumulated sum of deltas
    Counter(f64),
    /// Last written value
    Gauge(f64),
}

impl PendingScalar {
    /// The raw value regardless of kind
    pub fn value(&self) -> f64 {
        match self {
            Self::Counter(v) | Self::Gauge(v) => *v,
        }
    }
}

/// Snapshot of everything reported during one flush interval
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsBatch {
    /// When the store was drained
    pub taken_at: DateTime<Utc>,
    /// Counter totals by fully-namespaced name
    pub counters: BTreeMap<String, f64>,
    /// Gauge values by fully-namespaced name
    pub gauges: BTreeMap<String, f64>,
    /// Distribution summaries by fully-namespaced name
    pub distributions: BTreeMap<String, Distribution>,
}

impl MetricsBatch {
    pub(crate) fn from_parts(
        scalars: HashMap<String, PendingScalar>,
        distributions: HashMap<String, Distribution>,
    ) -> Self {
        let mut counters = BTreeMap::new();
        let mut gauges = BTreeMap::new();
        for (name, scalar) in scalars {
            match scalar {
                PendingScalar::Counter(v) => {
                    counters.insert(name, v);
                }
                PendingScalar::Gauge(v) => {
                    gauges.insert(name, v);
                }
            }
        }

        Self {
            taken_at: Utc::now(),
            counters,
            gauges,
            distributions: distributions.into_iter().collect(),
        }
    }

    /// Whether nothing was reported during the interval
    pub fn is_empty(&self) -> bool {
        self.counters.is_empty() && self.gauges.is_empty() && self.distributions.is_empty()
    }

    /// Number of distinct metric names in the batch
    pub fn len(&self) -> usize {
        self.counters.len() + self.gauges.len() + self.distributions.len()
    }
}
