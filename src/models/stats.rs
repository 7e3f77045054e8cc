use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Per-station aggregates keyed by station name. Used both for the partial
/// result of a single partition scan and for the merged global result.
pub type StationMap = HashMap<String, StationStats>;

/// Running min/max/sum/count aggregate for one station.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StationStats {
    pub min: f64,
    pub max: f64,
    pub sum: f64,
    pub count: u64,
}

impl StationStats {
    /// Aggregate seeded from the first observation, so `count` is never zero.
    pub fn new(temperature: f64) -> Self {
        Self {
            min: temperature,
            max: temperature,
            sum: temperature,
            count: 1,
        }
    }

    /// Fold one observation into the aggregate.
    pub fn record(&mut self, temperature: f64) {
        self.min = self.min.min(temperature);
        self.max = self.max.max(temperature);
        self.sum += temperature;
        self.count += 1;
    }

    /// Combine with an aggregate built from a disjoint set of records.
    /// Commutative and associative.
    pub fn merge(&mut self, other: &StationStats) {
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
        self.sum += other.sum;
        self.count += other.count;
    }

    pub fn mean(&self) -> f64 {
        self.sum / self.count as f64
    }
}

/// Report-facing projection of [`StationStats`] with the derived mean.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StationSummary {
    pub min: f64,
    pub mean: f64,
    pub max: f64,
    pub count: u64,
}

impl From<&StationStats> for StationSummary {
    fn from(stats: &StationStats) -> Self {
        Self {
            min: stats.min,
            mean: stats.mean(),
            max: stats.max,
            count: stats.count,
        }
    }
}
