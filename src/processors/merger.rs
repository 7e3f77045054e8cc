use crate::models::StationMap;

/// Folds per-partition partial aggregates into one global map. The merger
/// is the only writer of the accumulator it returns, and the result does
/// not depend on the order in which partials arrive.
pub struct StatsMerger;

impl StatsMerger {
    pub fn new() -> Self {
        Self
    }

    /// Merge all partial aggregates into a single global result.
    pub fn merge_partials(&self, partials: Vec<StationMap>) -> StationMap {
        let mut totals = StationMap::new();
        for partial in partials {
            self.merge_into(&mut totals, partial);
        }
        totals
    }

    /// Fold one partial aggregate into the accumulator, consuming it.
    pub fn merge_into(&self, totals: &mut StationMap, partial: StationMap) {
        for (station, stats) in partial {
            match totals.get_mut(&station) {
                Some(existing) => existing.merge(&stats),
                None => {
                    totals.insert(station, stats);
                }
            }
        }
    }
}

impl Default for StatsMerger {
    fn default() -> Self {
        Self::new()
    }
}
