pub mod partition;
pub mod stats;

pub use partition::Partition;
pub use stats::{StationMap, StationStats, StationSummary};
