use crate::error::Result;
use crate::models::StationMap;
use crate::processors::{Partitioner, StatsMerger};
use crate::readers::ConcurrentReader;
use crate::utils::constants::MAX_RECORD_LENGTH;
use crate::utils::progress::ProgressReporter;
use std::path::Path;
use tracing::debug;

pub struct ParallelProcessor {
    max_workers: usize,
    max_record_length: usize,
    use_mmap: bool,
}

impl ParallelProcessor {
    pub fn new(max_workers: usize) -> Self {
        Self {
            max_workers,
            max_record_length: MAX_RECORD_LENGTH,
            use_mmap: false,
        }
    }

    pub fn with_max_record_length(mut self, max_record_length: usize) -> Self {
        self.max_record_length = max_record_length;
        self
    }

    pub fn with_mmap(mut self, use_mmap: bool) -> Self {
        self.use_mmap = use_mmap;
        self
    }

    /// Aggregate per-station statistics for the whole file: partition into
    /// record-aligned ranges, scan all ranges in parallel, then merge the
    /// partial aggregates into one global result.
    ///
    /// Any worker failure aborts the run; a partial aggregate is never
    /// reported as a complete result.
    pub async fn aggregate_file(
        &self,
        path: &Path,
        progress: Option<&ProgressReporter>,
    ) -> Result<StationMap> {
        if let Some(p) = progress {
            p.set_message("Partitioning input file...");
        }

        let partitioner = Partitioner::with_max_record_length(self.max_record_length);
        let partitions = partitioner.partition_file(path, self.max_workers)?;
        debug!(partitions = partitions.len(), "partitioned input file");

        if let Some(p) = progress {
            p.set_message(&format!("Scanning {} partitions...", partitions.len()));
        }

        let reader = ConcurrentReader::new(self.max_workers).with_mmap(self.use_mmap);
        let partials = reader.read_partitions(path, partitions).await?;

        if let Some(p) = progress {
            p.set_message("Merging partial aggregates...");
        }

        let merger = StatsMerger::new();
        let totals = merger.merge_partials(partials);

        if let Some(p) = progress {
            p.finish_with_message(&format!("Aggregated {} stations", totals.len()));
        }

        Ok(totals)
    }
}

impl Default for ParallelProcessor {
    fn default() -> Self {
        Self::new(num_cpus::get())
    }
}
