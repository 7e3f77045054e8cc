use crate::error::{ProcessingError, Result};
use crate::models::{Partition, StationMap};
use crate::readers::PartitionReader;
use rayon::prelude::*;
use std::path::Path;
use tokio::task::JoinHandle;
use tracing::debug;

/// Fans the partition scans out over a bounded worker pool and collects one
/// partial aggregate per partition. Workers share no mutable state; a
/// failure in any worker fails the whole read.
pub struct ConcurrentReader {
    max_workers: usize,
    use_mmap: bool,
}

impl ConcurrentReader {
    pub fn new(max_workers: usize) -> Self {
        Self {
            max_workers,
            use_mmap: false,
        }
    }

    pub fn with_mmap(mut self, use_mmap: bool) -> Self {
        self.use_mmap = use_mmap;
        self
    }

    /// Scan all partitions in parallel, returning the partial aggregates in
    /// partition order.
    pub async fn read_partitions(
        &self,
        path: &Path,
        partitions: Vec<Partition>,
    ) -> Result<Vec<StationMap>> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.max_workers)
            .build()
            .map_err(|e| ProcessingError::Config(e.to_string()))?;

        debug!(
            partitions = partitions.len(),
            max_workers = self.max_workers,
            "scanning partitions"
        );

        let path = path.to_path_buf();
        let use_mmap = self.use_mmap;

        let handle: JoinHandle<Result<Vec<StationMap>>> =
            tokio::task::spawn_blocking(move || {
                pool.install(|| {
                    partitions
                        .par_iter()
                        .map(|partition| {
                            let reader = PartitionReader::with_mmap(use_mmap);
                            reader.read_partition(&path, partition)
                        })
                        .collect()
                })
            });

        handle.await?
    }
}

impl Default for ConcurrentReader {
    fn default() -> Self {
        Self::new(num_cpus::get())
    }
}
