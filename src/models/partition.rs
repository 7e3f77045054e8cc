use serde::{Deserialize, Serialize};

/// A contiguous, record-aligned byte range of the input file, assigned to
/// exactly one scan worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partition {
    pub offset: u64,
    pub size: u64,
}

impl Partition {
    pub fn new(offset: u64, size: u64) -> Self {
        Self { offset, size }
    }

    /// First byte position past the end of the partition.
    pub fn end(&self) -> u64 {
        self.offset + self.size
    }
}
