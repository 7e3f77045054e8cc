use crate::error::{ProcessingError, Result};
use crate::models::Partition;
use crate::utils::constants::{MAX_RECORD_LENGTH, RECORD_TERMINATOR};
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;
use tracing::debug;

/// Splits a measurements file into record-aligned byte ranges without
/// reading the whole file: each cut point is found by scanning a bounded
/// window backwards from the target split position for the last record
/// terminator.
pub struct Partitioner {
    max_record_length: usize,
}

impl Partitioner {
    pub fn new() -> Self {
        Self {
            max_record_length: MAX_RECORD_LENGTH,
        }
    }

    pub fn with_max_record_length(max_record_length: usize) -> Self {
        Self { max_record_length }
    }

    /// Partition a file on disk into `desired_count` record-aligned ranges.
    pub fn partition_file(&self, path: &Path, desired_count: usize) -> Result<Vec<Partition>> {
        let mut file = File::open(path)?;
        let file_len = file.metadata()?.len();
        self.compute_partitions(&mut file, file_len, desired_count)
    }

    /// Compute record-aligned partitions over any seekable byte source.
    ///
    /// The returned partitions tile `[0, file_len)` exactly; every interior
    /// boundary falls immediately after a record terminator. Fewer than
    /// `desired_count` partitions are returned when the file is exhausted
    /// before all slots are used.
    pub fn compute_partitions<R: Read + Seek>(
        &self,
        source: &mut R,
        file_len: u64,
        desired_count: usize,
    ) -> Result<Vec<Partition>> {
        if desired_count == 0 {
            return Err(ProcessingError::Config(
                "partition count must be at least 1".to_string(),
            ));
        }
        if file_len == 0 {
            return Ok(Vec::new());
        }

        let split_size = file_len / desired_count as u64;
        debug!(file_len, split_size, desired_count, "computing partitions");

        let mut window = vec![0u8; self.max_record_length];
        let mut partitions = Vec::with_capacity(desired_count);
        let mut offset = 0u64;

        for index in 0..desired_count {
            if offset >= file_len {
                break;
            }

            // The last slot takes everything that remains.
            if index == desired_count - 1 {
                partitions.push(Partition::new(offset, file_len - offset));
                break;
            }

            let seek_offset = (offset + split_size).saturating_sub(self.max_record_length as u64);
            source.seek(SeekFrom::Start(seek_offset))?;
            let filled = read_window(source, &mut window)?;
            let chunk = &window[..filled];

            let terminator = chunk
                .iter()
                .rposition(|&byte| byte == RECORD_TERMINATOR)
                .ok_or(ProcessingError::BoundaryNotFound {
                    offset: seek_offset,
                    window: filled,
                })?;

            let next_offset = seek_offset + terminator as u64 + 1;
            if next_offset <= offset {
                // The scan window ended at or before the running offset; the
                // remaining bytes fall to later slots.
                continue;
            }

            partitions.push(Partition::new(offset, next_offset - offset));
            offset = next_offset;
        }

        Ok(partitions)
    }
}

impl Default for Partitioner {
    fn default() -> Self {
        Self::new()
    }
}

/// Fill `buf` from `source`, tolerating a short read at end of input.
fn read_window<R: Read>(source: &mut R, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        let n = source.read(&mut buf[filled..])?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    Ok(filled)
}
