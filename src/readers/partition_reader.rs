use crate::error::{ProcessingError, Result};
use crate::models::{Partition, StationMap, StationStats};
use crate::utils::constants::{DEFAULT_BUFFER_SIZE, FIELD_SEPARATOR};
use memmap2::Mmap;
use std::fs::File;
use std::io::{BufRead, BufReader, Read, Seek, SeekFrom};
use std::path::Path;

/// Scans one partition of a measurements file into a per-station partial
/// aggregate. Each reader opens its own file handle, so partitions can be
/// scanned with full parallelism and no shared file-position state.
pub struct PartitionReader {
    use_mmap: bool,
}

impl PartitionReader {
    pub fn new() -> Self {
        Self { use_mmap: false }
    }

    pub fn with_mmap(use_mmap: bool) -> Self {
        Self { use_mmap }
    }

    /// Aggregate every record inside the partition's byte range.
    pub fn read_partition(&self, path: &Path, partition: &Partition) -> Result<StationMap> {
        if self.use_mmap {
            self.read_partition_mmap(path, partition)
        } else {
            self.read_partition_buffered(path, partition)
        }
    }

    /// Scan the partition through a bounded buffered reader. The `take`
    /// limit guarantees no byte past the partition is ever consumed.
    fn read_partition_buffered(&self, path: &Path, partition: &Partition) -> Result<StationMap> {
        let mut file = File::open(path)?;
        file.seek(SeekFrom::Start(partition.offset))?;
        let bounded = file.take(partition.size);
        let reader = BufReader::with_capacity(DEFAULT_BUFFER_SIZE, bounded);

        let mut stations = StationMap::new();
        for line in reader.lines() {
            let line = line?;
            self.fold_record(&mut stations, &line, path, partition)?;
        }

        Ok(stations)
    }

    /// Scan the partition through a memory map, touching only the pages
    /// inside its byte range.
    fn read_partition_mmap(&self, path: &Path, partition: &Partition) -> Result<StationMap> {
        let file = File::open(path)?;
        let mmap = unsafe { Mmap::map(&file)? };

        let start = partition.offset as usize;
        let end = partition.end() as usize;
        if end > mmap.len() {
            return Err(ProcessingError::InvalidFormat(format!(
                "Partition [{}, {}) exceeds file length {}",
                start,
                end,
                mmap.len()
            )));
        }

        let content = std::str::from_utf8(&mmap[start..end])
            .map_err(|e| ProcessingError::InvalidFormat(format!("Invalid UTF-8: {}", e)))?;

        let mut stations = StationMap::new();
        for line in content.lines() {
            self.fold_record(&mut stations, line, path, partition)?;
        }

        Ok(stations)
    }

    /// Parse a single record and fold it into the running aggregates.
    ///
    /// Records without a field separator (blank or truncated lines) are
    /// skipped; an unparseable temperature is fatal for the whole scan.
    fn fold_record(
        &self,
        stations: &mut StationMap,
        line: &str,
        path: &Path,
        partition: &Partition,
    ) -> Result<()> {
        let (station, value) = match line.split_once(FIELD_SEPARATOR) {
            Some(parts) => parts,
            None => return Ok(()),
        };

        let temperature: f64 =
            value
                .parse()
                .map_err(|_| ProcessingError::InvalidTemperature {
                    value: value.to_string(),
                    offset: partition.offset,
                    path: path.to_path_buf(),
                })?;

        match stations.get_mut(station) {
            Some(stats) => stats.record(temperature),
            None => {
                stations.insert(station.to_string(), StationStats::new(temperature));
            }
        }

        Ok(())
    }
}

impl Default for PartitionReader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    fn whole_file(content: &str) -> Partition {
        Partition::new(0, content.len() as u64)
    }

    #[test]
    fn test_read_partition_aggregates_stations() {
        let content = "A;10.0\nB;20.0\nA;-5.0\n";
        let file = write_file(content);

        let reader = PartitionReader::new();
        let stations = reader
            .read_partition(file.path(), &whole_file(content))
            .unwrap();

        assert_eq!(stations.len(), 2);
        let a = &stations["A"];
        assert_eq!(a.min, -5.0);
        assert_eq!(a.max, 10.0);
        assert_eq!(a.sum, 5.0);
        assert_eq!(a.count, 2);
        let b = &stations["B"];
        assert_eq!(b.min, 20.0);
        assert_eq!(b.count, 1);
    }

    #[test]
    fn test_lines_without_separator_are_skipped() {
        let content = "A;10.0\nmalformedline\n\nB;20.0\n";
        let file = write_file(content);

        let reader = PartitionReader::new();
        let stations = reader
            .read_partition(file.path(), &whole_file(content))
            .unwrap();

        assert_eq!(stations.len(), 2);
        assert_eq!(stations["A"].count, 1);
        assert_eq!(stations["B"].count, 1);
    }

    #[test]
    fn test_unparseable_temperature_is_fatal() {
        let content = "A;10.0\nA;notanumber\n";
        let file = write_file(content);

        let reader = PartitionReader::new();
        let result = reader.read_partition(file.path(), &whole_file(content));

        match result {
            Err(ProcessingError::InvalidTemperature { value, .. }) => {
                assert_eq!(value, "notanumber");
            }
            other => panic!("expected InvalidTemperature, got {:?}", other),
        }
    }

    #[test]
    fn test_scan_is_bounded_to_the_partition() {
        let content = "A;1.0\nB;2.0\nC;3.0\nD;4.0\n";
        let file = write_file(content);

        // First two records only: "A;1.0\nB;2.0\n" is 12 bytes.
        let reader = PartitionReader::new();
        let head = reader
            .read_partition(file.path(), &Partition::new(0, 12))
            .unwrap();

        assert_eq!(head.len(), 2);
        assert!(head.contains_key("A"));
        assert!(head.contains_key("B"));
        assert!(!head.contains_key("C"));

        // Remaining records from byte 12 onwards.
        let tail = reader
            .read_partition(file.path(), &Partition::new(12, 12))
            .unwrap();

        assert_eq!(tail.len(), 2);
        assert!(tail.contains_key("C"));
        assert!(tail.contains_key("D"));
    }

    #[test]
    fn test_mmap_scan_matches_buffered_scan() {
        let content = "A;10.0\nB;20.0\nA;-5.0\nC;0.5\n";
        let file = write_file(content);
        let partition = whole_file(content);

        let buffered = PartitionReader::new()
            .read_partition(file.path(), &partition)
            .unwrap();
        let mapped = PartitionReader::with_mmap(true)
            .read_partition(file.path(), &partition)
            .unwrap();

        assert_eq!(buffered, mapped);
    }

    #[test]
    fn test_final_record_without_terminator_is_counted() {
        let content = "A;1.0\nB;2.5";
        let file = write_file(content);

        let reader = PartitionReader::new();
        let stations = reader
            .read_partition(file.path(), &whole_file(content))
            .unwrap();

        assert_eq!(stations.len(), 2);
        assert_eq!(stations["B"].sum, 2.5);
    }
}
