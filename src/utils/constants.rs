/// Record framing
pub const FIELD_SEPARATOR: char = ';';
pub const RECORD_TERMINATOR: u8 = b'\n';

/// Upper bound on the encoded length of a single record, in bytes. The
/// partitioner scans a window of this size to find a cut point, so every
/// record in the input must fit within it.
pub const MAX_RECORD_LENGTH: usize = 100;

/// Processing defaults
pub const DEFAULT_BUFFER_SIZE: usize = 8192 * 16; // 128KB
pub const DEFAULT_MEASUREMENTS_FILE: &str = "measurements/measurements.txt";

/// Generator defaults
pub const DEFAULT_GENERATED_RECORDS: u64 = 1_000_000;
pub const GENERATED_TEMP_STDDEV: f64 = 10.0;
pub const GENERATED_TEMP_LIMIT: f64 = 99.9;
