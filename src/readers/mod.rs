pub mod concurrent_reader;
pub mod partition_reader;

pub use concurrent_reader::ConcurrentReader;
pub use partition_reader::PartitionReader;
