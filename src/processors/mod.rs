pub mod merger;
pub mod parallel_processor;
pub mod partitioner;

pub use merger::StatsMerger;
pub use parallel_processor::ParallelProcessor;
pub use partitioner::Partitioner;
