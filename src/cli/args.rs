use crate::utils::constants::{
    DEFAULT_GENERATED_RECORDS, DEFAULT_MEASUREMENTS_FILE, MAX_RECORD_LENGTH,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "measurements-processor")]
#[command(about = "High-performance parallel aggregator for station measurement files")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Aggregate per-station min/mean/max over a measurements file
    Aggregate {
        #[arg(
            short,
            long,
            default_value = DEFAULT_MEASUREMENTS_FILE,
            help = "Input measurements file"
        )]
        input: PathBuf,

        #[arg(short, long, help = "Write the report to a file instead of stdout")]
        output_file: Option<PathBuf>,

        #[arg(long, default_value_t = num_cpus::get())]
        max_workers: usize,

        #[arg(
            long,
            default_value_t = MAX_RECORD_LENGTH,
            help = "Upper bound on a single record's encoded length in bytes"
        )]
        max_record_length: usize,

        #[arg(long, default_value = "false", help = "Scan through a memory map")]
        mmap: bool,

        #[arg(long, default_value = "false", help = "Emit the report as JSON")]
        json: bool,
    },

    /// Show the partition layout computed for a measurements file
    Partitions {
        #[arg(
            short,
            long,
            default_value = DEFAULT_MEASUREMENTS_FILE,
            help = "Input measurements file"
        )]
        input: PathBuf,

        #[arg(long, default_value_t = num_cpus::get())]
        count: usize,

        #[arg(long, default_value_t = MAX_RECORD_LENGTH)]
        max_record_length: usize,
    },

    /// Generate a synthetic measurements file
    Generate {
        #[arg(
            short,
            long,
            default_value = DEFAULT_MEASUREMENTS_FILE,
            help = "Output measurements file"
        )]
        output_file: PathBuf,

        #[arg(short, long, default_value_t = DEFAULT_GENERATED_RECORDS)]
        records: u64,

        #[arg(long, help = "Seed for reproducible output")]
        seed: Option<u64>,
    },
}
