use crate::cli::args::{Cli, Commands};
use crate::error::Result;
use crate::processors::{ParallelProcessor, Partitioner};
use crate::utils::progress::ProgressReporter;
use crate::writers::{MeasurementsWriter, ReportWriter};
use std::fs::File;
use std::io::BufWriter;

pub async fn run(cli: Cli) -> Result<()> {
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Aggregate {
            input,
            output_file,
            max_workers,
            max_record_length,
            mmap,
            json,
        } => {
            let progress = ProgressReporter::new_spinner("Aggregating measurements...", false);
            progress.println(&format!("Input file: {}", input.display()));
            progress.println(&format!("Workers: {}", max_workers));

            let processor = ParallelProcessor::new(max_workers)
                .with_max_record_length(max_record_length)
                .with_mmap(mmap);

            let totals = processor.aggregate_file(&input, Some(&progress)).await?;

            let writer = ReportWriter::new();
            match output_file {
                Some(path) => {
                    let mut out = BufWriter::new(File::create(&path)?);
                    if json {
                        writer.write_json_report(&totals, &mut out)?;
                    } else {
                        writer.write_report(&totals, &mut out)?;
                    }
                    println!("Report written to {}", path.display());
                }
                None => {
                    let stdout = std::io::stdout();
                    let mut out = BufWriter::new(stdout.lock());
                    if json {
                        writer.write_json_report(&totals, &mut out)?;
                    } else {
                        writer.write_report(&totals, &mut out)?;
                    }
                }
            }
        }

        Commands::Partitions {
            input,
            count,
            max_record_length,
        } => {
            println!("Partition layout for {}", input.display());

            let partitioner = Partitioner::with_max_record_length(max_record_length);
            let partitions = partitioner.partition_file(&input, count)?;

            println!(
                "Requested {} partitions, computed {}",
                count,
                partitions.len()
            );
            for (index, partition) in partitions.iter().enumerate() {
                println!(
                    "{:>4}. offset={:<12} size={:<12} end={}",
                    index + 1,
                    partition.offset,
                    partition.size,
                    partition.end()
                );
            }
        }

        Commands::Generate {
            output_file,
            records,
            seed,
        } => {
            println!("Generating {} measurements...", records);

            let progress = ProgressReporter::new(records, "Generating measurements...", false);
            let writer = MeasurementsWriter::new(records).with_seed(seed);
            let written = writer.write_measurements(&output_file, Some(&progress))?;
            progress.finish_with_message(&format!(
                "Wrote {} records to {}",
                written,
                output_file.display()
            ));
        }
    }

    Ok(())
}
