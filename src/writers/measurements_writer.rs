use crate::error::{ProcessingError, Result};
use crate::utils::constants::{
    DEFAULT_BUFFER_SIZE, FIELD_SEPARATOR, GENERATED_TEMP_LIMIT, GENERATED_TEMP_STDDEV,
};
use crate::utils::progress::ProgressReporter;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Mean annual temperature per station used to synthesise measurements.
const STATION_CLIMATOLOGY: &[(&str, f64)] = &[
    ("Aberdeen", 8.1),
    ("Abha", 18.0),
    ("Accra", 26.4),
    ("Amsterdam", 10.2),
    ("Athens", 19.2),
    ("Auckland", 15.2),
    ("Baghdad", 22.8),
    ("Bangkok", 28.6),
    ("Belfast", 9.8),
    ("Berlin", 10.3),
    ("Bordeaux", 14.2),
    ("Brussels", 10.5),
    ("Bulawayo", 18.9),
    ("Cairo", 21.4),
    ("Cape Town", 16.2),
    ("Cardiff", 10.7),
    ("Copenhagen", 9.1),
    ("Dakar", 24.0),
    ("Dublin", 9.8),
    ("Durham", 9.0),
    ("Edinburgh", 9.3),
    ("Exeter", 10.7),
    ("Hamburg", 9.7),
    ("Helsinki", 5.9),
    ("Istanbul", 13.9),
    ("Lisbon", 17.5),
    ("London", 11.3),
    ("Madrid", 15.0),
    ("Marseille", 15.8),
    ("Mexico City", 17.5),
    ("Nairobi", 17.8),
    ("Oslo", 5.7),
    ("Ottawa", 6.6),
    ("Paris", 12.3),
    ("Perth", 18.7),
    ("Reykjavik", 4.3),
    ("Riga", 6.2),
    ("Rome", 15.2),
    ("Stockholm", 6.6),
    ("Tokyo", 15.4),
    ("Toronto", 9.4),
    ("Vienna", 10.4),
    ("Warsaw", 8.5),
    ("Zurich", 9.3),
];

/// Writes a synthetic measurements file: one `station;temperature` record
/// per line, temperatures drawn from a per-station normal distribution.
pub struct MeasurementsWriter {
    records: u64,
    seed: Option<u64>,
}

impl MeasurementsWriter {
    pub fn new(records: u64) -> Self {
        Self {
            records,
            seed: None,
        }
    }

    /// Fix the RNG seed for reproducible output.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Generate the file and return the number of records written.
    pub fn write_measurements(
        &self,
        path: &Path,
        progress: Option<&ProgressReporter>,
    ) -> Result<u64> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let file = File::create(path)?;
        let mut out = BufWriter::with_capacity(DEFAULT_BUFFER_SIZE, file);

        let mut rng: StdRng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let distributions: Vec<(&str, Normal<f64>)> = STATION_CLIMATOLOGY
            .iter()
            .map(|&(station, mean)| {
                Normal::new(mean, GENERATED_TEMP_STDDEV)
                    .map(|distribution| (station, distribution))
                    .map_err(|e| {
                        ProcessingError::InvalidFormat(format!(
                            "Bad climatology entry for {}: {}",
                            station, e
                        ))
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        for written in 0..self.records {
            let (station, distribution) = &distributions[rng.gen_range(0..distributions.len())];
            let temperature = distribution
                .sample(&mut rng)
                .clamp(-GENERATED_TEMP_LIMIT, GENERATED_TEMP_LIMIT);

            writeln!(out, "{}{}{:.1}", station, FIELD_SEPARATOR, temperature)?;

            if written % 100_000 == 0 {
                if let Some(p) = progress {
                    p.update(written);
                }
            }
        }

        out.flush()?;
        Ok(self.records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::BufRead;
    use tempfile::TempDir;

    #[test]
    fn test_generates_requested_record_count() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("measurements.txt");

        let writer = MeasurementsWriter::new(500).with_seed(Some(7));
        let written = writer.write_measurements(&path, None).unwrap();
        assert_eq!(written, 500);

        let file = std::fs::File::open(&path).unwrap();
        let lines: Vec<String> = std::io::BufReader::new(file)
            .lines()
            .map(|line| line.unwrap())
            .collect();
        assert_eq!(lines.len(), 500);

        for line in &lines {
            let (station, value) = line.split_once(';').expect("missing separator");
            assert!(STATION_CLIMATOLOGY.iter().any(|&(name, _)| name == station));
            let temperature: f64 = value.parse().expect("unparseable temperature");
            assert!(temperature.abs() <= GENERATED_TEMP_LIMIT);
        }
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let dir = TempDir::new().unwrap();
        let first = dir.path().join("first.txt");
        let second = dir.path().join("second.txt");

        MeasurementsWriter::new(200)
            .with_seed(Some(42))
            .write_measurements(&first, None)
            .unwrap();
        MeasurementsWriter::new(200)
            .with_seed(Some(42))
            .write_measurements(&second, None)
            .unwrap();

        assert_eq!(
            std::fs::read_to_string(&first).unwrap(),
            std::fs::read_to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_creates_missing_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/deeper/measurements.txt");

        MeasurementsWriter::new(10)
            .with_seed(Some(1))
            .write_measurements(&path, None)
            .unwrap();

        assert!(path.exists());
    }
}
