use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use log::{debug, info, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::arithmetic::Operation;
use crate::config::Config;
use crate::error::{GenError, Result};
use crate::sampler;

/// Summary of one written file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub operation: Operation,
    pub path: PathBuf,
    pub rows: usize,
}

/// Validates `config` and writes one vector file per operation.
///
/// Files are written in order and each is closed before the next is opened.
/// An I/O error stops the run; files finished before it stay on disk.
pub fn generate(config: &Config) -> Result<Vec<FileReport>> {
    debug!(
        "count={} bound={} digits, ops={:?}",
        config.count,
        config.magnitude_bound.to_string().len(),
        config.operations
    );

    match config.seed {
        Some(seed) => {
            debug!("seeding rng with {}", seed);
            generate_with_rng(config, &mut StdRng::seed_from_u64(seed))
        }
        None => generate_with_rng(config, &mut rand::thread_rng()),
    }
}

/// Same as [`generate`] but draws from the caller's rng.
pub fn generate_with_rng<R: Rng + ?Sized>(config: &Config, rng: &mut R) -> Result<Vec<FileReport>> {
    config.validate()?;
    let mut reports = Vec::with_capacity(config.operations.len());
    for (&op, path) in config.operations.iter().zip(&config.output_paths) {
        info!("writing {} vectors for {} to {}", config.count, op, path.display());
        let rows = write_vector_file(path, op, config, &mut *rng)?;
        reports.push(FileReport {
            operation: op,
            path: path.clone(),
            rows,
        });
    }
    Ok(reports)
}

/// Truncates `path` and writes `config.count` rows of `a,b,result` for `op`.
fn write_vector_file<R: Rng + ?Sized>(
    path: &Path,
    op: Operation,
    config: &Config,
    rng: &mut R,
) -> Result<usize> {
    let file = File::create(path).map_err(|e| GenError::io(path, e))?;
    let mut out = BufWriter::new(file);
    let mut rows = 0;

    let vectors = sampler::iter_vectors(rng, op, &config.magnitude_bound)
        .with_divisor_bound(config.effective_divisor_bound());
    for vector in vectors.take(config.count) {
        trace!("{}: {}", op, vector);
        writeln!(out, "{}", vector).map_err(|e| GenError::io(path, e))?;
        rows += 1;
    }

    out.flush().map_err(|e| GenError::io(path, e))?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigInt;
    use std::fs;

    fn small_config(dir: &Path, count: usize) -> Config {
        Config {
            count,
            magnitude_bound: BigInt::from(10),
            divisor_bound: None,
            operations: vec![Operation::Add],
            output_paths: vec![dir.join("add_test.csv")],
            seed: Some(9),
        }
    }

    #[test]
    fn test_three_add_rows() -> Result<()> {
        let dir = tempfile::tempdir().unwrap();
        let config = small_config(dir.path(), 3);
        let reports = generate(&config)?;
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].rows, 3);

        let contents = fs::read_to_string(&config.output_paths[0]).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 3);
        for line in lines {
            let v: Vec<i64> = line.split(',').map(|x| x.parse().unwrap()).collect();
            assert_eq!(v.len(), 3);
            assert!(v[0].abs() <= 10 && v[1].abs() <= 10);
            assert_eq!(v[0] + v[1], v[2]);
        }
        Ok(())
    }

    #[test]
    fn test_zero_count_writes_empty_file() -> Result<()> {
        let dir = tempfile::tempdir().unwrap();
        let config = small_config(dir.path(), 0);
        generate(&config)?;
        assert_eq!(fs::read_to_string(&config.output_paths[0]).unwrap(), "");
        Ok(())
    }

    #[test]
    fn test_invalid_config_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = small_config(dir.path(), 3);
        config.operations.push(Operation::Subtract);
        assert!(matches!(generate(&config), Err(GenError::InvalidConfig(_))));
        assert!(!config.output_paths[0].exists());
    }

    #[test]
    fn test_missing_directory_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope").join("add_test.csv");
        let config = Config {
            output_paths: vec![missing.clone()],
            ..small_config(dir.path(), 3)
        };
        match generate(&config) {
            Err(GenError::Io { path, .. }) => assert_eq!(path, missing),
            other => panic!("expected io error, got {:?}", other),
        }
    }
}
