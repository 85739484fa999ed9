//! Generator configuration.
//!
//! A run is fully described by a [`Config`]. The CLI builds one from its flags,
//! optionally layered over a TOML file read with [`ConfigFile::load`].

use std::collections::HashSet;
use std::env;
use std::fs;
use std::path::{Component, Path, PathBuf};

use num_bigint::{BigInt, Sign};
use num_traits::{Num, Signed};
use serde::Deserialize;

use crate::arithmetic::Operation;
use crate::error::{GenError, Result};

pub const DEFAULT_COUNT: usize = 500;
pub const DEFAULT_BOUND: &str = "10^1000";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Vectors written per file. Zero is allowed and yields empty files.
    pub count: usize,
    /// Operands are drawn from `[-magnitude_bound, magnitude_bound]`.
    pub magnitude_bound: BigInt,
    /// Bound for divisors of div/rem. `None` means the integer square root of
    /// `magnitude_bound`, so quotients carry about half the operand digits.
    pub divisor_bound: Option<BigInt>,
    pub operations: Vec<Operation>,
    /// One target per operation, in the same order.
    pub output_paths: Vec<PathBuf>,
    /// Fixed RNG seed for reproducible runs.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        let operations = Operation::DEFAULT.to_vec();
        Config {
            count: DEFAULT_COUNT,
            magnitude_bound: num_traits::pow(BigInt::from(10), 1000),
            divisor_bound: None,
            output_paths: default_outputs(&operations),
            operations,
            seed: None,
        }
    }
}

impl Config {
    /// Checks the configuration before anything touches the filesystem.
    pub fn validate(&self) -> Result<()> {
        if self.operations.is_empty() {
            return Err(GenError::InvalidConfig("no operations configured".into()));
        }
        if self.operations.len() != self.output_paths.len() {
            return Err(GenError::InvalidConfig(format!(
                "{} operations but {} output paths",
                self.operations.len(),
                self.output_paths.len()
            )));
        }
        if !self.magnitude_bound.is_positive() {
            return Err(GenError::InvalidConfig(format!(
                "magnitude bound must be positive, got {}",
                self.magnitude_bound
            )));
        }
        if let Some(divisor_bound) = &self.divisor_bound {
            if !divisor_bound.is_positive() {
                return Err(GenError::InvalidConfig(format!(
                    "divisor bound must be positive, got {}",
                    divisor_bound
                )));
            }
        }
        let mut seen = HashSet::new();
        for path in &self.output_paths {
            if !seen.insert(output_key(path)) {
                return Err(GenError::InvalidConfig(format!(
                    "output path {} is used more than once",
                    path.display()
                )));
            }
        }
        Ok(())
    }

    pub fn effective_divisor_bound(&self) -> BigInt {
        match &self.divisor_bound {
            Some(bound) => bound.clone(),
            None => self.magnitude_bound.sqrt(),
        }
    }

    /// Overrides fields with whatever the file sets.
    ///
    /// When the file names operations but no outputs, the outputs are
    /// re-derived from the new operation list.
    pub fn merge_file(&mut self, file: ConfigFile) -> Result<()> {
        if let Some(count) = file.count {
            self.count = count;
        }
        if let Some(bound) = file.magnitude_bound {
            self.magnitude_bound = parse_bound(&bound)?;
        }
        if let Some(bound) = file.divisor_bound {
            self.divisor_bound = Some(parse_bound(&bound)?);
        }
        match (file.ops, file.outputs) {
            (Some(ops), Some(outputs)) => {
                self.operations = ops;
                self.output_paths = outputs;
            }
            (Some(ops), None) => {
                self.output_paths = default_outputs(&ops);
                self.operations = ops;
            }
            (None, Some(outputs)) => self.output_paths = outputs,
            (None, None) => {}
        }
        if file.seed.is_some() {
            self.seed = file.seed;
        }
        Ok(())
    }

    /// Places every relative output path under `dir`.
    pub fn relocate(&mut self, dir: &Path) {
        for path in &mut self.output_paths {
            if path.is_relative() {
                *path = dir.join(&*path);
            }
        }
    }
}

/// On-disk form of [`Config`]. Every key is optional.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct ConfigFile {
    pub count: Option<usize>,
    pub magnitude_bound: Option<String>,
    pub divisor_bound: Option<String>,
    pub ops: Option<Vec<Operation>>,
    pub outputs: Option<Vec<PathBuf>>,
    pub seed: Option<u64>,
}

impl ConfigFile {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| GenError::ConfigFile {
            path: path.to_path_buf(),
            source: Box::new(e),
        })?;
        toml::from_str(&contents).map_err(|e| GenError::ConfigFile {
            path: path.to_path_buf(),
            source: Box::new(e),
        })
    }
}

/// Key under which two output paths name the same file.
///
/// Relative paths are resolved against the working directory, `.` components
/// are dropped, and the parent is canonicalized when it already exists.
fn output_key(path: &Path) -> PathBuf {
    let absolute = if path.is_relative() {
        env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    } else {
        path.to_path_buf()
    };
    let cleaned: PathBuf = absolute
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();
    if let (Some(parent), Some(name)) = (cleaned.parent(), cleaned.file_name()) {
        if let Ok(parent) = fs::canonicalize(parent) {
            return parent.join(name);
        }
    }
    cleaned
}

pub fn default_outputs(operations: &[Operation]) -> Vec<PathBuf> {
    operations
        .iter()
        .map(|op| PathBuf::from(op.default_file_name()))
        .collect()
}

/// Parses a positive bound written either as decimal digits or as `base^exp`.
pub fn parse_bound(s: &str) -> Result<BigInt> {
    let invalid = || GenError::InvalidBound(s.to_string());
    let s = s.trim();
    let value = match s.split_once('^') {
        Some((base, exp)) => {
            let base = BigInt::from_str_radix(base.trim(), 10).map_err(|_| invalid())?;
            let exp: usize = exp.trim().parse().map_err(|_| invalid())?;
            num_traits::pow(base, exp)
        }
        None => BigInt::from_str_radix(s, 10).map_err(|_| invalid())?,
    };
    if value.sign() != Sign::Plus {
        return Err(invalid());
    }
    Ok(value)
}
