use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgAction, Parser};
use log::LevelFilter;

use arith_vectors::config::{self, default_outputs};
use arith_vectors::{generate, Config, ConfigFile, Operation};

/// Writes random `a,b,result` rows for big-integer arithmetic, one file per operation.
#[derive(Parser, Debug)]
#[command(name = "arith-vectors", version, about, long_about = None)]
struct Cli {
    /// Vectors per file
    #[arg(short = 'n', long)]
    count: Option<usize>,

    /// Inclusive operand bound, as digits or base^exp
    #[arg(short = 'm', long, value_name = "M")]
    magnitude_bound: Option<String>,

    /// Divisor bound for div/rem (defaults to the square root of M)
    #[arg(long, value_name = "D")]
    divisor_bound: Option<String>,

    /// Comma-separated operations: mul, add, sub, div, rem
    #[arg(short = 'o', long, value_delimiter = ',')]
    ops: Option<Vec<Operation>>,

    /// Output file for each operation, in order (defaults to <op>_test.csv)
    #[arg(long = "output", value_name = "PATH")]
    outputs: Vec<PathBuf>,

    /// Directory for relative output paths
    #[arg(short = 'd', long, value_name = "DIR")]
    out_dir: Option<PathBuf>,

    /// Seed for a reproducible run
    #[arg(short, long)]
    seed: Option<u64>,

    /// TOML file with any of: count, magnitude-bound, divisor-bound, ops, outputs, seed
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// More logging (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn into_config(self) -> anyhow::Result<Config> {
        let mut config = Config::default();
        if let Some(path) = &self.config {
            config.merge_file(ConfigFile::load(path)?)?;
        }

        if let Some(count) = self.count {
            config.count = count;
        }
        if let Some(bound) = &self.magnitude_bound {
            config.magnitude_bound = config::parse_bound(bound)?;
        }
        if let Some(bound) = &self.divisor_bound {
            config.divisor_bound = Some(config::parse_bound(bound)?);
        }
        if let Some(ops) = self.ops {
            config.output_paths = default_outputs(&ops);
            config.operations = ops;
        }
        if !self.outputs.is_empty() {
            config.output_paths = self.outputs;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if let Some(dir) = &self.out_dir {
            config.relocate(dir);
        }
        Ok(config)
    }
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::builder()
        .format_timestamp(None)
        .format_level(true)
        .format_target(false)
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let config = cli.into_config().context("invalid configuration")?;
    config.validate().context("invalid configuration")?;
    let reports = generate(&config).context("vector generation failed")?;

    for report in &reports {
        println!("{}: {} rows -> {}", report.operation, report.rows, report.path.display());
    }
    Ok(())
}
