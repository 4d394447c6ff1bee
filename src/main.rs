mod config;
mod data;
mod error;
mod pipeline;
mod refine;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use config::{RefineConfig, SentinelScope};

/// Automated data refinement for census microdata extracts.
#[derive(Parser, Debug)]
#[command(name = "census-refine", version)]
#[command(about = "Deduplicate, type, validate and label a census CSV extract", long_about = None)]
struct Args {
    /// Path to the CSV data file
    csv_file: PathBuf,

    /// Path to the data dictionary JSON file
    json_file: PathBuf,

    /// JSON file with run settings; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where to write the refined CSV [default: refined_census_data.csv]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Columns in which the "not applicable" code is replaced [default: all]
    #[arg(long, value_enum)]
    sentinel_scope: Option<SentinelScope>,

    /// Column checked for implausible values [default: HOURS_PER_WEEK_WORKED]
    #[arg(long)]
    outlier_column: Option<String>,

    /// Values strictly above this are outliers [default: 100]
    #[arg(long)]
    outlier_threshold: Option<i64>,
}

impl Args {
    fn resolve_config(&self) -> Result<RefineConfig> {
        let mut config = match &self.config {
            Some(path) => RefineConfig::from_file(path)?,
            None => RefineConfig::default(),
        };

        if let Some(output) = &self.output {
            config.output = output.clone();
        }
        if let Some(scope) = self.sentinel_scope {
            config.sentinel_scope = scope;
        }
        if let Some(column) = &self.outlier_column {
            config.outlier_column = column.clone();
        }
        if let Some(threshold) = self.outlier_threshold {
            config.outlier_threshold = threshold;
        }
        Ok(config)
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let config = args.resolve_config()?;
    log::debug!("running with {config:?}");

    let stdout = std::io::stdout();
    let summary = pipeline::run(&args.csv_file, &args.json_file, &config, &mut stdout.lock())?;
    log::info!("refined {} rows x {} columns", summary.rows, summary.columns);
    Ok(())
}
