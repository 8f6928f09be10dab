//! metric-board command line
//!
//! Prints the leaderboard and per-dataset tables for a checkpoint tree, or
//! exports the aggregated rows with `--project` / `--run-name` / `--export`.

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use metric_board::config::{
    ExportConfig, ReportConfig, DEFAULT_METRICS_FILE, DEFAULT_OUT_DIR, DEFAULT_PROJECT,
    DEFAULT_ROOT,
};
use metric_board::driver::ReportDriver;

#[derive(Parser, Debug)]
#[command(
    name = "metric-board",
    version,
    about = "Summarize MAE/RMSE/MAPE of every model and dataset under a checkpoint tree"
)]
struct Args {
    /// Checkpoint root directory.
    #[arg(long, default_value = DEFAULT_ROOT)]
    root: PathBuf,

    /// Result file name to look for.
    #[arg(long, default_value = DEFAULT_METRICS_FILE)]
    metrics_file: String,

    /// Export project name (selects export instead of printing).
    #[arg(long)]
    project: Option<String>,

    /// Export run name; defaults to metrics-summary-<timestamp> (selects export).
    #[arg(long)]
    run_name: Option<String>,

    /// Export with default project and run name.
    #[arg(long)]
    export: bool,

    /// Base directory for exports.
    #[arg(long, default_value = DEFAULT_OUT_DIR)]
    out_dir: PathBuf,

    /// Only print the leaderboard.
    #[arg(long)]
    no_details: bool,

    /// Also print per-horizon tables.
    #[arg(long)]
    horizons: bool,

    /// Log at debug level (overridden by RUST_LOG).
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn wants_export(&self) -> bool {
        self.export || self.project.is_some() || self.run_name.is_some()
    }

    fn into_config(self) -> ReportConfig {
        let mut builder = ReportConfig::builder()
            .root(&self.root)
            .metrics_file_name(&self.metrics_file)
            .show_details(!self.no_details)
            .show_horizons(self.horizons);
        if self.wants_export() {
            builder = builder.export(ExportConfig::new(
                self.project.unwrap_or_else(|| DEFAULT_PROJECT.to_string()),
                self.run_name,
                self.out_dir,
            ));
        }
        builder.build()
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = args.into_config();
    let root = config.root().to_path_buf();
    let driver = ReportDriver::new(config);

    let stdout = std::io::stdout();
    driver
        .run(&mut stdout.lock())
        .with_context(|| format!("report for {} failed", root.display()))?;
    Ok(())
}
