//! Report Driver - scan, aggregate, then print or export
//!
//! ```rust,no_run
//! use metric_board::config::ReportConfig;
//! use metric_board::driver::ReportDriver;
//!
//! let driver = ReportDriver::new(ReportConfig::builder().root("checkpoints").build());
//! driver.run(&mut std::io::stdout())?;
//! # Ok::<(), metric_board::Error>(())
//! ```

use std::io::Write;
use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::config::ReportConfig;
use crate::experiment::{Run, RunRepository};
use crate::locate::{ResultLocation, ResultLocator};
use crate::parse::load_run;
use crate::report::{render_console, ConsoleSections};
use crate::sink::{export, ExportManifest, ParquetSink, RowSink};
use crate::Result;

/// A result file excluded from the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    /// Path of the file.
    pub path: PathBuf,
    /// Why it was skipped.
    pub reason: String,
}

/// Outcome of scanning the aggregation root.
#[derive(Debug, Default)]
pub struct Scan {
    /// Every run that loaded.
    pub repository: RunRepository,
    /// Files that were located but could not be loaded.
    pub skipped: Vec<SkippedFile>,
}

/// Orchestrates one report invocation.
#[derive(Debug, Clone)]
pub struct ReportDriver {
    config: ReportConfig,
}

impl ReportDriver {
    /// Create a driver for `config`.
    #[must_use]
    pub const fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Locate and load every result file below the root.
    ///
    /// A file that fails to load is logged, recorded in
    /// [`Scan::skipped`], and otherwise ignored.
    #[must_use]
    pub fn scan(&self) -> Scan {
        let locator = ResultLocator::new(self.config.root(), self.config.metrics_file_name());
        let mut scan = Scan::default();

        for (location, loaded) in load_all(locator.locate()) {
            match loaded {
                Ok(run) => {
                    debug!(path = %location.path().display(), model = run.model(), dataset = run.dataset(), "loaded run");
                    scan.repository.add_run(run);
                }
                Err(e) => {
                    warn!(path = %location.path().display(), error = %e, "skipping unreadable result file");
                    scan.skipped.push(SkippedFile {
                        path: location.path().to_path_buf(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        info!(
            root = %self.config.root().display(),
            runs = scan.repository.run_count(),
            keys = scan.repository.key_count(),
            skipped = scan.skipped.len(),
            "scan complete"
        );
        scan
    }

    /// Message shown instead of tables when nothing was found.
    #[must_use]
    pub fn empty_message(&self) -> String {
        format!(
            "No {} found under {}",
            self.config.metrics_file_name(),
            self.config.root().display()
        )
    }

    /// Render the console report, or the empty-result message.
    #[must_use]
    pub fn render(&self, repository: &RunRepository) -> String {
        if repository.is_empty() {
            return format!("{}\n", self.empty_message());
        }
        render_console(
            repository,
            ConsoleSections {
                details: self.config.show_details(),
                horizons: self.config.show_horizons(),
            },
        )
    }

    /// Hand the row sets of `repository` to `sink`.
    ///
    /// # Errors
    ///
    /// Returns error if the sink rejects a table.
    pub fn export_to<S: RowSink + ?Sized>(
        &self,
        repository: &RunRepository,
        sink: &mut S,
    ) -> Result<ExportManifest> {
        let export_config = self.config.export().cloned().unwrap_or_default();
        let manifest = ExportManifest::new(
            export_config.project(),
            export_config.run_name(),
            self.config.root(),
        );
        export(repository, sink, manifest)
    }

    /// Run the full invocation, writing user-facing output to `out`.
    ///
    /// Prints the console report, or exports to a [`ParquetSink`] when the
    /// config carries export settings. An empty scan is not an error.
    ///
    /// # Errors
    ///
    /// Returns error if `out` cannot be written or the export fails.
    pub fn run<W: Write + ?Sized>(&self, out: &mut W) -> Result<()> {
        let scan = self.scan();

        match self.config.export() {
            Some(export_config) if !scan.repository.is_empty() => {
                let destination = export_config.destination();
                let mut sink = ParquetSink::create(&destination)?;
                let manifest = self.export_to(&scan.repository, &mut sink)?;
                writeln!(
                    out,
                    "Exported {} runs to {} ({}/{})",
                    scan.repository.run_count(),
                    destination.display(),
                    manifest.project,
                    manifest.run_name
                )?;
            }
            _ => out.write_all(self.render(&scan.repository).as_bytes())?,
        }
        out.flush()?;
        Ok(())
    }
}

#[cfg(not(feature = "parallel"))]
fn load_all(
    locations: impl Iterator<Item = ResultLocation>,
) -> impl Iterator<Item = (ResultLocation, Result<Run>)> {
    locations.map(|location| {
        let loaded = load_run(&location);
        (location, loaded)
    })
}

#[cfg(feature = "parallel")]
fn load_all(
    locations: impl Iterator<Item = ResultLocation>,
) -> impl Iterator<Item = (ResultLocation, Result<Run>)> {
    use rayon::prelude::*;

    // Collected in traversal order; `collect` on an indexed parallel
    // iterator preserves it.
    let locations: Vec<ResultLocation> = locations.collect();
    let loaded: Vec<(ResultLocation, Result<Run>)> = locations
        .into_par_iter()
        .map(|location| {
            let loaded = load_run(&location);
            (location, loaded)
        })
        .collect();
    loaded.into_iter()
}
