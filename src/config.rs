//! Report configuration
//!
//! Everything the driver needs is carried in a [`ReportConfig`] value built
//! at the entry point; the library reads no process-wide state.

use std::path::{Path, PathBuf};

use chrono::Local;

/// Default aggregation root, relative to the working directory.
pub const DEFAULT_ROOT: &str = "checkpoints";
/// Default result file name.
pub const DEFAULT_METRICS_FILE: &str = "test_metrics.json";
/// Default export project.
pub const DEFAULT_PROJECT: &str = "test-metrics";
/// Default export base directory.
pub const DEFAULT_OUT_DIR: &str = "exports";

/// Where and under which names an export is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportConfig {
    project: String,
    run_name: String,
    out_dir: PathBuf,
}

impl ExportConfig {
    /// Create an export config; a missing run name becomes
    /// `metrics-summary-<YYYYmmdd-HHMMSS>`.
    #[must_use]
    pub fn new(project: impl Into<String>, run_name: Option<String>, out_dir: impl Into<PathBuf>) -> Self {
        Self {
            project: project.into(),
            run_name: run_name.unwrap_or_else(default_run_name),
            out_dir: out_dir.into(),
        }
    }

    /// Get the project name.
    #[must_use]
    pub fn project(&self) -> &str {
        &self.project
    }

    /// Get the run name.
    #[must_use]
    pub fn run_name(&self) -> &str {
        &self.run_name
    }

    /// Get the export base directory.
    #[must_use]
    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Directory receiving this export: `<out_dir>/<project>/<run_name>`.
    #[must_use]
    pub fn destination(&self) -> PathBuf {
        self.out_dir.join(&self.project).join(&self.run_name)
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self::new(DEFAULT_PROJECT, None, DEFAULT_OUT_DIR)
    }
}

fn default_run_name() -> String {
    format!("metrics-summary-{}", Local::now().format("%Y%m%d-%H%M%S"))
}

/// Configuration of one report invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    root: PathBuf,
    metrics_file_name: String,
    show_details: bool,
    show_horizons: bool,
    export: Option<ExportConfig>,
}

impl ReportConfig {
    /// Create a builder with defaults.
    #[must_use]
    pub fn builder() -> ReportConfigBuilder {
        ReportConfigBuilder::default()
    }

    /// Get the aggregation root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the result file name searched for.
    #[must_use]
    pub fn metrics_file_name(&self) -> &str {
        &self.metrics_file_name
    }

    /// Whether per-dataset detail tables are printed.
    #[must_use]
    pub const fn show_details(&self) -> bool {
        self.show_details
    }

    /// Whether per-dataset horizon tables are printed.
    #[must_use]
    pub const fn show_horizons(&self) -> bool {
        self.show_horizons
    }

    /// Export settings; `Some` selects export instead of printing.
    #[must_use]
    pub const fn export(&self) -> Option<&ExportConfig> {
        self.export.as_ref()
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Builder for `ReportConfig`.
#[derive(Debug, Clone)]
pub struct ReportConfigBuilder {
    root: PathBuf,
    metrics_file_name: String,
    show_details: bool,
    show_horizons: bool,
    export: Option<ExportConfig>,
}

impl Default for ReportConfigBuilder {
    fn default() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_ROOT),
            metrics_file_name: DEFAULT_METRICS_FILE.to_string(),
            show_details: true,
            show_horizons: false,
            export: None,
        }
    }
}

impl ReportConfigBuilder {
    /// Set the aggregation root.
    #[must_use]
    pub fn root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    /// Set the result file name.
    #[must_use]
    pub fn metrics_file_name(mut self, name: impl Into<String>) -> Self {
        self.metrics_file_name = name.into();
        self
    }

    /// Toggle detail tables.
    #[must_use]
    pub const fn show_details(mut self, show: bool) -> Self {
        self.show_details = show;
        self
    }

    /// Toggle horizon tables.
    #[must_use]
    pub const fn show_horizons(mut self, show: bool) -> Self {
        self.show_horizons = show;
        self
    }

    /// Export instead of printing.
    #[must_use]
    pub fn export(mut self, export: ExportConfig) -> Self {
        self.export = Some(export);
        self
    }

    /// Build the `ReportConfig`.
    #[must_use]
    pub fn build(self) -> ReportConfig {
        ReportConfig {
            root: self.root,
            metrics_file_name: self.metrics_file_name,
            show_details: self.show_details,
            show_horizons: self.show_horizons,
            export: self.export,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ReportConfig::default();
        assert_eq!(config.root(), Path::new("checkpoints"));
        assert_eq!(config.metrics_file_name(), "test_metrics.json");
        assert!(config.show_details());
        assert!(!config.show_horizons());
        assert!(config.export().is_none());
    }

    #[test]
    fn test_export_destination() {
        let export = ExportConfig::new("traffic", Some("nightly".to_string()), "/tmp/out");
        assert_eq!(export.destination(), PathBuf::from("/tmp/out/traffic/nightly"));
    }

    #[test]
    fn test_default_run_name() {
        let export = ExportConfig::default();
        assert!(export.run_name().starts_with("metrics-summary-"));
        assert_eq!(export.run_name().len(), "metrics-summary-20240101-000000".len());
        assert_eq!(export.project(), DEFAULT_PROJECT);
    }
}
