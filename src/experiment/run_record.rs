//! Run Record - one evaluated configuration, identified by its result file

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

use super::{HorizonMetrics, MetricTriple};

/// Display format of a run's observation time.
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Derive the dataset name from a setting identifier.
///
/// The dataset is the leading token before the first `_`
/// (`PEMS04_300_12_12` => `PEMS04`); a setting without `_` is its own dataset.
#[must_use]
pub fn dataset_of(setting: &str) -> &str {
    setting.split('_').next().unwrap_or(setting)
}

/// Format a UTC instant as local `YYYY-MM-DD HH:MM`.
pub(crate) fn local_time_label(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format(TIME_FORMAT).to_string()
}

/// Run represents one evaluation result read from disk.
///
/// A run is immutable once built: formatted strings and averages are
/// computed from it, never written back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Run {
    model: String,
    dataset: String,
    setting: String,
    metrics: MetricTriple,
    horizons: Vec<HorizonMetrics>,
    source_path: PathBuf,
    observed_at: DateTime<Utc>,
}

impl Run {
    /// Create a run with overall metrics only.
    ///
    /// # Arguments
    ///
    /// * `model` - First path segment below the aggregation root
    /// * `setting` - Second path segment below the aggregation root
    /// * `metrics` - Overall metric triple
    /// * `source_path` - Result file the run was read from
    /// * `observed_at` - File modification time
    #[must_use]
    pub fn new(
        model: impl Into<String>,
        setting: impl Into<String>,
        metrics: MetricTriple,
        source_path: impl Into<PathBuf>,
        observed_at: DateTime<Utc>,
    ) -> Self {
        Self::builder(model, setting, source_path, observed_at)
            .metrics(metrics)
            .build()
    }

    /// Create a builder for constructing a run with optional fields.
    #[must_use]
    pub fn builder(
        model: impl Into<String>,
        setting: impl Into<String>,
        source_path: impl Into<PathBuf>,
        observed_at: DateTime<Utc>,
    ) -> RunBuilder {
        RunBuilder::new(model, setting, source_path, observed_at)
    }

    /// Get the model name.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Get the dataset name.
    #[must_use]
    pub fn dataset(&self) -> &str {
        &self.dataset
    }

    /// Get the full setting identifier.
    #[must_use]
    pub fn setting(&self) -> &str {
        &self.setting
    }

    /// Get the overall metrics.
    #[must_use]
    pub const fn metrics(&self) -> &MetricTriple {
        &self.metrics
    }

    /// Get the per-step metrics blocks, ordered by step.
    #[must_use]
    pub fn horizons(&self) -> &[HorizonMetrics] {
        &self.horizons
    }

    /// Get the result file path.
    #[must_use]
    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    /// Get the file modification time.
    #[must_use]
    pub const fn observed_at(&self) -> DateTime<Utc> {
        self.observed_at
    }

    /// Observation time in local time, formatted as `YYYY-MM-DD HH:MM`.
    #[must_use]
    pub fn time_label(&self) -> String {
        local_time_label(self.observed_at)
    }
}

/// Builder for `Run`.
#[derive(Debug)]
pub struct RunBuilder {
    model: String,
    setting: String,
    metrics: MetricTriple,
    horizons: Vec<HorizonMetrics>,
    source_path: PathBuf,
    observed_at: DateTime<Utc>,
}

impl RunBuilder {
    /// Create a new builder with required fields.
    #[must_use]
    pub fn new(
        model: impl Into<String>,
        setting: impl Into<String>,
        source_path: impl Into<PathBuf>,
        observed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            model: model.into(),
            setting: setting.into(),
            metrics: MetricTriple::default(),
            horizons: Vec::new(),
            source_path: source_path.into(),
            observed_at,
        }
    }

    /// Set the overall metrics.
    #[must_use]
    pub const fn metrics(mut self, metrics: MetricTriple) -> Self {
        self.metrics = metrics;
        self
    }

    /// Add one per-step metrics block.
    #[must_use]
    pub fn horizon(mut self, block: HorizonMetrics) -> Self {
        self.horizons.push(block);
        self
    }

    /// Build the `Run`. Horizon blocks are ordered by step.
    #[must_use]
    pub fn build(mut self) -> Run {
        self.horizons.sort_by_key(HorizonMetrics::horizon);
        Run {
            dataset: dataset_of(&self.setting).to_string(),
            model: self.model,
            setting: self.setting,
            metrics: self.metrics,
            horizons: self.horizons,
            source_path: self.source_path,
            observed_at: self.observed_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::experiment::Horizon;

    #[test]
    fn test_dataset_of() {
        assert_eq!(dataset_of("PEMS04_300_12_12"), "PEMS04");
        assert_eq!(dataset_of("METR-LA"), "METR-LA");
        assert_eq!(dataset_of("_leading"), "");
    }

    #[test]
    fn test_run_derives_dataset() {
        let run = Run::new(
            "STID",
            "PEMS08_96_12",
            MetricTriple::new(Some(14.2), None, None),
            "ckpt/STID/PEMS08_96_12/a/test_metrics.json",
            Utc::now(),
        );
        assert_eq!(run.model(), "STID");
        assert_eq!(run.dataset(), "PEMS08");
        assert_eq!(run.setting(), "PEMS08_96_12");
        assert!(run.horizons().is_empty());
    }

    #[test]
    fn test_builder_orders_horizons() {
        let run = Run::builder("STID", "PEMS08", "x.json", Utc::now())
            .horizon(HorizonMetrics::new(Horizon::Step(10), MetricTriple::default()))
            .horizon(HorizonMetrics::new(Horizon::Step(2), MetricTriple::default()))
            .build();
        let steps: Vec<u32> = run.horizons().iter().map(|h| h.horizon().index()).collect();
        assert_eq!(steps, vec![2, 10]);
    }

    #[test]
    fn test_time_label_shape() {
        let run = Run::new("m", "d", MetricTriple::default(), "p", Utc::now());
        let label = run.time_label();
        assert_eq!(label.len(), "2024-01-01 00:00".len());
        assert_eq!(&label[4..5], "-");
        assert_eq!(&label[10..11], " ");
    }
}
