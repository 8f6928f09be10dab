//! Horizon Records - per-forecast-step metrics of a run
//!
//! A result file holds one `"overall"` block and any number of
//! `"horizon_<N>"` blocks. Keys are parsed once, at ingestion, into a
//! [`Horizon`]; nothing downstream looks at the key strings again.

use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};

use super::run_record::local_time_label;
use super::{MetricTriple, Run, RunRepository};

/// Key of the aggregate block in a result file.
pub const OVERALL_KEY: &str = "overall";

const HORIZON_PREFIX: &str = "horizon_";

/// Forecast horizon a metrics block is scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Horizon {
    /// Aggregate over all forecast steps (index 0).
    Overall,
    /// A single forecast step, starting at 1.
    Step(u32),
}

impl Horizon {
    /// Parse a result-file key.
    ///
    /// Returns `None` for keys that are neither `overall` nor
    /// `horizon_<N>` with `N >= 1`; such blocks are ignored.
    #[must_use]
    pub fn parse_key(key: &str) -> Option<Self> {
        if key == OVERALL_KEY {
            return Some(Self::Overall);
        }
        let digits = key.strip_prefix(HORIZON_PREFIX)?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        match digits.parse::<u32>() {
            Ok(0) | Err(_) => None,
            Ok(step) => Some(Self::Step(step)),
        }
    }

    /// Integer discriminant: 0 for overall, the step number otherwise.
    #[must_use]
    pub const fn index(self) -> u32 {
        match self {
            Self::Overall => 0,
            Self::Step(step) => step,
        }
    }
}

impl fmt::Display for Horizon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Overall => f.write_str(OVERALL_KEY),
            Self::Step(step) => write!(f, "{step}"),
        }
    }
}

/// One per-step metrics block as stored on a [`Run`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HorizonMetrics {
    horizon: Horizon,
    metrics: MetricTriple,
}

impl HorizonMetrics {
    /// Create a horizon metrics block.
    #[must_use]
    pub const fn new(horizon: Horizon, metrics: MetricTriple) -> Self {
        Self { horizon, metrics }
    }

    /// Get the horizon.
    #[must_use]
    pub const fn horizon(&self) -> Horizon {
        self.horizon
    }

    /// Get the metrics.
    #[must_use]
    pub const fn metrics(&self) -> &MetricTriple {
        &self.metrics
    }
}

/// A metrics record scoped to one horizon of one run, flattened for
/// tabular hand-off.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HorizonRow {
    model: String,
    dataset: String,
    setting: String,
    #[serde(serialize_with = "serialize_index")]
    horizon: Horizon,
    metrics: MetricTriple,
    observed_at: DateTime<Utc>,
    path: PathBuf,
}

impl HorizonRow {
    fn from_run(run: &Run, horizon: Horizon, metrics: MetricTriple) -> Self {
        Self {
            model: run.model().to_string(),
            dataset: run.dataset().to_string(),
            setting: run.setting().to_string(),
            horizon,
            metrics,
            observed_at: run.observed_at(),
            path: run.source_path().to_path_buf(),
        }
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

    /// Get the setting identifier.
    #[must_use]
    pub fn setting(&self) -> &str {
        &self.setting
    }

    /// Get the horizon.
    #[must_use]
    pub const fn horizon(&self) -> Horizon {
        self.horizon
    }

    /// Get the metrics.
    #[must_use]
    pub const fn metrics(&self) -> &MetricTriple {
        &self.metrics
    }

    /// Get the observation time copied from the owning run.
    #[must_use]
    pub const fn observed_at(&self) -> DateTime<Utc> {
        self.observed_at
    }

    /// Observation time in local time, formatted like [`Run::time_label`].
    #[must_use]
    pub fn time_label(&self) -> String {
        local_time_label(self.observed_at)
    }

    /// Get the source file path.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl Run {
    /// Flatten this run into horizon rows: the overall row first, then one
    /// row per recognized step in ascending order.
    #[must_use]
    pub fn horizon_rows(&self) -> Vec<HorizonRow> {
        std::iter::once(HorizonRow::from_run(self, Horizon::Overall, *self.metrics()))
            .chain(
                self.horizons()
                    .iter()
                    .map(|block| HorizonRow::from_run(self, block.horizon(), *block.metrics())),
            )
            .collect()
    }
}

fn serialize_index<S: Serializer>(horizon: &Horizon, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u32(horizon.index())
}

/// Extract every horizon row of every run, in traversal order.
#[must_use]
pub fn extract_horizon_rows(repository: &RunRepository) -> Vec<HorizonRow> {
    repository.runs().iter().flat_map(Run::horizon_rows).collect()
}
