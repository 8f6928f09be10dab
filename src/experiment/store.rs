//! Run Repository - in-memory collection of every parsed run
//!
//! Runs are kept in insertion (traversal) order and indexed by
//! `(model, dataset)`. Nothing is dropped: best-run selection and the
//! detail views both read from here.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use super::Run;

/// Aggregation key of a run: `(model, dataset)`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AggregationKey {
    model: String,
    dataset: String,
}

impl AggregationKey {
    /// Create a key.
    #[must_use]
    pub fn new(model: impl Into<String>, dataset: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            dataset: dataset.into(),
        }
    }

    /// Key of an existing run.
    #[must_use]
    pub fn of(run: &Run) -> Self {
        Self::new(run.model(), run.dataset())
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
}

impl fmt::Display for AggregationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.model, self.dataset)
    }
}

/// In-memory store of runs.
///
/// ## Design
///
/// Runs live in one vector in the order they were added; the key index
/// holds positions into it, so per-key sequences keep insertion order and
/// a full iteration replays traversal order.
#[derive(Debug, Default)]
pub struct RunRepository {
    runs: Vec<Run>,
    index: BTreeMap<AggregationKey, Vec<usize>>,
}

impl RunRepository {
    /// Create a new empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the repository holds no runs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Get the number of runs.
    #[must_use]
    pub fn run_count(&self) -> usize {
        self.runs.len()
    }

    /// Get the number of distinct `(model, dataset)` keys.
    #[must_use]
    pub fn key_count(&self) -> usize {
        self.index.len()
    }

    /// Add a run.
    pub fn add_run(&mut self, run: Run) {
        let position = self.runs.len();
        self.index
            .entry(AggregationKey::of(&run))
            .or_default()
            .push(position);
        self.runs.push(run);
    }

    /// All runs in insertion order.
    #[must_use]
    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    /// Runs for one key, in insertion order.
    #[must_use]
    pub fn runs_for(&self, key: &AggregationKey) -> Vec<&Run> {
        self.index
            .get(key)
            .map(|positions| positions.iter().map(|&i| &self.runs[i]).collect())
            .unwrap_or_default()
    }

    /// Iterate keys in sorted order with their runs in insertion order.
    pub fn groups(&self) -> impl Iterator<Item = (&AggregationKey, Vec<&Run>)> + '_ {
        self.index.iter().map(move |(key, positions)| {
            (key, positions.iter().map(|&i| &self.runs[i]).collect())
        })
    }

    /// Runs for one dataset across every model, grouped by model (sorted)
    /// and in insertion order within a model.
    #[must_use]
    pub fn runs_for_dataset(&self, dataset: &str) -> Vec<&Run> {
        self.groups()
            .filter(|(key, _)| key.dataset() == dataset)
            .flat_map(|(_, runs)| runs)
            .collect()
    }

    /// Distinct model names, sorted.
    #[must_use]
    pub fn models(&self) -> BTreeSet<&str> {
        self.index.keys().map(AggregationKey::model).collect()
    }

    /// Distinct dataset names, sorted.
    #[must_use]
    pub fn datasets(&self) -> BTreeSet<&str> {
        self.index.keys().map(AggregationKey::dataset).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::experiment::MetricTriple;
    use chrono::Utc;

    fn run(model: &str, setting: &str, mae: f64) -> Run {
        Run::new(
            model,
            setting,
            MetricTriple::new(Some(mae), None, None),
            format!("{model}/{setting}/test_metrics.json"),
            Utc::now(),
        )
    }

    #[test]
    fn test_repository_default() {
        let repo = RunRepository::new();
        assert!(repo.is_empty());
        assert_eq!(repo.run_count(), 0);
        assert_eq!(repo.key_count(), 0);
        assert!(repo.runs_for(&AggregationKey::new("m", "d")).is_empty());
    }

    #[test]
    fn test_runs_for_preserves_insertion_order() {
        let mut repo = RunRepository::new();
        repo.add_run(run("STID", "PEMS04_1", 3.0));
        repo.add_run(run("GWNet", "PEMS04_1", 1.0));
        repo.add_run(run("STID", "PEMS04_2", 2.0));

        let stid = repo.runs_for(&AggregationKey::new("STID", "PEMS04"));
        assert_eq!(stid.len(), 2);
        assert_eq!(stid[0].setting(), "PEMS04_1");
        assert_eq!(stid[1].setting(), "PEMS04_2");
        assert_eq!(repo.key_count(), 2);
        assert_eq!(repo.runs()[1].model(), "GWNet");
    }

    #[test]
    fn test_models_and_datasets_sorted() {
        let mut repo = RunRepository::new();
        repo.add_run(run("STID", "PEMS08_1", 3.0));
        repo.add_run(run("DCRNN", "METR-LA", 1.0));
        repo.add_run(run("STID", "METR-LA", 2.0));

        assert_eq!(repo.models().into_iter().collect::<Vec<_>>(), vec!["DCRNN", "STID"]);
        assert_eq!(repo.datasets().into_iter().collect::<Vec<_>>(), vec!["METR-LA", "PEMS08"]);
        let metr: Vec<&str> = repo.runs_for_dataset("METR-LA").iter().map(|r| r.model()).collect();
        assert_eq!(metr, vec!["DCRNN", "STID"]);
    }
}
