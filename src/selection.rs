//! Best-Run Selector
//!
//! For every `(model, dataset)` key, the run with the smallest MAE wins.
//! Absent MAE counts as positive infinity; ties go to the run inserted
//! first.

use std::collections::BTreeMap;

use crate::experiment::{AggregationKey, Run, RunRepository};

/// Chosen run per aggregation key, borrowed from a [`RunRepository`].
#[derive(Debug, Default)]
pub struct BestRunSelection<'a> {
    best: BTreeMap<AggregationKey, &'a Run>,
}

impl<'a> BestRunSelection<'a> {
    /// Select the best run for every key of `repository`.
    #[must_use]
    pub fn select(repository: &'a RunRepository) -> Self {
        let best = repository
            .groups()
            .filter_map(|(key, runs)| best_of(runs).map(|run| (key.clone(), run)))
            .collect();
        Self { best }
    }

    /// Check if nothing was selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.best.is_empty()
    }

    /// Number of selected runs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.best.len()
    }

    /// Best run for `(model, dataset)`, if that pair has any run.
    #[must_use]
    pub fn get(&self, model: &str, dataset: &str) -> Option<&'a Run> {
        self.best.get(&AggregationKey::new(model, dataset)).copied()
    }

    /// Iterate selections in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&AggregationKey, &'a Run)> + '_ {
        self.best.iter().map(|(key, run)| (key, *run))
    }

    /// Models with a selection, sorted.
    #[must_use]
    pub fn models(&self) -> Vec<&str> {
        let mut models: Vec<&str> = self.best.keys().map(AggregationKey::model).collect();
        models.dedup();
        models
    }

    /// Datasets with a selection, sorted.
    #[must_use]
    pub fn datasets(&self) -> Vec<&str> {
        let mut datasets: Vec<&str> = self.best.keys().map(AggregationKey::dataset).collect();
        datasets.sort_unstable();
        datasets.dedup();
        datasets
    }
}

/// Stable minimum by MAE: the first of several equal minima wins.
#[must_use]
pub fn best_of<'a>(runs: impl IntoIterator<Item = &'a Run>) -> Option<&'a Run> {
    runs.into_iter()
        .min_by(|a, b| a.metrics().mae_or_inf().total_cmp(&b.metrics().mae_or_inf()))
}
