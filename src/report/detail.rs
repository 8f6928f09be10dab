//! Detail Builder - every run of one dataset, best first

use crate::experiment::{MetricTriple, Run, RunRepository};
use crate::table::{Align, Table};

use super::format::{format_fixed, format_mape, DETAIL_PRECISION};

const HEADERS: [&str; 5] = ["Model", "Time", "MAE", "RMSE", "MAPE"];
const ALIGNS: [Align; 5] = [Align::Left, Align::Left, Align::Right, Align::Right, Align::Right];

/// One run as listed on a detail table.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailRow {
    model: String,
    setting: String,
    time: String,
    metrics: MetricTriple,
}

impl DetailRow {
    fn from_run(run: &Run) -> Self {
        Self {
            model: run.model().to_string(),
            setting: run.setting().to_string(),
            time: run.time_label(),
            metrics: *run.metrics(),
        }
    }

    /// Get the model name.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Get the setting identifier.
    #[must_use]
    pub fn setting(&self) -> &str {
        &self.setting
    }

    /// Get the formatted observation time.
    #[must_use]
    pub fn time(&self) -> &str {
        &self.time
    }

    /// Get the overall metrics.
    #[must_use]
    pub const fn metrics(&self) -> &MetricTriple {
        &self.metrics
    }
}

/// All runs of one dataset, sorted by ascending MAE.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailTable {
    dataset: String,
    rows: Vec<DetailRow>,
}

impl DetailTable {
    /// Build the table for one dataset.
    ///
    /// Returns `None` when the dataset has no runs. Rows sort by ascending
    /// MAE with absent MAE last; equal keys keep repository order.
    #[must_use]
    pub fn build(repository: &RunRepository, dataset: &str) -> Option<Self> {
        let mut rows: Vec<DetailRow> = repository
            .runs_for_dataset(dataset)
            .into_iter()
            .map(DetailRow::from_run)
            .collect();
        if rows.is_empty() {
            return None;
        }
        rows.sort_by(|a, b| a.metrics.mae_or_inf().total_cmp(&b.metrics.mae_or_inf()));
        Some(Self {
            dataset: dataset.to_string(),
            rows,
        })
    }

    /// Get the dataset name.
    #[must_use]
    pub fn dataset(&self) -> &str {
        &self.dataset
    }

    /// Rows, best first.
    #[must_use]
    pub fn rows(&self) -> &[DetailRow] {
        &self.rows
    }

    /// Banner printed above the table.
    #[must_use]
    pub fn title(&self) -> String {
        format!("===== {} =====", self.dataset)
    }

    /// Lay the rows out as a table.
    #[must_use]
    pub fn to_table(&self) -> Table {
        let mut table = Table::new(ALIGNS.to_vec()).with_header(HEADERS, Align::Center);
        for row in &self.rows {
            table.push_row([
                row.model.clone(),
                row.time.clone(),
                format_fixed(row.metrics.mae(), DETAIL_PRECISION),
                format_fixed(row.metrics.rmse(), DETAIL_PRECISION),
                format_mape(row.metrics.mape()),
            ]);
        }
        table
    }
}

/// One detail table per dataset with at least one run, in dataset order.
#[must_use]
pub fn build_detail_tables(repository: &RunRepository) -> Vec<DetailTable> {
    repository
        .datasets()
        .into_iter()
        .filter_map(|dataset| DetailTable::build(repository, dataset))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn run(model: &str, setting: &str, mae: Option<f64>) -> Run {
        Run::new(
            model,
            setting,
            MetricTriple::new(mae, Some(1.5), Some(12.0)),
            format!("{model}/{setting}"),
            Utc::now(),
        )
    }

    #[test]
    fn test_sorted_by_mae_absent_last() {
        let mut repo = RunRepository::new();
        repo.add_run(run("A", "X_1", None));
        repo.add_run(run("A", "X_2", Some(3.0)));
        repo.add_run(run("B", "X_1", Some(1.0)));
        repo.add_run(run("B", "Y_1", Some(0.5)));

        let table = DetailTable::build(&repo, "X").unwrap();
        let order: Vec<(&str, &str)> = table.rows().iter().map(|r| (r.model(), r.setting())).collect();
        assert_eq!(order, vec![("B", "X_1"), ("A", "X_2"), ("A", "X_1")]);
    }

    #[test]
    fn test_ties_are_stable() {
        let mut repo = RunRepository::new();
        repo.add_run(run("A", "X_first", Some(2.0)));
        repo.add_run(run("A", "X_second", Some(2.0)));
        let table = DetailTable::build(&repo, "X").unwrap();
        assert_eq!(table.rows()[0].setting(), "X_first");
        assert_eq!(table.rows()[1].setting(), "X_second");
    }

    #[test]
    fn test_unknown_dataset_yields_none() {
        let repo = RunRepository::new();
        assert!(DetailTable::build(&repo, "X").is_none());
        assert!(build_detail_tables(&repo).is_empty());
    }

    #[test]
    fn test_table_cells() {
        let mut repo = RunRepository::new();
        repo.add_run(run("STID", "PEMS04_12", Some(18.123_456)));
        let table = DetailTable::build(&repo, "PEMS04").unwrap();
        assert_eq!(table.title(), "===== PEMS04 =====");

        let grid = table.to_table();
        let cells = &grid.body()[0];
        assert_eq!(cells[0], "STID");
        assert_eq!(cells[2], "18.1235");
        assert_eq!(cells[3], "1.5000");
        assert_eq!(cells[4], "12.00%");
    }

    #[test]
    fn test_header_centering_over_odd_width() {
        let mut repo = RunRepository::new();
        repo.add_run(Run::new(
            "STID",
            "PEMS04_12",
            MetricTriple::new(Some(18.5), Some(31.2), Some(0.128)),
            "STID/PEMS04_12",
            Utc::now(),
        ));
        let rendered = DetailTable::build(&repo, "PEMS04").unwrap().to_table().render();
        let header = rendered.lines().nth(1).unwrap();
        assert!(header.starts_with("| Model |"));
        assert!(header.contains("|   MAE   |   RMSE  |  MAPE  |"));
    }
}
