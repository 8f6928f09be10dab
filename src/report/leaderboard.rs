//! Leaderboard Builder - best run per model and dataset, ranked by mean MAE

use crate::experiment::MetricTriple;
use crate::selection::BestRunSelection;
use crate::table::{Align, Table};

use super::format::{format_fixed, format_mape, SUMMARY_PRECISION};

/// Sub-columns of every dataset group.
pub const METRIC_COLUMNS: [&str; 3] = ["MAE", "RMSE", "MAPE"];

/// One model's row: its best-run metrics per dataset column.
#[derive(Debug, Clone, PartialEq)]
pub struct LeaderboardRow {
    model: String,
    mean_mae: Option<f64>,
    cells: Vec<Option<MetricTriple>>,
}

impl LeaderboardRow {
    /// Get the model name.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Mean MAE over the datasets where this model has a best run with an MAE.
    #[must_use]
    pub const fn mean_mae(&self) -> Option<f64> {
        self.mean_mae
    }

    /// Per-dataset metrics, aligned with [`Leaderboard::datasets`].
    #[must_use]
    pub fn cells(&self) -> &[Option<MetricTriple>] {
        &self.cells
    }
}

/// Summary table: models as rows, datasets as column groups.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Leaderboard {
    datasets: Vec<String>,
    rows: Vec<LeaderboardRow>,
}

impl Leaderboard {
    /// Build from a best-run selection.
    ///
    /// Models and datasets start in lexicographic order; rows are then
    /// stably sorted by ascending mean MAE, models without any MAE last.
    #[must_use]
    pub fn build(selection: &BestRunSelection<'_>) -> Self {
        let datasets: Vec<String> = selection.datasets().into_iter().map(String::from).collect();

        let mut rows: Vec<LeaderboardRow> = selection
            .models()
            .into_iter()
            .map(|model| {
                let cells: Vec<Option<MetricTriple>> = datasets
                    .iter()
                    .map(|dataset| selection.get(model, dataset).map(|run| *run.metrics()))
                    .collect();
                LeaderboardRow {
                    model: model.to_string(),
                    mean_mae: mean(cells.iter().flatten().filter_map(MetricTriple::mae)),
                    cells,
                }
            })
            .collect();

        rows.sort_by(|a, b| {
            let a = a.mean_mae.unwrap_or(f64::INFINITY);
            let b = b.mean_mae.unwrap_or(f64::INFINITY);
            a.total_cmp(&b)
        });

        Self { datasets, rows }
    }

    /// Check if there are no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Dataset column groups, sorted.
    #[must_use]
    pub fn datasets(&self) -> &[String] {
        &self.datasets
    }

    /// Rows in rank order.
    #[must_use]
    pub fn rows(&self) -> &[LeaderboardRow] {
        &self.rows
    }

    /// Lay the leaderboard out as a two-header-row table.
    #[must_use]
    pub fn to_table(&self) -> Table {
        let columns = 1 + METRIC_COLUMNS.len() * self.datasets.len();
        let mut aligns = vec![Align::Right; columns];
        aligns[0] = Align::Left;

        let group_header = std::iter::once("Dataset".to_string()).chain(
            self.datasets
                .iter()
                .flat_map(|d| [d.clone(), String::new(), String::new()]),
        );
        let metric_header = std::iter::once("Metric")
            .chain(self.datasets.iter().flat_map(|_| METRIC_COLUMNS))
            .map(String::from);

        let mut table = Table::new(aligns)
            .with_header(group_header, Align::Center)
            .with_header(metric_header, Align::Center);

        for row in &self.rows {
            let cells = std::iter::once(row.model.clone()).chain(row.cells.iter().flat_map(|cell| {
                cell.map_or_else(
                    || [String::new(), String::new(), String::new()],
                    |m| {
                        [
                            format_fixed(m.mae(), SUMMARY_PRECISION),
                            format_fixed(m.rmse(), SUMMARY_PRECISION),
                            format_mape(m.mape()),
                        ]
                    },
                )
            }));
            table.push_row(cells);
        }
        table
    }
}

#[allow(clippy::cast_precision_loss)]
fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}
