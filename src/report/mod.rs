//! Console reports
//!
//! Three views, all rendered through [`crate::table::Table`]:
//!
//! - [`Leaderboard`]: best run per model and dataset, ranked by mean MAE
//! - [`DetailTable`]: every run of one dataset, best first
//! - [`HorizonTable`]: per-horizon metrics of one dataset (opt-in)

mod breakdown;
mod detail;
mod format;
mod leaderboard;

pub use breakdown::{build_horizon_tables, HorizonTable};
pub use detail::{build_detail_tables, DetailRow, DetailTable};
pub use format::{format_fixed, format_mape, DETAIL_PRECISION, MAPE_PRECISION, SUMMARY_PRECISION};
pub use leaderboard::{Leaderboard, LeaderboardRow, METRIC_COLUMNS};

use crate::experiment::{extract_horizon_rows, RunRepository};
use crate::selection::BestRunSelection;

/// Which sections a console report contains beyond the leaderboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsoleSections {
    /// Per-dataset detail tables.
    pub details: bool,
    /// Per-dataset horizon breakdown tables.
    pub horizons: bool,
}

impl Default for ConsoleSections {
    fn default() -> Self {
        Self {
            details: true,
            horizons: false,
        }
    }
}

/// Render the full console report for a non-empty repository.
///
/// Sections are separated by a blank line and a `===== <dataset> =====`
/// banner.
#[must_use]
pub fn render_console(repository: &RunRepository, sections: ConsoleSections) -> String {
    let selection = BestRunSelection::select(repository);
    let mut out = Leaderboard::build(&selection).to_table().render();

    if sections.details {
        for detail in build_detail_tables(repository) {
            out.push('\n');
            out.push_str(&detail.title());
            out.push('\n');
            out.push_str(&detail.to_table().render());
        }
    }

    if sections.horizons {
        let rows = extract_horizon_rows(repository);
        for table in build_horizon_tables(&rows) {
            out.push('\n');
            out.push_str(&table.title());
            out.push('\n');
            out.push_str(&table.to_table().render());
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::experiment::{MetricTriple, Run};
    use chrono::Utc;

    fn repo() -> RunRepository {
        let mut repo = RunRepository::new();
        repo.add_run(Run::new(
            "STID",
            "PEMS04_12",
            MetricTriple::new(Some(18.0), Some(30.0), Some(0.12)),
            "STID/PEMS04_12/test_metrics.json",
            Utc::now(),
        ));
        repo
    }

    #[test]
    fn test_default_sections() {
        let out = render_console(&repo(), ConsoleSections::default());
        assert!(out.contains("| Dataset |"));
        assert!(out.contains("\n===== PEMS04 =====\n"));
        assert!(!out.contains("horizons ====="));
    }

    #[test]
    fn test_leaderboard_only_and_horizons() {
        let summary = render_console(
            &repo(),
            ConsoleSections {
                details: false,
                horizons: false,
            },
        );
        assert!(!summary.contains("====="));

        let full = render_console(
            &repo(),
            ConsoleSections {
                details: true,
                horizons: true,
            },
        );
        assert!(full.contains("===== PEMS04 horizons ====="));
        assert!(full.contains("overall"));
    }
}
