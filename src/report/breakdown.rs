//! Per-horizon console breakdown, one table per dataset

use std::collections::BTreeMap;

use crate::experiment::HorizonRow;
use crate::table::{Align, Table};

use super::format::{format_fixed, format_mape, DETAIL_PRECISION};

const HEADERS: [&str; 6] = ["Model", "Setting", "Horizon", "MAE", "RMSE", "MAPE"];
const ALIGNS: [Align; 6] = [
    Align::Left,
    Align::Left,
    Align::Right,
    Align::Right,
    Align::Right,
    Align::Right,
];

/// Horizon rows of one dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct HorizonTable<'a> {
    dataset: &'a str,
    rows: Vec<&'a HorizonRow>,
}

impl<'a> HorizonTable<'a> {
    /// Get the dataset name.
    #[must_use]
    pub const fn dataset(&self) -> &'a str {
        self.dataset
    }

    /// Rows ordered by model, setting, then horizon.
    #[must_use]
    pub fn rows(&self) -> &[&'a HorizonRow] {
        &self.rows
    }

    /// Banner printed above the table.
    #[must_use]
    pub fn title(&self) -> String {
        format!("===== {} horizons =====", self.dataset)
    }

    /// Lay the rows out as a table; horizon 0 is shown as `overall`.
    #[must_use]
    pub fn to_table(&self) -> Table {
        let mut table = Table::new(ALIGNS.to_vec()).with_header(HEADERS, Align::Center);
        for row in &self.rows {
            let metrics = row.metrics();
            table.push_row([
                row.model().to_string(),
                row.setting().to_string(),
                row.horizon().to_string(),
                format_fixed(metrics.mae(), DETAIL_PRECISION),
                format_fixed(metrics.rmse(), DETAIL_PRECISION),
                format_mape(metrics.mape()),
            ]);
        }
        table
    }
}

/// Group horizon rows by dataset (sorted); rows keep a stable
/// model/setting/horizon order within each group.
#[must_use]
pub fn build_horizon_tables(rows: &[HorizonRow]) -> Vec<HorizonTable<'_>> {
    let mut by_dataset: BTreeMap<&str, Vec<&HorizonRow>> = BTreeMap::new();
    for row in rows {
        by_dataset.entry(row.dataset()).or_default().push(row);
    }
    by_dataset
        .into_iter()
        .map(|(dataset, mut rows)| {
            rows.sort_by(|a, b| {
                (a.model(), a.setting(), a.horizon()).cmp(&(b.model(), b.setting(), b.horizon()))
            });
            HorizonTable { dataset, rows }
        })
        .collect()
}
