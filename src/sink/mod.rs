//! Sink hand-off (Arrow/Parquet)
//!
//! Instead of printing, the aggregated rows can be handed to an external
//! dashboard as three named tables:
//!
//! | table                | rows                              |
//! |----------------------|-----------------------------------|
//! | `summary/best_runs`  | one per `(model, dataset)`        |
//! | `detail/all_runs`    | one per run                       |
//! | `horizon/metrics`    | one per horizon row               |
//!
//! Every table is an Arrow [`RecordBatch`]; the [`RowSink`] trait is the
//! seam to whatever consumes them. [`ParquetSink`] writes files,
//! [`MemorySink`] keeps them in memory.

mod batch;
mod memory;
mod parquet_file;

pub use self::batch::{
    all_runs_batch, best_runs_batch, horizon_batch, horizon_schema, run_schema,
};
pub use self::memory::MemorySink;
pub use self::parquet_file::{table_file_name, ParquetSink, MANIFEST_FILE};

use std::collections::BTreeMap;
use std::path::PathBuf;

use arrow::record_batch::RecordBatch;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::experiment::{extract_horizon_rows, RunRepository};
use crate::selection::BestRunSelection;
use crate::Result;

/// Table name of the best-run rows.
pub const BEST_RUNS_TABLE: &str = "summary/best_runs";
/// Table name of the all-run rows.
pub const ALL_RUNS_TABLE: &str = "detail/all_runs";
/// Table name of the horizon rows.
pub const HORIZON_TABLE: &str = "horizon/metrics";

/// Receiver of exported row sets.
pub trait RowSink {
    /// Accept one named table.
    ///
    /// # Errors
    ///
    /// Returns error if the sink cannot store the table.
    fn write_table(&mut self, name: &str, batch: &RecordBatch) -> Result<()>;

    /// Close the export with its manifest.
    ///
    /// # Errors
    ///
    /// Returns error if the sink cannot finalize the export.
    fn finish(&mut self, manifest: &ExportManifest) -> Result<()>;
}

/// Summary of one export, stored next to the tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportManifest {
    /// Logical project the export belongs to.
    pub project: String,
    /// Name of this export run.
    pub run_name: String,
    /// Aggregation root the rows were collected from.
    pub root_dir: PathBuf,
    /// Export creation time.
    pub created_at: DateTime<Utc>,
    /// Row count per table name.
    pub tables: BTreeMap<String, usize>,
}

impl ExportManifest {
    /// Create a manifest with no tables yet.
    #[must_use]
    pub fn new(
        project: impl Into<String>,
        run_name: impl Into<String>,
        root_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            project: project.into(),
            run_name: run_name.into(),
            root_dir: root_dir.into(),
            created_at: Utc::now(),
            tables: BTreeMap::new(),
        }
    }
}

/// Write the three row sets of `repository` to `sink`.
///
/// # Errors
///
/// Returns error if a batch cannot be built or the sink rejects it.
pub fn export<S: RowSink + ?Sized>(
    repository: &RunRepository,
    sink: &mut S,
    mut manifest: ExportManifest,
) -> Result<ExportManifest> {
    let selection = BestRunSelection::select(repository);
    let horizon_rows = extract_horizon_rows(repository);

    let tables = [
        (BEST_RUNS_TABLE, best_runs_batch(&selection)?),
        (ALL_RUNS_TABLE, all_runs_batch(repository)?),
        (HORIZON_TABLE, horizon_batch(&horizon_rows)?),
    ];
    for (name, batch) in &tables {
        sink.write_table(name, batch)?;
        manifest.tables.insert((*name).to_string(), batch.num_rows());
    }
    sink.finish(&manifest)?;

    info!(
        project = %manifest.project,
        run_name = %manifest.run_name,
        best_runs = selection.len(),
        all_runs = repository.run_count(),
        horizon_rows = horizon_rows.len(),
        "export complete"
    );
    Ok(manifest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::experiment::{MetricTriple, Run};

    #[test]
    fn test_export_writes_three_tables() {
        let mut repo = RunRepository::new();
        repo.add_run(Run::new("A", "X_1", MetricTriple::new(Some(1.0), None, None), "a", Utc::now()));
        repo.add_run(Run::new("A", "X_2", MetricTriple::new(Some(2.0), None, None), "b", Utc::now()));

        let mut sink = MemorySink::new();
        let manifest = export(&repo, &mut sink, ExportManifest::new("p", "r", "ckpt")).unwrap();

        assert_eq!(manifest.tables[BEST_RUNS_TABLE], 1);
        assert_eq!(manifest.tables[ALL_RUNS_TABLE], 2);
        assert_eq!(manifest.tables[HORIZON_TABLE], 2);
        assert_eq!(sink.table_names(), vec![BEST_RUNS_TABLE, ALL_RUNS_TABLE, HORIZON_TABLE]);
        assert_eq!(sink.manifest(), Some(&manifest));
    }
}
