//! Parquet sink
//!
//! Layout of one export:
//!
//! ```text
//! <out_dir>/<project>/<run_name>/
//!     summary_best_runs.parquet
//!     detail_all_runs.parquet
//!     horizon_metrics.parquet
//!     manifest.json
//! ```
//!
//! Each table is written in a single append; there are no partial updates.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::file::properties::WriterProperties;

use super::{ExportManifest, RowSink};
use crate::{Error, Result};

/// File name of the export manifest.
pub const MANIFEST_FILE: &str = "manifest.json";

/// File name for a table: `/` becomes `_`, `.parquet` is appended.
#[must_use]
pub fn table_file_name(table: &str) -> String {
    format!("{}.parquet", table.replace('/', "_"))
}

/// Writes each table as a Parquet file below a destination directory.
#[derive(Debug)]
pub struct ParquetSink {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl ParquetSink {
    /// Create the destination directory (and parents) and a sink writing into it.
    ///
    /// # Errors
    ///
    /// Returns error if the directory cannot be created.
    pub fn create<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).map_err(|e| {
            Error::Sink(format!("Failed to create export directory {}: {e}", dir.display()))
        })?;
        Ok(Self {
            dir,
            written: Vec::new(),
        })
    }

    /// Get the destination directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Files written so far, tables first then the manifest.
    #[must_use]
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl RowSink for ParquetSink {
    fn write_table(&mut self, name: &str, batch: &RecordBatch) -> Result<()> {
        let path = self.dir.join(table_file_name(name));
        let file = File::create(&path).map_err(|e| {
            Error::Sink(format!("Failed to create {}: {e}", path.display()))
        })?;

        let props = WriterProperties::builder().build();
        let mut writer = ArrowWriter::try_new(file, batch.schema(), Some(props))?;
        writer.write(batch)?;
        writer.close()?;

        self.written.push(path);
        Ok(())
    }

    fn finish(&mut self, manifest: &ExportManifest) -> Result<()> {
        let path = self.dir.join(MANIFEST_FILE);
        let json = serde_json::to_string_pretty(manifest)?;
        fs::write(&path, json)?;
        self.written.push(path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_file_name() {
        assert_eq!(table_file_name("summary/best_runs"), "summary_best_runs.parquet");
        assert_eq!(table_file_name("plain"), "plain.parquet");
    }
}
