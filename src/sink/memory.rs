//! In-memory sink

use arrow::record_batch::RecordBatch;

use super::{ExportManifest, RowSink};
use crate::{Error, Result};

/// Keeps exported tables in memory, in write order.
#[derive(Debug, Default)]
pub struct MemorySink {
    tables: Vec<(String, RecordBatch)>,
    manifest: Option<ExportManifest>,
}

impl MemorySink {
    /// Create an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Names of the written tables, in write order.
    #[must_use]
    pub fn table_names(&self) -> Vec<&str> {
        self.tables.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Get a written table by name.
    #[must_use]
    pub fn table(&self, name: &str) -> Option<&RecordBatch> {
        self.tables
            .iter()
            .find(|(table, _)| table == name)
            .map(|(_, batch)| batch)
    }

    /// Manifest passed to [`RowSink::finish`], once finished.
    #[must_use]
    pub const fn manifest(&self) -> Option<&ExportManifest> {
        self.manifest.as_ref()
    }
}

impl RowSink for MemorySink {
    fn write_table(&mut self, name: &str, batch: &RecordBatch) -> Result<()> {
        if self.manifest.is_some() {
            return Err(Error::Sink(format!("table {name} written after finish")));
        }
        self.tables.push((name.to_string(), batch.clone()));
        Ok(())
    }

    fn finish(&mut self, manifest: &ExportManifest) -> Result<()> {
        self.manifest = Some(manifest.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::datatypes::Schema;
    use std::sync::Arc;

    #[test]
    fn test_write_after_finish_rejected() {
        let mut sink = MemorySink::new();
        let batch = RecordBatch::new_empty(Arc::new(Schema::empty()));
        sink.write_table("t", &batch).unwrap();
        sink.finish(&ExportManifest::new("p", "r", "root")).unwrap();

        let err = sink.write_table("u", &batch).unwrap_err();
        assert!(err.to_string().contains("written after finish"));
        assert!(sink.table("t").is_some());
        assert!(sink.table("u").is_none());
    }
}
