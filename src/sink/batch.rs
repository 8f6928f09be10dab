//! Row sets as Arrow record batches
//!
//! Metric columns are nullable `Float64`: a value is a float or an explicit
//! null, never a mixed type.

use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, StringArray, UInt32Array};
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use arrow::record_batch::RecordBatch;

use crate::experiment::{HorizonRow, MetricTriple, Run, RunRepository};
use crate::selection::BestRunSelection;
use crate::Result;

/// Schema shared by `best_runs` and `all_runs`.
#[must_use]
pub fn run_schema() -> SchemaRef {
    Arc::new(Schema::new(vec![
        Field::new("model", DataType::Utf8, false),
        Field::new("dataset", DataType::Utf8, false),
        Field::new("MAE", DataType::Float64, true),
        Field::new("RMSE", DataType::Float64, true),
        Field::new("MAPE", DataType::Float64, true),
        Field::new("setting", DataType::Utf8, false),
        Field::new("time", DataType::Utf8, false),
        Field::new("path", DataType::Utf8, false),
    ]))
}

/// Schema of `horizon_metrics`.
#[must_use]
pub fn horizon_schema() -> SchemaRef {
    Arc::new(Schema::new(vec![
        Field::new("model", DataType::Utf8, false),
        Field::new("dataset", DataType::Utf8, false),
        Field::new("setting", DataType::Utf8, false),
        Field::new("horizon", DataType::UInt32, false),
        Field::new("MAE", DataType::Float64, true),
        Field::new("MAPE", DataType::Float64, true),
        Field::new("RMSE", DataType::Float64, true),
        Field::new("time", DataType::Utf8, false),
        Field::new("path", DataType::Utf8, false),
    ]))
}

/// One row per `(model, dataset)` best run, in key order.
///
/// # Errors
///
/// Returns error if the batch cannot be assembled.
pub fn best_runs_batch(selection: &BestRunSelection<'_>) -> Result<RecordBatch> {
    let runs: Vec<&Run> = selection.iter().map(|(_, run)| run).collect();
    runs_batch(&runs)
}

/// One row per run, in key order then insertion order.
///
/// # Errors
///
/// Returns error if the batch cannot be assembled.
pub fn all_runs_batch(repository: &RunRepository) -> Result<RecordBatch> {
    let runs: Vec<&Run> = repository.groups().flat_map(|(_, runs)| runs).collect();
    runs_batch(&runs)
}

fn runs_batch(runs: &[&Run]) -> Result<RecordBatch> {
    let metrics = || runs.iter().map(|run| run.metrics());
    let columns = vec![
        string_column(runs.iter().map(|r| r.model())),
        string_column(runs.iter().map(|r| r.dataset())),
        metric_column(metrics().map(MetricTriple::mae)),
        metric_column(metrics().map(MetricTriple::rmse)),
        metric_column(metrics().map(MetricTriple::mape)),
        string_column(runs.iter().map(|r| r.setting())),
        string_column(runs.iter().map(|r| r.time_label())),
        string_column(runs.iter().map(|r| r.source_path().display().to_string())),
    ];
    Ok(RecordBatch::try_new(run_schema(), columns)?)
}

/// One row per horizon row, in the given order.
///
/// # Errors
///
/// Returns error if the batch cannot be assembled.
pub fn horizon_batch(rows: &[HorizonRow]) -> Result<RecordBatch> {
    let metrics = || rows.iter().map(HorizonRow::metrics);
    let columns = vec![
        string_column(rows.iter().map(HorizonRow::model)),
        string_column(rows.iter().map(HorizonRow::dataset)),
        string_column(rows.iter().map(HorizonRow::setting)),
        Arc::new(UInt32Array::from_iter_values(
            rows.iter().map(|r| r.horizon().index()),
        )) as ArrayRef,
        metric_column(metrics().map(MetricTriple::mae)),
        metric_column(metrics().map(MetricTriple::mape)),
        metric_column(metrics().map(MetricTriple::rmse)),
        string_column(rows.iter().map(HorizonRow::time_label)),
        string_column(rows.iter().map(|r| r.path().display().to_string())),
    ];
    Ok(RecordBatch::try_new(horizon_schema(), columns)?)
}

fn string_column<S: AsRef<str>>(values: impl Iterator<Item = S>) -> ArrayRef {
    Arc::new(StringArray::from_iter_values(values))
}

fn metric_column(values: impl Iterator<Item = Option<f64>>) -> ArrayRef {
    Arc::new(values.collect::<Float64Array>())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::experiment::{extract_horizon_rows, Horizon, HorizonMetrics};
    use arrow::array::Array;
    use chrono::Utc;

    fn repo() -> RunRepository {
        let mut repo = RunRepository::new();
        repo.add_run(
            Run::builder("STID", "PEMS04_12", "s.json", Utc::now())
                .metrics(MetricTriple::new(Some(18.0), None, Some(0.12)))
                .horizon(HorizonMetrics::new(Horizon::Step(1), MetricTriple::new(Some(15.0), None, None)))
                .build(),
        );
        repo.add_run(Run::new(
            "STID",
            "PEMS04_24",
            MetricTriple::new(Some(21.0), Some(33.0), None),
            "t.json",
            Utc::now(),
        ));
        repo
    }

    #[test]
    fn test_best_runs_batch() {
        let repo = repo();
        let batch = best_runs_batch(&BestRunSelection::select(&repo)).unwrap();
        assert_eq!(batch.num_rows(), 1);
        assert_eq!(batch.schema(), run_schema());

        let rmse = batch.column(3).as_any().downcast_ref::<Float64Array>().unwrap();
        assert!(rmse.is_null(0));
        let setting = batch.column(5).as_any().downcast_ref::<StringArray>().unwrap();
        assert_eq!(setting.value(0), "PEMS04_12");
    }

    #[test]
    fn test_all_runs_batch() {
        let batch = all_runs_batch(&repo()).unwrap();
        assert_eq!(batch.num_rows(), 2);
        let mae = batch.column(2).as_any().downcast_ref::<Float64Array>().unwrap();
        assert!((mae.value(1) - 21.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_horizon_batch() {
        let rows = extract_horizon_rows(&repo());
        let batch = horizon_batch(&rows).unwrap();
        assert_eq!(batch.num_rows(), 3);
        let horizon = batch.column(3).as_any().downcast_ref::<UInt32Array>().unwrap();
        assert_eq!(horizon.values().to_vec(), vec![0, 1, 0]);
        let mape = batch.column(5).as_any().downcast_ref::<Float64Array>().unwrap();
        assert!(!mape.is_null(0));
        assert!(mape.is_null(1));
    }
}
