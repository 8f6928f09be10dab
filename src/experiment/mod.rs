//! Experiment Result Schema
//!
//! Data structures for the runs read out of a checkpoint tree.
//!
//! ## Schema Overview
//!
//! ```text
//! RunRepository ──< AggregationKey (model, dataset)
//!                        │
//!                        └──< Run (N) [traversal order]
//!                               │
//!                               ├── MetricTriple [overall]
//!                               └──< HorizonMetrics (N) [per step]
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use chrono::Utc;
//! use metric_board::experiment::{AggregationKey, MetricTriple, Run, RunRepository};
//!
//! let mut repo = RunRepository::new();
//! let metrics = MetricTriple::new(Some(19.1), Some(31.2), Some(0.128));
//! repo.add_run(Run::new("STID", "PEMS04_300_12_12", metrics, "a/test_metrics.json", Utc::now()));
//!
//! let runs = repo.runs_for(&AggregationKey::new("STID", "PEMS04"));
//! assert_eq!(runs.len(), 1);
//! ```

mod horizon;
mod metrics;
mod run_record;
mod store;

pub use horizon::{extract_horizon_rows, Horizon, HorizonMetrics, HorizonRow, OVERALL_KEY};
pub use metrics::{MetricTriple, MAE_KEY, MAPE_KEY, RMSE_KEY};
pub use run_record::{dataset_of, Run, RunBuilder, TIME_FORMAT};
pub use store::{AggregationKey, RunRepository};
