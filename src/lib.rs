//! # metric-board: Experiment Result Leaderboards
//!
//! metric-board walks a checkpoint tree written by a forecasting training
//! runner, reads every `test_metrics.json`, and answers two questions:
//!
//! - which configuration of each model is best on each dataset, and how do
//!   the models rank across datasets (the leaderboard), and
//! - what is the full history of runs, and their per-horizon breakdown,
//!   for a given dataset (the detail and horizon tables).
//!
//! ## Pipeline
//!
//! ```text
//! locate ──> parse ──> RunRepository ──┬──> BestRunSelection ──> Leaderboard ──┐
//!                                      ├──> DetailTable ────────────────────────┼──> Table ──> stdout
//!                                      └──> HorizonRow ──> (HorizonTable) ──────┘
//!                                                     └──> sink (Arrow/Parquet)
//! ```
//!
//! One unreadable result file never blanks the report: it is logged and
//! skipped, and its siblings are aggregated as usual.
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::Utc;
//! use metric_board::experiment::{MetricTriple, Run, RunRepository};
//! use metric_board::report::Leaderboard;
//! use metric_board::selection::BestRunSelection;
//!
//! let mut repo = RunRepository::new();
//! let m = |mae| MetricTriple::new(Some(mae), None, None);
//! repo.add_run(Run::new("A", "X_12", m(5.0), "A/X_12/test_metrics.json", Utc::now()));
//! repo.add_run(Run::new("A", "Y_12", m(7.0), "A/Y_12/test_metrics.json", Utc::now()));
//! repo.add_run(Run::new("B", "X_12", m(4.0), "B/X_12/test_metrics.json", Utc::now()));
//!
//! let board = Leaderboard::build(&BestRunSelection::select(&repo));
//! assert_eq!(board.rows()[0].model(), "B");
//! println!("{}", board.to_table().render());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod config;
pub mod driver;
pub mod error;
pub mod experiment;
pub mod locate;
pub mod parse;
pub mod report;
pub mod selection;
pub mod sink;
pub mod table;

pub use error::{Error, Result};
