//! Error types for metric-board
//!
//! Every variant names the file or table it concerns so a skipped result can
//! be tracked down from the warning line alone.

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// metric-board error types
#[derive(Error, Debug)]
pub enum Error {
    /// Result file parsed as JSON but does not have the expected shape
    #[error("Invalid result document: {0}\nExpected an object with an \"overall\" metrics block")]
    InvalidDocument(String),

    /// Export sink rejected a table or manifest
    #[error("Sink error: {0}")]
    Sink(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON decode/encode error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Directory traversal error
    #[error("Traversal error: {0}")]
    Walk(#[from] walkdir::Error),

    /// Arrow error
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// Parquet error
    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),
}
