//! Result Parser - turns one result file into a [`Run`]
//!
//! Expected document shape:
//!
//! ```json
//! {
//!   "overall":   {"MAE": 19.1, "RMSE": 31.2, "MAPE": 0.128},
//!   "horizon_1": {"MAE": 17.0, "RMSE": 27.9, "MAPE": 0.113}
//! }
//! ```
//!
//! A missing `"overall"` block yields a run with every metric absent.
//! Bare `NaN` / `Infinity` / `-Infinity`, as written by Python's `json`
//! module for diverged metrics, decode as absent values.
//! Blocks other than `overall` / `horizon_<N>` are ignored, as are
//! horizon blocks that are not objects.

use std::borrow::Cow;
use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::experiment::{Horizon, HorizonMetrics, MetricTriple, Run, OVERALL_KEY};
use crate::locate::ResultLocation;
use crate::{Error, Result};

/// Parsed contents of one result file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultDocument {
    overall: MetricTriple,
    horizons: Vec<HorizonMetrics>,
}

impl ResultDocument {
    /// Parse a result document from JSON text.
    ///
    /// # Errors
    ///
    /// Returns error if the text is not JSON, is not an object, or holds an
    /// `"overall"` entry that is not an object.
    pub fn parse(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(&null_non_finite(text))?;
        let Value::Object(object) = value else {
            return Err(Error::InvalidDocument(format!(
                "top level is {}, not an object",
                kind_of(&value)
            )));
        };
        Self::from_object(&object)
    }

    /// Read and parse a result file.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or parsed.
    pub fn read(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }

    fn from_object(object: &Map<String, Value>) -> Result<Self> {
        let mut document = Self::default();
        for (key, block) in object {
            let Some(horizon) = Horizon::parse_key(key) else {
                continue;
            };
            match (horizon, block) {
                (Horizon::Overall, Value::Object(metrics)) => {
                    document.overall = MetricTriple::from_object(metrics);
                }
                (Horizon::Overall, other) => {
                    return Err(Error::InvalidDocument(format!(
                        "\"{OVERALL_KEY}\" is {}, not an object",
                        kind_of(other)
                    )));
                }
                (step, Value::Object(metrics)) => {
                    document
                        .horizons
                        .push(HorizonMetrics::new(step, MetricTriple::from_object(metrics)));
                }
                (_, _) => {}
            }
        }
        document.horizons.sort_by_key(HorizonMetrics::horizon);
        Ok(document)
    }

    /// Get the overall metrics.
    #[must_use]
    pub const fn overall(&self) -> &MetricTriple {
        &self.overall
    }

    /// Get the per-step blocks, ordered by step.
    #[must_use]
    pub fn horizons(&self) -> &[HorizonMetrics] {
        &self.horizons
    }

    /// Combine with a location and observation time into a run.
    #[must_use]
    pub fn into_run(self, location: &ResultLocation, observed_at: DateTime<Utc>) -> Run {
        let mut builder =
            Run::builder(location.model(), location.setting(), location.path(), observed_at)
                .metrics(self.overall);
        for block in self.horizons {
            builder = builder.horizon(block);
        }
        builder.build()
    }
}

/// Load the run stored at a located result file.
///
/// # Errors
///
/// Returns error if the file cannot be read, parsed, or stat'ed. Callers
/// treat this as a local failure: the file is skipped, the scan goes on.
pub fn load_run(location: &ResultLocation) -> Result<Run> {
    let document = ResultDocument::read(location.path())?;
    let modified = fs::metadata(location.path())?.modified()?;
    Ok(document.into_run(location, DateTime::<Utc>::from(modified)))
}

/// Literals Python's `json` module emits for non-finite floats.
const NON_FINITE_LITERALS: [&str; 3] = ["-Infinity", "Infinity", "NaN"];

/// Replace non-finite literals outside string values with `null`.
fn null_non_finite(text: &str) -> Cow<'_, str> {
    if !text.contains("NaN") && !text.contains("Infinity") {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut in_string = false;
    let mut escaped = false;
    let mut rest = text;
    while let Some(c) = rest.chars().next() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
        } else if c == '"' {
            in_string = true;
        } else if let Some(literal) = NON_FINITE_LITERALS.iter().find(|l| rest.starts_with(**l)) {
            out.push_str("null");
            rest = &rest[literal.len()..];
            continue;
        }
        out.push(c);
        rest = &rest[c.len_utf8()..];
    }
    Cow::Owned(out)
}

const fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
