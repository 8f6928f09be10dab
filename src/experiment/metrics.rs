//! Metric Triple - the MAE/RMSE/MAPE block shared by every metrics record

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Key of the primary error metric.
pub const MAE_KEY: &str = "MAE";
/// Key of the root-mean-square error.
pub const RMSE_KEY: &str = "RMSE";
/// Key of the mean absolute percentage error.
pub const MAPE_KEY: &str = "MAPE";

/// One `{MAE, RMSE, MAPE}` block as read from a result file.
///
/// Every metric is present-or-absent. An absent metric is missing data,
/// never zero: consumers decide explicitly how to treat it (excluded from
/// reductions, rendered as an empty cell).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricTriple {
    #[serde(rename = "MAE")]
    mae: Option<f64>,
    #[serde(rename = "RMSE")]
    rmse: Option<f64>,
    #[serde(rename = "MAPE")]
    mape: Option<f64>,
}

impl MetricTriple {
    /// Create a metric triple from explicit values.
    #[must_use]
    pub const fn new(mae: Option<f64>, rmse: Option<f64>, mape: Option<f64>) -> Self {
        Self { mae, rmse, mape }
    }

    /// Read a triple out of a JSON object.
    ///
    /// Keys that are missing, `null`, or not numbers yield an absent metric.
    #[must_use]
    pub fn from_object(object: &Map<String, Value>) -> Self {
        let read = |key: &str| object.get(key).and_then(Value::as_f64);
        Self {
            mae: read(MAE_KEY),
            rmse: read(RMSE_KEY),
            mape: read(MAPE_KEY),
        }
    }

    /// Get the MAE, if present.
    #[must_use]
    pub const fn mae(&self) -> Option<f64> {
        self.mae
    }

    /// Get the RMSE, if present.
    #[must_use]
    pub const fn rmse(&self) -> Option<f64> {
        self.rmse
    }

    /// Get the MAPE, if present. The raw value may be a fraction or percent points.
    #[must_use]
    pub const fn mape(&self) -> Option<f64> {
        self.mape
    }

    /// MAE with absence mapped to positive infinity, for minimum/ascending ordering.
    #[must_use]
    pub fn mae_or_inf(&self) -> f64 {
        self.mae.unwrap_or(f64::INFINITY)
    }

    /// True when none of the three metrics is present.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.mae.is_none() && self.rmse.is_none() && self.mape.is_none()
    }
}
