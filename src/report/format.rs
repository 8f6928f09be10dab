//! Cell formatting for metric values

/// Decimal digits of MAE/RMSE on the leaderboard.
pub const SUMMARY_PRECISION: usize = 2;
/// Decimal digits of MAE/RMSE on detail and horizon tables.
pub const DETAIL_PRECISION: usize = 4;
/// Decimal digits of MAPE percentages.
pub const MAPE_PRECISION: usize = 2;

/// Fixed-point rendering; an absent value is an empty cell.
#[must_use]
pub fn format_fixed(value: Option<f64>, precision: usize) -> String {
    value.map_or_else(String::new, |v| format!("{v:.precision$}"))
}

/// MAPE as a percentage string.
///
/// Raw values below 1 are fractions and get scaled by 100; values of 1 or
/// more are already percent points. Absent renders as an empty cell.
#[must_use]
pub fn format_mape(value: Option<f64>) -> String {
    value.map_or_else(String::new, |v| {
        let percent = if v < 1.0 { v * 100.0 } else { v };
        format!("{percent:.prec$}%", prec = MAPE_PRECISION)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_fixed() {
        assert_eq!(format_fixed(Some(18.456), SUMMARY_PRECISION), "18.46");
        assert_eq!(format_fixed(Some(18.0), DETAIL_PRECISION), "18.0000");
        assert_eq!(format_fixed(None, SUMMARY_PRECISION), "");
    }

    #[test]
    fn test_format_mape() {
        assert_eq!(format_mape(Some(0.1523)), "15.23%");
        assert_eq!(format_mape(Some(15.23)), "15.23%");
        assert_eq!(format_mape(Some(1.0)), "1.00%");
        assert_eq!(format_mape(None), "");
    }
}
