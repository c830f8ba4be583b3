// src/data_analysis/offset.rs

use crate::error::{AnalysisError, Result};
use crate::series::Series;

/// Constant amplitude offset `mean(col_a) - mean(col_b)`.
///
/// Assumes the commanded motion has no net bias over the series; a profile
/// that spends longer on one side of zero biases the estimate.
pub fn offset(series: &Series, col_a: &str, col_b: &str) -> Result<f64> {
    let mean = |name: &str| -> Result<f64> {
        series
            .column(name)?
            .mean()
            .ok_or(AnalysisError::DataIntegrity {
                operation: "offset",
                rows: 0,
                required: 1,
            })
    };
    Ok(mean(col_a)? - mean(col_b)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn test_removing_offset_matches_means() {
        let mut s = Series::from_columns(vec![
            ("pos_cmd", array![0.0, 1.0, 0.0, -1.0, 0.5]),
            ("pos_mes", array![0.3, 1.3, 0.3, -0.7, 0.8]),
        ])
        .unwrap();
        let delta = offset(&s, "pos_mes", "pos_cmd").unwrap();
        assert_abs_diff_eq!(delta, 0.3, epsilon = 1e-12);

        s.map_column("pos_mes", |v| v - delta).unwrap();
        let mes_mean = s.column("pos_mes").unwrap().mean().unwrap();
        let cmd_mean = s.column("pos_cmd").unwrap().mean().unwrap();
        assert_abs_diff_eq!(mes_mean, cmd_mean, epsilon = 1e-12);
    }

    #[test]
    fn test_empty_series_has_no_offset() {
        let s = Series::from_columns(vec![("a", Vec::<f64>::new()), ("b", Vec::new())]).unwrap();
        assert!(offset(&s, "a", "b").is_err());
    }
}
