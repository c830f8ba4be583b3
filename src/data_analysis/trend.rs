// src/data_analysis/trend.rs

use serde::Serialize;

use crate::error::{AnalysisError, Result};

/// Least-squares line `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendLine {
    pub slope: f64,
    pub intercept: f64,
    pub r_squared: f64,
}

impl TrendLine {
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Fits a straight line to `(x, y)`. With `through_origin` the intercept is
/// fixed at zero and the slope is `Σxy / Σx²`.
pub fn fit_linear(x: &[f64], y: &[f64], through_origin: bool) -> Result<TrendLine> {
    if x.len() != y.len() {
        return Err(AnalysisError::LengthMismatch {
            column: "trend y".to_string(),
            expected: x.len(),
            found: y.len(),
        });
    }
    let required = if through_origin { 1 } else { 2 };
    if x.len() < required {
        return Err(AnalysisError::DataIntegrity {
            operation: "linear fit",
            rows: x.len(),
            required,
        });
    }

    let n = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    let (slope, intercept) = if through_origin {
        let sxy: f64 = x.iter().zip(y).map(|(a, b)| a * b).sum();
        let sxx: f64 = x.iter().map(|a| a * a).sum();
        if sxx == 0.0 {
            return Err(AnalysisError::InvalidParameter("all inputs are zero".to_string()));
        }
        (sxy / sxx, 0.0)
    } else {
        let sxy: f64 = x.iter().zip(y).map(|(a, b)| (a - mean_x) * (b - mean_y)).sum();
        let sxx: f64 = x.iter().map(|a| (a - mean_x).powi(2)).sum();
        if sxx == 0.0 {
            return Err(AnalysisError::InvalidParameter("inputs have no spread".to_string()));
        }
        let slope = sxy / sxx;
        (slope, mean_y - slope * mean_x)
    };

    let ss_res: f64 = x
        .iter()
        .zip(y)
        .map(|(a, b)| (b - (slope * a + intercept)).powi(2))
        .sum();
    let ss_tot: f64 = y.iter().map(|b| (b - mean_y).powi(2)).sum();
    let r_squared = if ss_tot > 0.0 { 1.0 - ss_res / ss_tot } else { 1.0 };

    Ok(TrendLine {
        slope,
        intercept,
        r_squared,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_exact_line_has_unit_r_squared() {
        let x = [0.5, 1.0, 2.0, 3.0];
        let y: Vec<f64> = x.iter().map(|v| 2.0 * v + 1.0).collect();
        let fit = fit_linear(&x, &y, false).unwrap();
        assert_abs_diff_eq!(fit.slope, 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(fit.intercept, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(fit.r_squared, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(fit.predict(4.0), 9.0, epsilon = 1e-12);
    }

    #[test]
    fn test_through_origin_ignores_intercept() {
        let x = [1.0, 2.0, 3.0];
        let y = [3.0, 5.0, 7.0];
        let fit = fit_linear(&x, &y, true).unwrap();
        // (3 + 10 + 21) / (1 + 4 + 9)
        assert_abs_diff_eq!(fit.slope, 34.0 / 14.0, epsilon = 1e-12);
        assert_eq!(fit.intercept, 0.0);
        assert!(fit.r_squared < 1.0);
    }

    #[test]
    fn test_degenerate_inputs() {
        assert!(fit_linear(&[1.0], &[2.0], false).is_err());
        assert!(fit_linear(&[2.0, 2.0], &[1.0, 3.0], false).is_err());
        assert!(fit_linear(&[1.0, 2.0], &[1.0], false).is_err());
    }
}
