// src/data_analysis/derivative.rs

use ndarray::Array1;
use tracing::debug;

use crate::constants::MIN_VALID_ROWS;
use crate::error::{AnalysisError, Result};
use crate::series::Series;

/// Central-difference derivative dy/dx.
///
/// Interior points use `(y[i+1] - y[i-1]) / (x[i+1] - x[i-1])`. The first and
/// last points have no neighbour on one side and are NaN, so a following
/// `clean()` removes them. Callers must pass equal-length inputs.
pub fn central_difference(x: &Array1<f64>, y: &Array1<f64>) -> Array1<f64> {
    let n = y.len().min(x.len());
    let mut derivative = Array1::from_elem(n, f64::NAN);
    for i in 1..n.saturating_sub(1) {
        derivative[i] = (y[i + 1] - y[i - 1]) / (x[i + 1] - x[i - 1]);
    }
    derivative
}

impl Series {
    /// Stores d(`y_col`)/d(`x_col`) as `deriv_name` and cleans the series.
    /// Returns the number of rows dropped, at least the two edge rows.
    pub fn dydx(&mut self, x_col: &str, y_col: &str, deriv_name: &str) -> Result<usize> {
        if self.len() < MIN_VALID_ROWS {
            return Err(AnalysisError::DataIntegrity {
                operation: "derivative",
                rows: self.len(),
                required: MIN_VALID_ROWS,
            });
        }
        let derivative = central_difference(self.column(x_col)?, self.column(y_col)?);
        self.set_column(deriv_name, derivative)?;
        let dropped = self.clean();
        debug!("d{}/d{} -> '{}': dropped {} rows", y_col, x_col, deriv_name, dropped);
        Ok(dropped)
    }
}
