// src/data_analysis/lag.rs

use ndarray::Array1;
use ndarray_stats::QuantileExt;
use tracing::{debug, warn};

use crate::constants::{CORRELATION_TIE_TOLERANCE, MIN_VALID_ROWS, TIME_COLUMN};
use crate::data_analysis::fft_utils::{fft_forward, fft_inverse};
use crate::error::{AnalysisError, Result};
use crate::series::Series;

/// Delay between a commanded and a measured column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LagEstimate {
    /// Delay read back through the time column: `t[samples] - t[0]`.
    pub time: f64,
    /// Delay magnitude in samples.
    pub samples: usize,
    /// Correlation lag before the absolute value. Negative when the measured
    /// signal trails the command, positive when it leads.
    pub signed_samples: isize,
}

/// Full (non-normalized) cross-correlation of two equal-length sequences.
///
/// Output has `2N - 1` entries; entry `i` holds `sum_n a[n + m] * v[n]` with
/// `m = i - (N - 1)`. Computed through a zero-padded real FFT.
pub fn cross_correlation_full(a: &[f64], v: &[f64]) -> Result<Array1<f64>> {
    if a.len() != v.len() {
        return Err(AnalysisError::LengthMismatch {
            column: "correlation input".to_string(),
            expected: a.len(),
            found: v.len(),
        });
    }
    let n = a.len();
    if n == 0 {
        return Err(AnalysisError::DataIntegrity {
            operation: "cross-correlation",
            rows: 0,
            required: 1,
        });
    }

    // Padding to at least 2N - 1 keeps the circular correlation free of wrap-around.
    let padded = (2 * n - 1).next_power_of_two();
    let a_spec = fft_forward(a, padded)?;
    let v_spec = fft_forward(v, padded)?;
    let product: Vec<_> = a_spec
        .iter()
        .zip(v_spec.iter())
        .map(|(x, y)| x * y.conj())
        .collect();
    let circular = fft_inverse(&product, padded)?;

    Ok((0..2 * n - 1)
        .map(|i| {
            let m = i as isize - (n as isize - 1);
            circular[m.rem_euclid(padded as isize) as usize]
        })
        .collect())
}

/// Estimates the constant delay between `col_cmd` and `col_mes`.
///
/// The sample delay is `|argmax(xcorr) - (N - 1)|`, which assumes one dominant
/// correlation peak. If other lags reach the maximum (within a relative
/// tolerance) the estimate is refused with `AlignmentAmbiguity`.
pub fn estimate_lag(series: &Series, col_cmd: &str, col_mes: &str) -> Result<LagEstimate> {
    let n = series.len();
    if n < MIN_VALID_ROWS {
        return Err(AnalysisError::DataIntegrity {
            operation: "lag estimation",
            rows: n,
            required: MIN_VALID_ROWS,
        });
    }
    let cmd = series.column(col_cmd)?.to_vec();
    let mes = series.column(col_mes)?.to_vec();
    let cross_corr = cross_correlation_full(&cmd, &mes)?;

    let peak_index = cross_corr.argmax().map_err(|e| {
        AnalysisError::InvalidParameter(format!("cross-correlation has no maximum: {e}"))
    })?;
    let peak = cross_corr[peak_index];
    let tolerance = CORRELATION_TIE_TOLERANCE * peak.abs();
    let tied: Vec<isize> = cross_corr
        .iter()
        .enumerate()
        .filter(|(_, &c)| c >= peak - tolerance)
        .map(|(i, _)| i as isize - (n as isize - 1))
        .collect();
    if tied.len() > 1 {
        return Err(AnalysisError::AlignmentAmbiguity { peaks: tied });
    }

    let signed_samples = peak_index as isize - (n as isize - 1);
    let samples = signed_samples.unsigned_abs();
    let time = series.value(TIME_COLUMN, samples)? - series.value(TIME_COLUMN, 0)?;

    if signed_samples > 0 {
        warn!(
            "'{}' leads '{}' by {} samples; the correction assumes it lags",
            col_mes, col_cmd, samples
        );
    }
    debug!(
        "Lag between '{}' and '{}': {} samples ({:.6} s)",
        col_cmd, col_mes, samples, time
    );
    Ok(LagEstimate {
        time,
        samples,
        signed_samples,
    })
}

impl Series {
    /// Shifts every listed column back by `idx_shift` rows and cleans, so
    /// those columns line up with the unshifted ones.
    pub fn align(&mut self, col_names: &[&str], idx_shift: usize) -> Result<usize> {
        for col in col_names {
            self.shift(col, -(idx_shift as isize))?;
        }
        Ok(self.clean())
    }
}
