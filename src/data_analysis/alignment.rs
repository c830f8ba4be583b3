// src/data_analysis/alignment.rs

use tracing::info;

use crate::constants::{ACC_MES, MIN_VALID_ROWS, POS_CMD, POS_MES, TIME_COLUMN, VEL_MES};
use crate::data_analysis::lag::{estimate_lag, LagEstimate};
use crate::data_analysis::offset::offset;
use crate::error::{AnalysisError, Result};
use crate::series::Series;

/// Quantities removed from the measured signal by [`preprocess`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlignmentReport {
    /// Factor applied to the native time column.
    pub scaling_factor: f64,
    /// `mean(pos_mes) - mean(pos_cmd)` subtracted from `pos_mes`.
    pub offset: f64,
    pub lag: LagEstimate,
    /// Rows left after the final clean.
    pub rows: usize,
}

fn require_rows(series: &Series, operation: &'static str) -> Result<()> {
    if series.len() < MIN_VALID_ROWS {
        return Err(AnalysisError::DataIntegrity {
            operation,
            rows: series.len(),
            required: MIN_VALID_ROWS,
        });
    }
    Ok(())
}

/// Factor mapping the nominal spacing `t[1] - t[0]` onto `1 / sample_rate`.
pub fn time_scaling_factor(series: &Series, sample_rate: f64) -> Result<f64> {
    if !(sample_rate.is_finite() && sample_rate > 0.0) {
        return Err(AnalysisError::InvalidParameter(format!(
            "sample rate must be positive, got {sample_rate}"
        )));
    }
    let dt = series.value(TIME_COLUMN, 1)? - series.value(TIME_COLUMN, 0)?;
    if !(dt.is_finite() && dt > 0.0) {
        return Err(AnalysisError::InvalidParameter(format!(
            "first time step must be positive, got {dt}"
        )));
    }
    Ok((1.0 / sample_rate) / dt)
}

impl Series {
    /// Multiplies every `t` value by `factor`.
    pub fn rescale_time(&mut self, factor: f64) -> Result<()> {
        self.map_column(TIME_COLUMN, |t| t * factor)
    }

    /// Shifts `t` so the first row sits at time 0.
    pub fn rezero_time(&mut self) -> Result<()> {
        let start = self.value(TIME_COLUMN, 0)?;
        self.map_column(TIME_COLUMN, |t| t - start)
    }
}

/// Aligns measured against commanded motion in place.
///
/// Steps, in order: rescale `t` to `sample_rate`; derive `vel_mes` and
/// `acc_mes` from `pos_mes`; subtract the position offset from `pos_mes`;
/// shift the three measured columns back by the correlation lag; clean and
/// re-zero `t`. Any step left with fewer than three rows fails with
/// [`AnalysisError::DataIntegrity`] and the series should be discarded.
pub fn preprocess(series: &mut Series, sample_rate: f64) -> Result<AlignmentReport> {
    require_rows(series, "time rescale")?;
    let scaling_factor = time_scaling_factor(series, sample_rate)?;
    series.rescale_time(scaling_factor)?;
    info!("Rescaled time by {:.6e} to {} Hz", scaling_factor, sample_rate);

    series.dydx(TIME_COLUMN, POS_MES, VEL_MES)?;
    require_rows(series, "acceleration derivative")?;
    series.dydx(TIME_COLUMN, VEL_MES, ACC_MES)?;
    require_rows(series, "offset removal")?;

    let offset = offset(series, POS_MES, POS_CMD)?;
    series.map_column(POS_MES, |v| v - offset)?;
    info!("Removed position offset {:.6}", offset);

    let lag = estimate_lag(series, POS_CMD, POS_MES)?;
    series.align(&[POS_MES, VEL_MES, ACC_MES], lag.samples)?;
    require_rows(series, "lag removal")?;
    info!("Removed lag of {} samples ({:.4} s)", lag.samples, lag.time);

    series.rezero_time()?;
    Ok(AlignmentReport {
        scaling_factor,
        offset,
        lag,
        rows: series.len(),
    })
}
