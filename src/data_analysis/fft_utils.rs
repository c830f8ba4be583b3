// src/data_analysis/fft_utils.rs

use ndarray::Array1;
use num_complex::Complex64;
use realfft::RealFftPlanner;

use crate::error::{AnalysisError, Result};
use crate::series::Series;

fn fft_error(e: realfft::FftError) -> AnalysisError {
    AnalysisError::InvalidParameter(format!("FFT processing failed: {e}"))
}

/// Forward real FFT of `data` zero-padded to `n` samples. Returns the `n/2 + 1`
/// non-negative frequency bins, unnormalized.
pub fn fft_forward(data: &[f64], n: usize) -> Result<Vec<Complex64>> {
    if n == 0 || data.len() > n {
        return Err(AnalysisError::InvalidParameter(format!(
            "cannot transform {} samples into an FFT of length {}",
            data.len(),
            n
        )));
    }
    let planner = RealFftPlanner::<f64>::new().plan_fft_forward(n);
    let mut input = planner.make_input_vec();
    input[..data.len()].copy_from_slice(data);
    let mut output = planner.make_output_vec();
    planner.process(&mut input, &mut output).map_err(fft_error)?;
    Ok(output)
}

/// Inverse real FFT of a half spectrum back to `n` samples, normalized by `1/n`.
pub fn fft_inverse(spectrum: &[Complex64], n: usize) -> Result<Vec<f64>> {
    let expected_complex_len = n / 2 + 1;
    if n == 0 || spectrum.len() != expected_complex_len {
        return Err(AnalysisError::InvalidParameter(format!(
            "inverse FFT of length {} expects {} bins, got {}",
            n,
            expected_complex_len,
            spectrum.len()
        )));
    }
    let mut input = spectrum.to_vec();
    // A real signal has purely real DC and Nyquist bins.
    input[0].im = 0.0;
    if n % 2 == 0 {
        input[n / 2].im = 0.0;
    }
    let planner = RealFftPlanner::<f64>::new().plan_fft_inverse(n);
    let mut output = planner.make_output_vec();
    planner.process(&mut input, &mut output).map_err(fft_error)?;
    let scale = 1.0 / n as f64;
    output.iter_mut().for_each(|x| *x *= scale);
    Ok(output)
}

/// Positive-half frequency axis of an `n`-point FFT: `k * fs / n` for `k < n/2`.
pub fn fft_freq(n: usize, sample_rate: f64) -> Array1<f64> {
    (0..n / 2).map(|k| k as f64 * sample_rate / n as f64).collect()
}

/// Complex spectra of several columns of one series.
#[derive(Debug, Clone)]
pub struct Spectrum {
    pub freq_hz: Array1<f64>,
    pub bins: Vec<(String, Array1<Complex64>)>,
}

impl Spectrum {
    pub fn bin(&self, name: &str) -> Result<&Array1<Complex64>> {
        self.bins
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, b)| b)
            .ok_or_else(|| AnalysisError::MissingColumn(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.freq_hz.len()
    }

    pub fn is_empty(&self) -> bool {
        self.freq_hz.is_empty()
    }
}

/// FFT of the selected columns, keeping the first `N/2` bins of each.
pub fn spectrum(series: &Series, columns: &[&str], sample_rate: f64) -> Result<Spectrum> {
    if !(sample_rate.is_finite() && sample_rate > 0.0) {
        return Err(AnalysisError::InvalidParameter(format!(
            "sample rate must be positive, got {sample_rate}"
        )));
    }
    let n = series.len();
    if n < 2 {
        return Err(AnalysisError::DataIntegrity {
            operation: "spectrum",
            rows: n,
            required: 2,
        });
    }
    let mut bins = Vec::with_capacity(columns.len());
    for &name in columns {
        let values = series.column(name)?.to_vec();
        let full = fft_forward(&values, n)?;
        bins.push((name.to_string(), full.into_iter().take(n / 2).collect()));
    }
    Ok(Spectrum {
        freq_hz: fft_freq(n, sample_rate),
        bins,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_round_trip_restores_signal() {
        let data: Vec<f64> = (0..37).map(|i| (i as f64 * 0.3).sin() + 0.1 * i as f64).collect();
        let spectrum = fft_forward(&data, data.len()).unwrap();
        let restored = fft_inverse(&spectrum, data.len()).unwrap();
        for (a, b) in data.iter().zip(restored.iter()) {
            assert_abs_diff_eq!(*a, *b, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_spectrum_peak_at_signal_frequency() {
        let fs = 100.0;
        let n = 200;
        let t: Vec<f64> = (0..n).map(|i| i as f64 / fs).collect();
        let y: Vec<f64> = t.iter().map(|t| (2.0 * PI * 5.0 * t).sin()).collect();
        let series = Series::from_columns(vec![("t", t), ("y", y)]).unwrap();
        let spec = spectrum(&series, &["y"], fs).unwrap();
        assert_eq!(spec.len(), n / 2);
        let bins = spec.bin("y").unwrap();
        let (peak, _) = bins
            .iter()
            .enumerate()
            .fold((0, 0.0), |(bi, bm), (i, c)| if c.norm() > bm { (i, c.norm()) } else { (bi, bm) });
        assert_abs_diff_eq!(spec.freq_hz[peak], 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_length_rejected() {
        assert!(fft_forward(&[], 0).is_err());
        assert!(fft_inverse(&[Complex64::new(1.0, 0.0)], 4).is_err());
    }
}
