// src/data_analysis/frequency_response.rs

use serde::Serialize;
use tracing::debug;

use crate::constants::BODE_MAGNITUDE_FLOOR_DB;
use crate::data_analysis::fft_utils::Spectrum;
use crate::data_analysis::peak_detection::find_peaks;
use crate::error::Result;

/// Transfer function sample at one excitation frequency.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BodePoint {
    pub freq_hz: f64,
    pub magnitude_db: f64,
    pub phase_deg: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FrequencyResponse {
    pub points: Vec<BodePoint>,
}

impl FrequencyResponse {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }
}

/// Samples `H = Y / X` at the spectral peaks of the input.
///
/// For every spectrum, peaks of `|X|` at or above `height` are the excitation
/// frequencies; points with `|H| >= cutoff` are dropped. Magnitudes are in dB
/// (floored at `BODE_MAGNITUDE_FLOOR_DB`), phases in degrees.
pub fn frequency_response(
    spectra: &[Spectrum],
    input_col: &str,
    output_col: &str,
    height: f64,
    cutoff: f64,
) -> Result<FrequencyResponse> {
    let mut response = FrequencyResponse::default();
    for spectrum in spectra {
        let input = spectrum.bin(input_col)?;
        let output = spectrum.bin(output_col)?;
        let input_mag: Vec<f64> = input.iter().map(|c| c.norm()).collect();

        for peak in find_peaks(&input_mag, height) {
            let h = output[peak] / input[peak];
            if h.norm() >= cutoff {
                continue;
            }
            response.points.push(BodePoint {
                freq_hz: spectrum.freq_hz[peak],
                magnitude_db: (20.0 * h.norm().log10()).max(BODE_MAGNITUDE_FLOOR_DB),
                phase_deg: h.arg().to_degrees(),
            });
        }
    }
    debug!(
        "Frequency response {} -> {}: {} points from {} spectra",
        input_col,
        output_col,
        response.len(),
        spectra.len()
    );
    Ok(response)
}
