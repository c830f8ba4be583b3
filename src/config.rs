// src/config.rs

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::constants::{
    BODE_PEAK_HEIGHT, DEFAULT_MIN_SAMPLES_BETWEEN_SPLITS, DEFAULT_SAMPLE_RATE_HZ, FADED_SINE_PROFILE,
};
use crate::data_analysis::maneuver_windows::WindowConfig;
use crate::error::{AnalysisError, Result};

/// Run parameters of one analysis. Every field has a default, so a JSON file
/// only needs the values it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Target sample rate of the rescaled time column (Hz).
    pub sample_rate_hz: f64,
    /// Profile type substring selecting the maneuvers to window.
    pub profile_kind: String,
    pub windows: WindowConfig,
    /// Minimum input spectrum magnitude for a Bode point.
    pub bode_peak_height: f64,
    /// Bode points with `|H|` at or above this are dropped. `None` keeps all.
    pub bode_cutoff: Option<f64>,
    pub min_samples_between_splits: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            sample_rate_hz: DEFAULT_SAMPLE_RATE_HZ,
            profile_kind: FADED_SINE_PROFILE.to_string(),
            windows: WindowConfig::default(),
            bode_peak_height: BODE_PEAK_HEIGHT,
            bode_cutoff: None,
            min_samples_between_splits: DEFAULT_MIN_SAMPLES_BETWEEN_SPLITS,
        }
    }
}

impl AnalysisConfig {
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| AnalysisError::io(path, e))?;
        let config: Self =
            serde_json::from_reader(BufReader::new(file)).map_err(|e| AnalysisError::json(path, e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.sample_rate_hz.is_finite() && self.sample_rate_hz > 0.0) {
            return Err(AnalysisError::InvalidParameter(format!(
                "sample_rate_hz must be positive, got {}",
                self.sample_rate_hz
            )));
        }
        if !(self.windows.time_scale.is_finite() && self.windows.time_scale > 0.0) {
            return Err(AnalysisError::InvalidParameter(format!(
                "windows.time_scale must be positive, got {}",
                self.windows.time_scale
            )));
        }
        Ok(())
    }

    pub fn cutoff(&self) -> f64 {
        self.bode_cutoff.unwrap_or(f64::INFINITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.json");
        std::fs::write(&path, r#"{"sample_rate_hz": 250.0, "windows": {"time_scale": 0.001, "decimals": 3}}"#)
            .unwrap();
        let config = AnalysisConfig::from_json_file(&path).unwrap();
        assert_eq!(config.sample_rate_hz, 250.0);
        assert_eq!(config.windows.decimals, 3);
        assert_eq!(config.profile_kind, FADED_SINE_PROFILE);
        assert_eq!(config.cutoff(), f64::INFINITY);
    }

    #[test]
    fn test_invalid_rate_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.json");
        std::fs::write(&path, r#"{"sample_rate_hz": -1.0}"#).unwrap();
        assert!(matches!(
            AnalysisConfig::from_json_file(&path),
            Err(AnalysisError::InvalidParameter(_))
        ));
    }
}
