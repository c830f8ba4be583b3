// src/data_analysis/maneuver_windows.rs

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::constants::{PROFILE_TICK_SCALE_S, WINDOW_ROUND_DECIMALS};
use crate::data_analysis::fragmentation::fragment_by_mask;
use crate::data_input::profile::ManeuverDescriptor;
use crate::error::Result;
use crate::series::Series;
use crate::types::{Fragment, TimeWindow};

/// Conversion from profile ticks to the aligned series' time base.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Seconds per profile tick.
    pub time_scale: f64,
    /// Decimal places kept after scaling.
    pub decimals: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            time_scale: PROFILE_TICK_SCALE_S,
            decimals: WINDOW_ROUND_DECIMALS,
        }
    }
}

fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Window of one maneuver: `[time + Tfade, time + Ttotal - Tfade]`, scaled
/// and rounded. Only the leading fade is excluded from the start while the
/// end subtracts the fade from the nominal total, so the window is not
/// centred on the steady part of the maneuver.
pub fn maneuver_window(descriptor: &ManeuverDescriptor, config: &WindowConfig) -> TimeWindow {
    let start = descriptor.fade_duration + descriptor.time;
    let end = descriptor.total_duration + descriptor.time - descriptor.fade_duration;
    (
        round_to(start * config.time_scale, config.decimals),
        round_to(end * config.time_scale, config.decimals),
    )
}

/// Windows for every descriptor, in order. Descriptors whose fades leave an
/// empty window are skipped with a warning.
pub fn maneuver_windows(descriptors: &[ManeuverDescriptor], config: &WindowConfig) -> Vec<TimeWindow> {
    descriptors
        .iter()
        .filter_map(|d| {
            let window = maneuver_window(d, config);
            if window.1 < window.0 {
                warn!(
                    "Maneuver at {} on axis '{}' has an empty window {:?}; skipped",
                    d.time, d.axis, window
                );
                None
            } else {
                Some(window)
            }
        })
        .collect()
}

/// One flag per row: true when `t` lies inside any window (inclusive).
pub fn window_mask(series: &Series, windows: &[TimeWindow]) -> Result<Vec<bool>> {
    Ok(series
        .time()?
        .iter()
        .map(|&t| windows.iter().any(|&(start, end)| t >= start && t <= end))
        .collect())
}

/// Mask-driven fragments of the rows covered by the windows.
pub fn fragment_by_windows(series: &Series, windows: &[TimeWindow]) -> Result<Vec<Fragment>> {
    let mask = window_mask(series, windows)?;
    let fragments = fragment_by_mask(series, &mask)?;
    debug!("{} windows -> {} fragments", windows.len(), fragments.len());
    Ok(fragments)
}

/// The rows of each window separately, one series per window. Unlike
/// [`fragment_by_windows`], touching windows stay apart and windows outside
/// the series yield empty series.
pub fn extract_windows(series: &Series, windows: &[TimeWindow]) -> Result<Vec<Series>> {
    windows
        .iter()
        .map(|&(start, end)| series.filter_time_window(start, end))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_input::profile::chain_profiles;

    fn descriptor(time: f64, fade: f64, total: f64) -> ManeuverDescriptor {
        ManeuverDescriptor {
            time,
            fade_duration: fade,
            total_duration: total,
            omega: vec![1.0],
            gain: vec![0.1],
            phase: vec![0.0],
            axis: "x".to_string(),
        }
    }

    const UNIT: WindowConfig = WindowConfig {
        time_scale: 1.0,
        decimals: 6,
    };

    #[test]
    fn test_window_excludes_leading_fade_and_trims_end() {
        assert_eq!(maneuver_window(&descriptor(0.0, 1.0, 5.0), &UNIT), (1.0, 4.0));
        assert_eq!(maneuver_window(&descriptor(10.0, 2.0, 8.0), &UNIT), (12.0, 16.0));
    }

    #[test]
    fn test_ticks_are_scaled_and_rounded() {
        let d = descriptor(123_456.0, 10_000.0, 50_001.0);
        let (start, end) = maneuver_window(&d, &WindowConfig::default());
        assert_eq!(start, 13.3456);
        assert_eq!(end, 16.3457);
        let coarse = WindowConfig {
            decimals: 2,
            ..WindowConfig::default()
        };
        assert_eq!(maneuver_window(&d, &coarse), (13.35, 16.35));
    }

    #[test]
    fn test_chained_sources_produce_successive_windows() {
        let chained = chain_profiles(vec![vec![descriptor(0.0, 1.0, 5.0)], vec![descriptor(0.0, 1.0, 5.0)]]);
        assert_eq!(maneuver_windows(&chained, &UNIT), vec![(1.0, 4.0), (6.0, 9.0)]);
    }

    #[test]
    fn test_degenerate_window_skipped() {
        let windows = maneuver_windows(&[descriptor(0.0, 3.0, 5.0), descriptor(0.0, 1.0, 5.0)], &UNIT);
        assert_eq!(windows, vec![(1.0, 4.0)]);
    }

    #[test]
    fn test_fragments_follow_windows() {
        let t: Vec<f64> = (0..=100).map(|i| i as f64 * 0.1).collect();
        let s = Series::from_columns(vec![("t", t)]).unwrap();
        let windows = [(1.0, 4.0), (6.0, 9.0)];
        let fragments = fragment_by_windows(&s, &windows).unwrap();
        assert_eq!(fragments.len(), 2);
        assert_eq!(fragments[0].source_rows, 10..41);
        assert_eq!(fragments[1].source_rows, 60..91);

        let extracted = extract_windows(&s, &windows).unwrap();
        assert_eq!(extracted[0].len(), 31);
        assert_eq!(extracted[1].value("t", 0).unwrap(), 6.0);
    }

    #[test]
    fn test_back_to_back_maneuvers_stay_separate() {
        let t: Vec<f64> = (0..=100).map(|i| i as f64 / 10.0).collect();
        let s = Series::from_columns(vec![("t", t)]).unwrap();
        let windows = maneuver_windows(&[descriptor(0.0, 0.0, 5.0), descriptor(5.0, 0.0, 5.0)], &UNIT);
        assert_eq!(windows, vec![(0.0, 5.0), (5.0, 10.0)]);

        // The row mask cannot tell touching windows apart.
        assert_eq!(fragment_by_windows(&s, &windows).unwrap().len(), 1);

        let extracted = extract_windows(&s, &windows).unwrap();
        assert_eq!(extracted.len(), 2);
        assert_eq!(extracted[0].len(), 51);
        assert_eq!(extracted[1].value("t", 0).unwrap(), 5.0);
        assert_eq!(extracted[1].value("t", 50).unwrap(), 10.0);
    }
}
