// tests/profile_windows_test.rs

use serde_json::json;
use std::fs;
use std::path::Path;

use motion_platform_analysis::constants::{POS_CMD, TIME_COLUMN};
use motion_platform_analysis::data_analysis::maneuver_windows::{
    extract_windows, fragment_by_windows, maneuver_windows, WindowConfig,
};
use motion_platform_analysis::data_input::profile::{chain_profiles, read_profile};
use motion_platform_analysis::Series;

const UNIT: WindowConfig = WindowConfig {
    time_scale: 1.0,
    decimals: 6,
};

fn write_profile(path: &Path, moves: serde_json::Value) {
    fs::write(path, serde_json::to_string_pretty(&json!({ "moves": moves })).unwrap()).unwrap();
}

fn faded_sine(time: f64) -> serde_json::Value {
    json!({
        "time": time,
        "move": {
            "axis": 2,
            "profile": {
                "type": "FadedSineProfile",
                "Tfade": 1.0,
                "Ttotal": 5.0,
                "omg": [0.5, 0.5, 0.5],
                "gain": [0.0, 0.0, 0.1],
                "phi0": [0.0, 0.0, 0.0]
            }
        }
    })
}

#[test]
fn test_chained_profiles_yield_consecutive_windows() {
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("first.json");
    let second = dir.path().join("second.json");
    write_profile(&first, json!([faded_sine(0.0)]));
    write_profile(
        &second,
        json!([faded_sine(0.0), {"time": 3.0, "move": {"axis": 2, "profile": {"type": "RampProfile"}}}]),
    );

    let sources = vec![
        read_profile(&first, "FadedSineProfile").unwrap(),
        read_profile(&second, "FadedSineProfile").unwrap(),
    ];
    let descriptors = chain_profiles(sources);
    assert_eq!(descriptors.len(), 2);
    assert_eq!(descriptors[1].axis, "2");

    let windows = maneuver_windows(&descriptors, &UNIT);
    assert_eq!(windows, vec![(1.0, 4.0), (6.0, 9.0)]);
}

#[test]
fn test_windows_cut_the_aligned_series() {
    let t: Vec<f64> = (0..=100).map(|i| i as f64 / 10.0).collect();
    let pos: Vec<f64> = (0..=100).map(|i| i as f64).collect();
    let series = Series::from_columns(vec![(TIME_COLUMN, t), (POS_CMD, pos)]).unwrap();
    let windows = vec![(1.0, 4.0), (6.0, 9.0)];

    let fragments = fragment_by_windows(&series, &windows).unwrap();
    assert_eq!(fragments.len(), 2);
    assert_eq!(fragments[0].source_rows, 10..41);
    assert_eq!(fragments[1].source_rows, 60..91);

    let pieces = extract_windows(&series, &windows).unwrap();
    assert_eq!(pieces.len(), 2);
    assert_eq!(pieces[0].len(), 31);
}

#[test]
fn test_default_scale_converts_ticks_to_seconds() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ticks.json");
    write_profile(
        &path,
        json!([{
            "time": 20000,
            "move": {"axis": "z", "profile": {
                "type": "FadedSineProfile", "Tfade": 5000, "Ttotal": 50000,
                "omg": 3.14, "gain": 0.05, "phi0": 0.0
            }}
        }]),
    );
    let descriptors = read_profile(&path, "FadedSine").unwrap();
    let windows = maneuver_windows(&descriptors, &WindowConfig::default());
    assert_eq!(windows, vec![(2.5, 6.5)]);
}
