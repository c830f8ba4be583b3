// tests/log_pipeline_test.rs

use approx::assert_abs_diff_eq;
use std::f64::consts::PI;
use std::path::Path;

use motion_platform_analysis::constants::{POS_CMD, POS_MES, TIME_COLUMN};
use motion_platform_analysis::data_input::log_parser::{load_dof, CsvLogReader};
use motion_platform_analysis::data_input::persistence::{read_csv, write_csv, OverwritePolicy, SaveOutcome};
use motion_platform_analysis::{preprocess, Dof};

const N: usize = 600;

fn wave(i: f64) -> f64 {
    (2.0 * PI * i / 61.0).sin() * (-((i - 300.0) / 80.0).powi(2)).exp()
}

// Heave log in the export layout: measured heave is stored inverted and
// lags the command by four samples. The last measured tick is missing.
fn write_heave_log(path: &Path) {
    let mut writer = csv::Writer::from_path(path).unwrap();
    writer
        .write_record([
            "data/commanded/tick",
            "data/commanded/data/z",
            "data/commanded/data/zdot",
            "data/commanded/data/zdotdot",
            "data/measured/tick",
            "data/measured/data/actual_pos[0]",
            "data/measured/data/actual_pos[1]",
            "data/measured/data/actual_pos[2]",
        ])
        .unwrap();
    for i in 0..N {
        let x = i as f64;
        let tick = (i * 20).to_string();
        let measured_tick = if i == N - 1 { String::new() } else { tick.clone() };
        writer
            .write_record([
                tick,
                wave(x).to_string(),
                wave(x + 0.25).to_string(),
                (-wave(x)).to_string(),
                measured_tick,
                "0".to_string(),
                "0".to_string(),
                (-(wave(x - 4.0) + 0.02)).to_string(),
            ])
            .unwrap();
    }
    writer.flush().unwrap();
}

#[test]
fn test_csv_log_is_loaded_aligned_and_saved() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("heave.csv");
    write_heave_log(&log);

    let mut series = load_dof(&CsvLogReader, &log, Dof::Z).unwrap();
    assert_eq!(series.len(), N - 1);
    // Sign restored on load.
    assert_abs_diff_eq!(series.column(POS_MES).unwrap()[0], wave(-4.0) + 0.02, epsilon = 1e-12);

    let report = preprocess(&mut series, 50.0).unwrap();
    assert_eq!(report.lag.samples, 4);
    assert_abs_diff_eq!(report.offset, 0.02, epsilon = 1e-7);
    assert_abs_diff_eq!(report.lag.time, 0.08, epsilon = 1e-12);
    assert_eq!(series.time().unwrap()[0], 0.0);
    let cmd = series.column(POS_CMD).unwrap();
    let mes = series.column(POS_MES).unwrap();
    assert!(cmd.iter().zip(mes.iter()).all(|(c, m)| (c - m).abs() < 1e-6));

    let saved = dir.path().join("heave_z_aligned.csv");
    assert_eq!(write_csv(&series, &saved, OverwritePolicy::Always).unwrap(), SaveOutcome::Written);
    let restored = read_csv(&saved).unwrap();
    assert_eq!(restored, series);
    assert_eq!(restored.column_names().next(), Some(TIME_COLUMN));
}

#[test]
fn test_existing_output_respects_policy() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("heave.csv");
    write_heave_log(&log);
    let series = load_dof(&CsvLogReader, &log, Dof::Z).unwrap();

    let saved = dir.path().join("out.csv");
    assert_eq!(write_csv(&series, &saved, OverwritePolicy::Never).unwrap(), SaveOutcome::Written);
    assert_eq!(write_csv(&series, &saved, OverwritePolicy::Never).unwrap(), SaveOutcome::Skipped);

    let mut asked = 0;
    let mut decline = |_: &Path| {
        asked += 1;
        false
    };
    assert_eq!(
        write_csv(&series, &saved, OverwritePolicy::Ask(&mut decline)).unwrap(),
        SaveOutcome::Skipped
    );
    assert_eq!(asked, 1);
}

#[test]
fn test_missing_dof_column_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("heave.csv");
    write_heave_log(&log);
    assert!(load_dof(&CsvLogReader, &log, Dof::Phi).is_err());
}
