// tests/fragmentation_test.rs

use motion_platform_analysis::constants::{POS_CMD, TIME_COLUMN, VEL_CMD};
use motion_platform_analysis::data_analysis::fragmentation::{fragment_by_iteration, fragment_by_ranges};
use motion_platform_analysis::data_analysis::zero_crossing::{crossing_intervals, zero_crossings, SignChangeSplit};
use motion_platform_analysis::Series;

// Velocity flips sign at rows 10, 40, 70 and 100.
fn square_velocity() -> Series {
    let n = 130;
    let t: Vec<f64> = (0..n).map(|i| i as f64 * 0.01).collect();
    let vel: Vec<f64> = (0..n)
        .map(|i| if i < 10 || (40..70).contains(&i) || i >= 100 { 1.0 } else { -1.0 })
        .collect();
    let pos: Vec<f64> = (0..n).map(|i| i as f64).collect();
    Series::from_columns(vec![(TIME_COLUMN, t), (VEL_CMD, vel), (POS_CMD, pos)]).unwrap()
}

#[test]
fn test_full_cycles_overlap_by_half_a_period() {
    let series = square_velocity();
    let crossings = zero_crossings(series.column(VEL_CMD).unwrap());
    assert_eq!(crossings, vec![10, 40, 70, 100]);

    let fragments = fragment_by_ranges(&series, &crossing_intervals(&crossings)).unwrap();
    assert_eq!(fragments.len(), 2);
    assert_eq!(fragments[0].source_rows, 10..70);
    assert_eq!(fragments[1].source_rows, 40..100);
    assert_eq!(fragments[0].len(), 60);
    // Fragments keep the parent's values, not re-indexed copies.
    assert_eq!(fragments[1].series.column(POS_CMD).unwrap()[0], 40.0);
}

#[test]
fn test_half_periods_are_disjoint_and_ordered() {
    let series = square_velocity();
    let split = SignChangeSplit::new(VEL_CMD, 1);
    let fragments = fragment_by_iteration(&series, |s, w| split.decide(s, w)).unwrap();

    let ranges: Vec<_> = fragments.iter().map(|f| f.source_rows.clone()).collect();
    assert_eq!(ranges, vec![0..10, 10..40, 40..70, 70..100]);
    assert!(fragments.iter().all(|f| !f.is_empty()));
    let covered: usize = fragments.iter().map(|f| f.len()).sum();
    assert!(covered <= series.len());
}

#[test]
fn test_min_samples_suppresses_short_half_periods() {
    let series = square_velocity();
    let split = SignChangeSplit::new(VEL_CMD, 25);
    let fragments = fragment_by_iteration(&series, |s, w| split.decide(s, w)).unwrap();
    let ranges: Vec<_> = fragments.iter().map(|f| f.source_rows.clone()).collect();
    // The first ten rows are too short to close at row 10.
    assert_eq!(ranges, vec![0..40, 40..70, 70..100]);
}
