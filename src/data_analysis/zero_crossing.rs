// src/data_analysis/zero_crossing.rs

use ndarray::Array1;

use crate::error::Result;
use crate::series::Series;
use crate::types::{RowRange, SplitDecision};

/// Rows `i` where `values[i - 1] * values[i] < 0`.
///
/// Exact zeros never trigger on their own; a sign change straddling a zero
/// (`1, 0, -1`) is not reported either because both products are zero.
pub fn zero_crossings(values: &Array1<f64>) -> Vec<usize> {
    let mut previous = 0.0;
    let mut crossings = Vec::new();
    for (i, &value) in values.iter().enumerate() {
        if previous * value < 0.0 {
            crossings.push(i);
        }
        previous = value;
    }
    crossings
}

/// Half-period windows from every crossing to the crossing two positions
/// later. Consecutive windows overlap by one crossing interval.
pub fn crossing_intervals(crossings: &[usize]) -> Vec<RowRange> {
    crossings.windows(3).map(|w| w[0]..w[2]).collect()
}

/// Split predicate for `fragment_by_iteration`: closes the window right
/// before a sign change of `column`, once it holds at least `min_samples` rows.
#[derive(Debug, Clone)]
pub struct SignChangeSplit {
    pub column: String,
    pub min_samples: usize,
}

impl SignChangeSplit {
    pub fn new(column: impl Into<String>, min_samples: usize) -> Self {
        Self {
            column: column.into(),
            min_samples,
        }
    }

    pub fn decide(&self, series: &Series, window: RowRange) -> Result<SplitDecision> {
        let values = series.column(&self.column)?;
        let next = window.end;
        let crosses = next > 0 && next < values.len() && values[next - 1] * values[next] < 0.0;
        Ok((window.start, crosses && window.len() >= self.min_samples))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_analysis::fragmentation::fragment_by_iteration;
    use ndarray::array;

    #[test]
    fn test_crossings_record_the_row_after_the_change() {
        let v = array![1.0, 2.0, -1.0, -3.0, 4.0, 5.0];
        assert_eq!(zero_crossings(&v), vec![2, 4]);
    }

    #[test]
    fn test_exact_zero_does_not_count() {
        let v = array![1.0, 0.0, -1.0, 0.0, 1.0];
        assert!(zero_crossings(&v).is_empty());
        let v = array![-2.0, 0.0, 0.0, -1.0];
        assert!(zero_crossings(&v).is_empty());
    }

    #[test]
    fn test_intervals_skip_one_crossing() {
        assert_eq!(crossing_intervals(&[10, 40, 70, 100]), vec![10..70, 40..100]);
        assert!(crossing_intervals(&[3, 9]).is_empty());
    }

    #[test]
    fn test_sign_change_split_matches_crossings() {
        let v: Vec<f64> = (0..60).map(|i| ((i as f64 + 0.5) * std::f64::consts::PI / 10.0).sin()).collect();
        let s = Series::from_columns(vec![("vel_cmd", v)]).unwrap();
        let crossings = zero_crossings(s.column("vel_cmd").unwrap());
        assert_eq!(crossings, vec![10, 20, 30, 40, 50]);

        let split = SignChangeSplit::new("vel_cmd", 1);
        let fragments = fragment_by_iteration(&s, |s, w| split.decide(s, w)).unwrap();
        let starts: Vec<usize> = fragments.iter().map(|f| f.source_rows.start).collect();
        assert_eq!(starts, vec![0, 10, 20, 30, 40]);
        assert!(fragments.iter().all(|f| f.len() == 10));
    }

    #[test]
    fn test_min_samples_suppresses_early_split() {
        let s = Series::from_columns(vec![("v", vec![1.0, -1.0, 1.0, 1.0, -1.0, 1.0])]).unwrap();
        let split = SignChangeSplit::new("v", 3);
        let fragments = fragment_by_iteration(&s, |s, w| split.decide(s, w)).unwrap();
        let ranges: Vec<RowRange> = fragments.iter().map(|f| f.source_rows.clone()).collect();
        assert_eq!(ranges, vec![0..4]);
    }
}
