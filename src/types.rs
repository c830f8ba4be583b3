// src/types.rs
// Type aliases shared between the analysis and plotting layers

use std::ops::Range;

use crate::series::Series;

/// `[start_time, end_time]` in seconds, both ends inclusive.
pub type TimeWindow = (f64, f64);

/// Half-open row range in a parent series.
pub type RowRange = Range<usize>;

/// Index-driven split predicate: receives the current window and its lower
/// bound, returns the (possibly advanced) lower bound and whether to split.
pub type SplitDecision = (usize, bool);

/// Plot data: (x, y) points of one drawn series.
pub type PlotPoints = Vec<(f64, f64)>;

/// A fragment cut out of a parent series, remembering where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    pub source_rows: RowRange,
    pub series: Series,
}

impl Fragment {
    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}
