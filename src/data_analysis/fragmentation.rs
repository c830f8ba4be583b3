// src/data_analysis/fragmentation.rs

use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use crate::error::{AnalysisError, Result};
use crate::series::Series;
use crate::types::{Fragment, RowRange, SplitDecision};

/// Progress sink for long fragmentation scans. Reporting never changes the
/// iteration order or the result.
pub trait Progress {
    fn progress<S: Into<String>>(name: S, len: usize) -> Self;
    fn increment(&mut self);
    fn finish(&mut self) {}
}

impl Progress for ProgressBar {
    fn progress<S: Into<String>>(name: S, len: usize) -> Self {
        let progress = ProgressBar::new(len as u64);
        progress.set_style(
            ProgressStyle::with_template("{msg} [{eta_precise}] {bar:50.cyan/blue} {percent:>3}%")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        progress.set_message(name.into());
        progress
    }
    #[inline]
    fn increment(&mut self) {
        self.inc(1)
    }
    #[inline]
    fn finish(&mut self) {
        ProgressBar::finish(self);
    }
}

/// Silent progress, used by the plain entry points and in tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl Progress for NoProgress {
    fn progress<S: Into<String>>(_name: S, _len: usize) -> Self {
        NoProgress
    }
    fn increment(&mut self) {}
}

/// Index-driven fragmentation.
///
/// Grows a window `[l, u)` one row at a time. For each window the predicate
/// receives the parent series and the window, and returns the (possibly
/// advanced) lower bound together with a split flag. On a split, the window
/// `[l, u)` becomes a fragment and the next window starts at `u`. Rows after
/// the last split are not emitted. The returned lower bound must stay within
/// `[l, u]`.
pub fn fragment_by_iteration<F>(series: &Series, predicate: F) -> Result<Vec<Fragment>>
where
    F: FnMut(&Series, RowRange) -> Result<SplitDecision>,
{
    fragment_by_iteration_with_progress::<F, NoProgress>(series, predicate)
}

/// [`fragment_by_iteration`] reporting one tick per scanned row.
pub fn fragment_by_iteration_with_progress<F, P>(series: &Series, mut predicate: F) -> Result<Vec<Fragment>>
where
    F: FnMut(&Series, RowRange) -> Result<SplitDecision>,
    P: Progress,
{
    let mut fragments = Vec::new();
    if series.len() < 2 {
        return Ok(fragments);
    }
    let last = series.len() - 1;
    let mut progress = P::progress("Fragmenting", last);

    let mut lower = 0;
    let mut upper = lower + 1;
    while upper <= last {
        let (new_lower, split) = predicate(series, lower..upper)?;
        if new_lower < lower || new_lower > upper {
            return Err(AnalysisError::InvalidParameter(format!(
                "split predicate moved the lower bound to {new_lower}, outside {lower}..={upper}"
            )));
        }
        lower = new_lower;
        if split {
            if lower < upper {
                fragments.push(Fragment {
                    source_rows: lower..upper,
                    series: series.slice(lower..upper)?,
                });
            }
            lower = upper;
        }
        upper += 1;
        progress.increment();
    }
    progress.finish();

    debug!("Index-driven split produced {} fragments", fragments.len());
    Ok(fragments)
}

/// Mask-driven fragmentation: every run of consecutive `true` rows becomes
/// one fragment, `false` rows are dropped.
pub fn fragment_by_mask(series: &Series, mask: &[bool]) -> Result<Vec<Fragment>> {
    if mask.len() != series.len() {
        return Err(AnalysisError::LengthMismatch {
            column: "mask".to_string(),
            expected: series.len(),
            found: mask.len(),
        });
    }
    let mut runs = Vec::new();
    let mut start = None;
    for (row, &selected) in mask.iter().enumerate() {
        match (selected, start) {
            (true, None) => start = Some(row),
            (false, Some(s)) => {
                runs.push(s..row);
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        runs.push(s..mask.len());
    }
    debug!("Mask split produced {} fragments", runs.len());
    fragment_by_ranges(series, &runs)
}

/// Copies each row range into its own fragment.
pub fn fragment_by_ranges(series: &Series, ranges: &[RowRange]) -> Result<Vec<Fragment>> {
    ranges
        .iter()
        .map(|rows| {
            Ok(Fragment {
                source_rows: rows.clone(),
                series: series.slice(rows.clone())?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counter(n: usize) -> Series {
        Series::from_columns(vec![("t", (0..n).map(|i| i as f64).collect::<Vec<_>>())]).unwrap()
    }

    #[test]
    fn test_fixed_length_split_is_contiguous() {
        let s = counter(11);
        let fragments = fragment_by_iteration(&s, |_, w: RowRange| Ok((w.start, w.len() == 3))).unwrap();
        let ranges: Vec<RowRange> = fragments.iter().map(|f| f.source_rows.clone()).collect();
        assert_eq!(ranges, vec![0..3, 3..6, 6..9]);
        assert_eq!(fragments[1].series.value("t", 0).unwrap(), 3.0);
        // Trailing rows 9 and 10 never closed a window.
        assert_eq!(fragments.iter().map(Fragment::len).sum::<usize>(), 9);
    }

    #[test]
    fn test_predicate_may_advance_lower_bound() {
        let s = counter(8);
        // Keep only the last two rows of every four-row window.
        let fragments = fragment_by_iteration(&s, |_, w: RowRange| {
            let split = w.end % 4 == 0;
            Ok((if split { w.end - 2 } else { w.start }, split))
        })
        .unwrap();
        let ranges: Vec<RowRange> = fragments.iter().map(|f| f.source_rows.clone()).collect();
        assert_eq!(ranges, vec![2..4]);
    }

    #[test]
    fn test_lower_bound_outside_window_rejected() {
        let s = counter(5);
        let result = fragment_by_iteration(&s, |_, w: RowRange| Ok((w.end + 1, false)));
        assert!(matches!(result, Err(AnalysisError::InvalidParameter(_))));
    }

    #[test]
    fn test_progress_does_not_change_result() {
        let s = counter(20);
        let split = |_: &Series, w: RowRange| -> Result<SplitDecision> { Ok((w.start, w.len() == 4)) };
        let plain = fragment_by_iteration(&s, split).unwrap();
        let reported = fragment_by_iteration_with_progress::<_, NoProgress>(&s, split).unwrap();
        assert_eq!(plain, reported);
    }

    #[test]
    fn test_mask_groups_true_runs_and_drops_false() {
        let s = counter(10);
        let mask = [false, true, true, false, false, true, false, true, true, true];
        let fragments = fragment_by_mask(&s, &mask).unwrap();
        let ranges: Vec<RowRange> = fragments.iter().map(|f| f.source_rows.clone()).collect();
        assert_eq!(ranges, vec![1..3, 5..6, 7..10]);
        assert_eq!(fragments[2].series.time().unwrap().to_vec(), vec![7.0, 8.0, 9.0]);
        let total: usize = fragments.iter().map(Fragment::len).sum();
        assert_eq!(total, mask.iter().filter(|&&m| m).count());
    }

    #[test]
    fn test_mask_length_checked() {
        let s = counter(3);
        assert!(fragment_by_mask(&s, &[true]).is_err());
    }
}
