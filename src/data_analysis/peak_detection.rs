// src/data_analysis/peak_detection.rs

/// Indices of local maxima whose value is at least `height`.
///
/// A peak rises strictly from its left neighbour and falls strictly after it,
/// possibly across a flat top. A flat top reports its middle sample (rounded
/// down). The first and last samples are never peaks.
pub fn find_peaks(values: &[f64], height: f64) -> Vec<usize> {
    let mut peaks = Vec::new();
    if values.len() < 3 {
        return peaks;
    }
    let last = values.len() - 1;
    let mut i = 1;
    while i < last {
        if values[i - 1] < values[i] {
            // Walk across a plateau, if any.
            let mut ahead = i + 1;
            while ahead < last && values[ahead] == values[i] {
                ahead += 1;
            }
            if values[ahead] < values[i] {
                let peak = (i + ahead - 1) / 2;
                if values[peak] >= height {
                    peaks.push(peak);
                }
                i = ahead;
                continue;
            }
        }
        i += 1;
    }
    peaks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_peaks_above_height() {
        let v = [0.0, 1.0, 0.0, 0.1, 0.3, 0.1, 2.0, 0.0];
        assert_eq!(find_peaks(&v, 0.2), vec![1, 4, 6]);
        assert_eq!(find_peaks(&v, 0.5), vec![1, 6]);
    }

    #[test]
    fn test_plateau_reports_middle() {
        let v = [0.0, 1.0, 1.0, 1.0, 0.0];
        assert_eq!(find_peaks(&v, 0.0), vec![2]);
        let v = [0.0, 1.0, 1.0, 0.0];
        assert_eq!(find_peaks(&v, 0.0), vec![1]);
    }

    #[test]
    fn test_rising_plateau_and_edges_are_not_peaks() {
        assert!(find_peaks(&[0.0, 1.0, 1.0, 2.0], 0.0).is_empty());
        assert!(find_peaks(&[3.0, 2.0, 1.0], 0.0).is_empty());
        assert!(find_peaks(&[1.0, 2.0], 0.0).is_empty());
    }
}
