//! Index expansion for day-of-year windows.

/// Returns the offsets of a window of `window` days centred on day 0.
///
/// Odd windows are symmetric (`5` → `[-2, -1, 0, 1, 2]`); even windows lean
/// backwards (`4` → `[-2, -1, 0, 1]`). A window of 0 is treated as 1.
pub fn window_offsets(window: usize) -> Vec<i32> {
    let window = window.max(1) as i32;
    let lo = -(window / 2);
    (lo..lo + window).collect()
}

/// Expands a set of base indices by a set of offsets, clipping to `[0, n_max)`.
///
/// Computes `{b + o | b in base, o in offsets}`, drops results outside
/// `[0, n_max)`, then sorts and deduplicates. Used to gather every time step
/// that falls inside the window around each occurrence of one day-of-year.
///
/// # Example
///
/// ```ignore
/// let indices = expand_indices(&[10, 375], &[-2, -1, 0, 1, 2], 400);
/// assert_eq!(indices, vec![8, 9, 10, 11, 12, 373, 374, 375, 376, 377]);
/// ```
pub fn expand_indices(base: &[usize], offsets: &[i32], n_max: usize) -> Vec<usize> {
    let mut result: Vec<usize> = base
        .iter()
        .flat_map(|&b| offsets.iter().map(move |&o| b as isize + o as isize))
        .filter(|&idx| idx >= 0 && (idx as usize) < n_max)
        .map(|idx| idx as usize)
        .collect();
    result.sort_unstable();
    result.dedup();
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_odd() {
        assert_eq!(window_offsets(5), vec![-2, -1, 0, 1, 2]);
        assert_eq!(window_offsets(1), vec![0]);
    }

    #[test]
    fn offsets_even_and_zero() {
        assert_eq!(window_offsets(4), vec![-2, -1, 0, 1]);
        assert_eq!(window_offsets(0), vec![0]);
    }

    #[test]
    fn clips_both_ends() {
        let indices = expand_indices(&[0, 9], &[-2, -1, 0, 1, 2], 10);
        assert_eq!(indices, vec![0, 1, 2, 7, 8, 9]);
    }

    #[test]
    fn dedups_overlaps() {
        let indices = expand_indices(&[5, 6], &[-1, 0, 1], 365);
        assert_eq!(indices, vec![4, 5, 6, 7]);
    }

    #[test]
    fn empty_inputs() {
        assert!(expand_indices(&[], &[-1, 0, 1], 365).is_empty());
        assert!(expand_indices(&[3], &[0], 0).is_empty());
    }
}
