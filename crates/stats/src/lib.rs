//! NaN-aware statistical helpers for the index calculator.
//!
//! Missing values are represented as `NaN` throughout the workspace; every
//! reducer here skips them.

/// Mean of the finite values. Returns `NaN` if there are none.
pub fn nan_mean(data: &[f64]) -> f64 {
    let (sum, n) = data
        .iter()
        .filter(|v| v.is_finite())
        .fold((0.0, 0usize), |(s, n), &v| (s + v, n + 1));
    if n == 0 { f64::NAN } else { sum / n as f64 }
}

/// Sum of the finite values. Returns `NaN` if there are none.
pub fn nan_sum(data: &[f64]) -> f64 {
    let mut finite = data.iter().filter(|v| v.is_finite()).peekable();
    if finite.peek().is_none() {
        return f64::NAN;
    }
    finite.sum()
}

/// Maximum of the finite values. Returns `NaN` if there are none.
pub fn nan_max(data: &[f64]) -> f64 {
    data.iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(f64::NAN, f64::max)
}

/// Minimum of the finite values. Returns `NaN` if there are none.
pub fn nan_min(data: &[f64]) -> f64 {
    data.iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(f64::NAN, f64::min)
}

/// Hyndman & Fan type 8 quantile (median-unbiased, `alpha = beta = 1/3`).
///
/// **Expects pre-sorted input** (caller's responsibility). `p` is clamped to
/// `[0, 1]`.
///
/// # Panics
///
/// Panics if `sorted` is empty.
pub fn quantile_type8(sorted: &[f64], p: f64) -> f64 {
    assert!(
        !sorted.is_empty(),
        "quantile_type8: input must not be empty"
    );
    let n = sorted.len() as f64;
    let p = p.clamp(0.0, 1.0);
    // 1-based position, clamped to the sample.
    let h = ((n + 1.0 / 3.0) * p + 1.0 / 3.0).clamp(1.0, n);
    let lo = h.floor() as usize;
    let hi = (lo + 1).min(sorted.len());
    let g = h - h.floor();
    sorted[lo - 1] + g * (sorted[hi - 1] - sorted[lo - 1])
}

/// Percentile (`rank` in 0..=100) of the finite values using the type 8
/// estimator. Returns `NaN` if there are no finite values.
pub fn nan_percentile(data: &[f64], rank: f64) -> f64 {
    let mut finite: Vec<f64> = data.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() {
        return f64::NAN;
    }
    finite.sort_by(|a, b| a.total_cmp(b));
    quantile_type8(&finite, rank / 100.0)
}

/// Lengths of the runs of consecutive `true` values, in order.
pub fn run_lengths(mask: &[bool]) -> Vec<usize> {
    let mut runs = Vec::new();
    let mut current = 0usize;
    for &m in mask {
        if m {
            current += 1;
        } else if current > 0 {
            runs.push(current);
            current = 0;
        }
    }
    if current > 0 {
        runs.push(current);
    }
    runs
}

/// Trailing rolling sum over `window` steps.
///
/// Element `i` holds the sum of `data[i + 1 - window..=i]`; the first
/// `window - 1` elements are `NaN`, as is any window containing a `NaN`.
pub fn rolling_sum(data: &[f64], window: usize) -> Vec<f64> {
    let window = window.max(1);
    (0..data.len())
        .map(|i| {
            if i + 1 < window {
                f64::NAN
            } else {
                data[i + 1 - window..=i].iter().sum()
            }
        })
        .collect()
}
