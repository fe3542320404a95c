//! Quantile computation using O(n) selection.
//!
//! Single quantiles use `slice.select_nth_unstable_by()` (introselect).
//! Several quantiles over the same data sort once and index.

/// Compute a single quantile from a mutable slice.
///
/// Uses the R-7 definition (linear interpolation between order statistics).
/// The slice is partially reordered as a side effect.
///
/// # Panics
///
/// Panics if `data` is empty or if `p` is outside [0, 1].
pub fn compute_quantile(data: &mut [f64], p: f64) -> f64 {
    assert!(!data.is_empty(), "Cannot compute quantile of empty slice");
    assert!(
        (0.0..=1.0).contains(&p),
        "Quantile probability must be in [0, 1]"
    );

    let n = data.len();
    if n == 1 {
        return data[0];
    }

    let h = (n - 1) as f64 * p;
    let h_floor = h.floor() as usize;
    let h_frac = h - h.floor();

    if h_floor >= n - 1 {
        let (_, &mut max, _) = data.select_nth_unstable_by(n - 1, |a, b| a.total_cmp(b));
        return max;
    }

    let (_, &mut lower, upper) = data.select_nth_unstable_by(h_floor, |a, b| a.total_cmp(b));

    if h_frac == 0.0 {
        return lower;
    }

    // Next order statistic is the minimum of the upper partition
    let upper_min = upper
        .iter()
        .copied()
        .min_by(|a, b| a.total_cmp(b))
        .unwrap_or(lower);

    lower + h_frac * (upper_min - lower)
}

/// Compute several quantiles at once from unsorted data.
///
/// Sorts a copy once, then reads each quantile with the same R-7
/// interpolation as [`compute_quantile`]. Output order matches `ps`.
///
/// # Panics
///
/// Panics if `data` is empty or any probability is outside [0, 1].
pub fn compute_quantiles(data: &[f64], ps: &[f64]) -> Vec<f64> {
    assert!(!data.is_empty(), "Cannot compute quantiles of empty slice");

    let mut sorted = data.to_vec();
    sorted.sort_unstable_by(|a, b| a.total_cmp(b));
    let n = sorted.len();

    ps.iter()
        .map(|&p| {
            assert!(
                (0.0..=1.0).contains(&p),
                "Quantile probability must be in [0, 1]"
            );
            let h = (n - 1) as f64 * p;
            let h_floor = h.floor() as usize;
            let h_frac = h - h.floor();

            if h_floor >= n - 1 {
                sorted[n - 1]
            } else if h_frac == 0.0 {
                sorted[h_floor]
            } else {
                sorted[h_floor] + h_frac * (sorted[h_floor + 1] - sorted[h_floor])
            }
        })
        .collect()
}
