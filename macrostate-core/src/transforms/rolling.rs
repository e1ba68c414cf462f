//! Trailing-window statistics over optional values.
//!
//! Every output is aligned with its input: `out[i]` summarizes the window
//! ending at `i`. A window yields a value only when it is complete, i.e. it
//! spans `window` positions and every position holds a value.

use crate::sanitize::sanitize_f64;

/// Values of the complete window ending at `end`, or `None`.
fn full_window(values: &[Option<f64>], end: usize, window: usize) -> Option<Vec<f64>> {
    if window == 0 || end + 1 < window {
        return None;
    }
    values[end + 1 - window..=end].iter().copied().collect()
}

#[allow(clippy::cast_precision_loss)]
fn mean(xs: &[f64]) -> f64 {
    xs.iter().sum::<f64>() / xs.len() as f64
}

/// Sample mean and standard deviation (n − 1). A constant window has std
/// exactly zero.
#[allow(clippy::cast_precision_loss)]
fn mean_std(xs: &[f64]) -> Option<(f64, f64)> {
    if xs.len() < 2 {
        return None;
    }
    if xs.iter().all(|x| *x == xs[0]) {
        return Some((xs[0], 0.0));
    }
    let m = mean(xs);
    let ss: f64 = xs.iter().map(|x| (x - m) * (x - m)).sum();
    Some((m, (ss / (xs.len() - 1) as f64).sqrt()))
}

fn map_windows<F>(values: &[Option<f64>], window: usize, f: F) -> Vec<Option<f64>>
where
    F: Fn(&[f64]) -> Option<f64>,
{
    (0..values.len())
        .map(|i| full_window(values, i, window).and_then(|w| f(w.as_slice())).and_then(sanitize_f64))
        .collect()
}

/// Rolling mean.
#[must_use]
pub fn rolling_mean(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    map_windows(values, window, |w| Some(mean(w)))
}

/// Rolling sample standard deviation.
#[must_use]
pub fn rolling_std(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    map_windows(values, window, |w| mean_std(w).map(|(_, s)| s))
}

/// Z-score of each value against its trailing window; absent when the
/// window is incomplete or its std is zero.
#[must_use]
pub fn rolling_zscore(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    map_windows(values, window, |w| {
        let (m, s) = mean_std(w)?;
        let v = *w.last()?;
        (s > 0.0).then(|| (v - m) / s)
    })
}

/// `value / mean − 1` (0.0 at the mean), absent when either side is missing or
/// the mean is zero.
#[must_use]
pub fn pct_of(values: &[Option<f64>], means: &[Option<f64>]) -> Vec<Option<f64>> {
    values
        .iter()
        .zip(means)
        .map(|(v, m)| match (v, m) {
            (Some(v), Some(m)) if *m != 0.0 => sanitize_f64(v / m - 1.0),
            _ => None,
        })
        .collect()
}

/// Fractional change versus `lag` positions earlier; absent when the prior is
/// missing or zero.
#[must_use]
pub fn pct_returns(values: &[Option<f64>], lag: usize) -> Vec<Option<f64>> {
    (0..values.len())
        .map(|i| {
            let prior = i.checked_sub(lag).and_then(|j| values[j])?;
            let v = values[i]?;
            if lag == 0 || prior == 0.0 {
                return None;
            }
            sanitize_f64(v / prior - 1.0)
        })
        .collect()
}

/// Rate of change in percent: `(v_t / v_{t−lag} − 1) × 100`.
#[must_use]
pub fn roc_pct(values: &[Option<f64>], lag: usize) -> Vec<Option<f64>> {
    pct_returns(values, lag)
        .into_iter()
        .map(|r| r.and_then(|r| sanitize_f64(r * 100.0)))
        .collect()
}

/// Rolling Pearson correlation of two aligned slices; absent when either
/// window is incomplete or constant.
#[must_use]
pub fn rolling_corr(a: &[Option<f64>], b: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    let n = a.len().min(b.len());
    (0..n)
        .map(|i| {
            let wa = full_window(a, i, window)?;
            let wb = full_window(b, i, window)?;
            let (ma, sa) = mean_std(&wa)?;
            let (mb, sb) = mean_std(&wb)?;
            if sa == 0.0 || sb == 0.0 {
                return None;
            }
            #[allow(clippy::cast_precision_loss)]
            let cov = wa
                .iter()
                .zip(&wb)
                .map(|(x, y)| (x - ma) * (y - mb))
                .sum::<f64>()
                / (window - 1) as f64;
            sanitize_f64((cov / (sa * sb)).clamp(-1.0, 1.0))
        })
        .collect()
}
