//! Rolling transform engine.
//!
//! Pure functions of their inputs: no clock, no randomness, so recomputing
//! over the same observations yields identical output.

/// Trailing-window primitives.
pub mod rolling;

use macrostate_types::{CrossAssetTransforms, Observation, SeriesTransforms, TransformConfig, TransformSeries};

use crate::sanitize::{clean_finite, sanitize_f64};
use crate::timeseries::util::{inner_join, unzip_observations};

use rolling::{pct_of, pct_returns, roc_pct, rolling_corr, rolling_mean, rolling_std, rolling_zscore};

/// Realized volatility: rolling sample std of period returns, annualized and
/// expressed in percent.
#[must_use]
pub fn realized_vol_pct(values: &[Option<f64>], cfg: &TransformConfig) -> Vec<Option<f64>> {
    let scale = f64::from(cfg.annualization_periods).sqrt() * 100.0;
    rolling_std(&pct_returns(values, 1), cfg.realized_vol_window)
        .into_iter()
        .map(|s| s.and_then(|s| sanitize_f64(s * scale)))
        .collect()
}

/// Compute the rolling statistics of one series.
///
/// Observations are cleaned (non-finite dropped, stable date sort) first.
/// Realized-volatility outputs are present only when `include_realized_vol`.
#[must_use]
pub fn compute_transforms(
    observations: &[Observation],
    cfg: &TransformConfig,
    include_realized_vol: bool,
) -> SeriesTransforms {
    let (dates, raw) = unzip_observations(&clean_finite(observations));
    let values: Vec<Option<f64>> = raw.into_iter().map(Some).collect();
    let out = |v: Vec<Option<f64>>| TransformSeries::new(dates.clone(), v);

    let mean_3y = rolling_mean(&values, cfg.long_window);
    let pct_of_avg = pct_of(&values, &mean_3y);

    let (realized_vol_20d_pct, realized_vol_20d_zscore_3y) = if include_realized_vol {
        let rv = realized_vol_pct(&values, cfg);
        let rv_z = rolling_zscore(&rv, cfg.long_window);
        (Some(out(rv)), Some(out(rv_z)))
    } else {
        (None, None)
    };

    SeriesTransforms {
        mean_1y: out(rolling_mean(&values, cfg.short_window)),
        std_1y: out(rolling_std(&values, cfg.short_window)),
        std_3y: out(rolling_std(&values, cfg.long_window)),
        zscore_3y: out(rolling_zscore(&values, cfg.long_window)),
        pct_of_avg_3y: out(pct_of_avg),
        roc_5d_pct: out(roc_pct(&values, cfg.roc_short)),
        roc_20d_pct: out(roc_pct(&values, cfg.roc_long)),
        mean_3y: out(mean_3y),
        realized_vol_20d_pct,
        realized_vol_20d_zscore_3y,
    }
}

/// Joint statistics of `a` and `b` over their common dates.
///
/// Each side is z-scored over the long window; `z_spread = z_b − z_a`,
/// `z_ratio = z_b / z_a`, and the correlations are of the raw levels.
#[must_use]
pub fn cross_asset_transforms(
    a: &[Observation],
    b: &[Observation],
    cfg: &TransformConfig,
) -> CrossAssetTransforms {
    let (dates, va, vb) = inner_join(&clean_finite(a), &clean_finite(b));
    let va: Vec<Option<f64>> = va.into_iter().map(Some).collect();
    let vb: Vec<Option<f64>> = vb.into_iter().map(Some).collect();
    let out = |v: Vec<Option<f64>>| TransformSeries::new(dates.clone(), v);

    let za = rolling_zscore(&va, cfg.long_window);
    let zb = rolling_zscore(&vb, cfg.long_window);
    let pairs = || za.iter().zip(zb.iter());

    let z_spread = pairs()
        .map(|(za, zb)| match (za, zb) {
            (Some(za), Some(zb)) => sanitize_f64(zb - za),
            _ => None,
        })
        .collect();
    let z_ratio = pairs()
        .map(|(za, zb)| match (za, zb) {
            (Some(za), Some(zb)) if *za != 0.0 => sanitize_f64(zb / za),
            _ => None,
        })
        .collect();

    CrossAssetTransforms {
        z_spread: out(z_spread),
        z_ratio: out(z_ratio),
        corr_60d: out(rolling_corr(&vb, &va, cfg.corr_short)),
        corr_120d: out(rolling_corr(&vb, &va, cfg.corr_long)),
    }
}
