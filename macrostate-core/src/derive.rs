//! Deltas derived from a resolved snapshot set.

use macrostate_types::{DerivedChanges, Observation, SeriesKind, SnapshotMeta};

use crate::anchor::select_prior_sorted;
use crate::sanitize::sanitize_f64;
use crate::snapshot::SnapshotSet;

/// Percent change from `prior` to `current`; absent when `prior` is zero.
#[must_use]
pub fn pct_change(current: f64, prior: f64) -> Option<f64> {
    if prior == 0.0 {
        return None;
    }
    sanitize_f64((current - prior) / prior * 100.0)
}

/// Absolute change from `prior` to `current`.
#[must_use]
pub fn abs_change(current: f64, prior: f64) -> Option<f64> {
    sanitize_f64(current - prior)
}

/// Basis-point change for series quoted in percent.
#[must_use]
pub fn bp_change(current: f64, prior: f64) -> Option<f64> {
    sanitize_f64((current - prior) * 100.0)
}

/// Compute every derived delta of a snapshot set.
///
/// `sorted` must be the cleaned, date-sorted observations the snapshot set was
/// resolved from; it backs the calendar-day priors of the 1d/5d changes.
#[must_use]
pub fn derive_changes(sorted: &[Observation], snaps: &SnapshotSet, kind: SeriesKind) -> DerivedChanges {
    let Some(current) = snaps.current else {
        return DerivedChanges::default();
    };
    let vs = |prior: Option<Observation>, f: fn(f64, f64) -> Option<f64>| {
        prior.and_then(|p| f(current.value, p.value))
    };
    let bp = |prior: Option<Observation>| {
        if kind.reports_bp() {
            vs(prior, bp_change)
        } else {
            None
        }
    };

    DerivedChanges {
        change_1d_pct: vs(select_prior_sorted(sorted, current.date, 1), pct_change),
        change_5d_pct: vs(select_prior_sorted(sorted, current.date, 5), pct_change),
        change_1w_pct: vs(snaps.last_week, pct_change),
        change_1m: vs(snaps.last_month, abs_change),
        change_1m_pct: vs(snaps.last_month, pct_change),
        change_6m_pct: vs(snaps.last_6m, pct_change),
        change_ytd_pct: vs(snaps.start_of_year, pct_change),
        change_1w_bp: bp(snaps.last_week),
        change_1m_bp: bp(snaps.last_month),
        change_ytd_bp: bp(snaps.start_of_year),
    }
}

/// Assemble the envelope snapshot meta. Absent when there is no current value.
#[must_use]
pub fn snapshot_meta(snaps: &SnapshotSet, changes: DerivedChanges) -> Option<SnapshotMeta> {
    let current = snaps.current?;
    let value = |o: Option<Observation>| o.map(|o| o.value);
    let date = |o: Option<Observation>| o.map(|o| o.date);
    Some(SnapshotMeta {
        current: current.value,
        as_of_current: current.date,
        last_week: value(snaps.last_week),
        as_of_last_week: date(snaps.last_week),
        last_month: value(snaps.last_month),
        as_of_last_month: date(snaps.last_month),
        last_6m: value(snaps.last_6m),
        as_of_last_6m: date(snaps.last_6m),
        start_of_year: value(snaps.start_of_year),
        as_of_start_of_year: date(snaps.start_of_year),
        high_frequency: snaps.high_frequency,
        changes,
        data_quality: snaps.quality(),
    })
}
