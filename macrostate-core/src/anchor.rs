//! Calendar-anchor selection.
//!
//! Preference order for an anchor date: the latest observation at or before
//! it, otherwise the earliest observation after it. Among observations sharing
//! a date, the at-or-before pick takes the last one in input order and the
//! after pick takes the first.
//!
//! The `*_sorted` variants expect a slice already produced by
//! [`crate::sanitize::clean_finite`] or [`crate::sanitize::clean_observations`].

use chrono::{NaiveDate, TimeDelta};
use macrostate_types::Observation;

use crate::sanitize::clean_finite;

/// `date − days`, or `None` on calendar overflow.
#[must_use]
pub fn days_before(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    TimeDelta::try_days(days).and_then(|td| date.checked_sub_signed(td))
}

fn abs_days(a: NaiveDate, b: NaiveDate) -> i64 {
    (a - b).num_days().abs()
}

/// Pick the observation nearest to `anchor` under the default preference.
///
/// Non-finite values are dropped and the input is stably sorted first.
#[must_use]
pub fn select_anchor(observations: &[Observation], anchor: NaiveDate) -> Option<Observation> {
    select_anchor_sorted(&clean_finite(observations), anchor)
}

/// [`select_anchor`] over a cleaned, date-sorted slice.
#[must_use]
pub fn select_anchor_sorted(sorted: &[Observation], anchor: NaiveDate) -> Option<Observation> {
    let idx = sorted.partition_point(|o| o.date <= anchor);
    if idx > 0 {
        Some(sorted[idx - 1])
    } else {
        sorted.first().copied()
    }
}

/// Like [`select_anchor`], but only accept a candidate within
/// `tolerance_days` of `anchor`.
///
/// If the at-or-before candidate is too far away the nearest after-candidate
/// is tried. `None` means no observation lies within tolerance.
#[must_use]
pub fn select_anchor_within(
    observations: &[Observation],
    anchor: NaiveDate,
    tolerance_days: i64,
) -> Option<Observation> {
    select_anchor_within_sorted(&clean_finite(observations), anchor, tolerance_days)
}

/// [`select_anchor_within`] over a cleaned, date-sorted slice.
#[must_use]
pub fn select_anchor_within_sorted(
    sorted: &[Observation],
    anchor: NaiveDate,
    tolerance_days: i64,
) -> Option<Observation> {
    let idx = sorted.partition_point(|o| o.date <= anchor);
    if idx > 0 {
        let before = sorted[idx - 1];
        if abs_days(before.date, anchor) <= tolerance_days {
            return Some(before);
        }
    }
    sorted
        .get(idx)
        .filter(|after| abs_days(after.date, anchor) <= tolerance_days)
        .copied()
}

/// Latest observation at or before `current_date − days`.
#[must_use]
pub fn select_prior(
    observations: &[Observation],
    current_date: NaiveDate,
    days: i64,
) -> Option<Observation> {
    select_prior_sorted(&clean_finite(observations), current_date, days)
}

/// [`select_prior`] over a cleaned, date-sorted slice.
#[must_use]
pub fn select_prior_sorted(
    sorted: &[Observation],
    current_date: NaiveDate,
    days: i64,
) -> Option<Observation> {
    let target = days_before(current_date, days)?;
    let idx = sorted.partition_point(|o| o.date <= target);
    idx.checked_sub(1).map(|i| sorted[i])
}
