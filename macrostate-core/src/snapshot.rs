//! Snapshot resolution: the anchor set of one series.

use chrono::{Datelike, NaiveDate};
use macrostate_types::{AnchorConfig, DataQuality, Observation};

use crate::anchor::{days_before, select_anchor_sorted, select_anchor_within_sorted};
use crate::quality::quality_from_flags;
use crate::sanitize::clean_finite;
use crate::timeseries::infer::is_high_frequency;

/// Resolved anchors of one series.
///
/// Every resolved anchor is dated on or before `current`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SnapshotSet {
    /// Latest observation.
    pub current: Option<Observation>,
    /// Sixth-most-recent observation of a high-frequency series.
    pub last_week: Option<Observation>,
    /// Observation near one month back.
    pub last_month: Option<Observation>,
    /// Observation near six months back.
    pub last_6m: Option<Observation>,
    /// Observation nearest January 1 of the reference year.
    pub start_of_year: Option<Observation>,
    /// Whether the series is sampled densely enough for `last_week`.
    pub high_frequency: bool,
}

impl SnapshotSet {
    /// Completeness of the required anchors.
    ///
    /// `last_week` is required only for high-frequency series.
    #[must_use]
    pub fn quality(&self) -> DataQuality {
        let mut flags = vec![
            self.current.is_some(),
            self.last_month.is_some(),
            self.last_6m.is_some(),
            self.start_of_year.is_some(),
        ];
        if self.high_frequency {
            flags.push(self.last_week.is_some());
        }
        quality_from_flags(flags)
    }
}

/// Resolve the anchor set of `observations`.
///
/// `current_year` selects the year whose January 1 anchors `start_of_year`;
/// it defaults to the year of the latest observation.
#[must_use]
pub fn select_snapshots(
    observations: &[Observation],
    current_year: Option<i32>,
    cfg: &AnchorConfig,
) -> SnapshotSet {
    select_snapshots_sorted(&clean_finite(observations), current_year, cfg)
}

/// [`select_snapshots`] over a cleaned, date-sorted slice.
#[must_use]
pub fn select_snapshots_sorted(
    sorted: &[Observation],
    current_year: Option<i32>,
    cfg: &AnchorConfig,
) -> SnapshotSet {
    let Some(current) = sorted.last().copied() else {
        return SnapshotSet::default();
    };

    let year = current_year.unwrap_or_else(|| current.date.year());
    let start_of_year = NaiveDate::from_ymd_opt(year, 1, 1)
        .and_then(|jan1| select_anchor_sorted(sorted, jan1));

    let high_frequency = is_high_frequency(sorted, cfg.high_frequency_max_spacing_days);
    let last_week = high_frequency
        .then(|| sorted[sorted.len().saturating_sub(cfg.last_week_offset.saturating_add(1))]);

    let past_anchor = |days: i64, tolerance: i64| {
        days_before(current.date, days)
            .and_then(|anchor| select_anchor_within_sorted(sorted, anchor, tolerance))
            .filter(|o| o.date < current.date)
    };
    let last_month = past_anchor(cfg.last_month_days, cfg.last_month_tolerance_days);
    let last_6m = past_anchor(cfg.last_6m_days, cfg.last_6m_tolerance_days);

    SnapshotSet {
        current: Some(current),
        last_week,
        last_month,
        last_6m,
        start_of_year,
        high_frequency,
    }
}

/// Earliest date a provider must be asked for so every anchor is resolvable
/// at `now`: the earlier of January 1 and the six-month window edge, minus
/// `padding_days`.
#[must_use]
pub fn anchor_window_start(now: NaiveDate, cfg: &AnchorConfig, padding_days: i64) -> NaiveDate {
    let jan1 = NaiveDate::from_ymd_opt(now.year(), 1, 1).unwrap_or(now);
    let six_month_edge =
        days_before(now, cfg.last_6m_days + cfg.last_6m_tolerance_days).unwrap_or(NaiveDate::MIN);
    let earliest = jan1.min(six_month_edge);
    days_before(earliest, padding_days).unwrap_or(NaiveDate::MIN)
}
