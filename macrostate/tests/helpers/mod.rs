// Shared fixtures for the orchestrator tests.
#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, NaiveDate, Utc};
use macrostate::fallback::{Accessor, FallbackOptions};
use macrostate::{HistoryState, MacroError, RawObservation, SeriesProvider};
use macrostate_core::{
    EnvelopeMeta, HistoryMeta, IngestionEnvelope, IngestionStatus, SeriesTransforms,
    TransformSeries,
};
use macrostate_mock::MockProvider;

/// Reference date the fixture providers end on (a Friday).
pub fn as_of() -> NaiveDate {
    d(2024, 6, 28)
}

pub fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).expect("valid date")
}

/// Construct a UTC `DateTime` from components for readability in tests.
pub fn dt(y: i32, m: u32, day: u32, hh: u32, mm: u32, ss: u32) -> DateTime<Utc> {
    d(y, m, day)
        .and_hms_opt(hh, mm, ss)
        .expect("valid time")
        .and_utc()
}

pub fn rows(points: &[(NaiveDate, f64)]) -> Vec<RawObservation> {
    points
        .iter()
        .map(|&(date, v)| RawObservation::new(date, v))
        .collect()
}

/// An accessor answering `points`.
pub fn ok_accessor(name: &str, points: &[(NaiveDate, f64)]) -> Accessor {
    let rows = rows(points);
    Accessor::new(name, move || async move { Ok(rows) })
}

/// An accessor failing with a connector error carrying `msg`.
pub fn err_accessor(name: &str, msg: &str) -> Accessor {
    Accessor::failing(name, MacroError::connector(name, msg))
}

/// An accessor that never resolves.
pub fn hanging_accessor(name: &str) -> Accessor {
    Accessor::new(name, || std::future::pending())
}

pub fn opts() -> FallbackOptions {
    FallbackOptions {
        timeout: Duration::from_millis(100),
        ..FallbackOptions::default()
    }
}

/// The fixture mock under a custom name, ending on [`as_of`].
pub fn mock(name: &'static str) -> Arc<dyn SeriesProvider> {
    Arc::new(MockProvider::named(name).with_as_of(as_of()))
}

pub fn series(points: &[(NaiveDate, Option<f64>)]) -> TransformSeries {
    let (dates, values) = points.iter().copied().unzip();
    TransformSeries::new(dates, values)
}

pub fn history(transforms: Vec<(&str, SeriesTransforms)>) -> HistoryState {
    HistoryState {
        meta: HistoryMeta {
            generated_at: dt(2024, 6, 28, 21, 0, 0),
            rolling_windows: BTreeMap::new(),
            roc_windows: vec![5, 20],
        },
        series: BTreeMap::new(),
        transforms: transforms
            .into_iter()
            .map(|(k, t)| (k.to_string(), t))
            .collect(),
        cross_asset: BTreeMap::new(),
    }
}

/// Transforms whose only populated output is the long-window z-score.
pub fn zscores(points: &[(NaiveDate, Option<f64>)]) -> SeriesTransforms {
    SeriesTransforms {
        zscore_3y: series(points),
        ..SeriesTransforms::default()
    }
}

pub fn ok_env(series_id: &str, value: f64) -> IngestionEnvelope {
    IngestionEnvelope::success(
        value,
        IngestionStatus::Ok,
        "fred_http",
        dt(2024, 6, 28, 21, 0, 0),
        EnvelopeMeta::identifying(series_id, Some("fred_http".to_string())),
    )
}

pub fn failed_env(series_id: &str) -> IngestionEnvelope {
    IngestionEnvelope::failed(
        format!("{series_id} fetch failed: boom"),
        dt(2024, 6, 28, 21, 0, 0),
        EnvelopeMeta::identifying(series_id, Some("fred_http".to_string())),
    )
}
