//! Deterministic providers for tests and offline examples.
//!
//! [`MockProvider`] serves synthetic fixture series; [`DynamicMockProvider`]
//! answers whatever a test scripts through its controller.

use async_trait::async_trait;
use chrono::{Months, NaiveDate, Utc};
use macrostate_core::{
    MacroError, Observation, RawObservation, SeriesKind, SeriesProvider, SeriesRequest,
};

mod dynamic;
mod fixtures;

pub use dynamic::{DynamicMockController, DynamicMockProvider, MockBehavior};

/// Years of synthetic history served when a request has no start date.
const DEFAULT_HISTORY_YEARS: u32 = 6;

/// Mock provider for CI-safe examples. Serves deterministic synthetic series
/// for a fixed set of well-known identifiers (`DGS10`, `UNRATE`, `^VIX`, ...).
///
/// Special identifiers:
/// - `FAIL`: fails with a connector error.
/// - `TIMEOUT`: sleeps briefly before answering, so short provider timeouts trip.
/// - `EMPTY`: answers with no rows.
/// - `GARBAGE`: answers with malformed rows only.
pub struct MockProvider {
    name: &'static str,
    as_of: Option<NaiveDate>,
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockProvider {
    /// A mock registered as `macrostate-mock`, ending its series today.
    #[must_use]
    pub const fn new() -> Self {
        Self::named("macrostate-mock")
    }

    /// A mock under a custom name, so two mocks can act as primary and secondary.
    #[must_use]
    pub const fn named(name: &'static str) -> Self {
        Self { name, as_of: None }
    }

    /// Pin the last date of every generated series.
    #[must_use]
    pub const fn with_as_of(mut self, as_of: NaiveDate) -> Self {
        self.as_of = Some(as_of);
        self
    }

    /// Series kind of a fixture identifier, if the mock knows it.
    #[must_use]
    pub fn kind_of(series_id: &str) -> Option<SeriesKind> {
        fixtures::series::by_series_id(series_id).map(|p| p.kind)
    }

    fn forced(&self, series_id: &str) -> Option<Result<Vec<RawObservation>, MacroError>> {
        match series_id {
            "FAIL" => Some(Err(MacroError::connector(
                self.name,
                format!("forced failure: {series_id}"),
            ))),
            "EMPTY" => Some(Ok(Vec::new())),
            "GARBAGE" => {
                let d = self.end_date();
                Some(Ok(vec![
                    RawObservation::new(d, "."),
                    RawObservation::new(d, f64::NAN),
                    RawObservation::new(d, "n/a"),
                ]))
            }
            _ => None,
        }
    }

    fn end_date(&self) -> NaiveDate {
        self.as_of.unwrap_or_else(|| Utc::now().date_naive())
    }
}

#[async_trait]
impl SeriesProvider for MockProvider {
    fn name(&self) -> &'static str {
        self.name
    }

    fn vendor(&self) -> &'static str {
        "Mock"
    }

    async fn observations(&self, req: &SeriesRequest) -> Result<Vec<RawObservation>, MacroError> {
        let id = req.series_id.as_str();
        if id == "TIMEOUT" {
            // Keep short to avoid slowing tests excessively.
            tokio::time::sleep(std::time::Duration::from_millis(200)).await;
        }
        if let Some(forced) = self.forced(id) {
            return forced;
        }
        let profile = fixtures::series::by_series_id(id)
            .ok_or_else(|| MacroError::not_found(format!("series {id}")))?;

        let as_of = self.end_date();
        let end = req.end.map_or(as_of, |e| e.min(as_of));
        let start = req.start.unwrap_or_else(|| {
            as_of
                .checked_sub_months(Months::new(12 * DEFAULT_HISTORY_YEARS))
                .unwrap_or(NaiveDate::MIN)
        });
        Ok(fixtures::series::generate(profile, start, end)
            .into_iter()
            .map(|Observation { date, value }| RawObservation::new(date, value))
            .collect())
    }
}
