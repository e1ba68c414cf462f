//! Observation and series records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::envelope::IngestionStatus;

/// A raw value as delivered by an upstream provider, before sanitization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    /// A numeric payload (may still be NaN or infinite).
    Number(f64),
    /// A textual payload such as `"4.33"`, `""` or the FRED missing marker `"."`.
    Text(String),
    /// No value at all.
    Missing,
}

impl From<f64> for RawValue {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<Option<f64>> for RawValue {
    fn from(v: Option<f64>) -> Self {
        v.map_or(Self::Missing, Self::Number)
    }
}

impl From<&str> for RawValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

/// One row from a provider, dated but not yet validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawObservation {
    /// Observation date.
    pub date: NaiveDate,
    /// Unvalidated payload.
    pub value: RawValue,
}

impl RawObservation {
    /// Construct a raw row from anything convertible into a [`RawValue`].
    pub fn new(date: NaiveDate, value: impl Into<RawValue>) -> Self {
        Self {
            date,
            value: value.into(),
        }
    }
}

/// A dated finite value.
///
/// Values coming from providers pass through the sanitizer before they become
/// observations; code that builds observations by hand is expected to supply
/// finite values, and the anchor selector drops any that are not.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Observation date.
    pub date: NaiveDate,
    /// Observed value.
    pub value: f64,
}

impl Observation {
    /// Construct an observation without validation.
    #[must_use]
    pub const fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }

    /// Construct an observation only if `value` is finite.
    #[must_use]
    pub fn checked(date: NaiveDate, value: f64) -> Option<Self> {
        value.is_finite().then_some(Self { date, value })
    }
}

/// Broad family of a series; drives which derived metrics apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum SeriesKind {
    /// Level series such as CPI or payrolls.
    #[default]
    Macro,
    /// Yields and policy rates; changes are also reported in basis points.
    Rate,
    /// Implied volatility indices such as VIX and MOVE.
    VolatilityIndex,
    /// Exchange rates and the dollar index.
    Fx,
}

impl SeriesKind {
    /// Whether realized volatility transforms are computed for this kind.
    #[must_use]
    pub const fn has_realized_vol(self) -> bool {
        matches!(self, Self::Fx | Self::VolatilityIndex)
    }

    /// Whether changes are also expressed in basis points.
    #[must_use]
    pub const fn reports_bp(self) -> bool {
        matches!(self, Self::Rate)
    }
}

/// What to ask a provider for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesRequest {
    /// Provider-specific series identifier (e.g. `DGS10`, `^VIX`).
    pub series_id: String,
    /// Inclusive start of the requested window.
    pub start: Option<NaiveDate>,
    /// Inclusive end of the requested window.
    pub end: Option<NaiveDate>,
}

impl SeriesRequest {
    /// Request the full available history of `series_id`.
    pub fn new(series_id: impl Into<String>) -> Self {
        Self {
            series_id: series_id.into(),
            start: None,
            end: None,
        }
    }

    /// Restrict the request to observations on or after `start`.
    #[must_use]
    pub const fn start(mut self, start: NaiveDate) -> Self {
        self.start = Some(start);
        self
    }

    /// Restrict the request to observations on or before `end`.
    #[must_use]
    pub const fn end(mut self, end: NaiveDate) -> Self {
        self.end = Some(end);
        self
    }
}

/// A named, date-ordered, immutable sequence of observations with provenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    name: String,
    series_id: String,
    source: Option<String>,
    status: IngestionStatus,
    observations: Vec<Observation>,
}

impl Series {
    /// Build a series, dropping non-finite values and stably sorting by date.
    pub fn new(
        name: impl Into<String>,
        series_id: impl Into<String>,
        source: Option<String>,
        status: IngestionStatus,
        mut observations: Vec<Observation>,
    ) -> Self {
        observations.retain(|o| o.value.is_finite());
        observations.sort_by_key(|o| o.date);
        Self {
            name: name.into(),
            series_id: series_id.into(),
            source,
            status,
            observations,
        }
    }

    /// A series whose fetch failed: no source, no observations.
    pub fn failed(name: impl Into<String>, series_id: impl Into<String>) -> Self {
        Self::new(name, series_id, None, IngestionStatus::Failed, Vec::new())
    }

    /// Logical name of the series (e.g. `vix`).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Provider-specific identifier.
    #[must_use]
    pub fn series_id(&self) -> &str {
        &self.series_id
    }

    /// Provider that supplied the data, if any.
    #[must_use]
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Fetch status of this series.
    #[must_use]
    pub const fn status(&self) -> IngestionStatus {
        self.status
    }

    /// Observations in ascending date order.
    #[must_use]
    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// Latest observation, if any.
    #[must_use]
    pub fn last(&self) -> Option<&Observation> {
        self.observations.last()
    }

    /// Number of observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// True when the series holds no observations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}
