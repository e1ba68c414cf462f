//! The ingestion envelope: the uniform per-series result of one fetch cycle.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::quality::DataQuality;

/// Outcome of fetching one series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum IngestionStatus {
    /// A provider answered with usable data.
    Ok,
    /// The secondary provider answered and the chain reports it explicitly.
    Fallback,
    /// No provider produced usable data.
    Failed,
}

impl IngestionStatus {
    /// Wire label (`"OK"`, `"FALLBACK"`, `"FAILED"`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Fallback => "FALLBACK",
            Self::Failed => "FAILED",
        }
    }

    /// True for `Ok` and `Fallback`.
    #[must_use]
    pub const fn is_success(self) -> bool {
        !matches!(self, Self::Failed)
    }
}

impl std::fmt::Display for IngestionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Changes derived from the resolved anchors. Absent when the prior is missing
/// or the denominator is zero.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DerivedChanges {
    /// Percent change versus the latest observation at least one day earlier.
    #[serde(rename = "1d_change_pct")]
    pub change_1d_pct: Option<f64>,
    /// Percent change versus the latest observation at least five days earlier.
    #[serde(rename = "5d_change_pct")]
    pub change_5d_pct: Option<f64>,
    /// Percent change versus the `last_week` anchor.
    #[serde(rename = "5d_roc")]
    pub change_1w_pct: Option<f64>,
    /// Absolute change versus the `last_month` anchor.
    #[serde(rename = "1m_change")]
    pub change_1m: Option<f64>,
    /// Percent change versus the `last_month` anchor.
    #[serde(rename = "1m_change_pct")]
    pub change_1m_pct: Option<f64>,
    /// Percent change versus the `last_6m` anchor.
    #[serde(rename = "6m_change_pct")]
    pub change_6m_pct: Option<f64>,
    /// Percent change versus the `start_of_year` anchor.
    #[serde(rename = "ytd_change_pct")]
    pub change_ytd_pct: Option<f64>,
    /// Basis-point change versus `last_week` (rate series only).
    #[serde(rename = "1w_change_bp")]
    pub change_1w_bp: Option<f64>,
    /// Basis-point change versus `last_month` (rate series only).
    #[serde(rename = "1m_change_bp")]
    pub change_1m_bp: Option<f64>,
    /// Basis-point change versus `start_of_year` (rate series only).
    #[serde(rename = "ytd_change_bp")]
    pub change_ytd_bp: Option<f64>,
}

/// Resolved anchors, derived changes and the per-series quality verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotMeta {
    /// Latest value.
    pub current: f64,
    /// Date of the latest value.
    pub as_of_current: NaiveDate,
    /// Value roughly one week back (high-frequency series only).
    pub last_week: Option<f64>,
    /// Date of `last_week`.
    pub as_of_last_week: Option<NaiveDate>,
    /// Value roughly one month back.
    pub last_month: Option<f64>,
    /// Date of `last_month`.
    pub as_of_last_month: Option<NaiveDate>,
    /// Value roughly six months back.
    pub last_6m: Option<f64>,
    /// Date of `last_6m`.
    pub as_of_last_6m: Option<NaiveDate>,
    /// Value at the start of the year.
    pub start_of_year: Option<f64>,
    /// Date of `start_of_year`.
    pub as_of_start_of_year: Option<NaiveDate>,
    /// Whether the series was sampled densely enough for a `last_week` anchor.
    pub high_frequency: bool,
    /// Derived deltas.
    #[serde(flatten)]
    pub changes: DerivedChanges,
    /// Completeness of the required anchors.
    pub data_quality: DataQuality,
}

/// Envelope `meta` object.
///
/// On failure only the identifying fields are populated.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EnvelopeMeta {
    /// Provider-specific series identifier.
    pub series_id: String,
    /// Provider that answered (or was attempted first on failure), when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    /// Snapshot details, present only on success.
    #[serde(flatten)]
    pub snapshot: Option<SnapshotMeta>,
}

impl EnvelopeMeta {
    /// Identifying-only meta for a series.
    pub fn identifying(series_id: impl Into<String>, provider: Option<String>) -> Self {
        Self {
            series_id: series_id.into(),
            provider,
            snapshot: None,
        }
    }
}

/// Uniform result of ingesting one series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestionEnvelope {
    value: Option<f64>,
    status: IngestionStatus,
    source: Option<String>,
    fetched_at: DateTime<Utc>,
    error: Option<String>,
    meta: EnvelopeMeta,
}

impl IngestionEnvelope {
    /// A successful envelope. A `Failed` status is coerced to `Ok`; a
    /// non-finite value is stored as absent.
    pub fn success(
        value: f64,
        status: IngestionStatus,
        source: impl Into<String>,
        fetched_at: DateTime<Utc>,
        meta: EnvelopeMeta,
    ) -> Self {
        let status = if status.is_success() {
            status
        } else {
            IngestionStatus::Ok
        };
        Self {
            value: value.is_finite().then_some(value),
            status,
            source: Some(source.into()),
            fetched_at,
            error: None,
            meta,
        }
    }

    /// A failed envelope: no value, no source.
    pub fn failed(error: impl Into<String>, fetched_at: DateTime<Utc>, meta: EnvelopeMeta) -> Self {
        Self {
            value: None,
            status: IngestionStatus::Failed,
            source: None,
            fetched_at,
            error: Some(error.into()),
            meta,
        }
    }

    /// Latest value, absent on failure.
    #[must_use]
    pub const fn value(&self) -> Option<f64> {
        self.value
    }

    /// Ingestion status.
    #[must_use]
    pub const fn status(&self) -> IngestionStatus {
        self.status
    }

    /// Provider that answered.
    #[must_use]
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// When the fetch completed.
    #[must_use]
    pub const fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }

    /// Error message, present only on failure.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Envelope meta.
    #[must_use]
    pub const fn meta(&self) -> &EnvelopeMeta {
        &self.meta
    }

    /// Snapshot meta, present only on success.
    #[must_use]
    pub const fn snapshot(&self) -> Option<&SnapshotMeta> {
        self.meta.snapshot.as_ref()
    }
}
