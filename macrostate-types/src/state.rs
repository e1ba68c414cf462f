//! Cycle-level state trees: the raw snapshot state and the history state.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::envelope::{IngestionEnvelope, IngestionStatus};
use crate::observation::Series;

/// Cycle metadata shared by both state trees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawStateMeta {
    /// When the cycle completed.
    pub generated_at: DateTime<Utc>,
}

/// Envelopes of one ingestion cycle, grouped `category → key → envelope`.
///
/// Serialized with `meta` alongside the categories at the top level, so a
/// category must not be named `meta`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawState {
    /// Cycle metadata.
    pub meta: RawStateMeta,
    /// Envelopes by category then key.
    #[serde(flatten)]
    pub categories: BTreeMap<String, BTreeMap<String, IngestionEnvelope>>,
}

impl RawState {
    /// An empty state stamped at `generated_at`.
    #[must_use]
    pub const fn new(generated_at: DateTime<Utc>) -> Self {
        Self {
            meta: RawStateMeta { generated_at },
            categories: BTreeMap::new(),
        }
    }

    /// Insert an envelope under `category`/`key`, replacing any previous one.
    pub fn insert(
        &mut self,
        category: impl Into<String>,
        key: impl Into<String>,
        envelope: IngestionEnvelope,
    ) {
        self.categories
            .entry(category.into())
            .or_default()
            .insert(key.into(), envelope);
    }

    /// Look up one envelope.
    #[must_use]
    pub fn envelope(&self, category: &str, key: &str) -> Option<&IngestionEnvelope> {
        self.categories.get(category)?.get(key)
    }

    /// All envelopes of one category.
    #[must_use]
    pub fn category(&self, category: &str) -> Option<&BTreeMap<String, IngestionEnvelope>> {
        self.categories.get(category)
    }
}

/// A date-aligned output series; `values[i]` belongs to `dates[i]`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TransformSeries {
    /// Dates of the underlying observations.
    pub dates: Vec<NaiveDate>,
    /// Statistic per date, absent where it could not be computed.
    pub values: Vec<Option<f64>>,
}

impl TransformSeries {
    /// Pair dates with values. Extra entries on either side are discarded.
    #[must_use]
    pub fn new(mut dates: Vec<NaiveDate>, mut values: Vec<Option<f64>>) -> Self {
        let n = dates.len().min(values.len());
        dates.truncate(n);
        values.truncate(n);
        Self { dates, values }
    }

    /// Number of aligned points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// True when there are no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

/// Rolling statistics for one series.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SeriesTransforms {
    /// Rolling mean over the short window.
    pub mean_1y: TransformSeries,
    /// Rolling sample std over the short window.
    pub std_1y: TransformSeries,
    /// Rolling mean over the long window.
    pub mean_3y: TransformSeries,
    /// Rolling sample std over the long window.
    pub std_3y: TransformSeries,
    /// Long-window z-score.
    pub zscore_3y: TransformSeries,
    /// Value relative to the long-window mean, `value / mean - 1`.
    pub pct_of_avg_3y: TransformSeries,
    /// Short rate of change in percent.
    pub roc_5d_pct: TransformSeries,
    /// Long rate of change in percent.
    pub roc_20d_pct: TransformSeries,
    /// Annualized realized volatility in percent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub realized_vol_20d_pct: Option<TransformSeries>,
    /// Long-window z-score of realized volatility.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub realized_vol_20d_zscore_3y: Option<TransformSeries>,
}

/// Joint statistics for a pair of series over their common dates.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CrossAssetTransforms {
    /// `z_b − z_a`.
    pub z_spread: TransformSeries,
    /// `z_b / z_a`, absent when `z_a` is zero.
    pub z_ratio: TransformSeries,
    /// Rolling Pearson correlation over the short correlation window.
    pub corr_60d: TransformSeries,
    /// Rolling Pearson correlation over the long correlation window.
    pub corr_120d: TransformSeries,
}

/// A persisted history series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesEntry {
    /// Provider-specific identifier.
    pub series_id: String,
    /// Provider that supplied the data.
    pub source: Option<String>,
    /// Fetch status.
    pub status: IngestionStatus,
    /// Observation dates.
    pub dates: Vec<NaiveDate>,
    /// Observation values.
    pub values: Vec<f64>,
}

impl From<&Series> for SeriesEntry {
    fn from(s: &Series) -> Self {
        let (dates, values) = s.observations().iter().map(|o| (o.date, o.value)).unzip();
        Self {
            series_id: s.series_id().to_string(),
            source: s.source().map(str::to_string),
            status: s.status(),
            dates,
            values,
        }
    }
}

/// History-state metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryMeta {
    /// When the history state was built.
    pub generated_at: DateTime<Utc>,
    /// Rolling windows by label (`"1y"`, `"3y"`).
    pub rolling_windows: BTreeMap<String, usize>,
    /// Rate-of-change lags.
    pub roc_windows: Vec<usize>,
}

/// Historical series plus their rolling transforms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryState {
    /// Metadata.
    pub meta: HistoryMeta,
    /// Raw history by series key.
    pub series: BTreeMap<String, SeriesEntry>,
    /// Rolling statistics by series key.
    pub transforms: BTreeMap<String, SeriesTransforms>,
    /// Pairwise statistics keyed `"<b>_<a>"`.
    #[serde(default)]
    pub cross_asset: BTreeMap<String, CrossAssetTransforms>,
}
