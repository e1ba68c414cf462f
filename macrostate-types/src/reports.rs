//! Report blocks produced by the downstream analytics.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::envelope::IngestionStatus;
use crate::quality::{BlockHealth, DataQuality};
use crate::regime::{BoundaryDetail, JointRegime, RegimeLabel};

/// A value per volatility index.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct VixMove<T> {
    /// Equity volatility (VIX).
    pub vix: T,
    /// Rates volatility (MOVE).
    #[serde(rename = "move")]
    pub move_index: T,
}

/// A value per asset side of the volatility regime.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EquityRates<T> {
    /// Equity side.
    pub equity: T,
    /// Rates side.
    pub rates: T,
}

/// Joint equity/rates volatility regime from long-window z-scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolatilityRegimeReport {
    /// Equity regime.
    pub equity: RegimeLabel,
    /// Rates regime.
    pub rates: RegimeLabel,
    /// Joint label.
    pub joint: JointRegime,
    /// Input labels.
    pub inputs_used: Vec<String>,
    /// Window label of the z-scores.
    pub window_used: String,
    /// When the report was computed.
    pub computed_at: DateTime<Utc>,
    /// True when either side sat on a threshold.
    pub boundary_case: bool,
    /// Boundary details per side; only boundary sides are serialized.
    pub boundary_detail: EquityRatesBoundary,
    /// Per-input quality: OK when the z-score exists, FAILED otherwise.
    pub data_quality: EquityRates<DataQuality>,
    /// Latest z-scores.
    pub zscore_3y: VixMove<Option<f64>>,
    /// Dates of the latest z-scores.
    pub as_of: VixMove<Option<NaiveDate>>,
}

/// Boundary details of the volatility regime.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EquityRatesBoundary {
    /// Equity boundary detail.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equity: Option<BoundaryDetail>,
    /// Rates boundary detail.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rates: Option<BoundaryDetail>,
}

/// Dates of the latest FX realized-vol inputs.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FxAsOf {
    /// Date of the latest realized vol.
    pub vol: Option<NaiveDate>,
    /// Date of the latest realized-vol z-score.
    pub zscore: Option<NaiveDate>,
}

/// Realized-vol diagnostics for one FX pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FxVolEntry {
    /// Display label, e.g. `EURUSD`.
    pub pair: String,
    /// Latest annualized realized vol in percent.
    pub realized_vol_20d_pct: Option<f64>,
    /// Latest realized-vol z-score.
    pub zscore_3y: Option<f64>,
    /// Regime of the z-score.
    pub regime: RegimeLabel,
    /// Both inputs → OK, one → PARTIAL, none → FAILED.
    pub data_quality: DataQuality,
    /// True when the z-score sat on a threshold.
    pub boundary_case: bool,
    /// Boundary detail when `boundary_case`.
    pub boundary_detail: Option<BoundaryDetail>,
    /// Dates of the inputs.
    pub as_of: FxAsOf,
}

/// Realized-vol diagnostics across FX pairs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FxVolatilityReport {
    /// Volatility flavour, always `realized_20d`.
    pub vol_type: String,
    /// Window label of the z-scores.
    pub window_used: String,
    /// When the report was computed.
    pub computed_at: DateTime<Utc>,
    /// Input labels.
    pub inputs_used: Vec<String>,
    /// Rollup of per-entry quality.
    pub data_quality: DataQuality,
    /// One entry per requested pair, in request order.
    pub entries: Vec<FxVolEntry>,
    /// True when any entry sat on a threshold.
    pub boundary_case: bool,
}

/// Implied-volatility levels and momentum from the raw state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolatilityBlockReport {
    /// Current VIX.
    pub vix: Option<f64>,
    /// Current MOVE.
    #[serde(rename = "move")]
    pub move_index: Option<f64>,
    /// VIX change versus last week, percent.
    pub vix_5d_roc: Option<f64>,
    /// MOVE change versus last week, percent.
    pub move_5d_roc: Option<f64>,
    /// Qualitative read of where stress originates.
    pub stress_origin_read: String,
    /// Envelope status per index, absent when the series was not ingested.
    pub data_quality: VixMove<Option<IngestionStatus>>,
}

/// Freshness and completeness of a raw state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemHealthReport {
    /// When the raw state was generated.
    pub generated_at: DateTime<Utc>,
    /// Seconds between generation and the health check.
    pub age_seconds: i64,
    /// Human-readable age (`"1d 2h"`, `"3h 4m"`, `"5m"`, `"9s"`).
    pub age_human: String,
    /// Failed envelopes across all blocks.
    pub failed_series: usize,
    /// Envelopes across all blocks.
    pub total_series: usize,
    /// Health by block label.
    pub blocks: BTreeMap<String, BlockHealth>,
    /// Identifiers of failed series, in block order.
    pub failed_series_list: Vec<String>,
}
