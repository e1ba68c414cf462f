//! Configuration types shared across the engine and the orchestrator.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::MacroError;

/// Calendar-anchor resolution settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnchorConfig {
    /// Positions before the last observation used for `last_week`.
    pub last_week_offset: usize,
    /// Median spacing (days) at or below which a series counts as high-frequency.
    pub high_frequency_max_spacing_days: f64,
    /// Lookback for `last_month`, in days.
    pub last_month_days: i64,
    /// Accepted distance from the `last_month` anchor, in days.
    pub last_month_tolerance_days: i64,
    /// Lookback for `last_6m`, in days.
    pub last_6m_days: i64,
    /// Accepted distance from the `last_6m` anchor, in days.
    pub last_6m_tolerance_days: i64,
}

impl Default for AnchorConfig {
    fn default() -> Self {
        Self {
            last_week_offset: 5,
            high_frequency_max_spacing_days: 7.0,
            last_month_days: 30,
            last_month_tolerance_days: 45,
            last_6m_days: 183,
            last_6m_tolerance_days: 75,
        }
    }
}

impl AnchorConfig {
    /// Validate lookbacks and tolerances.
    ///
    /// # Errors
    /// Returns `InvalidConfig` when a lookback is not positive, a tolerance is
    /// negative, `last_week_offset` is outside `1..=31`, or the spacing cutoff
    /// is not a positive finite number.
    pub fn validate(&self) -> Result<(), MacroError> {
        if !(1..=31).contains(&self.last_week_offset) {
            return Err(MacroError::InvalidConfig(format!(
                "last_week_offset must be within 1..=31, got {}",
                self.last_week_offset
            )));
        }
        if self.last_month_days <= 0 || self.last_6m_days <= 0 {
            return Err(MacroError::InvalidConfig(
                "anchor lookbacks must be positive".into(),
            ));
        }
        if self.last_month_tolerance_days < 0 || self.last_6m_tolerance_days < 0 {
            return Err(MacroError::InvalidConfig(
                "anchor tolerances must be non-negative".into(),
            ));
        }
        if !(self.high_frequency_max_spacing_days.is_finite()
            && self.high_frequency_max_spacing_days > 0.0)
        {
            return Err(MacroError::InvalidConfig(
                "high_frequency_max_spacing_days must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// Rolling-window settings for the transform engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformConfig {
    /// Short rolling window (`1y`), in periods.
    pub short_window: usize,
    /// Long rolling window (`3y`), in periods.
    pub long_window: usize,
    /// Short rate-of-change lag.
    pub roc_short: usize,
    /// Long rate-of-change lag.
    pub roc_long: usize,
    /// Window of the realized-volatility standard deviation.
    pub realized_vol_window: usize,
    /// Periods per year used to annualize realized volatility.
    pub annualization_periods: u32,
    /// Short rolling-correlation window.
    pub corr_short: usize,
    /// Long rolling-correlation window.
    pub corr_long: usize,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            short_window: 252,
            long_window: 756,
            roc_short: 5,
            roc_long: 20,
            realized_vol_window: 20,
            annualization_periods: 252,
            corr_short: 60,
            corr_long: 120,
        }
    }
}

impl TransformConfig {
    /// Validate window sizes.
    ///
    /// # Errors
    /// Returns `InvalidConfig` when a std/correlation window is below 2 or a
    /// lag/period count is zero.
    pub fn validate(&self) -> Result<(), MacroError> {
        let windows = [
            ("short_window", self.short_window),
            ("long_window", self.long_window),
            ("realized_vol_window", self.realized_vol_window),
            ("corr_short", self.corr_short),
            ("corr_long", self.corr_long),
        ];
        if let Some((name, _)) = windows.iter().find(|(_, w)| *w < 2) {
            return Err(MacroError::InvalidConfig(format!("{name} must be at least 2")));
        }
        if self.roc_short == 0 || self.roc_long == 0 || self.annualization_periods == 0 {
            return Err(MacroError::InvalidConfig(
                "roc lags and annualization_periods must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// Regime thresholds and boundary tolerance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegimeConfig {
    /// Ascending band edges: Calm | Normal | Elevated | Stress.
    pub thresholds: [f64; 3],
    /// Half-width of the TRANSITION band around each threshold.
    pub tolerance: f64,
    /// Asset names used in `<asset>-led stress`, first and second input.
    pub asset_names: (String, String),
}

impl Default for RegimeConfig {
    fn default() -> Self {
        Self {
            thresholds: [-0.5, 0.5, 1.5],
            tolerance: 0.1,
            asset_names: ("Equity".to_string(), "Rates".to_string()),
        }
    }
}

impl RegimeConfig {
    /// Validate threshold ordering and tolerance.
    ///
    /// # Errors
    /// Returns `InvalidConfig` unless thresholds are finite and strictly
    /// ascending and the tolerance is finite and non-negative.
    pub fn validate(&self) -> Result<(), MacroError> {
        if self.thresholds.iter().any(|t| !t.is_finite()) {
            return Err(MacroError::InvalidConfig(
                "regime thresholds must be finite".into(),
            ));
        }
        if self.thresholds.windows(2).any(|w| w[0] >= w[1]) {
            return Err(MacroError::InvalidConfig(
                "regime thresholds must be strictly ascending".into(),
            ));
        }
        if !(self.tolerance.is_finite() && self.tolerance >= 0.0) {
            return Err(MacroError::InvalidConfig(
                "regime tolerance must be non-negative".into(),
            ));
        }
        Ok(())
    }
}

/// Provider-chain and history-fetch settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Upper bound on a single provider attempt.
    pub provider_timeout: Duration,
    /// Report `FALLBACK` instead of `OK` when the secondary answered.
    pub mark_secondary_as_fallback: bool,
    /// Years of history fetched for the transform engine.
    pub history_years: u32,
    /// Extra days requested before the earliest anchor.
    pub anchor_padding_days: i64,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            provider_timeout: Duration::from_secs(10),
            mark_secondary_as_fallback: false,
            history_years: 5,
            anchor_padding_days: 10,
        }
    }
}

impl IngestConfig {
    /// Validate timeouts and windows.
    ///
    /// # Errors
    /// Returns `InvalidConfig` for a zero timeout, zero history years or
    /// negative padding.
    pub fn validate(&self) -> Result<(), MacroError> {
        if self.provider_timeout.is_zero() {
            return Err(MacroError::InvalidConfig(
                "provider_timeout must be non-zero".into(),
            ));
        }
        if self.history_years == 0 {
            return Err(MacroError::InvalidConfig(
                "history_years must be positive".into(),
            ));
        }
        if self.anchor_padding_days < 0 {
            return Err(MacroError::InvalidConfig(
                "anchor_padding_days must be non-negative".into(),
            ));
        }
        Ok(())
    }
}

/// Global configuration for the `Macrostate` orchestrator.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MacrostateConfig {
    /// Anchor resolution.
    pub anchors: AnchorConfig,
    /// Rolling transforms.
    pub transforms: TransformConfig,
    /// Regime classification.
    pub regime: RegimeConfig,
    /// Provider chain and history fetch.
    pub ingest: IngestConfig,
}

impl MacrostateConfig {
    /// Validate every section.
    ///
    /// # Errors
    /// Returns the first section's `InvalidConfig` error.
    pub fn validate(&self) -> Result<(), MacroError> {
        self.anchors.validate()?;
        self.transforms.validate()?;
        self.regime.validate()?;
        self.ingest.validate()
    }

    /// Parse a JSON document; missing sections and fields take their defaults.
    ///
    /// # Errors
    /// Returns `Serialization` for malformed JSON and `InvalidConfig` when the
    /// parsed config fails validation.
    pub fn from_json_str(s: &str) -> Result<Self, MacroError> {
        let cfg: Self =
            serde_json::from_str(s).map_err(|e| MacroError::Serialization(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }
}
