use std::sync::Arc;

use chrono::{Datelike, Days, Months, NaiveDate, Utc};
use macrostate_core::connector::ProviderKey;
use macrostate_core::{
    AnchorConfig, MacroError, MacrostateConfig, RegimeConfig, SeriesKind, SeriesProvider,
    SeriesRequest, TransformConfig, anchor_window_start,
};

use crate::fallback::{Accessor, FallbackOptions};

/// Orchestrator that ingests series across registered providers.
pub struct Macrostate {
    pub(crate) providers: Vec<Arc<dyn SeriesProvider>>,
    pub(crate) cfg: MacrostateConfig,
}

/// Builder for constructing a `Macrostate` orchestrator with custom configuration.
pub struct MacrostateBuilder {
    providers: Vec<Arc<dyn SeriesProvider>>,
    cfg: MacrostateConfig,
}

impl Default for MacrostateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MacrostateBuilder {
    /// Create a new builder with default configuration.
    ///
    /// Starts with no providers; register at least one via [`Self::with_provider`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            providers: vec![],
            cfg: MacrostateConfig::default(),
        }
    }

    /// Register a provider.
    ///
    /// Series specs refer to providers by [`ProviderKey`], so registration
    /// order does not matter. When two providers share a name the first one
    /// registered wins.
    #[must_use]
    pub fn with_provider(mut self, p: Arc<dyn SeriesProvider>) -> Self {
        self.providers.push(p);
        self
    }

    /// Anchor selection rules.
    #[must_use]
    pub const fn anchors(mut self, cfg: AnchorConfig) -> Self {
        self.cfg.anchors = cfg;
        self
    }

    /// Rolling window lengths.
    #[must_use]
    pub const fn transforms(mut self, cfg: TransformConfig) -> Self {
        self.cfg.transforms = cfg;
        self
    }

    /// Regime thresholds, tolerance and joint asset names.
    #[must_use]
    pub fn regime(mut self, cfg: RegimeConfig) -> Self {
        self.cfg.regime = cfg;
        self
    }

    /// Set the per-attempt provider timeout.
    ///
    /// Applies separately to the primary and the secondary, so one series can
    /// take up to twice this long.
    #[must_use]
    pub const fn provider_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.cfg.ingest.provider_timeout = timeout;
        self
    }

    /// Report `FALLBACK` instead of `OK` when the secondary answered.
    #[must_use]
    pub const fn mark_secondary_as_fallback(mut self, yes: bool) -> Self {
        self.cfg.ingest.mark_secondary_as_fallback = yes;
        self
    }

    /// Years of history requested by the history builder.
    #[must_use]
    pub const fn history_years(mut self, years: u32) -> Self {
        self.cfg.ingest.history_years = years;
        self
    }

    /// Replace the whole configuration, e.g. one loaded with
    /// [`MacrostateConfig::from_json_str`].
    #[must_use]
    pub fn config(mut self, cfg: MacrostateConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Build the `Macrostate` orchestrator.
    ///
    /// # Errors
    /// Returns `InvalidArg` if no providers have been registered via
    /// [`Self::with_provider`], and `InvalidConfig` if any section fails validation.
    pub fn build(self) -> Result<Macrostate, MacroError> {
        if self.providers.is_empty() {
            return Err(MacroError::InvalidArg(
                "no providers registered; add at least one via with_provider(...)".to_string(),
            ));
        }
        self.cfg.validate()?;
        Ok(Macrostate {
            providers: self.providers,
            cfg: self.cfg,
        })
    }
}

/// Alternate route for a series: another provider, optionally under a
/// different identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// Provider to ask.
    pub provider: ProviderKey,
    /// Identifier at that provider; defaults to the spec's `series_id`.
    pub series_id: Option<String>,
}

/// Description of one ingested metric.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesSpec {
    /// Key inside its category (e.g. `vix`).
    pub key: String,
    /// Category of the raw-state tree (e.g. `volatility`).
    pub category: String,
    /// Identifier at the primary provider.
    pub series_id: String,
    /// Drives realized-vol and basis-point outputs.
    pub kind: SeriesKind,
    /// Provider tried first.
    pub primary: ProviderKey,
    /// Provider tried after a primary failure.
    pub secondary: Option<Route>,
}

impl SeriesSpec {
    /// A macro-kind spec with no secondary.
    pub fn new(
        category: impl Into<String>,
        key: impl Into<String>,
        series_id: impl Into<String>,
        primary: impl Into<ProviderKey>,
    ) -> Self {
        Self {
            key: key.into(),
            category: category.into(),
            series_id: series_id.into(),
            kind: SeriesKind::Macro,
            primary: primary.into(),
            secondary: None,
        }
    }

    /// Set the series kind.
    #[must_use]
    pub fn kind(mut self, kind: SeriesKind) -> Self {
        self.kind = kind;
        self
    }

    /// Fall back to `provider` under the same identifier.
    #[must_use]
    pub fn secondary(mut self, provider: impl Into<ProviderKey>) -> Self {
        self.secondary = Some(Route {
            provider: provider.into(),
            series_id: None,
        });
        self
    }

    /// Fall back to `provider` under a different identifier.
    #[must_use]
    pub fn secondary_as(mut self, provider: impl Into<ProviderKey>, series_id: impl Into<String>) -> Self {
        self.secondary = Some(Route {
            provider: provider.into(),
            series_id: Some(series_id.into()),
        });
        self
    }
}

impl Macrostate {
    /// Start building a new `Macrostate` instance.
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    /// use macrostate::{Macrostate, SeriesSpec};
    ///
    /// let fred = Arc::new(macrostate_fred::FredConnector::from_env()?);
    /// let ms = Macrostate::builder()
    ///     .with_provider(fred.clone())
    ///     .provider_timeout(std::time::Duration::from_secs(5))
    ///     .build()?;
    /// let env = ms.ingest(&SeriesSpec::new("duration", "us_10y", "DGS10", fred.key())).await;
    /// ```
    #[must_use]
    pub fn builder() -> MacrostateBuilder {
        MacrostateBuilder::new()
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &MacrostateConfig {
        &self.cfg
    }

    /// Registered provider under `key`.
    #[must_use]
    pub fn provider(&self, key: ProviderKey) -> Option<&Arc<dyn SeriesProvider>> {
        self.providers.iter().find(|p| p.key() == key)
    }

    /// Wrap a provider request into an accessor. Unknown keys produce an
    /// accessor that fails with `UnknownProvider`.
    pub(crate) fn accessor(&self, key: ProviderKey, req: SeriesRequest) -> Accessor {
        match self.provider(key) {
            Some(p) => {
                let p = Arc::clone(p);
                Accessor::new(p.name(), move || async move { p.observations(&req).await })
            }
            None => Accessor::failing(
                key.as_str(),
                MacroError::UnknownProvider {
                    key: key.as_str().to_string(),
                },
            ),
        }
    }

    /// Primary and optional secondary accessors for `spec`, each asking for
    /// observations from `start` onward.
    pub(crate) fn route(&self, spec: &SeriesSpec, start: NaiveDate) -> (Accessor, Option<Accessor>) {
        let primary = self.accessor(spec.primary, SeriesRequest::new(&spec.series_id).start(start));
        let secondary = spec.secondary.as_ref().map(|r| {
            let id = r.series_id.as_deref().unwrap_or(&spec.series_id);
            self.accessor(r.provider, SeriesRequest::new(id).start(start))
        });
        (primary, secondary)
    }

    /// Chain options for `kind`. `start_of_year` follows the year of each
    /// series' latest observation.
    pub(crate) fn fallback_options(&self, kind: SeriesKind) -> FallbackOptions {
        FallbackOptions {
            timeout: self.cfg.ingest.provider_timeout,
            mark_secondary_as_fallback: self.cfg.ingest.mark_secondary_as_fallback,
            anchors: self.cfg.anchors.clone(),
            kind,
            current_year: None,
        }
    }

    /// First date requested for snapshot ingestion.
    ///
    /// Reaches back to January 1 of the previous year, so a series whose
    /// latest print is from last year still resolves its `start_of_year`.
    pub(crate) fn snapshot_start(&self, today: NaiveDate) -> NaiveDate {
        let padding = self.cfg.ingest.anchor_padding_days;
        let start = anchor_window_start(today, &self.cfg.anchors, padding);
        NaiveDate::from_ymd_opt(today.year() - 1, 1, 1)
            .and_then(|jan1| jan1.checked_sub_days(Days::new(padding.unsigned_abs())))
            .map_or(start, |prior| start.min(prior))
    }

    /// First date requested for history.
    pub(crate) fn history_start(&self, today: NaiveDate) -> NaiveDate {
        today
            .checked_sub_months(Months::new(self.cfg.ingest.history_years.saturating_mul(12)))
            .unwrap_or(NaiveDate::MIN)
    }

    pub(crate) fn today() -> NaiveDate {
        Utc::now().date_naive()
    }
}
