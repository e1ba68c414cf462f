//! Macrostate ingests macroeconomic and market series across providers and
//! turns them into calendar snapshots, rolling regimes and data-quality verdicts.
//!
//! Overview
//! - Routes each series to a primary provider and, on failure, to an optional
//!   secondary (`SeriesSpec`), producing a uniform ingestion envelope.
//! - Resolves current / last week / last month / last 6 months / start of year
//!   anchors and derives percent and basis-point changes.
//! - Builds a history state with rolling mean, std, z-score, rate of change and
//!   realized volatility, plus joint statistics for one pair of series.
//! - Downstream blocks classify volatility regimes and report system health.
//!
//! Key behaviors and trade-offs
//! - Failures never escape ingestion: a series that fails on every provider is a
//!   `FAILED` envelope whose `error` names both providers.
//! - Each provider attempt is bounded by `provider_timeout`; there are no
//!   retries beyond primary → secondary.
//! - Series are fetched concurrently; the chain of a single series is sequential.
//!
//! Examples
//! ```rust,ignore
//! use std::sync::Arc;
//! use macrostate::{Macrostate, SeriesKind, SeriesSpec};
//!
//! let fred = Arc::new(macrostate_fred::FredConnector::from_env()?);
//! let mock = Arc::new(macrostate_mock::MockProvider::new());
//!
//! let ms = Macrostate::builder()
//!     .with_provider(fred.clone())
//!     .with_provider(mock.clone())
//!     .mark_secondary_as_fallback(true)
//!     .build()?;
//!
//! let specs = [
//!     SeriesSpec::new("duration", "us_10y", "DGS10", fred.key())
//!         .kind(SeriesKind::Rate)
//!         .secondary(mock.key()),
//!     SeriesSpec::new("volatility", "vix", "VIXCLS", fred.key())
//!         .kind(SeriesKind::VolatilityIndex)
//!         .secondary_as(mock.key(), "^VIX"),
//! ];
//! let raw = ms.ingest_all(&specs).await;
//! let block = macrostate::analytics::volatility_block(&raw);
//! ```
//!
//! See `macrostate/examples/` for a runnable end-to-end demonstration.
#![warn(missing_docs)]

pub(crate) mod core;
/// Downstream analytic blocks.
pub mod analytics;
/// Provider fallback chain and ingestion envelopes.
pub mod fallback;
mod router;

pub use crate::core::{Macrostate, MacrostateBuilder, Route, SeriesSpec};
pub use fallback::{
    Accessor, ChainOutcome, FallbackOptions, ProviderAttempt, SeriesFetch, fetch_with_fallback,
    ingest_envelope,
};

// Re-export core types for convenience
pub use macrostate_core::{
    AnchorConfig, DataQuality, HistoryState, IngestConfig, IngestionEnvelope, IngestionStatus,
    JointRegime, MacroError, MacrostateConfig, Observation, ProviderKey, RawObservation, RawState,
    RegimeConfig, RegimeLabel, Series, SeriesKind, SeriesProvider, SeriesRequest,
    TransformConfig, to_json_pretty, write_json,
};
