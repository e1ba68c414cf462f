//! Primary → secondary provider chain and the ingestion envelope contract.
//!
//! Each provider call is wrapped in an [`Accessor`] and evaluated into a
//! tagged [`ProviderAttempt`]; errors never unwind through the chain.

use std::time::Duration;

use chrono::Utc;
use futures::future::BoxFuture;
use macrostate_core::snapshot::select_snapshots_sorted;
use macrostate_core::{
    AnchorConfig, EnvelopeMeta, IngestionEnvelope, IngestionStatus, MacroError, Observation,
    RawObservation, SeriesKind, clean_observations, derive_changes, snapshot_meta,
};

type FetchFuture = BoxFuture<'static, Result<Vec<RawObservation>, MacroError>>;

/// A named, deferred provider call.
pub struct Accessor {
    name: String,
    call: Box<dyn FnOnce() -> FetchFuture + Send>,
}

impl Accessor {
    /// Wrap a provider call. `call` runs at most once, and only when the chain
    /// reaches this accessor.
    pub fn new<F, Fut>(name: impl Into<String>, call: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<Vec<RawObservation>, MacroError>> + Send + 'static,
    {
        Self {
            name: name.into(),
            call: Box::new(move || Box::pin(call())),
        }
    }

    /// An accessor that fails immediately with `error`.
    pub fn failing(name: impl Into<String>, error: MacroError) -> Self {
        Self::new(name, move || async move { Err(error) })
    }

    /// Provider name reported in `source` and error messages.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Debug for Accessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Accessor").field("name", &self.name).finish_non_exhaustive()
    }
}

/// Outcome of one provider attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderAttempt {
    /// The provider answered with at least one usable observation.
    Success {
        /// Provider that answered.
        provider: String,
        /// Cleaned, date-sorted observations.
        observations: Vec<Observation>,
    },
    /// The provider failed, timed out, or had nothing usable.
    Failure {
        /// Provider that failed.
        provider: String,
        /// Tagged failure; its message starts with `"<provider> failed:"`.
        error: MacroError,
    },
}

/// Knobs of one chain evaluation.
#[derive(Debug, Clone)]
pub struct FallbackOptions {
    /// Upper bound on each provider attempt.
    pub timeout: Duration,
    /// Report `FALLBACK` instead of `OK` when the secondary answered.
    pub mark_secondary_as_fallback: bool,
    /// Anchor rules for the snapshot.
    pub anchors: AnchorConfig,
    /// Drives which derived deltas are reported.
    pub kind: SeriesKind,
    /// Year whose January 1 anchors `start_of_year`; defaults to the latest
    /// observation's year.
    pub current_year: Option<i32>,
}

impl Default for FallbackOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            mark_secondary_as_fallback: false,
            anchors: AnchorConfig::default(),
            kind: SeriesKind::default(),
            current_year: None,
        }
    }
}

/// Result of a successful chain evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesFetch {
    /// Latest value.
    pub value: f64,
    /// Identifying fields, resolved anchors, deltas and quality.
    pub meta: EnvelopeMeta,
    /// `OK`, or `FALLBACK` when flagged.
    pub status: IngestionStatus,
    /// Provider that answered.
    pub source: String,
}

/// Cleaned observations and provenance of whichever provider answered.
#[derive(Debug, Clone, PartialEq)]
pub struct ChainOutcome {
    /// Cleaned, date-sorted observations; never empty.
    pub observations: Vec<Observation>,
    /// Provider that answered.
    pub source: String,
    /// `OK`, or `FALLBACK` when flagged.
    pub status: IngestionStatus,
}

/// Wrap a failure so its message names the provider.
pub(crate) fn tag_err(provider: &str, e: MacroError) -> MacroError {
    match e {
        e @ (MacroError::Connector { .. } | MacroError::ProviderTimeout { .. }) => e,
        other => MacroError::Connector {
            connector: provider.to_string(),
            msg: other.to_string(),
        },
    }
}

/// Evaluate one accessor under `timeout`.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        name = "macrostate::fallback::attempt",
        skip(accessor, timeout),
        fields(provider = %accessor.name()),
    )
)]
pub async fn attempt(accessor: Accessor, series_id: &str, timeout: Duration) -> ProviderAttempt {
    let Accessor { name, call } = accessor;
    let result = tokio::time::timeout(timeout, call())
        .await
        .unwrap_or_else(|_| Err(MacroError::provider_timeout(name.clone(), series_id)));
    match result {
        Ok(raw) => {
            let observations = clean_observations(&raw);
            if observations.is_empty() {
                ProviderAttempt::Failure {
                    error: MacroError::connector(name.clone(), "no observations"),
                    provider: name,
                }
            } else {
                ProviderAttempt::Success {
                    provider: name,
                    observations,
                }
            }
        }
        Err(e) => ProviderAttempt::Failure {
            error: tag_err(&name, e),
            provider: name,
        },
    }
}

/// Try `primary`, then `secondary` once the primary failure is observed.
///
/// # Errors
/// Returns the tagged primary error when there is no secondary, and
/// `Fallback { primary, secondary }` when both fail.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        name = "macrostate::fallback::run_chain",
        skip(primary, secondary, opts),
        fields(primary = %primary.name()),
    )
)]
pub async fn run_chain(
    series_id: &str,
    primary: Accessor,
    secondary: Option<Accessor>,
    opts: &FallbackOptions,
) -> Result<ChainOutcome, MacroError> {
    let primary_err = match attempt(primary, series_id, opts.timeout).await {
        ProviderAttempt::Success {
            provider,
            observations,
        } => {
            return Ok(ChainOutcome {
                observations,
                source: provider,
                status: IngestionStatus::Ok,
            });
        }
        ProviderAttempt::Failure { error, .. } => error,
    };

    let Some(secondary) = secondary else {
        return Err(primary_err);
    };
    #[cfg(feature = "tracing")]
    tracing::warn!(series_id, error = %primary_err, secondary = %secondary.name(), "primary failed; trying secondary");

    match attempt(secondary, series_id, opts.timeout).await {
        ProviderAttempt::Success {
            provider,
            observations,
        } => Ok(ChainOutcome {
            observations,
            source: provider,
            status: if opts.mark_secondary_as_fallback {
                IngestionStatus::Fallback
            } else {
                IngestionStatus::Ok
            },
        }),
        ProviderAttempt::Failure { error, .. } => Err(MacroError::fallback(primary_err, error)),
    }
}

/// Run the chain and resolve the snapshot of whichever provider answered.
///
/// # Errors
/// Propagates [`run_chain`] failures.
pub async fn fetch_with_fallback(
    series_id: &str,
    primary: Accessor,
    secondary: Option<Accessor>,
    opts: &FallbackOptions,
) -> Result<SeriesFetch, MacroError> {
    let outcome = run_chain(series_id, primary, secondary, opts).await?;
    let snaps = select_snapshots_sorted(&outcome.observations, opts.current_year, &opts.anchors);
    let changes = derive_changes(&outcome.observations, &snaps, opts.kind);
    let snapshot = snapshot_meta(&snaps, changes)
        .ok_or_else(|| MacroError::Data(format!("{series_id}: no current observation")))?;

    Ok(SeriesFetch {
        value: snapshot.current,
        meta: EnvelopeMeta {
            series_id: series_id.to_string(),
            provider: Some(outcome.source.clone()),
            snapshot: Some(snapshot),
        },
        status: outcome.status,
        source: outcome.source,
    })
}

/// [`fetch_with_fallback`] folded into an envelope. Never fails: a failed
/// chain yields a `FAILED` envelope whose meta carries only identifying fields.
pub async fn ingest_envelope(
    series_id: &str,
    primary: Accessor,
    secondary: Option<Accessor>,
    opts: &FallbackOptions,
) -> IngestionEnvelope {
    let provider = primary.name().to_string();
    match fetch_with_fallback(series_id, primary, secondary, opts).await {
        Ok(fetch) => {
            IngestionEnvelope::success(fetch.value, fetch.status, fetch.source, Utc::now(), fetch.meta)
        }
        Err(e) => {
            #[cfg(feature = "tracing")]
            tracing::warn!(series_id, error = %e, "series fetch failed");
            IngestionEnvelope::failed(
                format!("{series_id} fetch failed: {e}"),
                Utc::now(),
                EnvelopeMeta::identifying(series_id, Some(provider)),
            )
        }
    }
}
