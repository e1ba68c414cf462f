use chrono::{NaiveDate, Utc};
use macrostate_core::{IngestionEnvelope, RawState};

use crate::Macrostate;
use crate::core::SeriesSpec;
use crate::fallback::ingest_envelope;

impl Macrostate {
    /// Ingest one series as of today (UTC).
    ///
    /// Never fails: upstream failures come back as a `FAILED` envelope. The
    /// request window starts early enough to resolve every anchor.
    pub async fn ingest(&self, spec: &SeriesSpec) -> IngestionEnvelope {
        self.ingest_as_of(spec, Self::today()).await
    }

    /// [`Self::ingest`] with an explicit reference date. `today` only bounds
    /// the request window; `start_of_year` anchors on January 1 of the year of
    /// the latest observation.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "macrostate::router::ingest",
            skip(self, spec),
            fields(category = %spec.category, key = %spec.key, series_id = %spec.series_id),
        )
    )]
    pub async fn ingest_as_of(&self, spec: &SeriesSpec, today: NaiveDate) -> IngestionEnvelope {
        let (primary, secondary) = self.route(spec, self.snapshot_start(today));
        let opts = self.fallback_options(spec.kind);
        ingest_envelope(&spec.series_id, primary, secondary, &opts).await
    }

    /// Ingest every series concurrently into a `category → key → envelope` tree.
    ///
    /// Series run concurrently; the primary/secondary chain of one series stays
    /// sequential. A later spec with the same category and key replaces an
    /// earlier one.
    pub async fn ingest_all(&self, specs: &[SeriesSpec]) -> RawState {
        self.ingest_all_as_of(specs, Self::today()).await
    }

    /// [`Self::ingest_all`] with an explicit reference date.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "macrostate::router::ingest_all",
            skip(self, specs),
            fields(series = specs.len()),
        )
    )]
    pub async fn ingest_all_as_of(&self, specs: &[SeriesSpec], today: NaiveDate) -> RawState {
        let tasks = specs.iter().map(|spec| async move {
            let env = self.ingest_as_of(spec, today).await;
            (spec, env)
        });
        let results = futures::future::join_all(tasks).await;

        let mut state = RawState::new(Utc::now());
        for (spec, env) in results {
            state.insert(spec.category.clone(), spec.key.clone(), env);
        }
        state
    }
}
