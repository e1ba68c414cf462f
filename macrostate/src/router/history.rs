use std::collections::BTreeMap;

use chrono::{NaiveDate, Utc};
use macrostate_core::{
    HistoryMeta, HistoryState, Series, SeriesEntry, compute_transforms, cross_asset_transforms,
};

use crate::Macrostate;
use crate::core::SeriesSpec;
use crate::fallback::run_chain;

impl Macrostate {
    /// Fetch `history_years` of observations through the same fallback chain
    /// as [`Self::ingest`].
    ///
    /// On total failure the series is `FAILED` with no observations.
    pub async fn fetch_history(&self, spec: &SeriesSpec) -> Series {
        self.fetch_history_as_of(spec, Self::today()).await
    }

    /// [`Self::fetch_history`] with an explicit reference date.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "macrostate::router::fetch_history",
            skip(self, spec),
            fields(key = %spec.key, series_id = %spec.series_id),
        )
    )]
    pub async fn fetch_history_as_of(&self, spec: &SeriesSpec, today: NaiveDate) -> Series {
        let (primary, secondary) = self.route(spec, self.history_start(today));
        let opts = self.fallback_options(spec.kind);
        match run_chain(&spec.series_id, primary, secondary, &opts).await {
            Ok(out) => Series::new(
                spec.key.clone(),
                spec.series_id.clone(),
                Some(out.source),
                out.status,
                out.observations,
            ),
            Err(_e) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(series_id = %spec.series_id, error = %_e, "history fetch failed");
                Series::failed(spec.key.clone(), spec.series_id.clone())
            }
        }
    }

    /// Fetch every series concurrently and compute its rolling transforms.
    ///
    /// `cross` names two series keys `(a, b)`; their joint statistics land in
    /// `cross_asset` under `"<b>_<a>"` (e.g. `("vix", "move")` → `move_vix`).
    /// Failed series keep an entry but get no transforms.
    pub async fn build_history_state(
        &self,
        specs: &[SeriesSpec],
        cross: Option<(&str, &str)>,
    ) -> HistoryState {
        self.build_history_state_as_of(specs, cross, Self::today())
            .await
    }

    /// [`Self::build_history_state`] with an explicit reference date.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "macrostate::router::build_history_state",
            skip(self, specs),
            fields(series = specs.len()),
        )
    )]
    pub async fn build_history_state_as_of(
        &self,
        specs: &[SeriesSpec],
        cross: Option<(&str, &str)>,
        today: NaiveDate,
    ) -> HistoryState {
        let tasks = specs.iter().map(|spec| async move {
            let series = self.fetch_history_as_of(spec, today).await;
            (spec, series)
        });
        let fetched = futures::future::join_all(tasks).await;

        let tcfg = &self.cfg.transforms;
        let mut series = BTreeMap::new();
        let mut transforms = BTreeMap::new();
        let mut by_key: BTreeMap<&str, &Series> = BTreeMap::new();
        for (spec, s) in &fetched {
            series.insert(spec.key.clone(), SeriesEntry::from(s));
            if !s.is_empty() {
                transforms.insert(
                    spec.key.clone(),
                    compute_transforms(s.observations(), tcfg, spec.kind.has_realized_vol()),
                );
                by_key.insert(spec.key.as_str(), s);
            }
        }

        let mut cross_asset = BTreeMap::new();
        if let Some((a, b)) = cross
            && let (Some(sa), Some(sb)) = (by_key.get(a), by_key.get(b))
        {
            cross_asset.insert(
                format!("{b}_{a}"),
                cross_asset_transforms(sa.observations(), sb.observations(), tcfg),
            );
        }

        let rolling_windows = BTreeMap::from([
            ("1y".to_string(), tcfg.short_window),
            ("3y".to_string(), tcfg.long_window),
        ]);
        HistoryState {
            meta: HistoryMeta {
                generated_at: Utc::now(),
                rolling_windows,
                roc_windows: vec![tcfg.roc_short, tcfg.roc_long],
            },
            series,
            transforms,
            cross_asset,
        }
    }
}
