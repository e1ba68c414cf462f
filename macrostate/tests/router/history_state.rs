use crate::helpers::*;
use macrostate::{IngestionStatus, Macrostate, SeriesKind, SeriesSpec};
use macrostate_core::latest_value;

fn specs() -> Vec<SeriesSpec> {
    vec![
        SeriesSpec::new("volatility", "vix", "^VIX", "macrostate-mock")
            .kind(SeriesKind::VolatilityIndex),
        SeriesSpec::new("volatility", "move", "^MOVE", "macrostate-mock")
            .kind(SeriesKind::VolatilityIndex),
        SeriesSpec::new("duration", "us_10y", "DGS10", "macrostate-mock").kind(SeriesKind::Rate),
        SeriesSpec::new("fx", "broken", "FAIL", "macrostate-mock").kind(SeriesKind::Fx),
    ]
}

fn orchestrator() -> Macrostate {
    Macrostate::builder()
        .with_provider(mock("macrostate-mock"))
        .build()
        .unwrap()
}

#[tokio::test]
async fn fetch_history_spans_the_configured_years() {
    let ms = orchestrator();
    let s = ms.fetch_history_as_of(&specs()[0], as_of()).await;
    assert_eq!(s.status(), IngestionStatus::Ok);
    assert_eq!(s.source(), Some("macrostate-mock"));
    assert_eq!(s.name(), "vix");
    let first = s.observations().first().unwrap().date;
    assert!(first >= d(2019, 6, 28) && first <= d(2019, 7, 3));
    assert_eq!(s.last().unwrap().date, as_of());
}

#[tokio::test]
async fn failed_history_is_empty_and_failed() {
    let ms = orchestrator();
    let s = ms.fetch_history_as_of(&specs()[3], as_of()).await;
    assert_eq!(s.status(), IngestionStatus::Failed);
    assert!(s.is_empty());
    assert_eq!(s.source(), None);
}

#[tokio::test]
async fn history_state_has_transforms_and_cross_asset() {
    let ms = orchestrator();
    let state = ms
        .build_history_state_as_of(&specs(), Some(("vix", "move")), as_of())
        .await;

    assert_eq!(state.meta.rolling_windows.get("1y"), Some(&252));
    assert_eq!(state.meta.rolling_windows.get("3y"), Some(&756));
    assert_eq!(state.meta.roc_windows, vec![5, 20]);

    assert_eq!(state.series.len(), 4);
    assert_eq!(state.series["broken"].status, IngestionStatus::Failed);
    assert!(state.series["broken"].values.is_empty());
    assert!(!state.transforms.contains_key("broken"));

    let vix = &state.transforms["vix"];
    assert_eq!(vix.zscore_3y.len(), state.series["vix"].dates.len());
    assert!(latest_value(&vix.zscore_3y).is_some());
    assert!(vix.realized_vol_20d_pct.as_ref().and_then(latest_value).is_some());
    assert!(state.transforms["us_10y"].realized_vol_20d_pct.is_none());

    let cross = &state.cross_asset["move_vix"];
    let (corr, _) = latest_value(&cross.corr_60d).expect("correlation");
    assert!((-1.0..=1.0).contains(&corr));
    assert!(latest_value(&cross.z_spread).is_some());
}

#[tokio::test]
async fn cross_asset_needs_both_series() {
    let ms = orchestrator();
    let state = ms
        .build_history_state_as_of(&specs(), Some(("vix", "broken")), as_of())
        .await;
    assert!(state.cross_asset.is_empty());
}
