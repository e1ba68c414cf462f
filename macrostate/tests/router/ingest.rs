use std::sync::Arc;
use std::time::Duration;

use crate::helpers::*;
use macrostate::{DataQuality, IngestionStatus, Macrostate, SeriesKind, SeriesSpec};
use macrostate_mock::{DynamicMockProvider, MockBehavior, MockProvider};

fn orchestrator() -> Macrostate {
    Macrostate::builder()
        .with_provider(mock("macrostate-mock"))
        .build()
        .unwrap()
}

#[tokio::test]
async fn ingest_resolves_every_anchor_of_a_daily_series() {
    let ms = orchestrator();
    let spec = SeriesSpec::new("duration", "us_10y", "DGS10", "macrostate-mock").kind(SeriesKind::Rate);
    let env = ms.ingest_as_of(&spec, as_of()).await;

    assert_eq!(env.status(), IngestionStatus::Ok);
    assert_eq!(env.source(), Some("macrostate-mock"));
    let snap = env.snapshot().expect("snapshot");
    assert_eq!(snap.as_of_current, as_of());
    assert_eq!(env.value(), Some(snap.current));
    assert!(snap.high_frequency);
    assert_eq!(snap.data_quality, DataQuality::Ok);
    // the fixture calendar only skips weekends, and 2024-01-01 is a Monday
    assert_eq!(snap.as_of_start_of_year, Some(d(2024, 1, 1)));
    assert!(snap.as_of_last_6m.is_some_and(|x| x < as_of()));
    assert!(snap.changes.change_1m_bp.is_some());
    assert!(snap.changes.change_ytd_pct.is_some());
}

#[tokio::test]
async fn monthly_series_skip_last_week() {
    let ms = orchestrator();
    let spec = SeriesSpec::new("labor_market", "unemployment", "UNRATE", "macrostate-mock");
    let env = ms.ingest_as_of(&spec, as_of()).await;

    let snap = env.snapshot().expect("snapshot");
    assert_eq!(snap.as_of_current, d(2024, 6, 1));
    assert!(!snap.high_frequency);
    assert_eq!(snap.last_week, None);
    assert_eq!(snap.data_quality, DataQuality::Ok);
    assert_eq!(snap.changes.change_1m_bp, None);
}

#[tokio::test]
async fn unknown_primary_falls_back_instead_of_panicking() {
    let ms = orchestrator();
    let spec = SeriesSpec::new("volatility", "vix", "^VIX", "nope").secondary("macrostate-mock");
    let env = ms.ingest_as_of(&spec, as_of()).await;
    assert_eq!(env.status(), IngestionStatus::Ok);
    assert_eq!(env.source(), Some("macrostate-mock"));

    let spec = SeriesSpec::new("volatility", "vix", "^VIX", "nope");
    let env = ms.ingest_as_of(&spec, as_of()).await;
    assert_eq!(env.status(), IngestionStatus::Failed);
    assert_eq!(
        env.error(),
        Some("^VIX fetch failed: nope failed: unknown provider: nope")
    );
}

#[tokio::test]
async fn secondary_route_can_rename_the_series() {
    let (primary, controller) = DynamicMockProvider::new_with_controller("openbb");
    let ms = Macrostate::builder()
        .with_provider(primary)
        .with_provider(mock("macrostate-mock"))
        .mark_secondary_as_fallback(true)
        .build()
        .unwrap();
    let spec = SeriesSpec::new("volatility", "move", "MOVE_INDEX", "openbb")
        .kind(SeriesKind::VolatilityIndex)
        .secondary_as("macrostate-mock", "^MOVE");

    let env = ms.ingest_as_of(&spec, as_of()).await;
    assert_eq!(env.status(), IngestionStatus::Fallback);
    assert_eq!(env.source(), Some("macrostate-mock"));
    assert_eq!(env.meta().series_id, "MOVE_INDEX");

    let requests = controller.requests().await;
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].series_id, "MOVE_INDEX");
    // the window reaches back past both January 1 and the six-month anchor
    assert!(requests[0].start.is_some_and(|s| s < d(2024, 1, 1)));
}

#[tokio::test(start_paused = true)]
async fn slow_provider_becomes_failed_envelope() {
    let ms = Macrostate::builder()
        .with_provider(mock("macrostate-mock"))
        .provider_timeout(Duration::from_millis(50))
        .build()
        .unwrap();
    let spec = SeriesSpec::new("fx", "slow", "TIMEOUT", "macrostate-mock");
    let env = ms.ingest_as_of(&spec, as_of()).await;
    assert_eq!(env.status(), IngestionStatus::Failed);
    assert_eq!(
        env.error(),
        Some("TIMEOUT fetch failed: macrostate-mock failed: timed out fetching TIMEOUT")
    );
}

#[tokio::test]
async fn hung_primary_is_cut_off_by_the_timeout() {
    let (primary, controller) = DynamicMockProvider::new_with_controller("openbb");
    controller.set_behavior("DGS2", MockBehavior::Hang).await;
    let ms = Macrostate::builder()
        .with_provider(primary)
        .with_provider(mock("macrostate-mock"))
        .provider_timeout(Duration::from_millis(20))
        .build()
        .unwrap();
    let spec = SeriesSpec::new("duration", "us_2y", "DGS2", "openbb").secondary("macrostate-mock");
    let env = ms.ingest_as_of(&spec, as_of()).await;
    assert_eq!(env.status(), IngestionStatus::Ok);
    assert_eq!(env.source(), Some("macrostate-mock"));
}

#[tokio::test]
async fn ingest_all_builds_the_category_tree() {
    let ms = orchestrator();
    let specs = [
        SeriesSpec::new("duration", "us_10y", "DGS10", "macrostate-mock").kind(SeriesKind::Rate),
        SeriesSpec::new("duration", "us_2y", "DGS2", "macrostate-mock").kind(SeriesKind::Rate),
        SeriesSpec::new("volatility", "vix", "^VIX", "macrostate-mock")
            .kind(SeriesKind::VolatilityIndex),
        SeriesSpec::new("fx", "broken", "FAIL", "macrostate-mock"),
    ];
    let raw = ms.ingest_all_as_of(&specs, as_of()).await;

    assert_eq!(raw.categories.len(), 3);
    assert_eq!(raw.category("duration").map(|c| c.len()), Some(2));
    assert_eq!(
        raw.envelope("volatility", "vix").map(|e| e.status()),
        Some(IngestionStatus::Ok)
    );
    let broken = raw.envelope("fx", "broken").expect("failed entries are kept");
    assert_eq!(broken.status(), IngestionStatus::Failed);
    assert!(broken.error().is_some_and(|e| e.starts_with("FAIL fetch failed: ")));

    let json = serde_json::to_value(&raw).unwrap();
    assert!(json["meta"]["generated_at"].is_string());
    assert_eq!(json["duration"]["us_10y"]["status"], "OK");
    assert!(json["duration"]["us_10y"]["meta"]["1m_change_bp"].is_number());
}

#[tokio::test]
async fn start_of_year_follows_the_latest_observation_year() {
    let ms = Macrostate::builder()
        .with_provider(Arc::new(
            MockProvider::named("macrostate-mock").with_as_of(d(2024, 12, 31)),
        ))
        .build()
        .unwrap();
    let spec = SeriesSpec::new("duration", "us_10y", "DGS10", "macrostate-mock").kind(SeriesKind::Rate);
    let env = ms.ingest_as_of(&spec, d(2025, 1, 2)).await;

    let snap = env.snapshot().expect("snapshot");
    assert_eq!(snap.as_of_current, d(2024, 12, 31));
    assert_eq!(snap.as_of_start_of_year, Some(d(2024, 1, 1)));
    assert_ne!(snap.start_of_year, Some(snap.current));
    assert!(snap.changes.change_ytd_pct.is_some_and(|c| c != 0.0));
}
