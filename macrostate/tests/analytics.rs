mod helpers;

use helpers::*;
use macrostate::analytics::{
    DEFAULT_BLOCKS, FX_VOL_PAIRS, fx_volatility, system_health, volatility_block,
    volatility_regime,
};
use macrostate::{
    DataQuality, IngestionStatus, JointRegime, Macrostate, RawState, RegimeConfig, RegimeLabel,
    SeriesKind, SeriesSpec,
};
use macrostate_core::{DerivedChanges, EnvelopeMeta, IngestionEnvelope, SeriesTransforms, SnapshotMeta};

#[test]
fn volatility_regime_classifies_latest_zscores() {
    let h = history(vec![
        (
            "vix",
            zscores(&[(d(2024, 6, 26), Some(0.1)), (d(2024, 6, 27), Some(1.8)), (d(2024, 6, 28), None)]),
        ),
        ("move", zscores(&[(d(2024, 6, 28), Some(0.2))])),
    ]);
    let r = volatility_regime(&h, &RegimeConfig::default()).unwrap();

    assert_eq!(r.equity, RegimeLabel::Stress);
    assert_eq!(r.rates, RegimeLabel::Normal);
    assert_eq!(r.joint, JointRegime::Led("Equity".to_string()));
    assert_eq!(r.zscore_3y.vix, Some(1.8));
    // trailing gaps are skipped
    assert_eq!(r.as_of.vix, Some(d(2024, 6, 27)));
    assert_eq!(r.data_quality.equity, DataQuality::Ok);
    assert!(!r.boundary_case);
    assert_eq!(r.inputs_used, vec!["VIX_z_3Y", "MOVE_z_3Y"]);
    assert_eq!(r.window_used, "3Y");
}

#[test]
fn volatility_regime_reports_boundaries_per_side() {
    let h = history(vec![
        ("vix", zscores(&[(d(2024, 6, 28), Some(1.5))])),
        ("move", zscores(&[(d(2024, 6, 28), Some(-1.0))])),
    ]);
    let r = volatility_regime(&h, &RegimeConfig::default()).unwrap();
    assert_eq!(r.equity, RegimeLabel::Transition);
    assert_eq!(r.joint, JointRegime::Transition);
    assert!(r.boundary_case);
    assert_eq!(r.boundary_detail.equity.map(|b| b.threshold), Some(1.5));
    assert_eq!(r.boundary_detail.rates, None);

    let json = serde_json::to_value(&r).unwrap();
    assert!(json["boundary_detail"].get("rates").is_none());
    assert_eq!(json["joint"], "TRANSITION");
}

#[test]
fn volatility_regime_without_inputs_is_unavailable() {
    let r = volatility_regime(&history(vec![]), &RegimeConfig::default()).unwrap();
    assert_eq!(r.equity, RegimeLabel::Unavailable);
    assert_eq!(r.joint, JointRegime::Unavailable);
    assert_eq!(r.data_quality.rates, DataQuality::Failed);
    assert_eq!(r.as_of.move_index, None);
}

#[test]
fn fx_volatility_grades_each_pair() {
    let both = SeriesTransforms {
        realized_vol_20d_pct: Some(series(&[(d(2024, 6, 28), Some(7.5))])),
        realized_vol_20d_zscore_3y: Some(series(&[(d(2024, 6, 28), Some(-0.9))])),
        ..SeriesTransforms::default()
    };
    let vol_only = SeriesTransforms {
        realized_vol_20d_pct: Some(series(&[(d(2024, 6, 28), Some(9.0))])),
        realized_vol_20d_zscore_3y: Some(series(&[(d(2024, 6, 28), None)])),
        ..SeriesTransforms::default()
    };
    let h = history(vec![("eurusd", both), ("usdjpy", vol_only)]);
    let pairs = [("eurusd", "EURUSD"), ("usdjpy", "USDJPY"), ("usdcnh", "USDCNH")];
    let r = fx_volatility(&h, &pairs, &RegimeConfig::default()).unwrap();

    assert_eq!(r.entries.len(), 3);
    let eur = &r.entries[0];
    assert_eq!(eur.pair, "EURUSD");
    assert_eq!(eur.regime, RegimeLabel::Calm);
    assert_eq!(eur.data_quality, DataQuality::Ok);
    assert_eq!(eur.as_of.zscore, Some(d(2024, 6, 28)));

    assert_eq!(r.entries[1].data_quality, DataQuality::Partial);
    assert_eq!(r.entries[1].regime, RegimeLabel::Unavailable);
    assert_eq!(r.entries[2].data_quality, DataQuality::Failed);

    assert_eq!(r.data_quality, DataQuality::Partial);
    assert!(!r.boundary_case);
    assert_eq!(r.vol_type, "realized_20d");
}

#[test]
fn fx_volatility_flags_any_boundary() {
    let on_edge = SeriesTransforms {
        realized_vol_20d_pct: Some(series(&[(d(2024, 6, 28), Some(8.0))])),
        realized_vol_20d_zscore_3y: Some(series(&[(d(2024, 6, 28), Some(0.45))])),
        ..SeriesTransforms::default()
    };
    let h = history(vec![("dxy", on_edge)]);
    let r = fx_volatility(&h, &FX_VOL_PAIRS[..1], &RegimeConfig::default()).unwrap();
    assert!(r.boundary_case);
    assert_eq!(r.entries[0].regime, RegimeLabel::Transition);
    assert_eq!(r.data_quality, DataQuality::Ok);
}

fn raw_with_volatility() -> RawState {
    let mut raw = RawState::new(dt(2024, 6, 28, 21, 0, 0));
    raw.insert("volatility", "vix", ok_env("VIXCLS", 18.0));
    raw.insert("volatility", "move", failed_env("^MOVE"));
    raw.insert("duration", "us_10y", ok_env("DGS10", 4.3));
    raw.insert("duration", "us_2y", ok_env("DGS2", 4.7));
    raw
}

#[test]
fn volatility_block_reads_envelopes() {
    let b = volatility_block(&raw_with_volatility());
    assert_eq!(b.vix, Some(18.0));
    assert_eq!(b.move_index, None);
    assert_eq!(b.vix_5d_roc, None);
    assert_eq!(b.stress_origin_read, "Low or indeterminate stress");
    assert_eq!(b.data_quality.vix, Some(IngestionStatus::Ok));
    assert_eq!(b.data_quality.move_index, Some(IngestionStatus::Failed));

    let empty = volatility_block(&RawState::new(dt(2024, 6, 28, 0, 0, 0)));
    assert_eq!(empty.data_quality.vix, None);
}

fn vol_env(series_id: &str, current: f64, change_5d_pct: f64, change_1w_pct: f64) -> IngestionEnvelope {
    let snapshot = SnapshotMeta {
        current,
        as_of_current: d(2024, 6, 28),
        last_week: None,
        as_of_last_week: None,
        last_month: None,
        as_of_last_month: None,
        last_6m: None,
        as_of_last_6m: None,
        start_of_year: None,
        as_of_start_of_year: None,
        high_frequency: true,
        changes: DerivedChanges {
            change_5d_pct: Some(change_5d_pct),
            change_1w_pct: Some(change_1w_pct),
            ..DerivedChanges::default()
        },
        data_quality: DataQuality::Partial,
    };
    let meta = EnvelopeMeta {
        snapshot: Some(snapshot),
        ..EnvelopeMeta::identifying(series_id, Some("fred_http".to_string()))
    };
    IngestionEnvelope::success(current, IngestionStatus::Ok, "fred_http", dt(2024, 6, 28, 21, 0, 0), meta)
}

#[test]
fn volatility_block_uses_calendar_five_day_change() {
    let mut raw = RawState::new(dt(2024, 6, 28, 21, 0, 0));
    raw.insert("volatility", "vix", vol_env("VIXCLS", 14.0, -3.0, 6.0));
    raw.insert("volatility", "move", vol_env("^MOVE", 110.0, 4.0, -2.0));

    let b = volatility_block(&raw);
    assert_eq!(b.vix_5d_roc, Some(-3.0));
    assert_eq!(b.move_5d_roc, Some(4.0));
    assert_eq!(b.stress_origin_read, "Rates-led volatility");
}

#[test]
fn system_health_rolls_up_blocks() {
    let raw = raw_with_volatility();
    let r = system_health(&raw, DEFAULT_BLOCKS, dt(2024, 6, 29, 23, 5, 0));

    assert_eq!(r.blocks["Rates"].status, DataQuality::Ok);
    assert_eq!(r.blocks["Rates"].total, 2);
    assert_eq!(r.blocks["Volatility"].status, DataQuality::Partial);
    assert_eq!(r.blocks["Volatility"].failed, 1);
    assert_eq!(r.blocks["FX"].status, DataQuality::Failed);
    assert_eq!(r.blocks["FX"].total, 0);
    assert_eq!(r.blocks.len(), DEFAULT_BLOCKS.len());

    assert_eq!(r.total_series, 4);
    assert_eq!(r.failed_series, 1);
    assert_eq!(r.failed_series_list, vec!["^MOVE"]);
    assert_eq!(r.age_seconds, 26 * 3600 + 5 * 60);
    assert_eq!(r.age_human, "1d 2h");
}

#[test]
fn system_health_clamps_future_timestamps() {
    let raw = raw_with_volatility();
    let r = system_health(&raw, DEFAULT_BLOCKS, dt(2024, 6, 28, 20, 0, 0));
    assert_eq!(r.age_seconds, 0);
    assert_eq!(r.age_human, "0s");
}

#[tokio::test]
async fn end_to_end_cycle_over_the_mock() {
    let ms = Macrostate::builder()
        .with_provider(mock("macrostate-mock"))
        .build()
        .unwrap();
    let specs = [
        SeriesSpec::new("volatility", "vix", "^VIX", "macrostate-mock")
            .kind(SeriesKind::VolatilityIndex),
        SeriesSpec::new("volatility", "move", "^MOVE", "macrostate-mock")
            .kind(SeriesKind::VolatilityIndex),
        SeriesSpec::new("fx", "eurusd", "EURUSD=X", "macrostate-mock").kind(SeriesKind::Fx),
    ];

    let raw = ms.ingest_all_as_of(&specs, as_of()).await;
    let block = volatility_block(&raw);
    assert!(block.vix.is_some() && block.move_index.is_some());
    assert!(block.vix_5d_roc.is_some() && block.move_5d_roc.is_some());

    let hist = ms
        .build_history_state_as_of(&specs, Some(("vix", "move")), as_of())
        .await;
    let regime = volatility_regime(&hist, &ms.config().regime).unwrap();
    assert_eq!(regime.data_quality.equity, DataQuality::Ok);
    assert_eq!(regime.data_quality.rates, DataQuality::Ok);
    assert_ne!(regime.joint, JointRegime::Unavailable);

    let fx = fx_volatility(&hist, &FX_VOL_PAIRS[1..2], &ms.config().regime).unwrap();
    assert_eq!(fx.entries[0].data_quality, DataQuality::Ok);
}
