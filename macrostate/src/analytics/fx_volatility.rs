use chrono::Utc;
use macrostate_core::{
    FxAsOf, FxVolEntry, FxVolatilityReport, HistoryState, MacroError, RegimeClassifier,
    RegimeConfig, latest_value, metric_quality, rollup,
};

/// History keys and display labels of the default FX pairs.
pub const FX_VOL_PAIRS: &[(&str, &str)] = &[
    ("dxy", "DXY"),
    ("eurusd", "EURUSD"),
    ("gbpusd", "GBPUSD"),
    ("usdjpy", "USDJPY"),
    ("usdcad", "USDCAD"),
    ("audusd", "AUDUSD"),
    ("usdchf", "USDCHF"),
    ("usdcnh", "USDCNH"),
];

/// Latest realized vol and its z-score per `(history key, label)` pair.
///
/// Pairs missing from `history` get a `FAILED`, `UNAVAILABLE` entry rather
/// than being skipped.
///
/// # Errors
/// Returns `InvalidConfig` when `cfg` fails validation.
pub fn fx_volatility(
    history: &HistoryState,
    pairs: &[(&str, &str)],
    cfg: &RegimeConfig,
) -> Result<FxVolatilityReport, MacroError> {
    let classifier = RegimeClassifier::new(cfg)?;

    let entries: Vec<FxVolEntry> = pairs
        .iter()
        .map(|&(key, label)| {
            let t = history.transforms.get(key);
            let vol = t
                .and_then(|t| t.realized_vol_20d_pct.as_ref())
                .and_then(latest_value);
            let z = t
                .and_then(|t| t.realized_vol_20d_zscore_3y.as_ref())
                .and_then(latest_value);
            let class = classifier.classify(z.map(|(v, _)| v));
            let present = usize::from(vol.is_some()) + usize::from(z.is_some());
            FxVolEntry {
                pair: label.to_string(),
                realized_vol_20d_pct: vol.map(|(v, _)| v),
                zscore_3y: z.map(|(v, _)| v),
                regime: class.label,
                data_quality: metric_quality(present, 2),
                boundary_case: class.is_boundary,
                boundary_detail: class.boundary,
                as_of: FxAsOf {
                    vol: vol.map(|(_, d)| d),
                    zscore: z.map(|(_, d)| d),
                },
            }
        })
        .collect();

    Ok(FxVolatilityReport {
        vol_type: "realized_20d".to_string(),
        window_used: "3Y".to_string(),
        computed_at: Utc::now(),
        inputs_used: vec![
            "realized_vol_20d_pct".to_string(),
            "realized_vol_20d_zscore_3y".to_string(),
        ],
        data_quality: rollup(entries.iter().map(|e| e.data_quality)),
        boundary_case: entries.iter().any(|e| e.boundary_case),
        entries,
    })
}
