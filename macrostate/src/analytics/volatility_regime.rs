use chrono::Utc;
use macrostate_core::{
    DataQuality, EquityRates, EquityRatesBoundary, HistoryState, JointClassifier, MacroError,
    RegimeConfig, VixMove, VolatilityRegimeReport, latest_value,
};

use super::{MOVE_KEY, VIX_KEY};

fn latest_zscore(history: &HistoryState, key: &str) -> Option<(f64, chrono::NaiveDate)> {
    history
        .transforms
        .get(key)
        .and_then(|t| latest_value(&t.zscore_3y))
}

fn presence(v: Option<f64>) -> DataQuality {
    if v.is_some() {
        DataQuality::Ok
    } else {
        DataQuality::Failed
    }
}

/// Classify the latest long-window z-scores of VIX (equity) and MOVE (rates).
///
/// # Errors
/// Returns `InvalidConfig` when `cfg` fails validation.
pub fn volatility_regime(
    history: &HistoryState,
    cfg: &RegimeConfig,
) -> Result<VolatilityRegimeReport, MacroError> {
    let joint = JointClassifier::new(cfg)?;
    let vix = latest_zscore(history, VIX_KEY);
    let mv = latest_zscore(history, MOVE_KEY);
    let (vix_z, move_z) = (vix.map(|(v, _)| v), mv.map(|(v, _)| v));

    let equity = joint.single().classify(vix_z);
    let rates = joint.single().classify(move_z);

    Ok(VolatilityRegimeReport {
        equity: equity.label,
        rates: rates.label,
        joint: joint.classify(vix_z, move_z),
        inputs_used: vec!["VIX_z_3Y".to_string(), "MOVE_z_3Y".to_string()],
        window_used: "3Y".to_string(),
        computed_at: Utc::now(),
        boundary_case: equity.is_boundary || rates.is_boundary,
        boundary_detail: EquityRatesBoundary {
            equity: equity.boundary,
            rates: rates.boundary,
        },
        data_quality: EquityRates {
            equity: presence(vix_z),
            rates: presence(move_z),
        },
        zscore_3y: VixMove {
            vix: vix_z,
            move_index: move_z,
        },
        as_of: VixMove {
            vix: vix.map(|(_, d)| d),
            move_index: mv.map(|(_, d)| d),
        },
    })
}
