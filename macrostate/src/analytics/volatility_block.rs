use macrostate_core::{IngestionEnvelope, RawState, VixMove, VolatilityBlockReport};

use super::{MOVE_KEY, VIX_KEY, VOLATILITY_CATEGORY};

/// Where volatility stress originates, from the 5-day moves of MOVE and VIX.
#[must_use]
pub fn stress_origin_read(move_roc: Option<f64>, vix_roc: Option<f64>) -> &'static str {
    const LOW: &str = "Low or indeterminate stress";
    let (Some(m), Some(v)) = (move_roc, vix_roc) else {
        return LOW;
    };
    match (m > 0.0, v > 0.0) {
        (true, false) => "Rates-led volatility",
        (true, true) => "Cross-asset stress",
        (false, true) => "Equity-led volatility",
        (false, false) => LOW,
    }
}

fn current(env: Option<&IngestionEnvelope>) -> Option<f64> {
    let env = env?;
    env.snapshot().map(|s| s.current).or_else(|| env.value())
}

/// Percent change versus the latest print at least five calendar days back.
fn roc_5d(env: Option<&IngestionEnvelope>) -> Option<f64> {
    env?.snapshot()?.changes.change_5d_pct
}

/// VIX/MOVE levels, 5-day momentum and the stress-origin read.
#[must_use]
pub fn volatility_block(raw: &RawState) -> VolatilityBlockReport {
    let vix = raw.envelope(VOLATILITY_CATEGORY, VIX_KEY);
    let mv = raw.envelope(VOLATILITY_CATEGORY, MOVE_KEY);
    let (vix_roc, move_roc) = (roc_5d(vix), roc_5d(mv));

    VolatilityBlockReport {
        vix: current(vix),
        move_index: current(mv),
        vix_5d_roc: vix_roc,
        move_5d_roc: move_roc,
        stress_origin_read: stress_origin_read(move_roc, vix_roc).to_string(),
        data_quality: VixMove {
            vix: vix.map(IngestionEnvelope::status),
            move_index: mv.map(IngestionEnvelope::status),
        },
    }
}
