use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use macrostate_core::{IngestionStatus, RawState, SystemHealthReport, block_health};

/// Health block labels and the raw-state categories they cover.
pub const DEFAULT_BLOCKS: &[(&str, &str)] = &[
    ("Rates", "duration"),
    ("Policy Futures", "policy_futures"),
    ("Volatility", "volatility"),
    ("Liquidity", "liquidity"),
    ("Labor", "labor_market"),
    ("Credit", "credit_spreads"),
    ("Global Policy", "global_policy"),
    ("FX", "fx"),
];

/// Compact age: `"1d 2h"`, `"3h 4m"`, `"5m"`, or `"9s"`.
#[must_use]
pub fn age_human(seconds: i64) -> String {
    let minutes = seconds / 60;
    let hours = minutes / 60;
    let days = hours / 24;
    if days > 0 {
        format!("{days}d {}h", hours % 24)
    } else if hours > 0 {
        format!("{hours}h {}m", minutes % 60)
    } else if minutes > 0 {
        format!("{minutes}m")
    } else {
        format!("{seconds}s")
    }
}

/// Per-block completeness and freshness of `raw` at `now`.
///
/// `blocks` pairs a display label with a raw-state category; a category
/// missing from `raw` counts as a `FAILED` block with no series. A
/// `generated_at` in the future reports an age of zero.
#[must_use]
pub fn system_health(
    raw: &RawState,
    blocks: &[(&str, &str)],
    now: DateTime<Utc>,
) -> SystemHealthReport {
    let mut health = BTreeMap::new();
    let mut failed_series = 0;
    let mut total_series = 0;
    let mut failed_series_list = Vec::new();

    for &(label, category) in blocks {
        let envelopes = raw.category(category);
        let h = block_health(envelopes.into_iter().flat_map(|m| m.values()));
        failed_series += h.failed;
        total_series += h.total;
        health.insert(label.to_string(), h);

        for env in envelopes.into_iter().flat_map(|m| m.values()) {
            if env.status() == IngestionStatus::Failed {
                let id = &env.meta().series_id;
                let name = if id.is_empty() { label } else { id.as_str() };
                failed_series_list.push(name.to_string());
            }
        }
    }

    let age_seconds = (now - raw.meta.generated_at).num_seconds().max(0);
    SystemHealthReport {
        generated_at: raw.meta.generated_at,
        age_seconds,
        age_human: age_human(age_seconds),
        failed_series,
        total_series,
        blocks: health,
        failed_series_list,
    }
}
