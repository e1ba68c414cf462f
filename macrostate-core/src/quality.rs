//! Data-quality aggregation rules.

use macrostate_types::{BlockHealth, DataQuality, IngestionEnvelope, IngestionStatus};

/// Verdict for `present` of `required` inputs.
///
/// `required == 0` is treated as nothing to show, hence FAILED.
#[must_use]
pub const fn metric_quality(present: usize, required: usize) -> DataQuality {
    if required == 0 || present == 0 {
        DataQuality::Failed
    } else if present >= required {
        DataQuality::Ok
    } else {
        DataQuality::Partial
    }
}

/// Verdict over presence flags, one per required input.
#[must_use]
pub fn quality_from_flags<I: IntoIterator<Item = bool>>(flags: I) -> DataQuality {
    let (present, required) = flags
        .into_iter()
        .fold((0, 0), |(p, r), f| (p + usize::from(f), r + 1));
    metric_quality(present, required)
}

/// Roll child verdicts up: empty or all FAILED → FAILED, all OK → OK,
/// anything else → PARTIAL.
#[must_use]
pub fn rollup<I: IntoIterator<Item = DataQuality>>(verdicts: I) -> DataQuality {
    let mut any = false;
    let mut all_ok = true;
    let mut all_failed = true;
    for q in verdicts {
        any = true;
        all_ok &= q == DataQuality::Ok;
        all_failed &= q == DataQuality::Failed;
    }
    match (any, all_ok, all_failed) {
        (false, _, _) | (true, _, true) => DataQuality::Failed,
        (true, true, _) => DataQuality::Ok,
        _ => DataQuality::Partial,
    }
}

/// Verdict of one envelope: FAILED status wins, otherwise the per-series
/// anchor quality (OK when the envelope carries none).
#[must_use]
pub fn envelope_quality(env: &IngestionEnvelope) -> DataQuality {
    if env.status() == IngestionStatus::Failed {
        return DataQuality::Failed;
    }
    env.snapshot().map_or(DataQuality::Ok, |s| s.data_quality)
}

/// Health of a block of envelopes, judged on fetch status.
///
/// No failures → OK, all failed → FAILED, otherwise PARTIAL; an empty block is
/// FAILED with zero counts.
#[must_use]
pub fn block_health<'a, I>(envelopes: I) -> BlockHealth
where
    I: IntoIterator<Item = &'a IngestionEnvelope>,
{
    let (failed, total) = envelopes.into_iter().fold((0, 0), |(f, t), e| {
        (f + usize::from(e.status() == IngestionStatus::Failed), t + 1)
    });
    let status = if total == 0 || failed == total {
        DataQuality::Failed
    } else if failed == 0 {
        DataQuality::Ok
    } else {
        DataQuality::Partial
    };
    BlockHealth {
        status,
        failed,
        total,
    }
}
