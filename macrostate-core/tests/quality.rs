use chrono::{TimeZone, Utc};
use macrostate_core::{
    DataQuality, EnvelopeMeta, IngestionEnvelope, IngestionStatus, block_health,
    envelope_quality, metric_quality, quality_from_flags, rollup,
};
use proptest::prelude::*;

fn ok_env() -> IngestionEnvelope {
    let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    IngestionEnvelope::success(1.0, IngestionStatus::Ok, "p", at, EnvelopeMeta::identifying("A", None))
}

fn failed_env() -> IngestionEnvelope {
    let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    IngestionEnvelope::failed("B fetch failed: x", at, EnvelopeMeta::identifying("B", None))
}

proptest! {
    #[test]
    fn more_inputs_never_lower_quality(required in 1usize..20, present in 0usize..20) {
        let present = present.min(required);
        let lower = metric_quality(present, required);
        let higher = metric_quality((present + 1).min(required), required);
        prop_assert!(higher.rank() >= lower.rank());
    }

    #[test]
    fn flags_match_counts(flags in proptest::collection::vec(any::<bool>(), 1..20)) {
        let present = flags.iter().filter(|f| **f).count();
        prop_assert_eq!(quality_from_flags(flags.clone()), metric_quality(present, flags.len()));
    }
}

#[test]
fn envelope_verdicts() {
    assert_eq!(envelope_quality(&ok_env()), DataQuality::Ok);
    assert_eq!(envelope_quality(&failed_env()), DataQuality::Failed);
}

#[test]
fn block_rollup() {
    let empty: Vec<IngestionEnvelope> = Vec::new();
    let h = block_health(&empty);
    assert_eq!((h.status, h.failed, h.total), (DataQuality::Failed, 0, 0));

    let mixed = [ok_env(), failed_env(), ok_env()];
    let h = block_health(&mixed);
    assert_eq!((h.status, h.failed, h.total), (DataQuality::Partial, 1, 3));

    let all_failed = [failed_env(), failed_env()];
    assert_eq!(block_health(&all_failed).status, DataQuality::Failed);
    assert_eq!(block_health(&[ok_env()]).status, DataQuality::Ok);

    assert_eq!(
        rollup([DataQuality::Ok, DataQuality::Partial]),
        DataQuality::Partial
    );
}
