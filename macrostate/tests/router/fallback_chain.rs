use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::helpers::*;
use macrostate::fallback::{Accessor, FallbackOptions, ProviderAttempt, attempt, run_chain};
use macrostate::{IngestionStatus, MacroError, fetch_with_fallback, ingest_envelope};

fn two_points() -> [(chrono::NaiveDate, f64); 2] {
    [(d(2024, 5, 1), 4.8), (d(2024, 5, 2), 4.9)]
}

#[tokio::test]
async fn secondary_answers_after_primary_error() {
    let env = ingest_envelope(
        "DGS10",
        err_accessor("openbb", "timeout"),
        Some(ok_accessor("fred_http", &two_points())),
        &opts(),
    )
    .await;

    assert_eq!(env.value(), Some(4.9));
    assert_eq!(env.status(), IngestionStatus::Ok);
    assert_eq!(env.source(), Some("fred_http"));
    assert_eq!(env.error(), None);
    assert_eq!(env.meta().series_id, "DGS10");
    assert_eq!(env.meta().provider.as_deref(), Some("fred_http"));
}

#[tokio::test]
async fn both_failing_yields_failed_envelope() {
    let env = ingest_envelope(
        "DGS10",
        err_accessor("openbb", "timeout"),
        Some(err_accessor("fred_http", "HTTP 500")),
        &opts(),
    )
    .await;

    assert_eq!(env.status(), IngestionStatus::Failed);
    assert_eq!(env.value(), None);
    assert_eq!(env.source(), None);
    assert_eq!(
        env.error(),
        Some("DGS10 fetch failed: openbb failed: timeout; fred_http failed: HTTP 500")
    );
    assert!(env.snapshot().is_none());

    let json = serde_json::to_value(&env).unwrap();
    let meta = json["meta"].as_object().unwrap();
    assert_eq!(meta.len(), 2);
    assert_eq!(meta["series_id"], "DGS10");
    assert_eq!(meta["provider"], "openbb");
}

#[tokio::test]
async fn secondary_can_be_flagged_as_fallback() {
    let opts = FallbackOptions {
        mark_secondary_as_fallback: true,
        ..opts()
    };
    let fetch = fetch_with_fallback(
        "DGS10",
        err_accessor("openbb", "timeout"),
        Some(ok_accessor("fred_http", &two_points())),
        &opts,
    )
    .await
    .unwrap();
    assert_eq!(fetch.status, IngestionStatus::Fallback);
    assert_eq!(fetch.source, "fred_http");

    // the primary answering stays OK regardless of the flag
    let fetch = fetch_with_fallback(
        "DGS10",
        ok_accessor("openbb", &two_points()),
        None,
        &opts,
    )
    .await
    .unwrap();
    assert_eq!(fetch.status, IngestionStatus::Ok);
}

#[tokio::test]
async fn secondary_is_not_called_when_primary_succeeds() {
    let called = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&called);
    let secondary = Accessor::new("fred_http", move || async move {
        flag.store(true, Ordering::SeqCst);
        Ok(Vec::new())
    });

    let fetch = fetch_with_fallback(
        "DGS10",
        ok_accessor("openbb", &two_points()),
        Some(secondary),
        &opts(),
    )
    .await
    .unwrap();
    assert_eq!(fetch.source, "openbb");
    assert!(!called.load(Ordering::SeqCst));
}

#[tokio::test(start_paused = true)]
async fn hanging_primary_times_out_then_falls_back() {
    let fetch = fetch_with_fallback(
        "DGS10",
        hanging_accessor("openbb"),
        Some(ok_accessor("fred_http", &two_points())),
        &opts(),
    )
    .await
    .unwrap();
    assert_eq!(fetch.value, 4.9);
    assert_eq!(fetch.source, "fred_http");
}

#[tokio::test(start_paused = true)]
async fn timeout_becomes_tagged_failure() {
    let out = attempt(hanging_accessor("openbb"), "DGS10", Duration::from_millis(50)).await;
    assert_eq!(
        out,
        ProviderAttempt::Failure {
            provider: "openbb".to_string(),
            error: MacroError::provider_timeout("openbb", "DGS10"),
        }
    );
}

#[tokio::test]
async fn empty_or_malformed_result_counts_as_failure() {
    let garbage = Accessor::new("openbb", || async {
        Ok(vec![macrostate::RawObservation::new(d(2024, 5, 1), ".")])
    });
    let err = run_chain("DGS10", garbage, None, &opts()).await.unwrap_err();
    assert_eq!(err.to_string(), "openbb failed: no observations");

    let env = ingest_envelope(
        "DGS10",
        ok_accessor("openbb", &[]),
        Some(ok_accessor("fred_http", &two_points())),
        &opts(),
    )
    .await;
    assert_eq!(env.source(), Some("fred_http"));
}

#[tokio::test]
async fn single_provider_failure_is_not_wrapped() {
    let err = fetch_with_fallback("DGS10", err_accessor("fred_http", "HTTP 404"), None, &opts())
        .await
        .unwrap_err();
    assert_eq!(err, MacroError::connector("fred_http", "HTTP 404"));
}

#[tokio::test]
async fn untagged_errors_are_attributed_to_their_provider() {
    let primary = Accessor::failing("openbb", MacroError::not_found("series DGS10"));
    let secondary = Accessor::failing("fred_http", MacroError::Data("bad payload".into()));
    let err = run_chain("DGS10", primary, Some(secondary), &opts())
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "openbb failed: not found: series DGS10; fred_http failed: data issue: bad payload"
    );
    assert_eq!(err.flatten().len(), 2);
}

#[tokio::test]
async fn success_meta_carries_snapshot() {
    let points = [
        (d(2023, 12, 29), 3.88),
        (d(2024, 1, 2), 3.95),
        (d(2024, 3, 28), 4.20),
        (d(2024, 4, 30), 4.68),
        (d(2024, 5, 31), 4.51),
    ];
    let fetch = fetch_with_fallback("DGS10", ok_accessor("fred_http", &points), None, &opts())
        .await
        .unwrap();
    let snap = fetch.meta.snapshot.expect("snapshot");
    assert_eq!(snap.current, 4.51);
    assert_eq!(snap.as_of_current, d(2024, 5, 31));
    assert_eq!(snap.as_of_start_of_year, Some(d(2023, 12, 29)));
    assert_eq!(snap.as_of_last_month, Some(d(2024, 4, 30)));
    assert!(!snap.high_frequency);
}
