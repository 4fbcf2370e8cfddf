//! Unit tests for the validation application service.
//!
//! Exercises baseline capture/persistence and the stored-baseline
//! comparison flow end to end through mocked ports.

#![allow(clippy::expect_used)]

use plexus_cli::application::services::validate::{
    capture_baseline, check_connectivity, validate_against_baseline,
};
use plexus_cli::domain::validation::{Validator, ValidatorConfig};
use plexus_common::verdict::VerdictStatus;

use crate::helpers::{ping_output, snapshot_with_latency};
use crate::mocks::{MemoryStore, RecordingExecutor};

fn default_validator() -> Validator {
    Validator::new(ValidatorConfig::default()).expect("default config")
}

#[tokio::test]
async fn test_capture_baseline_persists_snapshot() {
    let executor = RecordingExecutor::new().respond("ping", &ping_output("0", 1.0, 2.0, 3.0));
    let store = MemoryStore::empty();

    let snapshot = capture_baseline(&executor, &store, "h1", "h2")
        .await
        .expect("capture");
    assert!(snapshot.latency.is_some());

    let stored = store.stored().expect("baseline stored");
    assert!(stored.latency.is_some());
}

#[tokio::test]
async fn test_capture_baseline_with_no_metrics_fails() {
    let executor = RecordingExecutor::new()
        .fail_on("ping")
        .fail_on("traceroute")
        .fail_on("/proc/net/dev");
    let store = MemoryStore::empty();

    let result = capture_baseline(&executor, &store, "h1", "h2").await;
    assert!(result.is_err());
    assert!(store.stored().is_none());
}

#[tokio::test]
async fn test_validate_against_stored_baseline_detects_regression() {
    // Stored baseline: 2 ms average. Current probes report 60 ms — a
    // 58 ms increase over the 50 ms threshold.
    let executor =
        RecordingExecutor::new().respond("ping", &ping_output("0", 30.0, 60.0, 90.0));
    let store = MemoryStore::with_baseline(snapshot_with_latency(2.0, 0.0));

    let verdict = validate_against_baseline(&executor, &store, &default_validator(), "h1", "h2")
        .await
        .expect("validate");
    assert_eq!(verdict.status, VerdictStatus::Fail);
    assert!(verdict.failed());
    assert!(
        verdict
            .evidence
            .iter()
            .any(|e| e.contains("Latency exceeded baseline"))
    );
}

#[tokio::test]
async fn test_validate_without_stored_baseline_collects_one() {
    // No stored baseline: both snapshots come from the same probes, so
    // the comparison passes.
    let executor = RecordingExecutor::new().respond("ping", &ping_output("0", 1.0, 2.0, 3.0));
    let store = MemoryStore::empty();

    let verdict = validate_against_baseline(&executor, &store, &default_validator(), "h1", "h2")
        .await
        .expect("validate");
    assert_eq!(verdict.status, VerdictStatus::Pass);

    // Two collection rounds ran the latency probe twice.
    let probe_count = executor
        .commands_for("h1")
        .iter()
        .filter(|c| c.starts_with("ping"))
        .count();
    assert_eq!(probe_count, 2);
}

#[tokio::test]
async fn test_check_connectivity_total_loss_fails() {
    let output = "5 packets transmitted, 0 received, 100% packet loss, time 4100ms\n";
    let executor = RecordingExecutor::new().respond("ping", output);

    let verdict = check_connectivity(&executor, &default_validator(), "h1", "h2").await;
    assert_eq!(verdict.status, VerdictStatus::Fail);
    assert!(verdict.evidence[0].contains("100% packet loss"));
}

#[tokio::test]
async fn test_check_connectivity_healthy_passes() {
    let executor = RecordingExecutor::new().respond("ping", &ping_output("0", 1.0, 2.0, 3.0));

    let verdict = check_connectivity(&executor, &default_validator(), "h1", "h2").await;
    assert_eq!(verdict.status, VerdictStatus::Pass);
    assert!(verdict.evidence[0].contains("Connectivity OK"));
}

#[tokio::test]
async fn test_check_connectivity_no_probe_output_fails_distinctly() {
    let executor = RecordingExecutor::new().fail_on("ping");

    let verdict = check_connectivity(&executor, &default_validator(), "h1", "h2").await;
    assert_eq!(verdict.status, VerdictStatus::Fail);
    assert!(verdict.evidence[0].contains("no latency metrics available"));
}
