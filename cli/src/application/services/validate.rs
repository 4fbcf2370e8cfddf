//! Application service — validation use-cases.
//!
//! Orchestrates telemetry collection around the pure validator: captures
//! and persists a baseline, compares a stored (or freshly captured)
//! baseline against the current state, and runs the absolute
//! connectivity check.

use anyhow::Result;

use plexus_common::metrics::TelemetrySnapshot;
use plexus_common::verdict::Verdict;

use crate::application::ports::{NodeExecutor, SnapshotStore};
use crate::application::services::telemetry::TelemetryCollector;
use crate::domain::validation::Validator;

/// Capture a baseline snapshot and persist it.
///
/// # Errors
///
/// Returns an error when the snapshot cannot be persisted, or when every
/// sub-collection failed (an all-empty baseline would make later
/// comparisons silently vacuous).
pub async fn capture_baseline(
    executor: &impl NodeExecutor,
    store: &impl SnapshotStore,
    source: &str,
    destination: &str,
) -> Result<TelemetrySnapshot> {
    let collector = TelemetryCollector::new(executor);
    let snapshot = collector.collect_all(source, destination).await;
    if snapshot.is_empty() {
        anyhow::bail!("baseline collection produced no metrics at all");
    }
    store.save_async(&snapshot).await?;
    tracing::info!(source, destination, "baseline snapshot captured");
    Ok(snapshot)
}

/// Validate current network behavior against the stored baseline.
///
/// When no baseline is stored, one is captured on the spot first (the
/// before/after comparison then reflects only transient variation — the
/// original workflow's behavior).
///
/// # Errors
///
/// Returns an error when the baseline store cannot be read.
pub async fn validate_against_baseline(
    executor: &impl NodeExecutor,
    store: &impl SnapshotStore,
    validator: &Validator,
    source: &str,
    destination: &str,
) -> Result<Verdict> {
    let collector = TelemetryCollector::new(executor);

    let baseline = match store.load_async().await? {
        Some(stored) => stored,
        None => {
            tracing::info!("no stored baseline, collecting one now");
            collector.collect_all(source, destination).await
        }
    };
    let current = collector.collect_all(source, destination).await;

    Ok(validator.validate(&baseline, &current))
}

/// Absolute connectivity check between two nodes.
pub async fn check_connectivity(
    executor: &impl NodeExecutor,
    validator: &Validator,
    source: &str,
    destination: &str,
) -> Verdict {
    let collector = TelemetryCollector::new(executor);
    let snapshot = collector.collect_all(source, destination).await;
    validator.validate_connectivity(&snapshot)
}
