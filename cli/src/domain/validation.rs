//! Baseline-vs-current network validation.
//!
//! Pure decision logic: compares two telemetry snapshots against fixed
//! thresholds and produces a [`Verdict`] with human-readable evidence.
//! Comparison outcomes are never errors — [`ValidationError`] is reserved
//! for validator misconfiguration.

use plexus_common::metrics::{LatencyMetrics, PathMetrics, TelemetrySnapshot};
use plexus_common::verdict::{Verdict, VerdictStatus};

use crate::domain::error::ValidationError;

const PASS_MESSAGE: &str = "Network validation passed: all metrics within acceptable thresholds";
const FAIL_MESSAGE: &str = "Network validation failed: metrics exceeded acceptable thresholds";

/// Validator thresholds and policy.
#[derive(Debug, Clone, Copy)]
pub struct ValidatorConfig {
    /// Maximum acceptable average-latency increase over baseline (ms).
    pub latency_threshold_ms: f64,
    /// Maximum acceptable packet-loss increase over baseline (%).
    pub packet_loss_threshold_percent: f64,
    /// When false, a path change escalates the overall verdict to Fail
    /// instead of Warning.
    pub path_change_allowed: bool,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            latency_threshold_ms: 50.0,
            packet_loss_threshold_percent: 5.0,
            path_change_allowed: true,
        }
    }
}

/// Compares baseline and current telemetry snapshots.
pub struct Validator {
    config: ValidatorConfig,
}

impl Validator {
    /// Build a validator, rejecting nonsensical thresholds.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidThreshold`] for a negative
    /// latency or packet-loss threshold.
    pub fn new(config: ValidatorConfig) -> Result<Self, ValidationError> {
        if config.latency_threshold_ms < 0.0 {
            return Err(ValidationError::InvalidThreshold {
                name: "latency",
                value: config.latency_threshold_ms,
            });
        }
        if config.packet_loss_threshold_percent < 0.0 {
            return Err(ValidationError::InvalidThreshold {
                name: "packet loss",
                value: config.packet_loss_threshold_percent,
            });
        }
        Ok(Self { config })
    }

    /// Validate the current snapshot against a baseline.
    ///
    /// Each sub-check (latency, packet loss, path) runs only when both
    /// sides carry the relevant metric; absence on either side silently
    /// skips the check. The overall status is the most severe sub-check
    /// status; evidence is concatenated in sub-check order.
    #[must_use]
    pub fn validate(&self, baseline: &TelemetrySnapshot, current: &TelemetrySnapshot) -> Verdict {
        let mut status = VerdictStatus::Pass;
        let mut evidence = Vec::new();

        if let (Some(before), Some(after)) = (&baseline.latency, &current.latency) {
            let (latency_status, latency_evidence) = self.check_latency(before, after);
            status = status.max(latency_status);
            evidence.extend(latency_evidence);

            let (loss_status, loss_evidence) = self.check_packet_loss(before, after);
            status = status.max(loss_status);
            evidence.extend(loss_evidence);
        }

        if let (Some(before), Some(after)) = (&baseline.path, &current.path) {
            let (path_status, path_evidence) = self.check_path(before, after);
            status = status.max(path_status);
            evidence.extend(path_evidence);
        }

        let message = if status == VerdictStatus::Fail {
            FAIL_MESSAGE
        } else {
            PASS_MESSAGE
        };
        tracing::info!(status = ?status, "validation completed");

        Verdict {
            status,
            message: message.to_string(),
            evidence,
            baseline: Some(baseline.clone()),
            current: Some(current.clone()),
        }
    }

    fn check_latency(
        &self,
        baseline: &LatencyMetrics,
        current: &LatencyMetrics,
    ) -> (VerdictStatus, Vec<String>) {
        let increase = current.avg_latency_ms - baseline.avg_latency_ms;
        if increase > self.config.latency_threshold_ms {
            (
                VerdictStatus::Fail,
                vec![format!(
                    "Latency exceeded baseline: {increase:.2}ms increase \
                     (baseline: {:.2}ms, current: {:.2}ms)",
                    baseline.avg_latency_ms, current.avg_latency_ms
                )],
            )
        } else {
            (
                VerdictStatus::Pass,
                vec![format!(
                    "Latency within threshold: {:.2}ms (baseline: {:.2}ms)",
                    current.avg_latency_ms, baseline.avg_latency_ms
                )],
            )
        }
    }

    fn check_packet_loss(
        &self,
        baseline: &LatencyMetrics,
        current: &LatencyMetrics,
    ) -> (VerdictStatus, Vec<String>) {
        let increase = current.packet_loss_percent - baseline.packet_loss_percent;
        if increase > self.config.packet_loss_threshold_percent {
            (
                VerdictStatus::Fail,
                vec![format!(
                    "Packet loss exceeded threshold: {increase:.2}% increase \
                     (baseline: {:.2}%, current: {:.2}%)",
                    baseline.packet_loss_percent, current.packet_loss_percent
                )],
            )
        } else {
            (
                VerdictStatus::Pass,
                vec![format!(
                    "Packet loss within threshold: {:.2}% (baseline: {:.2}%)",
                    current.packet_loss_percent, baseline.packet_loss_percent
                )],
            )
        }
    }

    /// Compare the ordered hop-IP sequences. Any difference (including
    /// length) is a Warning, escalated to Fail when path changes are not
    /// allowed. A `*` hop never produced a sequence entry, so comparison
    /// is literal sequence equality.
    fn check_path(
        &self,
        baseline: &PathMetrics,
        current: &PathMetrics,
    ) -> (VerdictStatus, Vec<String>) {
        let baseline_hops: Vec<&str> = baseline.hops.iter().map(|h| h.ip_address.as_str()).collect();
        let current_hops: Vec<&str> = current.hops.iter().map(|h| h.ip_address.as_str()).collect();

        if baseline_hops == current_hops {
            return (
                VerdictStatus::Pass,
                vec!["Path unchanged: routing behavior consistent".to_string()],
            );
        }

        let status = if self.config.path_change_allowed {
            VerdictStatus::Warning
        } else {
            VerdictStatus::Fail
        };
        (
            status,
            vec![
                format!(
                    "Path change detected: {} hops -> {} hops",
                    baseline_hops.len(),
                    current_hops.len()
                ),
                format!("Baseline path: {}", baseline_hops.join(" -> ")),
                format!("Current path: {}", current_hops.join(" -> ")),
            ],
        )
    }

    /// Absolute connectivity check — not baseline-relative.
    ///
    /// Fails at 100 % loss, fails above 50 % loss, and fails with a
    /// distinct message when the snapshot carries no latency metrics at
    /// all; anything else passes.
    #[must_use]
    pub fn validate_connectivity(&self, snapshot: &TelemetrySnapshot) -> Verdict {
        let (status, evidence) = match &snapshot.latency {
            None => (
                VerdictStatus::Fail,
                vec!["Connectivity validation failed: no latency metrics available".to_string()],
            ),
            Some(latency) if latency.packet_loss_percent >= 100.0 => (
                VerdictStatus::Fail,
                vec!["Connectivity failed: 100% packet loss".to_string()],
            ),
            Some(latency) if latency.packet_loss_percent > 50.0 => (
                VerdictStatus::Fail,
                vec![format!(
                    "Connectivity degraded: {:.2}% packet loss",
                    latency.packet_loss_percent
                )],
            ),
            Some(latency) => (
                VerdictStatus::Pass,
                vec![format!(
                    "Connectivity OK: {:.2}% packet loss, {:.2}ms latency",
                    latency.packet_loss_percent, latency.avg_latency_ms
                )],
            ),
        };

        let message = match status {
            VerdictStatus::Fail => "Connectivity validation: fail",
            _ => "Connectivity validation: pass",
        };

        Verdict {
            status,
            message: message.to_string(),
            evidence,
            baseline: None,
            current: Some(snapshot.clone()),
        }
    }
}
