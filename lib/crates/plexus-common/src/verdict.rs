//! Validation verdicts.
//!
//! The validator's structured output: an overall status, a fixed summary
//! line, and the per-check evidence strings that justify it.

use serde::{Deserialize, Serialize};

use crate::metrics::TelemetrySnapshot;

/// Outcome severity, ordered Pass < Warning < Fail.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum VerdictStatus {
    Pass,
    Warning,
    Fail,
}

/// Result of comparing two telemetry snapshots (or one absolute check).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Verdict {
    pub status: VerdictStatus,
    /// Fixed summary line: passed/failed wording chosen by Fail-or-not.
    pub message: String,
    /// Evidence lines in sub-check order: latency, loss, path.
    pub evidence: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub baseline: Option<TelemetrySnapshot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current: Option<TelemetrySnapshot>,
}

impl Verdict {
    /// True only for a Fail verdict. A Warning verdict is non-failing:
    /// it keeps the passed summary line and a zero exit code.
    #[must_use]
    pub fn failed(&self) -> bool {
        self.status == VerdictStatus::Fail
    }
}
