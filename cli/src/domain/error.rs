//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to
//! `anyhow::Error` via the `?` operator.

use thiserror::Error;

// ── Device errors ─────────────────────────────────────────────────────────────

/// Errors raised by device lifecycle operations (connect, deploy, commit,
/// disconnect). Always surfaced to the caller — never silently swallowed.
///
/// Per-line configuration failures are NOT represented here: the
/// interpreter logs and skips them without aborting the pass.
#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("Device '{0}' not connected")]
    NotConnected(String),

    #[error("Cannot reach device '{0}': no backing node handle")]
    NoNodeHandle(String),

    #[error("Failed to deploy configuration to device '{device}': {reason}")]
    DeployFailed { device: String, reason: String },
}

// ── Telemetry errors ──────────────────────────────────────────────────────────

/// Errors raised at the telemetry collection boundary when a diagnostic
/// invocation itself fails (timeout, process error, unresolvable target).
///
/// The parsers never raise this — unexpected text degrades to zero/empty
/// values instead.
#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("Failed to collect latency metrics: {0}")]
    LatencyCollection(String),

    #[error("Failed to collect path metrics: {0}")]
    PathCollection(String),

    #[error("Failed to collect interface counters: {0}")]
    CounterCollection(String),
}

// ── Validation errors ─────────────────────────────────────────────────────────

/// Errors reserved for validator misconfiguration. Comparison outcomes are
/// never errors, only verdicts.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid {name} threshold: {value} (must be non-negative)")]
    InvalidThreshold { name: &'static str, value: f64 },
}
