//! Port trait definitions for the application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain` and `plexus_common` — never
//! from `crate::infra`, `crate::commands`, or `crate::output`.

use std::process::Output;
use std::time::Duration;

use anyhow::Result;

use plexus_common::metrics::TelemetrySnapshot;

/// Default timeout for device-level configuration commands.
pub const DEFAULT_EXEC_TIMEOUT: Duration = Duration::from_secs(10);

/// Timeout for one latency-probe run.
pub const LATENCY_PROBE_TIMEOUT: Duration = Duration::from_secs(30);

/// Timeout for one path-trace run.
pub const PATH_PROBE_TIMEOUT: Duration = Duration::from_secs(60);

// ── Node execution port ───────────────────────────────────────────────────────

/// Executes one shell-level command against a named fabric node and
/// returns its combined text output.
///
/// The engine never interprets exit codes — only text content — so
/// implementations must fold stdout and stderr into the returned string
/// and reserve `Err` for invocation failures (spawn error, timeout).
#[allow(async_fn_in_trait)]
pub trait NodeExecutor {
    /// Execute with the default timeout.
    async fn exec(&self, node: &str, command: &str) -> Result<String>;

    /// Execute with a custom timeout (probe tools run longer than
    /// configuration commands).
    async fn exec_with_timeout(
        &self,
        node: &str,
        command: &str,
        timeout: Duration,
    ) -> Result<String>;
}

// ── Command runner port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program and capture its output.
    ///
    /// Implementations should delegate to `run_with_timeout` using the
    /// instance's configured default timeout.
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output>;

    /// Run a program with a custom timeout override.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or exceeds
    /// `timeout`. On timeout, the child process must be killed (not left
    /// orphaned).
    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<Output>;
}

// ── Progress reporting port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the presentation layer. Sync trait — no async needed.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
}

// ── Snapshot persistence port ─────────────────────────────────────────────────

/// Abstracts baseline-snapshot persistence (load/save).
#[allow(async_fn_in_trait)]
pub trait SnapshotStore {
    /// Load the stored baseline, returning `None` if no baseline exists.
    async fn load_async(&self) -> Result<Option<TelemetrySnapshot>>;
    /// Persist the given snapshot as the new baseline.
    async fn save_async(&self, snapshot: &TelemetrySnapshot) -> Result<()>;
}
