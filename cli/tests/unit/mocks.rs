//! Shared mock infrastructure for unit tests.
//!
//! Provides canned [`NodeExecutor`], [`ProgressReporter`], and
//! [`SnapshotStore`] implementations so each test file doesn't have to
//! re-define the same boilerplate.

#![allow(clippy::expect_used)]
#![allow(dead_code)] // Not every test file uses every mock

use std::sync::Mutex;
use std::time::Duration;

use anyhow::Result;
use plexus_cli::application::ports::{NodeExecutor, ProgressReporter, SnapshotStore};
use plexus_common::metrics::TelemetrySnapshot;

// ── Mock: recording executor ──────────────────────────────────────────────────

/// Records every executed `(node, command)` pair and answers commands by
/// substring match against configured responses. Unmatched commands
/// return empty output, like a silent device.
pub struct RecordingExecutor {
    calls: Mutex<Vec<(String, String)>>,
    responses: Vec<(String, String)>,
    /// Commands containing any of these substrings fail with an error,
    /// simulating a broken invocation.
    failures: Vec<String>,
}

impl RecordingExecutor {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            responses: Vec::new(),
            failures: Vec::new(),
        }
    }

    /// Answer commands containing `pattern` with `output`.
    #[must_use]
    pub fn respond(mut self, pattern: &str, output: &str) -> Self {
        self.responses.push((pattern.to_string(), output.to_string()));
        self
    }

    /// Fail commands containing `pattern`.
    #[must_use]
    pub fn fail_on(mut self, pattern: &str) -> Self {
        self.failures.push(pattern.to_string());
        self
    }

    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().expect("lock").clone()
    }

    /// The commands executed against one node, in order.
    pub fn commands_for(&self, node: &str) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|(n, _)| n == node)
            .map(|(_, c)| c)
            .collect()
    }
}

impl NodeExecutor for RecordingExecutor {
    async fn exec(&self, node: &str, command: &str) -> Result<String> {
        self.calls
            .lock()
            .expect("lock")
            .push((node.to_string(), command.to_string()));
        for pattern in &self.failures {
            if command.contains(pattern.as_str()) {
                anyhow::bail!("mock failure for command: {command}");
            }
        }
        for (pattern, output) in &self.responses {
            if command.contains(pattern.as_str()) {
                return Ok(output.clone());
            }
        }
        Ok(String::new())
    }

    async fn exec_with_timeout(
        &self,
        node: &str,
        command: &str,
        _timeout: Duration,
    ) -> Result<String> {
        self.exec(node, command).await
    }
}

// ── Mock: no-op progress reporter ─────────────────────────────────────────────

pub struct NoopReporter;

impl ProgressReporter for NoopReporter {
    fn step(&self, _: &str) {}
    fn success(&self, _: &str) {}
    fn warn(&self, _: &str) {}
}

// ── Mock: in-memory snapshot store ────────────────────────────────────────────

pub struct MemoryStore {
    snapshot: Mutex<Option<TelemetrySnapshot>>,
}

impl MemoryStore {
    pub fn empty() -> Self {
        Self {
            snapshot: Mutex::new(None),
        }
    }

    pub fn with_baseline(snapshot: TelemetrySnapshot) -> Self {
        Self {
            snapshot: Mutex::new(Some(snapshot)),
        }
    }

    pub fn stored(&self) -> Option<TelemetrySnapshot> {
        self.snapshot.lock().expect("lock").clone()
    }
}

impl SnapshotStore for MemoryStore {
    async fn load_async(&self) -> Result<Option<TelemetrySnapshot>> {
        Ok(self.snapshot.lock().expect("lock").clone())
    }

    async fn save_async(&self, snapshot: &TelemetrySnapshot) -> Result<()> {
        *self.snapshot.lock().expect("lock") = Some(snapshot.clone());
        Ok(())
    }
}
