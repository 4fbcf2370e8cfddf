//! Infrastructure implementation of the `SnapshotStore` port.
//!
//! `BaselineStore` provides async load/save of the baseline telemetry
//! snapshot using `tokio::task::spawn_blocking` with atomic write (temp
//! file + rename) to prevent corruption.

use std::path::PathBuf;

use anyhow::{Context, Result};

use plexus_common::metrics::TelemetrySnapshot;

use crate::application::ports::SnapshotStore;

/// Baseline snapshot store — persists to `~/.plexus/baseline.json`.
pub struct BaselineStore {
    path: PathBuf,
}

impl BaselineStore {
    /// Create a store using the default path (`~/.plexus/baseline.json`).
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self> {
        let home =
            dirs::home_dir().ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))?;
        Ok(Self::with_path(home.join(".plexus").join("baseline.json")))
    }

    /// Create a store with an explicit path (used in tests).
    #[must_use]
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    fn load_sync(&self) -> Result<Option<TelemetrySnapshot>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("reading baseline file {}", self.path.display()))?;
        let snapshot: TelemetrySnapshot = serde_json::from_str(&content)
            .with_context(|| format!("parsing baseline file {}", self.path.display()))?;
        Ok(Some(snapshot))
    }

    fn save_sync(&self, snapshot: &TelemetrySnapshot) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating directory {}", parent.display()))?;
        }
        let content = serde_json::to_string_pretty(snapshot).context("serializing baseline")?;

        // Atomic write via temp file then rename.
        let temp_path = self.path.with_extension("json.tmp");
        std::fs::write(&temp_path, &content)
            .with_context(|| format!("writing temp file {}", temp_path.display()))?;
        std::fs::rename(&temp_path, &self.path)
            .with_context(|| format!("finalizing baseline file {}", self.path.display()))?;
        Ok(())
    }

    /// Remove the stored baseline.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be removed.
    pub fn clear(&self) -> Result<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)
                .with_context(|| format!("removing baseline file {}", self.path.display()))?;
        }
        Ok(())
    }
}

impl SnapshotStore for BaselineStore {
    async fn load_async(&self) -> Result<Option<TelemetrySnapshot>> {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || {
            let store = BaselineStore::with_path(path);
            store.load_sync()
        })
        .await
        .context("baseline load task panicked")?
    }

    async fn save_async(&self, snapshot: &TelemetrySnapshot) -> Result<()> {
        let path = self.path.clone();
        let snapshot = snapshot.clone();
        tokio::task::spawn_blocking(move || {
            let store = BaselineStore::with_path(path);
            store.save_sync(&snapshot)
        })
        .await
        .context("baseline save task panicked")?
    }
}
