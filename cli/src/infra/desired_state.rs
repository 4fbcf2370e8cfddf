//! Desired-state file loading.
//!
//! Reads a YAML document from disk into the typed model and runs its
//! schema validation. All failures surface as [`StateError`] so the CLI
//! can report them uniformly.

use std::path::Path;

use plexus_common::state::{DesiredState, StateError};

/// Load and validate a desired-state YAML file.
///
/// # Errors
///
/// Returns [`StateError`] for a missing file, invalid YAML syntax, or a
/// document that fails schema validation.
pub fn load_desired_state(path: &Path) -> Result<DesiredState, StateError> {
    if !path.exists() {
        return Err(StateError::FileNotFound(path.display().to_string()));
    }
    let content = std::fs::read_to_string(path)
        .map_err(|e| StateError::FileNotFound(format!("{}: {e}", path.display())))?;

    let state: DesiredState =
        serde_yaml::from_str(&content).map_err(|e| StateError::InvalidYaml(e.to_string()))?;
    state.validate()?;

    tracing::info!(
        path = %path.display(),
        nodes = state.topology.nodes.len(),
        devices = state.devices.len(),
        "loaded desired state"
    );
    Ok(state)
}
