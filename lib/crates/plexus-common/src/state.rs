//! Desired-state document model.
//!
//! The declarative description of the target network: topology (nodes and
//! links) plus per-device configuration intent. Loaded from YAML by the
//! CLI's infra layer; [`DesiredState::validate`] enforces the schema rules
//! that loading alone cannot express.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading or validating a desired-state document.
#[derive(Debug, Error)]
pub enum StateError {
    #[error("Desired state file not found: {0}")]
    FileNotFound(String),

    #[error("Invalid YAML syntax: {0}")]
    InvalidYaml(String),

    #[error("Missing required key in desired state: {0}")]
    MissingKey(&'static str),

    #[error("Device '{device}' missing required field: {field}")]
    MissingDeviceField { device: String, field: &'static str },

    #[error("Device '{0}' not found in desired state")]
    UnknownDevice(String),
}

/// Top-level desired-state document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesiredState {
    pub topology: Topology,
    /// Device name → configuration intent. BTreeMap keeps deployment
    /// order deterministic across runs.
    pub devices: BTreeMap<String, DeviceSpec>,
}

/// Topology section: the nodes and links the fabric is built from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Topology {
    pub nodes: Vec<NodeSpec>,
    pub links: Vec<LinkSpec>,
}

/// One fabric node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeSpec {
    pub name: String,
    #[serde(rename = "type", default)]
    pub node_type: Option<String>,
}

/// One fabric link between two named nodes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkSpec {
    pub from: String,
    pub to: String,
    /// Link delay, e.g. `"5ms"`, when the fabric supports shaping.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay: Option<String>,
    /// Link bandwidth in Mbit/s, when the fabric supports shaping.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bandwidth: Option<u32>,
}

/// Per-device configuration intent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceSpec {
    /// Device type tag: `switch`, `host`, `router`, or `default`.
    /// Serialized as `type`; optional in YAML so that validation (not
    /// deserialization) can report which device is missing it.
    #[serde(rename = "type", default)]
    pub device_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interfaces: Vec<InterfaceSpec>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub routes: Vec<RouteSpec>,
}

/// Interface configuration intent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterfaceSpec {
    pub name: String,
    pub ip: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub netmask: Option<String>,
}

/// Static route intent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteSpec {
    pub network: String,
    pub next_hop: String,
}

impl DesiredState {
    /// Validate the document structure beyond what deserialization checks.
    ///
    /// Every device must declare a `type`; the topology must carry both
    /// `nodes` and `links` sections (enforced by the field types) with at
    /// least one node.
    ///
    /// # Errors
    ///
    /// Returns [`StateError`] naming the first offending key or device.
    pub fn validate(&self) -> Result<(), StateError> {
        if self.topology.nodes.is_empty() {
            return Err(StateError::MissingKey("topology.nodes"));
        }
        for (name, device) in &self.devices {
            if device.device_type.as_deref().unwrap_or("").is_empty() {
                return Err(StateError::MissingDeviceField {
                    device: name.clone(),
                    field: "type",
                });
            }
        }
        Ok(())
    }

    /// Look up one device's configuration intent.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::UnknownDevice`] when the name is absent.
    pub fn device(&self, name: &str) -> Result<&DeviceSpec, StateError> {
        self.devices
            .get(name)
            .ok_or_else(|| StateError::UnknownDevice(name.to_string()))
    }
}
