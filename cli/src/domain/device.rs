//! Device identity and session-visible state.
//!
//! This module is intentionally free of I/O, async, and external layer
//! imports. Command execution against the backing node happens behind the
//! `NodeExecutor` port; the `Device` itself only tracks identity, connection
//! status, the pending-change flag, and the append-only history of applied
//! configuration lines.

use crate::domain::error::DeviceError;

/// Closed set of device kinds, selected by the desired-state type tag.
///
/// The kind drives interface numbering and the switch-only forwarding
/// sysctls; everything else is uniform across kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceKind {
    Switch,
    Host,
    Router,
    Default,
}

impl DeviceKind {
    /// Parse a desired-state type tag. Unknown tags map to `Default`,
    /// matching the renderer's default-template fallback.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "switch" => Self::Switch,
            "host" => Self::Host,
            "router" => Self::Router,
            _ => Self::Default,
        }
    }

    /// Switch physical ports number from 1; every other kind numbers from 0.
    #[must_use]
    pub fn first_port_numeral(self) -> u32 {
        match self {
            Self::Switch => 1,
            _ => 0,
        }
    }

    #[must_use]
    pub fn is_switch(self) -> bool {
        self == Self::Switch
    }
}

/// One managed network device.
///
/// Created per deployment. While connected, `applied_config` grows
/// monotonically — lines are appended in application order and never
/// reordered or removed.
#[derive(Debug)]
pub struct Device {
    name: String,
    kind: DeviceKind,
    /// Backing node handle in the simulated fabric (a network namespace
    /// name). `None` means the device has no addressable network stack.
    node: Option<String>,
    connected: bool,
    config_pending: bool,
    applied_config: Vec<String>,
}

impl Device {
    #[must_use]
    pub fn new(name: impl Into<String>, kind: DeviceKind, node: Option<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            node,
            connected: false,
            config_pending: false,
            applied_config: Vec::new(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn kind(&self) -> DeviceKind {
        self.kind
    }

    /// The backing node handle, or a `DeviceError` when there is none.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::NoNodeHandle`] for a handle-less device.
    pub fn node(&self) -> Result<&str, DeviceError> {
        self.node
            .as_deref()
            .ok_or_else(|| DeviceError::NoNodeHandle(self.name.clone()))
    }

    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.connected
    }

    #[must_use]
    pub fn has_pending_config(&self) -> bool {
        self.config_pending
    }

    /// Lines applied so far, in application order.
    #[must_use]
    pub fn applied_config(&self) -> &[String] {
        &self.applied_config
    }

    /// Establish the connection. Connecting twice is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::NoNodeHandle`] when the device has no backing
    /// node — there is nothing to connect to.
    pub fn connect(&mut self) -> Result<(), DeviceError> {
        if self.connected {
            tracing::warn!(device = %self.name, "device already connected");
            return Ok(());
        }
        if self.node.is_none() {
            return Err(DeviceError::NoNodeHandle(self.name.clone()));
        }
        self.connected = true;
        tracing::info!(device = %self.name, "connected to device");
        Ok(())
    }

    /// Record one configuration pass: append the processed lines to the
    /// history and mark the change pending.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::NotConnected`] when called while disconnected.
    pub fn record_applied(&mut self, lines: Vec<String>) -> Result<(), DeviceError> {
        if !self.connected {
            return Err(DeviceError::NotConnected(self.name.clone()));
        }
        self.applied_config.extend(lines);
        self.config_pending = true;
        Ok(())
    }

    /// Commit pending changes. Configuration already took effect per-line,
    /// so this only clears the pending flag; committing with nothing
    /// pending is a silent no-op.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::NotConnected`] when called while disconnected.
    pub fn commit(&mut self) -> Result<(), DeviceError> {
        if !self.connected {
            return Err(DeviceError::NotConnected(self.name.clone()));
        }
        if !self.config_pending {
            tracing::debug!(device = %self.name, "no pending configuration");
            return Ok(());
        }
        self.config_pending = false;
        tracing::info!(device = %self.name, "committed configuration changes");
        Ok(())
    }

    /// Drop the connection. Always safe to call, including when already
    /// disconnected.
    pub fn disconnect(&mut self) {
        if !self.connected {
            return;
        }
        self.connected = false;
        tracing::info!(device = %self.name, "disconnected from device");
    }
}
