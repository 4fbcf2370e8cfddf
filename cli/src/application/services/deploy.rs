//! Application service — configuration deployment use-case.
//!
//! Holds the two halves of configuration application: the line-oriented
//! interpreter ([`apply_config`]) that turns rendered configuration text
//! into idempotent device-level operations, and the session state machine
//! ([`DeviceSession`]) that wraps connect → configure → commit →
//! disconnect around it. Imports only from `crate::domain`,
//! `plexus_common`, and `crate::application::ports`.

use anyhow::Result;

use plexus_common::state::DesiredState;

use crate::application::ports::{NodeExecutor, ProgressReporter};
use crate::domain::config::{
    Directive, config_lines, mask_to_cidr, normalize_network, parse_directive,
    resolve_port_numeral, target_interface,
};
use crate::domain::device::{Device, DeviceKind};
use crate::domain::error::DeviceError;
use crate::domain::render::render_device_config;

// ── Configuration interpreter ─────────────────────────────────────────────────

/// Apply rendered configuration text to a connected device.
///
/// Single order-preserving pass: blank and comment lines are dropped, the
/// interface context resets at the start of every call, and each remaining
/// line is interpreted best-effort — an operational failure on one line is
/// logged and never aborts the rest of the pass. The processed lines are
/// appended to the device history and the device is marked pending.
///
/// Returns the number of lines processed.
///
/// # Errors
///
/// Returns [`DeviceError`] when the device is not connected or has no
/// backing node handle. Per-line failures never surface here.
pub async fn apply_config(
    executor: &impl NodeExecutor,
    device: &mut Device,
    config: &str,
) -> Result<usize, DeviceError> {
    if !device.is_connected() {
        return Err(DeviceError::NotConnected(device.name().to_string()));
    }
    let node = device.node()?.to_string();
    let name = device.name().to_string();
    let kind = device.kind();

    let lines = config_lines(config);
    let mut context: Option<String> = None;

    for &line in &lines {
        match parse_directive(line) {
            Directive::Hostname(hostname) => {
                if let Err(error) = executor.exec(&node, &format!("hostname {hostname}")).await {
                    tracing::warn!(device = %name, line, %error, "failed to apply config line");
                } else {
                    tracing::debug!(device = %name, %hostname, "set hostname");
                }
            }
            Directive::Interface(interface) => {
                tracing::debug!(device = %name, %interface, "selecting interface context");
                context = Some(interface);
            }
            Directive::IpAddress { address, netmask } => {
                let numeral = resolve_port_numeral(context.as_deref(), kind);
                let if_name = target_interface(&name, numeral);
                let cidr = mask_to_cidr(netmask.as_deref());
                if let Err(error) =
                    apply_address(executor, &node, &name, kind, &if_name, &address, cidr).await
                {
                    tracing::warn!(device = %name, line, %error, "failed to apply config line");
                }
            }
            Directive::IpRoute { network, next_hop } => {
                let network = normalize_network(&network);
                if let Err(error) = apply_route(executor, &node, &network, &next_hop).await {
                    tracing::warn!(device = %name, line, %error, "failed to apply config line");
                } else {
                    tracing::debug!(device = %name, %network, %next_hop, "applied static route");
                }
            }
            Directive::Other => {
                tracing::debug!(device = %name, line, "ignoring unrecognized config line");
            }
        }
    }

    let count = lines.len();
    device.record_applied(lines.into_iter().map(str::to_string).collect())?;
    tracing::info!(device = %name, commands = count, "sent configuration to device");
    Ok(count)
}

/// Configure one address on the resolved interface: flush existing
/// addresses, add the new one, bring the interface up, then verify. A
/// "Cannot find device" response and a verification miss are both
/// non-fatal (logged only). Switches additionally get IP forwarding and
/// per-interface ARP policy.
async fn apply_address(
    executor: &impl NodeExecutor,
    node: &str,
    device_name: &str,
    kind: DeviceKind,
    if_name: &str,
    address: &str,
    cidr: u8,
) -> Result<()> {
    executor
        .exec(node, &format!("ip addr flush dev {if_name}"))
        .await?;

    let result = executor
        .exec(node, &format!("ip addr add {address}/{cidr} dev {if_name}"))
        .await?;
    let trimmed = result.trim();
    if !trimmed.is_empty() && !trimmed.contains("Cannot find device") {
        tracing::warn!(interface = if_name, output = trimmed, "unexpected address-add output");
    }

    executor
        .exec(node, &format!("ip link set {if_name} up"))
        .await?;

    if kind.is_switch() {
        executor
            .exec(node, "sysctl -w net.ipv4.ip_forward=1")
            .await?;
        executor
            .exec(
                node,
                &format!("echo 1 > /proc/sys/net/ipv4/conf/{if_name}/proxy_arp"),
            )
            .await?;
        executor
            .exec(
                node,
                &format!("echo 1 > /proc/sys/net/ipv4/conf/{if_name}/arp_ignore"),
            )
            .await?;
        executor
            .exec(
                node,
                &format!("echo 2 > /proc/sys/net/ipv4/conf/{if_name}/arp_announce"),
            )
            .await?;
        tracing::debug!(device = device_name, interface = if_name, "enabled forwarding and ARP policy");
    }

    let verify = executor.exec(node, &format!("ip addr show {if_name}")).await?;
    if verify.contains(address) {
        tracing::info!(device = device_name, interface = if_name, address, "configured address");
    } else {
        tracing::warn!(
            device = device_name,
            interface = if_name,
            address,
            "address not visible on interface after configuration"
        );
    }
    Ok(())
}

/// Replace one static route: remove any existing route for the pair
/// (tolerating "not found"), then add it. "File exists" and "Cannot find
/// device" responses are non-fatal.
async fn apply_route(
    executor: &impl NodeExecutor,
    node: &str,
    network: &str,
    next_hop: &str,
) -> Result<()> {
    // Removal of a route that is not there is expected on first deploy.
    let _ = executor
        .exec(node, &format!("ip route del {network} via {next_hop}"))
        .await;

    let result = executor
        .exec(node, &format!("ip route add {network} via {next_hop}"))
        .await?;
    let trimmed = result.trim();
    if !trimmed.is_empty()
        && !trimmed.contains("File exists")
        && !trimmed.contains("Cannot find device")
    {
        tracing::warn!(network, next_hop, output = trimmed, "unexpected route-add output");
    }
    Ok(())
}

// ── Device session state machine ──────────────────────────────────────────────

/// One configuration-deployment session over a device:
/// `Disconnected → Connected → (Configuring)* → Disconnected`.
///
/// There is no implicit rollback — a failed deploy leaves the session
/// connected and the caller decides what to do next. The exit helpers
/// guarantee that disconnect is attempted exactly once.
pub struct DeviceSession<'a> {
    device: &'a mut Device,
    connected: bool,
}

impl<'a> DeviceSession<'a> {
    #[must_use]
    pub fn new(device: &'a mut Device) -> Self {
        Self {
            device,
            connected: false,
        }
    }

    /// Connect to the device.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError`] when the device has no backing node handle.
    pub fn connect(&mut self) -> Result<(), DeviceError> {
        if self.connected {
            tracing::warn!(device = %self.device.name(), "session already connected");
            return Ok(());
        }
        self.device.connect()?;
        self.connected = true;
        tracing::info!(device = %self.device.name(), "established device session");
        Ok(())
    }

    /// Deploy configuration: apply, then optionally commit.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::NotConnected`] when the session is not
    /// connected, or [`DeviceError::DeployFailed`] wrapping any apply or
    /// commit failure. The session stays connected on failure.
    pub async fn deploy(
        &mut self,
        executor: &impl NodeExecutor,
        config: &str,
        commit: bool,
    ) -> Result<usize, DeviceError> {
        if !self.connected {
            return Err(DeviceError::NotConnected(self.device.name().to_string()));
        }

        tracing::info!(device = %self.device.name(), "deploying configuration");
        let count = apply_config(executor, self.device, config)
            .await
            .map_err(|e| DeviceError::DeployFailed {
                device: self.device.name().to_string(),
                reason: e.to_string(),
            })?;

        if commit {
            self.device
                .commit()
                .map_err(|e| DeviceError::DeployFailed {
                    device: self.device.name().to_string(),
                    reason: e.to_string(),
                })?;
            tracing::info!(device = %self.device.name(), "configuration deployed and committed");
        } else {
            tracing::info!(device = %self.device.name(), "configuration sent (pending commit)");
        }
        Ok(count)
    }

    /// Close the session. Idempotent and always safe to call, including
    /// after a failed deploy.
    pub fn disconnect(&mut self) {
        if !self.connected {
            return;
        }
        self.device.disconnect();
        self.connected = false;
        tracing::info!(device = %self.device.name(), "closed device session");
    }
}

/// Deploy through a scoped session: connect, deploy, and disconnect
/// exactly once on both the success and the failure path.
///
/// # Errors
///
/// Returns [`DeviceError`] from connect or deploy; disconnect itself
/// never fails.
pub async fn deploy_with_session(
    executor: &impl NodeExecutor,
    device: &mut Device,
    config: &str,
    commit: bool,
) -> Result<usize, DeviceError> {
    let mut session = DeviceSession::new(device);
    session.connect()?;
    let result = session.deploy(executor, config, commit).await;
    session.disconnect();
    result
}

// ── Desired-state deployment ──────────────────────────────────────────────────

/// Per-device result of a desired-state deployment.
#[derive(Debug, serde::Serialize)]
pub struct DeviceDeployment {
    pub device: String,
    pub commands: usize,
}

/// Render and deploy every device in the desired state, in deterministic
/// (name) order. Each device gets its own session; the backing node
/// handle is the device's own fabric node name.
///
/// # Errors
///
/// Fails on the first device whose session cannot connect or deploy —
/// partial results up to that point are discarded by the caller.
pub async fn deploy_desired_state(
    executor: &impl NodeExecutor,
    reporter: &impl ProgressReporter,
    state: &DesiredState,
) -> Result<Vec<DeviceDeployment>> {
    state.validate()?;

    let mut deployments = Vec::with_capacity(state.devices.len());
    for (device_name, spec) in &state.devices {
        reporter.step(&format!("configuring {device_name}..."));

        let kind = DeviceKind::from_tag(spec.device_type.as_deref().unwrap_or("default"));
        let mut device = Device::new(device_name.clone(), kind, Some(device_name.clone()));
        let config = render_device_config(device_name, spec);

        let commands = deploy_with_session(executor, &mut device, &config, true).await?;
        reporter.success(&format!("{device_name}: {commands} commands applied"));
        deployments.push(DeviceDeployment {
            device: device_name.clone(),
            commands,
        });
    }
    Ok(deployments)
}
