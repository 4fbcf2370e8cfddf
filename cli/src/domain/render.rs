//! Per-device configuration rendering.
//!
//! Turns a device's desired-state intent into the line-oriented command
//! script the interpreter consumes: a comment header, a `hostname` line,
//! one `interface` block per interface with its indented `ip address`
//! member, and one `ip route` line per static route. Pure text
//! generation — deployment happens elsewhere.

use plexus_common::state::DeviceSpec;

/// Render the configuration script for one device.
///
/// The hostname falls back to the device name when the intent does not
/// set one. Every device type renders with the same layout; the
/// interpreter's type tag drives the type-specific behavior at apply
/// time, not here.
#[must_use]
pub fn render_device_config(device_name: &str, spec: &DeviceSpec) -> String {
    let device_type = spec.device_type.as_deref().unwrap_or("default");
    let hostname = spec.hostname.as_deref().unwrap_or(device_name);

    let mut lines = vec![
        format!("# Configuration for {device_name} ({device_type})"),
        format!("hostname {hostname}"),
    ];

    for interface in &spec.interfaces {
        lines.push(format!("interface {}", interface.name));
        match &interface.netmask {
            Some(netmask) => lines.push(format!(" ip address {} {netmask}", interface.ip)),
            None => lines.push(format!(" ip address {}", interface.ip)),
        }
    }

    for route in &spec.routes {
        lines.push(format!("ip route {} {}", route.network, route.next_hop));
    }

    let mut rendered = lines.join("\n");
    rendered.push('\n');
    rendered
}
