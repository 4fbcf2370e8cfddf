//! Configuration-line grammar.
//!
//! Rendered configuration text is a newline-separated command script using
//! four primitives: `hostname`, `interface`, `ip address`, and `ip route`.
//! Indentation is significant — an indented `ip address` line belongs to
//! the most recently declared `interface` context. This module is the pure
//! half of the interpreter: it classifies lines and resolves targets; the
//! deploy service owns the executor side effects.

use crate::domain::device::DeviceKind;

/// One classified configuration line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// `hostname <name>`
    Hostname(String),
    /// `interface <name>` — selects the interface context; no device-level
    /// operation by itself.
    Interface(String),
    /// `ip address <addr> [<mask>]`, indented or not.
    IpAddress {
        address: String,
        netmask: Option<String>,
    },
    /// `ip route <network> <next-hop>` (never indented).
    IpRoute { network: String, next_hop: String },
    /// Anything else — ignored by the interpreter but still counted.
    Other,
}

/// Split configuration text into the lines the interpreter processes:
/// blank lines and `#` comments are dropped, leading whitespace is
/// preserved (it carries the interface-context meaning).
#[must_use]
pub fn config_lines(config: &str) -> Vec<&str> {
    config
        .lines()
        .filter(|line| {
            let stripped = line.trim();
            !stripped.is_empty() && !stripped.starts_with('#')
        })
        .collect()
}

/// Classify a single configuration line.
#[must_use]
pub fn parse_directive(line: &str) -> Directive {
    let stripped = line.trim();

    if let Some(rest) = stripped.strip_prefix("hostname ") {
        return Directive::Hostname(rest.trim().to_string());
    }

    if let Some(rest) = stripped.strip_prefix("interface ") {
        return Directive::Interface(rest.trim().to_string());
    }

    if let Some(directive) = parse_ip_address(line, stripped) {
        return directive;
    }

    // Route lines are only recognized at top level — an indented route
    // has no meaning in the observed grammar.
    if let Some(rest) = line.strip_prefix("ip route ") {
        let mut parts = rest.split_whitespace();
        if let (Some(network), Some(next_hop)) = (parts.next(), parts.next()) {
            return Directive::IpRoute {
                network: network.to_string(),
                next_hop: next_hop.to_string(),
            };
        }
    }

    Directive::Other
}

/// Match `ip address <addr> [<mask>]` at top level, or anywhere inside an
/// indented line (interface-block member).
fn parse_ip_address(line: &str, stripped: &str) -> Option<Directive> {
    let rest = if let Some(rest) = stripped.strip_prefix("ip address ") {
        rest
    } else if line.starts_with(char::is_whitespace) {
        let idx = stripped.find("ip address ")?;
        &stripped[idx + "ip address ".len()..]
    } else {
        return None;
    };

    let mut parts = rest.split_whitespace();
    let address = parts.next()?.to_string();
    let netmask = parts.next().map(str::to_string);
    Some(Directive::IpAddress { address, netmask })
}

/// Dotted-decimal subnet mask → CIDR prefix length.
///
/// Only the masks observed in rendered configurations are mapped; anything
/// unmapped (or absent) falls back to `/24`.
#[must_use]
pub fn mask_to_cidr(netmask: Option<&str>) -> u8 {
    match netmask {
        Some("255.255.255.0") => 24,
        Some("255.255.0.0") => 16,
        Some("255.0.0.0") => 8,
        _ => 24,
    }
}

/// Resolve the device-level port numeral for an `ip address` line.
///
/// The context name's trailing numeric suffix selects the port. Switches
/// number physical ports from 1, so the context numeral is incremented by
/// one; every other kind uses the numeral as-is. Without a context (or
/// without a numeric suffix) the first port of the kind is used.
#[must_use]
pub fn resolve_port_numeral(context: Option<&str>, kind: DeviceKind) -> u32 {
    let Some(context) = context else {
        return kind.first_port_numeral();
    };
    match trailing_numeral(context) {
        Some(numeral) if kind.is_switch() => numeral + 1,
        Some(numeral) => numeral,
        None => kind.first_port_numeral(),
    }
}

/// The device-level interface name for a resolved port numeral. The fabric
/// names interfaces `<node>-eth<n>`.
#[must_use]
pub fn target_interface(device_name: &str, numeral: u32) -> String {
    format!("{device_name}-eth{numeral}")
}

/// Normalize a route target to CIDR notation, defaulting to `/24`.
#[must_use]
pub fn normalize_network(network: &str) -> String {
    if network.contains('/') {
        network.to_string()
    } else {
        format!("{network}/24")
    }
}

/// Trailing decimal digits of a name, e.g. `eth10` → 10.
fn trailing_numeral(name: &str) -> Option<u32> {
    let digits: String = name
        .chars()
        .rev()
        .take_while(char::is_ascii_digit)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    digits.parse().ok()
}
