//! Telemetry parsers — pure text→struct transforms.
//!
//! Diagnostic-tool output varies by environment, so these parsers never
//! fail on merely-unexpected text: a missing summary degrades to
//! zero/empty values. Turning total absence of output or a failed probe
//! invocation into a [`TelemetryError`] is the collection boundary's job
//! (`application::services::telemetry`), not ours.

use std::sync::LazyLock;

use chrono::Utc;
use regex::Regex;

use plexus_common::metrics::{InterfaceCounter, LatencyMetrics, PathHop, PathMetrics};

static PACKET_LOSS_RE: LazyLock<Regex> = LazyLock::new(|| {
    // Safety: compile-time constant pattern — cannot fail.
    #[allow(clippy::expect_used)]
    Regex::new(r"(\d+(?:\.\d+)?)% packet loss").expect("valid regex")
});

/// Matches the `min/avg/max[/mdev] = a/b/c[/d] ms` summary line; the
/// mean-deviation field is ignored.
static LATENCY_SUMMARY_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"min/avg/max[^=]*=\s*([\d.]+)/([\d.]+)/([\d.]+)").expect("valid regex")
});

/// Matches one path-trace hop line: `<n>  <host> (<ip>)  <latency> ms`.
static HOP_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"^\s*(\d+)\s+([^\s(]+)\s*\(([^)]+)\)\s+([\d.]+)\s*ms").expect("valid regex")
});

static INET_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"inet\s+([\d.]+)").expect("valid regex")
});

/// Parse latency-probe output into [`LatencyMetrics`].
///
/// Packet loss comes from the `N% packet loss` summary (0.0 when absent);
/// min/avg/max come from the `min/avg/max... = a/b/c ms` line (all 0.0
/// when absent — a degraded but valid result, never an error).
#[must_use]
pub fn parse_latency(output: &str, source: &str, destination: &str) -> LatencyMetrics {
    let packet_loss = PACKET_LOSS_RE
        .captures(output)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(0.0);

    let summary = LATENCY_SUMMARY_RE.captures(output);
    if summary.is_none() {
        tracing::warn!(source, destination, "latency summary line missing, defaulting to 0.0");
    }
    let (min, avg, max) = summary.map_or((0.0, 0.0, 0.0), |c| {
        let field = |i: usize| {
            c.get(i)
                .and_then(|m| m.as_str().parse::<f64>().ok())
                .unwrap_or(0.0)
        };
        (field(1), field(2), field(3))
    });

    LatencyMetrics {
        source: source.to_string(),
        destination: destination.to_string(),
        min_latency_ms: min,
        avg_latency_ms: avg,
        max_latency_ms: max,
        packet_loss_percent: packet_loss,
        timestamp: Utc::now(),
    }
}

/// Parse path-trace output into [`PathMetrics`].
///
/// Blank lines and the tool's header line are skipped. Hops appear in
/// input order; an unresponsive hop produces no parseable line and is
/// simply absent from the sequence, so `total_hops` counts parsed hops
/// rather than the maximum hop number seen.
#[must_use]
pub fn parse_path(output: &str, source: &str, destination: &str) -> PathMetrics {
    let mut hops = Vec::new();

    for line in output.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with("traceroute") {
            continue;
        }
        let Some(captures) = HOP_LINE_RE.captures(line) else {
            continue;
        };
        let hop_number = captures
            .get(1)
            .and_then(|m| m.as_str().parse::<u32>().ok())
            .unwrap_or(0);
        let hostname = captures.get(2).map(|m| m.as_str());
        let ip_address = captures.get(3).map_or("", |m| m.as_str());
        let latency_ms = captures.get(4).and_then(|m| m.as_str().parse::<f64>().ok());

        hops.push(PathHop {
            hop_number,
            hostname: hostname.filter(|h| *h != "*").map(str::to_string),
            ip_address: ip_address.to_string(),
            latency_ms,
        });
    }

    let total_hops = hops.len();
    PathMetrics {
        source: source.to_string(),
        destination: destination.to_string(),
        hops,
        total_hops,
        timestamp: Utc::now(),
    }
}

/// Parse an interface-statistics dump into per-interface counters.
///
/// Each data line has the shape `<ifname>: <16 whitespace-separated
/// integers>` — a receive block then a transmit block. Positions 0/1/3
/// are received bytes/packets/drops; positions 8/9/11 are sent
/// bytes/packets/drops. Lines with fewer than 16 numeric fields (headers
/// included) are skipped without error.
#[must_use]
pub fn parse_interface_counters(output: &str) -> Vec<InterfaceCounter> {
    let timestamp = Utc::now();
    let mut counters = Vec::new();

    for line in output.lines() {
        let line = line.trim();
        let Some((name, stats)) = line.split_once(':') else {
            continue;
        };
        let fields: Vec<u64> = stats
            .split_whitespace()
            .filter_map(|f| f.parse::<u64>().ok())
            .collect();
        if fields.len() < 16 {
            continue;
        }

        counters.push(InterfaceCounter {
            interface_name: name.trim().to_string(),
            bytes_received: fields[0],
            packets_received: fields[1],
            drops_received: fields[3],
            bytes_sent: fields[8],
            packets_sent: fields[9],
            drops_sent: fields[11],
            timestamp,
        });
    }

    counters
}

/// Extract the first non-loopback IPv4 address from `ip addr show` output.
/// Used to resolve a node name to a probe target.
#[must_use]
pub fn first_inet_address(output: &str) -> Option<String> {
    for line in output.lines() {
        if let Some(captures) = INET_RE.captures(line) {
            let addr = captures.get(1)?.as_str();
            if addr != "127.0.0.1" {
                return Some(addr.to_string());
            }
        }
    }
    None
}
