//! Telemetry metric records.
//!
//! Produced by the telemetry parsers, consumed by the validator and by
//! presentation layers that serialize them. All records are immutable once
//! constructed; timestamps mark collection time, not parse time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Latency and packet-loss metrics from one latency-probe run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LatencyMetrics {
    /// Source node name.
    pub source: String,
    /// Destination node name or address.
    pub destination: String,
    /// Minimum round-trip latency in milliseconds.
    pub min_latency_ms: f64,
    /// Average round-trip latency in milliseconds.
    pub avg_latency_ms: f64,
    /// Maximum round-trip latency in milliseconds.
    pub max_latency_ms: f64,
    /// Packet loss in percent, within `[0, 100]`.
    pub packet_loss_percent: f64,
    /// When the probe ran.
    pub timestamp: DateTime<Utc>,
}

/// A single hop in a traced network path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathHop {
    /// 1-based hop number as reported by the probe.
    pub hop_number: u32,
    /// Resolved hostname; `None` when the probe printed the `*` wildcard.
    pub hostname: Option<String>,
    /// Hop IP address.
    pub ip_address: String,
    /// Hop latency in milliseconds, when reported.
    pub latency_ms: Option<f64>,
}

/// Path visibility metrics from one path-trace run.
///
/// `hops` follows probe output order. Unresponsive hops produce no entry,
/// so `total_hops` counts parsed hops, not the maximum hop number seen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathMetrics {
    pub source: String,
    pub destination: String,
    pub hops: Vec<PathHop>,
    pub total_hops: usize,
    pub timestamp: DateTime<Utc>,
}

/// Counter snapshot for one network interface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterfaceCounter {
    pub interface_name: String,
    pub bytes_sent: u64,
    pub bytes_received: u64,
    pub packets_sent: u64,
    pub packets_received: u64,
    pub drops_sent: u64,
    pub drops_received: u64,
    pub timestamp: DateTime<Utc>,
}

/// Everything collected in one telemetry pass.
///
/// Fields are independently optional: a failed sub-collection leaves its
/// field empty without invalidating the metrics gathered before it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TelemetrySnapshot {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency: Option<LatencyMetrics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathMetrics>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interfaces: Vec<InterfaceCounter>,
}

impl TelemetrySnapshot {
    /// True when no sub-collection produced anything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.latency.is_none() && self.path.is_none() && self.interfaces.is_empty()
    }
}
