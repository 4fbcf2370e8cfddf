//! Shared fixture builders for unit tests.

#![allow(dead_code)] // Not every test file uses every helper

use chrono::Utc;
use plexus_common::metrics::{LatencyMetrics, PathHop, PathMetrics, TelemetrySnapshot};

/// Latency probe output with the given loss percentage and rtt summary.
pub fn ping_output(loss_percent: &str, min: f64, avg: f64, max: f64) -> String {
    format!(
        "5 packets transmitted, 5 received, {loss_percent}% packet loss, time 4005ms\n\
         rtt min/avg/max/mdev = {min}/{avg}/{max}/0.1 ms\n"
    )
}

pub fn latency(avg: f64, loss: f64) -> LatencyMetrics {
    LatencyMetrics {
        source: "h1".to_string(),
        destination: "h2".to_string(),
        min_latency_ms: avg / 2.0,
        avg_latency_ms: avg,
        max_latency_ms: avg * 2.0,
        packet_loss_percent: loss,
        timestamp: Utc::now(),
    }
}

pub fn path(ips: &[&str]) -> PathMetrics {
    let hops: Vec<PathHop> = ips
        .iter()
        .enumerate()
        .map(|(i, ip)| PathHop {
            hop_number: u32::try_from(i).expect("small index") + 1,
            hostname: Some((*ip).to_string()),
            ip_address: (*ip).to_string(),
            latency_ms: Some(1.0),
        })
        .collect();
    let total_hops = hops.len();
    PathMetrics {
        source: "h1".to_string(),
        destination: "h2".to_string(),
        hops,
        total_hops,
        timestamp: Utc::now(),
    }
}

pub fn snapshot_with_latency(avg: f64, loss: f64) -> TelemetrySnapshot {
    TelemetrySnapshot {
        latency: Some(latency(avg, loss)),
        path: None,
        interfaces: Vec::new(),
    }
}
