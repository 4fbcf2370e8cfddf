//! Application service — telemetry collection use-case.
//!
//! Owns the external-process boundary for the diagnostic tools: issues the
//! latency probe, the path-trace probe, and the interface-statistics dump
//! through the [`NodeExecutor`] port, then hands the raw text to the pure
//! parsers in `crate::domain::telemetry`. A failed or silent invocation
//! becomes a [`TelemetryError`] here; the parsers themselves never fail.

use plexus_common::metrics::{InterfaceCounter, LatencyMetrics, PathMetrics, TelemetrySnapshot};

use crate::application::ports::{LATENCY_PROBE_TIMEOUT, NodeExecutor, PATH_PROBE_TIMEOUT};
use crate::domain::error::TelemetryError;
use crate::domain::telemetry::{
    first_inet_address, parse_interface_counters, parse_latency, parse_path,
};

/// Default number of latency-probe packets.
pub const DEFAULT_PROBE_COUNT: u32 = 5;

/// Default hop limit for path tracing.
pub const DEFAULT_MAX_HOPS: u32 = 30;

/// Collects network telemetry from fabric nodes.
pub struct TelemetryCollector<'a, E: NodeExecutor> {
    executor: &'a E,
}

impl<'a, E: NodeExecutor> TelemetryCollector<'a, E> {
    #[must_use]
    pub fn new(executor: &'a E) -> Self {
        Self { executor }
    }

    /// Collect latency and packet-loss metrics between two nodes.
    ///
    /// # Errors
    ///
    /// Returns [`TelemetryError::LatencyCollection`] when the probe
    /// invocation fails or produces no output at all.
    pub async fn collect_latency(
        &self,
        source: &str,
        destination: &str,
        count: u32,
    ) -> Result<LatencyMetrics, TelemetryError> {
        let target = self.resolve_destination(destination).await;
        let output = self
            .executor
            .exec_with_timeout(
                source,
                &format!("ping -c {count} -W 2 {target}"),
                LATENCY_PROBE_TIMEOUT,
            )
            .await
            .map_err(|e| TelemetryError::LatencyCollection(e.to_string()))?;
        if output.trim().is_empty() {
            return Err(TelemetryError::LatencyCollection(
                "latency probe produced no output".to_string(),
            ));
        }

        let metrics = parse_latency(&output, source, destination);
        tracing::info!(
            source,
            destination,
            avg_ms = metrics.avg_latency_ms,
            loss_percent = metrics.packet_loss_percent,
            "collected latency metrics"
        );
        Ok(metrics)
    }

    /// Collect path-visibility metrics between two nodes.
    ///
    /// # Errors
    ///
    /// Returns [`TelemetryError::PathCollection`] when the probe
    /// invocation fails or produces no output at all.
    pub async fn collect_path(
        &self,
        source: &str,
        destination: &str,
        max_hops: u32,
    ) -> Result<PathMetrics, TelemetryError> {
        let target = self.resolve_destination(destination).await;
        let output = self
            .executor
            .exec_with_timeout(
                source,
                &format!("traceroute -m {max_hops} {target}"),
                PATH_PROBE_TIMEOUT,
            )
            .await
            .map_err(|e| TelemetryError::PathCollection(e.to_string()))?;
        if output.trim().is_empty() {
            return Err(TelemetryError::PathCollection(
                "path probe produced no output".to_string(),
            ));
        }

        let metrics = parse_path(&output, source, destination);
        tracing::info!(source, destination, hops = metrics.total_hops, "collected path metrics");
        Ok(metrics)
    }

    /// Collect per-interface counters from one node.
    ///
    /// # Errors
    ///
    /// Returns [`TelemetryError::CounterCollection`] when the dump cannot
    /// be read.
    pub async fn collect_interface_counters(
        &self,
        node: &str,
    ) -> Result<Vec<InterfaceCounter>, TelemetryError> {
        let output = self
            .executor
            .exec(node, "cat /proc/net/dev")
            .await
            .map_err(|e| TelemetryError::CounterCollection(e.to_string()))?;
        if output.trim().is_empty() {
            return Err(TelemetryError::CounterCollection(
                "interface statistics dump produced no output".to_string(),
            ));
        }

        let counters = parse_interface_counters(&output);
        tracing::info!(node, interfaces = counters.len(), "collected interface counters");
        Ok(counters)
    }

    /// Collect everything available between two nodes.
    ///
    /// Sub-collections are independent: a failure in one is logged and
    /// leaves its snapshot field empty without touching the metrics
    /// already gathered. Interface counters come from the source node.
    pub async fn collect_all(&self, source: &str, destination: &str) -> TelemetrySnapshot {
        let mut snapshot = TelemetrySnapshot::default();

        match self
            .collect_latency(source, destination, DEFAULT_PROBE_COUNT)
            .await
        {
            Ok(latency) => snapshot.latency = Some(latency),
            Err(error) => tracing::warn!(%error, "latency collection failed"),
        }

        match self.collect_path(source, destination, DEFAULT_MAX_HOPS).await {
            Ok(path) => snapshot.path = Some(path),
            Err(error) => tracing::warn!(%error, "path collection failed"),
        }

        match self.collect_interface_counters(source).await {
            Ok(counters) => snapshot.interfaces = counters,
            Err(error) => tracing::warn!(%error, "interface counter collection failed"),
        }

        tracing::info!(source, destination, "completed telemetry collection");
        snapshot
    }

    /// Resolve a destination node name to its first non-loopback IPv4
    /// address. Falls back to the name itself, which may already be an
    /// address.
    async fn resolve_destination(&self, destination: &str) -> String {
        match self.executor.exec(destination, "ip addr show").await {
            Ok(output) => first_inet_address(&output).unwrap_or_else(|| destination.to_string()),
            Err(_) => destination.to_string(),
        }
    }
}
