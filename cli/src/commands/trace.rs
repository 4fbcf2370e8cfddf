//! `plexus trace` — path visibility telemetry.

use anyhow::{Context, Result};
use clap::Args;

use crate::application::ports::NodeExecutor;
use crate::application::services::telemetry::TelemetryCollector;
use crate::commands::ProbeArgs;
use crate::output::OutputContext;

/// Arguments for the trace command.
#[derive(Args)]
pub struct TraceArgs {
    #[command(flatten)]
    pub probe: ProbeArgs,

    /// Maximum number of hops to trace
    #[arg(long, default_value_t = 30)]
    pub max_hops: u32,
}

/// Run `plexus trace`.
///
/// # Errors
///
/// Returns an error when the path probe fails to run.
pub async fn run(
    ctx: &OutputContext,
    executor: &impl NodeExecutor,
    json: bool,
    args: &TraceArgs,
) -> Result<()> {
    let collector = TelemetryCollector::new(executor);
    let metrics = collector
        .collect_path(&args.probe.source, &args.probe.destination, args.max_hops)
        .await?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&metrics).context("JSON serialization")?
        );
        return Ok(());
    }

    ctx.header(&format!(
        "Path metrics: {} -> {}",
        args.probe.source, args.probe.destination
    ));
    ctx.kv("Total hops:", &metrics.total_hops.to_string());
    for hop in &metrics.hops {
        let hostname = hop.hostname.as_deref().unwrap_or("*");
        let latency = hop
            .latency_ms
            .map_or_else(|| "N/A".to_string(), |ms| format!("{ms:.2}ms"));
        ctx.info(&format!(
            "{}. {hostname} ({}) {latency}",
            hop.hop_number, hop.ip_address
        ));
    }
    Ok(())
}
