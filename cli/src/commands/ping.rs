//! `plexus ping` — latency and packet-loss telemetry.

use anyhow::{Context, Result};
use clap::Args;

use crate::application::ports::NodeExecutor;
use crate::application::services::telemetry::TelemetryCollector;
use crate::commands::ProbeArgs;
use crate::output::OutputContext;

/// Arguments for the ping command.
#[derive(Args)]
pub struct PingArgs {
    #[command(flatten)]
    pub probe: ProbeArgs,

    /// Number of probe packets
    #[arg(long, default_value_t = 5)]
    pub count: u32,
}

/// Run `plexus ping`.
///
/// # Errors
///
/// Returns an error when the latency probe fails to run.
pub async fn run(
    ctx: &OutputContext,
    executor: &impl NodeExecutor,
    json: bool,
    args: &PingArgs,
) -> Result<()> {
    let collector = TelemetryCollector::new(executor);
    let metrics = collector
        .collect_latency(&args.probe.source, &args.probe.destination, args.count)
        .await?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&metrics).context("JSON serialization")?
        );
        return Ok(());
    }

    ctx.header(&format!(
        "Latency metrics: {} -> {}",
        args.probe.source, args.probe.destination
    ));
    ctx.kv("Min:", &format!("{:.2}ms", metrics.min_latency_ms));
    ctx.kv("Avg:", &format!("{:.2}ms", metrics.avg_latency_ms));
    ctx.kv("Max:", &format!("{:.2}ms", metrics.max_latency_ms));
    ctx.kv(
        "Packet loss:",
        &format!("{:.2}%", metrics.packet_loss_percent),
    );
    Ok(())
}
