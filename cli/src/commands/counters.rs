//! `plexus counters` — interface counter telemetry.

use anyhow::{Context, Result};
use clap::Args;

use crate::application::ports::NodeExecutor;
use crate::application::services::telemetry::TelemetryCollector;
use crate::output::OutputContext;

/// Arguments for the counters command.
#[derive(Args)]
pub struct CountersArgs {
    /// Node to collect interface counters from
    pub node: String,
}

/// Run `plexus counters`.
///
/// # Errors
///
/// Returns an error when the statistics dump cannot be read.
pub async fn run(
    ctx: &OutputContext,
    executor: &impl NodeExecutor,
    json: bool,
    args: &CountersArgs,
) -> Result<()> {
    let collector = TelemetryCollector::new(executor);
    let counters = collector.collect_interface_counters(&args.node).await?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&counters).context("JSON serialization")?
        );
        return Ok(());
    }

    ctx.header(&format!("Interface counters: {}", args.node));
    for counter in &counters {
        ctx.kv(
            &format!("{}:", counter.interface_name),
            &format!(
                "rx {} B / {} pkts / {} drops, tx {} B / {} pkts / {} drops",
                counter.bytes_received,
                counter.packets_received,
                counter.drops_received,
                counter.bytes_sent,
                counter.packets_sent,
                counter.drops_sent,
            ),
        );
    }
    Ok(())
}
