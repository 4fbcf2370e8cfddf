//! `plexus baseline` — capture and persist a baseline snapshot.

use anyhow::{Context, Result};
use clap::Args;

use crate::application::ports::{NodeExecutor, SnapshotStore};
use crate::application::services::validate::capture_baseline;
use crate::commands::ProbeArgs;
use crate::output::OutputContext;

/// Arguments for the baseline command.
#[derive(Args)]
pub struct BaselineArgs {
    #[command(flatten)]
    pub probe: ProbeArgs,
}

/// Run `plexus baseline`.
///
/// # Errors
///
/// Returns an error when collection yields nothing or the snapshot cannot
/// be persisted.
pub async fn run(
    ctx: &OutputContext,
    executor: &impl NodeExecutor,
    store: &impl SnapshotStore,
    json: bool,
    args: &BaselineArgs,
) -> Result<()> {
    let snapshot =
        capture_baseline(executor, store, &args.probe.source, &args.probe.destination).await?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&snapshot).context("JSON serialization")?
        );
        return Ok(());
    }

    ctx.success(&format!(
        "Baseline captured: {} -> {}",
        args.probe.source, args.probe.destination
    ));
    if let Some(latency) = &snapshot.latency {
        ctx.kv(
            "Latency:",
            &format!(
                "avg {:.2}ms, loss {:.2}%",
                latency.avg_latency_ms, latency.packet_loss_percent
            ),
        );
    }
    if let Some(path) = &snapshot.path {
        ctx.kv("Path:", &format!("{} hops", path.total_hops));
    }
    if !snapshot.interfaces.is_empty() {
        ctx.kv("Interfaces:", &snapshot.interfaces.len().to_string());
    }
    Ok(())
}
