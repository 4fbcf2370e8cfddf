//! `plexus deploy` — apply a desired-state document to the fabric.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use crate::application::ports::NodeExecutor;
use crate::application::services::deploy::deploy_desired_state;
use crate::infra::desired_state::load_desired_state;
use crate::output::{OutputContext, TerminalReporter};

/// Arguments for the deploy command.
#[derive(Args)]
pub struct DeployArgs {
    /// Desired-state YAML file
    pub state_file: PathBuf,
}

/// Run `plexus deploy`.
///
/// # Errors
///
/// Returns an error when the desired state cannot be loaded or any device
/// session fails to connect or deploy.
pub async fn run(
    ctx: &OutputContext,
    executor: &impl NodeExecutor,
    json: bool,
    args: &DeployArgs,
) -> Result<()> {
    let state = load_desired_state(&args.state_file)
        .with_context(|| format!("loading desired state from {}", args.state_file.display()))?;

    let reporter = TerminalReporter::new(ctx);
    let deployments = deploy_desired_state(executor, &reporter, &state).await?;

    if json {
        let out = serde_json::json!({
            "state_file": args.state_file.display().to_string(),
            "nodes": state.topology.nodes.len(),
            "links": state.topology.links.len(),
            "devices": deployments,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&out).context("JSON serialization")?
        );
        return Ok(());
    }

    ctx.success(&format!(
        "Deployed network configuration from {}",
        args.state_file.display()
    ));
    ctx.kv(
        "Topology:",
        &format!(
            "{} nodes, {} links",
            state.topology.nodes.len(),
            state.topology.links.len()
        ),
    );
    ctx.kv("Devices configured:", &deployments.len().to_string());
    Ok(())
}
