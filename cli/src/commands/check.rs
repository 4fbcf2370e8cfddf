//! `plexus check` — absolute connectivity validation.

use anyhow::Result;
use clap::Args;

use crate::application::ports::NodeExecutor;
use crate::application::services::validate::check_connectivity;
use crate::commands::ProbeArgs;
use crate::commands::validate::print_verdict;
use crate::domain::validation::{Validator, ValidatorConfig};
use crate::output::OutputContext;

/// Arguments for the check command.
#[derive(Args)]
pub struct CheckArgs {
    #[command(flatten)]
    pub probe: ProbeArgs,
}

/// Run `plexus check`. Returns whether the verdict failed so the caller
/// can set the exit code.
///
/// # Errors
///
/// Returns an error only for rendering failures — the connectivity
/// judgment itself is always a verdict.
pub async fn run(
    ctx: &OutputContext,
    executor: &impl NodeExecutor,
    json: bool,
    args: &CheckArgs,
) -> Result<bool> {
    let validator = Validator::new(ValidatorConfig::default())?;
    let verdict =
        check_connectivity(executor, &validator, &args.probe.source, &args.probe.destination)
            .await;

    print_verdict(ctx, json, &verdict)?;
    Ok(verdict.failed())
}
