//! `plexus validate` — compare current behavior against the baseline.

use anyhow::{Context, Result};
use clap::Args;

use plexus_common::verdict::{Verdict, VerdictStatus};

use crate::application::ports::{NodeExecutor, SnapshotStore};
use crate::application::services::validate::validate_against_baseline;
use crate::commands::ProbeArgs;
use crate::domain::validation::{Validator, ValidatorConfig};
use crate::output::OutputContext;

/// Arguments for the validate command.
#[derive(Args)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub probe: ProbeArgs,

    /// Maximum acceptable average-latency increase over baseline (ms)
    #[arg(long, default_value_t = 50.0)]
    pub latency_threshold: f64,

    /// Maximum acceptable packet-loss increase over baseline (%)
    #[arg(long, default_value_t = 5.0)]
    pub loss_threshold: f64,

    /// Treat a routing-path change as a failure instead of a warning
    #[arg(long)]
    pub fail_on_path_change: bool,
}

/// Run `plexus validate`. Returns whether the verdict failed so the
/// caller can set the exit code.
///
/// # Errors
///
/// Returns an error for invalid thresholds or an unreadable baseline
/// store — never for a failing comparison.
pub async fn run(
    ctx: &OutputContext,
    executor: &impl NodeExecutor,
    store: &impl SnapshotStore,
    json: bool,
    args: &ValidateArgs,
) -> Result<bool> {
    let validator = Validator::new(ValidatorConfig {
        latency_threshold_ms: args.latency_threshold,
        packet_loss_threshold_percent: args.loss_threshold,
        path_change_allowed: !args.fail_on_path_change,
    })?;

    let pb = ctx
        .show_progress()
        .then(|| crate::output::progress::spinner("Collecting telemetry..."));
    let verdict = validate_against_baseline(
        executor,
        store,
        &validator,
        &args.probe.source,
        &args.probe.destination,
    )
    .await;
    if let Some(pb) = pb {
        match &verdict {
            Ok(_) => crate::output::progress::finish_ok(&pb, "Telemetry collected"),
            Err(_) => crate::output::progress::finish_error(&pb, "Telemetry collection failed"),
        }
    }
    let verdict = verdict?;

    print_verdict(ctx, json, &verdict)?;
    Ok(verdict.failed())
}

/// Shared verdict rendering for `validate` and `check`.
pub fn print_verdict(ctx: &OutputContext, json: bool, verdict: &Verdict) -> Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(verdict).context("JSON serialization")?
        );
        return Ok(());
    }

    match verdict.status {
        VerdictStatus::Pass => ctx.success(&verdict.message),
        VerdictStatus::Warning => ctx.warn(&verdict.message),
        VerdictStatus::Fail => ctx.error(&verdict.message),
    }
    if !verdict.evidence.is_empty() {
        ctx.header("Details:");
        for line in &verdict.evidence {
            ctx.kv("-", line);
        }
    }
    Ok(())
}
