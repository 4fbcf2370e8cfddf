//! CLI argument parsing with clap derive

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::application::ports::DEFAULT_EXEC_TIMEOUT;
use crate::commands;
use crate::infra::{BaselineStore, NetnsExecutor, TokioCommandRunner};
use crate::output::OutputContext;

/// Declarative control plane for simulated networks
#[derive(Parser)]
#[command(
    name = "plexus",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Run node commands on the host instead of inside per-node network
    /// namespaces (single-namespace development setups)
    #[arg(long, global = true)]
    pub no_netns: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Deploy desired network configuration from a YAML file
    Deploy(commands::deploy::DeployArgs),

    /// Collect latency and packet-loss telemetry
    Ping(commands::ping::PingArgs),

    /// Collect path visibility telemetry
    Trace(commands::trace::TraceArgs),

    /// Collect interface counters from a node
    Counters(commands::counters::CountersArgs),

    /// Capture and store a baseline telemetry snapshot
    Baseline(commands::baseline::BaselineArgs),

    /// Validate network behavior against the stored baseline
    Validate(commands::validate::ValidateArgs),

    /// Check basic connectivity between two nodes
    Check(commands::check::CheckArgs),

    /// Show version
    Version,
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails.
    pub async fn run(self) -> Result<()> {
        let Cli {
            json,
            quiet,
            no_color,
            no_netns,
            command,
            ..
        } = self;
        let ctx = OutputContext::new(no_color, quiet);
        let runner = TokioCommandRunner::new(DEFAULT_EXEC_TIMEOUT);
        let executor = if no_netns {
            NetnsExecutor::passthrough(runner)
        } else {
            NetnsExecutor::new(runner)
        };

        match command {
            Command::Version => {
                commands::version::run(json);
                Ok(())
            }
            Command::Deploy(args) => commands::deploy::run(&ctx, &executor, json, &args).await,
            Command::Ping(args) => commands::ping::run(&ctx, &executor, json, &args).await,
            Command::Trace(args) => commands::trace::run(&ctx, &executor, json, &args).await,
            Command::Counters(args) => commands::counters::run(&ctx, &executor, json, &args).await,
            Command::Baseline(args) => {
                let store = BaselineStore::new()?;
                commands::baseline::run(&ctx, &executor, &store, json, &args).await
            }
            Command::Validate(args) => {
                let store = BaselineStore::new()?;
                let failed =
                    commands::validate::run(&ctx, &executor, &store, json, &args).await?;
                if failed {
                    std::process::exit(1);
                }
                Ok(())
            }
            Command::Check(args) => {
                let failed = commands::check::run(&ctx, &executor, json, &args).await?;
                if failed {
                    std::process::exit(1);
                }
                Ok(())
            }
        }
    }
}
