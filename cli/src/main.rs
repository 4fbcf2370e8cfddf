//! Plexus CLI - Declarative control plane for simulated networks

use clap::Parser;
use tracing_subscriber::EnvFilter;

use plexus_cli::cli::Cli;

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "plexus_cli=debug,plexus_common=debug"
    } else {
        "plexus_cli=warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let json = cli.json;
    if let Err(e) = cli.run().await {
        if json {
            let rendered = plexus_cli::output::json::format_error(&format!("{e:#}"), "error")
                .unwrap_or_else(|_| format!("{{\"error\":true,\"message\":\"{e}\"}}"));
            eprintln!("{rendered}");
        } else {
            eprintln!("Error: {e:#}");
        }
        std::process::exit(1);
    }
}
