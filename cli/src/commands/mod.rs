//! Command implementations

pub mod baseline;
pub mod check;
pub mod counters;
pub mod deploy;
pub mod ping;
pub mod trace;
pub mod validate;
pub mod version;

use clap::Args;

/// Arguments shared by the probe commands: a source node and a
/// destination node (name or address).
#[derive(Args)]
pub struct ProbeArgs {
    /// Source node name
    pub source: String,

    /// Destination node name or IP address
    pub destination: String,
}
