//! Shared types for the plexus control plane.
//!
//! These are the wire shapes exchanged between the engine and its
//! presentation layers (CLI today, HTTP later): the declarative
//! desired-state document, telemetry metric records, and validation
//! verdicts. Everything here is plain data — no I/O, no async.

pub mod metrics;
pub mod state;
pub mod verdict;

pub use metrics::{
    InterfaceCounter, LatencyMetrics, PathHop, PathMetrics, TelemetrySnapshot,
};
pub use state::{DesiredState, DeviceSpec, InterfaceSpec, LinkSpec, NodeSpec, RouteSpec,
    StateError, Topology};
pub use verdict::{Verdict, VerdictStatus};
