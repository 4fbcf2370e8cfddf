//! Infrastructure layer — concrete implementations of application port
//! traits.
//!
//! This module contains all I/O-performing code: process execution inside
//! fabric namespaces, baseline persistence, and desired-state file
//! loading. Imports from `crate::domain` and `crate::application::ports`
//! are allowed; imports from `crate::commands` or `crate::output` are
//! forbidden.

pub mod command_runner;
pub mod desired_state;
pub mod executor;
pub mod state;

pub use command_runner::TokioCommandRunner;
pub use desired_state::load_desired_state;
pub use executor::NetnsExecutor;
pub use state::BaselineStore;
