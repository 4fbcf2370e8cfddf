//! Domain layer — pure engine logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or
//! `std::net`. All functions are synchronous and take data in, returning
//! data out.

pub mod config;
pub mod device;
pub mod error;
pub mod render;
pub mod telemetry;
pub mod validation;

pub use config::{Directive, config_lines, mask_to_cidr, normalize_network, parse_directive,
    resolve_port_numeral, target_interface};
pub use device::{Device, DeviceKind};
pub use error::{DeviceError, TelemetryError, ValidationError};
pub use render::render_device_config;
pub use validation::{Validator, ValidatorConfig};
