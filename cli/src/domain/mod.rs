//! Domain layer: pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod app;
pub mod config;
pub mod duration;
pub mod error;
pub mod plan;
pub mod usage;

pub use app::{ApplicationSnapshot, LifecycleState};
pub use config::{GatewayKind, ScaleoverConfig};
pub use duration::{parse_rollover_duration, parse_signed};
pub use error::{GatewayError, RolloverError};
pub use plan::RolloverPlan;
pub use usage::{USAGE, check_usage};
