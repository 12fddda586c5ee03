//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use thiserror::Error;

use crate::domain::usage::USAGE;

// ── Input errors ──────────────────────────────────────────────────────────────

/// Errors raised while validating the command line before any control-plane call.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RolloverError {
    #[error("{}", USAGE)]
    Usage,

    #[error("time: invalid duration \"{0}\"")]
    InvalidDuration(String),

    #[error("time: missing unit in duration \"{0}\"")]
    MissingUnit(String),

    #[error("time: unknown unit \"{unit}\" in duration \"{input}\"")]
    UnknownUnit { unit: String, input: String },

    #[error("Duration must be a positive number in the format of 1m")]
    NegativeDuration,
}

// ── Gateway errors ────────────────────────────────────────────────────────────

/// Errors surfaced by an `ApplicationGateway` implementation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GatewayError {
    #[error("App {0} not found")]
    NotFound(String),

    #[error("{0}")]
    Transport(String),
}

impl GatewayError {
    /// Build a transport error from any displayable cause.
    #[must_use]
    pub fn transport(msg: impl std::fmt::Display) -> Self {
        Self::Transport(msg.to_string())
    }
}
