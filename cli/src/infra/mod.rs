//! Infrastructure layer: concrete implementations of application port traits.
//!
//! This module contains all I/O-performing code: process execution, HTTP
//! calls to the control plane, config files, and timers.
//!
//! Imports from `crate::domain` and `crate::application::ports` are allowed.
//! Imports from `crate::commands` or `crate::output` are forbidden.

pub mod cf_cli;
pub mod cf_config;
#[cfg(feature = "api-gateway")]
pub mod cloud_controller;
pub mod command_runner;
pub mod config;
pub mod gateway;
pub mod sleeper;
