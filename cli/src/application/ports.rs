//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain`, never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::path::PathBuf;
use std::process::Output;
use std::time::Duration;

use anyhow::Result;

use crate::domain::{ApplicationSnapshot, ScaleoverConfig};

// ── Control Plane Port ────────────────────────────────────────────────────────

/// Reads and mutates application state on the control plane.
///
/// Every method returns once the control plane has acknowledged the request;
/// implementations do not wait for instances to converge. Failures carry a
/// `GatewayError` (`NotFound` or `Transport`) inside the `anyhow::Error`.
#[allow(async_fn_in_trait)]
pub trait ApplicationGateway {
    /// Look up an application by exact name. The snapshot is returned as
    /// reported; callers apply `ApplicationSnapshot::normalized`.
    async fn fetch_application(&self, name: &str) -> Result<ApplicationSnapshot>;
    /// Ask the control plane to maintain `count` instances. Idempotent.
    async fn set_instance_count(&self, name: &str, count: u32) -> Result<()>;
    /// Start a stopped application.
    async fn start(&self, name: &str) -> Result<()>;
    /// Stop a running application.
    async fn stop(&self, name: &str) -> Result<()>;
}

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program and capture its output.
    ///
    /// Implementations should delegate to `run_with_timeout` using the
    /// instance's configured default timeout.
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output>;
    /// Run a program with a custom timeout override.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or exceeds `timeout`.
    /// On timeout, the child process must be killed (not left orphaned).
    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<Output>;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Renders the rollover status line. Synchronous.
pub trait StatusReporter {
    /// Show the current state of both applications.
    fn status(&self, source: &ApplicationSnapshot, target: &ApplicationSnapshot);
    /// Terminate the status output once the rollover is over.
    fn finish(&self);
}

// ── Pause Port ────────────────────────────────────────────────────────────────

/// Suspends the rollover between steps.
#[allow(async_fn_in_trait)]
pub trait Sleeper {
    async fn sleep(&self, interval: Duration);
}

// ── Config Port ───────────────────────────────────────────────────────────────

/// Abstracts loading of the scaleover configuration file.
pub trait ConfigStore {
    /// Load the configuration, returning defaults when no file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    fn load(&self) -> Result<ScaleoverConfig>;
    /// Location of the configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    fn path(&self) -> Result<PathBuf>;
}
