//! Domain types for scaleover configuration.
//!
//! Pure types only.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

// ── Config schema ────────────────────────────────────────────────────────────

/// Which transport implements the application gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum GatewayKind {
    /// Drive the `cf` command-line client.
    #[default]
    Cli,
    /// Call the Cloud Controller REST API directly.
    Api,
}

/// Top-level configuration stored in `~/.scaleover/config.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaleoverConfig {
    /// Gateway transport.
    pub gateway: GatewayKind,
    /// Program invoked by the CLI gateway.
    pub cf_binary: String,
    /// Timeout for a single `cf` invocation, in seconds.
    pub command_timeout_secs: u64,
    /// Timeout for a single Cloud Controller request, in seconds.
    pub request_timeout_secs: u64,
    /// Directory holding `.cf/config.json`. Falls back to `CF_HOME`, then `$HOME`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cf_home: Option<PathBuf>,
    /// Default tracing filter when `SCALEOVER_LOG` is unset.
    pub log_level: String,
}

impl Default for ScaleoverConfig {
    fn default() -> Self {
        Self {
            gateway: GatewayKind::Cli,
            cf_binary: "cf".to_string(),
            // `cf start` blocks until staging finishes
            command_timeout_secs: 300,
            request_timeout_secs: 30,
            cf_home: None,
            log_level: "warn".to_string(),
        }
    }
}

impl ScaleoverConfig {
    #[must_use]
    pub fn command_timeout(&self) -> Duration {
        Duration::from_secs(self.command_timeout_secs)
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
