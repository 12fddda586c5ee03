//! Application context: unified state passed to every command handler.
//!
//! Built once from the loaded `ScaleoverConfig` and the top-level flags.
//! Nothing here is global: the controller receives its collaborators from
//! this struct.

use anyhow::Result;

use crate::domain::ScaleoverConfig;
use crate::infra::gateway::ControlPlane;
use crate::infra::sleeper::TokioSleeper;
use crate::output::{OutputContext, TerminalStatusLine};

/// Output rendering flags.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress status lines.
    pub quiet: bool,
}

/// Unified application context passed to every command handler.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    /// Control-plane transport.
    pub gateway: ControlPlane,
    /// Inter-step pause.
    pub sleeper: TokioSleeper,
}

impl AppContext {
    /// Construct an `AppContext` from top-level flags and configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured gateway cannot be constructed.
    pub fn new(flags: OutputFlags, config: ScaleoverConfig) -> Result<Self> {
        let gateway = ControlPlane::from_config(&config)?;
        Ok(Self {
            output: OutputContext::new(flags.no_color, flags.quiet),
            gateway,
            sleeper: TokioSleeper,
        })
    }

    /// Status reporter bound to this context's output.
    #[must_use]
    pub fn reporter(&self) -> TerminalStatusLine<'_> {
        TerminalStatusLine::new(&self.output)
    }
}
