//! Application snapshot types.
//!
//! Pure data and transitions, no I/O. The controller owns two snapshots for
//! the duration of a rollover and mutates them as each command is issued.

use std::fmt;

/// Lifecycle state reported by the control plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LifecycleState {
    Started,
    Stopped,
    #[default]
    Unknown,
}

impl LifecycleState {
    /// Parse a control-plane state string (`started`, `STOPPED`, ...).
    ///
    /// Anything unrecognised maps to `Unknown`.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "started" => Self::Started,
            "stopped" => Self::Stopped,
            _ => Self::Unknown,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Started => "started",
            Self::Stopped => "stopped",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One application's rollover-relevant state at a point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationSnapshot {
    /// Application name, unique within the targeted space.
    pub name: String,
    /// Current lifecycle state.
    pub state: LifecycleState,
    /// Instances actually running. Informational only.
    pub running_instances: u32,
    /// Instances the control plane is asked to maintain.
    pub requested_instances: u32,
}

impl ApplicationSnapshot {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        state: LifecycleState,
        running_instances: u32,
        requested_instances: u32,
    ) -> Self {
        Self {
            name: name.into(),
            state,
            running_instances,
            requested_instances,
        }
    }

    /// Zero the requested count of a stopped app.
    ///
    /// Cloud Foundry keeps the last instance count on stopped apps; a stopped
    /// app contributes no capacity, so the rollover must count it as zero.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        if self.state == LifecycleState::Stopped {
            self.requested_instances = 0;
        }
        self
    }

    #[must_use]
    pub fn is_started(&self) -> bool {
        self.state == LifecycleState::Started
    }
}
