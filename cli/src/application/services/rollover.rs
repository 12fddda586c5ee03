//! Rollover use-case.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! All I/O is routed through injected port traits.

use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::application::ports::{ApplicationGateway, Sleeper, StatusReporter};
use crate::domain::{ApplicationSnapshot, LifecycleState, RolloverPlan};

/// Outcome of the `RolloverController::run` use-case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RolloverOutcome {
    /// The source had no requested instances; no command was issued.
    NothingToRollOver {
        source: ApplicationSnapshot,
        target: ApplicationSnapshot,
    },
    /// Every source instance was handed over to the target.
    Completed {
        steps: u32,
        source: ApplicationSnapshot,
        target: ApplicationSnapshot,
    },
}

/// Add one instance to `app`, starting it first if it is not running.
///
/// # Errors
///
/// Returns the gateway error; `app` keeps whatever state was reached. An app
/// already at `u32::MAX` instances is rejected before any command is issued.
pub async fn scale_up(gateway: &impl ApplicationGateway, app: &mut ApplicationSnapshot) -> Result<()> {
    let next = app
        .requested_instances
        .checked_add(1)
        .with_context(|| format!("cannot scale {} above {} instances", app.name, u32::MAX))?;
    if !app.is_started() {
        debug!(app = %app.name, "starting");
        gateway.start(&app.name).await?;
        app.state = LifecycleState::Started;
    }
    app.requested_instances = next;
    debug!(app = %app.name, instances = app.requested_instances, "scaling up");
    gateway
        .set_instance_count(&app.name, app.requested_instances)
        .await
}

/// Remove one instance from `app`, stopping it when none remain.
///
/// # Errors
///
/// Returns an error if `app` already has no requested instances, or the
/// gateway error.
pub async fn scale_down(
    gateway: &impl ApplicationGateway,
    app: &mut ApplicationSnapshot,
) -> Result<()> {
    app.requested_instances = app
        .requested_instances
        .checked_sub(1)
        .with_context(|| format!("cannot scale {} below zero instances", app.name))?;
    if app.requested_instances == 0 {
        debug!(app = %app.name, "stopping");
        gateway.stop(&app.name).await?;
        app.state = LifecycleState::Stopped;
        Ok(())
    } else {
        debug!(app = %app.name, instances = app.requested_instances, "scaling down");
        gateway
            .set_instance_count(&app.name, app.requested_instances)
            .await
    }
}

/// Drives a rollover from a source application to a target application.
///
/// Holds only borrowed collaborators; the two snapshots live inside `run`
/// and are never re-fetched once the rollover starts.
pub struct RolloverController<'a, G, R, S> {
    gateway: &'a G,
    reporter: &'a R,
    sleeper: &'a S,
}

impl<'a, G, R, S> RolloverController<'a, G, R, S>
where
    G: ApplicationGateway,
    R: StatusReporter,
    S: Sleeper,
{
    #[must_use]
    pub fn new(gateway: &'a G, reporter: &'a R, sleeper: &'a S) -> Self {
        Self {
            gateway,
            reporter,
            sleeper,
        }
    }

    /// Shift all requested instances of `source` onto `target` over `duration`.
    ///
    /// Each step scales the target up before scaling the source down, so the
    /// combined requested capacity never drops below its starting level.
    ///
    /// # Errors
    ///
    /// Returns the first gateway error. Steps already issued are not undone.
    pub async fn run(&self, source: &str, target: &str, duration: Duration) -> Result<RolloverOutcome> {
        let mut source = self.gateway.fetch_application(source).await?.normalized();
        let mut target = self.gateway.fetch_application(target).await?.normalized();

        self.reporter.status(&source, &target);

        let plan = RolloverPlan::new(source.requested_instances, duration);
        if plan.is_noop() {
            info!(source_app = %source.name, "source has no requested instances, nothing to roll over");
            self.reporter.finish();
            return Ok(RolloverOutcome::NothingToRollOver { source, target });
        }

        info!(
            source_app = %source.name,
            target_app = %target.name,
            steps = plan.total_steps,
            interval_ms = u64::try_from(plan.step_interval.as_millis()).unwrap_or(u64::MAX),
            "starting rollover"
        );

        let mut remaining = plan.total_steps;
        while remaining > 0 {
            remaining -= 1;
            scale_up(self.gateway, &mut target).await?;
            scale_down(self.gateway, &mut source).await?;
            debug!(
                step = plan.total_steps - remaining,
                source_instances = source.requested_instances,
                target_instances = target.requested_instances,
                "step complete"
            );
            self.reporter.status(&source, &target);
            if remaining > 0 {
                self.sleeper.sleep(plan.step_interval).await;
            }
        }
        self.reporter.finish();

        info!(source_app = %source.name, target_app = %target.name, "rollover complete");
        Ok(RolloverOutcome::Completed {
            steps: plan.total_steps,
            source,
            target,
        })
    }
}
