//! `scaleover SOURCE_APP TARGET_APP ROLLOVER_DURATION`: roll traffic between two apps.

use std::process::ExitCode;
use std::time::Duration;

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::rollover::{RolloverController, RolloverOutcome};
use crate::domain::{check_usage, parse_rollover_duration};

/// Validated positional arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RolloverArgs {
    pub source: String,
    pub target: String,
    pub duration: Duration,
}

impl RolloverArgs {
    /// Validate the positional arguments that follow the command name.
    ///
    /// # Errors
    ///
    /// Returns a usage error unless exactly three values are given, or a
    /// duration error if the third is malformed or negative.
    pub fn from_positionals(positionals: &[String]) -> Result<Self> {
        let mut argv = Vec::with_capacity(positionals.len() + 1);
        argv.push("scaleover");
        argv.extend(positionals.iter().map(String::as_str));
        check_usage(&argv)?;

        let duration = parse_rollover_duration(argv[3])?;
        Ok(Self {
            source: argv[1].to_string(),
            target: argv[2].to_string(),
            duration,
        })
    }
}

/// Run the rollover.
///
/// # Errors
///
/// Returns the first control-plane error; completed steps are left in place.
pub async fn run(app: &AppContext, args: &RolloverArgs) -> Result<ExitCode> {
    let reporter = app.reporter();
    let controller = RolloverController::new(&app.gateway, &reporter, &app.sleeper);
    let outcome = controller
        .run(&args.source, &args.target, args.duration)
        .await?;

    if let RolloverOutcome::Completed { steps, .. } = outcome {
        tracing::debug!(steps, "rollover finished");
    }
    Ok(ExitCode::SUCCESS)
}
