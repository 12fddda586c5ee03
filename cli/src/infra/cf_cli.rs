//! `ApplicationGateway` backed by the `cf` command-line client.
//!
//! State is read by scraping `cf app NAME`; mutations shell out to
//! `cf start`, `cf stop` and `cf scale -i`. The client must already be
//! logged in and targeted at the space holding both applications.

use std::process::Output;

use anyhow::Result;

use crate::application::ports::{ApplicationGateway, CommandRunner};
use crate::domain::{ApplicationSnapshot, GatewayError, LifecycleState};

const FAILED_MARKER: &str = "FAILED";

/// Gateway that drives the `cf` binary through a `CommandRunner`.
pub struct CfCliGateway<R> {
    runner: R,
    program: String,
}

impl<R: CommandRunner> CfCliGateway<R> {
    #[must_use]
    pub fn new(runner: R, program: impl Into<String>) -> Self {
        Self {
            runner,
            program: program.into(),
        }
    }

    async fn cf(&self, args: &[&str]) -> Result<Output> {
        self.runner
            .run(&self.program, args)
            .await
            .map_err(|e| GatewayError::transport(format!("{e:#}")).into())
    }

    async fn mutate(&self, args: &[&str]) -> Result<()> {
        let output = self.cf(args).await?;
        let lines = output_lines(&output);
        if let Some(message) = failure_message(&lines) {
            return Err(GatewayError::Transport(message).into());
        }
        if !output.status.success() {
            return Err(GatewayError::Transport(fallback_message(&self.program, args, &lines)).into());
        }
        Ok(())
    }
}

impl<R: CommandRunner> ApplicationGateway for CfCliGateway<R> {
    async fn fetch_application(&self, name: &str) -> Result<ApplicationSnapshot> {
        let args = ["app", name];
        let output = self.cf(&args).await?;
        let lines = output_lines(&output);
        if let Some(message) = failure_message(&lines) {
            return Err(classify_failure(name, message).into());
        }
        if !output.status.success() {
            return Err(GatewayError::Transport(fallback_message(&self.program, &args, &lines)).into());
        }
        Ok(parse_app_status(name, &lines)?)
    }

    async fn set_instance_count(&self, name: &str, count: u32) -> Result<()> {
        let count = count.to_string();
        self.mutate(&["scale", "-i", &count, name]).await
    }

    async fn start(&self, name: &str) -> Result<()> {
        self.mutate(&["start", name]).await
    }

    async fn stop(&self, name: &str) -> Result<()> {
        self.mutate(&["stop", name]).await
    }
}

// ── Output parsing ────────────────────────────────────────────────────────────

/// Split stdout then stderr into trimmed lines.
fn output_lines(output: &Output) -> Vec<String> {
    let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
    if !output.stderr.is_empty() {
        text.push('\n');
        text.push_str(&String::from_utf8_lossy(&output.stderr));
    }
    text.lines().map(|l| l.trim().to_string()).collect()
}

/// Extract the error message around a `FAILED` marker.
///
/// Older clients print the reason after the marker, newer ones print it
/// before (on stderr), so look after first and fall back to before.
#[must_use]
pub fn failure_message(lines: &[String]) -> Option<String> {
    let idx = lines.iter().position(|l| l == FAILED_MARKER)?;
    let after = lines[idx + 1..].iter().find(|l| !l.is_empty());
    let before = lines[..idx].iter().rev().find(|l| !l.is_empty());
    Some(
        after
            .or(before)
            .cloned()
            .unwrap_or_else(|| FAILED_MARKER.to_string()),
    )
}

fn classify_failure(name: &str, message: String) -> GatewayError {
    if message.to_ascii_lowercase().contains("not found") {
        GatewayError::NotFound(name.to_string())
    } else {
        GatewayError::Transport(message)
    }
}

fn fallback_message(program: &str, args: &[&str], lines: &[String]) -> String {
    let detail = lines.iter().rev().find(|l| !l.is_empty());
    match detail {
        Some(d) => format!("{program} {} failed: {d}", args.join(" ")),
        None => format!("{program} {} failed", args.join(" ")),
    }
}

fn field<'a>(line: &'a str, key: &str) -> Option<&'a str> {
    line.strip_prefix(key)
        .and_then(|rest| rest.strip_prefix(':'))
        .map(str::trim)
}

/// Parse `cf app` output into a snapshot.
///
/// Reads the first `requested state:` and `instances: RUNNING/REQUESTED`
/// lines. A missing `instances:` line counts as zero instances.
///
/// # Errors
///
/// Returns `GatewayError::Transport` when the state line is absent or the
/// instance counts are not numbers.
pub fn parse_app_status(name: &str, lines: &[String]) -> Result<ApplicationSnapshot, GatewayError> {
    let state = lines
        .iter()
        .find_map(|l| field(l, "requested state"))
        .map(LifecycleState::parse)
        .ok_or_else(|| {
            GatewayError::Transport(format!("could not read requested state of app {name}"))
        })?;

    let (running, requested) = match lines.iter().find_map(|l| field(l, "instances")) {
        Some(counts) => parse_instance_counts(counts).ok_or_else(|| {
            GatewayError::Transport(format!("could not parse instances '{counts}' of app {name}"))
        })?,
        None => (0, 0),
    };

    Ok(ApplicationSnapshot::new(name, state, running, requested))
}

fn parse_instance_counts(counts: &str) -> Option<(u32, u32)> {
    let (running, requested) = counts.split_once('/')?;
    Some((running.trim().parse().ok()?, requested.trim().parse().ok()?))
}
