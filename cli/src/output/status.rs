//! Presentation-layer implementation of `StatusReporter`.
//!
//! On a terminal the line is redrawn in place with one marker per requested
//! instance (`<` for the source, `>` for the target). Anywhere else each step
//! is printed as a complete line with numeric counts, so logs stay readable.

use std::io::Write as _;

use owo_colors::OwoColorize as _;

use crate::application::ports::StatusReporter;
use crate::domain::ApplicationSnapshot;
use crate::output::{OutputContext, Styles};

/// Terminal status reporter that wraps an `OutputContext`.
pub struct TerminalStatusLine<'a> {
    ctx: &'a OutputContext,
}

impl<'a> TerminalStatusLine<'a> {
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }
}

impl StatusReporter for TerminalStatusLine<'_> {
    fn status(&self, source: &ApplicationSnapshot, target: &ApplicationSnapshot) {
        if self.ctx.interactive() {
            print!("{}", format_interactive(&self.ctx.styles, source, target));
            let _ = std::io::stdout().flush();
        } else if !self.ctx.quiet {
            println!("{}", format_log_line(source, target));
        }
    }

    fn finish(&self) {
        if !self.ctx.quiet {
            println!();
        }
    }
}

/// Redrawable line ending in `\r`, e.g. `old (started) <<< > new (started) \r`.
#[must_use]
pub fn format_interactive(
    styles: &Styles,
    source: &ApplicationSnapshot,
    target: &ApplicationSnapshot,
) -> String {
    let left = "<".repeat(source.requested_instances as usize);
    let right = ">".repeat(target.requested_instances as usize);
    format!(
        "{} ({}) {} {} {} ({}) \r",
        source.name.style(styles.bold),
        source.state.style(styles.dim),
        left.style(styles.warning),
        right.style(styles.success),
        target.name.style(styles.bold),
        target.state.style(styles.dim),
    )
}

/// Self-contained line for non-interactive output.
#[must_use]
pub fn format_log_line(source: &ApplicationSnapshot, target: &ApplicationSnapshot) -> String {
    format!(
        "{} ({}) {} instances, {} ({}) {} instances",
        source.name,
        source.state,
        source.requested_instances,
        target.name,
        target.state,
        target.requested_instances,
    )
}
