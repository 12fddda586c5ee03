//! Output formatting module

pub mod status;
pub mod styles;

use console::Term;
use owo_colors::OwoColorize as _;
pub use status::TerminalStatusLine;
pub use styles::Styles;

/// Output context carrying styling and terminal state.
pub struct OutputContext {
    /// Stylesheet for colored output.
    pub styles: Styles,
    /// Whether stdout is a TTY.
    pub is_tty: bool,
    /// Whether to suppress status lines.
    pub quiet: bool,
}

impl OutputContext {
    /// Create output context based on CLI flags and environment.
    #[must_use]
    pub fn new(no_color: bool, quiet: bool) -> Self {
        let is_tty = Term::stdout().is_term();
        Self::with_tty(no_color, quiet, is_tty)
    }

    /// Create output context with an explicit terminal flag.
    #[must_use]
    pub fn with_tty(no_color: bool, quiet: bool, is_tty: bool) -> Self {
        let use_colors = !no_color && is_tty && std::env::var("NO_COLOR").is_err();

        let mut styles = Styles::default();
        if use_colors {
            styles.colorize();
        }

        Self {
            styles,
            is_tty,
            quiet,
        }
    }

    /// Whether the status line should be redrawn in place.
    #[must_use]
    pub fn interactive(&self) -> bool {
        self.is_tty && !self.quiet
    }

    /// Print a failure message to stdout. Never suppressed.
    pub fn fail(&self, msg: &str) {
        println!("{}", msg.style(self.styles.error));
    }
}
