//! Output styles using owo-colors stylesheet pattern

use owo_colors::Style;

/// Centralized stylesheet for CLI output colors.
#[derive(Default, Clone)]
pub struct Styles {
    /// Target-side markers (green)
    pub success: Style,
    /// Source-side markers (yellow)
    pub warning: Style,
    /// Error messages (red)
    pub error: Style,
    /// Lifecycle state labels
    pub dim: Style,
    /// Application names
    pub bold: Style,
}

impl Styles {
    /// Apply colors to the stylesheet.
    pub fn colorize(&mut self) {
        self.success = Style::new().green();
        self.warning = Style::new().yellow();
        self.error = Style::new().red();
        self.dim = Style::new().dimmed();
        self.bold = Style::new().bold();
    }
}
