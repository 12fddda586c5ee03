//! Positional argument validation.

use anyhow::Result;

use crate::domain::error::RolloverError;

/// Usage text printed when the positional argument count is wrong.
pub const USAGE: &str = "Usage: scaleover\n\tscaleover SOURCE_APP TARGET_APP ROLLOVER_DURATION";

/// Command name followed by source app, target app and duration.
pub const EXPECTED_ARGS: usize = 4;

/// Validate an argument list of the form `[command, source, target, duration]`.
///
/// # Errors
///
/// Returns `RolloverError::Usage` unless exactly four entries are present.
pub fn check_usage<S: AsRef<str>>(args: &[S]) -> Result<()> {
    if args.len() != EXPECTED_ARGS {
        return Err(RolloverError::Usage.into());
    }
    Ok(())
}
