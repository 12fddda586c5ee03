//! Scaleover CLI - roll traffic from one Cloud Foundry application to another

use std::panic::{self, AssertUnwindSafe};
use std::process::ExitCode;

use clap::error::ErrorKind;

use scaleover_cli::cli::Cli;
use scaleover_cli::domain::USAGE;
use scaleover_cli::logging;
use scaleover_cli::output::OutputContext;

fn main() -> ExitCode {
    let cli = match Cli::try_parse_args(std::env::args_os()) {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            let _ = e.print();
            println!("{USAGE}");
            return ExitCode::FAILURE;
        }
    };

    let flags = cli.output_flags();
    let ctx = OutputContext::new(flags.no_color, flags.quiet);

    // Replaced by the configured filter once `Cli::run` has loaded the
    // config; until then panics and errors still reach stderr.
    let _log_guard = logging::init(logging::DEFAULT_LEVEL, flags.no_color);

    // Panics become an ordinary error exit instead of a backtrace.
    panic::set_hook(Box::new(|info| {
        tracing::error!(%info, "panic");
    }));

    match panic::catch_unwind(AssertUnwindSafe(|| cli.run())) {
        Ok(Ok(code)) => code,
        Ok(Err(e)) => {
            ctx.fail(&format!("{e:#}"));
            ExitCode::FAILURE
        }
        Err(payload) => {
            ctx.fail(&format!("unexpected failure: {}", panic_message(payload.as_ref())));
            ExitCode::FAILURE
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("panic")
}
