//! CLI argument parsing with clap derive

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::app::{AppContext, OutputFlags};
use crate::application::ports::ConfigStore;
use crate::commands;
use crate::commands::rollover::RolloverArgs;
use crate::domain::GatewayKind;
use crate::infra::config::YamlConfigStore;

/// Roll http traffic from one application to another
#[derive(Parser)]
#[command(
    name = "scaleover",
    version,
    args_conflicts_with_subcommands = true,
    disable_help_subcommand = true,
    override_usage = "scaleover [OPTIONS] SOURCE_APP TARGET_APP ROLLOVER_DURATION"
)]
pub struct Cli {
    /// Suppress status output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(
        long,
        global = true,
        env = "NO_COLOR",
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    pub no_color: bool,

    /// Control-plane transport (overrides the config file)
    #[arg(long, value_enum)]
    pub gateway: Option<GatewayKind>,

    /// Path to the config file
    #[arg(long, env = "SCALEOVER_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,

    /// SOURCE_APP TARGET_APP ROLLOVER_DURATION (e.g. `old new 5m`).
    ///
    /// Options taking a value must come before these.
    #[arg(value_name = "ARGS", num_args = 0.., allow_hyphen_values = true)]
    pub args: Vec<String>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show version
    Version,
}

impl Cli {
    /// Parse `args`, then apply `--quiet` / `--no-color` given after the
    /// positionals, which clap would otherwise keep as positional values.
    ///
    /// # Errors
    ///
    /// Returns the clap error for malformed command lines.
    pub fn try_parse_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let mut cli = Self::try_parse_from(args)?;
        cli.absorb_trailing_flags();
        Ok(cli)
    }

    fn absorb_trailing_flags(&mut self) {
        let mut quiet = self.quiet;
        let mut no_color = self.no_color;
        self.args.retain(|arg| match arg.as_str() {
            "-q" | "--quiet" => {
                quiet = true;
                false
            }
            "--no-color" => {
                no_color = true;
                false
            }
            _ => true,
        });
        self.quiet = quiet;
        self.no_color = no_color;
    }

    /// Output flags for error reporting outside `run`.
    #[must_use]
    pub fn output_flags(&self) -> OutputFlags {
        OutputFlags {
            no_color: self.no_color,
            quiet: self.quiet,
        }
    }

    /// Execute the CLI command.
    ///
    /// Validates the arguments before any configuration or control-plane
    /// access, then drives the rollover on a current-thread runtime.
    ///
    /// # Errors
    ///
    /// Returns an error if validation, configuration, or the rollover fails.
    pub fn run(self) -> Result<ExitCode> {
        let flags = self.output_flags();
        let Cli {
            gateway,
            config,
            command,
            args,
            ..
        } = self;

        if let Some(Command::Version) = command {
            commands::version::run();
            return Ok(ExitCode::SUCCESS);
        }

        let request = RolloverArgs::from_positionals(&args)?;

        let mut config = YamlConfigStore::new(config).load()?;
        if let Some(kind) = gateway {
            config.gateway = kind;
        }

        let _log_guard = crate::logging::init(&config.log_level, flags.no_color);
        tracing::debug!(?config, "configuration loaded");

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("cannot start async runtime")?;

        let app = AppContext::new(flags, config)?;
        runtime.block_on(commands::rollover::run(&app, &request))
    }
}
