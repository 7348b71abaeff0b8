//! Wax: project scaffolding for the Qyri package manager.
//!
//! Main entry point for the `wax` binary.

use std::io::{self, IsTerminal};
use std::process::ExitCode;

use clap::Parser;
use tracing::debug;
use wax_common_config::Environment;
use wax_common_log::{LogConfig, LogLevel};

mod cli;
mod commands;
mod error;
mod output;

use cli::Cli;
use error::{finish, install_panic_hook, CliError};
use output::color::ColorMode;

fn main() -> ExitCode {
    install_panic_hook();

    // .env must be loaded before clap reads WAX_CONFIG
    let env = Environment::init();
    let cli = Cli::parse();

    init_tracing(&cli);
    env.log_loaded();

    let format = cli.format;
    let color_mode = ColorMode::from(cli.color);
    let verbose = cli.verbose > 0 || cli.debug;

    let result = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime.block_on(run(cli)),
        Err(e) => Err(CliError::io("failed to start async runtime", e)),
    };

    finish(result, format, color_mode, verbose)
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = cli.load_config()?;
    debug!(?config.scaffold, "configuration loaded");

    cli.execute(config).await
}

fn init_tracing(cli: &Cli) {
    let mut config = LogConfig::from_env()
        .with_ansi(ColorMode::from(cli.color).enabled_for(io::stderr().is_terminal()));

    // Flags win over the environment
    if cli.verbose > 0 || cli.quiet || cli.debug {
        config = config.with_level(LogLevel::from_flags(cli.verbose, cli.quiet, cli.debug));
    }

    if let Err(e) = wax_common_log::init(config) {
        eprintln!("warning: logging disabled: {e}");
    }
}
