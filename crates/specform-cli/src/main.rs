//! Specform CLI
//!
//! Main entry point for the `specform` binary.

use std::process::ExitCode;

use clap::Parser;
use specform_common_config::load_dotenv;
use specform_common_log::{LogConfig, LogLevel};
use tracing::{error, warn};

mod cli;
mod commands;
mod error;
mod output;

use cli::Cli;
use error::CliError;

/// Application exit codes
#[repr(u8)]
pub enum Exit {
    Success = 0,
    GeneralError = 1,
    ConfigError = 2,
    IoError = 3,
    ValidationError = 5,
}

impl From<Exit> for ExitCode {
    fn from(exit: Exit) -> Self {
        ExitCode::from(exit as u8)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let env_result = load_dotenv(&cli.project_dir());

    if let Err(e) = init_logging(&cli) {
        eprintln!("{e}");
        return e.exit_code().into();
    }
    if let Err(e) = env_result {
        warn!("{e}");
    }

    match cli.run() {
        Ok(()) => Exit::Success.into(),
        Err(e) => {
            error!("{e}");
            e.exit_code().into()
        }
    }
}

fn init_logging(cli: &Cli) -> Result<(), CliError> {
    let mut config = LogConfig::from_env();
    config.level = LogLevel::from_verbosity(cli.verbose, cli.quiet, config.level);
    config.force_level = cli.verbose > 0 || cli.quiet;
    specform_common_log::init(config)?;
    Ok(())
}
