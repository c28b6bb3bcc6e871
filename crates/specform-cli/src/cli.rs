//! CLI argument definitions using clap derive macros.

use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser, Subcommand, ValueHint};
use specform_common_config::{ConfigLoader, SpecformConfig};

use crate::commands::{CheckCommand, CompileCommand, CompletionsCommand};
use crate::error::CliError;

/// Specform - compile prompt spec documents into versioned artifacts
#[derive(Debug, Parser)]
#[command(
    name = "specform",
    author,
    version,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Increase verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Project root holding `.specform/config.yaml`
    #[arg(
        short = 'C',
        long,
        global = true,
        env = "SPECFORM_PROJECT",
        value_hint = ValueHint::DirPath
    )]
    pub project: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "text", value_enum)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Available subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compile spec files and write artifacts
    Compile(CompileCommand),

    /// Compile spec files without writing anything
    Check(CheckCommand),

    /// Generate shell completions
    #[command(hide = true)]
    Completions(CompletionsCommand),
}

impl Cli {
    /// Project root, defaulting to the current directory.
    pub fn project_dir(&self) -> PathBuf {
        self.project
            .clone()
            .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
    }

    /// Load configuration for the project root, honouring `SPECFORM_CONFIG`.
    pub fn load_config(&self, project_dir: &Path) -> Result<SpecformConfig, CliError> {
        Ok(ConfigLoader::from_env(project_dir).load()?)
    }

    /// Execute the selected command
    pub fn run(self) -> Result<(), CliError> {
        if let Command::Completions(cmd) = &self.command {
            return cmd.execute();
        }

        let project_dir = self.project_dir();
        let config = self.load_config(&project_dir)?;
        let ctx = CommandContext {
            config,
            project_dir,
            format: self.format,
            quiet: self.quiet,
        };

        match self.command {
            Command::Compile(cmd) => cmd.execute(&ctx),
            Command::Check(cmd) => cmd.execute(&ctx),
            Command::Completions(_) => Ok(()),
        }
    }
}

/// Context passed to all commands
#[derive(Debug)]
pub struct CommandContext {
    pub config: SpecformConfig,
    pub project_dir: PathBuf,
    pub format: OutputFormat,
    pub quiet: bool,
}
