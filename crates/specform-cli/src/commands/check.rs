//! `specform check`

use std::path::PathBuf;

use clap::{Args, ValueHint};
use specform_spec::{compile_file, diagnose};
use tracing::warn;

use crate::cli::CommandContext;
use crate::error::CliError;
use crate::output::{self, FileReport};

/// Compile spec files without writing anything
#[derive(Debug, Args)]
pub struct CheckCommand {
    /// Spec documents to check
    #[arg(required = true, value_hint = ValueHint::FilePath)]
    pub files: Vec<PathBuf>,
}

impl CheckCommand {
    pub fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let reports: Vec<FileReport> = self
            .files
            .iter()
            .map(|file| match compile_file(file) {
                Ok(prompt) => FileReport::checked(file, &prompt).with_diagnostics(diagnose(&prompt)),
                Err(e) => {
                    warn!(file = %file.display(), stage = ?e.stage(), "{e}");
                    FileReport::failed(file, &e)
                }
            })
            .collect();

        output::finish(ctx, &reports)
    }
}
