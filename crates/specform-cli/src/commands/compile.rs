//! `specform compile`

use std::path::PathBuf;

use clap::{Args, ValueHint};
use specform_spec::{compile_file, diagnose, ArtifactWriter};
use tracing::{info, warn};

use crate::cli::CommandContext;
use crate::error::CliError;
use crate::output::{self, FileReport};

/// Compile spec files and write artifacts
#[derive(Debug, Args)]
pub struct CompileCommand {
    /// Spec documents to compile
    #[arg(required = true, value_hint = ValueHint::FilePath)]
    pub files: Vec<PathBuf>,

    /// Output directory (defaults to `output_dir` from config)
    #[arg(short, long, value_hint = ValueHint::DirPath)]
    pub out: Option<PathBuf>,

    /// Write single-line JSON artifacts
    #[arg(long)]
    pub compact: bool,
}

impl CompileCommand {
    pub fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let out = self
            .out
            .clone()
            .unwrap_or_else(|| ctx.config.resolved_output_dir(&ctx.project_dir));

        let mut writer = ArtifactWriter::new(&out);
        if self.compact || !ctx.config.pretty {
            writer = writer.compact();
        }
        info!(out = %out.display(), files = self.files.len(), "compiling specs");

        let reports: Vec<FileReport> = self
            .files
            .iter()
            .map(|file| {
                let prompt = match compile_file(file) {
                    Ok(prompt) => prompt,
                    Err(e) => {
                        warn!(file = %file.display(), stage = ?e.stage(), "{e}");
                        return FileReport::failed(file, &e);
                    }
                };

                match writer.write(&prompt) {
                    Ok(outcome) => {
                        let diagnostics = if ctx.config.lint {
                            diagnose(&prompt)
                        } else {
                            Vec::new()
                        };
                        FileReport::written(file, &prompt, outcome).with_diagnostics(diagnostics)
                    }
                    Err(e) => {
                        warn!(file = %file.display(), "{e}");
                        FileReport::failed(file, &e)
                    }
                }
            })
            .collect();

        output::finish(ctx, &reports)
    }
}
