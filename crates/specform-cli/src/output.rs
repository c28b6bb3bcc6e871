//! Per-file reports and their text/JSON rendering.

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use specform_spec::{CompiledPrompt, Diagnostic, Severity, WriteOutcome};

use crate::cli::{CommandContext, OutputFormat};
use crate::error::CliError;

/// What happened to one spec file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Written,
    Unchanged,
    Checked,
    Failed,
}

/// Result of processing one spec file.
#[derive(Debug, Serialize)]
pub struct FileReport {
    pub source: PathBuf,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifact: Option<PathBuf>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FileReport {
    pub fn written(source: &Path, prompt: &CompiledPrompt, outcome: WriteOutcome) -> Self {
        let status = if outcome.is_written() {
            Status::Written
        } else {
            Status::Unchanged
        };
        Self {
            source: source.to_path_buf(),
            status,
            id: Some(prompt.id.clone()),
            artifact: Some(outcome.path().to_path_buf()),
            diagnostics: Vec::new(),
            error: None,
        }
    }

    pub fn checked(source: &Path, prompt: &CompiledPrompt) -> Self {
        Self {
            source: source.to_path_buf(),
            status: Status::Checked,
            id: Some(prompt.id.clone()),
            artifact: None,
            diagnostics: Vec::new(),
            error: None,
        }
    }

    pub fn failed(source: &Path, error: &dyn std::error::Error) -> Self {
        Self {
            source: source.to_path_buf(),
            status: Status::Failed,
            id: None,
            artifact: None,
            diagnostics: Vec::new(),
            error: Some(error.to_string()),
        }
    }

    pub fn with_diagnostics(mut self, diagnostics: Vec<Diagnostic>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    pub fn is_failed(&self) -> bool {
        self.status == Status::Failed
    }

    fn format_text(&self) -> String {
        let source = self.source.display();
        let mut text = match (self.status, &self.artifact, &self.error) {
            (Status::Failed, _, Some(error)) => format!("{source}: error: {error}"),
            (Status::Unchanged, Some(artifact), _) => {
                format!("{source} -> {} (unchanged)", artifact.display())
            }
            (_, Some(artifact), _) => format!("{source} -> {}", artifact.display()),
            _ => format!("{source}: ok ({})", self.id.as_deref().unwrap_or_default()),
        };

        for diagnostic in &self.diagnostics {
            let level = match diagnostic.severity() {
                Severity::Warning => "warning",
                Severity::Info => "info",
            };
            text.push_str(&format!("\n  {level}: {diagnostic}"));
        }
        text
    }
}

/// Print reports in the selected format, then turn failures into an error.
pub fn finish(ctx: &CommandContext, reports: &[FileReport]) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    write_reports(ctx, reports, stdout.lock())?;

    let failed = reports.iter().filter(|r| r.is_failed()).count();
    if failed > 0 {
        return Err(CliError::Failed {
            failed,
            total: reports.len(),
        });
    }
    Ok(())
}

/// Print reports to a writer
pub fn write_reports<W: Write>(
    ctx: &CommandContext,
    reports: &[FileReport],
    mut writer: W,
) -> Result<(), CliError> {
    match ctx.format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, reports)?;
            writeln!(writer)?;
        }
        OutputFormat::Text => {
            for report in reports {
                if ctx.quiet && !report.is_failed() {
                    continue;
                }
                writeln!(writer, "{}", report.format_text())?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use specform_common_config::SpecformConfig;

    fn ctx(format: OutputFormat, quiet: bool) -> CommandContext {
        CommandContext {
            config: SpecformConfig::default(),
            project_dir: PathBuf::from("."),
            format,
            quiet,
        }
    }

    fn prompt() -> CompiledPrompt {
        let doc = "---\ntitle: Report\n---\n```prompt\nHello {{who}}\n```\n";
        specform_spec::compile(doc.as_bytes(), "report.md").unwrap()
    }

    #[test]
    fn test_text_output() {
        let prompt = prompt();
        let written = FileReport::written(
            Path::new("report.md"),
            &prompt,
            WriteOutcome::Written(PathBuf::from("out/report/abc123.prompt.json")),
        )
        .with_diagnostics(specform_spec::diagnose(&prompt));

        let mut buf = Vec::new();
        write_reports(&ctx(OutputFormat::Text, false), &[written], &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.starts_with("report.md -> out/report/abc123.prompt.json\n"));
        assert!(text.contains("  warning: placeholder `{{who}}` has no matching input"));
    }

    #[test]
    fn test_quiet_only_prints_failures() {
        let prompt = prompt();
        let ok = FileReport::checked(Path::new("ok.md"), &prompt);
        let err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let failed = FileReport::failed(Path::new("bad.md"), &err);

        let mut buf = Vec::new();
        write_reports(&ctx(OutputFormat::Text, true), &[ok, failed], &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert_eq!(text, "bad.md: error: gone\n");
    }

    #[test]
    fn test_json_output() {
        let prompt = prompt();
        let report = FileReport::checked(Path::new("ok.md"), &prompt);

        let mut buf = Vec::new();
        write_reports(&ctx(OutputFormat::Json, false), &[report], &mut buf).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();

        assert_eq!(value[0]["status"], "checked");
        assert_eq!(value[0]["id"], prompt.id.as_str());
        assert!(value[0].get("error").is_none());
    }
}
