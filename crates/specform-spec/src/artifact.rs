//! Compiled artifact persistence.
//!
//! Artifacts live at `<output_dir>/<slug>/<short hash>.prompt.json`, so
//! identical content always maps to the same file and any edit maps to a
//! new one.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use specform_common_log::spans;
use thiserror::Error;
use tracing::{debug, info};

use crate::model::CompiledPrompt;

/// File name suffix for compiled artifacts.
pub const ARTIFACT_EXTENSION: &str = "prompt.json";

/// Artifact I/O errors.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("failed to create output directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to access artifact {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode compiled prompt as JSON: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("invalid artifact {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// What a write did on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The artifact file was created or replaced.
    Written(PathBuf),
    /// An artifact for identical content was already there. The file is
    /// not touched, so its `sourcePath` and timestamps are those of the
    /// first compilation even if the same bytes now come from elsewhere.
    Unchanged(PathBuf),
}

impl WriteOutcome {
    pub fn path(&self) -> &Path {
        match self {
            Self::Written(path) | Self::Unchanged(path) => path,
        }
    }

    pub fn is_written(&self) -> bool {
        matches!(self, Self::Written(_))
    }
}

/// Writes compiled prompts as JSON artifacts under an output directory.
#[derive(Debug, Clone)]
pub struct ArtifactWriter {
    output_dir: PathBuf,
    pretty: bool,
}

impl ArtifactWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            pretty: true,
        }
    }

    /// Write single-line JSON instead of indented JSON.
    pub fn compact(mut self) -> Self {
        self.pretty = false;
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Destination for a compiled prompt.
    pub fn artifact_path(&self, prompt: &CompiledPrompt) -> PathBuf {
        self.output_dir
            .join(&prompt.slug)
            .join(format!("{}.{}", prompt.short_hash(), ARTIFACT_EXTENSION))
    }

    /// Persist `prompt`, leaving an existing artifact of the same content alone.
    pub fn write(&self, prompt: &CompiledPrompt) -> Result<WriteOutcome, ArtifactError> {
        let path = self.artifact_path(prompt);
        let span = spans::file_span("write", &path);
        let _enter = span.enter();

        let result = self.write_to(prompt, path);
        if let Err(e) = &result {
            spans::record_error(e);
        }
        result
    }

    fn write_to(
        &self,
        prompt: &CompiledPrompt,
        path: PathBuf,
    ) -> Result<WriteOutcome, ArtifactError> {
        match Self::read(&path) {
            Ok(existing) if existing.hash == prompt.hash => {
                debug!(path = %path.display(), "artifact already up to date");
                return Ok(WriteOutcome::Unchanged(path));
            }
            Ok(_) => debug!(path = %path.display(), "replacing artifact with different hash"),
            Err(ArtifactError::Io { source, .. }) if source.kind() == io::ErrorKind::NotFound => {}
            Err(e) => debug!(path = %path.display(), error = %e, "replacing unreadable artifact"),
        }

        let dir = path.parent().unwrap_or(self.output_dir.as_path());
        std::fs::create_dir_all(dir).map_err(|source| ArtifactError::CreateDir {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut json = if self.pretty {
            serde_json::to_string_pretty(prompt)
        } else {
            serde_json::to_string(prompt)
        }
        .map_err(ArtifactError::Encode)?;
        json.push('\n');

        let io_error = |source: io::Error| ArtifactError::Io {
            path: path.clone(),
            source,
        };

        // Same directory as the destination so the rename stays on one filesystem.
        let mut staged = temp_builder().tempfile_in(dir).map_err(io_error)?;
        staged.write_all(json.as_bytes()).map_err(io_error)?;
        staged.persist(&path).map_err(|e| io_error(e.error))?;

        info!(id = %prompt.id, path = %path.display(), "wrote artifact");
        Ok(WriteOutcome::Written(path))
    }

    /// Load a previously written artifact.
    pub fn read(path: impl AsRef<Path>) -> Result<CompiledPrompt, ArtifactError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ArtifactError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| ArtifactError::Decode {
            path: path.to_path_buf(),
            source,
        })
    }
}

fn temp_builder() -> tempfile::Builder<'static, 'static> {
    let mut builder = tempfile::Builder::new();
    builder.prefix(".").suffix(".tmp");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(0o644));
    }
    builder
}
