//! Compile errors.

use std::path::PathBuf;

use thiserror::Error;

/// Pipeline stage a compile error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompileStage {
    /// Reading the document from disk
    Read,
    /// Splitting and decoding the frontmatter
    Split,
    /// Checking for the required `prompt` block
    Prompt,
    /// Parsing the `assertions` block
    Assertions,
}

/// Errors returned by the compiler. Every variant is fatal.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("failed to read spec file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse frontmatter: {0}")]
    Frontmatter(#[from] FrontmatterError),

    #[error("no prompt found in spec file")]
    MissingPrompt,

    #[error("failed to parse assertions block: {0}")]
    AssertionParse(#[from] AssertionParseError),
}

impl CompileError {
    pub fn stage(&self) -> CompileStage {
        match self {
            Self::Read { .. } => CompileStage::Read,
            Self::Frontmatter(_) => CompileStage::Split,
            Self::MissingPrompt => CompileStage::Prompt,
            Self::AssertionParse(_) => CompileStage::Assertions,
        }
    }
}

/// Frontmatter region missing or undecodable.
#[derive(Debug, Error)]
pub enum FrontmatterError {
    #[error("document is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    #[error("no frontmatter block at start of document")]
    Missing,

    #[error("frontmatter opened with `{fence}` is never closed")]
    Unterminated { fence: &'static str },

    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

/// A line in the `assertions` block that is not `type: value`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: expected `type: value`, found `{content}`")]
pub struct AssertionParseError {
    /// 1-based line number within the block
    pub line: usize,
    /// The offending line, untrimmed
    pub content: String,
}

/// Result alias for compile operations.
pub type Result<T> = std::result::Result<T, CompileError>;
