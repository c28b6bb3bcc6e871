//! Specform prompt spec compiler.
//!
//! Turns a spec document (frontmatter plus labeled fenced blocks) into a
//! [`CompiledPrompt`] with a content-derived identity, and persists it as
//! a JSON artifact.

pub mod artifact;
pub mod blocks;
pub mod compile;
pub mod diagnostics;
pub mod error;
pub mod frontmatter;
pub mod identity;
pub mod model;
pub mod sections;

pub use artifact::{ArtifactError, ArtifactWriter, WriteOutcome};
pub use blocks::Blocks;
pub use compile::{compile, compile_at, compile_file};
pub use diagnostics::{diagnose, Diagnostic, Severity};
pub use error::{AssertionParseError, CompileError, CompileStage, FrontmatterError};
pub use frontmatter::{Frontmatter, FrontmatterFormat};
pub use identity::{content_hash, id_from, slugify, Identity};
pub use model::{Assertion, CompiledPrompt};
