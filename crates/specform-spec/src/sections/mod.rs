//! Interpreters that turn raw block text into typed sections.

pub mod assertions;
pub mod inputs;

pub use assertions::parse_assertions;
pub use inputs::{parse_inputs, Inputs};

use crate::blocks::{Blocks, PROMPT};
use crate::error::CompileError;

/// Pull the required prompt text out of the extracted blocks.
///
/// The text is passed through verbatim. A present but blank block counts
/// as missing.
pub fn require_prompt(blocks: &Blocks) -> Result<String, CompileError> {
    match blocks.get(PROMPT) {
        Some(text) if !text.trim().is_empty() => Ok(text.to_string()),
        _ => Err(CompileError::MissingPrompt),
    }
}
