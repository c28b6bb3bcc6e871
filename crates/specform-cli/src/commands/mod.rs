//! Subcommand implementations.

mod check;
mod compile;
mod completions;

pub use check::CheckCommand;
pub use compile::CompileCommand;
pub use completions::CompletionsCommand;
