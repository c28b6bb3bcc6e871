//! Non-fatal checks on a compiled prompt.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::model::CompiledPrompt;

/// How much a diagnostic matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
}

/// A finding about a compiled prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// `{{name}}` appears in the prompt but `name` is not an input.
    UndeclaredPlaceholder { name: String },
    /// An input the prompt never references.
    UnusedInput { name: String },
}

impl Diagnostic {
    pub fn severity(&self) -> Severity {
        match self {
            Self::UndeclaredPlaceholder { .. } => Severity::Warning,
            Self::UnusedInput { .. } => Severity::Info,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UndeclaredPlaceholder { name } => {
                write!(f, "placeholder `{{{{{name}}}}}` has no matching input")
            }
            Self::UnusedInput { name } => write!(f, "input `{name}` is never used in the prompt"),
        }
    }
}

fn placeholder() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\{\{\s*([A-Za-z_][A-Za-z0-9_]*)\s*\}\}").expect("placeholder pattern is valid")
    })
}

/// Placeholder names in order of first appearance, without repeats.
pub fn placeholders(prompt: &str) -> Vec<&str> {
    let mut names: Vec<&str> = Vec::new();
    for caps in placeholder().captures_iter(prompt) {
        if let Some(name) = caps.get(1).map(|m| m.as_str()) {
            if !names.contains(&name) {
                names.push(name);
            }
        }
    }
    names
}

/// Cross-check prompt placeholders against declared inputs.
pub fn diagnose(prompt: &CompiledPrompt) -> Vec<Diagnostic> {
    let used = placeholders(&prompt.prompt);

    let undeclared = used
        .iter()
        .filter(|name| !prompt.has_input(name))
        .map(|name| Diagnostic::UndeclaredPlaceholder {
            name: name.to_string(),
        });

    let unused = prompt
        .inputs
        .iter()
        .filter(|input| !used.contains(&input.as_str()))
        .map(|name| Diagnostic::UnusedInput { name: name.clone() });

    undeclared.chain(unused).collect()
}
