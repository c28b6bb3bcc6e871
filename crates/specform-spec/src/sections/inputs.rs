//! `inputs` block interpreter.
//!
//! Each line is either `name` or `name = value`. Anything else is skipped
//! without an error.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

/// Parsed inputs block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inputs {
    /// Unique names in first-declaration order
    pub names: Vec<String>,
    /// Defaults for names declared as `name = value`
    pub values: BTreeMap<String, String>,
}

fn input_line() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^([A-Za-z_][A-Za-z0-9_]*)(?:\s*=\s*(.+))?$").expect("input line pattern is valid")
    })
}

/// Parse the text of an `inputs` block.
pub fn parse_inputs(text: &str) -> Inputs {
    let mut inputs = Inputs::default();

    for (idx, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let Some(caps) = input_line().captures(line) else {
            debug!(line = idx + 1, content = %line, "skipping malformed inputs line");
            continue;
        };

        let name = caps[1].to_string();
        if let Some(value) = caps.get(2) {
            inputs.values.insert(name.clone(), unquote(value.as_str()).to_string());
        }
        if !inputs.names.contains(&name) {
            inputs.names.push(name);
        }
    }

    inputs
}

/// Strip one pair of matching surrounding quotes.
fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}
