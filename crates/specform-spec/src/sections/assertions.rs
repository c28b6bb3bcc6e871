//! `assertions` block interpreter.

use crate::error::AssertionParseError;
use crate::model::Assertion;

/// Parse the text of an `assertions` block into checks, in line order.
///
/// Every non-blank line must be `type: value`, split at the first colon.
/// A line without a colon, or with nothing before it, fails the whole block.
pub fn parse_assertions(text: &str) -> Result<Vec<Assertion>, AssertionParseError> {
    let mut assertions = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        if raw.trim().is_empty() {
            continue;
        }

        let assertion = parse_line(raw).ok_or_else(|| AssertionParseError {
            line: idx + 1,
            content: raw.to_string(),
        })?;
        assertions.push(assertion);
    }

    Ok(assertions)
}

fn parse_line(line: &str) -> Option<Assertion> {
    let (kind, value) = line.split_once(':')?;
    let kind = kind.trim();
    if kind.is_empty() {
        return None;
    }

    Some(Assertion::new(kind, value.trim()))
}
