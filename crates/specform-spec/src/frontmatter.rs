// src/frontmatter.rs

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::FrontmatterError;

/// Metadata decoded from the document header.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Frontmatter {
    pub title: String,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Every key not listed above
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// Header encodings recognised at the top of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontmatterFormat {
    /// `---` fenced YAML
    Yaml,
    /// `+++` fenced TOML
    Toml,
}

impl FrontmatterFormat {
    fn from_fence(line: &str) -> Option<Self> {
        match line.trim_end() {
            "---" => Some(Self::Yaml),
            "+++" => Some(Self::Toml),
            _ => None,
        }
    }

    fn fence(self) -> &'static str {
        match self {
            Self::Yaml => "---",
            Self::Toml => "+++",
        }
    }

    fn is_closing(self, line: &str) -> bool {
        let line = line.trim_end();
        match self {
            Self::Yaml => line == "---" || line == "...",
            Self::Toml => line == "+++",
        }
    }

    fn decode(self, header: &str) -> Result<Frontmatter, FrontmatterError> {
        Ok(match self {
            Self::Yaml => serde_yaml::from_str(header)?,
            Self::Toml => toml::from_str(header)?,
        })
    }
}

/// A document split into decoded metadata and the remaining body.
#[derive(Debug, Clone)]
pub struct SplitDocument<'a> {
    pub frontmatter: Frontmatter,
    pub format: FrontmatterFormat,
    pub body: &'a str,
}

/// Split a raw document into its frontmatter and body.
///
/// The frontmatter must start on the first line (after an optional BOM).
pub fn split(document: &[u8]) -> Result<SplitDocument<'_>, FrontmatterError> {
    let text = std::str::from_utf8(document)?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let (opening, rest) = match text.split_once('\n') {
        Some((line, rest)) => (line, rest),
        None => (text, ""),
    };
    let format = FrontmatterFormat::from_fence(opening).ok_or(FrontmatterError::Missing)?;

    let mut offset = 0;
    for raw in rest.split_inclusive('\n') {
        if format.is_closing(raw) {
            let header = &rest[..offset];
            let body = &rest[offset + raw.len()..];
            return Ok(SplitDocument {
                frontmatter: format.decode(header)?,
                format,
                body,
            });
        }
        offset += raw.len();
    }

    Err(FrontmatterError::Unterminated {
        fence: format.fence(),
    })
}
