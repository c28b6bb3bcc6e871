// src/model.rs

use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A compiled prompt spec.
///
/// Built once per compilation and never mutated afterwards. Field names
/// are the stable artifact schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompiledPrompt {
    /// `<slug>-<first 6 hex chars of hash>`
    pub id: String,
    /// Human-readable title from the frontmatter
    pub title: String,
    /// Filesystem and URL safe form of the title
    pub slug: String,
    /// SHA-256 of the raw document, lowercase hex
    pub hash: String,

    /// Target model, passed through untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Sampling temperature, passed through untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Remaining frontmatter keys
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, serde_json::Value>,

    /// Verbatim text of the `prompt` block
    pub prompt: String,
    /// Declared input names, unique, in declaration order
    #[serde(default)]
    pub inputs: Vec<String>,
    /// Default values for the inputs that declare one
    #[serde(default)]
    pub values: BTreeMap<String, String>,
    /// Checks in evaluation order
    #[serde(default)]
    pub assertions: Vec<Assertion>,
    /// Verbatim text of the `output` block, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Where the document was read from
    pub source_path: PathBuf,
}

impl CompiledPrompt {
    /// Short hash prefix used in ids and artifact file names.
    pub fn short_hash(&self) -> &str {
        crate::identity::short_hash(&self.hash)
    }

    /// Whether `name` was declared in the inputs block.
    pub fn has_input(&self, name: &str) -> bool {
        self.inputs.iter().any(|input| input == name)
    }

    /// Default value for an input, if one was declared.
    pub fn default_value(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }
}

/// A single `type: value` check against prompt output.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Assertion {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
}

impl Assertion {
    pub fn new(kind: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            value: value.into(),
        }
    }
}
