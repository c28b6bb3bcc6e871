// src/blocks.rs

use std::collections::HashMap;

use pulldown_cmark::{CodeBlockKind, Event, Parser, Tag, TagEnd};
use tracing::{debug, warn};

/// Label of the required prompt block.
pub const PROMPT: &str = "prompt";
/// Label of the inputs block.
pub const INPUTS: &str = "inputs";
/// Label of the assertions block.
pub const ASSERTIONS: &str = "assertions";
/// Label of the optional output snapshot block.
pub const OUTPUT: &str = "output";

/// Labeled fenced blocks found in a document body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Blocks {
    blocks: HashMap<String, String>,
}

impl Blocks {
    /// Walk `body` as markdown and collect every labeled fenced code block.
    ///
    /// The label is the first word of the fence's info string. Prose,
    /// indented code and unlabeled fences are ignored. When a label
    /// repeats, the last block wins.
    pub fn extract(body: &str) -> Self {
        let mut blocks = HashMap::new();
        let mut current: Option<(String, String)> = None;

        for event in Parser::new(body) {
            match event {
                Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(info))) => {
                    current = info
                        .split_whitespace()
                        .next()
                        .map(|label| (label.to_string(), String::new()));
                }
                Event::Text(text) => {
                    if let Some((_, content)) = current.as_mut() {
                        content.push_str(&text);
                    }
                }
                Event::End(TagEnd::CodeBlock) => {
                    if let Some((label, content)) = current.take() {
                        debug!(label = %label, bytes = content.len(), "extracted block");
                        if blocks.insert(label.clone(), content).is_some() {
                            warn!(label = %label, "duplicate block label, keeping the last one");
                        }
                    }
                }
                _ => {}
            }
        }

        Self { blocks }
    }

    pub fn get(&self, label: &str) -> Option<&str> {
        self.blocks.get(label).map(String::as_str)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.blocks.contains_key(label)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Labels in sorted order.
    pub fn labels(&self) -> Vec<&str> {
        let mut labels: Vec<&str> = self.blocks.keys().map(String::as_str).collect();
        labels.sort_unstable();
        labels
    }
}
