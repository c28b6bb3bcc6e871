// src/compile.rs

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use specform_common_log::{spans, timed};
use tracing::{debug, info};

use crate::blocks::{Blocks, ASSERTIONS, INPUTS, OUTPUT};
use crate::error::{CompileError, Result};
use crate::frontmatter;
use crate::identity::Identity;
use crate::model::CompiledPrompt;
use crate::sections::{parse_assertions, parse_inputs, require_prompt, Inputs};

/// Compile one spec document, stamping it with the current time.
pub fn compile(document: &[u8], source_path: impl Into<PathBuf>) -> Result<CompiledPrompt> {
    compile_at(document, source_path, Utc::now())
}

/// Read a spec document from disk and compile it.
pub fn compile_file(path: impl AsRef<Path>) -> Result<CompiledPrompt> {
    let path = path.as_ref();
    let document = std::fs::read(path).map_err(|source| CompileError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    compile(&document, path)
}

/// Compile one spec document with an explicit compile time.
///
/// Both `created_at` and `updated_at` are set to `now`.
pub fn compile_at(
    document: &[u8],
    source_path: impl Into<PathBuf>,
    now: DateTime<Utc>,
) -> Result<CompiledPrompt> {
    let source_path = source_path.into();
    let span = spans::compile_span(&source_path, document.len());
    let _enter = span.enter();

    let result = build(document, source_path, now);
    if let Err(e) = &result {
        spans::record_error(e);
    }
    result
}

fn build(document: &[u8], source_path: PathBuf, now: DateTime<Utc>) -> Result<CompiledPrompt> {
    let split = timed!("split", frontmatter::split(document))?;
    let blocks = timed!("extract", Blocks::extract(split.body));
    debug!(labels = ?blocks.labels(), "collected blocks");

    let prompt = require_prompt(&blocks)?;
    let Inputs { names, values } = blocks.get(INPUTS).map(parse_inputs).unwrap_or_default();
    let assertions = match blocks.get(ASSERTIONS) {
        Some(text) => parse_assertions(text)?,
        None => Vec::new(),
    };
    let snapshot = blocks.get(OUTPUT).map(str::to_string);

    let meta = split.frontmatter;
    let Identity { hash, slug, id } = Identity::derive(document, &meta.title);

    info!(id = %id, inputs = names.len(), assertions = assertions.len(), "compiled spec");

    Ok(CompiledPrompt {
        id,
        title: meta.title,
        slug,
        hash,
        model: meta.model,
        temperature: meta.temperature,
        tags: meta.tags,
        metadata: meta.extra,
        prompt,
        inputs: names,
        values,
        assertions,
        snapshot,
        created_at: now,
        updated_at: now,
        source_path,
    })
}
