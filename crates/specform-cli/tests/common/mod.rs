//! Common test utilities for CLI testing.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::{tempdir, TempDir};

pub const VALID_SPEC: &str = r#"---
title: Summarize a Technical Article!
model: gpt-4
temperature: 0.3
tags: [summarization]
---

```prompt
Summarize {{article}} in a {{tone}} tone.
```

```inputs
article
tone = casual
```

```assertions
contains: real time
matches: /HTTP/i
```
"#;

pub const NO_PROMPT_SPEC: &str = "---\ntitle: Broken\n---\n\nNo blocks at all.\n";

/// Test context with a temporary project directory
pub struct TestContext {
    pub temp_dir: TempDir,
}

impl TestContext {
    pub fn new() -> Self {
        Self {
            temp_dir: tempdir().expect("Failed to create temp dir"),
        }
    }

    /// Write `.specform/config.yaml`
    pub fn with_config(self, config: &str) -> Self {
        let dir = self.path().join(".specform");
        std::fs::create_dir_all(&dir).expect("Failed to create config dir");
        std::fs::write(dir.join("config.yaml"), config).expect("Failed to write config");
        self
    }

    /// Write a spec file into the project and return its path
    pub fn spec(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.path().join(name);
        std::fs::write(&path, contents).expect("Failed to write spec");
        path
    }

    /// Get path to temp directory
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Create a command configured for this context
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("specform").expect("Binary not found");
        cmd.current_dir(self.path())
            .env("SPECFORM_PROJECT", self.path())
            .env_remove("SPECFORM_CONFIG")
            .env_remove("SPECFORM_OUTPUT_DIR")
            .env_remove("SPECFORM_PRETTY")
            .env_remove("SPECFORM_LINT")
            .env_remove("RUST_LOG")
            .env("NO_COLOR", "1");
        cmd
    }
}
