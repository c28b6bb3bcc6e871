//! Configuration types.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Directory under the project root holding specform state.
pub const CONFIG_DIR: &str = ".specform";
/// Config file name inside [`CONFIG_DIR`].
pub const CONFIG_FILE: &str = "config.yaml";

/// Root configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpecformConfig {
    /// Where compiled artifacts are written, relative to the project root
    /// unless absolute.
    pub output_dir: PathBuf,
    /// Indent JSON artifacts.
    pub pretty: bool,
    /// Report prompt diagnostics after compiling.
    pub lint: bool,
}

impl Default for SpecformConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(CONFIG_DIR).join("prompts"),
            pretty: true,
            lint: true,
        }
    }
}

impl SpecformConfig {
    /// Output directory resolved against `project_dir`.
    pub fn resolved_output_dir(&self, project_dir: &std::path::Path) -> PathBuf {
        if self.output_dir.is_absolute() {
            self.output_dir.clone()
        } else {
            project_dir.join(&self.output_dir)
        }
    }
}
