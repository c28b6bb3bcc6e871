//! Configuration file loading and parsing.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

use crate::env::vars;
use crate::types::{SpecformConfig, CONFIG_DIR, CONFIG_FILE};

/// Config loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {source}")]
    ReadError {
        #[from]
        source: std::io::Error,
    },

    #[error("invalid YAML at line {}: {message}", line.map(|l| l.to_string()).unwrap_or_else(|| "unknown".to_string()))]
    ParseError { line: Option<usize>, message: String },

    #[error("validation error: {message}")]
    ValidationError { message: String },

    #[error("environment variable not found: {var}")]
    EnvVarNotFound { var: String },

    #[error("invalid value for {var}: {value}")]
    InvalidOverride { var: String, value: String },
}

fn env_reference() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\$\{([^}:]+)(?::-([^}]*))?\}").expect("env reference pattern is valid")
    })
}

/// Configuration loader.
pub struct ConfigLoader {
    base_path: PathBuf,
    config_file: Option<PathBuf>,
}

impl ConfigLoader {
    /// Create a loader for the given project directory.
    pub fn new(project_dir: impl AsRef<Path>) -> Self {
        Self {
            base_path: project_dir.as_ref().to_path_buf(),
            config_file: None,
        }
    }

    /// Loader for `project_dir` that honours `SPECFORM_CONFIG`.
    pub fn from_env(project_dir: impl AsRef<Path>) -> Self {
        let loader = Self::new(project_dir);
        match std::env::var_os(vars::SPECFORM_CONFIG) {
            Some(file) if !file.is_empty() => loader.with_config_file(file),
            _ => loader,
        }
    }

    /// Read `file` instead of `.specform/config.yaml`. Relative paths are
    /// resolved against the project directory, and the file must exist.
    pub fn with_config_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.config_file = Some(file.into());
        self
    }

    /// Path of the config file this loader reads.
    pub fn config_path(&self) -> PathBuf {
        match &self.config_file {
            Some(file) => self.base_path.join(file),
            None => self.base_path.join(CONFIG_DIR).join(CONFIG_FILE),
        }
    }

    /// Load the config file, then apply `SPECFORM_*` overrides.
    pub fn load(&self) -> Result<SpecformConfig, ConfigError> {
        let mut config = self.load_file()?;
        apply_overrides(&mut config, |var| std::env::var(var).ok())?;
        self.validate(&config)?;
        Ok(config)
    }

    fn load_file(&self) -> Result<SpecformConfig, ConfigError> {
        let config_path = self.config_path();

        if self.config_file.is_none() && !config_path.exists() {
            return Ok(SpecformConfig::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;
        let expanded = self.expand_env_vars(&contents)?;

        serde_yaml::from_str(&expanded).map_err(|e| ConfigError::ParseError {
            line: e.location().map(|l| l.line()),
            message: e.to_string(),
        })
    }

    /// Expand environment variables in the form `${VAR}` or `${VAR:-default}`.
    fn expand_env_vars(&self, content: &str) -> Result<String, ConfigError> {
        let mut result = content.to_string();

        for cap in env_reference().captures_iter(content) {
            let full_match = &cap[0];
            let var_name = &cap[1];
            let default = cap.get(2).map(|m| m.as_str());

            let value = match std::env::var(var_name) {
                Ok(v) => v,
                Err(_) => match default {
                    Some(d) => d.to_string(),
                    None => {
                        return Err(ConfigError::EnvVarNotFound {
                            var: var_name.to_string(),
                        })
                    }
                },
            };

            result = result.replace(full_match, &value);
        }

        Ok(result)
    }

    /// Validate configuration values.
    fn validate(&self, config: &SpecformConfig) -> Result<(), ConfigError> {
        if config.output_dir.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError {
                message: "output_dir must not be empty".to_string(),
            });
        }

        Ok(())
    }
}

/// Apply `SPECFORM_*` overrides using `lookup` to read variables.
pub fn apply_overrides(
    config: &mut SpecformConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<(), ConfigError> {
    if let Some(dir) = lookup(vars::SPECFORM_OUTPUT_DIR) {
        config.output_dir = PathBuf::from(dir);
    }
    if let Some(value) = lookup(vars::SPECFORM_PRETTY) {
        config.pretty = parse_bool(vars::SPECFORM_PRETTY, &value)?;
    }
    if let Some(value) = lookup(vars::SPECFORM_LINT) {
        config.lint = parse_bool(vars::SPECFORM_LINT, &value)?;
    }
    Ok(())
}

fn parse_bool(var: &str, value: &str) -> Result<bool, ConfigError> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(ConfigError::InvalidOverride {
            var: var.to_string(),
            value: value.to_string(),
        }),
    }
}
