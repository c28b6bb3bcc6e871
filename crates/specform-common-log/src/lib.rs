//! Logging infrastructure for specform.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Minimum log level.
    pub level: LogLevel,
    /// Output format.
    pub format: LogFormat,
    /// Log file path (if file logging enabled).
    pub file_path: Option<PathBuf>,
    /// Include source location.
    pub source_location: bool,
    /// Use `level` even when `RUST_LOG` is set.
    pub force_level: bool,
}

/// Log level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    Warn,
    Error,
}

impl From<LogLevel> for tracing_subscriber::filter::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => tracing_subscriber::filter::LevelFilter::TRACE,
            LogLevel::Debug => tracing_subscriber::filter::LevelFilter::DEBUG,
            LogLevel::Info => tracing_subscriber::filter::LevelFilter::INFO,
            LogLevel::Warn => tracing_subscriber::filter::LevelFilter::WARN,
            LogLevel::Error => tracing_subscriber::filter::LevelFilter::ERROR,
        }
    }
}

impl LogLevel {
    /// Parse from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "trace" => Some(Self::Trace),
            "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "warn" | "warning" => Some(Self::Warn),
            "error" => Some(Self::Error),
            _ => None,
        }
    }

    /// Level for a `-v` count: 0 keeps the configured level.
    pub fn from_verbosity(verbose: u8, quiet: bool, configured: Self) -> Self {
        match verbose {
            0 if quiet => Self::Error,
            0 => configured,
            1 => Self::Info,
            2 => Self::Debug,
            _ => Self::Trace,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Environment variables read by [`LogConfig::from_env`].
pub mod vars {
    pub const SPECFORM_LOG_LEVEL: &str = "SPECFORM_LOG_LEVEL";
    pub const SPECFORM_LOG_FORMAT: &str = "SPECFORM_LOG_FORMAT";
    pub const SPECFORM_LOG_FILE: &str = "SPECFORM_LOG_FILE";
    pub const SPECFORM_LOG_SOURCE: &str = "SPECFORM_LOG_SOURCE";
    pub const RUST_LOG: &str = "RUST_LOG";
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable pretty format.
    #[default]
    Pretty,
    /// Compact single-line format.
    Compact,
    /// JSON structured format.
    Json,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::default(),
            format: LogFormat::default(),
            file_path: None,
            source_location: false,
            force_level: false,
        }
    }
}

impl LogConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(level) = std::env::var(vars::SPECFORM_LOG_LEVEL) {
            if let Some(l) = LogLevel::parse(&level) {
                config.level = l;
            }
        } else if let Ok(level) = std::env::var(vars::RUST_LOG) {
            if let Some(l) = LogLevel::parse(&level) {
                config.level = l;
            }
        }

        if let Ok(format) = std::env::var(vars::SPECFORM_LOG_FORMAT) {
            config.format = match format.to_lowercase().as_str() {
                "json" => LogFormat::Json,
                "compact" => LogFormat::Compact,
                _ => LogFormat::Pretty,
            };
        }

        if let Ok(file_path) = std::env::var(vars::SPECFORM_LOG_FILE) {
            config.file_path = Some(PathBuf::from(file_path));
        }

        if let Ok(source_location) = std::env::var(vars::SPECFORM_LOG_SOURCE) {
            config.source_location =
                source_location.to_lowercase() == "true" || source_location == "1";
        }

        config
    }
}

/// Initialize logging with the given configuration.
///
/// Logs go to stderr so stdout stays free for command output.
pub fn init(config: LogConfig) -> Result<(), LogError> {
    let filter = level_filter(&config);

    let file = match &config.file_path {
        Some(path) => Some(open_log_file(path)?),
        None => None,
    };

    let registry = tracing_subscriber::registry().with(filter);

    match config.format {
        LogFormat::Pretty => {
            let stderr_layer = fmt::layer()
                .with_writer(io::stderr)
                .with_target(true)
                .with_file(config.source_location)
                .with_line_number(config.source_location);

            let file_layer = file.map(|file| {
                fmt::layer()
                    .with_writer(Mutex::new(file))
                    .with_ansi(false)
                    .with_target(true)
                    .with_file(config.source_location)
                    .with_line_number(config.source_location)
            });

            registry
                .with(stderr_layer)
                .with(file_layer)
                .try_init()
                .map_err(|e| LogError::InitError(e.to_string()))?;
        }
        LogFormat::Compact => {
            let stderr_layer = fmt::layer().compact().with_writer(io::stderr);

            let file_layer = file.map(|file| {
                fmt::layer()
                    .compact()
                    .with_writer(Mutex::new(file))
                    .with_ansi(false)
            });

            registry
                .with(stderr_layer)
                .with(file_layer)
                .try_init()
                .map_err(|e| LogError::InitError(e.to_string()))?;
        }
        LogFormat::Json => {
            let stderr_layer = fmt::layer().json().with_writer(io::stderr);

            let file_layer = file.map(|file| fmt::layer().json().with_writer(Mutex::new(file)));

            registry
                .with(stderr_layer)
                .with(file_layer)
                .try_init()
                .map_err(|e| LogError::InitError(e.to_string()))?;
        }
    }

    Ok(())
}

/// `RUST_LOG` directives win unless the level was forced.
fn level_filter(config: &LogConfig) -> EnvFilter {
    if config.force_level {
        return EnvFilter::new(config.level.as_str());
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.level.as_str()))
}

fn open_log_file(path: &Path) -> Result<File, LogError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(LogError::FileError)
}

/// Logging errors.
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[error("failed to initialize logging: {0}")]
    InitError(String),

    #[error("failed to open log file: {0}")]
    FileError(#[from] io::Error),
}

/// Convenience macros re-exported from tracing.
pub use tracing::{debug, error, info, trace, warn};

/// Compile spans and timing.
pub mod spans;

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_log_level_parse() {
        assert_eq!(LogLevel::parse("info"), Some(LogLevel::Info));
        assert_eq!(LogLevel::parse("DEBUG"), Some(LogLevel::Debug));
        assert_eq!(LogLevel::parse("Warning"), Some(LogLevel::Warn));
        assert_eq!(LogLevel::parse("warn"), Some(LogLevel::Warn));
        assert_eq!(LogLevel::parse("error"), Some(LogLevel::Error));
        assert_eq!(LogLevel::parse("trace"), Some(LogLevel::Trace));
        assert_eq!(LogLevel::parse("invalid"), None);
    }

    #[test]
    fn test_log_level_from() {
        use tracing_subscriber::filter::LevelFilter;
        assert_eq!(LevelFilter::from(LogLevel::Trace), LevelFilter::TRACE);
        assert_eq!(LevelFilter::from(LogLevel::Debug), LevelFilter::DEBUG);
        assert_eq!(LevelFilter::from(LogLevel::Info), LevelFilter::INFO);
        assert_eq!(LevelFilter::from(LogLevel::Warn), LevelFilter::WARN);
        assert_eq!(LevelFilter::from(LogLevel::Error), LevelFilter::ERROR);
    }

    #[test]
    fn test_from_verbosity() {
        assert_eq!(LogLevel::from_verbosity(0, false, LogLevel::Warn), LogLevel::Warn);
        assert_eq!(LogLevel::from_verbosity(0, true, LogLevel::Warn), LogLevel::Error);
        assert_eq!(LogLevel::from_verbosity(1, false, LogLevel::Warn), LogLevel::Info);
        assert_eq!(LogLevel::from_verbosity(2, false, LogLevel::Warn), LogLevel::Debug);
        assert_eq!(LogLevel::from_verbosity(5, false, LogLevel::Warn), LogLevel::Trace);
    }

    #[test]
    fn test_default_config() {
        let config = LogConfig::default();
        assert_eq!(config.level, LogLevel::Warn);
        assert_eq!(config.format, LogFormat::Pretty);
        assert!(config.file_path.is_none());
        assert!(!config.source_location);
        assert!(!config.force_level);
    }

    #[test]
    fn test_forced_level_ignores_rust_log() {
        let config = LogConfig {
            level: LogLevel::Debug,
            force_level: true,
            ..LogConfig::default()
        };
        assert_eq!(level_filter(&config).to_string(), "debug");

        let config = LogConfig {
            level: LogLevel::Error,
            force_level: true,
            ..LogConfig::default()
        };
        assert_eq!(level_filter(&config).to_string(), "error");
    }

    #[test]
    fn test_config_from_env() {
        let saved: Vec<(&str, Option<String>)> = [
            vars::SPECFORM_LOG_LEVEL,
            vars::SPECFORM_LOG_FORMAT,
            vars::SPECFORM_LOG_FILE,
            vars::SPECFORM_LOG_SOURCE,
        ]
        .into_iter()
        .map(|var| (var, env::var(var).ok()))
        .collect();

        env::set_var(vars::SPECFORM_LOG_LEVEL, "debug");
        env::set_var(vars::SPECFORM_LOG_FORMAT, "json");
        env::set_var(vars::SPECFORM_LOG_FILE, "/tmp/specform-test.log");
        env::set_var(vars::SPECFORM_LOG_SOURCE, "1");

        let config = LogConfig::from_env();
        assert_eq!(config.level, LogLevel::Debug);
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.file_path.unwrap(), PathBuf::from("/tmp/specform-test.log"));
        assert!(config.source_location);

        for (var, value) in saved {
            match value {
                Some(val) => env::set_var(var, val),
                None => env::remove_var(var),
            }
        }
    }
}
