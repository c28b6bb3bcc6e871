//! Environment variable handling.

use std::path::Path;

use thiserror::Error;

/// Environment variable errors.
#[derive(Debug, Error)]
pub enum EnvError {
    #[error("failed to load .env file: {0}")]
    DotenvError(#[from] dotenvy::Error),
}

/// Environment variable names read by the config loader.
pub mod vars {
    /// Alternate config file, relative to the project root unless absolute.
    pub const SPECFORM_CONFIG: &str = "SPECFORM_CONFIG";
    pub const SPECFORM_OUTPUT_DIR: &str = "SPECFORM_OUTPUT_DIR";
    pub const SPECFORM_PRETTY: &str = "SPECFORM_PRETTY";
    pub const SPECFORM_LINT: &str = "SPECFORM_LINT";
}

/// Load `.env` then `.env.local` from `dir`. Missing files are fine;
/// variables already set in the process win.
pub fn load_dotenv(dir: &Path) -> Result<(), EnvError> {
    for name in [".env", ".env.local"] {
        match dotenvy::from_path(dir.join(name)) {
            Ok(()) => {}
            Err(e) if e.not_found() => {}
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}
