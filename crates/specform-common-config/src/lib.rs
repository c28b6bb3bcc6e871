//! Configuration types for specform.
//!
//! This crate provides the configuration used by the `specform` CLI,
//! read from `.specform/config.yaml` and overridden by `SPECFORM_*`
//! environment variables.

pub mod env;
pub mod loader;
pub mod types;

pub use env::*;
pub use loader::*;
pub use types::*;
