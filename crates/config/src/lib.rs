//! Configuration loading, validation, and env substitution.
//!
//! Config files: `scribe.toml`, `scribe.yaml`, `scribe.yml`, or `scribe.json`
//! Searched in `./` then `~/.config/scribe/`.
//!
//! Supports `${ENV_VAR}` substitution in all string values.

pub mod env_subst;
pub mod error;
pub mod loader;
pub mod schema;
pub mod validate;

pub use {
    error::{Error, Result},
    loader::{
        apply_env_overrides, apply_env_overrides_with, config_dir, discover_and_load,
        find_config_file, load_config,
    },
    schema::{ScribeConfig, ServerConfig, StoreBackend, StoreConfig},
    validate::{Diagnostic, Severity, ValidationResult},
};
