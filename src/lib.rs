//! NINA build environment
//!
//! Resolves WiFi and OTA settings for the NINA dashboard firmware from a
//! project `.env` file, the process environment and built-in defaults, and
//! turns them into preprocessor definitions for the firmware build.

pub mod config;
pub mod error;
pub mod flags;
pub mod status;

use std::path::Path;

pub use config::{ConfigKey, ConfigOrigin, ConfigResolver, DefaultsTable, EnvFile, ResolvedConfig};
pub use error::ConfigError;
pub use flags::{emit_build_flags, DefineValue, Definition, DefinitionSink, FlagFormat};

/// Load the env file at `env_path` and resolve every key against `env` and
/// the built-in defaults.
pub fn load_config<E: config::EnvSource>(
    env_path: &Path,
    env: E,
) -> Result<ResolvedConfig, ConfigError> {
    let env_file = EnvFile::load(env_path)?;
    Ok(ConfigResolver::new(env_file, env, DefaultsTable::builtin()).resolve_all())
}
