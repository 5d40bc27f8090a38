//! Layered build configuration
//!
//! Resolves every recognized key from three layers:
//! 1. The project's env file (`.env`)
//! 2. The process environment
//! 3. Built-in defaults

mod defaults;
mod effective;
mod env_file;
mod layers;

pub use defaults::{ConfigKey, DefaultsTable};
pub use effective::{ConfigResolver, ResolvedConfig, ResolvedValue, SCHEMA_ID};
pub use env_file::EnvFile;
pub use layers::{first_non_empty, ConfigOrigin, EnvSource, MapEnv, ProcessEnv};
