//! Layered lookup
//!
//! Precedence, highest first:
//! 1. Env file
//! 2. Process environment
//! 3. Built-in default
//!
//! An empty string at layers 1 and 2 counts as absent.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;

/// Layer a resolved value came from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ConfigOrigin {
    EnvFile,
    Process,
    Default,
}

/// Source of environment variables.
pub trait EnvSource {
    fn var(&self, name: &str) -> Option<String>;
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        match env::var(name) {
            Ok(value) => Some(value),
            Err(env::VarError::NotPresent) => None,
            Err(env::VarError::NotUnicode(_)) => {
                tracing::warn!("ignoring {}: value is not valid Unicode", name);
                None
            }
        }
    }
}

/// Fixed set of variables, for embedding and tests.
#[derive(Debug, Clone, Default)]
pub struct MapEnv {
    vars: HashMap<String, String>,
}

impl MapEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }
}

impl EnvSource for MapEnv {
    fn var(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}

impl<T: EnvSource + ?Sized> EnvSource for &T {
    fn var(&self, name: &str) -> Option<String> {
        (**self).var(name)
    }
}

/// Pick the first non-empty layer value, falling back to the default.
pub fn first_non_empty(
    env_file: Option<&str>,
    process: Option<String>,
    default: &str,
) -> (String, ConfigOrigin) {
    if let Some(value) = env_file.filter(|v| !v.is_empty()) {
        return (value.to_string(), ConfigOrigin::EnvFile);
    }
    if let Some(value) = process.filter(|v| !v.is_empty()) {
        return (value, ConfigOrigin::Process);
    }
    (default.to_string(), ConfigOrigin::Default)
}
