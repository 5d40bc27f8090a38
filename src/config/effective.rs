//! Resolved configuration with provenance
//!
//! `ConfigResolver` walks the layers for every recognized key once and
//! produces an immutable `ResolvedConfig` recording where each value came
//! from.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

use super::defaults::{ConfigKey, DefaultsTable};
use super::env_file::EnvFile;
use super::layers::{first_non_empty, ConfigOrigin, EnvSource};
use crate::error::ConfigError;

/// Schema identifier for the JSON rendering
pub const SCHEMA_ID: &str = "nina-buildenv/resolved_config@1";

const REDACTED: &str = "[REDACTED]";

/// One resolved value and the layer it came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedValue {
    pub value: String,
    pub origin: ConfigOrigin,
}

/// Layered resolver over an env file, an environment source and defaults
pub struct ConfigResolver<E: EnvSource> {
    env_file: EnvFile,
    env: E,
    defaults: DefaultsTable,
}

impl<E: EnvSource> ConfigResolver<E> {
    pub fn new(env_file: EnvFile, env: E, defaults: DefaultsTable) -> Self {
        Self {
            env_file,
            env,
            defaults,
        }
    }

    /// Resolve one key: env file, then environment, then default.
    pub fn resolve(&self, key: ConfigKey) -> ResolvedValue {
        let name = key.as_str();
        let (value, origin) = first_non_empty(
            self.env_file.get(name),
            self.env.var(name),
            self.defaults.get(key),
        );
        tracing::debug!("{} resolved from {:?}", name, origin);
        ResolvedValue { value, origin }
    }

    /// Resolve every recognized key.
    pub fn resolve_all(self) -> ResolvedConfig {
        let values = ConfigKey::ALL
            .into_iter()
            .map(|key| (key, self.resolve(key)))
            .collect();

        ResolvedConfig {
            created_at: Utc::now(),
            env_file: self.env_file,
            defaults: self.defaults,
            values,
        }
    }
}

/// Final per-key configuration for one build invocation
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    created_at: DateTime<Utc>,
    env_file: EnvFile,
    defaults: DefaultsTable,
    values: BTreeMap<ConfigKey, ResolvedValue>,
}

impl ResolvedConfig {
    pub fn get(&self, key: ConfigKey) -> &str {
        self.values
            .get(&key)
            .map(|v| v.value.as_str())
            .unwrap_or_else(|| self.defaults.get(key))
    }

    pub fn origin(&self, key: ConfigKey) -> ConfigOrigin {
        self.values
            .get(&key)
            .map(|v| v.origin)
            .unwrap_or(ConfigOrigin::Default)
    }

    pub fn defaults(&self) -> &DefaultsTable {
        &self.defaults
    }

    pub fn env_file(&self) -> &EnvFile {
        &self.env_file
    }

    /// OTA_PORT as the integer the build tool needs.
    pub fn ota_port(&self) -> Result<u16, ConfigError> {
        let raw = self.get(ConfigKey::OtaPort);
        raw.trim()
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidPort {
                value: raw.to_string(),
                reason: e.to_string(),
            })
    }

    /// Iterate values in emission order.
    pub fn iter(&self) -> impl Iterator<Item = (ConfigKey, &ResolvedValue)> {
        self.values.iter().map(|(k, v)| (*k, v))
    }

    /// Pretty JSON with sensitive values replaced.
    pub fn to_redacted_json(&self) -> Result<String, ConfigError> {
        let mut values = BTreeMap::new();
        let mut redactions = Vec::new();

        for (key, resolved) in self.iter() {
            let value = if key.is_sensitive() {
                redactions.push(key.as_str().to_string());
                REDACTED.to_string()
            } else {
                resolved.value.clone()
            };
            values.insert(
                key.as_str(),
                ResolvedValue {
                    value,
                    origin: resolved.origin,
                },
            );
        }

        let view = RedactedView {
            schema_id: SCHEMA_ID,
            created_at: self.created_at,
            env_file: &self.env_file,
            values,
            redactions,
        };

        serde_json::to_string_pretty(&view).map_err(|e| ConfigError::Serialize(e.to_string()))
    }
}

#[derive(Serialize)]
struct RedactedView<'a> {
    schema_id: &'static str,
    created_at: DateTime<Utc>,
    env_file: &'a EnvFile,
    values: BTreeMap<&'static str, ResolvedValue>,
    redactions: Vec<String>,
}
