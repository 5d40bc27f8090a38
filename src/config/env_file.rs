//! Env file parsing (highest-precedence layer)
//!
//! Format: one `KEY=VALUE` per line. Blank lines and `#` comments are
//! ignored, lines without `=` are skipped, and a value wrapped in a matching
//! pair of `'` or `"` has the quotes removed.

use serde::Serialize;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Key/value pairs loaded from an env file
#[derive(Debug, Clone, Default, Serialize)]
pub struct EnvFile {
    /// Path the file was loaded from (None when parsed from a string)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    /// Whether the file existed
    pub present: bool,

    /// SHA-256 of the raw file bytes. Never serialized: the file holds
    /// low-entropy credentials and the digest would allow offline guessing.
    #[serde(skip)]
    pub digest: Option<String>,

    /// Lines that produced a key/value pair
    pub significant_lines: usize,

    /// Non-blank, non-comment lines without `=`
    pub skipped_lines: usize,

    #[serde(skip)]
    entries: BTreeMap<String, String>,
}

impl EnvFile {
    /// Load an env file. A missing file yields an empty mapping.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!("env file {} not found, using empty layer", path.display());
                return Ok(Self {
                    path: Some(path.to_path_buf()),
                    ..Self::default()
                });
            }
            Err(e) => return Err(ConfigError::io(path, e)),
        };

        let digest = hex::encode(Sha256::digest(&bytes));

        let contents = String::from_utf8(bytes).map_err(|e| {
            ConfigError::Parse(format!("{} is not valid UTF-8: {}", path.display(), e))
        })?;

        let mut env_file = Self::parse(&contents);
        env_file.path = Some(path.to_path_buf());
        env_file.present = true;
        env_file.digest = Some(digest);

        tracing::info!(
            "loaded {} entries from {}",
            env_file.entries.len(),
            path.display()
        );

        Ok(env_file)
    }

    /// Parse env file contents. Never fails; malformed lines are skipped.
    pub fn parse(contents: &str) -> Self {
        let mut env_file = Self::default();

        for (idx, raw) in contents.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                tracing::debug!("skipping line {}: no '='", idx + 1);
                env_file.skipped_lines += 1;
                continue;
            };

            // last line wins
            env_file
                .entries
                .insert(key.trim().to_string(), strip_quotes(value.trim()).to_string());
            env_file.significant_lines += 1;
        }

        env_file
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

}

/// Strip one matching pair of surrounding quotes.
///
/// A lone quote character counts as both ends and strips to empty.
fn strip_quotes(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.starts_with(quote) && value.ends_with(quote) {
            return value
                .strip_prefix(quote)
                .and_then(|v| v.strip_suffix(quote))
                .unwrap_or("");
        }
    }
    value
}
