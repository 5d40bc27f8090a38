//! Preprocessor definitions for the firmware build
//!
//! The resolved configuration becomes five definitions, appended to a
//! caller-supplied sink. `render` turns them into build-tool input.

pub mod render;

use serde::Serialize;
use std::fmt;

use crate::config::{ConfigKey, ResolvedConfig};
use crate::error::ConfigError;

pub use render::FlagFormat;

/// Value of a preprocessor definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum DefineValue {
    /// Emitted as a quoted C string literal
    Str(String),
    /// Emitted as a bare integer literal
    Int(u16),
}

impl DefineValue {
    /// The C token for this value.
    pub fn c_literal(&self) -> String {
        match self {
            Self::Str(s) => {
                let mut out = String::with_capacity(s.len() + 2);
                out.push('"');
                for c in s.chars() {
                    match c {
                        '"' => out.push_str("\\\""),
                        '\\' => out.push_str("\\\\"),
                        '\n' => out.push_str("\\n"),
                        '\r' => out.push_str("\\r"),
                        '\t' => out.push_str("\\t"),
                        // octal escapes stop after three digits
                        c if c.is_ascii_control() => {
                            out.push_str(&format!("\\{:03o}", c as u32))
                        }
                        _ => out.push(c),
                    }
                }
                out.push('"');
                out
            }
            Self::Int(n) => n.to_string(),
        }
    }
}

impl fmt::Display for DefineValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Int(n) => write!(f, "{}", n),
        }
    }
}

/// A named preprocessor definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Definition {
    pub name: String,
    pub value: DefineValue,
}

/// Append-only destination for definitions.
pub trait DefinitionSink {
    fn append_definition(&mut self, name: &str, value: DefineValue);
}

impl DefinitionSink for Vec<Definition> {
    fn append_definition(&mut self, name: &str, value: DefineValue) {
        self.push(Definition {
            name: name.to_string(),
            value,
        });
    }
}

/// Build the definitions for a resolved configuration.
///
/// Fails if OTA_PORT is not a valid port number.
pub fn definitions(resolved: &ResolvedConfig) -> Result<Vec<Definition>, ConfigError> {
    let port = resolved.ota_port()?;

    Ok(ConfigKey::ALL
        .into_iter()
        .map(|key| {
            let value = match key {
                ConfigKey::OtaPort => DefineValue::Int(port),
                _ => DefineValue::Str(resolved.get(key).to_string()),
            };
            Definition {
                name: key.as_str().to_string(),
                value,
            }
        })
        .collect())
}

/// Append all five definitions to `sink`.
///
/// Nothing is appended when the configuration is invalid.
pub fn emit_build_flags<S: DefinitionSink + ?Sized>(
    resolved: &ResolvedConfig,
    sink: &mut S,
) -> Result<(), ConfigError> {
    for def in definitions(resolved)? {
        sink.append_definition(&def.name, def.value);
    }
    Ok(())
}
