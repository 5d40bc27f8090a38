//! Rendering definitions for build tools
//!
//! - `platformio`: `-D` flags for `build_flags = !nina-env flags`
//! - `cargo`: `cargo:` directives for a `build.rs`
//! - `header`: a C header with one `#define` per definition

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use super::{DefineValue, Definition};
use crate::error::ConfigError;

/// Output format for emitted definitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlagFormat {
    #[default]
    PlatformIo,
    Cargo,
    Header,
}

impl FromStr for FlagFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "platformio" | "pio" => Ok(Self::PlatformIo),
            "cargo" => Ok(Self::Cargo),
            "header" | "c" => Ok(Self::Header),
            other => Err(ConfigError::Parse(format!(
                "unknown flag format '{}' (expected platformio, cargo or header)",
                other
            ))),
        }
    }
}

impl fmt::Display for FlagFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PlatformIo => write!(f, "platformio"),
            Self::Cargo => write!(f, "cargo"),
            Self::Header => write!(f, "header"),
        }
    }
}

/// Render definitions, one per line.
///
/// `env_path` is only used by the cargo format, for `rerun-if-changed`.
/// Cargo directives are line-based, so a value containing a line break is
/// rejected there.
pub fn render(
    defs: &[Definition],
    format: FlagFormat,
    env_path: Option<&Path>,
) -> Result<String, ConfigError> {
    let lines: Vec<String> = match format {
        FlagFormat::PlatformIo => defs.iter().map(platformio_flag).collect(),
        FlagFormat::Cargo => {
            let mut lines = Vec::with_capacity(defs.len() * 2 + 1);
            if let Some(path) = env_path {
                lines.push(format!("cargo:rerun-if-changed={}", path.display()));
            }
            lines.extend(
                defs.iter()
                    .map(|def| format!("cargo:rerun-if-env-changed={}", def.name)),
            );
            for def in defs {
                lines.push(cargo_env(def)?);
            }
            lines
        }
        FlagFormat::Header => std::iter::once("#pragma once\n".to_string())
            .chain(
                defs.iter()
                    .map(|def| format!("#define {} {}", def.name, def.value.c_literal())),
            )
            .collect(),
    };

    let mut out = lines.join("\n");
    out.push('\n');
    Ok(out)
}

fn cargo_env(def: &Definition) -> Result<String, ConfigError> {
    let value = def.value.to_string();
    if value.contains(['\n', '\r']) {
        return Err(ConfigError::InvalidValue {
            key: def.name.clone(),
            reason: "line breaks cannot be passed through cargo:rustc-env".to_string(),
        });
    }
    Ok(format!("cargo:rustc-env={}={}", def.name, value))
}

/// A single `-D` flag. String values are shell single-quoted so whitespace
/// survives PlatformIO's flag splitting.
pub fn platformio_flag(def: &Definition) -> String {
    match &def.value {
        DefineValue::Int(n) => format!("-D{}={}", def.name, n),
        DefineValue::Str(_) => {
            let flag = format!("-D{}={}", def.name, def.value.c_literal());
            format!("'{}'", flag.replace('\'', "'\\''"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defs() -> Vec<Definition> {
        vec![
            Definition {
                name: "WIFI_SSID".to_string(),
                value: DefineValue::Str("hello world".to_string()),
            },
            Definition {
                name: "OTA_PORT".to_string(),
                value: DefineValue::Int(3232),
            },
        ]
    }

    #[test]
    fn test_platformio() {
        let out = render(&defs(), FlagFormat::PlatformIo, None).unwrap();
        assert_eq!(out, "'-DWIFI_SSID=\"hello world\"'\n-DOTA_PORT=3232\n");
    }

    #[test]
    fn test_platformio_single_quote_in_value() {
        let def = Definition {
            name: "WIFI_SSID".to_string(),
            value: DefineValue::Str("Bob's".to_string()),
        };
        assert_eq!(platformio_flag(&def), "'-DWIFI_SSID=\"Bob'\\''s\"'");
    }

    #[test]
    fn test_cargo() {
        let out = render(&defs(), FlagFormat::Cargo, Some(Path::new("/proj/.env"))).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(
            lines,
            vec![
                "cargo:rerun-if-changed=/proj/.env",
                "cargo:rerun-if-env-changed=WIFI_SSID",
                "cargo:rerun-if-env-changed=OTA_PORT",
                "cargo:rustc-env=WIFI_SSID=hello world",
                "cargo:rustc-env=OTA_PORT=3232",
            ]
        );
    }

    #[test]
    fn test_header() {
        let out = render(&defs(), FlagFormat::Header, None).unwrap();
        assert!(out.starts_with("#pragma once\n"));
        assert!(out.contains("#define WIFI_SSID \"hello world\"\n"));
        assert!(out.contains("#define OTA_PORT 3232\n"));
    }

    #[test]
    fn test_multiline_value() {
        let defs = vec![Definition {
            name: "OTA_HOSTNAME".to_string(),
            value: DefineValue::Str("a\nb".to_string()),
        }];

        let err = render(&defs, FlagFormat::Cargo, None).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "OTA_HOSTNAME"));

        let header = render(&defs, FlagFormat::Header, None).unwrap();
        assert!(header.contains("#define OTA_HOSTNAME \"a\\nb\"\n"));
        assert_eq!(header.lines().count(), 3);

        let flags = render(&defs, FlagFormat::PlatformIo, None).unwrap();
        assert_eq!(flags, "'-DOTA_HOSTNAME=\"a\\nb\"'\n");
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("platformio".parse::<FlagFormat>().unwrap(), FlagFormat::PlatformIo);
        assert_eq!("Cargo".parse::<FlagFormat>().unwrap(), FlagFormat::Cargo);
        assert_eq!("header".parse::<FlagFormat>().unwrap(), FlagFormat::Header);
        assert!("scons".parse::<FlagFormat>().is_err());
        assert_eq!(FlagFormat::default().to_string(), "platformio");
    }
}
