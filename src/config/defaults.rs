//! Built-in defaults (lowest layer)
//!
//! Hardcoded fallback values for every recognized key. These match the
//! `#ifndef` fallbacks in the firmware's WiFi header.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A configuration key recognized by the firmware build.
///
/// Declaration order is the order definitions are emitted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConfigKey {
    WifiSsid,
    WifiPassword,
    OtaHostname,
    OtaPort,
    OtaPassword,
}

impl ConfigKey {
    /// All recognized keys, in emission order.
    pub const ALL: [ConfigKey; 5] = [
        ConfigKey::WifiSsid,
        ConfigKey::WifiPassword,
        ConfigKey::OtaHostname,
        ConfigKey::OtaPort,
        ConfigKey::OtaPassword,
    ];

    /// Name used in the env file, the process environment and the
    /// preprocessor definition.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WifiSsid => "WIFI_SSID",
            Self::WifiPassword => "WIFI_PASSWORD",
            Self::OtaHostname => "OTA_HOSTNAME",
            Self::OtaPort => "OTA_PORT",
            Self::OtaPassword => "OTA_PASSWORD",
        }
    }

    /// Credentials whose values must never reach console or JSON output.
    pub fn is_sensitive(&self) -> bool {
        matches!(self, Self::WifiSsid | Self::WifiPassword | Self::OtaPassword)
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed mapping from key to default value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultsTable {
    values: BTreeMap<ConfigKey, String>,
}

impl DefaultsTable {
    /// The firmware's built-in defaults.
    pub fn builtin() -> Self {
        let values = ConfigKey::ALL
            .into_iter()
            .map(|key| {
                let value = match key {
                    ConfigKey::WifiSsid => "YOUR_WIFI_SSID",
                    ConfigKey::WifiPassword => "YOUR_WIFI_PASSWORD",
                    ConfigKey::OtaHostname => "NINA-Dashboard",
                    ConfigKey::OtaPort => "3232",
                    ConfigKey::OtaPassword => "NINA_OTA_2024",
                };
                (key, value.to_string())
            })
            .collect();
        Self { values }
    }

    /// Copy of this table with one default replaced.
    pub fn with_value(mut self, key: ConfigKey, value: impl Into<String>) -> Self {
        self.values.insert(key, value.into());
        self
    }

    pub fn get(&self, key: ConfigKey) -> &str {
        // every constructor fills all keys
        self.values.get(&key).map(String::as_str).unwrap_or_default()
    }
}

impl Default for DefaultsTable {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_defaults() {
        let defaults = DefaultsTable::builtin();
        assert_eq!(defaults.get(ConfigKey::WifiSsid), "YOUR_WIFI_SSID");
        assert_eq!(defaults.get(ConfigKey::WifiPassword), "YOUR_WIFI_PASSWORD");
        assert_eq!(defaults.get(ConfigKey::OtaHostname), "NINA-Dashboard");
        assert_eq!(defaults.get(ConfigKey::OtaPort), "3232");
        assert_eq!(defaults.get(ConfigKey::OtaPassword), "NINA_OTA_2024");
    }

    #[test]
    fn test_key_names() {
        let names: Vec<&str> = ConfigKey::ALL.iter().map(|k| k.as_str()).collect();
        assert_eq!(
            names,
            vec!["WIFI_SSID", "WIFI_PASSWORD", "OTA_HOSTNAME", "OTA_PORT", "OTA_PASSWORD"]
        );
        assert_eq!(ConfigKey::OtaHostname.to_string(), "OTA_HOSTNAME");
    }

    #[test]
    fn test_emission_order_follows_declaration() {
        let mut sorted = ConfigKey::ALL;
        sorted.sort();
        assert_eq!(sorted, ConfigKey::ALL);
        assert_eq!(ConfigKey::ALL[3], ConfigKey::OtaPort);
    }

    #[test]
    fn test_sensitive_keys() {
        assert!(ConfigKey::WifiSsid.is_sensitive());
        assert!(ConfigKey::OtaPassword.is_sensitive());
        assert!(!ConfigKey::OtaHostname.is_sensitive());
        assert!(!ConfigKey::OtaPort.is_sensitive());
    }

    #[test]
    fn test_with_value() {
        let defaults = DefaultsTable::builtin().with_value(ConfigKey::OtaPort, "8266");
        assert_eq!(defaults.get(ConfigKey::OtaPort), "8266");
        assert_eq!(defaults.get(ConfigKey::OtaHostname), "NINA-Dashboard");
    }
}
