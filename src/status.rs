//! Build-output status summary
//!
//! Only non-sensitive values are printed. The SSID is reported as set or
//! not set, never by value.

use std::io::{self, Write};

use crate::config::{ConfigKey, DefaultsTable, ResolvedConfig};

pub const SSID_SET: &str = "***SET***";
pub const SSID_NOT_SET: &str = "NOT SET (using default)";

/// Write the status summary.
pub fn write_status<W: Write>(
    resolved: &ResolvedConfig,
    defaults: &DefaultsTable,
    out: &mut W,
) -> io::Result<()> {
    let ssid = if resolved.get(ConfigKey::WifiSsid) != defaults.get(ConfigKey::WifiSsid) {
        SSID_SET
    } else {
        SSID_NOT_SET
    };

    writeln!(out, "WiFi Config:")?;
    writeln!(out, "  WIFI_SSID: {}", ssid)?;
    writeln!(out, "  OTA_HOSTNAME: {}", resolved.get(ConfigKey::OtaHostname))?;
    writeln!(out, "  OTA_PORT: {}", resolved.get(ConfigKey::OtaPort))?;
    Ok(())
}
