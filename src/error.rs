//! Error types for configuration loading and flag emission.

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {message}")]
    Io { path: String, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    /// The build tool needs a numeric literal for OTA_PORT.
    #[error("OTA_PORT must be an integer port number, got '{value}': {reason}")]
    InvalidPort { value: String, reason: String },

    #[error("{key} cannot be emitted: {reason}")]
    InvalidValue { key: String, reason: String },

    #[error("Serialization error: {0}")]
    Serialize(String),
}

impl ConfigError {
    pub fn io(path: &std::path::Path, err: std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_invalid_port_message() {
        let err = ConfigError::InvalidPort {
            value: "notanumber".to_string(),
            reason: "invalid digit found in string".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("OTA_PORT"));
        assert!(msg.contains("notanumber"));
    }

    #[test]
    fn test_io_includes_path() {
        let err = ConfigError::io(
            Path::new("/tmp/project/.env"),
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.to_string().contains("/tmp/project/.env"));
    }
}
