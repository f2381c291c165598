//! Structured error types for mdwiki-core.
//!
//! The binary wraps these in `anyhow`; library consumers match on them.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for mdwiki-core operations
#[derive(Error, Debug)]
pub enum WikiError {
    /// I/O operation failed
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },

    /// Config file is not valid TOML or has the wrong shape
    #[error("Invalid config file {path:?}: {source}")]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// Config could not be serialized back to TOML
    #[error("Failed to serialize config: {source}")]
    ConfigSerialize {
        #[from]
        source: toml::ser::Error,
    },

    /// An explicitly requested config file does not exist
    #[error("Config not found at {path:?}")]
    ConfigNotFound { path: PathBuf },

    /// An environment override holds a value of the wrong type
    #[error("Invalid value for {var}: '{value}'")]
    InvalidEnv { var: &'static str, value: String },
}

/// Result type alias for mdwiki-core operations
pub type Result<T> = std::result::Result<T, WikiError>;

impl WikiError {
    /// Create a config parse error
    pub fn config_parse(path: impl Into<PathBuf>, source: toml::de::Error) -> Self {
        Self::ConfigParse {
            path: path.into(),
            source,
        }
    }

    /// Create a config not found error
    pub fn config_not_found(path: impl Into<PathBuf>) -> Self {
        Self::ConfigNotFound { path: path.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = WikiError::config_not_found("/tmp/missing.toml");
        assert!(err.to_string().contains("Config not found"));
        assert!(err.to_string().contains("/tmp/missing.toml"));

        let err = WikiError::InvalidEnv {
            var: "MDWIKI_PORT",
            value: "eighty".into(),
        };
        assert_eq!(err.to_string(), "Invalid value for MDWIKI_PORT: 'eighty'");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let err: WikiError = io_err.into();

        assert!(matches!(err, WikiError::Io { .. }));
    }
}
