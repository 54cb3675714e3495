//! Error types for kopilka-config

use thiserror::Error;

/// Configuration error type
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid YAML: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),

    #[error("Invalid field value: {field} - {reason}")]
    InvalidValue { field: String, reason: String },
}

/// Result type with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;
