//! Configuration management for kopilka
//!
//! This module handles loading, validation, and management of
//! kopilka configuration from YAML files.

pub mod error;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub use error::{ConfigError, ConfigResult};

// ==================== Configuration Types ====================

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8081
}

/// In-memory data settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Seed demo categories and transactions at startup
    #[serde(default = "default_true")]
    pub seed_demo_data: bool,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            seed_demo_data: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Page display settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Number of recent transactions on the overview page
    #[serde(default = "default_recent_transactions")]
    pub recent_transactions: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            recent_transactions: default_recent_transactions(),
        }
    }
}

fn default_recent_transactions() -> usize {
    5
}

/// Currency and number formatting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyConfig {
    /// Currency symbol appended after the amount
    #[serde(default = "default_symbol")]
    pub symbol: String,
    /// Thousands separator
    #[serde(default = "default_thousands_sep")]
    pub thousands_separator: String,
    /// Decimal separator
    #[serde(default = "default_decimal_sep")]
    pub decimal_separator: String,
    /// Maximum number of fraction digits shown
    #[serde(default = "default_max_fraction_digits")]
    pub max_fraction_digits: u32,
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        Self {
            symbol: default_symbol(),
            thousands_separator: default_thousands_sep(),
            decimal_separator: default_decimal_sep(),
            max_fraction_digits: default_max_fraction_digits(),
        }
    }
}

fn default_symbol() -> String {
    "₽".to_string()
}

// ru-RU groups thousands with a no-break space
fn default_thousands_sep() -> String {
    "\u{a0}".to_string()
}

fn default_decimal_sep() -> String {
    ",".to_string()
}

fn default_max_fraction_digits() -> u32 {
    3
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

const LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Data settings
    #[serde(default)]
    pub data: DataConfig,
    /// Display settings
    #[serde(default)]
    pub display: DisplayConfig,
    /// Currency settings
    #[serde(default)]
    pub currency: CurrencyConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: PathBuf) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        Self::from_yaml(&content)
    }

    /// Load configuration, falling back to defaults when the file is absent
    pub fn load_or_default(path: &Path) -> ConfigResult<Self> {
        match Self::load(path.to_path_buf()) {
            Err(ConfigError::FileNotFound { .. }) => Ok(Self::default()),
            other => other,
        }
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml(content: &str) -> ConfigResult<Self> {
        let config: Config = serde_yaml::from_str(content)?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> ConfigResult<()> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                reason: "Port must be greater than 0".to_string(),
            });
        }

        if self.currency.symbol.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "currency.symbol".to_string(),
                reason: "Currency symbol must not be empty".to_string(),
            });
        }

        if self.currency.max_fraction_digits > 10 {
            return Err(ConfigError::InvalidValue {
                field: "currency.max_fraction_digits".to_string(),
                reason: "Fraction digits must be between 0 and 10".to_string(),
            });
        }

        if !LOG_LEVELS.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "logging.level".to_string(),
                reason: format!("Log level must be one of: {}", LOG_LEVELS.join(", ")),
            });
        }

        Ok(())
    }

    /// Generate a default configuration file
    pub fn generate_default() -> &'static str {
        include_str!("../templates/default_config.yaml")
    }

    /// Socket address the server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.port, 8081);
        assert!(config.data.seed_demo_data);
        assert_eq!(config.display.recent_transactions, 5);
        assert_eq!(config.currency.symbol, "₽");
        assert_eq!(config.currency.thousands_separator, "\u{a0}");
        assert_eq!(config.currency.decimal_separator, ",");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_bundled_default_config_parses() {
        let config = Config::from_yaml(Config::generate_default()).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8081);
        assert_eq!(config.currency.thousands_separator, "\u{a0}");
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config = Config::from_yaml("server:\n  port: 9000\n").unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.bind_address(), "0.0.0.0:9000");
    }

    #[test]
    fn test_invalid_port() {
        let err = Config::from_yaml("server:\n  port: 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "server.port"));
    }

    #[test]
    fn test_invalid_log_level() {
        let err = Config::from_yaml("logging:\n  level: loud\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "logging.level"));
    }

    #[test]
    fn test_invalid_yaml() {
        let err = Config::from_yaml("server:\n  port: [8081\nlogging: {}\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidYaml(_)));
        assert!(err.to_string().contains("line"), "{}", err);
    }

    #[test]
    fn test_missing_file_falls_back_to_default() {
        let config = Config::load_or_default(Path::new("/nonexistent/kopilka.yaml")).unwrap();
        assert_eq!(config.server.port, 8081);

        let err = Config::load(PathBuf::from("/nonexistent/kopilka.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound { .. }));
    }
}
