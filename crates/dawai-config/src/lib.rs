//! Configuration parsing and validation for dawai-invoices
//!
//! Supports TOML configuration with:
//! - Versioned schema
//! - Storage section (root directory override)
//! - Validation with clear error messages
//!
//! The original application hard-coded its storage root to a constant under
//! the user's home directory. The root is now an explicit configuration
//! value so tests and hosting processes can point the store elsewhere; the
//! default remains the existing on-disk location.

mod schema;
mod validation;

pub use schema::*;
pub use validation::*;

use std::path::Path;
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Validation failed: {errors:?}")]
    ValidationFailed { errors: Vec<ValidationError> },

    #[error("Unsupported config version: {0}")]
    UnsupportedVersion(u32),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Load and validate configuration from a TOML file
pub fn load_config(path: impl AsRef<Path>) -> ConfigResult<Config> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parse and validate configuration from a TOML string
pub fn parse_config(content: &str) -> ConfigResult<Config> {
    let raw: RawConfig = toml::from_str(content)?;

    // Check version
    if raw.config_version != CURRENT_CONFIG_VERSION {
        return Err(ConfigError::UnsupportedVersion(raw.config_version));
    }

    // Validate
    let errors = validate_config(&raw);
    if !errors.is_empty() {
        return Err(ConfigError::ValidationFailed { errors });
    }

    Ok(Config::from_raw(raw))
}

/// Current supported config version
pub const CURRENT_CONFIG_VERSION: u32 = 1;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn parse_minimal_config() {
        let config = r#"
            config_version = 1
        "#;

        let config = parse_config(config).unwrap();
        assert!(config.storage.root_dir.is_none());
        assert!(config.root_dir().to_string_lossy().contains("dawaiInvoices"));
    }

    #[test]
    fn parse_config_with_root_override() {
        let config = r#"
            config_version = 1

            [storage]
            root_dir = "/var/lib/dawai/invoices"
        "#;

        let config = parse_config(config).unwrap();
        assert_eq!(
            config.root_dir(),
            PathBuf::from("/var/lib/dawai/invoices")
        );
    }

    #[test]
    fn reject_wrong_version() {
        let config = r#"
            config_version = 99
        "#;

        let result = parse_config(config);
        assert!(matches!(result, Err(ConfigError::UnsupportedVersion(99))));
    }

    #[test]
    fn reject_relative_root() {
        let config = r#"
            config_version = 1

            [storage]
            root_dir = "invoices"
        "#;

        let result = parse_config(config);
        assert!(matches!(result, Err(ConfigError::ValidationFailed { .. })));
    }

    #[test]
    fn load_config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dawai.toml");
        std::fs::write(&path, "config_version = 1\n").unwrap();

        let config = load_config(&path).unwrap();
        assert!(config.storage.root_dir.is_none());
    }
}
