//! Configuration validation

use crate::schema::RawConfig;
use thiserror::Error;

/// Validation error
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    #[error("Storage config error: {0}")]
    StorageError(String),
}

/// Validate a raw configuration
pub fn validate_config(config: &RawConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if let Some(root) = &config.storage.root_dir {
        if root.as_os_str().is_empty() {
            errors.push(ValidationError::StorageError(
                "root_dir cannot be empty".into(),
            ));
        } else if !root.is_absolute() {
            errors.push(ValidationError::StorageError(format!(
                "root_dir must be an absolute path, got '{}'",
                root.display()
            )));
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::RawStorageConfig;
    use std::path::PathBuf;

    fn raw_with_root(root: Option<&str>) -> RawConfig {
        RawConfig {
            config_version: 1,
            storage: RawStorageConfig {
                root_dir: root.map(PathBuf::from),
            },
        }
    }

    #[test]
    fn absent_root_is_valid() {
        assert!(validate_config(&raw_with_root(None)).is_empty());
    }

    #[test]
    fn absolute_root_is_valid() {
        assert!(validate_config(&raw_with_root(Some("/data/invoices"))).is_empty());
    }

    #[test]
    fn empty_root_is_rejected() {
        let errors = validate_config(&raw_with_root(Some("")));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn relative_root_is_rejected() {
        let errors = validate_config(&raw_with_root(Some("invoices")));
        assert!(matches!(errors[0], ValidationError::StorageError(_)));
    }
}
