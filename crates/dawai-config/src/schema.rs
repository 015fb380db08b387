//! Raw configuration schema (as parsed from TOML)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw configuration as parsed from TOML
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawConfig {
    /// Config schema version
    pub config_version: u32,

    /// Storage settings
    #[serde(default)]
    pub storage: RawStorageConfig,
}

/// Storage-level settings
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawStorageConfig {
    /// Root directory for invoice period files
    /// (default: ~/dawaiInvoices, matching existing installations)
    pub root_dir: Option<PathBuf>,
}

/// Validated configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub storage: StorageConfig,
}

/// Validated storage settings
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Root directory override; `None` means use the default resolution
    pub root_dir: Option<PathBuf>,
}

impl Config {
    pub fn from_raw(raw: RawConfig) -> Self {
        Self {
            storage: StorageConfig {
                root_dir: raw.storage.root_dir,
            },
        }
    }

    /// Effective store root: the configured override, or the default
    /// (`$DAWAI_DATA_DIR`, then `~/dawaiInvoices`).
    pub fn root_dir(&self) -> PathBuf {
        self.storage
            .root_dir
            .clone()
            .unwrap_or_else(dawai_util::default_data_dir)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage: StorageConfig { root_dir: None },
        }
    }
}
