//! Mindra configuration.
//!
//! Configuration is a small TOML file. Resolution order:
//!
//! 1. An explicit path passed to [`MindraConfig::load`]
//! 2. `<platform config dir>/mindra/config.toml`
//! 3. Built-in defaults
//!
//! `MINDRA_DATA_DIR` and `MINDRA_ADMIN_SECRET` override whatever the file says.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::store::{DEFAULT_KEY_PREFIX, FileBackend, Store};
use crate::telemetry::DEFAULT_TELEMETRY_CAPACITY;

/// Project name used for the config directory.
pub const PROJECT_NAME: &str = "mindra";

/// Environment variable overriding [`MindraConfig::data_dir`].
pub const ENV_DATA_DIR: &str = "MINDRA_DATA_DIR";

/// Environment variable overriding [`MindraConfig::admin_secret`].
pub const ENV_ADMIN_SECRET: &str = "MINDRA_ADMIN_SECRET";

/// Shared secret used when none is configured. Prototype-grade only.
pub const DEFAULT_ADMIN_SECRET: &str = "mindra-admin";

/// Runtime configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MindraConfig {
    /// Directory holding the JSON documents. `None` keeps everything in memory.
    pub data_dir: Option<PathBuf>,

    /// Prefix prepended to every document key.
    pub key_prefix: String,

    /// Shared secret that grants the admin capability.
    pub admin_secret: String,

    /// Number of telemetry events kept before the oldest are evicted.
    pub telemetry_capacity: usize,

    /// Seed the built-in courses when no course catalog is stored.
    pub seed_default_courses: bool,
}

impl Default for MindraConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            key_prefix: DEFAULT_KEY_PREFIX.to_string(),
            admin_secret: DEFAULT_ADMIN_SECRET.to_string(),
            telemetry_capacity: DEFAULT_TELEMETRY_CAPACITY,
            seed_default_courses: true,
        }
    }
}

impl MindraConfig {
    /// Default config file location for this platform.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(PROJECT_NAME).join("config.toml"))
    }

    /// Resolve the config path: explicit path first, then the platform default.
    pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        match explicit {
            Some(path) => Some(PathBuf::from(path)),
            None => Self::default_config_path(),
        }
    }

    /// Load configuration and apply environment overrides.
    ///
    /// A missing file yields the defaults; a file that exists but does not
    /// parse is an error.
    pub fn load(explicit: Option<&str>) -> Result<Self> {
        let mut config = match Self::resolve_config_path(explicit) {
            Some(path) if path.exists() => Self::from_file(&path)?,
            Some(path) => {
                log::debug!("No config at {}, using defaults", path.display());
                Self::default()
            }
            None => Self::default(),
        };
        config.apply_overrides(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// Read and parse a config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
        let config = Self::from_toml_str(&content)
            .map_err(|e| Error::config(format!("Failed to parse {}: {e}", path.display())))?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::config(e.to_string()))
    }

    /// Serialize configuration to TOML text.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Apply overrides from a variable lookup (normally the process environment).
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup(ENV_DATA_DIR).filter(|v| !v.is_empty()) {
            self.data_dir = Some(PathBuf::from(dir));
        }
        if let Some(secret) = lookup(ENV_ADMIN_SECRET).filter(|v| !v.is_empty()) {
            self.admin_secret = secret;
        }
    }

    /// Check the configuration for values that cannot work.
    pub fn validate(&self) -> Result<()> {
        if self.admin_secret.is_empty() {
            return Err(Error::config("admin_secret must not be empty"));
        }
        if self.telemetry_capacity == 0 {
            return Err(Error::config("telemetry_capacity must be at least 1"));
        }
        Ok(())
    }

    /// Build the document store described by this configuration.
    pub fn open_store(&self) -> Result<Store> {
        self.validate()?;
        let store = match &self.data_dir {
            Some(dir) => {
                log::info!("Using file store at {}", dir.display());
                Store::new(Arc::new(FileBackend::new(dir)))
            }
            None => {
                log::info!("Using in-memory store");
                Store::in_memory()
            }
        };
        Ok(store.with_prefix(self.key_prefix.clone()))
    }
}
