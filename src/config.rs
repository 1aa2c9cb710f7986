//! Store configuration
//!
//! A JSON document; every field is optional:
//!
//! ```json
//! {
//!   "grid_path": "curve.grid",
//!   "helix_key": 11400714819323198485,
//!   "helix_rounds": 4,
//!   "default_type_tag": "generic",
//!   "sync_on_save": true
//! }
//! ```
//!
//! The key and round count decide where every chunk lands. A grid file must
//! be read back with the configuration it was written with.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::observability::{log_event_with_fields, Event};
use crate::placement::{Placement, DEFAULT_KEY, DEFAULT_ROUNDS};

/// Highest accepted Feistel round count
pub const MAX_ROUNDS: u32 = 64;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Result type for configuration
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Store configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Grid file location
    #[serde(default = "default_grid_path")]
    pub grid_path: PathBuf,

    /// Base key of the placement permutation
    #[serde(default = "default_helix_key")]
    pub helix_key: u64,

    /// Feistel rounds of the placement permutation
    #[serde(default = "default_helix_rounds")]
    pub helix_rounds: u32,

    /// Type tag used by literal stores when none is given
    #[serde(default = "default_type_tag")]
    pub default_type_tag: String,

    /// fsync the grid file on every save
    #[serde(default = "default_sync_on_save")]
    pub sync_on_save: bool,
}

fn default_grid_path() -> PathBuf {
    PathBuf::from("curve.grid")
}
fn default_helix_key() -> u64 {
    DEFAULT_KEY
}
fn default_helix_rounds() -> u32 {
    DEFAULT_ROUNDS
}
fn default_type_tag() -> String {
    "generic".to_string()
}
fn default_sync_on_save() -> bool {
    true
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            grid_path: default_grid_path(),
            helix_key: default_helix_key(),
            helix_rounds: default_helix_rounds(),
            default_type_tag: default_type_tag(),
            sync_on_save: default_sync_on_save(),
        }
    }
}

impl StoreConfig {
    /// Default configuration with another grid file
    pub fn with_grid_path(path: impl Into<PathBuf>) -> Self {
        Self {
            grid_path: path.into(),
            ..Self::default()
        }
    }

    /// Loads and validates a configuration file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&content)?;

        log_event_with_fields(
            Event::ConfigLoaded,
            &[
                ("grid_path", &config.grid_path.display().to_string()),
                ("path", &path.display().to_string()),
            ],
        );
        Ok(config)
    }

    /// Loads `path` if it exists, defaults otherwise
    pub fn load_or_default(path: &Path) -> ConfigResult<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parses and validates a JSON document
    pub fn from_json(content: &str) -> ConfigResult<Self> {
        let config: StoreConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks field ranges
    pub fn validate(&self) -> ConfigResult<()> {
        if self.grid_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid {
                field: "grid_path",
                reason: "must not be empty".to_string(),
            });
        }

        if self.helix_rounds == 0 || self.helix_rounds > MAX_ROUNDS {
            return Err(ConfigError::Invalid {
                field: "helix_rounds",
                reason: format!("must be in 1..={}, got {}", MAX_ROUNDS, self.helix_rounds),
            });
        }

        if self.default_type_tag.is_empty() {
            return Err(ConfigError::Invalid {
                field: "default_type_tag",
                reason: "must not be empty".to_string(),
            });
        }

        Ok(())
    }

    /// Placement function for this configuration
    pub fn placement(&self) -> Placement {
        Placement::new(self.helix_key, self.helix_rounds)
    }
}
