//! # Configuration
//!
//! Configuration is declared with [`confique`] and loaded in layers from TOML
//! files and environment variables.
//!
//! ## Resolution Order
//!
//! Highest priority first:
//! 1. **Environment variables**: `SPACED_STORE_PATH`, `SPACED_JSON_PRETTY`, ...
//! 2. **Project Config**: `.adaptive/spaced.toml` next to the project store.
//! 3. **Global Config**: `spaced.toml` in the OS config directory.
//! 4. **Compiled Defaults**: the `#[config(default = ...)]` values below.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `store.backend` | `json` | `json` document or `sqlite` database |
//! | `store.path` | unset | Explicit path of the store file |
//! | `scheduler.fail_interval` | `10` | Interval after a failed review |
//! | `scheduler.hard_floor` | `30` | Minimum interval after a hard review |
//! | `scheduler.good_floor` | `60` | Minimum interval after a good review |
//! | `scheduler.hard_growth` | `1.4` | Growth factor after a hard review |
//! | `scheduler.good_growth` | `2.2` | Growth factor after a good review |
//! | `output.json_pretty` | `true` | Indent JSON output |

use crate::error::{Result, SpacedError};
use confique::Config;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = "spaced.toml";

#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct SpacedConfig {
    #[config(nested)]
    pub store: StoreConfig,

    #[config(nested)]
    pub scheduler: SchedulerConfig,

    #[config(nested)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    #[default]
    Json,
    Sqlite,
}

impl BackendKind {
    pub fn default_file_name(self) -> &'static str {
        match self {
            BackendKind::Json => "data.json",
            BackendKind::Sqlite => "data.sqlite3",
        }
    }
}

#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct StoreConfig {
    /// Storage backend: "json" or "sqlite"
    #[config(default = "json")]
    pub backend: BackendKind,

    /// Explicit store file. When unset, the file lives in the scope's data directory.
    #[config(env = "SPACED_STORE_PATH")]
    pub path: Option<PathBuf>,
}

/// Interval policy. The defaults are the canonical 10 / 30 / 60 second floors.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SchedulerConfig {
    #[config(default = 10)]
    pub fail_interval: u64,

    #[config(default = 30)]
    pub hard_floor: u64,

    #[config(default = 60)]
    pub good_floor: u64,

    #[config(default = 1.4)]
    pub hard_growth: f64,

    #[config(default = 2.2)]
    pub good_growth: f64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            fail_interval: 10,
            hard_floor: 30,
            good_floor: 60,
            hard_growth: 1.4,
            good_growth: 2.2,
        }
    }
}

#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct OutputConfig {
    /// Indent JSON output
    #[config(default = true, env = "SPACED_JSON_PRETTY")]
    pub json_pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { json_pretty: true }
    }
}

impl SpacedConfig {
    /// Load configuration from env and the given files, earlier files winning.
    /// Missing files are skipped.
    pub fn load_layered<P: AsRef<Path>>(files: &[P]) -> Result<Self> {
        let mut builder = SpacedConfig::builder().env();
        for file in files {
            builder = builder.file(file.as_ref());
        }
        builder
            .load()
            .map_err(|e| SpacedError::Config(e.to_string()))
    }
}
