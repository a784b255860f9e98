//! # Scopes: Project vs Global
//!
//! Review state can live next to a project or with the user:
//!
//! - **Project**: `<project>/.adaptive/`, the directory where learning
//!   material is worked on.
//! - **Global**: the OS-appropriate data directory (via the `directories`
//!   crate), shared by every project.
//!
//! ## Project Detection
//!
//! [`find_project_root`] walks up from the working directory looking for an
//! existing `.adaptive` directory, stopping at `HOME` or the filesystem root.
//! When none is found, `<cwd>/.adaptive` is used and created on first write.
//!
//! ## Store Path Resolution
//!
//! Highest priority first:
//! 1. `data_override` (the CLI `--data` flag). A path with an extension is
//!    the store file itself, anything else is a directory holding it.
//! 2. `store.path` from configuration (or `SPACED_STORE_PATH`).
//! 3. The scope directory plus the backend's default file name
//!    (`data.json` or `data.sqlite3`).
//!
//! ## Environment Variables
//!
//! * `SPACED_GLOBAL_DATA` - Overrides the global data and config directory.
//!   Primarily used by tests to isolate global state.

use crate::api::ReviewApi;
use crate::config::{BackendKind, SpacedConfig, CONFIG_FILENAME};
use crate::error::{Result, SpacedError};
use crate::scheduler::IntervalScheduler;
use crate::store::fs_backend::FsBackend;
use crate::store::sqlite_backend::SqliteBackend;
use crate::store::{ConfiguredBackend, ReviewStore};
use directories::{BaseDirs, ProjectDirs};
use serde::Serialize;
use std::path::{Path, PathBuf};

pub const DATA_DIR_NAME: &str = ".adaptive";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Project,
    Global,
}

pub struct SpacedContext {
    pub api: ReviewApi<ConfiguredBackend>,
    pub scope: Scope,
    pub config: SpacedConfig,
    pub data_path: PathBuf,
}

/// Walk up from `cwd` to the closest directory containing `.adaptive`.
pub fn find_project_root(cwd: &Path) -> Option<PathBuf> {
    let home_dir = BaseDirs::new().map(|bd| bd.home_dir().to_path_buf());
    let mut current = cwd.to_path_buf();

    loop {
        if current.join(DATA_DIR_NAME).is_dir() {
            return Some(current);
        }

        if let Some(ref home) = home_dir {
            if &current == home {
                return None;
            }
        }

        match current.parent() {
            Some(parent) if parent != current => {
                current = parent.to_path_buf();
            }
            _ => return None,
        }
    }
}

fn global_dirs() -> Result<(PathBuf, PathBuf)> {
    if let Ok(dir) = std::env::var("SPACED_GLOBAL_DATA") {
        let dir = PathBuf::from(dir);
        return Ok((dir.clone(), dir));
    }
    let proj_dirs = ProjectDirs::from("com", "spaced", "spaced")
        .ok_or_else(|| SpacedError::Config("Could not determine data directory".to_string()))?;
    Ok((
        proj_dirs.data_dir().to_path_buf(),
        proj_dirs.config_dir().to_path_buf(),
    ))
}

/// Resolve the store file from an explicit override, configuration or scope directory.
pub fn resolve_store_path(
    scope_dir: &Path,
    config: &SpacedConfig,
    data_override: Option<&Path>,
) -> PathBuf {
    let default_name = config.store.backend.default_file_name();
    match data_override {
        Some(path) if path.extension().is_some() => path.to_path_buf(),
        Some(dir) => dir.join(default_name),
        None => config
            .store
            .path
            .clone()
            .unwrap_or_else(|| scope_dir.join(default_name)),
    }
}

pub fn build_backend(kind: BackendKind, path: PathBuf) -> ConfiguredBackend {
    match kind {
        BackendKind::Json => ConfiguredBackend::Json(FsBackend::new(path)),
        BackendKind::Sqlite => ConfiguredBackend::Sqlite(SqliteBackend::new(path)),
    }
}

/// Detect scope, load layered configuration and wire up the API.
pub fn initialize(
    cwd: &Path,
    use_global: bool,
    data_override: Option<PathBuf>,
) -> Result<SpacedContext> {
    let (global_data_dir, global_config_dir) = global_dirs()?;
    let project_dir = find_project_root(cwd)
        .map(|root| root.join(DATA_DIR_NAME))
        .unwrap_or_else(|| cwd.join(DATA_DIR_NAME));

    let scope = if use_global {
        Scope::Global
    } else {
        Scope::Project
    };

    // Global operations must not pick up project configuration
    let config_files = match scope {
        Scope::Global => vec![global_config_dir.join(CONFIG_FILENAME)],
        Scope::Project => vec![
            project_dir.join(CONFIG_FILENAME),
            global_config_dir.join(CONFIG_FILENAME),
        ],
    };
    let config = SpacedConfig::load_layered(&config_files)?;

    let scope_dir = match scope {
        Scope::Project => &project_dir,
        Scope::Global => &global_data_dir,
    };
    let data_path = resolve_store_path(scope_dir, &config, data_override.as_deref());
    tracing::debug!(?scope, path = %data_path.display(), backend = ?config.store.backend, "initialized context");

    let backend = build_backend(config.store.backend, data_path.clone());
    let api = ReviewApi::new(
        ReviewStore::with_backend(backend),
        IntervalScheduler::new(config.scheduler.clone()),
    );

    Ok(SpacedContext {
        api,
        scope,
        config,
        data_path,
    })
}
