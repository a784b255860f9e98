use super::StorageBackend;
use crate::error::{Result, SpacedError};
use crate::model::Snapshot;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// JSON document on disk.
pub struct FsBackend {
    path: PathBuf,
}

impl FsBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parent_dir(&self) -> PathBuf {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    fn file_name(&self) -> &str {
        self.path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("data.json")
    }

    /// Exclusive advisory lock on a sidecar file next to the document.
    /// Held from the revision check through the rename; released on drop.
    fn lock(&self, dir: &Path) -> Result<File> {
        let lock_path = dir.join(format!(".{}.lock", self.file_name()));
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&lock_path)
            .map_err(|e| self.write_error(e))?;
        file.lock().map_err(|e| self.write_error(e))?;
        Ok(file)
    }

    fn write_error(&self, source: std::io::Error) -> SpacedError {
        SpacedError::StoreWrite {
            location: self.location(),
            source: source.into(),
        }
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).map_err(|e| self.write_error(e))?;
        }
        Ok(())
    }
}

impl StorageBackend for FsBackend {
    fn load_snapshot(&self) -> Result<Option<Snapshot>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let bytes = fs::read(&self.path).map_err(SpacedError::Io)?;
        let snapshot: Snapshot =
            serde_json::from_slice(&bytes).map_err(|e| SpacedError::StoreCorrupt {
                location: self.location(),
                reason: e.to_string(),
            })?;
        Ok(Some(snapshot))
    }

    fn save_snapshot(&self, snapshot: &Snapshot, expected_revision: u64) -> Result<()> {
        let dir = self.parent_dir();
        self.ensure_dir(&dir)?;
        let _lock = self.lock(&dir)?;

        let found = self.load_snapshot()?.map(|s| s.revision).unwrap_or(0);
        if found != expected_revision {
            return Err(SpacedError::Conflict {
                expected: expected_revision,
                found,
            });
        }

        let content = serde_json::to_string_pretty(snapshot)?;

        // Atomic write: temp file in the same directory, then rename over the document
        let tmp_path = dir.join(format!(".{}-{}.tmp", self.file_name(), Uuid::new_v4()));
        if let Err(e) = fs::write(&tmp_path, content) {
            let _ = fs::remove_file(&tmp_path);
            return Err(self.write_error(e));
        }
        if let Err(e) = fs::rename(&tmp_path, &self.path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(self.write_error(e));
        }

        Ok(())
    }

    fn exists(&self) -> bool {
        self.path.exists()
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
