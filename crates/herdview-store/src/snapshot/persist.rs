//! Snapshot slot persistence.

#![allow(clippy::result_large_err)]

use herdview_core::errors::ExError;
use herdview_core::Snapshot;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::atomic::atomic_write;
use crate::errors::{io_error, persistence_error, Result};

/// One JSON file holding the last snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotFile {
    path: PathBuf,
}

impl SnapshotFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Store `snapshot`, replacing any previous one.
    ///
    /// # Errors
    ///
    /// `Serialization` if the snapshot cannot be encoded, `Io` if the write
    /// fails.
    pub fn save(&self, snapshot: &Snapshot) -> Result<()> {
        let json = snapshot
            .to_json()
            .map_err(|e| ExError::from(e).with_op("snapshot_save"))?;
        atomic_write(&self.path, json.as_bytes())?;
        tracing::debug!(
            path = %self.path.display(),
            digest = %snapshot.digest(),
            size_bytes = json.len(),
            "snapshot saved"
        );
        Ok(())
    }

    /// Read the stored snapshot; `None` when the slot is empty.
    ///
    /// # Errors
    ///
    /// `Io` on read failure, `Persistence` when the file is not a snapshot.
    pub fn load(&self) -> Result<Option<Snapshot>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(io_error("snapshot_load", e)),
        };
        Snapshot::from_json(&text)
            .map(Some)
            .map_err(|e| persistence_error("snapshot_load", &e.to_string()))
    }

    /// Empty the slot. Clearing an empty slot succeeds.
    ///
    /// # Errors
    ///
    /// `Io` if the file exists but cannot be removed.
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::debug!(path = %self.path.display(), "snapshot slot cleared");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error("snapshot_clear", e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use herdview_core::errors::ExErrorKind;
    use tempfile::TempDir;

    #[test]
    fn test_empty_slot_loads_none() {
        let dir = TempDir::new().unwrap();
        let file = SnapshotFile::new(dir.path().join("last.json"));
        assert_eq!(file.load().unwrap(), None);
        file.clear().unwrap();
    }

    #[test]
    fn test_corrupt_slot_is_persistence_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("last.json");
        fs::write(&path, "{ not json").unwrap();
        let err = SnapshotFile::new(&path).load().unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::Persistence);
    }
}
