//! File-backed slot with atomic writes.
//!
//! Each slot is one `<name>.json` file in a data directory. Writes go to a sibling
//! `.tmp` file first and are renamed into place, so a crash mid-write leaves the old
//! file untouched.

use crate::domain::error::Result;
use crate::storage::backend::FavoritesSlot;
use std::path::{Path, PathBuf};

/// JSON file slot.
///
/// The directory is created lazily on first write, so constructing a slot never
/// fails and never touches the filesystem.
#[derive(Debug, Clone)]
pub struct JsonFileSlot {
    name: String,
    file_path: PathBuf,
}

impl JsonFileSlot {
    /// Slot `name` stored as `<dir>/<name>.json`.
    pub fn new(dir: impl AsRef<Path>, name: impl Into<String>) -> Self {
        let name = name.into();
        let file_path = dir.as_ref().join(format!("{name}.json"));
        Self { name, file_path }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }
}

impl FavoritesSlot for JsonFileSlot {
    fn read(&self) -> Result<Option<String>> {
        let _span = tracing::debug_span!("slot_read", slot = %self.name).entered();

        if !self.file_path.exists() {
            tracing::debug!(path = ?self.file_path, "slot not written yet");
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&self.file_path)?;
        tracing::debug!(bytes = contents.len(), "slot loaded");
        Ok(Some(contents))
    }

    fn write(&mut self, contents: &str) -> Result<()> {
        let _span = tracing::debug_span!("slot_write", slot = %self.name).entered();

        if let Some(parent) = self.file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let tmp_path = self.file_path.with_extension("tmp");

        tracing::trace!(tmp_path = ?tmp_path, "writing to temporary file");
        std::fs::write(&tmp_path, contents)?;

        tracing::trace!("renaming temporary file to final location");
        std::fs::rename(&tmp_path, &self.file_path)?;

        tracing::debug!(bytes = contents.len(), "slot saved");
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn unwritten_slot_reads_as_none() {
        let dir = TempDir::new().unwrap();
        let slot = JsonFileSlot::new(dir.path(), "bf_favorites_v1");
        assert_eq!(slot.read().unwrap(), None);
        assert_eq!(slot.path(), dir.path().join("bf_favorites_v1.json"));
    }

    #[test]
    fn write_creates_missing_directory_and_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");
        let mut slot = JsonFileSlot::new(&nested, "slot");

        slot.write("[1]").unwrap();
        slot.write("[2]").unwrap();

        assert_eq!(slot.read().unwrap().as_deref(), Some("[2]"));
        assert!(!nested.join("slot.tmp").exists());
    }
}
