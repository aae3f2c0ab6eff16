use crate::models::Catalog;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Ceiling on the serialized catalog, mirroring the browser storage budget
/// the format was designed around.
pub const STORAGE_LIMIT_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("catalog is {size} bytes, over the {limit} byte storage limit")]
    QuotaExceeded { size: usize, limit: usize },
    #[error("failed to write catalog: {0}")]
    WriteFailed(#[from] std::io::Error),
}

/// How the working catalog was obtained on startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    /// A previously saved snapshot was read back.
    Loaded,
    /// No snapshot existed yet; a sample catalog was seeded.
    FirstRun,
    /// The snapshot was unreadable; a sample catalog replaced it. Callers
    /// should surface a non-fatal warning.
    Recovered,
}

/// Storage manager for disk operations. One JSON file holds the entire
/// serialized catalog; backups live beside it.
#[derive(Debug)]
pub struct StorageManager {
    data_dir: PathBuf,
    catalog_file: PathBuf,
}

impl StorageManager {
    pub fn new() -> Result<Self> {
        let data_dir = dirs::data_dir()
            .context("Failed to get data directory")?
            .join("xrforge");
        Self::with_data_dir(data_dir)
    }

    /// Builds a manager rooted at an explicit directory. Used by the CLI's
    /// `--data-dir` flag and by tests.
    pub fn with_data_dir(data_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&data_dir).context("Failed to create data directory")?;
        let catalog_file = data_dir.join("catalog.json");

        Ok(Self {
            data_dir,
            catalog_file,
        })
    }

    /// Reads the last saved snapshot. Absence or a parse failure degrades to
    /// a sample catalog rather than propagating an error.
    pub fn load_catalog(&self) -> (Catalog, LoadStatus) {
        if !self.catalog_file.exists() {
            return (Catalog::sample(), LoadStatus::FirstRun);
        }

        match fs::read_to_string(&self.catalog_file) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(catalog) => (catalog, LoadStatus::Loaded),
                Err(_) => (Catalog::sample(), LoadStatus::Recovered),
            },
            Err(_) => (Catalog::sample(), LoadStatus::Recovered),
        }
    }

    /// Serializes the catalog and writes it under the fixed key. The size
    /// ceiling is checked before anything touches the disk, and the write
    /// goes through a temp file + rename so a failure never leaves a partial
    /// snapshot behind.
    pub fn save_catalog(&self, catalog: &Catalog) -> Result<(), StorageError> {
        let content = serde_json::to_string(catalog).map_err(std::io::Error::other)?;

        if content.len() > STORAGE_LIMIT_BYTES {
            return Err(StorageError::QuotaExceeded {
                size: content.len(),
                limit: STORAGE_LIMIT_BYTES,
            });
        }

        let tmp_file = self.catalog_file.with_extension("json.tmp");
        fs::write(&tmp_file, content)?;
        fs::rename(&tmp_file, &self.catalog_file)?;
        Ok(())
    }

    /// Copies the current snapshot to a timestamped file under `backups/`.
    /// Returns None when there is nothing saved yet.
    pub fn backup_catalog(&self) -> Result<Option<PathBuf>> {
        if !self.catalog_file.exists() {
            return Ok(None);
        }

        let backup_dir = self.data_dir.join("backups");
        fs::create_dir_all(&backup_dir).context("Failed to create backup directory")?;

        let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S");
        let backup_file = backup_dir.join(format!("catalog_{}.json", timestamp));

        fs::copy(&self.catalog_file, &backup_file).context("Failed to back up catalog")?;
        Ok(Some(backup_file))
    }

    pub fn catalog_file(&self) -> &Path {
        &self.catalog_file
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CategoryKey;

    fn temp_manager() -> (tempfile::TempDir, StorageManager) {
        let dir = tempfile::tempdir().unwrap();
        let manager = StorageManager::with_data_dir(dir.path().join("xrforge")).unwrap();
        (dir, manager)
    }

    #[test]
    fn test_load_without_snapshot_seeds_samples() {
        let (_dir, manager) = temp_manager();
        let (catalog, status) = manager.load_catalog();

        assert_eq!(status, LoadStatus::FirstRun);
        assert_eq!(catalog.category(CategoryKey::Ar).experiences.len(), 2);
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let (_dir, manager) = temp_manager();
        let mut catalog = Catalog::new();
        let id = catalog.add_experience(CategoryKey::Mr);
        catalog.update_field(&id, "position.z", "-1.25");

        manager.save_catalog(&catalog).unwrap();
        let (loaded, status) = manager.load_catalog();

        assert_eq!(status, LoadStatus::Loaded);
        assert_eq!(loaded, catalog);
    }

    #[test]
    fn test_corrupt_snapshot_recovers_to_samples() {
        let (_dir, manager) = temp_manager();
        std::fs::write(manager.catalog_file(), "{not json").unwrap();

        let (catalog, status) = manager.load_catalog();
        assert_eq!(status, LoadStatus::Recovered);
        assert_eq!(catalog.category(CategoryKey::Vr).experiences.len(), 2);
    }

    #[test]
    fn test_oversized_save_fails_and_keeps_previous_snapshot() {
        let (_dir, manager) = temp_manager();
        let small = Catalog::new();
        manager.save_catalog(&small).unwrap();

        let mut huge = Catalog::new();
        let id = huge.add_experience(CategoryKey::Ar);
        huge.update_field(&id, "description", &"x".repeat(STORAGE_LIMIT_BYTES + 1));

        match manager.save_catalog(&huge) {
            Err(StorageError::QuotaExceeded { size, limit }) => {
                assert!(size > limit);
            }
            other => panic!("expected QuotaExceeded, got {:?}", other),
        }

        let (loaded, status) = manager.load_catalog();
        assert_eq!(status, LoadStatus::Loaded);
        assert_eq!(loaded, small);
    }

    #[test]
    fn test_backup_copies_current_snapshot() {
        let (_dir, manager) = temp_manager();
        assert!(manager.backup_catalog().unwrap().is_none());

        manager.save_catalog(&Catalog::sample()).unwrap();
        let backup = manager.backup_catalog().unwrap().unwrap();
        assert!(backup.exists());
        assert!(
            backup
                .file_name()
                .unwrap()
                .to_string_lossy()
                .starts_with("catalog_")
        );
    }
}
