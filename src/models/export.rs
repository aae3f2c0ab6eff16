use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use thiserror::Error;

use crate::models::Catalog;

/// Default name of the downloadable artifact, kept identical to the web
/// editor so exports from either tool interchange cleanly.
pub const EXPORT_FILE_NAME: &str = "webxr-content.json";

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("file is not a valid catalog export: {0}")]
    InvalidFormat(#[from] serde_json::Error),
    #[error("failed to read import file: {0}")]
    ReadFailed(#[from] std::io::Error),
}

/// Pretty-printed catalog serialization. Key order follows the struct field
/// order, so identical catalogs always produce identical bytes.
pub fn export_bytes(catalog: &Catalog) -> Vec<u8> {
    let mut bytes = serde_json::to_vec_pretty(catalog)
        .expect("catalog serialization cannot fail for well-formed values");
    bytes.push(b'\n');
    bytes
}

/// Writes the export artifact. A directory path gets the default file name
/// appended; the full path of the written file is returned.
pub fn export_to_file(catalog: &Catalog, path: &Path) -> Result<PathBuf> {
    let target = if path.is_dir() {
        path.join(EXPORT_FILE_NAME)
    } else {
        path.to_path_buf()
    };

    fs::write(&target, export_bytes(catalog))
        .with_context(|| format!("Failed to write export file {}", target.display()))?;
    Ok(target)
}

/// Parses export bytes back into a catalog. The top-level `menu` mapping with
/// all three category keys must be present; anything else is a hard
/// `InvalidFormat`. The result replaces the working catalog wholesale.
pub fn import_bytes(bytes: &[u8]) -> Result<Catalog, ImportError> {
    let catalog = serde_json::from_slice(bytes)?;
    Ok(catalog)
}

pub fn import_from_file(path: &Path) -> Result<Catalog, ImportError> {
    let bytes = fs::read(path)?;
    import_bytes(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CategoryKey;

    #[test]
    fn test_export_import_round_trips() {
        let mut catalog = Catalog::sample();
        let id = catalog.add_experience(CategoryKey::Mr);
        catalog.update_field(&id, "rotation.y", "90");
        catalog.update_field(&id, "isExternal", "true");
        catalog.update_field(&id, "externalUrl", "https://example.com/xr");

        let bytes = export_bytes(&catalog);
        let imported = import_bytes(&bytes).unwrap();
        assert_eq!(imported, catalog);
    }

    #[test]
    fn test_export_is_pretty_printed_with_stable_key_order() {
        let bytes = export_bytes(&Catalog::new());
        let text = String::from_utf8(bytes).unwrap();

        assert!(text.starts_with("{\n"));
        assert!(text.ends_with("}\n"));
        let ar = text.find("\"ar\"").unwrap();
        let mr = text.find("\"mr\"").unwrap();
        let vr = text.find("\"vr\"").unwrap();
        assert!(ar < mr && mr < vr);
    }

    #[test]
    fn test_import_rejects_non_catalog_json() {
        assert!(matches!(
            import_bytes(b"not json at all"),
            Err(ImportError::InvalidFormat(_))
        ));
        // Valid JSON, but no menu mapping
        assert!(matches!(
            import_bytes(br#"{"items": []}"#),
            Err(ImportError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_import_tolerates_legacy_entries_without_transforms() {
        // The first web editor wrote entries without transform or timestamp
        // fields; those still import with defaults.
        let legacy = br#"{
            "menu": {
                "ar": {"title": "Augmented Reality", "experiences": [{
                    "id": "ar-123",
                    "title": "Old entry",
                    "description": "from the web editor",
                    "experienceTypes": ["ar"]
                }]},
                "mr": {"title": "Mixed Reality", "experiences": []},
                "vr": {"title": "Virtual Reality", "experiences": []}
            }
        }"#;

        let catalog = import_bytes(legacy).unwrap();
        let (key, experience) = catalog.find_experience("ar-123").unwrap();
        assert_eq!(key, CategoryKey::Ar);
        assert_eq!(experience.scale.x, 1.0);
        assert_eq!(experience.position.y, 0.0);
        assert!(!experience.is_external);
    }

    #[test]
    fn test_export_to_directory_uses_default_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let written = export_to_file(&Catalog::new(), dir.path()).unwrap();
        assert_eq!(written.file_name().unwrap(), EXPORT_FILE_NAME);
        assert!(written.exists());
    }
}
