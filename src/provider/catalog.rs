//! Image catalog provider.
//!
//! A catalog is a JSON manifest listing images in display order:
//!
//! ```json
//! [
//!   { "name": "Lake", "width": 2000, "height": 1500 },
//!   { "name": "Shed", "width": 1500, "height": 2000 }
//! ]
//! ```
//!
//! Image files live next to the manifest as `<name>.jpg`. Bytes are read on each
//! `content()` call (no caching) and are not decoded.

use super::{check_index, ItemProvider};
use crate::model::{CatalogError, Image, ItemIndex, ItemMetadata, ProviderError};
use std::path::{Path, PathBuf};

/// File extension of catalog images.
pub const IMAGE_EXTENSION: &str = "jpg";

/// Provider reading metadata from a manifest and content from image files.
#[derive(Debug, Clone)]
pub struct CatalogProvider {
    root: PathBuf,
    items: Vec<ItemMetadata>,
}

impl CatalogProvider {
    /// Load a catalog from its manifest file.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Read` if the manifest cannot be read and
    /// `CatalogError::Parse` if it is not a valid item list.
    pub fn load(manifest: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let manifest = manifest.as_ref();

        let root = manifest
            .parent()
            .ok_or_else(|| CatalogError::NoParentDirectory(manifest.to_path_buf()))?
            .to_path_buf();

        let contents = std::fs::read_to_string(manifest).map_err(|source| CatalogError::Read {
            path: manifest.to_path_buf(),
            source,
        })?;

        let items: Vec<ItemMetadata> =
            serde_json::from_str(&contents).map_err(|source| CatalogError::Parse {
                path: manifest.to_path_buf(),
                source,
            })?;

        tracing::info!(manifest = ?manifest, items = items.len(), "Catalog loaded");

        Ok(Self { root, items })
    }

    /// Build a catalog from already-parsed items rooted at `root`.
    pub fn from_items(root: impl Into<PathBuf>, items: Vec<ItemMetadata>) -> Self {
        Self {
            root: root.into(),
            items,
        }
    }

    /// Path of the image file for `meta`.
    pub fn image_path(&self, meta: &ItemMetadata) -> PathBuf {
        self.root.join(format!("{}.{IMAGE_EXTENSION}", meta.name))
    }
}

impl ItemProvider for CatalogProvider {
    fn count(&self) -> usize {
        self.items.len()
    }

    fn metadata(&self, index: ItemIndex) -> Result<ItemMetadata, ProviderError> {
        let i = check_index(index, self.items.len())?;
        Ok(self.items[i].clone())
    }

    fn content(&self, index: ItemIndex) -> Result<Image, ProviderError> {
        let i = check_index(index, self.items.len())?;
        let meta = &self.items[i];
        let path = self.image_path(meta);
        let bytes = std::fs::read(&path).map_err(|e| ProviderError::LoadError {
            index,
            name: meta.name.clone(),
            reason: format!("{}: {e}", path.display()),
        })?;
        Ok(Image::new(meta.name.clone(), meta.size(), bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Size;
    use std::env;
    use std::fs;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = env::temp_dir().join(format!("pagestrip_catalog_{name}"));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).expect("Failed to create scratch dir");
        dir
    }

    #[test]
    fn load_parses_manifest_in_order() {
        let dir = scratch_dir("order");
        let manifest = dir.join("ImageData.json");
        fs::write(
            &manifest,
            r#"[{"name": "Lake", "width": 2000, "height": 1500},
                {"name": "Shed", "width": 1500, "height": 2000}]"#,
        )
        .expect("Failed to write manifest");

        let catalog = CatalogProvider::load(&manifest).expect("manifest should load");
        assert_eq!(catalog.count(), 2);
        assert_eq!(
            catalog.metadata(ItemIndex::new(1)).unwrap(),
            ItemMetadata::new("Shed", 1500.0, 2000.0)
        );

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn load_reports_missing_manifest() {
        let result = CatalogProvider::load("/nonexistent/pagestrip/ImageData.json");
        assert!(matches!(result, Err(CatalogError::Read { .. })));
    }

    #[test]
    fn load_reports_malformed_manifest() {
        let dir = scratch_dir("malformed");
        let manifest = dir.join("ImageData.json");
        fs::write(&manifest, r#"{"name": "not a list"}"#).expect("Failed to write manifest");

        let result = CatalogProvider::load(&manifest);
        match result {
            Err(CatalogError::Parse { path, .. }) => assert_eq!(path, manifest),
            other => panic!("Expected Parse error, got {:?}", other),
        }

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn content_reads_image_bytes() {
        let dir = scratch_dir("content");
        fs::write(dir.join("Lake.jpg"), [0xFFu8, 0xD8, 0xFF]).expect("Failed to write image");
        let catalog =
            CatalogProvider::from_items(&dir, vec![ItemMetadata::new("Lake", 20.0, 10.0)]);

        let image = catalog.content(ItemIndex::new(0)).expect("image should load");
        assert_eq!(image.bytes(), Some(&[0xFFu8, 0xD8, 0xFF][..]));
        assert_eq!(image.size(), Size::new(20.0, 10.0));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn content_missing_file_is_load_error() {
        let dir = scratch_dir("missing");
        let catalog =
            CatalogProvider::from_items(&dir, vec![ItemMetadata::new("Gone", 20.0, 10.0)]);

        match catalog.content(ItemIndex::new(0)) {
            Err(ProviderError::LoadError { name, .. }) => assert_eq!(name, "Gone"),
            other => panic!("Expected LoadError, got {:?}", other),
        }

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn image_path_appends_extension() {
        let catalog = CatalogProvider::from_items("/photos", vec![]);
        let meta = ItemMetadata::new("Lake", 1.0, 1.0);
        assert_eq!(catalog.image_path(&meta), PathBuf::from("/photos/Lake.jpg"));
    }
}
