//! Item providers.
//!
//! The tiler never owns items. It asks an [`ItemProvider`] for the item count, for
//! per-item metadata and for content whenever a page is bound to an index:
//! - [`MemoryProvider`] keeps metadata in memory (synthetic strips, tests)
//! - [`CatalogProvider`] reads a JSON image manifest and image files from disk

use crate::model::{Image, ItemIndex, ItemMetadata, ProviderError};

pub mod catalog;
pub mod memory;

pub use catalog::CatalogProvider;
pub use memory::MemoryProvider;

/// Source of items for a paging strip.
///
/// # Contract
/// - `count()` is the number of items; indices are `[0, count)`.
/// - `metadata()` and `content()` fail with [`ProviderError::NotFound`] for an index
///   outside that range. The tiler never asks for one.
/// - `content()` may fail with [`ProviderError::LoadError`]; the caller substitutes a
///   placeholder.
pub trait ItemProvider {
    /// Number of items available.
    fn count(&self) -> usize;

    /// Name and natural size of the item at `index`.
    fn metadata(&self, index: ItemIndex) -> Result<ItemMetadata, ProviderError>;

    /// Content of the item at `index`.
    fn content(&self, index: ItemIndex) -> Result<Image, ProviderError>;
}

impl<P: ItemProvider + ?Sized> ItemProvider for Box<P> {
    fn count(&self) -> usize {
        (**self).count()
    }

    fn metadata(&self, index: ItemIndex) -> Result<ItemMetadata, ProviderError> {
        (**self).metadata(index)
    }

    fn content(&self, index: ItemIndex) -> Result<Image, ProviderError> {
        (**self).content(index)
    }
}

/// Check `index` against `count`, producing the provider-side `NotFound` error.
pub(crate) fn check_index(index: ItemIndex, count: usize) -> Result<usize, ProviderError> {
    if index.get() < count {
        Ok(index.get())
    } else {
        Err(ProviderError::NotFound { index, count })
    }
}
