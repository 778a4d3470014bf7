//! In-memory item provider.

use super::{check_index, ItemProvider};
use crate::model::{Image, ItemIndex, ItemMetadata, ProviderError};
use std::collections::HashSet;

/// Provider backed by a vector of metadata.
///
/// Content is synthesized from metadata (a small byte buffer tagged with the index).
/// Individual indices can be marked as failing to exercise load-error recovery.
#[derive(Debug, Clone, Default)]
pub struct MemoryProvider {
    items: Vec<ItemMetadata>,
    failing: HashSet<usize>,
}

impl MemoryProvider {
    /// Provider serving `items` in order.
    pub fn new(items: Vec<ItemMetadata>) -> Self {
        Self {
            items,
            failing: HashSet::new(),
        }
    }

    /// `count` items named `item-<i>`, all of the same natural size.
    pub fn synthetic(count: usize, width: f64, height: f64) -> Self {
        Self::new(
            (0..count)
                .map(|i| ItemMetadata::new(format!("item-{i}"), width, height))
                .collect(),
        )
    }

    /// Make `content()` fail for `index`.
    pub fn with_failing(mut self, index: usize) -> Self {
        self.failing.insert(index);
        self
    }

    /// Append an item. Tell the tiler via `on_item_count_changed`.
    pub fn push(&mut self, item: ItemMetadata) {
        self.items.push(item);
    }

    /// Drop every item from `len` onwards.
    pub fn truncate(&mut self, len: usize) {
        self.items.truncate(len);
    }
}

impl ItemProvider for MemoryProvider {
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
        if self.failing.contains(&i) {
            return Err(ProviderError::LoadError {
                index,
                name: meta.name.clone(),
                reason: "injected failure".to_string(),
            });
        }
        let tag = (i as u64).to_le_bytes().to_vec();
        Ok(Image::new(meta.name.clone(), meta.size(), tag))
    }
}
