//! Item identifiers, metadata and content handles.

use super::geometry::Size;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Index of an item in the provider's sequence. 0-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub struct ItemIndex(usize);

impl ItemIndex {
    /// Create a new ItemIndex from a raw 0-based value.
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Get the raw 0-based index value.
    pub fn get(&self) -> usize {
        self.0
    }

    /// Get the next item index.
    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl From<usize> for ItemIndex {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl std::fmt::Display for ItemIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Descriptive data for one item: its name and natural pixel size.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ItemMetadata {
    /// Item name; doubles as the image file stem in catalogs.
    pub name: String,
    /// Natural width of the content.
    #[serde(default)]
    pub width: f64,
    /// Natural height of the content.
    #[serde(default)]
    pub height: f64,
}

impl ItemMetadata {
    /// Metadata for `name` with a natural size of `width` by `height`.
    pub fn new(name: impl Into<String>, width: f64, height: f64) -> Self {
        Self {
            name: name.into(),
            width,
            height,
        }
    }

    /// Natural size of the item's image.
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// Image content bound to a page.
///
/// Pixel data is carried as opaque bytes; nothing here decodes it.
/// A placeholder has a size (so zoom bounds can be computed) but no bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    name: String,
    size: Size,
    bytes: Option<Arc<[u8]>>,
}

impl Image {
    /// Image with loaded bytes.
    pub fn new(name: impl Into<String>, size: Size, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            name: name.into(),
            size,
            bytes: Some(bytes.into()),
        }
    }

    /// Stand-in for content that is loading or failed to load.
    pub fn placeholder(name: impl Into<String>, size: Size) -> Self {
        Self {
            name: name.into(),
            size,
            bytes: None,
        }
    }

    /// Placeholder with no name and zero size.
    pub fn empty() -> Self {
        Self::placeholder(String::new(), Size::ZERO)
    }

    /// Name of the item this content belongs to.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Natural size of the content.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Raw encoded bytes; `None` for placeholders.
    pub fn bytes(&self) -> Option<&[u8]> {
        self.bytes.as_deref()
    }

    /// Whether this stands in for content that is not available.
    pub fn is_placeholder(&self) -> bool {
        self.bytes.is_none()
    }
}
