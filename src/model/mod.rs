//! Domain model: geometry, item identity and content, errors.

pub mod error;
pub mod geometry;
pub mod item;

pub use error::{AppError, CatalogError, ProviderError};
pub use geometry::{Point, Rect, Size};
pub use item::{Image, ItemIndex, ItemMetadata};
