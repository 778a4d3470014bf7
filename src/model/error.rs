//! Error types for pagestrip.
//!
//! This module defines the error taxonomy using `thiserror`. Errors compose via `?` and
//! `From` conversions up to [`AppError`], which only the binary sees.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level error for the command-line driver
//!   - [`CatalogError`] - Image manifest could not be read or parsed
//!   - [`ConfigError`](crate::config::ConfigError) - Config file read/parse failures
//!   - [`LoggingError`](crate::logging::LoggingError) - Tracing subscriber setup failures
//! - [`ProviderError`] - Per-item failures reported by an
//!   [`ItemProvider`](crate::provider::ItemProvider)
//!
//! # Error Recovery Strategy
//!
//! The tiling core never fails. A [`ProviderError::LoadError`] is logged and the page
//! shows a placeholder instead. [`ProviderError::NotFound`] is prevented by clamping
//! every index into `[0, count)` before it reaches the provider. An empty provider is
//! a valid state that yields an empty visible range.

use crate::config::ConfigError;
use crate::logging::LoggingError;
use crate::model::ItemIndex;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level error for the `pagestrip` binary.
///
/// Everything here is fatal for the driver: without a catalog, config or log file the
/// simulated session cannot start. None of these originate in the tiling core.
#[derive(Debug, Error)]
pub enum AppError {
    /// The image catalog could not be loaded.
    #[error("Failed to load catalog: {0}")]
    Catalog(#[from] CatalogError),

    /// The configuration file exists but is unusable.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Tracing could not be initialized.
    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    /// Output could not be serialized.
    #[error("Failed to serialize report: {0}")]
    Report(#[from] serde_json::Error),
}

/// Errors reported by an item provider for a single item.
///
/// Both variants are recoverable from the core's point of view.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// The requested index is outside `[0, count)`.
    ///
    /// The tiler clamps indices before asking, so seeing this means the provider's
    /// count changed without `on_item_count_changed` being called.
    #[error("Item {index} not found (provider has {count} items)")]
    NotFound {
        /// Index that was requested.
        index: ItemIndex,
        /// Item count at the time of the request.
        count: usize,
    },

    /// The item exists but its content could not be loaded.
    ///
    /// **Recovery**: the page keeps a placeholder sized from the item's metadata and a
    /// warning is logged. Tiling continues.
    #[error("Failed to load content for item {index} ({name}): {reason}")]
    LoadError {
        /// Index whose content failed.
        index: ItemIndex,
        /// Item name, for diagnostics.
        name: String,
        /// Underlying failure description.
        reason: String,
    },
}

/// Errors loading an image catalog manifest.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The manifest file could not be read.
    #[error("Failed to read manifest at {path:?}: {source}")]
    Read {
        /// Manifest path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The manifest is not a JSON array of `{name, width, height}` objects.
    #[error("Invalid manifest at {path:?}: {source}")]
    Parse {
        /// Manifest path.
        path: PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// The manifest path has no parent directory to resolve images against.
    #[error("Manifest path has no parent directory: {0:?}")]
    NoParentDirectory(PathBuf),
}
