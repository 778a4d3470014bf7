//! pagestrip
//!
//! Viewport-driven virtualization for horizontally paging content strips.
//!
//! The library keeps only the pages near the viewport bound to items, recycles
//! off-screen pages, and preserves each page's pan/zoom across resizes. Rendering,
//! input handling and image decoding belong to the embedding UI, which plugs in
//! through [`provider::ItemProvider`], [`viewport::ViewportHost`] and
//! [`viewport::PageView`].

pub mod config;
pub mod logging;
pub mod model;
pub mod provider;
pub mod viewport;
