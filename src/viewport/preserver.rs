//! Per-page pan/zoom preservation across a layout change.
//!
//! A resize runs in two phases around the re-layout:
//! 1. [`LayoutStatePreserver::snapshot`] records the leading page index from the old
//!    scroll offset and page width.
//! 2. [`LayoutStatePreserver::restore`] re-frames every bound page for the new layout,
//!    carries each page's center point and relative zoom across, and returns the
//!    scroll offset that keeps the same page leading.

use super::layout::StripLayout;
use super::page::{Page, PageView};

/// Holds the leading page index between snapshot and restore.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayoutStatePreserver {
    leading_index: Option<usize>,
}

impl LayoutStatePreserver {
    /// Preserver with no snapshot taken.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the leading page before re-layout: `floor(offset_x / old_page_width)`,
    /// never below zero.
    pub fn snapshot(&mut self, scroll_offset_x: f64, old_layout: &StripLayout) -> usize {
        let leading = old_layout.leading_index(scroll_offset_x).max(0) as usize;
        self.leading_index = Some(leading);
        leading
    }

    /// Leading index captured by the last snapshot not yet consumed by `restore`.
    pub fn leading_index(&self) -> Option<usize> {
        self.leading_index
    }

    /// Re-apply state to `pages` under `new_layout`.
    ///
    /// For every bound page: capture center and scale against the old bounds, move it
    /// to its new frame, recompute zoom bounds, then re-apply the captured state.
    ///
    /// Returns the new horizontal scroll offset, `leading_index * new_page_width`,
    /// with the leading index clamped to the last item. Returns `None` when no
    /// snapshot was taken; pages are still re-framed in that case.
    pub fn restore<'a, V, I>(
        &mut self,
        pages: I,
        new_layout: &StripLayout,
        item_count: usize,
    ) -> Option<f64>
    where
        V: PageView + 'a,
        I: IntoIterator<Item = &'a mut Page<V>>,
    {
        for page in pages {
            let Some(index) = page.index() else {
                continue;
            };
            let state = page.view().capture_view_state();
            let frame = new_layout.frame_for_index(index);
            page.set_frame(frame);
            page.view_mut().recompute_zoom_bounds(frame.size);
            page.view_mut().apply_view_state(&state);
            tracing::trace!(index = index.get(), scale = state.scale, "Restored page view state");
        }

        let leading = self.leading_index.take()?;
        let leading = leading.min(item_count.saturating_sub(1));
        Some(leading as f64 * new_layout.page_width())
    }
}
