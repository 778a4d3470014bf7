//! Strip layout parameters and frame math.

use crate::model::{ItemIndex, Rect, Size};

/// Default gap, in points, kept on each side of every page.
pub const DEFAULT_PAGE_PADDING: f64 = 10.0;

/// Layout of a horizontally paging strip.
///
/// The strip is the visible view widened by `padding` on both sides, so one page
/// width (the strip width) holds a page plus a `2 * padding` gutter. Paging by one
/// strip width therefore moves exactly one page.
///
/// # Equality Semantics
/// Two layouts are equal if they produce identical page frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StripLayout {
    /// Strip bounds size (view size plus the two gutters).
    strip_size: Size,
    padding: f64,
}

impl StripLayout {
    /// Layout for a strip whose bounds have `strip_size`.
    pub fn new(strip_size: Size, padding: f64) -> Self {
        Self {
            strip_size,
            padding,
        }
    }

    /// Layout for a strip that fills a view of `view_size`.
    pub fn for_view(view_size: Size, padding: f64) -> Self {
        Self::new(Self::strip_frame(view_size, padding).size, padding)
    }

    /// Frame of the strip inside a view of `view_size`: shifted left by `padding`
    /// and widened by `2 * padding`.
    pub fn strip_frame(view_size: Size, padding: f64) -> Rect {
        Rect::new(
            -padding,
            0.0,
            view_size.width + 2.0 * padding,
            view_size.height,
        )
    }

    /// Width of one page slot (the strip width).
    pub fn page_width(&self) -> f64 {
        self.strip_size.width
    }

    /// Gap on each side of a page.
    pub fn padding(&self) -> f64 {
        self.padding
    }

    /// Bounds size of the whole strip.
    pub fn strip_size(&self) -> Size {
        self.strip_size
    }

    /// Frame of the page at `index` in strip content coordinates.
    ///
    /// `x = index * page_width + padding`, `width = page_width - 2 * padding`.
    pub fn frame_for_index(&self, index: ItemIndex) -> Rect {
        let page_width = self.page_width();
        Rect::new(
            page_width * index.get() as f64 + self.padding,
            0.0,
            (page_width - 2.0 * self.padding).max(0.0),
            self.strip_size.height,
        )
    }

    /// Scrollable content size for `item_count` pages.
    pub fn content_size(&self, item_count: usize) -> Size {
        Size::new(
            self.page_width() * item_count as f64,
            self.strip_size.height,
        )
    }

    /// Index of the page whose slot contains `offset_x`, before clamping.
    pub fn leading_index(&self, offset_x: f64) -> i64 {
        let page_width = self.page_width();
        if !(page_width.is_finite() && page_width > 0.0 && offset_x.is_finite()) {
            return 0;
        }
        (offset_x / page_width).floor() as i64
    }
}
