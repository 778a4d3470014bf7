//! Scrolling host abstraction.

use crate::model::{Point, Rect, Size};

/// The scrolling container the tiler drives.
///
/// Mirrors what a platform scroll view exposes: a frame in its parent, bounds whose
/// origin is the current content offset, and a scrollable content size.
pub trait ViewportHost {
    /// Visible window in content coordinates (origin == content offset).
    fn bounds(&self) -> Rect;

    /// Current scroll position.
    fn content_offset(&self) -> Point;

    /// Scroll to `offset` without animation.
    fn set_content_offset(&mut self, offset: Point);

    /// Scrollable content extent.
    fn content_size(&self) -> Size;

    /// Resize the scrollable content.
    fn set_content_size(&mut self, size: Size);

    /// Reposition the host inside its parent view.
    fn set_frame(&mut self, frame: Rect);
}

/// In-memory host used when no platform scroll view exists.
///
/// Content offsets are stored as given; overscroll is allowed, as with a bouncing
/// scroll view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PagingStrip {
    frame: Rect,
    content_offset: Point,
    content_size: Size,
}

impl PagingStrip {
    /// Strip at `frame`, scrolled to the origin, with no content.
    pub fn new(frame: Rect) -> Self {
        Self {
            frame,
            content_offset: Point::ZERO,
            content_size: Size::ZERO,
        }
    }

    /// Frame of the strip in its parent view.
    pub fn frame(&self) -> Rect {
        self.frame
    }
}

impl ViewportHost for PagingStrip {
    fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.content_offset, self.frame.size)
    }

    fn content_offset(&self) -> Point {
        self.content_offset
    }

    fn set_content_offset(&mut self, offset: Point) {
        self.content_offset = offset;
    }

    fn content_size(&self) -> Size {
        self.content_size
    }

    fn set_content_size(&mut self, size: Size) {
        self.content_size = size;
    }

    fn set_frame(&mut self, frame: Rect) {
        self.frame = frame;
    }
}
