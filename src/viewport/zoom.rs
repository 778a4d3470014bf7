//! Headless zooming page.
//!
//! [`ZoomablePage`] models a page that shows one image inside a zoomable scroll
//! area: aspect-fit minimum zoom, a configurable maximum, centering of content
//! smaller than the page, and the center/scale bookkeeping needed to survive a
//! resize. Embedders with a real view layer implement [`PageView`] themselves and
//! can use this type as the reference for the expected math.

use super::page::{PageView, ViewState};
use crate::model::{Image, Point, Rect, Size};

/// Default maximum zoom: one image pixel per point.
pub const DEFAULT_MAX_ZOOM_SCALE: f64 = 1.0;

/// A page holding one zoomable image.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoomablePage {
    bounds: Size,
    image: Option<Image>,
    zoom_scale: f64,
    min_zoom_scale: f64,
    max_zoom_scale: f64,
    /// Ceiling for `max_zoom_scale`.
    max_zoom_limit: f64,
    content_offset: Point,
}

impl Default for ZoomablePage {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ZOOM_SCALE)
    }
}

impl ZoomablePage {
    /// Empty page whose zoom never exceeds `max_zoom_limit`.
    pub fn new(max_zoom_limit: f64) -> Self {
        Self {
            bounds: Size::ZERO,
            image: None,
            zoom_scale: 1.0,
            min_zoom_scale: 1.0,
            max_zoom_scale: 1.0,
            max_zoom_limit,
            content_offset: Point::ZERO,
        }
    }

    /// Size of the page the image is shown in.
    pub fn bounds(&self) -> Size {
        self.bounds
    }

    /// Image currently shown.
    pub fn image(&self) -> Option<&Image> {
        self.image.as_ref()
    }

    /// Current zoom scale.
    pub fn zoom_scale(&self) -> f64 {
        self.zoom_scale
    }

    /// Smallest allowed zoom: the aspect-fit scale.
    pub fn min_zoom_scale(&self) -> f64 {
        self.min_zoom_scale
    }

    /// Largest allowed zoom.
    pub fn max_zoom_scale(&self) -> f64 {
        self.max_zoom_scale
    }

    /// Scroll position within the zoomed image.
    pub fn content_offset(&self) -> Point {
        self.content_offset
    }

    /// Size of the zoomed image.
    pub fn content_size(&self) -> Size {
        self.image_size()
            .map(|size| size.scaled(self.zoom_scale))
            .unwrap_or(Size::ZERO)
    }

    /// Set the zoom scale, clamped to the current bounds, keeping the offset valid.
    pub fn set_zoom_scale(&mut self, scale: f64) {
        self.zoom_scale = self.clamp_scale(scale);
        self.content_offset = self.clamp_offset(self.content_offset);
    }

    /// Scroll to `offset`, clamped to the scrollable area.
    pub fn scroll_to(&mut self, offset: Point) {
        self.content_offset = self.clamp_offset(offset);
    }

    /// Zoom to `scale` and center on `point` (unscaled image coordinates).
    pub fn zoom_to(&mut self, scale: f64, point: Point) {
        self.zoom_scale = self.clamp_scale(scale);
        self.center_on(point);
    }

    /// Image point currently at the center of the page, in unscaled image coordinates.
    pub fn center_point(&self) -> Point {
        let origin = self.zoom_origin();
        let scale = self.effective_scale();
        Point::new(
            (self.content_offset.x + self.bounds.width / 2.0 - origin.x) / scale,
            (self.content_offset.y + self.bounds.height / 2.0 - origin.y) / scale,
        )
    }

    fn image_size(&self) -> Option<Size> {
        self.image
            .as_ref()
            .map(Image::size)
            .filter(|size| !size.is_degenerate())
    }

    fn effective_scale(&self) -> f64 {
        if self.zoom_scale > 0.0 {
            self.zoom_scale
        } else {
            1.0
        }
    }

    fn clamp_scale(&self, scale: f64) -> f64 {
        scale.max(self.min_zoom_scale).min(self.max_zoom_scale)
    }

    /// Where the zoomed image sits inside the page: centered along any axis where it
    /// is smaller than the bounds.
    fn zoom_origin(&self) -> Point {
        let content = self.content_size();
        let centered = |bounds: f64, content: f64| {
            if content < bounds {
                (bounds - content) / 2.0
            } else {
                0.0
            }
        };
        Point::new(
            centered(self.bounds.width, content.width),
            centered(self.bounds.height, content.height),
        )
    }

    fn clamp_offset(&self, offset: Point) -> Point {
        let content = self.content_size();
        let max_x = content.width - self.bounds.width;
        let max_y = content.height - self.bounds.height;
        Point::new(offset.x.min(max_x).max(0.0), offset.y.min(max_y).max(0.0))
    }

    fn center_on(&mut self, point: Point) {
        let origin = self.zoom_origin();
        let target = Point::new(
            point.x * self.zoom_scale + origin.x - self.bounds.width / 2.0,
            point.y * self.zoom_scale + origin.y - self.bounds.height / 2.0,
        );
        self.content_offset = self.clamp_offset(target);
    }
}

impl PageView for ZoomablePage {
    fn set_frame(&mut self, frame: Rect) {
        self.bounds = frame.size;
    }

    fn set_content(&mut self, image: Option<Image>) {
        self.image = image;
        self.zoom_scale = 1.0;
        self.content_offset = Point::ZERO;
        self.recompute_zoom_bounds(self.bounds);
        self.zoom_scale = self.min_zoom_scale;
    }

    fn capture_view_state(&self) -> ViewState {
        ViewState {
            center_point: self.center_point(),
            scale: self.zoom_scale,
            min_scale: self.min_zoom_scale,
        }
    }

    /// Keeps the zoom relative to the minimum (so a fully zoomed-out page stays fully
    /// zoomed out), clamps it into the new bounds and re-centers on the same point.
    fn apply_view_state(&mut self, state: &ViewState) {
        let ratio = if state.min_scale.is_finite() && state.min_scale > 0.0 {
            state.scale / state.min_scale
        } else {
            1.0
        };
        self.zoom_scale = self.clamp_scale(self.min_zoom_scale * ratio);
        self.center_on(state.center_point);
    }

    fn recompute_zoom_bounds(&mut self, bounds: Size) {
        self.bounds = bounds;
        match self.image_size() {
            Some(image) if !bounds.is_degenerate() => {
                let x_scale = bounds.width / image.width;
                let y_scale = bounds.height / image.height;
                let max_scale = self.max_zoom_limit;
                // images smaller than the page are not forced to zoom past 1:1
                self.min_zoom_scale = x_scale.min(y_scale).min(max_scale);
                self.max_zoom_scale = max_scale;
            }
            _ => {
                self.min_zoom_scale = 1.0;
                self.max_zoom_scale = 1.0;
            }
        }
        self.zoom_scale = self.clamp_scale(self.zoom_scale);
        self.content_offset = self.clamp_offset(self.content_offset);
    }
}
