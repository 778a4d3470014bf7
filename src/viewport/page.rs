//! Pages: reusable content slots and the view capability behind them.
//!
//! A [`Page`] is the core's handle on one slot. It records which item the slot is
//! bound to and where it sits in the strip, and forwards presentation work to a
//! [`PageView`] supplied by the embedding UI.
//!
//! # State machine
//!
//! ```text
//!            bind (tile)
//!  Unbound ─────────────▶ Bound
//!     ▲                     │
//!     └─────────────────────┘
//!           unbind (tile)
//! ```
//!
//! Pages start `Unbound` and are never destroyed while the tiler lives. Layout-state
//! restoration mutates a `Bound` page's frame and view state without changing state.

use super::content::BindingTicket;
use crate::model::{Image, ItemIndex, ItemMetadata, Point, Rect, Size};
use serde::Serialize;

/// Pan/zoom state of a page, captured before a resize and re-applied after.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewState {
    /// Content point (in unscaled image coordinates) at the center of the page.
    pub center_point: Point,
    /// Zoom scale at capture time.
    pub scale: f64,
    /// Minimum zoom scale at capture time, used to carry relative zoom across bounds.
    pub min_scale: f64,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            center_point: Point::ZERO,
            scale: 1.0,
            min_scale: 1.0,
        }
    }
}

/// Presentation capability of a page, implemented by the embedding UI.
///
/// The core only ever calls these in the order bind → (capture → frame →
/// recompute → apply)* → unbind.
pub trait PageView {
    /// Move/resize the page within the strip.
    fn set_frame(&mut self, frame: Rect);

    /// Show `image`, or clear the page when `None`.
    fn set_content(&mut self, image: Option<Image>);

    /// Current pan/zoom state, measured against the current bounds.
    fn capture_view_state(&self) -> ViewState;

    /// Restore a previously captured state against the current bounds.
    fn apply_view_state(&mut self, state: &ViewState);

    /// Recompute valid zoom bounds for a page of `bounds` size.
    fn recompute_zoom_bounds(&mut self, bounds: Size);
}

/// Stable identity of a page instance for the lifetime of its tiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PageId(u64);

impl PageId {
    /// Identity with the given raw value.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Raw identity value.
    pub fn get(&self) -> u64 {
        self.0
    }
}

/// Lifecycle state of a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageState {
    /// In the recycle pool: no index, no content.
    Unbound,
    /// Visible: carries one index's frame, content and view state.
    Bound,
}

/// What the page is currently showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PageContent {
    /// Nothing (unbound page).
    Empty,
    /// Placeholder while content is in flight.
    Pending,
    /// Real content from the provider.
    Loaded,
    /// Placeholder standing in for content that failed to load.
    Failed,
}

/// A reusable content slot.
#[derive(Debug)]
pub struct Page<V> {
    id: PageId,
    index: Option<ItemIndex>,
    frame: Rect,
    metadata: Option<ItemMetadata>,
    content: PageContent,
    ticket: Option<BindingTicket>,
    view: V,
}

impl<V: PageView> Page<V> {
    /// A freshly constructed, unbound page.
    pub fn new(id: PageId, view: V) -> Self {
        Self {
            id,
            index: None,
            frame: Rect::default(),
            metadata: None,
            content: PageContent::Empty,
            ticket: None,
            view,
        }
    }

    /// Stable identity of this slot.
    pub fn id(&self) -> PageId {
        self.id
    }

    /// Item index this page is bound to, if any.
    pub fn index(&self) -> Option<ItemIndex> {
        self.index
    }

    /// Whether the page is bound to an index.
    pub fn state(&self) -> PageState {
        if self.index.is_some() {
            PageState::Bound
        } else {
            PageState::Unbound
        }
    }

    /// Frame within the strip, in content coordinates.
    pub fn frame(&self) -> Rect {
        self.frame
    }

    /// Metadata of the bound item.
    pub fn metadata(&self) -> Option<&ItemMetadata> {
        self.metadata.as_ref()
    }

    /// Kind of content currently shown.
    pub fn content(&self) -> PageContent {
        self.content
    }

    /// Ticket identifying the current binding.
    pub fn ticket(&self) -> Option<BindingTicket> {
        self.ticket
    }

    /// Presentation behind this page.
    pub fn view(&self) -> &V {
        &self.view
    }

    /// Mutable presentation, e.g. to apply user zoom.
    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Bind to `index` at `frame`. Content is delivered separately via [`Page::show`].
    pub fn bind(
        &mut self,
        index: ItemIndex,
        frame: Rect,
        metadata: ItemMetadata,
        ticket: BindingTicket,
    ) {
        self.index = Some(index);
        self.metadata = Some(metadata);
        self.ticket = Some(ticket);
        self.set_frame(frame);
    }

    /// Hand `image` to the view and record what kind of content it is.
    pub fn show(&mut self, image: Image, content: PageContent) {
        self.view.set_content(Some(image));
        self.content = content;
    }

    /// Clear index, metadata, content and binding ticket.
    pub fn unbind(&mut self) {
        self.index = None;
        self.metadata = None;
        self.ticket = None;
        self.content = PageContent::Empty;
        self.view.set_content(None);
    }

    /// Move the page and forward the frame to the view.
    pub fn set_frame(&mut self, frame: Rect) {
        self.frame = frame;
        self.view.set_frame(frame);
    }
}
