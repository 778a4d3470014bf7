//! Viewport virtualization for a horizontally paging strip.
//!
//! Only pages near the viewport are materialized. Pages that scroll out are reset
//! and parked in a recycle pool, and a resize carries each visible page's pan/zoom
//! across to the new layout.
//!
//! # Module Structure
//!
//! - `range`: VisibleRange and the visible-index computation
//! - `layout`: StripLayout - page width, padding, frame math
//! - `host`: ViewportHost trait and the in-memory PagingStrip
//! - `page`: Page slot, PageView capability, ViewState
//! - `zoom`: ZoomablePage - reference PageView with zoom/center math
//! - `pool`: RecyclePool of unbound pages
//! - `preserver`: LayoutStatePreserver - snapshot/restore around a resize
//! - `content`: loading modes and stale-delivery tickets
//! - `tiler`: ViewportTiler - the owning controller

pub mod content;
pub mod host;
pub mod layout;
pub mod page;
pub mod pool;
pub mod preserver;
pub mod range;
pub mod tiler;
pub mod zoom;

pub use content::{BindingTicket, ContentLoading, ContentRequest, DeliveryOutcome};
pub use host::{PagingStrip, ViewportHost};
pub use layout::{StripLayout, DEFAULT_PAGE_PADDING};
pub use page::{Page, PageContent, PageId, PageState, PageView, ViewState};
pub use pool::{RecyclePool, Recyclable};
pub use preserver::LayoutStatePreserver;
pub use range::{compute_visible_range, VisibleRange};
pub use tiler::{PageReport, TilerOptions, TilerReport, TilerStats, ViewportTiler};
pub use zoom::{ZoomablePage, DEFAULT_MAX_ZOOM_SCALE};
