//! Viewport tiling: the owning controller of a paging strip.
//!
//! [`ViewportTiler`] owns the host, the visible pages, the recycle pool and the
//! layout-state preserver. All mutation goes through two entry points:
//! - [`ViewportTiler::on_viewport_changed`] after the host scrolled
//! - [`ViewportTiler::on_layout_changed`] when the containing view is resized
//!
//! Each call runs to completion before returning, so no caller ever observes a
//! half-tiled state. The tiler is not `Sync`-shared; drive it from one flow.

use super::content::{BindingTicket, ContentLoading, ContentRequest, DeliveryOutcome};
use super::host::ViewportHost;
use super::layout::{StripLayout, DEFAULT_PAGE_PADDING};
use super::page::{Page, PageContent, PageId, PageView};
use super::pool::RecyclePool;
use super::preserver::LayoutStatePreserver;
use super::range::{compute_visible_range, VisibleRange};
use crate::model::{Image, ItemIndex, ItemMetadata, Point, ProviderError, Rect, Size};
use crate::provider::ItemProvider;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, info, trace, warn};

/// Tunables for a tiler.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TilerOptions {
    /// Gap kept on each side of every page.
    pub page_padding: f64,
    /// How bound pages receive content.
    pub content_loading: ContentLoading,
}

impl Default for TilerOptions {
    fn default() -> Self {
        Self {
            page_padding: DEFAULT_PAGE_PADDING,
            content_loading: ContentLoading::Immediate,
        }
    }
}

/// Counters describing page churn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TilerStats {
    /// Pages built because the pool was empty.
    pub pages_constructed: u64,
    /// Pages moved from the visible set into the pool.
    pub pages_recycled: u64,
    /// Pages taken from the pool and rebound.
    pub pages_reused: u64,
    /// Content loads that failed and left a placeholder.
    pub load_failures: u64,
    /// Deferred deliveries discarded because the page had moved on.
    pub stale_deliveries: u64,
}

/// Serializable view of one visible page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageReport {
    /// Item the page is bound to.
    pub index: ItemIndex,
    /// Identity of the page instance.
    pub page: u64,
    /// Name of the bound item.
    pub name: String,
    /// Page frame in strip content coordinates.
    pub frame: Rect,
    /// Kind of content shown.
    pub content: PageContent,
}

/// Serializable view of the whole tiler.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TilerReport {
    /// Items known to the provider.
    pub item_count: usize,
    /// Horizontal scroll offset of the host.
    pub content_offset_x: f64,
    /// Width of one page slot.
    pub page_width: f64,
    /// First visible index.
    pub first: Option<ItemIndex>,
    /// Last visible index (inclusive).
    pub last: Option<ItemIndex>,
    /// Visible pages in index order.
    pub visible: Vec<PageReport>,
    /// Pages waiting in the recycle pool.
    pub pooled: usize,
    /// Churn counters.
    pub stats: TilerStats,
}

/// Keeps only the pages near the viewport materialized.
///
/// # Invariants
/// - Visible keys are exactly the indices of the last computed [`VisibleRange`].
/// - No page is both visible and pooled.
/// - Every visible page is bound to its key; every pooled page is unbound.
pub struct ViewportTiler<P, H, V> {
    provider: P,
    host: H,
    factory: Box<dyn FnMut() -> V>,
    options: TilerOptions,
    layout: StripLayout,
    visible: BTreeMap<ItemIndex, Page<V>>,
    pool: RecyclePool<Page<V>>,
    range: VisibleRange,
    preserver: LayoutStatePreserver,
    pending: Vec<ContentRequest>,
    next_page_id: u64,
    next_ticket: u64,
    stats: TilerStats,
}

impl<P, H, V> ViewportTiler<P, H, V>
where
    P: ItemProvider,
    H: ViewportHost,
    V: PageView,
{
    /// Take over `host` and tile it for the first time.
    ///
    /// The host's current bounds define the page width; frame it with
    /// [`StripLayout::strip_frame`] first. `factory` builds page views when the pool
    /// runs dry.
    pub fn new(
        provider: P,
        host: H,
        options: TilerOptions,
        factory: impl FnMut() -> V + 'static,
    ) -> Self {
        let layout = StripLayout::new(host.bounds().size, options.page_padding);
        let mut tiler = Self {
            provider,
            host,
            factory: Box::new(factory),
            options,
            layout,
            visible: BTreeMap::new(),
            pool: RecyclePool::new(),
            range: VisibleRange::EMPTY,
            preserver: LayoutStatePreserver::new(),
            pending: Vec::new(),
            next_page_id: 0,
            next_ticket: 0,
            stats: TilerStats::default(),
        };
        tiler.refresh_content_size();
        tiler.tile();
        tiler
    }

    // ===== Entry points =====

    /// Re-tile after the host's content offset changed.
    pub fn on_viewport_changed(&mut self) -> VisibleRange {
        self.tile()
    }

    /// Re-layout for a containing view of `view_size`, keeping the leading page and
    /// each visible page's pan/zoom.
    pub fn on_layout_changed(&mut self, view_size: Size) -> VisibleRange {
        let old_layout = self.layout;
        let offset = self.host.content_offset();
        let leading = self.preserver.snapshot(offset.x, &old_layout);

        let frame = StripLayout::strip_frame(view_size, self.options.page_padding);
        self.host.set_frame(frame);
        self.layout = StripLayout::new(frame.size, self.options.page_padding);
        self.refresh_content_size();

        let count = self.provider.count();
        if let Some(offset_x) = self
            .preserver
            .restore(self.visible.values_mut(), &self.layout, count)
        {
            self.host.set_content_offset(Point::new(offset_x, 0.0));
        }

        info!(
            leading,
            old_page_width = old_layout.page_width(),
            new_page_width = self.layout.page_width(),
            "Layout changed"
        );

        self.tile()
    }

    /// Scroll the host to `offset_x` and re-tile.
    pub fn scroll_to(&mut self, offset_x: f64) -> VisibleRange {
        let y = self.host.content_offset().y;
        self.host.set_content_offset(Point::new(offset_x, y));
        self.on_viewport_changed()
    }

    /// Scroll so `index` (clamped to the last item) is the leading page.
    pub fn scroll_to_page(&mut self, index: ItemIndex) -> VisibleRange {
        let last = self.provider.count().saturating_sub(1);
        let index = index.get().min(last);
        self.scroll_to(index as f64 * self.layout.page_width())
    }

    /// Pick up a changed item count: resize content and re-tile.
    pub fn on_item_count_changed(&mut self) -> VisibleRange {
        self.refresh_content_size();
        self.tile()
    }

    // ===== Deferred content =====

    /// Drain content requests queued by deferred binding.
    pub fn take_content_requests(&mut self) -> Vec<ContentRequest> {
        std::mem::take(&mut self.pending)
    }

    /// Requests still queued.
    pub fn pending_requests(&self) -> &[ContentRequest] {
        &self.pending
    }

    /// Apply fetched content if the page is still bound to the request.
    pub fn deliver_content(
        &mut self,
        request: ContentRequest,
        result: Result<Image, ProviderError>,
    ) -> DeliveryOutcome {
        let page = match self.visible.get_mut(&request.index) {
            Some(page) if page.ticket() == Some(request.ticket) => page,
            _ => {
                self.stats.stale_deliveries += 1;
                debug!(
                    index = request.index.get(),
                    ticket = request.ticket.get(),
                    "Discarding stale content delivery"
                );
                return DeliveryOutcome::Stale;
            }
        };

        match result {
            Ok(image) => {
                page.show(image, PageContent::Loaded);
                DeliveryOutcome::Applied
            }
            Err(err) => {
                self.stats.load_failures += 1;
                warn!(index = request.index.get(), error = %err, "Content load failed, keeping placeholder");
                let placeholder = placeholder_for(page.metadata());
                page.show(placeholder, PageContent::Failed);
                DeliveryOutcome::Failed
            }
        }
    }

    /// Fetch every queued request from the provider and deliver it.
    ///
    /// Returns the number of requests applied (successfully or as failures).
    pub fn load_pending_content(&mut self) -> usize {
        let requests = self.take_content_requests();
        let mut delivered = 0;
        for request in requests {
            let result = self.provider.content(request.index);
            if self.deliver_content(request, result) != DeliveryOutcome::Stale {
                delivered += 1;
            }
        }
        delivered
    }

    // ===== Introspection =====

    /// Range computed by the last tiling pass.
    pub fn visible_range(&self) -> VisibleRange {
        self.range
    }

    /// Indices of visible pages in ascending order.
    pub fn visible_indices(&self) -> Vec<ItemIndex> {
        self.visible.keys().copied().collect()
    }

    /// Visible page bound to `index`.
    pub fn page(&self, index: ItemIndex) -> Option<&Page<V>> {
        self.visible.get(&index)
    }

    /// Mutable visible page bound to `index`.
    pub fn page_mut(&mut self, index: ItemIndex) -> Option<&mut Page<V>> {
        self.visible.get_mut(&index)
    }

    /// Visible pages in index order.
    pub fn pages(&self) -> impl Iterator<Item = &Page<V>> {
        self.visible.values()
    }

    /// Pages not currently bound.
    pub fn pool(&self) -> &RecyclePool<Page<V>> {
        &self.pool
    }

    /// Churn counters since construction.
    pub fn stats(&self) -> TilerStats {
        self.stats
    }

    /// Layout from the last layout pass.
    pub fn layout(&self) -> &StripLayout {
        &self.layout
    }

    /// The scrolling host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable host access. Call [`Self::on_viewport_changed`] after scrolling it.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// The item provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Mutable provider access. Call [`Self::on_item_count_changed`] after changing
    /// the item count.
    pub fn provider_mut(&mut self) -> &mut P {
        &mut self.provider
    }

    /// Page currently leading the viewport, if any items exist.
    pub fn current_page(&self) -> Option<ItemIndex> {
        let count = self.provider.count();
        if count == 0 {
            return None;
        }
        let leading = self.layout.leading_index(self.host.content_offset().x);
        let index = leading.clamp(0, count as i64 - 1) as usize;
        Some(ItemIndex::new(index))
    }

    /// Serializable summary of the current state.
    pub fn report(&self) -> TilerReport {
        TilerReport {
            item_count: self.provider.count(),
            content_offset_x: self.host.content_offset().x,
            page_width: self.layout.page_width(),
            first: self.range.first(),
            last: self.range.last(),
            visible: self
                .visible
                .iter()
                .map(|(index, page)| PageReport {
                    index: *index,
                    page: page.id().get(),
                    name: page
                        .metadata()
                        .map(|m| m.name.clone())
                        .unwrap_or_default(),
                    frame: page.frame(),
                    content: page.content(),
                })
                .collect(),
            pooled: self.pool.len(),
            stats: self.stats,
        }
    }

    // ===== Tiling =====

    /// Recompute the visible range, recycle pages that left it and bind pages for
    /// indices that entered it.
    fn tile(&mut self) -> VisibleRange {
        let count = self.provider.count();
        let bounds = self.host.bounds();
        let range = compute_visible_range(
            bounds.min_x(),
            bounds.width(),
            self.layout.page_width(),
            count,
        );

        let evicted: Vec<ItemIndex> = self
            .visible
            .keys()
            .copied()
            .filter(|index| !range.contains(*index))
            .collect();
        for index in evicted {
            if let Some(page) = self.visible.remove(&index) {
                self.recycle(page);
            }
        }

        for index in range.indices() {
            if self.visible.contains_key(&index) {
                continue;
            }
            let page = self.obtain_page();
            let page = self.bind(page, index);
            self.visible.insert(index, page);
        }

        if range != self.range {
            debug!(
                first = ?range.first().map(|i| i.get()),
                last = ?range.last().map(|i| i.get()),
                visible = self.visible.len(),
                pooled = self.pool.len(),
                "Tiled pages"
            );
        }
        self.range = range;

        debug_assert_eq!(self.visible.len(), range.len());
        debug_assert!(self.visible.values().all(|p| !self.pool.contains(p.id())));

        range
    }

    fn obtain_page(&mut self) -> Page<V> {
        if let Some(page) = self.pool.dequeue() {
            self.stats.pages_reused += 1;
            return page;
        }
        let id = PageId::new(self.next_page_id);
        self.next_page_id += 1;
        self.stats.pages_constructed += 1;
        trace!(page = id.get(), "Constructing page");
        Page::new(id, (self.factory)())
    }

    fn bind(&mut self, mut page: Page<V>, index: ItemIndex) -> Page<V> {
        let metadata = match self.provider.metadata(index) {
            Ok(metadata) => metadata,
            Err(err) => {
                warn!(index = index.get(), error = %err, "Metadata unavailable, binding without it");
                ItemMetadata::default()
            }
        };

        let ticket = self.issue_ticket();
        let frame = self.layout.frame_for_index(index);
        page.bind(index, frame, metadata, ticket);

        match self.options.content_loading {
            ContentLoading::Immediate => match self.provider.content(index) {
                Ok(image) => page.show(image, PageContent::Loaded),
                Err(err) => {
                    self.stats.load_failures += 1;
                    warn!(index = index.get(), error = %err, "Content load failed, showing placeholder");
                    let placeholder = placeholder_for(page.metadata());
                    page.show(placeholder, PageContent::Failed);
                }
            },
            ContentLoading::Deferred => {
                let placeholder = placeholder_for(page.metadata());
                page.show(placeholder, PageContent::Pending);
                self.pending.push(ContentRequest { index, ticket });
            }
        }

        trace!(index = index.get(), page = page.id().get(), "Bound page");
        page
    }

    fn recycle(&mut self, page: Page<V>) {
        if let Some(ticket) = page.ticket() {
            self.pending.retain(|request| request.ticket != ticket);
        }
        trace!(
            index = ?page.index().map(|i| i.get()),
            page = page.id().get(),
            "Recycling page"
        );
        self.stats.pages_recycled += 1;
        self.pool.enqueue(page);
    }

    fn issue_ticket(&mut self) -> BindingTicket {
        let ticket = BindingTicket::new(self.next_ticket);
        self.next_ticket += 1;
        ticket
    }

    fn refresh_content_size(&mut self) {
        let size = self.layout.content_size(self.provider.count());
        self.host.set_content_size(size);
    }
}

impl<P, H, V> ViewportTiler<P, H, V>
where
    P: ItemProvider,
    H: ViewportHost,
    V: PageView + Default + 'static,
{
    /// Tiler that builds page views with `V::default()`.
    pub fn with_default_pages(provider: P, host: H, options: TilerOptions) -> Self {
        Self::new(provider, host, options, V::default)
    }
}

fn placeholder_for(metadata: Option<&ItemMetadata>) -> Image {
    metadata
        .map(|m| Image::placeholder(m.name.clone(), m.size()))
        .unwrap_or_else(Image::empty)
}

#[cfg(test)]
#[path = "tiler_tests.rs"]
mod tests;
