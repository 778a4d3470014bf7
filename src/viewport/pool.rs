//! Recycle pool of unbound pages.

use super::page::{Page, PageId, PageView};
use std::collections::HashSet;

/// Something the pool can hold: it has a stable identity and can be reset.
pub trait Recyclable {
    /// Identity used to reject duplicate entries.
    fn recycle_id(&self) -> PageId;

    /// Drop any bound index, content and state.
    fn prepare_for_reuse(&mut self);
}

impl<V: PageView> Recyclable for Page<V> {
    fn recycle_id(&self) -> PageId {
        self.id()
    }

    fn prepare_for_reuse(&mut self) {
        self.unbind();
    }
}

/// Free pages waiting to be rebound.
///
/// Dequeue order is unspecified; callers must not rely on FIFO or LIFO.
#[derive(Debug)]
pub struct RecyclePool<T> {
    pages: Vec<T>,
    ids: HashSet<PageId>,
}

impl<T> Default for RecyclePool<T> {
    fn default() -> Self {
        Self {
            pages: Vec::new(),
            ids: HashSet::new(),
        }
    }
}

impl<T: Recyclable> RecyclePool<T> {
    /// Empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset `page` and add it to the pool.
    ///
    /// Returns `false` (and discards the handle) if a page with the same identity is
    /// already pooled.
    pub fn enqueue(&mut self, mut page: T) -> bool {
        let id = page.recycle_id();
        if self.ids.contains(&id) {
            tracing::warn!(page = id.get(), "Page already in recycle pool, ignoring");
            return false;
        }
        page.prepare_for_reuse();
        self.ids.insert(id);
        self.pages.push(page);
        true
    }

    /// Take any one page out of the pool.
    pub fn dequeue(&mut self) -> Option<T> {
        let page = self.pages.pop()?;
        self.ids.remove(&page.recycle_id());
        Some(page)
    }

    /// Number of pooled pages.
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Whether the pool holds no pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Whether the page with `id` is pooled.
    pub fn contains(&self, id: PageId) -> bool {
        self.ids.contains(&id)
    }

    /// Identities of pooled pages, in no particular order.
    pub fn ids(&self) -> impl Iterator<Item = PageId> + '_ {
        self.ids.iter().copied()
    }

    /// Pooled pages, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.pages.iter()
    }
}
