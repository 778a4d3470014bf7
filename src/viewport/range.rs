//! Visible range calculation

use crate::model::ItemIndex;

/// Range of items visible in the current viewport.
///
/// Stored half-open (`start..end`) so the empty range needs no sentinel.
///
/// # Invariants
/// - `start <= end`
/// - `end <= item_count` of the provider it was computed against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VisibleRange {
    start: ItemIndex,
    end: ItemIndex,
}

impl VisibleRange {
    /// The empty range.
    pub const EMPTY: Self = Self {
        start: ItemIndex::new(0),
        end: ItemIndex::new(0),
    };

    /// Inclusive range `[first, last]`.
    ///
    /// # Panics
    /// In debug builds, panics if `first > last`.
    pub fn inclusive(first: ItemIndex, last: ItemIndex) -> Self {
        debug_assert!(first <= last, "first {first} > last {last}");
        Self {
            start: first,
            end: last.next(),
        }
    }

    /// First visible index, or `None` when empty.
    pub fn first(&self) -> Option<ItemIndex> {
        (!self.is_empty()).then_some(self.start)
    }

    /// Last visible index (inclusive), or `None` when empty.
    pub fn last(&self) -> Option<ItemIndex> {
        (!self.is_empty()).then(|| ItemIndex::new(self.end.get() - 1))
    }

    /// Number of visible items.
    pub fn len(&self) -> usize {
        self.end.get() - self.start.get()
    }

    /// Whether no item is visible.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Iterate over visible item indices in order.
    pub fn indices(&self) -> impl Iterator<Item = ItemIndex> {
        (self.start.get()..self.end.get()).map(ItemIndex::new)
    }

    /// Whether `index` lies in the range.
    pub fn contains(&self, index: ItemIndex) -> bool {
        self.start <= index && index < self.end
    }
}

/// Compute which item indices intersect the viewport.
///
/// `first = max(0, floor(origin_x / page_width))` and
/// `last = min(item_count - 1, floor((origin_x + viewport_width - 1) / page_width))`.
///
/// The trailing edge is pulled in by one unit so a page whose leading edge only
/// touches the viewport's trailing boundary is not counted.
///
/// Returns [`VisibleRange::EMPTY`] when there are no items, when the page width is
/// not a positive finite number, or when the viewport lies entirely outside the strip.
pub fn compute_visible_range(
    origin_x: f64,
    viewport_width: f64,
    page_width: f64,
    item_count: usize,
) -> VisibleRange {
    if item_count == 0 || !(page_width.is_finite() && page_width > 0.0) {
        return VisibleRange::EMPTY;
    }
    if !(origin_x.is_finite() && viewport_width.is_finite()) {
        return VisibleRange::EMPTY;
    }

    // `as` saturates for out-of-range floats
    let first = (origin_x / page_width).floor() as i64;
    let last = ((origin_x + viewport_width - 1.0) / page_width).floor() as i64;

    let max_index = i64::try_from(item_count - 1).unwrap_or(i64::MAX);
    let first = first.max(0);
    let last = last.min(max_index);

    if last < first {
        return VisibleRange::EMPTY;
    }

    // both are within [0, item_count - 1] here
    VisibleRange::inclusive(ItemIndex::new(first as usize), ItemIndex::new(last as usize))
}
