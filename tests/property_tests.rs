//! Property-based tests for tiling invariants.
//!
//! Tests validate:
//! 1. Visible ranges stay inside `[0, count)`
//! 2. Visible set matches the range with no duplicates, disjoint from the pool
//! 3. Recycled pages come back cleared
//! 4. Resizing to the same size changes nothing
//! 5. Resizing keeps the leading page

use pagestrip::model::{ItemIndex, Point, Size};
use pagestrip::provider::MemoryProvider;
use pagestrip::viewport::{
    compute_visible_range, PageContent, PageState, PageView, PagingStrip, StripLayout,
    TilerOptions, ViewportHost, ViewportTiler, ZoomablePage,
};
use proptest::prelude::*;
use std::collections::HashSet;

type Tiler = ViewportTiler<MemoryProvider, PagingStrip, ZoomablePage>;

const EPSILON: f64 = 1e-6;
const PADDING: f64 = 10.0;

fn tiler(count: usize, view: Size) -> Tiler {
    let host = PagingStrip::new(StripLayout::strip_frame(view, PADDING));
    ViewportTiler::with_default_pages(
        MemoryProvider::synthetic(count, 2000.0, 1500.0),
        host,
        TilerOptions::default(),
    )
}

/// Check every structural invariant the tiler promises after a pass.
fn check_invariants(tiler: &Tiler) -> Result<(), TestCaseError> {
    let range = tiler.visible_range();
    let visible = tiler.visible_indices();
    let expected: Vec<ItemIndex> = range.indices().collect();
    prop_assert_eq!(&visible, &expected, "visible keys must equal the range");

    let unique: HashSet<ItemIndex> = visible.iter().copied().collect();
    prop_assert_eq!(unique.len(), range.len());

    for page in tiler.pages() {
        prop_assert_eq!(page.state(), PageState::Bound);
        prop_assert!(
            !tiler.pool().contains(page.id()),
            "page {:?} is both visible and pooled",
            page.id()
        );
    }
    for page in tiler.pool().iter() {
        prop_assert_eq!(page.state(), PageState::Unbound);
        prop_assert_eq!(page.content(), PageContent::Empty);
    }

    let stats = tiler.stats();
    prop_assert_eq!(
        stats.pages_constructed as usize,
        tiler.pool().len() + visible.len(),
        "every constructed page is either visible or pooled"
    );
    Ok(())
}

fn view_size() -> impl Strategy<Value = Size> {
    (100.0f64..1200.0, 100.0f64..1200.0).prop_map(|(w, h)| Size::new(w.round(), h.round()))
}

// ===== Property 1: Range bounds =====

proptest! {
    #[test]
    fn range_stays_within_item_bounds(
        origin in -5000.0f64..50_000.0,
        width in 1.0f64..2000.0,
        page_width in 1.0f64..2000.0,
        count in 0usize..200,
    ) {
        let range = compute_visible_range(origin, width, page_width, count);
        if let (Some(first), Some(last)) = (range.first(), range.last()) {
            prop_assert!(first <= last);
            prop_assert!(last.get() < count);
        }
        if count == 0 {
            prop_assert!(range.is_empty());
        }
    }

    #[test]
    fn range_is_non_empty_when_viewport_overlaps_content(
        count in 1usize..200,
        page_width in 1.0f64..2000.0,
        fraction in 0.0f64..1.0,
        width in 1.0f64..2000.0,
    ) {
        let origin = (fraction * count as f64 * page_width).floor();
        prop_assume!(origin < count as f64 * page_width);
        let range = compute_visible_range(origin, width, page_width, count);
        prop_assert!(!range.is_empty());
        prop_assert_eq!(
            range.first().map(|i| i.get()),
            Some((origin / page_width).floor() as usize)
        );
    }

    #[test]
    fn range_covers_viewport(
        origin in 0.0f64..10_000.0,
        width in 1.0f64..1000.0,
        page_width in 10.0f64..1000.0,
    ) {
        let count = 2000;
        let range = compute_visible_range(origin, width, page_width, count);
        let first = range.first().unwrap().get() as f64;
        let last = range.last().unwrap().get() as f64;
        prop_assert!(first * page_width <= origin);
        prop_assert!((last + 1.0) * page_width >= origin + width - 1.0);
    }
}

// ===== Property 2: Visible set and pool stay consistent =====

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn scroll_sequences_preserve_invariants(
        count in 0usize..40,
        view in view_size(),
        offsets in prop::collection::vec(-2000.0f64..40_000.0, 1..30),
    ) {
        let mut tiler = tiler(count, view);
        check_invariants(&tiler)?;
        for offset in offsets {
            tiler.scroll_to(offset);
            check_invariants(&tiler)?;
        }
    }

    #[test]
    fn resizes_preserve_invariants(
        count in 1usize..40,
        views in prop::collection::vec(view_size(), 1..6),
        page in 0usize..40,
    ) {
        let mut tiler = tiler(count, Size::new(320.0, 480.0));
        tiler.scroll_to_page(ItemIndex::new(page));
        for view in views {
            tiler.on_layout_changed(view);
            check_invariants(&tiler)?;
        }
    }

    #[test]
    fn page_construction_stays_bounded(
        offsets in prop::collection::vec(0.0f64..20_000.0, 1..50),
    ) {
        let mut tiler = tiler(100, Size::new(320.0, 480.0));
        for offset in offsets {
            tiler.scroll_to(offset);
        }
        // a 340-wide viewport never shows more than two pages at once
        prop_assert!(tiler.stats().pages_constructed <= 4);
    }
}

// ===== Property 3: Recycled pages are cleared =====

proptest! {
    #[test]
    fn dequeued_pages_are_cleared(count in 2usize..30, target in 1usize..30) {
        let mut tiler = tiler(count, Size::new(320.0, 480.0));
        tiler.scroll_to_page(ItemIndex::new(target));
        for page in tiler.pool().iter() {
            prop_assert_eq!(page.index(), None);
            prop_assert!(page.metadata().is_none());
            prop_assert!(page.ticket().is_none());
            prop_assert!(page.view().image().is_none());
        }
    }
}

// ===== Property 4 & 5: Layout state preservation =====

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn same_size_resize_is_a_no_op(
        count in 1usize..20,
        page in 0usize..20,
        view in view_size(),
        zoom in 0.0f64..1.0,
        px in 0.0f64..2000.0,
        py in 0.0f64..1500.0,
    ) {
        let mut tiler = tiler(count, view);
        tiler.scroll_to_page(ItemIndex::new(page));
        let leading = tiler.current_page().unwrap();
        {
            let zoomable = tiler.page_mut(leading).unwrap().view_mut();
            let min = zoomable.min_zoom_scale();
            let max = zoomable.max_zoom_scale();
            zoomable.zoom_to(min + (max - min) * zoom, Point::new(px, py));
        }
        let before_offset = tiler.host().content_offset();
        let before: Vec<_> = tiler
            .pages()
            .map(|p| (p.index(), p.view().capture_view_state()))
            .collect();

        tiler.on_layout_changed(view);

        prop_assert!((tiler.host().content_offset().x - before_offset.x).abs() < EPSILON);
        for (index, state) in before {
            let page = tiler.page(index.unwrap()).unwrap();
            let after = page.view().capture_view_state();
            prop_assert!((after.scale - state.scale).abs() < EPSILON);
            prop_assert!((after.center_point.x - state.center_point.x).abs() < EPSILON);
            prop_assert!((after.center_point.y - state.center_point.y).abs() < EPSILON);
        }
    }

    #[test]
    fn resize_keeps_leading_index(
        count in 1usize..50,
        offset in 0.0f64..20_000.0,
        old_view in view_size(),
        new_view in view_size(),
    ) {
        let mut tiler = tiler(count, old_view);
        let old_width = tiler.layout().page_width();
        tiler.scroll_to(offset);
        let expected = ((offset / old_width).floor() as usize).min(count - 1);

        tiler.on_layout_changed(new_view);

        let new_width = tiler.layout().page_width();
        let offset_x = tiler.host().content_offset().x;
        prop_assert!(((offset_x / new_width) - expected as f64).abs() < EPSILON);
        prop_assert_eq!(tiler.current_page(), Some(ItemIndex::new(expected)));
        prop_assert_eq!(tiler.visible_range().first(), Some(ItemIndex::new(expected)));
    }
}
