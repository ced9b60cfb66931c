//! Page window arithmetic for question listings.
//!
//! Pages are 1-based. The valid range is `1..=ceil(total / page_size)`; an
//! empty listing has no valid page at all.

use std::ops::Range;

/// Fixed page size for the question listing.
pub const QUESTIONS_PER_PAGE: usize = 10;

/// Number of pages needed to show `total` items.
pub fn page_count(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size)
}

/// Returns the index range for `page`, or `None` when the page is out of range.
pub fn page_window(total: usize, page: i64, page_size: usize) -> Option<Range<usize>> {
    let pages = page_count(total, page_size);
    let page = usize::try_from(page).ok()?;
    if page == 0 || page > pages {
        return None;
    }

    let start = (page - 1) * page_size;
    let end = (start + page_size).min(total);
    Some(start..end)
}

/// Slices `items` to one page, preserving input order.
pub fn paginate<T>(items: &[T], page: i64, page_size: usize) -> Option<&[T]> {
    page_window(items.len(), page, page_size).map(|window| &items[window])
}
