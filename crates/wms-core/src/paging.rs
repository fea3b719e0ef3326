//! Client-side pagination of filtered listings.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Most page buttons shown before the window collapses with ellipses.
const FULL_WINDOW: usize = 7;

/// One entry of the page selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageItem {
    Page(usize),
    Ellipsis,
}

impl fmt::Display for PageItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Page(n) => write!(f, "{n}"),
            Self::Ellipsis => f.write_str("…"),
        }
    }
}

/// Page numbers to show around `current` (1-based).
///
/// Every page when there are at most seven. Otherwise a five-page window
/// (pinned to the start or end near the edges), with the first and last
/// page always reachable and `…` marking gaps.
#[must_use]
pub fn page_window(current: usize, total_pages: usize) -> Vec<PageItem> {
    if total_pages == 0 {
        return Vec::new();
    }
    let current = current.clamp(1, total_pages);

    let (start, end) = if total_pages <= FULL_WINDOW {
        (1, total_pages)
    } else if current <= 4 {
        (1, 5)
    } else if current >= total_pages - 3 {
        (total_pages - 4, total_pages)
    } else {
        (current - 2, current + 2)
    };

    let mut items = Vec::with_capacity(end - start + 5);
    if start > 1 {
        items.push(PageItem::Page(1));
        if start > 2 {
            items.push(PageItem::Ellipsis);
        }
    }
    items.extend((start..=end).map(PageItem::Page));
    if end < total_pages {
        if end < total_pages - 1 {
            items.push(PageItem::Ellipsis);
        }
        items.push(PageItem::Page(total_pages));
    }
    items
}

/// One page of a listing plus the "showing X-Y of Z" summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub total_pages: usize,
    /// 1-based index of the first item shown, 0 when empty.
    pub from: usize,
    pub to: usize,
    pub total: usize,
    pub window: Vec<PageItem>,
}

/// Slice `items` to `page` (1-based, clamped to the valid range).
///
/// A `page_size` of zero is treated as one.
#[must_use]
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> Page<T> {
    let page_size = page_size.max(1);
    let total = items.len();
    let total_pages = total.div_ceil(page_size);
    let page = page.clamp(1, total_pages.max(1));

    let start = (page - 1) * page_size;
    let end = (start + page_size).min(total);
    let slice = items.get(start..end).unwrap_or(&[]);

    Page {
        items: slice.to_vec(),
        page,
        total_pages,
        from: if slice.is_empty() { 0 } else { start + 1 },
        to: if slice.is_empty() { 0 } else { end },
        total,
        window: page_window(page, total_pages),
    }
}
