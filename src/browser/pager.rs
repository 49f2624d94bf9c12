use crate::news::PAGE_SIZE;

use super::state::ViewMode;

/// Number of pages needed to show `total` results.
pub fn page_count(total: u64, page_size: u32) -> u32 {
    if page_size == 0 {
        return 0;
    }
    let pages = total.div_ceil(u64::from(page_size));
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Page count at the fixed request page size.
pub fn pages_for(total: u64) -> u32 {
    page_count(total, PAGE_SIZE)
}

/// The card view shows the pager once there is a page; the highlight view
/// only when results spill past one page.
pub fn pager_visible(view: ViewMode, total: u64) -> bool {
    match view {
        ViewMode::Cards => pages_for(total) >= 1,
        ViewMode::Highlights => total > u64::from(PAGE_SIZE),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page(u32),
    Gap,
}

/// Pager strip: first and last page, the current page with one neighbour on
/// each side, and gaps. A gap that would hide a single page shows the page.
pub fn page_items(current: u32, count: u32) -> Vec<PageItem> {
    if count == 0 {
        return Vec::new();
    }
    let current = current.clamp(1, count);
    let lo = current.saturating_sub(1).max(1);
    let hi = (current + 1).min(count);

    let mut items = vec![PageItem::Page(1)];
    match lo {
        0..=2 => {}
        3 => items.push(PageItem::Page(2)),
        _ => items.push(PageItem::Gap),
    }
    for p in lo.max(2)..=hi {
        items.push(PageItem::Page(p));
    }
    if hi < count {
        match count - hi {
            1 => {}
            2 => items.push(PageItem::Page(count - 1)),
            _ => items.push(PageItem::Gap),
        }
        items.push(PageItem::Page(count));
    }
    items
}

#[cfg(test)]
mod tests {
    use super::PageItem::{Gap, Page};
    use super::*;

    #[test]
    fn counts_round_up() {
        assert_eq!(pages_for(0), 0);
        assert_eq!(pages_for(1), 1);
        assert_eq!(pages_for(10), 1);
        assert_eq!(pages_for(11), 2);
        assert_eq!(pages_for(23), 3);
        assert_eq!(page_count(5, 0), 0);
    }

    #[test]
    fn pager_visibility_per_view() {
        assert!(!pager_visible(ViewMode::Cards, 0));
        assert!(pager_visible(ViewMode::Cards, 4));
        assert!(!pager_visible(ViewMode::Highlights, 10));
        assert!(pager_visible(ViewMode::Highlights, 11));
    }

    #[test]
    fn short_strip_lists_every_page() {
        assert_eq!(page_items(2, 3), vec![Page(1), Page(2), Page(3)]);
        assert_eq!(page_items(1, 1), vec![Page(1)]);
        assert!(page_items(1, 0).is_empty());
    }

    #[test]
    fn long_strip_has_gaps() {
        assert_eq!(
            page_items(5, 12),
            vec![Page(1), Gap, Page(4), Page(5), Page(6), Gap, Page(12)]
        );
        assert_eq!(page_items(1, 12), vec![Page(1), Page(2), Gap, Page(12)]);
        assert_eq!(page_items(12, 12), vec![Page(1), Gap, Page(11), Page(12)]);
    }

    #[test]
    fn single_hidden_page_is_shown() {
        assert_eq!(
            page_items(4, 6),
            vec![Page(1), Page(2), Page(3), Page(4), Page(5), Page(6)]
        );
    }

    #[test]
    fn current_is_clamped() {
        assert_eq!(page_items(9, 3), vec![Page(1), Page(2), Page(3)]);
    }
}
