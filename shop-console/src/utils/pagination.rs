//! Page number strip

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PageItem {
    Page(u32),
    Ellipsis,
}

/// Page buttons around `current`: first and last page always, `siblings`
/// pages each side of the current one, `…` for larger gaps. A gap of a
/// single page shows that page instead of an ellipsis.
pub fn page_range(current: u32, total_pages: u32, siblings: u32) -> Vec<PageItem> {
    if total_pages == 0 {
        return Vec::new();
    }
    let current = current.clamp(1, total_pages);
    let lo = current.saturating_sub(siblings).max(1);
    let hi = current.saturating_add(siblings).min(total_pages);

    let mut pages: Vec<u32> = vec![1];
    pages.extend(lo..=hi);
    pages.push(total_pages);
    pages.sort_unstable();
    pages.dedup();

    let mut items = Vec::with_capacity(pages.len() + 2);
    let mut prev: Option<u32> = None;
    for page in pages {
        if let Some(p) = prev {
            match page - p {
                1 => {}
                2 => items.push(PageItem::Page(p + 1)),
                _ => items.push(PageItem::Ellipsis),
            }
        }
        items.push(PageItem::Page(page));
        prev = Some(page);
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use PageItem::{Ellipsis, Page};

    #[test]
    fn test_small_totals_show_everything() {
        assert_eq!(page_range(1, 0, 1), vec![]);
        assert_eq!(page_range(1, 1, 1), vec![Page(1)]);
        assert_eq!(page_range(2, 4, 1), vec![Page(1), Page(2), Page(3), Page(4)]);
    }

    #[test]
    fn test_ellipsis_both_sides() {
        assert_eq!(
            page_range(10, 20, 1),
            vec![Page(1), Ellipsis, Page(9), Page(10), Page(11), Ellipsis, Page(20)]
        );
    }

    #[test]
    fn test_single_gap_filled() {
        assert_eq!(
            page_range(4, 10, 1),
            vec![Page(1), Page(2), Page(3), Page(4), Page(5), Ellipsis, Page(10)]
        );
    }

    #[test]
    fn test_out_of_range_current_clamped() {
        assert_eq!(page_range(99, 3, 1), vec![Page(1), Page(2), Page(3)]);
    }
}
