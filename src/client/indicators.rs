//! Page links for moving through a list of expenses.

/// One element of a page navigation bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageIndicator {
    /// A link to another page.
    Page(u64),
    /// The page being shown.
    Current(u64),
    /// A gap of one or more pages that are not linked.
    Ellipsis,
    /// A link to the following page.
    Next(u64),
    /// A link to the preceding page.
    Back(u64),
}

/// Build the navigation bar for `current` out of `total_pages`.
///
/// At most `max_links` consecutive pages around `current` are linked. The
/// first and last pages are always linked, with an ellipsis standing in for
/// any pages skipped on either side.
pub fn page_indicators(current: u64, total_pages: u64, max_links: u64) -> Vec<PageIndicator> {
    if total_pages == 0 {
        return Vec::new();
    }

    let max_links = max_links.max(1);
    let anchor = current.clamp(1, total_pages);
    let end = anchor
        .saturating_sub(max_links / 2)
        .max(1)
        .saturating_add(max_links - 1)
        .min(total_pages);
    let start = end.saturating_sub(max_links - 1).max(1);

    let mut indicators = Vec::new();

    if current > 1 {
        indicators.push(PageIndicator::Back((current - 1).min(total_pages)));
    }

    if start > 1 {
        indicators.push(PageIndicator::Page(1));
        if start > 2 {
            indicators.push(PageIndicator::Ellipsis);
        }
    }

    indicators.extend((start..=end).map(|page| {
        if page == current {
            PageIndicator::Current(page)
        } else {
            PageIndicator::Page(page)
        }
    }));

    if end < total_pages {
        if end + 1 < total_pages {
            indicators.push(PageIndicator::Ellipsis);
        }
        indicators.push(PageIndicator::Page(total_pages));
    }

    if current < total_pages {
        indicators.push(PageIndicator::Next(current + 1));
    }

    indicators
}

#[cfg(test)]
mod tests {
    use super::{
        PageIndicator::{Back, Current, Ellipsis, Next, Page},
        page_indicators,
    };

    #[test]
    fn no_pages_no_indicators() {
        assert!(page_indicators(1, 0, 5).is_empty());
    }

    #[test]
    fn single_page_has_no_buttons() {
        assert_eq!(page_indicators(1, 1, 5), [Current(1)]);
    }

    #[test]
    fn shows_all_pages_when_they_fit() {
        assert_eq!(
            page_indicators(1, 5, 5),
            [Current(1), Page(2), Page(3), Page(4), Page(5), Next(2)]
        );
    }

    #[test]
    fn trailing_ellipsis_at_start() {
        assert_eq!(
            page_indicators(1, 10, 5),
            [
                Current(1),
                Page(2),
                Page(3),
                Page(4),
                Page(5),
                Ellipsis,
                Page(10),
                Next(2)
            ]
        );
    }

    #[test]
    fn both_ellipses_in_the_middle() {
        assert_eq!(
            page_indicators(5, 10, 5),
            [
                Back(4),
                Page(1),
                Ellipsis,
                Page(3),
                Page(4),
                Current(5),
                Page(6),
                Page(7),
                Ellipsis,
                Page(10),
                Next(6)
            ]
        );
    }

    #[test]
    fn no_ellipsis_for_a_single_skipped_page() {
        assert_eq!(
            page_indicators(4, 10, 5),
            [
                Back(3),
                Page(1),
                Page(2),
                Page(3),
                Current(4),
                Page(5),
                Page(6),
                Ellipsis,
                Page(10),
                Next(5)
            ]
        );
    }

    #[test]
    fn leading_ellipsis_at_end() {
        assert_eq!(
            page_indicators(10, 10, 5),
            [
                Back(9),
                Page(1),
                Ellipsis,
                Page(6),
                Page(7),
                Page(8),
                Page(9),
                Current(10)
            ]
        );
    }

    #[test]
    fn page_past_the_end_links_back_to_last_page() {
        assert_eq!(
            page_indicators(7, 3, 5),
            [Back(3), Page(1), Page(2), Page(3)]
        );
    }

    #[test]
    fn huge_link_limit_shows_every_page() {
        assert_eq!(
            page_indicators(1, 3, u64::MAX),
            [Current(1), Page(2), Page(3), Next(2)]
        );
        assert_eq!(
            page_indicators(3, 3, u64::MAX),
            [Back(2), Page(1), Page(2), Current(3)]
        );
    }
}
