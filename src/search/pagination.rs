//! Page arithmetic for the fixed-size result pages.

/// Records per page, fixed by the search endpoint.
pub const PAGE_SIZE: u64 = 100;

/// Number of pages for `total_found` matches; never less than one.
///
/// # Examples
///
/// ```
/// use bookfinder::search::pagination::total_pages;
///
/// assert_eq!(total_pages(0), 1);
/// assert_eq!(total_pages(100), 1);
/// assert_eq!(total_pages(250), 3);
/// ```
#[must_use]
pub fn total_pages(total_found: u64) -> u32 {
    let pages = total_found.div_ceil(PAGE_SIZE).max(1);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Page before `page`, or `None` on the first page.
#[must_use]
pub fn prev_page(page: u32) -> Option<u32> {
    (page > 1).then(|| page - 1)
}

/// Page after `page`, or `None` on the last page.
#[must_use]
pub fn next_page(page: u32, total_found: u64) -> Option<u32> {
    (page < total_pages(total_found)).then(|| page + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_last_page_counts() {
        assert_eq!(total_pages(101), 2);
        assert_eq!(total_pages(120), 2);
        assert_eq!(total_pages(250), 3);
    }

    #[test]
    fn navigation_stays_in_range() {
        assert_eq!(prev_page(1), None);
        assert_eq!(prev_page(3), Some(2));
        assert_eq!(next_page(3, 250), None);
        assert_eq!(next_page(2, 250), Some(3));
        assert_eq!(next_page(1, 0), None);
    }
}
