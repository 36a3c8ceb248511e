//! 1-based pagination over already-materialized listings.
//!
//! The dashboard views page through in-memory row sequences; nothing here
//! touches the upstream API. A page requested past the end of the data is a
//! valid request that yields an empty slice — view state can point anywhere,
//! and rendering an empty table is the correct outcome, not an error.

/// Total number of pages needed to show `count` items at `page_size` per page.
///
/// `page_size == 0` yields zero pages.
#[must_use]
pub fn total_pages(count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    count.div_ceil(page_size)
}

/// Returns the slice of `items` visible on `page` (1-based).
///
/// Out-of-range pages (including `page == 0` and `page_size == 0`) yield an
/// empty slice. The final page may be shorter than `page_size`.
#[must_use]
pub fn page_slice<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    if page == 0 || page_size == 0 {
        return &[];
    }
    let start = (page - 1).saturating_mul(page_size);
    if start >= items.len() {
        return &[];
    }
    let end = usize::min(start.saturating_add(page_size), items.len());
    &items[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(n: usize) -> Vec<usize> {
        (0..n).collect()
    }

    #[test]
    fn first_page_of_twenty_five_items_holds_ten() {
        let data = items(25);
        assert_eq!(page_slice(&data, 1, 10), &data[0..10]);
    }

    #[test]
    fn last_partial_page_holds_the_remainder() {
        let data = items(25);
        assert_eq!(page_slice(&data, 3, 10), &data[20..25]);
        assert_eq!(page_slice(&data, 3, 10).len(), 5);
    }

    #[test]
    fn page_past_the_end_is_empty_not_an_error() {
        let data = items(25);
        assert!(page_slice(&data, 4, 10).is_empty());
        assert!(page_slice(&data, 999, 10).is_empty());
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(25, 10), 3);
        assert_eq!(total_pages(30, 10), 3);
        assert_eq!(total_pages(31, 10), 4);
        assert_eq!(total_pages(0, 10), 0);
    }

    #[test]
    fn page_zero_is_empty() {
        let data = items(5);
        assert!(page_slice(&data, 0, 10).is_empty());
    }

    #[test]
    fn zero_page_size_is_empty_and_has_no_pages() {
        let data = items(5);
        assert!(page_slice(&data, 1, 0).is_empty());
        assert_eq!(total_pages(5, 0), 0);
    }

    #[test]
    fn exact_multiple_has_no_trailing_empty_page() {
        let data = items(20);
        assert_eq!(total_pages(20, 10), 2);
        assert_eq!(page_slice(&data, 2, 10), &data[10..20]);
        assert!(page_slice(&data, 3, 10).is_empty());
    }
}
