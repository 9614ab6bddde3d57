//! Pagination utilities
//!
//! Paging is a pure function over an already-fetched ordered sequence. Page
//! size is a presentation parameter (narrow layouts page smaller than wide
//! ones), so the repository is never asked to paginate in SQL; callers slice
//! the fetched list in-process.

/// Number of pages needed to hold `total_items` at `page_size` per page
///
/// Zero items means zero pages. A `page_size` of zero is treated as one to
/// keep the function total.
pub fn page_count(total_items: usize, page_size: usize) -> usize {
    let page_size = page_size.max(1);
    (total_items + page_size - 1) / page_size
}

/// Slice for a 1-based `page` of `page_size` items
///
/// Returns `[(page-1)*page_size, page*page_size)` clipped to the sequence;
/// out-of-range pages yield an empty slice. Page 0 is treated as page 1.
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    let page_size = page_size.max(1);
    let start = page.saturating_sub(1).saturating_mul(page_size);
    if start >= items.len() {
        return &[];
    }
    let end = (start + page_size).min(items.len());
    &items[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_count() {
        assert_eq!(page_count(0, 10), 0);
        assert_eq!(page_count(1, 10), 1);
        assert_eq!(page_count(10, 10), 1);
        assert_eq!(page_count(11, 10), 2);
        assert_eq!(page_count(250, 100), 3);
    }

    #[test]
    fn test_paginate_normal() {
        let items: Vec<u32> = (0..25).collect();
        assert_eq!(paginate(&items, 1, 10), (0..10).collect::<Vec<u32>>());
        assert_eq!(paginate(&items, 2, 10), (10..20).collect::<Vec<u32>>());
        assert_eq!(paginate(&items, 3, 10), (20..25).collect::<Vec<u32>>());
    }

    #[test]
    fn test_paginate_out_of_range() {
        let items: Vec<u32> = (0..25).collect();
        assert!(paginate(&items, 4, 10).is_empty());
        assert!(paginate(&items, 99, 10).is_empty());
    }

    #[test]
    fn test_paginate_page_zero_treated_as_first() {
        let items: Vec<u32> = (0..5).collect();
        assert_eq!(paginate(&items, 0, 2), &[0, 1]);
    }

    #[test]
    fn test_paginate_empty_sequence() {
        let items: Vec<u32> = Vec::new();
        assert!(paginate(&items, 1, 10).is_empty());
        assert_eq!(page_count(items.len(), 10), 0);
    }

    #[test]
    fn test_pages_reconstruct_sequence() {
        // Concatenating all pages in order rebuilds the original exactly,
        // and the last page holds between 1 and page_size items.
        for total in [1usize, 7, 10, 11, 23, 100] {
            for size in [1usize, 3, 10, 100] {
                let items: Vec<usize> = (0..total).collect();
                let pages = page_count(total, size);
                let mut rebuilt = Vec::new();
                for page in 1..=pages {
                    let slice = paginate(&items, page, size);
                    if page == pages {
                        assert!(!slice.is_empty() && slice.len() <= size);
                    } else {
                        assert_eq!(slice.len(), size);
                    }
                    rebuilt.extend_from_slice(slice);
                }
                assert_eq!(rebuilt, items);
            }
        }
    }
}
