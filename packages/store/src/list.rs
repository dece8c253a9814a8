//! Local list reconciliation and client-side pagination.
//!
//! The views never refetch after a mutation: the backend's answer is folded
//! into the list held in memory with [`insert`] and [`remove_by_id`], and the
//! full list is paged locally with [`Pagination`].

/// Records that carry a backend id.
pub trait Identified {
    fn id(&self) -> u64;
}

/// Append `item` unless a record with the same id is already present.
///
/// Returns `true` when the item was appended.
pub fn insert<T: Identified>(items: &mut Vec<T>, item: T) -> bool {
    if items.iter().any(|existing| existing.id() == item.id()) {
        return false;
    }
    items.push(item);
    true
}

/// Remove every record with the given id. Returns `true` if one was removed.
pub fn remove_by_id<T: Identified>(items: &mut Vec<T>, id: u64) -> bool {
    let before = items.len();
    items.retain(|item| item.id() != id);
    items.len() != before
}

/// Fixed-size paging over a list held entirely in memory.
///
/// Pages are 1-based. `current` always stays within `[1, page_count]`
/// (or at 1 when the list is empty).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    page_size: usize,
    current: usize,
}

impl Pagination {
    /// A zero page size is treated as one item per page.
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            current: 1,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn current(&self) -> usize {
        self.current
    }

    /// `ceil(total / page_size)`
    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.page_size)
    }

    /// Whether the list needs paging controls at all.
    pub fn is_paged(&self, total: usize) -> bool {
        total > self.page_size
    }

    /// The slice of `items` shown on the current page.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = (self.current - 1) * self.page_size;
        if start >= items.len() {
            return &[];
        }
        let end = (start + self.page_size).min(items.len());
        &items[start..end]
    }

    /// Jump to `page`. Out-of-range requests are ignored and return `false`.
    pub fn go_to(&mut self, page: usize, total: usize) -> bool {
        if page < 1 || page > self.page_count(total) {
            return false;
        }
        self.current = page;
        true
    }

    pub fn next(&mut self, total: usize) -> bool {
        self.go_to(self.current + 1, total)
    }

    pub fn previous(&mut self, total: usize) -> bool {
        if self.current <= 1 {
            return false;
        }
        self.go_to(self.current - 1, total)
    }

    /// Pull `current` back inside the valid range after the list shrank.
    pub fn clamp(&mut self, total: usize) {
        let last = self.page_count(total).max(1);
        if self.current > last {
            self.current = last;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Item(u64);

    impl Identified for Item {
        fn id(&self) -> u64 {
            self.0
        }
    }

    #[test]
    fn test_insert_appends_once() {
        let mut items = vec![Item(1), Item(2)];
        assert!(insert(&mut items, Item(3)));
        assert_eq!(items, vec![Item(1), Item(2), Item(3)]);

        assert!(!insert(&mut items, Item(2)));
        assert_eq!(items.len(), 3);
    }

    #[test]
    fn test_remove_by_id() {
        let mut items = vec![Item(1), Item(2), Item(3)];
        assert!(remove_by_id(&mut items, 2));
        assert_eq!(items, vec![Item(1), Item(3)]);

        assert!(!remove_by_id(&mut items, 42));
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn test_page_count_is_ceiling() {
        let pages = Pagination::new(10);
        assert_eq!(pages.page_count(0), 0);
        assert_eq!(pages.page_count(1), 1);
        assert_eq!(pages.page_count(10), 1);
        assert_eq!(pages.page_count(11), 2);
        assert_eq!(pages.page_count(25), 3);
        assert!(!pages.is_paged(10));
        assert!(pages.is_paged(11));
    }

    #[test]
    fn test_first_page_slice() {
        let items: Vec<u32> = (0..25).collect();
        let mut pages = Pagination::new(10);
        assert_eq!(pages.slice(&items), &items[0..10]);

        assert!(pages.go_to(3, items.len()));
        assert_eq!(pages.slice(&items), &items[20..25]);
    }

    #[test]
    fn test_out_of_range_navigation_is_noop() {
        let mut pages = Pagination::new(10);
        assert!(!pages.go_to(0, 25));
        assert!(!pages.go_to(4, 25));
        assert_eq!(pages.current(), 1);

        assert!(!pages.previous(25));
        assert!(pages.next(25));
        assert!(pages.next(25));
        assert!(!pages.next(25));
        assert_eq!(pages.current(), 3);

        // Empty list: nothing is reachable, page stays at 1
        let mut empty = Pagination::new(10);
        assert!(!empty.go_to(1, 0));
        assert_eq!(empty.current(), 1);
        assert!(empty.slice::<u32>(&[]).is_empty());
    }

    #[test]
    fn test_clamp_after_shrink() {
        let mut pages = Pagination::new(10);
        assert!(pages.go_to(3, 21));
        pages.clamp(20);
        assert_eq!(pages.current(), 2);
        pages.clamp(0);
        assert_eq!(pages.current(), 1);
    }
}
