//! Page number tracking and navigation clamping.

/// Records per page. The server's default page size; never sent as a parameter.
pub const PAGE_SIZE: usize = 12;

/// Current page number and total record count for the remote collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pager {
    current_page: u32,
    total_records: u64,
}

impl Default for Pager {
    fn default() -> Self {
        Self::new()
    }
}

impl Pager {
    pub fn new() -> Self {
        Self {
            current_page: 1,
            total_records: 0,
        }
    }

    /// 1-based page number.
    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn total_records(&self) -> u64 {
        self.total_records
    }

    /// Record the server's total from a page response.
    pub fn set_total_records(&mut self, total: u64) {
        self.total_records = total;
    }

    /// `ceil(total_records / PAGE_SIZE)`; zero for an empty collection.
    pub fn page_count(&self) -> u32 {
        let pages = self.total_records.div_ceil(PAGE_SIZE as u64);
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    pub fn is_first(&self) -> bool {
        self.current_page <= 1
    }

    pub fn is_last(&self) -> bool {
        self.current_page >= self.page_count()
    }

    /// Step back one page. Returns `false` (no-op) on the first page.
    pub fn previous(&mut self) -> bool {
        if self.is_first() {
            return false;
        }
        self.current_page -= 1;
        true
    }

    /// Step forward one page. Returns `false` (no-op) on the last page,
    /// including when the collection is empty.
    pub fn next(&mut self) -> bool {
        if self.is_last() {
            return false;
        }
        self.current_page += 1;
        true
    }

    /// 1-based inclusive bounds of the records on the current page, or `None`
    /// when the current page lies outside the collection.
    pub fn record_range(&self) -> Option<(u64, u64)> {
        let start = (self.current_page as u64 - 1) * PAGE_SIZE as u64 + 1;
        if start > self.total_records {
            return None;
        }
        let end = (start + PAGE_SIZE as u64 - 1).min(self.total_records);
        Some((start, end))
    }

    /// "X of Y" page report. `Y` is shown as at least 1.
    pub fn label(&self) -> String {
        format!("{} of {}", self.current_page, self.page_count().max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pager_with(total: u64) -> Pager {
        let mut pager = Pager::new();
        pager.set_total_records(total);
        pager
    }

    #[test]
    fn starts_on_page_one() {
        let pager = Pager::new();
        assert_eq!(pager.current_page(), 1);
        assert_eq!(pager.total_records(), 0);
        assert_eq!(pager.page_count(), 0);
    }

    #[test]
    fn page_count_rounds_up() {
        assert_eq!(pager_with(1).page_count(), 1);
        assert_eq!(pager_with(12).page_count(), 1);
        assert_eq!(pager_with(13).page_count(), 2);
        assert_eq!(pager_with(24).page_count(), 2);
        assert_eq!(pager_with(125_000).page_count(), 10_417);
    }

    #[test]
    fn previous_is_noop_on_first_page() {
        let mut pager = pager_with(100);
        assert!(!pager.previous());
        assert_eq!(pager.current_page(), 1);
    }

    #[test]
    fn next_is_noop_on_single_page() {
        let mut pager = pager_with(5);
        assert!(!pager.next());
        assert_eq!(pager.current_page(), 1);
    }

    #[test]
    fn next_is_noop_on_empty_collection() {
        let mut pager = pager_with(0);
        assert!(!pager.next());
        assert_eq!(pager.current_page(), 1);
    }

    #[test]
    fn next_then_previous() {
        let mut pager = pager_with(30);
        assert!(pager.next());
        assert!(pager.next());
        assert!(!pager.next());
        assert_eq!(pager.current_page(), 3);
        assert!(pager.previous());
        assert_eq!(pager.current_page(), 2);
    }

    #[test]
    fn stays_in_bounds_for_any_sequence() {
        for total in [0u64, 1, 11, 12, 13, 24, 25, 60] {
            let mut pager = pager_with(total);
            let upper = pager.page_count().max(1);
            // Deterministic mixed walk: mostly forward, then mostly back.
            let steps = "nnnnpnnnnnnpppppppppnpnnnnnnnnnnn";
            for step in steps.chars() {
                match step {
                    'n' => pager.next(),
                    _ => pager.previous(),
                };
                assert!(pager.current_page() >= 1);
                assert!(pager.current_page() <= upper, "total={total}");
            }
        }
    }

    #[test]
    fn record_range_for_full_and_partial_pages() {
        let mut pager = pager_with(30);
        assert_eq!(pager.record_range(), Some((1, 12)));
        pager.next();
        assert_eq!(pager.record_range(), Some((13, 24)));
        pager.next();
        assert_eq!(pager.record_range(), Some((25, 30)));
    }

    #[test]
    fn record_range_empty_collection() {
        assert_eq!(pager_with(0).record_range(), None);
    }

    #[test]
    fn label_reports_page_of_pages() {
        let mut pager = pager_with(24);
        assert_eq!(pager.label(), "1 of 2");
        pager.next();
        assert_eq!(pager.label(), "2 of 2");
        assert_eq!(pager_with(0).label(), "1 of 1");
    }
}
