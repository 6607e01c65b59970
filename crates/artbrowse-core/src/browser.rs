//! The browsing state machine: pager, current page, selection and the
//! outstanding fetch, driven by discrete commands.
//!
//! Fetching itself happens elsewhere. Commands that change the page hand back
//! a [`FetchRequest`]; the caller runs it and reports the result through
//! [`Browser::page_loaded`] or [`Browser::fetch_failed`]. Every request gets a
//! fresh sequence number and only the latest one is ever applied, so
//! responses that resolve out of order cannot overwrite newer data.

use crate::pager::Pager;
use crate::selection::{Accumulation, PendingCount, SelectionSet, accumulate, parse_count};
use crate::{Page, Record};

/// Identifies one page fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchRequest {
    pub page: u32,
    pub seq: u64,
}

/// What [`Browser::page_loaded`] did with a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOutcome {
    /// The page replaced the displayed records. `accumulation` is set when a
    /// pending selection request was walked against it.
    Applied { accumulation: Option<Accumulation> },
    /// The page answered a superseded request and was dropped.
    Stale,
}

/// Session-local browsing state. Dropping it discards everything.
#[derive(Debug, Default)]
pub struct Browser {
    pager: Pager,
    records: Vec<Record>,
    selection: SelectionSet,
    pending: PendingCount,
    next_seq: u64,
    in_flight: Option<FetchRequest>,
}

impl Browser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pager(&self) -> &Pager {
        &self.pager
    }

    /// Records of the page currently on screen.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn record(&self, row: usize) -> Option<&Record> {
        self.records.get(row)
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn pending(&self) -> PendingCount {
        self.pending
    }

    /// True while the most recent fetch is unanswered.
    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn in_flight(&self) -> Option<FetchRequest> {
        self.in_flight
    }

    pub fn is_selected(&self, row: usize) -> bool {
        self.records
            .get(row)
            .is_some_and(|r| self.selection.contains(r.id))
    }

    /// Fetch of the current page for a freshly mounted view.
    pub fn start(&mut self) -> FetchRequest {
        self.issue()
    }

    pub fn previous(&mut self) -> Option<FetchRequest> {
        if self.pager.previous() {
            Some(self.issue())
        } else {
            None
        }
    }

    pub fn next(&mut self) -> Option<FetchRequest> {
        if self.pager.next() {
            Some(self.issue())
        } else {
            None
        }
    }

    /// Manually flip the record at `row` of the current page. Returns whether
    /// it is now selected, or `None` if there is no such row. The pending
    /// count is not affected.
    pub fn toggle_row(&mut self, row: usize) -> Option<bool> {
        let record = self.records.get(row)?;
        Some(self.selection.toggle(record))
    }

    /// Parse user text and run [`Browser::request_selection`] with it.
    pub fn submit_count(&mut self, input: &str) -> Option<Accumulation> {
        self.request_selection(parse_count(input))
    }

    /// Select `n` more not-yet-selected records, starting with the current
    /// page. Overwrites any pending request. Returns `None` (no-op) for 0.
    pub fn request_selection(&mut self, n: usize) -> Option<Accumulation> {
        if n == 0 {
            return None;
        }
        let acc = accumulate(&mut self.selection, &self.records, n);
        self.pending = acc.pending;
        tracing::debug!(
            requested = n,
            added = acc.added,
            remaining = acc.pending.remaining(),
            "selection requested"
        );
        Some(acc)
    }

    /// Apply a fetched page if it answers the latest request.
    pub fn page_loaded(&mut self, request: FetchRequest, page: Page) -> PageOutcome {
        if self.in_flight != Some(request) {
            tracing::debug!(
                page = request.page,
                seq = request.seq,
                "dropping response to superseded request"
            );
            return PageOutcome::Stale;
        }
        self.in_flight = None;
        self.pager.set_total_records(page.total);
        self.records = page.records;

        let accumulation = if self.pending.is_active() {
            let acc = accumulate(&mut self.selection, &self.records, self.pending.remaining());
            self.pending = acc.pending;
            tracing::debug!(
                page = request.page,
                added = acc.added,
                remaining = acc.pending.remaining(),
                "pending selection applied"
            );
            Some(acc)
        } else {
            None
        };
        PageOutcome::Applied { accumulation }
    }

    /// Clear the loading flag after a failed fetch. Records and selection stay
    /// as they were. Returns `false` if the failure was for a superseded request.
    pub fn fetch_failed(&mut self, request: FetchRequest) -> bool {
        if self.in_flight != Some(request) {
            return false;
        }
        self.in_flight = None;
        true
    }

    fn issue(&mut self) -> FetchRequest {
        self.next_seq += 1;
        let request = FetchRequest {
            page: self.pager.current_page(),
            seq: self.next_seq,
        };
        self.in_flight = Some(request);
        request
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockCollection;

    /// A browser with page 1 of `source` already loaded.
    fn loaded(source: &MockCollection) -> Browser {
        let mut browser = Browser::new();
        let req = browser.start();
        browser.page_loaded(req, source.page(req.page));
        browser
    }

    #[test]
    fn start_requests_page_one() {
        let mut browser = Browser::new();
        let req = browser.start();
        assert_eq!(req.page, 1);
        assert!(browser.is_loading());
    }

    #[test]
    fn page_loaded_replaces_records() {
        let source = MockCollection::with_total(24);
        let mut browser = loaded(&source);
        assert!(!browser.is_loading());
        assert_eq!(browser.pager().total_records(), 24);
        assert_eq!(browser.records()[0].id, 1);

        let req = browser.next().unwrap();
        assert_eq!(req.page, 2);
        browser.page_loaded(req, source.page(2));
        assert_eq!(browser.records().len(), 12);
        assert_eq!(browser.records()[0].id, 13);
    }

    #[test]
    fn navigation_at_bounds_issues_nothing() {
        let source = MockCollection::with_total(5);
        let mut browser = loaded(&source);
        assert!(browser.previous().is_none());
        assert!(browser.next().is_none());
        assert_eq!(browser.pager().current_page(), 1);
        assert!(!browser.is_loading());
    }

    #[test]
    fn zero_request_is_noop() {
        let source = MockCollection::with_total(24);
        let mut browser = loaded(&source);
        browser.toggle_row(0);
        for input in ["", "0", "-4", "abc"] {
            assert!(browser.submit_count(input).is_none());
        }
        assert_eq!(browser.selection().len(), 1);
        assert_eq!(browser.pending(), PendingCount::Idle);
    }

    #[test]
    fn pending_carries_to_next_page() {
        let source = MockCollection::with_total(24);
        let mut browser = loaded(&source);

        let acc = browser.submit_count("15").unwrap();
        assert_eq!(acc.added, 12);
        assert_eq!(browser.pending(), PendingCount::Active(3));

        let req = browser.next().unwrap();
        let outcome = browser.page_loaded(req, source.page(2));
        let PageOutcome::Applied {
            accumulation: Some(acc),
        } = outcome
        else {
            panic!("expected pending walk, got {outcome:?}");
        };
        assert_eq!(acc.added, 3);
        assert_eq!(browser.pending(), PendingCount::Idle);
        assert_eq!(browser.selection().len(), 15);
    }

    #[test]
    fn resubmit_overwrites_pending() {
        let source = MockCollection::with_total(48);
        let mut browser = loaded(&source);
        browser.submit_count("20");
        assert_eq!(browser.pending(), PendingCount::Active(8));
        // Every record on this page is selected; the new count replaces 8.
        browser.submit_count("2");
        assert_eq!(browser.pending(), PendingCount::Active(2));
    }

    #[test]
    fn manual_toggle_does_not_touch_pending() {
        let source = MockCollection::with_total(24);
        let mut browser = loaded(&source);
        browser.submit_count("14");
        assert_eq!(browser.toggle_row(3), Some(false));
        assert_eq!(browser.pending(), PendingCount::Active(2));
        assert_eq!(browser.toggle_row(99), None);
    }

    #[test]
    fn stale_response_is_dropped() {
        let source = MockCollection::with_total(48);
        let mut browser = loaded(&source);
        let to_two = browser.next().unwrap();
        let to_three = browser.next().unwrap();

        // Page 3 resolves first, then the slow page 2 response arrives.
        let outcome = browser.page_loaded(to_three, source.page(3));
        assert!(matches!(outcome, PageOutcome::Applied { .. }));
        assert_eq!(browser.page_loaded(to_two, source.page(2)), PageOutcome::Stale);

        assert_eq!(browser.pager().current_page(), 3);
        assert_eq!(browser.records()[0].id, 25);
    }

    #[test]
    fn stale_response_does_not_consume_pending() {
        let source = MockCollection::with_total(48);
        let mut browser = loaded(&source);
        browser.submit_count("13");
        let to_two = browser.next().unwrap();
        let to_three = browser.next().unwrap();
        browser.page_loaded(to_two, source.page(2));
        assert_eq!(browser.pending(), PendingCount::Active(1));
        browser.page_loaded(to_three, source.page(3));
        assert_eq!(browser.pending(), PendingCount::Idle);
        assert!(browser.selection().contains(25));
        assert!(!browser.selection().contains(13));
    }

    #[test]
    fn failure_keeps_prior_data() {
        let source = MockCollection::with_total(24);
        let mut browser = loaded(&source);
        browser.toggle_row(0);
        let req = browser.next().unwrap();
        assert!(browser.fetch_failed(req));
        assert!(!browser.is_loading());
        assert_eq!(browser.records()[0].id, 1);
        assert_eq!(browser.selection().len(), 1);
    }

    #[test]
    fn failure_of_superseded_request_is_ignored() {
        let source = MockCollection::with_total(48);
        let mut browser = loaded(&source);
        let to_two = browser.next().unwrap();
        let _to_three = browser.next().unwrap();
        assert!(!browser.fetch_failed(to_two));
        assert!(browser.is_loading());
    }
}
