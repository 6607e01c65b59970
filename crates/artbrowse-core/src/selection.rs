//! Selection set and the pending-count accumulator.
//!
//! A selection request asks for `n` more records that are not already
//! selected. [`accumulate`] walks one page in server order and takes what it
//! can; whatever is left over becomes the [`PendingCount`] that the next
//! arriving page is walked against.

use std::collections::HashSet;

use crate::{Record, RecordId};

/// Records chosen by the user or by the accumulator, in selection order.
///
/// Never holds two records with the same id.
#[derive(Debug, Clone, Default)]
pub struct SelectionSet {
    records: Vec<Record>,
    ids: HashSet<RecordId>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains(&self, id: RecordId) -> bool {
        self.ids.contains(&id)
    }

    /// Add a record. Returns `false` if its id was already selected.
    pub fn insert(&mut self, record: &Record) -> bool {
        if !self.ids.insert(record.id) {
            return false;
        }
        self.records.push(record.clone());
        true
    }

    /// Remove a record by id. Returns `false` if it was not selected.
    pub fn remove(&mut self, id: RecordId) -> bool {
        if !self.ids.remove(&id) {
            return false;
        }
        self.records.retain(|r| r.id != id);
        true
    }

    /// Flip membership of a single record. Returns whether it is now selected.
    pub fn toggle(&mut self, record: &Record) -> bool {
        if self.remove(record.id) {
            false
        } else {
            self.insert(record);
            true
        }
    }

    /// Selected records in the order they were added.
    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.iter()
    }

    /// How many of `records` are not yet selected.
    pub fn unselected_count(&self, records: &[Record]) -> usize {
        records.iter().filter(|r| !self.contains(r.id)).count()
    }
}

/// Outstanding auto-selection request carried across page loads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PendingCount {
    #[default]
    Idle,
    /// Records still to select; always > 0.
    Active(usize),
}

impl PendingCount {
    /// `0` maps to `Idle`.
    pub fn from_remaining(remaining: usize) -> Self {
        if remaining == 0 {
            Self::Idle
        } else {
            Self::Active(remaining)
        }
    }

    pub fn remaining(self) -> usize {
        match self {
            Self::Idle => 0,
            Self::Active(n) => n,
        }
    }

    pub fn is_active(self) -> bool {
        matches!(self, Self::Active(_))
    }
}

/// Result of walking one page against a requested count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Accumulation {
    /// Records newly added to the selection from this page.
    pub added: usize,
    /// What is left to select after this page.
    pub pending: PendingCount,
}

impl Accumulation {
    pub fn is_satisfied(&self) -> bool {
        !self.pending.is_active()
    }
}

/// Greedily add up to `requested` not-yet-selected records from `records`,
/// in order. A `requested` of zero changes nothing.
pub fn accumulate(
    selection: &mut SelectionSet,
    records: &[Record],
    requested: usize,
) -> Accumulation {
    let mut remaining = requested;
    let mut added = 0;
    for record in records {
        if remaining == 0 {
            break;
        }
        if selection.insert(record) {
            remaining -= 1;
            added += 1;
        }
    }
    Accumulation {
        added,
        pending: PendingCount::from_remaining(remaining),
    }
}

/// Normalize user text to a selection count.
///
/// Leading whitespace is skipped, then an optional sign and the leading run
/// of ASCII digits are read (`"15 rows"` is 15). Anything that yields no
/// digits, or a value ≤ 0, is 0. Values beyond `usize` saturate.
pub fn parse_count(input: &str) -> usize {
    let s = input.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let digits = &digits[..end];
    if digits.is_empty() || negative {
        return 0;
    }
    digits.parse::<usize>().unwrap_or(usize::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(ids: std::ops::RangeInclusive<RecordId>) -> Vec<Record> {
        ids.map(Record::with_id).collect()
    }

    // ── SelectionSet ───────────────────────────────────────────────────

    #[test]
    fn insert_rejects_duplicate_ids() {
        let mut set = SelectionSet::new();
        assert!(set.insert(&Record::with_id(1)));
        assert!(!set.insert(&Record::with_id(1)));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn toggle_adds_then_removes() {
        let mut set = SelectionSet::new();
        let rec = Record::with_id(7);
        assert!(set.toggle(&rec));
        assert!(set.contains(7));
        assert!(!set.toggle(&rec));
        assert!(!set.contains(7));
        assert!(set.is_empty());
    }

    #[test]
    fn iter_keeps_selection_order() {
        let mut set = SelectionSet::new();
        for id in [5, 2, 9] {
            set.insert(&Record::with_id(id));
        }
        set.remove(2);
        let ids: Vec<_> = set.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![5, 9]);
    }

    // ── accumulate ─────────────────────────────────────────────────────

    #[test]
    fn zero_request_changes_nothing() {
        let mut set = SelectionSet::new();
        let acc = accumulate(&mut set, &records(1..=12), 0);
        assert_eq!(acc.added, 0);
        assert_eq!(acc.pending, PendingCount::Idle);
        assert!(set.is_empty());
    }

    #[test]
    fn satisfied_within_one_page() {
        let mut set = SelectionSet::new();
        let acc = accumulate(&mut set, &records(1..=12), 5);
        assert_eq!(acc.added, 5);
        assert!(acc.is_satisfied());
        let ids: Vec<_> = set.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn page_exhausted_leaves_remainder() {
        let mut set = SelectionSet::new();
        let acc = accumulate(&mut set, &records(1..=12), 15);
        assert_eq!(acc.added, 12);
        assert_eq!(acc.pending, PendingCount::Active(3));
    }

    #[test]
    fn skips_already_selected() {
        let mut set = SelectionSet::new();
        set.insert(&Record::with_id(1));
        set.insert(&Record::with_id(3));
        let acc = accumulate(&mut set, &records(1..=5), 2);
        assert_eq!(acc.added, 2);
        assert!(set.contains(2));
        assert!(set.contains(4));
        assert!(!set.contains(5));
    }

    #[test]
    fn added_never_exceeds_unselected_or_request() {
        for preselected in 0..=12u64 {
            for requested in 0..=20usize {
                let page = records(1..=12);
                let mut set = SelectionSet::new();
                for id in 1..=preselected {
                    set.insert(&Record::with_id(id));
                }
                let available = set.unselected_count(&page);
                let before = set.len();
                let acc = accumulate(&mut set, &page, requested);
                assert_eq!(set.len() - before, acc.added);
                assert!(acc.added <= requested.min(available));
                assert_eq!(acc.pending.remaining(), requested - acc.added);
            }
        }
    }

    #[test]
    fn repeat_on_same_page_does_not_double_count() {
        let mut set = SelectionSet::new();
        let page = records(1..=12);
        let first = accumulate(&mut set, &page, 15);
        let second = accumulate(&mut set, &page, first.pending.remaining());
        assert_eq!(second.added, 0);
        assert_eq!(second.pending, PendingCount::Active(3));
        assert_eq!(set.len(), 12);
    }

    // ── parse_count ────────────────────────────────────────────────────

    #[test]
    fn parse_plain_numbers() {
        assert_eq!(parse_count("15"), 15);
        assert_eq!(parse_count("  7"), 7);
        assert_eq!(parse_count("+4"), 4);
    }

    #[test]
    fn parse_leading_digits_only() {
        assert_eq!(parse_count("15 rows"), 15);
        assert_eq!(parse_count("3.9"), 3);
        assert_eq!(parse_count("1e3"), 1);
    }

    #[test]
    fn parse_non_numeric_or_non_positive_is_zero() {
        assert_eq!(parse_count(""), 0);
        assert_eq!(parse_count("abc"), 0);
        assert_eq!(parse_count("0"), 0);
        assert_eq!(parse_count("-3"), 0);
        assert_eq!(parse_count("-"), 0);
        assert_eq!(parse_count("x12"), 0);
    }

    #[test]
    fn parse_saturates() {
        assert_eq!(parse_count("99999999999999999999999999"), usize::MAX);
    }

    #[test]
    fn pending_from_remaining() {
        assert_eq!(PendingCount::from_remaining(0), PendingCount::Idle);
        assert_eq!(PendingCount::from_remaining(4), PendingCount::Active(4));
        assert_eq!(PendingCount::Active(4).remaining(), 4);
        assert!(!PendingCount::Idle.is_active());
    }
}
