//! Sorted index implementation
//!
//! Vec-backed, ascending by `Keyed::key`.

use std::slice;

use crate::record::Keyed;

/// Records held in ascending key order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortedIndex<R> {
    records: Vec<R>,
}

impl<R: Keyed> SortedIndex<R> {
    /// Create an empty index
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Build an index from records in any order
    pub fn from_unsorted(mut records: Vec<R>) -> Self {
        Self::sort(&mut records);
        Self { records }
    }

    /// Sort a sequence ascending by key
    ///
    /// Keys are expected to be unique, so stability does not matter.
    pub fn sort(records: &mut [R]) {
        records.sort_unstable_by_key(|r| r.key());
    }

    /// True if `records` is ascending by key (equal neighbours allowed)
    pub fn is_sorted_slice(records: &[R]) -> bool {
        records.windows(2).all(|w| w[0].key() <= w[1].key())
    }

    /// Position of the record with `key`, via binary search
    pub fn find(&self, key: R::Key) -> Option<usize> {
        self.records.binary_search_by_key(&key, |r| r.key()).ok()
    }

    /// Insert at the record's ascending position and return that position
    ///
    /// An equal key goes after the existing one.
    pub fn insert(&mut self, record: R) -> usize {
        let key = record.key();
        let pos = self.records.partition_point(|r| r.key() <= key);
        self.records.insert(pos, record);
        pos
    }

    /// First key that appears more than once, if any
    pub fn first_duplicate(&self) -> Option<R::Key> {
        self.records
            .windows(2)
            .find(|w| w[0].key() == w[1].key())
            .map(|w| w[0].key())
    }

    pub fn is_sorted(&self) -> bool {
        Self::is_sorted_slice(&self.records)
    }

    pub fn get(&self, pos: usize) -> Option<&R> {
        self.records.get(pos)
    }

    /// Mutable access to a record
    ///
    /// Callers must not change the key through this reference.
    pub fn get_mut(&mut self, pos: usize) -> Option<&mut R> {
        self.records.get_mut(pos)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, R> {
        self.records.iter()
    }

    pub fn as_slice(&self) -> &[R] {
        &self.records
    }

    pub fn into_inner(self) -> Vec<R> {
        self.records
    }
}

impl<R: Keyed> Default for SortedIndex<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, R: Keyed> IntoIterator for &'a SortedIndex<R> {
    type Item = &'a R;
    type IntoIter = slice::Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
