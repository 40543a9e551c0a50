use std::collections::BTreeSet;

use crate::{snapshot::item_at, Snapshot};


/// Forward-only cursor over the original snapshot.
///
/// Indices consumed ahead of the cursor (by a move) are marked as ignored
/// and skipped by both [`move_next`](Self::move_next) and [`next_index_of`](Self::next_index_of).
pub(crate) struct SourceEnumerator<'a, T, S: ?Sized> {
    source: &'a S,
    eq: &'a dyn Fn(&T, &T) -> bool,
    current: Option<usize>,
    ignored: BTreeSet<usize>,
    ignored_count: usize,
}

impl<'a, T, S: Snapshot<T> + ?Sized> SourceEnumerator<'a, T, S> {
    pub fn new(source: &'a S, eq: &'a dyn Fn(&T, &T) -> bool) -> Self {
        Self {
            source,
            eq,
            current: None,
            ignored: BTreeSet::new(),
            ignored_count: 0,
        }
    }

    fn next_index(&self) -> usize {
        self.current.map_or(0, |index| index + 1)
    }

    pub fn move_next(&mut self) -> bool {
        let len = self.source.len();
        let mut index = self.next_index();
        while self.ignored.remove(&index) {
            self.ignored_count += 1;
            index += 1;
        }
        self.current = Some(index.min(len));
        index < len
    }

    pub fn current_index(&self) -> usize {
        self.current.expect("`move_next` is not called")
    }
    pub fn current(&self) -> &'a T {
        item_at(self.source, self.current_index())
    }

    /// Number of ignored indices the cursor has passed.
    pub fn ignored_count(&self) -> usize {
        self.ignored_count
    }

    /// Marks `index` to be skipped.
    ///
    /// # Panics
    ///
    /// Panics if `index` was already enumerated or already ignored.
    pub fn ignore(&mut self, index: usize) {
        assert!(
            index >= self.next_index(),
            "cannot ignore index {index} which was already enumerated"
        );
        assert!(self.ignored.insert(index), "index {index} is already ignored");
    }

    /// Finds the next occurrence of `item` after the cursor, skipping ignored indices.
    ///
    /// Returns the index and the number of ignored indices between the cursor and that index.
    pub fn next_index_of(&self, item: &T) -> Option<(usize, usize)> {
        let mut start = self.next_index();
        let mut skipped = 0;
        for &ignored in self.ignored.range(start..) {
            if let Some(index) = self.source.index_of(item, start, ignored - start, self.eq) {
                return Some((index, skipped));
            }
            skipped += 1;
            start = ignored + 1;
        }
        let count = self.source.len().saturating_sub(start);
        self.source
            .index_of(item, start, count, self.eq)
            .map(|index| (index, skipped))
    }
}
