use std::collections::VecDeque;

use crate::{Change, ChangeKind};


/// Collects changes while the diff runs and merges adjacent runs of the same kind.
///
/// `Replace` and `Keep` are kept ordered by original index, apart from the index-affecting changes,
/// which are kept in emission order.
pub(crate) struct ChangesBuffer<T> {
    pairs: Vec<PairRun<T>>,
    changes: Vec<Change<T>>,
}

impl<T> ChangesBuffer<T> {
    pub fn new() -> Self {
        Self {
            pairs: Vec::new(),
            changes: Vec::new(),
        }
    }

    pub fn add(&mut self, index: usize, item: T) {
        if let Some(Change::Add {
            index: start,
            items,
        }) = self.changes.last_mut()
        {
            if *start + items.len() == index {
                items.push(item);
                return;
            }
        }
        self.changes.push(Change::Add {
            index,
            items: vec![item],
        });
    }
    pub fn add_range(&mut self, index: usize, items: impl IntoIterator<Item = T>) {
        for (offset, item) in items.into_iter().enumerate() {
            self.add(index + offset, item);
        }
    }

    pub fn remove(&mut self, index: usize, item: T) {
        if let Some(Change::Remove {
            index: start,
            items,
        }) = self.changes.last_mut()
        {
            if *start == index {
                items.push(item);
                return;
            }
        }
        self.changes.push(Change::Remove {
            index,
            items: vec![item],
        });
    }

    pub fn move_item(&mut self, from: usize, to: usize, item: T) {
        if let Some(Change::Move {
            from: last_from,
            to: last_to,
            items,
        }) = self.changes.last_mut()
        {
            let len = items.len();
            if *last_from + len == from && *last_to + len == to {
                items.push(item);
                return;
            }
        }
        self.changes.push(Change::Move {
            from,
            to,
            items: vec![item],
        });
    }

    pub fn keep(&mut self, index: usize, old_item: T, new_item: T) {
        self.insert_pair(ChangeKind::Keep, index, old_item, new_item);
    }
    pub fn replace(&mut self, index: usize, old_item: T, new_item: T) {
        self.insert_pair(ChangeKind::Replace, index, old_item, new_item);
    }

    fn insert_pair(&mut self, kind: ChangeKind, index: usize, old_item: T, new_item: T) {
        let pos = self.pairs.partition_point(|r| r.start <= index);
        if pos > 0 {
            let prev = &mut self.pairs[pos - 1];
            if prev.kind == kind && prev.end() == index {
                prev.old_items.push_back(old_item);
                prev.new_items.push_back(new_item);
                self.join_next(pos - 1);
                return;
            }
        }
        if let Some(next) = self.pairs.get_mut(pos) {
            if next.kind == kind && index + 1 == next.start {
                next.start = index;
                next.old_items.push_front(old_item);
                next.new_items.push_front(new_item);
                return;
            }
        }
        self.pairs.insert(
            pos,
            PairRun {
                kind,
                start: index,
                old_items: VecDeque::from([old_item]),
                new_items: VecDeque::from([new_item]),
            },
        );
    }

    fn join_next(&mut self, index: usize) {
        let Some(next) = self.pairs.get(index + 1) else {
            return;
        };
        let run = &self.pairs[index];
        if next.kind != run.kind || run.end() != next.start {
            return;
        }
        let next = self.pairs.remove(index + 1);
        let run = &mut self.pairs[index];
        run.old_items.extend(next.old_items);
        run.new_items.extend(next.new_items);
    }

    pub fn into_changes(self) -> Vec<Change<T>> {
        let mut changes: Vec<_> = self.pairs.into_iter().map(PairRun::into_change).collect();
        changes.extend(self.changes);
        changes
    }
}

/// A run of `Keep` or `Replace` pairs at contiguous original indices.
///
/// Runs grow at both ends while the diff visits moved items ahead of the cursor.
struct PairRun<T> {
    kind: ChangeKind,
    start: usize,
    old_items: VecDeque<T>,
    new_items: VecDeque<T>,
}

impl<T> PairRun<T> {
    fn end(&self) -> usize {
        self.start + self.old_items.len()
    }

    fn into_change(self) -> Change<T> {
        let index = self.start;
        let old_items = Vec::from(self.old_items);
        let new_items = Vec::from(self.new_items);
        match self.kind {
            ChangeKind::Replace => Change::Replace {
                index,
                old_items,
                new_items,
            },
            _ => Change::Keep {
                index,
                old_items,
                new_items,
            },
        }
    }
}
