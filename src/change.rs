use parse_display::Display;

use crate::ChangeEvent;

#[cfg(test)]
mod tests;

#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    Add,
    Remove,
    Move,
    Replace,
    Keep,
    Event,
}

/// A single node of a computed change set.
///
/// `Replace` and `Keep` indices are positions in the original collection.
/// `Add`, `Remove` and `Move` indices are positions in the collection
/// after all preceding `Add`, `Remove` and `Move` nodes have been applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Change<T> {
    Add {
        index: usize,
        items: Vec<T>,
    },
    Remove {
        index: usize,
        items: Vec<T>,
    },
    Move {
        from: usize,
        to: usize,
        items: Vec<T>,
    },
    Replace {
        index: usize,
        old_items: Vec<T>,
        new_items: Vec<T>,
    },
    /// Identity-equal and version-equal items.
    /// Never produces an event but still drives the visitor.
    Keep {
        index: usize,
        old_items: Vec<T>,
        new_items: Vec<T>,
    },
    /// An already computed event.
    Event(ChangeEvent<T>),
}

impl<T> Change<T> {
    pub fn kind(&self) -> ChangeKind {
        match self {
            Change::Add { .. } => ChangeKind::Add,
            Change::Remove { .. } => ChangeKind::Remove,
            Change::Move { .. } => ChangeKind::Move,
            Change::Replace { .. } => ChangeKind::Replace,
            Change::Keep { .. } => ChangeKind::Keep,
            Change::Event(_) => ChangeKind::Event,
        }
    }

    pub fn start(&self) -> usize {
        match self {
            Change::Add { index, .. }
            | Change::Remove { index, .. }
            | Change::Replace { index, .. }
            | Change::Keep { index, .. } => *index,
            Change::Move { from, .. } => *from,
            Change::Event(e) => e.old_index().or(e.new_index()).unwrap_or(0),
        }
    }
    pub fn end(&self) -> usize {
        self.start() + self.len()
    }
    pub fn len(&self) -> usize {
        match self {
            Change::Add { items, .. } | Change::Remove { items, .. } | Change::Move { items, .. } => {
                items.len()
            }
            Change::Replace { old_items, .. } | Change::Keep { old_items, .. } => old_items.len(),
            Change::Event(e) => e.old_items().len().max(e.new_items().len()),
        }
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if this change shifts the index of other items.
    pub fn is_index_affecting(&self) -> bool {
        matches!(
            self,
            Change::Add { .. } | Change::Remove { .. } | Change::Move { .. } | Change::Event(_)
        )
    }

    pub fn to_event(&self) -> Option<ChangeEvent<T>>
    where
        T: Clone,
    {
        Some(match self {
            Change::Add { index, items } => ChangeEvent::Add {
                index: *index,
                items: items.clone(),
            },
            Change::Remove { index, items } => ChangeEvent::Remove {
                index: *index,
                items: items.clone(),
            },
            Change::Move { from, to, items } => ChangeEvent::Move {
                old_index: *from,
                new_index: *to,
                items: items.clone(),
            },
            Change::Replace {
                index,
                old_items,
                new_items,
            } => ChangeEvent::Replace {
                index: *index,
                old_items: old_items.clone(),
                new_items: new_items.clone(),
            },
            Change::Keep { .. } => return None,
            Change::Event(e) => e.clone(),
        })
    }
    pub fn into_event(self) -> Option<ChangeEvent<T>> {
        Some(match self {
            Change::Add { index, items } => ChangeEvent::Add { index, items },
            Change::Remove { index, items } => ChangeEvent::Remove { index, items },
            Change::Move { from, to, items } => ChangeEvent::Move {
                old_index: from,
                new_index: to,
                items,
            },
            Change::Replace {
                index,
                old_items,
                new_items,
            } => ChangeEvent::Replace {
                index,
                old_items,
                new_items,
            },
            Change::Keep { .. } => return None,
            Change::Event(e) => e,
        })
    }
}
