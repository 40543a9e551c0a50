use parse_display::Display;
use serde::{Serialize, Serializer};


#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, Hash)]
pub enum ChangeAction {
    Add,
    Remove,
    Move,
    Replace,
    Reset,
}

impl Serialize for ChangeAction {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

/// Declarative description of a single change of an ordered collection.
///
/// Indices are positions in the collection at the moment the event is applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChangeEvent<T> {
    Add {
        index: usize,
        items: Vec<T>,
    },
    Remove {
        index: usize,
        items: Vec<T>,
    },
    /// Moves the block `old_index..old_index + items.len()` so that it starts at `new_index`.
    Move {
        old_index: usize,
        new_index: usize,
        items: Vec<T>,
    },
    Replace {
        index: usize,
        old_items: Vec<T>,
        new_items: Vec<T>,
    },
    Reset {
        old_items: Vec<T>,
        new_items: Vec<T>,
    },
}

impl<T> ChangeEvent<T> {
    pub fn action(&self) -> ChangeAction {
        match self {
            ChangeEvent::Add { .. } => ChangeAction::Add,
            ChangeEvent::Remove { .. } => ChangeAction::Remove,
            ChangeEvent::Move { .. } => ChangeAction::Move,
            ChangeEvent::Replace { .. } => ChangeAction::Replace,
            ChangeEvent::Reset { .. } => ChangeAction::Reset,
        }
    }
    pub fn old_items(&self) -> &[T] {
        match self {
            ChangeEvent::Add { .. } => &[],
            ChangeEvent::Remove { items, .. } | ChangeEvent::Move { items, .. } => items,
            ChangeEvent::Replace { old_items, .. } | ChangeEvent::Reset { old_items, .. } => {
                old_items
            }
        }
    }
    pub fn new_items(&self) -> &[T] {
        match self {
            ChangeEvent::Remove { .. } => &[],
            ChangeEvent::Add { items, .. } | ChangeEvent::Move { items, .. } => items,
            ChangeEvent::Replace { new_items, .. } | ChangeEvent::Reset { new_items, .. } => {
                new_items
            }
        }
    }
    pub fn old_index(&self) -> Option<usize> {
        match *self {
            ChangeEvent::Remove { index, .. } | ChangeEvent::Replace { index, .. } => Some(index),
            ChangeEvent::Move { old_index, .. } => Some(old_index),
            ChangeEvent::Add { .. } | ChangeEvent::Reset { .. } => None,
        }
    }
    pub fn new_index(&self) -> Option<usize> {
        match *self {
            ChangeEvent::Add { index, .. } | ChangeEvent::Replace { index, .. } => Some(index),
            ChangeEvent::Move { new_index, .. } => Some(new_index),
            ChangeEvent::Remove { .. } | ChangeEvent::Reset { .. } => None,
        }
    }

    /// Applies this event to `items`.
    ///
    /// # Panics
    ///
    /// Panics if the indices of the event are out of bounds of `items`.
    pub fn apply_to(&self, items: &mut Vec<T>)
    where
        T: Clone,
    {
        match self {
            ChangeEvent::Add { index, items: new } => {
                items.splice(*index..*index, new.iter().cloned());
            }
            ChangeEvent::Remove { index, items: old } => {
                items.drain(*index..*index + old.len());
            }
            ChangeEvent::Move {
                old_index,
                new_index,
                items: moved,
            } => {
                let block: Vec<T> = items.drain(*old_index..*old_index + moved.len()).collect();
                items.splice(*new_index..*new_index, block);
            }
            ChangeEvent::Replace {
                index,
                old_items,
                new_items,
            } => {
                items.splice(*index..*index + old_items.len(), new_items.iter().cloned());
            }
            ChangeEvent::Reset { new_items, .. } => {
                items.clone_from(new_items);
            }
        }
    }
}
