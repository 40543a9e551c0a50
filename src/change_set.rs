use std::{
    any::{type_name, Any},
    fmt, iter,
    mem::take,
    ops::Range,
};

use derive_ex::Ex;
use parse_display::Display;
use serde::{ser::SerializeStruct, Serialize, Serializer};

use crate::{Change, ChangeEvent, CollectionUpdater, Update, UpdateCallbacks, UpdateVisitor};


/// Ordered list of changes that transforms one snapshot of a collection into another.
///
/// `Replace` and `Keep` changes come first, followed by `Add`, `Move` and `Remove` changes in the order they have to be applied.
#[derive(Clone, Debug, PartialEq, Eq, Ex)]
#[derive_ex(Default)]
#[default(Self::new())]
pub struct ChangeSet<T> {
    changes: Vec<Change<T>>,
}

impl<T> ChangeSet<T> {
    pub fn new() -> Self {
        Self {
            changes: Vec::new(),
        }
    }
    pub(crate) fn from_changes(changes: Vec<Change<T>>) -> Self {
        Self { changes }
    }

    /// Wraps an already computed event.
    pub fn from_event(event: ChangeEvent<T>) -> Self {
        Self {
            changes: vec![Change::Event(event)],
        }
    }
    pub fn reset(old_items: Vec<T>, new_items: Vec<T>) -> Self {
        Self::from_event(ChangeEvent::Reset {
            old_items,
            new_items,
        })
    }

    pub fn changes(&self) -> &[Change<T>] {
        &self.changes
    }

    /// Returns `true` if this change set has no visible effect, i.e. it only contains `Keep` changes.
    pub fn is_empty(&self) -> bool {
        self.changes
            .iter()
            .all(|change| matches!(change, Change::Keep { .. }))
    }

    pub fn stats(&self) -> ChangeStats {
        let mut stats = ChangeStats::default();
        for change in &self.changes {
            stats.record(change);
        }
        stats
    }

    pub fn to_events(&self) -> Vec<ChangeEvent<T>>
    where
        T: Clone,
    {
        self.changes.iter().filter_map(Change::to_event).collect()
    }
    pub fn into_events(self) -> Vec<ChangeEvent<T>> {
        self.changes
            .into_iter()
            .filter_map(Change::into_event)
            .collect()
    }

    /// Applies all events of this change set to `items`, in order.
    pub fn apply_to(&self, items: &mut Vec<T>)
    where
        T: Clone,
    {
        for change in &self.changes {
            if let Some(event) = change.to_event() {
                event.apply_to(items);
            }
        }
    }

    /// Builds a [`CollectionUpdater`] by notifying `visitor` of every affected item.
    ///
    /// Moved items are not reported as moved: they are reported through `same_item` or `replace_item`
    /// like every other item present in both snapshots.
    pub fn to_updater<V>(&self, visitor: &mut V) -> CollectionUpdater<T>
    where
        T: Clone,
        V: UpdateVisitor<T> + ?Sized,
    {
        let mut updater = CollectionUpdater::new();
        for change in &self.changes {
            visit_change(change, visitor, &mut updater);
        }
        updater
    }

    pub fn into_any(self) -> AnyChangeSet
    where
        T: 'static,
    {
        AnyChangeSet {
            item_type: type_name::<T>(),
            inner: Box::new(self),
        }
    }
}

impl<T> IntoIterator for ChangeSet<T> {
    type Item = Change<T>;
    type IntoIter = std::vec::IntoIter<Change<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.changes.into_iter()
    }
}
impl<'a, T> IntoIterator for &'a ChangeSet<T> {
    type Item = &'a Change<T>;
    type IntoIter = std::slice::Iter<'a, Change<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.changes.iter()
    }
}

fn visit_change<T, V>(change: &Change<T>, visitor: &mut V, updater: &mut CollectionUpdater<T>)
where
    T: Clone,
    V: UpdateVisitor<T> + ?Sized,
{
    match change {
        Change::Add { items, .. } => {
            let mut callbacks = UpdateCallbacks::new();
            for item in items {
                visitor.add_item(item, &mut callbacks);
            }
            updater.push(Update::new(callbacks, change.to_event(), false));
        }
        Change::Remove { items, .. } => {
            let mut callbacks = UpdateCallbacks::new();
            for item in items {
                visitor.remove_item(item, &mut callbacks);
            }
            updater.push(Update::new(callbacks, change.to_event(), false));
        }
        Change::Move { .. } => {
            updater.push(Update::new(UpdateCallbacks::new(), change.to_event(), false));
        }
        Change::Keep {
            old_items,
            new_items,
            ..
        } => {
            let mut callbacks = UpdateCallbacks::new();
            for (old_item, new_item) in iter::zip(old_items, new_items) {
                visitor.same_item(old_item, new_item, &mut callbacks);
            }
            if !callbacks.is_empty() {
                updater.push(Update::new(callbacks, None, false));
            }
        }
        Change::Replace {
            index,
            old_items,
            new_items,
        } => visit_replace(*index, old_items, new_items, visitor, updater),
        Change::Event(event) => visit_event(event, visitor, updater),
    }
}

/// Consecutive items for which `replace_item` returned the same value share a single update.
/// Updates of handled items are applied silently.
fn visit_replace<T, V>(
    index: usize,
    old_items: &[T],
    new_items: &[T],
    visitor: &mut V,
    updater: &mut CollectionUpdater<T>,
) where
    T: Clone,
    V: UpdateVisitor<T> + ?Sized,
{
    let mut run_start = 0;
    let mut run_handled = None;
    let mut run_callbacks = UpdateCallbacks::new();
    for (offset, (old_item, new_item)) in iter::zip(old_items, new_items).enumerate() {
        let mut callbacks = UpdateCallbacks::new();
        let handled = visitor.replace_item(old_item, new_item, &mut callbacks);
        if run_handled.is_some_and(|h| h != handled) {
            push_replace(
                updater,
                index,
                run_start..offset,
                (old_items, new_items),
                take(&mut run_callbacks),
                run_handled,
            );
            run_start = offset;
        }
        run_handled = Some(handled);
        run_callbacks.extend(callbacks);
    }
    if run_handled.is_some() {
        let end = old_items.len().min(new_items.len());
        push_replace(
            updater,
            index,
            run_start..end,
            (old_items, new_items),
            run_callbacks,
            run_handled,
        );
    }
}

fn push_replace<T: Clone>(
    updater: &mut CollectionUpdater<T>,
    index: usize,
    range: Range<usize>,
    (old_items, new_items): (&[T], &[T]),
    callbacks: UpdateCallbacks,
    handled: Option<bool>,
) {
    let event = ChangeEvent::Replace {
        index: index + range.start,
        old_items: old_items[range.clone()].to_vec(),
        new_items: new_items[range].to_vec(),
    };
    updater.push(Update::new(callbacks, Some(event), handled == Some(true)));
}

fn visit_event<T, V>(event: &ChangeEvent<T>, visitor: &mut V, updater: &mut CollectionUpdater<T>)
where
    T: Clone,
    V: UpdateVisitor<T> + ?Sized,
{
    let mut callbacks = UpdateCallbacks::new();
    match event {
        ChangeEvent::Add { items, .. } => {
            for item in items {
                visitor.add_item(item, &mut callbacks);
            }
        }
        ChangeEvent::Remove { items, .. } => {
            for item in items {
                visitor.remove_item(item, &mut callbacks);
            }
        }
        ChangeEvent::Move { .. } => {}
        ChangeEvent::Replace {
            index,
            old_items,
            new_items,
        } => {
            if old_items.len() == new_items.len() {
                return visit_replace(*index, old_items, new_items, visitor, updater);
            }
            for item in old_items {
                visitor.remove_item(item, &mut callbacks);
            }
            for item in new_items {
                visitor.add_item(item, &mut callbacks);
            }
        }
        ChangeEvent::Reset {
            old_items,
            new_items,
        } => visitor.reset(old_items, new_items, &mut callbacks),
    }
    updater.push(Update::new(callbacks, Some(event.clone()), false));
}

/// Number of items affected by each kind of change.
///
/// Moved items are also counted as kept or replaced, so that
/// `removed + kept + replaced` is the length of the original snapshot and
/// `added + kept + replaced` is the length of the updated snapshot.
#[derive(Clone, Copy, Debug, Default, Display, PartialEq, Eq, Hash)]
#[display("+{added} -{removed} >{moved} ~{replaced} ={kept}")]
pub struct ChangeStats {
    pub added: usize,
    pub removed: usize,
    pub moved: usize,
    pub replaced: usize,
    pub kept: usize,
}

impl ChangeStats {
    fn record<T>(&mut self, change: &Change<T>) {
        match change {
            Change::Add { items, .. } => self.added += items.len(),
            Change::Remove { items, .. } => self.removed += items.len(),
            Change::Move { items, .. } => self.moved += items.len(),
            Change::Replace { old_items, .. } => self.replaced += old_items.len(),
            Change::Keep { old_items, .. } => self.kept += old_items.len(),
            Change::Event(event) => match event {
                ChangeEvent::Add { items, .. } => self.added += items.len(),
                ChangeEvent::Remove { items, .. } => self.removed += items.len(),
                ChangeEvent::Move { items, .. } => self.moved += items.len(),
                ChangeEvent::Replace { old_items, .. } => self.replaced += old_items.len(),
                ChangeEvent::Reset {
                    old_items,
                    new_items,
                } => {
                    self.removed += old_items.len();
                    self.added += new_items.len();
                }
            },
        }
    }

    /// Returns `true` if no item was added, removed, moved or replaced.
    pub fn is_empty(&self) -> bool {
        self.added == 0 && self.removed == 0 && self.moved == 0 && self.replaced == 0
    }
}

impl Serialize for ChangeStats {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut s = serializer.serialize_struct("ChangeStats", 5)?;
        s.serialize_field("added", &self.added)?;
        s.serialize_field("removed", &self.removed)?;
        s.serialize_field("moved", &self.moved)?;
        s.serialize_field("replaced", &self.replaced)?;
        s.serialize_field("kept", &self.kept)?;
        s.end()
    }
}

/// A [`ChangeSet`] whose item type is only known at runtime.
///
/// A typed [`ChangeSet`] can only drive a handler of its own item type:
///
/// ```compile_fail
/// use collection_changes::{diff, ItemComparer};
///
/// let changes = diff(&[1, 2], &[2], &ItemComparer::<i32>::new());
/// let items: Vec<String> = Vec::new();
/// changes.to_updater(&mut ()).bind(items).run(false);
/// ```
pub struct AnyChangeSet {
    inner: Box<dyn Any>,
    item_type: &'static str,
}

impl AnyChangeSet {
    pub fn item_type_name(&self) -> &'static str {
        self.item_type
    }
    pub fn is<T: 'static>(&self) -> bool {
        self.inner.is::<ChangeSet<T>>()
    }

    pub fn downcast_ref<T: 'static>(&self) -> Result<&ChangeSet<T>, ItemTypeMismatchError> {
        self.inner
            .downcast_ref::<ChangeSet<T>>()
            .ok_or_else(|| self.mismatch::<T>())
    }
    pub fn downcast<T: 'static>(self) -> Result<ChangeSet<T>, Self> {
        match self.inner.downcast::<ChangeSet<T>>() {
            Ok(changes) => Ok(*changes),
            Err(inner) => Err(Self {
                inner,
                item_type: self.item_type,
            }),
        }
    }

    pub fn to_updater<T, V>(
        &self,
        visitor: &mut V,
    ) -> Result<CollectionUpdater<T>, ItemTypeMismatchError>
    where
        T: Clone + 'static,
        V: UpdateVisitor<T> + ?Sized,
    {
        Ok(self.downcast_ref::<T>()?.to_updater(visitor))
    }

    fn mismatch<T>(&self) -> ItemTypeMismatchError {
        ItemTypeMismatchError {
            expected: type_name::<T>(),
            actual: self.item_type,
        }
    }
}
impl<T: 'static> From<ChangeSet<T>> for AnyChangeSet {
    fn from(value: ChangeSet<T>) -> Self {
        value.into_any()
    }
}
impl fmt::Debug for AnyChangeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnyChangeSet")
            .field("item_type", &self.item_type)
            .finish_non_exhaustive()
    }
}

#[non_exhaustive]
#[derive(Display, Debug, Clone, PartialEq, Eq)]
#[display("change set item type mismatch: expected `{expected}`, found `{actual}`")]
pub struct ItemTypeMismatchError {
    pub expected: &'static str,
    pub actual: &'static str,
}

impl std::error::Error for ItemTypeMismatchError {}
