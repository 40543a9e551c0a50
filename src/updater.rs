use std::{cell::RefCell, fmt, rc::Rc};

use derive_ex::Ex;
use tracing::trace;

use crate::ChangeEvent;

#[cfg(test)]
mod tests;

/// Receives the items affected by a [`ChangeSet`](crate::ChangeSet) while a [`CollectionUpdater`] is built.
///
/// Each method may register callbacks that run before or after the event of the change the item belongs to.
pub trait UpdateVisitor<T> {
    fn add_item(&mut self, item: &T, callbacks: &mut UpdateCallbacks) {
        let _ = (item, callbacks);
    }

    /// Called for an item that is present in both snapshots with the same version.
    fn same_item(&mut self, original: &T, updated: &T, callbacks: &mut UpdateCallbacks) {
        let _ = (original, updated, callbacks);
    }

    /// Called for an item that is present in both snapshots with a different version.
    ///
    /// Returns `true` if the visitor fully handles the replacement through its callbacks.
    /// In that case the replace event is applied silently.
    fn replace_item(&mut self, original: &T, updated: &T, callbacks: &mut UpdateCallbacks) -> bool {
        let _ = (original, updated, callbacks);
        false
    }

    fn remove_item(&mut self, item: &T, callbacks: &mut UpdateCallbacks) {
        let _ = (item, callbacks);
    }

    fn reset(&mut self, original: &[T], updated: &[T], callbacks: &mut UpdateCallbacks) {
        let _ = (original, updated, callbacks);
    }
}

impl<T> UpdateVisitor<T> for () {}

/// A callback made of several steps which behaves differently when changes are applied silently.
pub trait CompositeCallback {
    fn invoke(self: Box<Self>, silently: bool);
}

pub enum UpdateCallback {
    Simple(Box<dyn FnOnce()>),
    Composite(Box<dyn CompositeCallback>),
}

impl UpdateCallback {
    pub fn invoke(self, silently: bool) {
        match self {
            UpdateCallback::Simple(f) => f(),
            UpdateCallback::Composite(c) => c.invoke(silently),
        }
    }
}
impl fmt::Debug for UpdateCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpdateCallback::Simple(_) => f.write_str("Simple"),
            UpdateCallback::Composite(_) => f.write_str("Composite"),
        }
    }
}

/// Callbacks registered by an [`UpdateVisitor`].
///
/// Callbacks run in the order they were registered.
#[derive(Debug, Default)]
pub struct UpdateCallbacks {
    before: Vec<UpdateCallback>,
    after: Vec<UpdateCallback>,
}

impl UpdateCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a callback that runs before the event is raised.
    pub fn prepend(&mut self, f: impl FnOnce() + 'static) {
        self.before.push(UpdateCallback::Simple(Box::new(f)));
    }
    /// Registers a callback that runs after the event is raised.
    pub fn append(&mut self, f: impl FnOnce() + 'static) {
        self.after.push(UpdateCallback::Simple(Box::new(f)));
    }
    pub fn prepend_composite(&mut self, c: impl CompositeCallback + 'static) {
        self.before.push(UpdateCallback::Composite(Box::new(c)));
    }
    pub fn append_composite(&mut self, c: impl CompositeCallback + 'static) {
        self.after.push(UpdateCallback::Composite(Box::new(c)));
    }

    pub fn is_empty(&self) -> bool {
        self.before.is_empty() && self.after.is_empty()
    }
    pub(crate) fn extend(&mut self, other: UpdateCallbacks) {
        self.before.extend(other.before);
        self.after.extend(other.after);
    }
}

/// Applies events produced by a [`CollectionUpdater`] to a collection.
pub trait UpdateHandler<T> {
    /// Applies `event` and notifies observers of it.
    fn raise(&mut self, event: ChangeEvent<T>);

    /// Applies `event` without notifying observers of it.
    fn apply_silently(&mut self, event: ChangeEvent<T>);
}

impl<T: Clone> UpdateHandler<T> for Vec<T> {
    fn raise(&mut self, event: ChangeEvent<T>) {
        event.apply_to(self);
    }
    fn apply_silently(&mut self, event: ChangeEvent<T>) {
        event.apply_to(self);
    }
}
impl<T, H: UpdateHandler<T> + ?Sized> UpdateHandler<T> for &mut H {
    fn raise(&mut self, event: ChangeEvent<T>) {
        (**self).raise(event)
    }
    fn apply_silently(&mut self, event: ChangeEvent<T>) {
        (**self).apply_silently(event)
    }
}
impl<T, H: UpdateHandler<T> + ?Sized> UpdateHandler<T> for Rc<RefCell<H>> {
    fn raise(&mut self, event: ChangeEvent<T>) {
        self.borrow_mut().raise(event)
    }
    fn apply_silently(&mut self, event: ChangeEvent<T>) {
        self.borrow_mut().apply_silently(event)
    }
}

/// A single step of a [`CollectionUpdater`].
///
/// Runs the `before` callbacks, then raises or silently applies its event if any, then runs the `after` callbacks.
pub struct Update<T> {
    before: Vec<UpdateCallback>,
    event: Option<ChangeEvent<T>>,
    silent: bool,
    after: Vec<UpdateCallback>,
}

impl<T> Update<T> {
    pub(crate) fn new(callbacks: UpdateCallbacks, event: Option<ChangeEvent<T>>, silent: bool) -> Self {
        Self {
            before: callbacks.before,
            event,
            silent,
            after: callbacks.after,
        }
    }

    pub fn event(&self) -> Option<&ChangeEvent<T>> {
        self.event.as_ref()
    }

    /// Returns `true` if the event of this update is always applied silently.
    pub fn is_silent(&self) -> bool {
        self.silent
    }
    pub fn before_len(&self) -> usize {
        self.before.len()
    }
    pub fn after_len(&self) -> usize {
        self.after.len()
    }

    fn run<H: UpdateHandler<T> + ?Sized>(self, handler: &mut H, silently: bool) {
        for callback in self.before {
            callback.invoke(silently);
        }
        if let Some(event) = self.event {
            if silently || self.silent {
                handler.apply_silently(event);
            } else {
                handler.raise(event);
            }
        }
        for callback in self.after {
            callback.invoke(silently);
        }
    }
}
impl<T: fmt::Debug> fmt::Debug for Update<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Update")
            .field("before", &self.before.len())
            .field("event", &self.event)
            .field("silent", &self.silent)
            .field("after", &self.after.len())
            .finish()
    }
}

/// Ordered list of [`Update`]s built from a [`ChangeSet`](crate::ChangeSet) and an [`UpdateVisitor`].
#[derive(Ex)]
#[derive_ex(Default)]
#[default(Self::new())]
pub struct CollectionUpdater<T> {
    updates: Vec<Update<T>>,
}

impl<T> CollectionUpdater<T> {
    pub fn new() -> Self {
        Self {
            updates: Vec::new(),
        }
    }
    pub(crate) fn push(&mut self, update: Update<T>) {
        self.updates.push(update);
    }

    pub fn updates(&self) -> &[Update<T>] {
        &self.updates
    }
    pub fn len(&self) -> usize {
        self.updates.len()
    }
    pub fn is_empty(&self) -> bool {
        self.updates.is_empty()
    }

    /// Runs every update in order against `handler`.
    ///
    /// If `silently` is `true`, every event is applied with [`UpdateHandler::apply_silently`].
    pub fn dequeue_changes<H: UpdateHandler<T> + ?Sized>(self, handler: &mut H, silently: bool) {
        trace!(updates = self.updates.len(), silently, "dequeue collection changes");
        for update in self.updates {
            update.run(handler, silently);
        }
    }

    /// Collapses all updates into a single reset of `old_items` to `new_items`.
    ///
    /// All `before` callbacks run before the reset is raised, all `after` callbacks after it.
    pub fn into_reset(self, old_items: Vec<T>, new_items: Vec<T>) -> Self {
        let mut before = Vec::new();
        let mut after = Vec::new();
        for update in self.updates {
            before.extend(update.before);
            after.extend(update.after);
        }
        Self {
            updates: vec![Update {
                before,
                event: Some(ChangeEvent::Reset {
                    old_items,
                    new_items,
                }),
                silent: false,
                after,
            }],
        }
    }

    /// Binds this updater to the handler of the collection it updates.
    ///
    /// The result can be registered as a [`CompositeCallback`] of an outer update.
    pub fn bind<H: UpdateHandler<T>>(self, handler: H) -> PendingUpdate<T, H> {
        PendingUpdate {
            updater: self,
            handler,
        }
    }
}
impl<T: fmt::Debug> fmt::Debug for CollectionUpdater<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.updates).finish()
    }
}

/// A [`CollectionUpdater`] bound to its handler.
pub struct PendingUpdate<T, H> {
    updater: CollectionUpdater<T>,
    handler: H,
}

impl<T, H: UpdateHandler<T>> PendingUpdate<T, H> {
    pub fn run(mut self, silently: bool) -> H {
        self.updater.dequeue_changes(&mut self.handler, silently);
        self.handler
    }
}
impl<T, H: UpdateHandler<T>> CompositeCallback for PendingUpdate<T, H> {
    fn invoke(self: Box<Self>, silently: bool) {
        self.run(silently);
    }
}
