use std::{
    cell::{Cell, RefCell},
    collections::VecDeque,
    rc::Rc,
};

use derive_ex::derive_ex;
use tracing::trace;

use crate::{ChangeEvent, CollectionUpdater, UpdateHandler};


/// Serializes the draining of [`CollectionUpdater`]s into a single handler.
///
/// An updater enqueued from a callback of the updater being drained
/// runs after it instead of inside it.
///
/// The queue is single-threaded.
///
/// ```compile_fail
/// use collection_changes::UpdateQueue;
///
/// fn assert_send<T: Send>(_: T) {}
/// assert_send(UpdateQueue::<i32, Vec<i32>>::new(Vec::new()));
/// ```
#[derive_ex(Clone, bound())]
pub struct UpdateQueue<T, H>(Rc<RawUpdateQueue<T, H>>);

struct RawUpdateQueue<T, H> {
    handler: RefCell<H>,
    pending: RefCell<VecDeque<(CollectionUpdater<T>, bool)>>,
    is_draining: Cell<bool>,
}

impl<T, H: UpdateHandler<T>> UpdateQueue<T, H> {
    pub fn new(handler: H) -> Self {
        Self(Rc::new(RawUpdateQueue {
            handler: RefCell::new(handler),
            pending: RefCell::new(VecDeque::new()),
            is_draining: Cell::new(false),
        }))
    }

    pub fn enqueue(&self, updater: CollectionUpdater<T>, silently: bool) {
        self.0.pending.borrow_mut().push_back((updater, silently));
        if self.0.is_draining.get() {
            trace!(
                pending = self.0.pending.borrow().len(),
                "deferred collection update"
            );
            return;
        }
        let _guard = DrainGuard::new(&self.0.is_draining);
        loop {
            let Some((updater, silently)) = self.0.pending.borrow_mut().pop_front() else {
                break;
            };
            updater.dequeue_changes(&mut QueueHandler(&self.0.handler), silently);
        }
    }

    pub fn is_draining(&self) -> bool {
        self.0.is_draining.get()
    }
    pub fn pending_len(&self) -> usize {
        self.0.pending.borrow().len()
    }

    /// Calls `f` with the handler.
    ///
    /// # Panics
    ///
    /// Panics if called while the handler is applying an event.
    pub fn with_handler<U>(&self, f: impl FnOnce(&H) -> U) -> U {
        f(&self.0.handler.borrow())
    }
}

struct QueueHandler<'a, H>(&'a RefCell<H>);

impl<T, H: UpdateHandler<T>> UpdateHandler<T> for QueueHandler<'_, H> {
    fn raise(&mut self, event: ChangeEvent<T>) {
        self.0.borrow_mut().raise(event)
    }
    fn apply_silently(&mut self, event: ChangeEvent<T>) {
        self.0.borrow_mut().apply_silently(event)
    }
}

struct DrainGuard<'a>(&'a Cell<bool>);

impl<'a> DrainGuard<'a> {
    fn new(is_draining: &'a Cell<bool>) -> Self {
        is_draining.set(true);
        Self(is_draining)
    }
}
impl Drop for DrainGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}
