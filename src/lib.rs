//! Change tracking for ordered collections.
//!
//! [`diff`] compares two snapshots of a collection and produces a [`ChangeSet`].
//! A change set can be consumed in two ways:
//!
//! - as a list of declarative [`ChangeEvent`]s with [`ChangeSet::to_events`].
//! - as a [`CollectionUpdater`] built by an [`UpdateVisitor`] with [`ChangeSet::to_updater`],
//!   which runs per-item callbacks in lock-step with the events when drained into an [`UpdateHandler`].
mod change;
mod change_set;
mod comparer;
mod diff;
mod event;
mod queue;
mod snapshot;
mod updater;

#[cfg(test)]
mod test_helpers;
#[cfg(doctest)]
mod tests_readme;

pub use change::*;
pub use change_set::*;
pub use comparer::*;
pub use diff::diff;
pub use event::*;
pub use queue::*;
pub use snapshot::Snapshot;
pub use updater::*;
