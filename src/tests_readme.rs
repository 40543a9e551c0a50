// #![include_doc("../README.md", start)]
//! # collection-changes
//!
//! [![Crates.io](https://img.shields.io/crates/v/collection-changes.svg)](https://crates.io/crates/collection-changes)
//! [![Docs.rs](https://docs.rs/collection-changes/badge.svg)](https://docs.rs/collection-changes/)
//!
//! `collection-changes` computes the changes between two snapshots of an ordered collection, designed to be used as a foundation for UI frameworks.
//!
//! > [!WARNING]
//! > Warning: This crate is still in the very early stages of development. APIs will change. Documentation is sparse.
//!
//! ## Features
//!
//! - Single forward pass producing `Add`, `Remove`, `Move` and `Replace` events
//! - Identity and version comparison are separated
//! - Adjacent changes are merged into ranges
//! - Per-item callbacks that run in lock-step with the events
//!
//! ### Computing changes
//!
//! [`diff`] compares two snapshots with an [`ItemComparer`] and returns a [`ChangeSet`].
//!
//! ```rust
//! use collection_changes::{diff, ChangeEvent, ItemComparer};
//!
//! let old = vec![0, 1, 2, 3];
//! let new = vec![0, 2, 1, 3, 4];
//! let changes = diff(&old, &new, &ItemComparer::new());
//! assert_eq!(
//!     changes.to_events(),
//!     vec![
//!         ChangeEvent::Move { old_index: 2, new_index: 1, items: vec![2] },
//!         ChangeEvent::Add { index: 4, items: vec![4] },
//!     ]
//! );
//!
//! let mut items = old.clone();
//! changes.apply_to(&mut items);
//! assert_eq!(items, new);
//! ```
//!
//! The indices of each event are positions in the collection at the moment the event is applied, so events can be applied one by one to a list.
//!
//! ### Identity and version
//!
//! An item that is identity-equal but not version-equal is reported as replaced.
//!
//! ```rust
//! use collection_changes::{diff, ChangeEvent, ItemComparer};
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Row {
//!     id: u32,
//!     text: &'static str,
//! }
//!
//! let comparer = ItemComparer::by_key(|r: &Row| r.id).with_version_eq();
//! let old = vec![Row { id: 1, text: "a" }, Row { id: 2, text: "b" }];
//! let new = vec![Row { id: 1, text: "a" }, Row { id: 2, text: "c" }];
//! let events = diff(&old, &new, &comparer).into_events();
//! assert!(matches!(events.as_slice(), [ChangeEvent::Replace { index: 1, .. }]));
//! ```
//!
//! ### Updating views
//!
//! [`ChangeSet::to_updater`] notifies an [`UpdateVisitor`] of every added, removed, kept and replaced item.
//! The visitor can register callbacks that run before or after the event of the item is raised.
//! The resulting [`CollectionUpdater`] is then drained into an [`UpdateHandler`].
//!
//! [`diff`]: https://docs.rs/collection-changes/latest/collection_changes/fn.diff.html
//! [`ItemComparer`]: https://docs.rs/collection-changes/latest/collection_changes/struct.ItemComparer.html
//! [`ChangeSet`]: https://docs.rs/collection-changes/latest/collection_changes/struct.ChangeSet.html
//! [`ChangeSet::to_updater`]: https://docs.rs/collection-changes/latest/collection_changes/struct.ChangeSet.html#method.to_updater
//! [`UpdateVisitor`]: https://docs.rs/collection-changes/latest/collection_changes/trait.UpdateVisitor.html
//! [`CollectionUpdater`]: https://docs.rs/collection-changes/latest/collection_changes/struct.CollectionUpdater.html
//! [`UpdateHandler`]: https://docs.rs/collection-changes/latest/collection_changes/trait.UpdateHandler.html
//!
//! ## License
//!
//! This project is dual licensed under Apache-2.0/MIT. See the two LICENSE-\* files for details.
//!
//! ## Contribution
//!
//! Unless you explicitly state otherwise, any contribution intentionally submitted for inclusion in the work by you, as defined in the Apache-2.0 license, shall be dual licensed as above, without any additional terms or conditions.
// #![include_doc("../README.md", end)]
