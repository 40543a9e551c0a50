use std::{cell::RefCell, rc::Rc};

use assert_call::{call, CallRecorder};
use rstest::rstest;

use crate::{
    diff,
    test_helpers::{item_comparer, items, CallHandler, CallVisitor, Item},
};

use super::*;

#[test]
fn callbacks_run_in_registration_order() {
    let mut cr = CallRecorder::new();
    let mut callbacks = UpdateCallbacks::new();
    assert!(callbacks.is_empty());
    callbacks.prepend(|| call!("before 1"));
    callbacks.append(|| call!("after 1"));
    callbacks.prepend(|| call!("before 2"));
    callbacks.append(|| call!("after 2"));
    assert!(!callbacks.is_empty());

    let mut updater = CollectionUpdater::new();
    updater.push(Update::new(
        callbacks,
        Some(ChangeEvent::Add {
            index: 0,
            items: items(&[1]),
        }),
        false,
    ));
    cr.verify(());
    updater.dequeue_changes(&mut CallHandler, false);
    cr.verify(["before 1", "before 2", "raise add 0 [1v0]", "after 1", "after 2"]);
}

#[test]
fn update_without_event() {
    let mut cr = CallRecorder::new();
    let mut callbacks = UpdateCallbacks::new();
    callbacks.append(|| call!("after"));
    let mut updater = CollectionUpdater::<Item>::new();
    updater.push(Update::new(callbacks, None, false));
    assert_eq!(updater.updates()[0].after_len(), 1);
    assert_eq!(updater.updates()[0].before_len(), 0);
    updater.dequeue_changes(&mut CallHandler, false);
    cr.verify("after");
}

#[test]
fn empty_updater() {
    let mut cr = CallRecorder::new();
    let updater = CollectionUpdater::<Item>::default();
    assert!(updater.is_empty());
    updater.dequeue_changes(&mut CallHandler, false);
    cr.verify(());
}

#[test]
fn into_reset() {
    let mut cr = CallRecorder::new();
    let old = items(&[1, 2, 3]);
    let new = items(&[2, 3, 4]);
    let updater = diff(&old, &new, &item_comparer()).to_updater(&mut CallVisitor::new());
    cr.verify([
        "same 2v0->2v0",
        "same 3v0->3v0",
        "remove 1v0",
        "add 4v0",
    ]);

    let updater = updater.into_reset(old, new);
    assert_eq!(updater.len(), 1);
    updater.dequeue_changes(&mut CallHandler, false);
    cr.verify([
        "before same 2v0",
        "before same 3v0",
        "before remove 1v0",
        "before add 4v0",
        "raise reset [1v0,2v0,3v0]->[2v0,3v0,4v0]",
        "after same 2v0",
        "after same 3v0",
        "after remove 1v0",
        "after add 4v0",
    ]);
}

#[test]
fn vec_handler() {
    let old = vec![1, 2, 3, 4, 5];
    let new = vec![5, 1, 3, 6, 4];
    let updater = diff(&old, &new, &crate::ItemComparer::new()).to_updater(&mut ());
    let items = updater.bind(old).run(false);
    assert_eq!(items, new);
}

#[test]
fn shared_handler() {
    let items = Rc::new(RefCell::new(vec![1, 2]));
    let updater = diff(&[1, 2], &[2, 3], &crate::ItemComparer::new()).to_updater(&mut ());
    updater.dequeue_changes(&mut items.clone(), false);
    assert_eq!(*items.borrow(), vec![2, 3]);
}

struct NestedVisitor(Option<PendingUpdate<Item, CallHandler>>);

impl UpdateVisitor<Item> for NestedVisitor {
    fn add_item(&mut self, _item: &Item, callbacks: &mut UpdateCallbacks) {
        if let Some(nested) = self.0.take() {
            callbacks.append_composite(nested);
        }
    }
}

#[rstest]
#[case(false, ["raise add 0 [5v0]", "raise add 1 [2v0]"])]
#[case(true, ["silent add 0 [5v0]", "silent add 1 [2v0]"])]
fn nested_updater(#[case] silently: bool, #[case] expected: [&str; 2]) {
    let mut cr = CallRecorder::new();
    let nested = diff(&items(&[1]), &items(&[1, 2]), &item_comparer())
        .to_updater(&mut ())
        .bind(CallHandler);
    let mut visitor = NestedVisitor(Some(nested));
    let updater = diff(&items(&[]), &items(&[5]), &item_comparer()).to_updater(&mut visitor);
    cr.verify(());

    updater.dequeue_changes(&mut CallHandler, silently);
    cr.verify(expected);
}

#[test]
fn simple_callback_ignores_silently() {
    let mut cr = CallRecorder::new();
    UpdateCallback::Simple(Box::new(|| call!("called"))).invoke(true);
    cr.verify("called");
}
