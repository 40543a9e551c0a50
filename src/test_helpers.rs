use std::fmt::Display;

use assert_call::call;
use parse_display::Display;

use crate::{ChangeEvent, ItemComparer, UpdateCallbacks, UpdateHandler, UpdateVisitor};

#[derive(Clone, Copy, Debug, Display, PartialEq, Eq)]
#[display("{id}v{version}")]
pub struct Item {
    pub id: u32,
    pub version: u32,
}

pub fn item(id: u32, version: u32) -> Item {
    Item { id, version }
}
pub fn items(ids: &[u32]) -> Vec<Item> {
    ids.iter().map(|&id| item(id, 0)).collect()
}

pub fn item_comparer() -> ItemComparer<Item> {
    ItemComparer::by_key(|x: &Item| x.id).with_version_eq()
}

pub fn fmt_items<T: Display>(items: &[T]) -> String {
    let items: Vec<_> = items.iter().map(|x| x.to_string()).collect();
    format!("[{}]", items.join(","))
}

pub fn fmt_event<T: Display>(event: &ChangeEvent<T>) -> String {
    match event {
        ChangeEvent::Add { index, items } => format!("add {index} {}", fmt_items(items)),
        ChangeEvent::Remove { index, items } => format!("remove {index} {}", fmt_items(items)),
        ChangeEvent::Move {
            old_index,
            new_index,
            items,
        } => format!("move {old_index}->{new_index} {}", fmt_items(items)),
        ChangeEvent::Replace {
            index,
            old_items,
            new_items,
        } => format!(
            "replace {index} {}->{}",
            fmt_items(old_items),
            fmt_items(new_items)
        ),
        ChangeEvent::Reset {
            old_items,
            new_items,
        } => format!("reset {}->{}", fmt_items(old_items), fmt_items(new_items)),
    }
}

/// Records every call with `call!` and registers recording callbacks.
pub struct CallVisitor<T> {
    handled: Box<dyn Fn(&T, &T) -> bool>,
}

impl<T: 'static> CallVisitor<T> {
    pub fn new() -> Self {
        Self::handling(|_, _| false)
    }
    pub fn handling(handled: impl Fn(&T, &T) -> bool + 'static) -> Self {
        Self {
            handled: Box::new(handled),
        }
    }
}

fn register(callbacks: &mut UpdateCallbacks, name: String) {
    let before = format!("before {name}");
    let after = format!("after {name}");
    callbacks.prepend(move || call!("{before}"));
    callbacks.append(move || call!("{after}"));
}

impl<T: Display> UpdateVisitor<T> for CallVisitor<T> {
    fn add_item(&mut self, item: &T, callbacks: &mut UpdateCallbacks) {
        call!("add {item}");
        register(callbacks, format!("add {item}"));
    }
    fn same_item(&mut self, original: &T, updated: &T, callbacks: &mut UpdateCallbacks) {
        call!("same {original}->{updated}");
        register(callbacks, format!("same {updated}"));
    }
    fn replace_item(&mut self, original: &T, updated: &T, callbacks: &mut UpdateCallbacks) -> bool {
        call!("replace {original}->{updated}");
        register(callbacks, format!("replace {updated}"));
        (self.handled)(original, updated)
    }
    fn remove_item(&mut self, item: &T, callbacks: &mut UpdateCallbacks) {
        call!("remove {item}");
        register(callbacks, format!("remove {item}"));
    }
    fn reset(&mut self, original: &[T], updated: &[T], callbacks: &mut UpdateCallbacks) {
        call!("reset {}->{}", fmt_items(original), fmt_items(updated));
        register(callbacks, "reset".to_string());
    }
}

/// Records raised and silently applied events with `call!`.
pub struct CallHandler;

impl<T: Display> UpdateHandler<T> for CallHandler {
    fn raise(&mut self, event: ChangeEvent<T>) {
        call!("raise {}", fmt_event(&event));
    }
    fn apply_silently(&mut self, event: ChangeEvent<T>) {
        call!("silent {}", fmt_event(&event));
    }
}
