use std::{collections::VecDeque, rc::Rc, sync::Arc};

#[cfg(test)]
mod tests;

/// Read-only view over an ordered sequence of items.
///
/// A snapshot must not change while a diff is being computed over it.
pub trait Snapshot<T> {
    fn len(&self) -> usize;
    fn get(&self, index: usize) -> Option<&T>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the index of the first item in `start..start + count` for which `eq(item, x)` is `true`.
    ///
    /// Items outside of the window are never examined.
    /// The window is clamped to the length of the snapshot.
    fn index_of(
        &self,
        item: &T,
        start: usize,
        count: usize,
        eq: &dyn Fn(&T, &T) -> bool,
    ) -> Option<usize> {
        let end = start.saturating_add(count).min(self.len());
        (start..end).find(|&index| self.get(index).is_some_and(|x| eq(item, x)))
    }
}

impl<T> Snapshot<T> for [T] {
    fn len(&self) -> usize {
        <[T]>::len(self)
    }
    fn get(&self, index: usize) -> Option<&T> {
        <[T]>::get(self, index)
    }
    fn index_of(
        &self,
        item: &T,
        start: usize,
        count: usize,
        eq: &dyn Fn(&T, &T) -> bool,
    ) -> Option<usize> {
        let end = start.saturating_add(count).min(self.len());
        if start >= end {
            return None;
        }
        self[start..end]
            .iter()
            .position(|x| eq(item, x))
            .map(|i| start + i)
    }
}

impl<T> Snapshot<T> for Vec<T> {
    fn len(&self) -> usize {
        self.as_slice().len()
    }
    fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }
    fn index_of(
        &self,
        item: &T,
        start: usize,
        count: usize,
        eq: &dyn Fn(&T, &T) -> bool,
    ) -> Option<usize> {
        Snapshot::index_of(self.as_slice(), item, start, count, eq)
    }
}

impl<T, const N: usize> Snapshot<T> for [T; N] {
    fn len(&self) -> usize {
        N
    }
    fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }
    fn index_of(
        &self,
        item: &T,
        start: usize,
        count: usize,
        eq: &dyn Fn(&T, &T) -> bool,
    ) -> Option<usize> {
        Snapshot::index_of(self.as_slice(), item, start, count, eq)
    }
}

impl<T> Snapshot<T> for VecDeque<T> {
    fn len(&self) -> usize {
        VecDeque::len(self)
    }
    fn get(&self, index: usize) -> Option<&T> {
        VecDeque::get(self, index)
    }
}

impl<T> Snapshot<T> for Rc<[T]> {
    fn len(&self) -> usize {
        <[T]>::len(self)
    }
    fn get(&self, index: usize) -> Option<&T> {
        <[T]>::get(self, index)
    }
    fn index_of(
        &self,
        item: &T,
        start: usize,
        count: usize,
        eq: &dyn Fn(&T, &T) -> bool,
    ) -> Option<usize> {
        Snapshot::index_of(&**self, item, start, count, eq)
    }
}

impl<T> Snapshot<T> for Arc<[T]> {
    fn len(&self) -> usize {
        <[T]>::len(self)
    }
    fn get(&self, index: usize) -> Option<&T> {
        <[T]>::get(self, index)
    }
    fn index_of(
        &self,
        item: &T,
        start: usize,
        count: usize,
        eq: &dyn Fn(&T, &T) -> bool,
    ) -> Option<usize> {
        Snapshot::index_of(&**self, item, start, count, eq)
    }
}

impl<T, S: Snapshot<T> + ?Sized> Snapshot<T> for &S {
    fn len(&self) -> usize {
        (**self).len()
    }
    fn get(&self, index: usize) -> Option<&T> {
        (**self).get(index)
    }
    fn index_of(
        &self,
        item: &T,
        start: usize,
        count: usize,
        eq: &dyn Fn(&T, &T) -> bool,
    ) -> Option<usize> {
        (**self).index_of(item, start, count, eq)
    }
}

pub(crate) fn item_at<T, S: Snapshot<T> + ?Sized>(snapshot: &S, index: usize) -> &T {
    snapshot
        .get(index)
        .expect("snapshot changed while computing changes")
}
