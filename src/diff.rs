use tracing::debug;

use crate::{snapshot::item_at, ChangeSet, ItemComparer, Snapshot};

use self::{changes_buffer::ChangesBuffer, source_enumerator::SourceEnumerator};

mod changes_buffer;
mod source_enumerator;


/// Computes the changes that transform `old` into `new`.
///
/// The result is produced in a single forward pass over `old`:
///
/// - an item of `old` that is not found at or after its current position in `new` is removed.
/// - an item of `old` that is found is kept, or replaced if `comparer` reports a different version.
/// - items of `new` skipped over to reach it are moved from a later position of `old` if they exist there,
///   otherwise they are added.
/// - remaining items of `new` are added at the end.
///
/// When the same item occurs several times, the first occurrence not yet consumed is always used.
///
/// # Panics
///
/// Panics if a snapshot changes during the call or returns an index outside of the searched window.
pub fn diff<T, O, N>(old: &O, new: &N, comparer: &ItemComparer<T>) -> ChangeSet<T>
where
    T: Clone,
    O: Snapshot<T> + ?Sized,
    N: Snapshot<T> + ?Sized,
{
    let eq = comparer.identity();
    let mut source = SourceEnumerator::new(old, eq);
    let mut buffer = ChangesBuffer::new();
    let mut added = 0;
    let mut moved = 0;
    let mut removed = 0;

    while source.move_next() {
        let old_index = source.current_index();
        let old_item = source.current();
        let result_index = (old_index + added + moved) - (removed + source.ignored_count());

        let count = new.len().saturating_sub(result_index);
        let Some(new_index) = new.index_of(old_item, result_index, count, eq) else {
            buffer.remove(result_index, old_item.clone());
            removed += 1;
            continue;
        };
        assert!(
            result_index <= new_index && new_index < new.len(),
            "`Snapshot::index_of` returned {new_index} outside of {result_index}..{}",
            new.len()
        );
        push_pair(
            &mut buffer,
            comparer,
            old_index,
            old_item,
            item_at(new, new_index),
        );

        for missing_index in result_index..new_index {
            let missing_item = item_at(new, missing_index);
            if let Some((missing_old_index, skipped)) = source.next_index_of(missing_item) {
                let from_offset = moved - source.ignored_count() - skipped;
                let from = missing_old_index - removed + added + from_offset;
                source.ignore(missing_old_index);
                push_pair(
                    &mut buffer,
                    comparer,
                    missing_old_index,
                    item_at(old, missing_old_index),
                    missing_item,
                );
                buffer.move_item(from, missing_index, missing_item.clone());
                moved += 1;
            } else {
                buffer.add(missing_index, missing_item.clone());
                added += 1;
            }
        }
    }
    debug_assert_eq!(
        moved,
        source.ignored_count(),
        "some moved items were not skipped"
    );

    let end = old.len() + added - removed;
    if end < new.len() {
        buffer.add_range(end, (end..new.len()).map(|index| item_at(new, index).clone()));
    }

    let changes = ChangeSet::from_changes(buffer.into_changes());
    debug!(
        old = old.len(),
        new = new.len(),
        stats = %changes.stats(),
        "computed collection changes"
    );
    changes
}

fn push_pair<T: Clone>(
    buffer: &mut ChangesBuffer<T>,
    comparer: &ItemComparer<T>,
    index: usize,
    old_item: &T,
    new_item: &T,
) {
    if comparer.is_same_version(old_item, new_item) {
        buffer.keep(index, old_item.clone(), new_item.clone());
    } else {
        buffer.replace(index, old_item.clone(), new_item.clone());
    }
}
