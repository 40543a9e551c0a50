use std::{collections::VecDeque, rc::Rc, sync::Arc};

use rstest::rstest;

use super::*;

fn eq(a: &i32, b: &i32) -> bool {
    a == b
}

#[rstest]
#[case(0, 5, Some(1))]
#[case(2, 5, Some(3))]
#[case(2, 1, None)]
#[case(4, 5, None)]
#[case(1, 0, None)]
#[case(10, 5, None)]
#[case(0, usize::MAX, Some(1))]
fn index_of_window(#[case] start: usize, #[case] count: usize, #[case] expected: Option<usize>) {
    let items = [0, 1, 2, 1, 3];
    assert_eq!(Snapshot::index_of(&items[..], &1, start, count, &eq), expected);

    let items: VecDeque<i32> = items.into_iter().collect();
    assert_eq!(items.index_of(&1, start, count, &eq), expected);
}

#[test]
fn index_of_examines_only_window() {
    let items = vec![0, 1, 2, 3, 4];
    let examined = std::cell::RefCell::new(Vec::new());
    let eq = |a: &i32, b: &i32| {
        examined.borrow_mut().push(*b);
        a == b
    };
    assert_eq!(items.index_of(&9, 1, 3, &eq), None);
    assert_eq!(*examined.borrow(), vec![1, 2, 3]);
}

#[test]
fn snapshot_impls() {
    let vec = vec![1, 2, 3];
    let rc: Rc<[i32]> = Rc::from(vec.clone());
    let arc: Arc<[i32]> = Arc::from(vec.clone());
    let deque: VecDeque<i32> = vec.iter().copied().collect();

    fn check<S: Snapshot<i32> + ?Sized>(s: &S) {
        assert_eq!(s.len(), 3);
        assert!(!s.is_empty());
        assert_eq!(s.get(2), Some(&3));
        assert_eq!(s.get(3), None);
        assert_eq!(s.index_of(&3, 0, 3, &eq), Some(2));
    }
    check(&vec);
    check(&vec[..]);
    check(&rc);
    check(&arc);
    check(&deque);
    check(&&vec);
}

#[test]
fn empty_snapshot() {
    let items: Vec<i32> = Vec::new();
    assert!(Snapshot::is_empty(&items));
    assert_eq!(items.index_of(&0, 0, 1, &eq), None);
}

#[test]
#[should_panic(expected = "snapshot changed")]
fn item_at_out_of_range() {
    let items = vec![1];
    item_at(&items, 1);
}
