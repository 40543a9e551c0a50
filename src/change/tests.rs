use super::*;

#[test]
fn ranges() {
    let c = Change::Move {
        from: 4,
        to: 1,
        items: vec![1, 2],
    };
    assert_eq!(c.kind(), ChangeKind::Move);
    assert_eq!(c.start(), 4);
    assert_eq!(c.end(), 6);
    assert!(c.is_index_affecting());

    let c = Change::Keep {
        index: 2,
        old_items: vec![1, 2, 3],
        new_items: vec![1, 2, 3],
    };
    assert_eq!(c.len(), 3);
    assert_eq!(c.end(), 5);
    assert!(!c.is_index_affecting());

    let c = Change::Event(ChangeEvent::Add {
        index: 3,
        items: vec![1],
    });
    assert_eq!(c.kind(), ChangeKind::Event);
    assert_eq!(c.start(), 3);
    assert_eq!(c.len(), 1);
}

#[test]
fn keep_has_no_event() {
    let c = Change::Keep {
        index: 0,
        old_items: vec![1],
        new_items: vec![1],
    };
    assert_eq!(c.to_event(), None);
    assert_eq!(c.into_event(), None);
}

#[test]
fn to_event() {
    let c = Change::Move {
        from: 2,
        to: 0,
        items: vec![5],
    };
    let expected = ChangeEvent::Move {
        old_index: 2,
        new_index: 0,
        items: vec![5],
    };
    assert_eq!(c.to_event(), Some(expected.clone()));
    assert_eq!(c.into_event(), Some(expected.clone()));
    assert_eq!(Change::Event(expected.clone()).into_event(), Some(expected));
}

#[test]
fn kind_display() {
    assert_eq!(ChangeKind::Keep.to_string(), "Keep");
}
