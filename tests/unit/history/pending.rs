use super::*;

fn restore(n: u8) -> PaintJob {
    PaintJob::Restore(Snapshot::from_png(1, 1, vec![n]))
}

fn import(n: u8) -> PaintJob {
    PaintJob::Import(Arc::from(vec![n]))
}

#[test]
fn latest_restore_wins() {
    let mut slot = DecodeSlot::new();
    assert!(slot.is_idle());
    assert_eq!(slot.submit(restore(1)), None);
    assert_eq!(slot.submit(restore(2)), None);
    assert_eq!(slot.submit(restore(3)), None);
    assert_eq!(slot.superseded(), 2);
    assert_eq!(slot.take(), Some(restore(3)));
    assert!(slot.is_idle());
    assert_eq!(slot.take(), None);
}

#[test]
fn displaced_import_is_handed_back() {
    let mut slot = DecodeSlot::new();
    slot.submit(import(9));
    assert_eq!(slot.submit(restore(1)), Some(import(9)));
    assert_eq!(slot.peek(), Some(&restore(1)));
    assert_eq!(slot.superseded(), 0);

    assert_eq!(slot.submit(import(4)), None);
    assert_eq!(slot.superseded(), 1);
}
