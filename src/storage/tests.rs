use super::*;
use alloc::vec::Vec;

#[test]
fn holes_get_reused() {
    let mut storage = SparseVec::new();
    let a = storage.add('a');
    let b = storage.add('b');
    let c = storage.add('c');
    assert_eq!(storage.len(), 3);

    assert_eq!(storage.remove(&b), 'b');
    assert_eq!(storage.remove(&a), 'a');
    assert_eq!(storage.len(), 1);
    assert_eq!(storage.num_holes(), 2);
    assert!(!storage.contains_key(&a));
    assert_eq!(storage.get(&c), Some(&'c'));

    // Holes are refilled in the order they were punched
    assert_eq!(storage.add('d'), b);
    assert_eq!(storage.add('e'), a);
    assert!(storage.is_dense());
    assert_eq!(storage.num_slots(), 3);
    assert_eq!(storage.add('f'), 3);
}

#[test]
#[should_panic(expected = "no element at index 1")]
fn removing_a_hole_panics() {
    let mut storage = SparseVec::new();
    storage.add(0_u8);
    let key = storage.add(1);
    storage.remove(&key);
    storage.remove(&key);
}

#[test]
fn defragment_reports_moves() {
    let mut storage = SparseVec::new();
    let keys: Vec<usize> = (0..6).map(|x| storage.add(x * 10)).collect();
    storage.remove(&keys[1]);
    storage.remove(&keys[3]);
    storage.remove(&keys[5]);

    let mut moves = Vec::new();
    storage.defragment_with(|_, previous, current| moves.push((previous, current)));
    // The trailing hole is popped, the element at 4 fills the hole at 1
    assert_eq!(moves, [(4, 1)]);
    assert!(storage.is_dense());
    assert_eq!(storage.len(), 3);
    assert_eq!(storage.num_slots(), 3);
    assert_eq!(storage.get(&1), Some(&40));
    assert_eq!(storage.get(&2), Some(&20));

    // Nothing to do on a dense storage
    storage.defragment_with(|_, _, _| panic!("moved an element of a dense storage"));
}

#[test]
fn fully_emptied_storage_defragments_to_nothing() {
    let mut storage = SparseVec::new();
    let a = storage.add(());
    let b = storage.add(());
    storage.remove(&a);
    storage.remove(&b);
    storage.defragment_with(|_, _, _| unreachable!());
    assert!(storage.is_empty());
    assert_eq!(storage.num_slots(), 0);
    assert_eq!(storage.add(()), 0);
}
