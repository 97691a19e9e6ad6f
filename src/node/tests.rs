use super::*;
use alloc::vec;

type TestStorage = SparseVec<Node<u32>>;

/// Builds the chain root → `outer` → `inner` and stores `value` in the leaf, returning the leaf key.
fn put(storage: &mut TestStorage, root: usize, outer: usize, inner: usize, value: u32) -> usize {
    let existing = NodeRef::new_trusted(&*storage, root)
        .child(outer)
        .map(NodeRef::into_raw_key);
    let branch = match existing {
        Some(branch) => branch,
        None => insert_child(storage, &root, outer, || 0),
    };
    let leaf = insert_child(storage, &branch, inner, || 0);
    *node_at_mut(storage, &leaf).value_mut().unwrap() = value;
    leaf
}

fn two_level() -> (TestStorage, usize) {
    let mut storage = TestStorage::new();
    let root = storage.add(Node::root(2, || 0));
    put(&mut storage, root, 1, 5, 15);
    put(&mut storage, root, 1, 7, 17);
    put(&mut storage, root, 4, 0, 40);
    put(&mut storage, root, 9, 2, 92);
    (storage, root)
}

#[test]
fn nodes_know_their_place() {
    let (storage, root) = two_level();
    let root = NodeRef::new_trusted(&storage, root);
    assert!(root.is_root());
    assert_eq!(root.depth(), 2);
    assert_eq!(root.size(), 4);

    let branch = root.child(1).unwrap();
    assert_eq!(branch.index(), 1);
    assert_eq!(branch.depth(), 1);
    assert_eq!(branch.parent(), Some(root));
    assert_eq!(branch.size(), 2);

    let leaf = branch.child(7).unwrap();
    assert!(leaf.is_leaf());
    assert_eq!(leaf.value(), Some(&17));
    assert_eq!(leaf.coords::<2>(), [1, 7]);
    assert!(root.child(2).is_none());
    assert!(leaf.child(0).is_none());
}

#[test]
fn leaves_walk_in_coordinate_order() {
    let (storage, root) = two_level();
    let root = NodeRef::new_trusted(&storage, root);

    let mut forward = vec![];
    let mut current = root.first_leaf();
    while let Some(leaf) = current {
        forward.push(leaf.coords::<2>());
        current = leaf.successor();
    }
    assert_eq!(forward, [[1, 5], [1, 7], [4, 0], [9, 2]]);

    let mut backward = vec![];
    let mut current = root.last_leaf();
    while let Some(leaf) = current {
        backward.push(*leaf.value().unwrap());
        current = leaf.predecessor();
    }
    assert_eq!(backward, [92, 40, 17, 15]);
}

#[test]
fn scoped_walks_stay_inside() {
    let (storage, root) = two_level();
    let root = NodeRef::new_trusted(&storage, root);
    let branch = root.child(1).unwrap();
    let last = branch.last_leaf().unwrap();
    assert_eq!(last.coords::<2>(), [1, 7]);
    assert!(last.successor_within(Some(branch.raw_key())).is_none());
    assert_eq!(last.successor().map(|x| x.coords::<2>()), Some([4, 0]));
    let first = branch.first_leaf().unwrap();
    assert!(first.predecessor_within(Some(branch.raw_key())).is_none());
}

#[test]
fn empty_branches_are_skipped() {
    let (mut storage, root) = two_level();
    // A dangling branch is never left behind by the matrix, but traversal must not trip over one
    insert_child(&mut storage, &root, 6, || 0);
    let root = NodeRef::new_trusted(&storage, root);
    let after = root.child(4).unwrap().first_leaf().unwrap().successor().unwrap();
    assert_eq!(after.coords::<2>(), [9, 2]);
    let before = root.child(9).unwrap().first_leaf().unwrap().predecessor().unwrap();
    assert_eq!(before.coords::<2>(), [4, 0]);
}

#[test]
fn removal_prunes_empty_ancestors() {
    let (mut storage, root) = two_level();
    let nodes_before = storage.len();
    let leaf = NodeRef::new_trusted(&storage, root)
        .child(4)
        .and_then(|x| x.child(0))
        .unwrap()
        .into_raw_key();
    assert_eq!(remove_subtree(&mut storage, &leaf), Some(40));
    // The leaf and its now empty branch
    assert_eq!(storage.len(), nodes_before - 2);
    assert!(NodeRef::new_trusted(&storage, root).child(4).is_none());

    // A branch which still has children stays
    let leaf = NodeRef::new_trusted(&storage, root)
        .child(1)
        .and_then(|x| x.child(5))
        .unwrap()
        .into_raw_key();
    assert_eq!(remove_subtree(&mut storage, &leaf), Some(15));
    assert_eq!(NodeRef::new_trusted(&storage, root).child(1).unwrap().size(), 1);

    // The root never goes away
    assert_eq!(remove_subtree(&mut storage, &root), None);
    assert!(storage.contains_key(&root));
}

#[test]
fn removing_a_branch_drops_its_subtree() {
    let (mut storage, root) = two_level();
    let branch = NodeRef::new_trusted(&storage, root).child(1).unwrap().into_raw_key();
    assert_eq!(remove_subtree(&mut storage, &branch), None);
    assert_eq!(NodeRef::new_trusted(&storage, root).size(), 2);
    // Root, two branches, two leaves
    assert_eq!(storage.len(), 5);
}

#[test]
fn defragmentation_fixes_links() {
    let (mut storage, root) = two_level();
    let leaf = NodeRef::new_trusted(&storage, root)
        .child(1)
        .and_then(|x| x.child(5))
        .unwrap()
        .into_raw_key();
    remove_subtree(&mut storage, &leaf);
    assert!(!storage.is_dense());
    storage.defragment();
    assert!(storage.is_dense());

    let root = NodeRef::new_trusted(&storage, root);
    let mut cells = vec![];
    let mut current = root.first_leaf();
    while let Some(leaf) = current {
        assert_eq!(leaf.parent().and_then(|x| x.child(leaf.index())), Some(leaf));
        cells.push((leaf.coords::<2>(), *leaf.value().unwrap()));
        current = leaf.successor();
    }
    assert_eq!(cells, [([1, 7], 17), ([4, 0], 40), ([9, 2], 92)]);
}

#[test]
fn debug_shows_only_the_node() {
    let (storage, root) = two_level();
    let leaf = NodeRef::new_trusted(&storage, root)
        .child(1)
        .and_then(|branch| branch.child(7))
        .unwrap();
    assert_eq!(
        alloc::format!("{:?}", leaf),
        "NodeRef { key: 3, node: Node { index: 7, depth: 0, parent: Some(1), data: Leaf(17) } }",
    );
}

#[test]
fn path_check_accepts_a_consistent_tree() {
    let (mut storage, root) = two_level();
    let leaf = put(&mut storage, root, 9, 3, 93);
    check_path(&storage, &leaf);
    remove_subtree(&mut storage, &leaf);
    check_path(&storage, &root);
}

#[cfg(debug_assertions)]
#[test]
#[should_panic(expected = "is not linked from its parent")]
fn path_check_catches_a_broken_link() {
    let (mut storage, root) = two_level();
    let leaf = put(&mut storage, root, 4, 2, 42);
    node_at_mut(&mut storage, &leaf).index = 3;
    check_path(&storage, &leaf);
}

#[cfg(debug_assertions)]
#[test]
#[should_panic(expected = "was left without children")]
fn path_check_catches_an_empty_branch() {
    let (mut storage, root) = two_level();
    let branch = insert_child(&mut storage, &root, 6, || 0);
    check_path(&storage, &branch);
}
