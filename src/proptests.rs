use super::*;

use crate::node::Node;
use proptest::prelude::*;
use std::{collections::BTreeMap, fmt::Debug, vec::Vec};

/// Walks the whole tree of a matrix and checks every structural invariant: depths, back-links, the absence of empty branches and default leaves, and that nothing in the storage is unreachable.
pub(crate) fn validate_matrix<T, const D: usize>(m: &Matrix<T, D>)
where
    T: Clone + PartialEq + Debug,
{
    let root = m.root();
    assert!(root.is_root(), "root must not have a parent");
    assert_eq!(root.depth(), D, "root must sit at depth D");

    let mut stack = vec![root];
    let mut reachable = 0_usize;
    let mut leaves = 0_usize;
    while let Some(node) = stack.pop() {
        reachable += 1;
        let inner: &Node<T> = node.node();
        match inner.children() {
            Some(children) => {
                assert!(inner.depth() > 0, "branch at depth 0");
                if !node.is_root() {
                    assert!(!children.is_empty(), "empty branch at {:?}", node.raw_key());
                }
                for (&index, key) in children {
                    let child = node.child(index).unwrap();
                    assert_eq!(child.raw_key(), key);
                    assert_eq!(child.index(), index, "child index must match its map entry");
                    assert_eq!(child.depth() + 1, inner.depth(), "child depth must be one less");
                    assert_eq!(child.parent(), Some(node), "child must link back to its parent");
                    stack.push(child);
                }
            }
            None => {
                assert_eq!(inner.depth(), 0, "leaf above depth 0");
                if !node.is_root() {
                    assert_ne!(
                        inner.value(),
                        Some(m.default_value()),
                        "leaf at {:?} holds the default value",
                        node.coords::<D>(),
                    );
                    leaves += 1;
                }
            }
        }
    }
    assert_eq!(reachable, m.storage().len(), "storage holds unreachable nodes");
    if D > 0 {
        assert_eq!(leaves, m.size(), "size must count the leaves");
    }
}

#[derive(Clone, Debug)]
enum Op {
    Set([usize; 3], u8),
    SetThroughHandles([usize; 3], u8),
    Remove([usize; 3]),
    Get([usize; 3]),
    Touch([usize; 3]),
    Defragment,
}

fn coords_strategy() -> impl Strategy<Value = [usize; 3]> + Clone {
    // Small ranges so that paths collide often
    [0_usize..4, 0_usize..4, 0_usize..6]
}

fn value_strategy() -> impl Strategy<Value = u8> {
    // Biased towards 0, the default, so that removals through assignment are common
    prop_oneof![1 => Just(0_u8), 3 => any::<u8>()]
}

fn ops_strategy() -> impl Strategy<Value = Vec<Op>> {
    let coords = coords_strategy();
    let op = prop_oneof![
        35 => (coords.clone(), value_strategy()).prop_map(|(c, v)| Op::Set(c, v)),
        20 => (coords.clone(), value_strategy()).prop_map(|(c, v)| Op::SetThroughHandles(c, v)),
        20 => coords.clone().prop_map(Op::Remove),
        15 => coords.clone().prop_map(Op::Get),
        9 => coords.prop_map(Op::Touch),
        1 => Just(Op::Defragment),
    ];
    prop::collection::vec(op, 0..=400)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        max_shrink_iters: 10_000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_equivalence(ops in ops_strategy()) {
        let mut t = Matrix::<u8, 3>::new();
        let mut m: BTreeMap<[usize; 3], u8> = BTreeMap::new();

        for op in ops {
            match op {
                Op::Set(coords, value) => {
                    let old_t = t.set(coords, value);
                    let old_m = if value == 0 {
                        m.remove(&coords)
                    } else {
                        m.insert(coords, value)
                    };
                    prop_assert_eq!(old_t, old_m);
                }
                Op::SetThroughHandles([i, j, k], value) => {
                    t.at(i).at(j).cell(k).set(value);
                    if value == 0 {
                        m.remove(&[i, j, k]);
                    } else {
                        m.insert([i, j, k], value);
                    }
                }
                Op::Remove(coords) => {
                    prop_assert_eq!(t.remove(coords), m.remove(&coords));
                }
                Op::Get(coords) => {
                    let got_m = m.get(&coords).copied().unwrap_or(0);
                    prop_assert_eq!(t[coords], got_m);
                    prop_assert_eq!(t.contains(coords), m.contains_key(&coords));
                }
                Op::Touch([i, j, k]) => {
                    // Reading through handles must never change the matrix
                    let cell = t.at(i).at(j).cell(k);
                    prop_assert_eq!(*cell.get(), m.get(&[i, j, k]).copied().unwrap_or(0));
                }
                Op::Defragment => {
                    t.defragment();
                    prop_assert!(t.is_dense());
                }
            }

            prop_assert_eq!(t.size(), m.len());
        }

        validate_matrix(&t);
        let got: Vec<([usize; 3], u8)> = t.iter().map(|(k, v)| (k, *v)).collect();
        let expected: Vec<([usize; 3], u8)> = m.iter().map(|(k, v)| (*k, *v)).collect();
        prop_assert_eq!(&got, &expected);
        let got_rev: Vec<[usize; 3]> = t.keys().rev().collect();
        let expected_rev: Vec<[usize; 3]> = m.keys().rev().copied().collect();
        prop_assert_eq!(got_rev, expected_rev);
    }

    #[test]
    fn prop_views_agree_with_filtering(
        cells in prop::collection::btree_map(coords_strategy(), 1_u8..=255, 0..=64),
        outer in 0_usize..4,
    ) {
        let mut t: Matrix<u8, 3> = cells.iter().map(|(k, v)| (*k, *v)).collect();
        let expected: Vec<([usize; 3], u8)> = cells
            .iter()
            .filter(|(k, _)| k[0] == outer)
            .map(|(k, v)| (*k, *v))
            .collect();
        let view = t.at(outer);
        prop_assert_eq!(view.size(), expected.len());
        let got: Vec<([usize; 3], u8)> = view.iter().map(|(k, v)| (k, *v)).collect();
        prop_assert_eq!(got, expected);
    }
}

#[test]
fn exhaustive_removal_order_small_set() {
    let cells = [[0, 0, 0], [0, 0, 1], [0, 1, 0], [1, 0, 0], [1, 1, 1]];
    // Every permutation of removing the cells leaves a valid tree after every step
    let mut order: Vec<usize> = (0..cells.len()).collect();
    loop {
        let mut t = Matrix::<u8, 3>::new();
        for (i, &coords) in cells.iter().enumerate() {
            t.set(coords, i as u8 + 1);
        }
        for &i in &order {
            assert_eq!(t.remove(cells[i]), Some(i as u8 + 1));
            validate_matrix(&t);
        }
        assert!(t.is_empty());
        assert_eq!(t.storage().len(), 1);
        if !next_permutation(&mut order) {
            break;
        }
    }
}

fn next_permutation(items: &mut [usize]) -> bool {
    let Some(i) = items.windows(2).rposition(|w| w[0] < w[1]) else {
        return false;
    };
    let j = items.iter().rposition(|&x| x > items[i]).unwrap();
    items.swap(i, j);
    items[i + 1..].reverse();
    true
}
