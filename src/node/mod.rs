//! The nodes of the index tree which backs a [`Matrix`].
//!
//! A matrix of dimension `D` is stored as a tree of depth `D`: the root sits at depth `D`, every branch node at depth `d` maps indices of one coordinate to its children at depth `d - 1`, and the nodes at depth 0 are leaves holding the stored values. A leaf therefore represents exactly one cell, and the indices on the path from the root to it form that cell's coordinates.
//!
//! Nodes live in a [`Storage`] arena and reference each other by storage keys: branches own their children through an ordered `index → key` map, and every node except the root keeps a non-owning key of its parent.
//!
//! [`Matrix`]: ../matrix/struct.Matrix.html " "
//! [`Storage`]: ../storage/trait.Storage.html " "

use core::fmt::Debug;
use alloc::{collections::BTreeMap, vec::Vec};
use crate::storage::{Storage, SparseVec, MoveFix};

mod node_ref;
pub use node_ref::NodeRef;

#[cfg(test)]
mod tests;

/// A node of a matrix tree.
///
/// Created by the matrix internally and only publicly exposed so that matrix storages' generic arguments could be specified.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Node<T, K = usize>
where
    K: Clone + Debug + Eq,
{
    pub(crate) index: usize,
    pub(crate) depth: usize,
    pub(crate) parent: Option<K>,
    pub(crate) data: NodeData<T, K>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) enum NodeData<T, K> {
    Branch(BTreeMap<usize, K>),
    Leaf(T),
}

impl<T, K> Node<T, K>
where
    K: Clone + Debug + Eq,
{
    /// Creates the root node of a tree of the specified depth. Root leaves only appear in zero-dimensional matrices.
    pub(crate) fn root(depth: usize, leaf_value: impl FnOnce() -> T) -> Self {
        Self {
            index: 0,
            depth,
            parent: None,
            data: Self::empty_data(depth, leaf_value),
        }
    }
    /// Creates a default-constructed child for the specified parent: an empty branch, or a leaf with the provided value if the parent sits at depth 1.
    pub(crate) fn child(
        index: usize,
        parent: K,
        parent_depth: usize,
        leaf_value: impl FnOnce() -> T,
    ) -> Self {
        debug_assert!(parent_depth > 0, "leaves cannot have children");
        let depth = parent_depth - 1;
        Self {
            index,
            depth,
            parent: Some(parent),
            data: Self::empty_data(depth, leaf_value),
        }
    }
    fn empty_data(depth: usize, leaf_value: impl FnOnce() -> T) -> NodeData<T, K> {
        if depth == 0 {
            NodeData::Leaf(leaf_value())
        } else {
            NodeData::Branch(BTreeMap::new())
        }
    }

    /// Returns the index this node occupies in its parent's children. Meaningless for the root.
    #[inline(always)]
    pub fn index(&self) -> usize {
        self.index
    }
    /// Returns the number of dimensions left below this node; 0 for leaves.
    #[inline(always)]
    pub fn depth(&self) -> usize {
        self.depth
    }
    /// Returns the key of the parent node, or `None` for the root.
    #[inline(always)]
    pub fn parent(&self) -> Option<&K> {
        self.parent.as_ref()
    }
    /// Returns `true` if the node sits at depth 0 and holds a value, `false` otherwise.
    #[inline(always)]
    pub fn is_leaf(&self) -> bool {
        matches!(self.data, NodeData::Leaf(..))
    }
    /// Returns the value stored in a leaf, or `None` for branches.
    #[inline]
    pub fn value(&self) -> Option<&T> {
        match &self.data {
            NodeData::Leaf(x) => Some(x),
            NodeData::Branch(..) => None,
        }
    }
    #[inline]
    pub(crate) fn value_mut(&mut self) -> Option<&mut T> {
        match &mut self.data {
            NodeData::Leaf(x) => Some(x),
            NodeData::Branch(..) => None,
        }
    }
    /// Returns the ordered map from index to child key, or `None` for leaves.
    #[inline]
    pub fn children(&self) -> Option<&BTreeMap<usize, K>> {
        match &self.data {
            NodeData::Branch(x) => Some(x),
            NodeData::Leaf(..) => None,
        }
    }
    #[inline]
    pub(crate) fn children_mut(&mut self) -> Option<&mut BTreeMap<usize, K>> {
        match &mut self.data {
            NodeData::Branch(x) => Some(x),
            NodeData::Leaf(..) => None,
        }
    }
    #[inline]
    pub(crate) fn into_value(self) -> Option<T> {
        match self.data {
            NodeData::Leaf(x) => Some(x),
            NodeData::Branch(..) => None,
        }
    }
}

/// Looks up the node under the specified key, panicking if the tree refers to a key which its storage does not have.
#[track_caller]
pub(crate) fn node_at<'a, T, K, S>(storage: &'a S, key: &K) -> &'a Node<T, K>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    storage
        .get(key)
        .unwrap_or_else(|| panic!("invalid node key: {:?}", key))
}
/// Mutable version of `node_at`.
#[track_caller]
pub(crate) fn node_at_mut<'a, T, K, S>(storage: &'a mut S, key: &K) -> &'a mut Node<T, K>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    storage
        .get_mut(key)
        .unwrap_or_else(|| panic!("invalid node key: {:?}", key))
}

/// Adds a default-constructed child under `parent` at `index` and links it into the parent's children, returning its key.
///
/// The caller must have checked that the parent does not have a child at that index yet; existing children are never overwritten.
#[track_caller]
pub(crate) fn insert_child<T, K, S>(
    storage: &mut S,
    parent: &K,
    index: usize,
    leaf_value: impl FnOnce() -> T,
) -> K
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    let parent_depth = node_at(storage, parent).depth;
    let key = storage.add(Node::child(index, parent.clone(), parent_depth, leaf_value));
    let children = node_at_mut(storage, parent)
        .children_mut()
        .unwrap_or_else(|| panic!("tried to insert a child into leaf {:?}", parent));
    debug_assert!(
        !children.contains_key(&index),
        "index {} is already occupied under node {:?}",
        index,
        parent,
    );
    children.insert(index, key.clone());
    key
}

/// Unlinks the specified non-root node from its parent and removes it together with its whole subtree. Ancestors left without children are pruned as well, stopping at the root.
///
/// Returns the value if the removed node was a leaf, or `None` if it was a branch or the root (which is never removed).
#[track_caller]
pub(crate) fn remove_subtree<T, K, S>(storage: &mut S, key: &K) -> Option<T>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    let (index, parent) = {
        let node = node_at(storage, key);
        (node.index, node.parent.clone()?)
    };
    unlink(storage, &parent, index);
    let value = drop_subtree(storage, key);

    let mut current = parent;
    loop {
        let node = node_at(storage, &current);
        let grandparent = match (&node.parent, node.children()) {
            (Some(grandparent), Some(children)) if children.is_empty() => grandparent.clone(),
            _ => break,
        };
        let index = node.index;
        unlink(storage, &grandparent, index);
        storage.remove(&current);
        current = grandparent;
    }
    check_path(storage, &current);
    value
}

/// Checks the links on the path from the specified node up to the root in debug builds: every node must sit in its parent's children under its own index, one level below it, and no branch other than the root may be empty.
#[track_caller]
pub(crate) fn check_path<T, K, S>(storage: &S, key: &K)
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    if !cfg!(debug_assertions) {
        return;
    }
    let mut current = key.clone();
    loop {
        let node = node_at(storage, &current);
        let parent_key = match &node.parent {
            Some(parent) => parent.clone(),
            None => break,
        };
        debug_assert!(
            node.children().map_or(true, |children| !children.is_empty()),
            "branch {:?} was left without children",
            current,
        );
        let parent = node_at(storage, &parent_key);
        debug_assert_eq!(
            parent.children().and_then(|children| children.get(&node.index)),
            Some(&current),
            "node {:?} is not linked from its parent {:?} under index {}",
            current,
            parent_key,
            node.index,
        );
        debug_assert_eq!(
            node.depth + 1,
            parent.depth,
            "node {:?} does not sit one level below its parent",
            current,
        );
        current = parent_key;
    }
}

#[track_caller]
fn unlink<T, K, S>(storage: &mut S, parent: &K, index: usize)
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    let removed = node_at_mut(storage, parent)
        .children_mut()
        .and_then(|children| children.remove(&index));
    debug_assert!(
        removed.is_some(),
        "node {:?} did not have a child at index {}",
        parent,
        index,
    );
}

/// Removes a node and all of its descendants from the storage without touching its parent.
fn drop_subtree<T, K, S>(storage: &mut S, key: &K) -> Option<T>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    let node = storage.remove(key);
    let mut stack: Vec<K> = match &node.data {
        NodeData::Branch(children) => children.values().cloned().collect(),
        NodeData::Leaf(..) => Vec::new(),
    };
    while let Some(key) = stack.pop() {
        if let NodeData::Branch(children) = storage.remove(&key).data {
            stack.extend(children.into_values());
        }
    }
    node.into_value()
}

impl<T> MoveFix for Node<T, usize> {
    fn fix_move(storage: &mut SparseVec<Self>, previous_index: usize, current_index: usize) {
        let (index, parent, children) = {
            let node = node_at(storage, &current_index);
            let children: Vec<usize> = node
                .children()
                .map(|x| x.values().copied().collect())
                .unwrap_or_default();
            (node.index, node.parent, children)
        };
        for child in children {
            node_at_mut(storage, &child).parent = Some(current_index);
        }
        if let Some(parent) = parent {
            if let Some(slot) = node_at_mut(storage, &parent)
                .children_mut()
                .and_then(|x| x.get_mut(&index))
            {
                debug_assert_eq!(*slot, previous_index, "parent pointed at a different node");
                *slot = current_index;
            }
        }
    }
}
