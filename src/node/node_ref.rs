use core::{fmt::{self, Debug, Formatter}, marker::PhantomData, ops::Bound};
use arrayvec::ArrayVec;
use crate::storage::{Storage, DefaultStorage};
use super::{Node, node_at};

/// A reference to a node in a matrix tree.
///
/// Since this type does not point to the node directly, but rather the storage the node is in and the key of the node in the storage, it can be used to traverse the tree in every direction.
pub struct NodeRef<'a, T, K = usize, S = DefaultStorage<Node<T, K>>>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    storage: &'a S,
    key: K,
    _marker: PhantomData<&'a Node<T, K>>,
}
impl<'a, T, K, S> NodeRef<'a, T, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    /// Creates a new `NodeRef` pointing to the specified key in the storage, or `None` if there is no such key.
    pub fn new_raw(storage: &'a S, key: K) -> Option<Self> {
        if storage.contains_key(&key) {
            Some(Self::new_trusted(storage, key))
        } else {
            None
        }
    }
    /// Creates a `NodeRef` to a key which the tree itself handed out.
    #[inline(always)]
    pub(crate) fn new_trusted(storage: &'a S, key: K) -> Self {
        debug_assert!(
            storage.contains_key(&key),
            "debug key check failed: tried to reference key {:?} which is not present in the storage",
            &key,
        );
        Self {
            storage,
            key,
            _marker: PhantomData,
        }
    }
    /// Returns a reference the raw storage key for the node.
    pub fn raw_key(&self) -> &K {
        &self.key
    }
    /// Consumes the reference and returns the underlying raw storage key for the node.
    pub fn into_raw_key(self) -> K {
        self.key
    }
    /// Returns the node itself.
    #[track_caller]
    pub fn node(&self) -> &'a Node<T, K> {
        node_at(self.storage, &self.key)
    }

    /// Returns the index the node occupies in its parent's children.
    pub fn index(&self) -> usize {
        self.node().index
    }
    /// Returns the number of dimensions left below the node.
    pub fn depth(&self) -> usize {
        self.node().depth
    }
    /// Returns `true` if the node is the root node, `false` otherwise.
    pub fn is_root(&self) -> bool {
        self.node().parent.is_none()
    }
    /// Returns `true` if the node is a leaf, i.e. sits at depth 0.
    pub fn is_leaf(&self) -> bool {
        self.node().is_leaf()
    }
    /// Returns the stored value if the node is a leaf.
    pub fn value(&self) -> Option<&'a T> {
        self.node().value()
    }
    /// Returns a reference to the parent node of the pointee, or `None` if it's the root node.
    pub fn parent(&self) -> Option<Self> {
        self.node()
            .parent
            .clone()
            .map(|key| Self::new_trusted(self.storage, key))
    }
    /// Looks up the child at the specified index. Absence means that the entire subtree under that index is unset.
    pub fn child(&self, index: usize) -> Option<Self> {
        self.node()
            .children()?
            .get(&index)
            .map(|key| Self::new_trusted(self.storage, key.clone()))
    }
    /// Returns the child with the smallest index, or `None` if there are no children.
    pub fn first_child(&self) -> Option<Self> {
        self.node()
            .children()?
            .values()
            .next()
            .map(|key| Self::new_trusted(self.storage, key.clone()))
    }
    /// Returns the child with the largest index, or `None` if there are no children.
    pub fn last_child(&self) -> Option<Self> {
        self.node()
            .children()?
            .values()
            .next_back()
            .map(|key| Self::new_trusted(self.storage, key.clone()))
    }
    /// Returns the number of leaves in the subtree of the node. A leaf always reports 1.
    pub fn size(&self) -> usize {
        match self.node().children() {
            Some(children) => children
                .values()
                .map(|key| Self::new_trusted(self.storage, key.clone()).size())
                .sum(),
            None => 1,
        }
    }

    /// Walks down the smallest indices to the first node at the specified depth, skipping subtrees which do not reach that deep.
    pub fn first_descendant_at_depth(&self, depth: usize) -> Option<Self> {
        let node = self.node();
        if node.depth == depth {
            return Some(self.clone());
        }
        node.children()?
            .values()
            .find_map(|key| Self::new_trusted(self.storage, key.clone()).first_descendant_at_depth(depth))
    }
    /// Walks down the largest indices to the last node at the specified depth, skipping subtrees which do not reach that deep.
    pub fn last_descendant_at_depth(&self, depth: usize) -> Option<Self> {
        let node = self.node();
        if node.depth == depth {
            return Some(self.clone());
        }
        node.children()?
            .values()
            .rev()
            .find_map(|key| Self::new_trusted(self.storage, key.clone()).last_descendant_at_depth(depth))
    }
    /// Returns the first leaf of the subtree, which is where forward iteration starts.
    pub fn first_leaf(&self) -> Option<Self> {
        self.first_descendant_at_depth(0)
    }
    /// Returns the last leaf of the subtree, which is where backward iteration starts.
    pub fn last_leaf(&self) -> Option<Self> {
        self.last_descendant_at_depth(0)
    }

    /// Returns the next node at the same depth in depth-first, ascending-index order across the whole tree, or `None` if this is the last one.
    pub fn successor(&self) -> Option<Self> {
        self.successor_within(None)
    }
    /// Returns the previous node at the same depth in depth-first, ascending-index order across the whole tree, or `None` if this is the first one.
    pub fn predecessor(&self) -> Option<Self> {
        self.predecessor_within(None)
    }
    /// Same as `successor`, but never leaves the subtree of `scope`.
    ///
    /// Climbs towards the root until an ancestor has a later sibling with a subtree deep enough to descend back into. Ancestors whose remaining children are all empty are climbed over.
    pub fn successor_within(&self, scope: Option<&K>) -> Option<Self> {
        let depth = self.depth();
        let mut current = self.clone();
        loop {
            if scope == Some(&current.key) {
                return None;
            }
            let parent = current.parent()?;
            let index = current.index();
            let found = parent
                .node()
                .children()
                .into_iter()
                .flat_map(|children| children.range((Bound::Excluded(index), Bound::Unbounded)))
                .find_map(|(_, key)| {
                    Self::new_trusted(self.storage, key.clone()).first_descendant_at_depth(depth)
                });
            if found.is_some() {
                return found;
            }
            current = parent;
        }
    }
    /// Same as `predecessor`, but never leaves the subtree of `scope`.
    pub fn predecessor_within(&self, scope: Option<&K>) -> Option<Self> {
        let depth = self.depth();
        let mut current = self.clone();
        loop {
            if scope == Some(&current.key) {
                return None;
            }
            let parent = current.parent()?;
            let index = current.index();
            let found = parent
                .node()
                .children()
                .into_iter()
                .flat_map(|children| children.range(..index).rev())
                .find_map(|(_, key)| {
                    Self::new_trusted(self.storage, key.clone()).last_descendant_at_depth(depth)
                });
            if found.is_some() {
                return found;
            }
            current = parent;
        }
    }

    /// Collects the indices on the path from the root down to this node, outermost first.
    ///
    /// # Panics
    /// Panics if the node is more than `D` levels below the root.
    #[track_caller]
    pub fn path<const D: usize>(&self) -> ArrayVec<usize, D> {
        let mut path = ArrayVec::new();
        let mut current = self.clone();
        while let Some(parent) = current.parent() {
            if path.try_push(current.index()).is_err() {
                panic!("node {:?} is more than {} levels below the root", self.key, D);
            }
            current = parent;
        }
        path.reverse();
        path
    }
    /// Reconstructs the full coordinates of a leaf of a `D`-dimensional tree.
    ///
    /// # Panics
    /// Panics if the node is not exactly `D` levels below the root.
    #[track_caller]
    pub fn coords<const D: usize>(&self) -> [usize; D] {
        self.path::<D>().into_inner().unwrap_or_else(|path| {
            panic!(
                "node {:?} is {} levels below the root, expected {}",
                self.key,
                path.len(),
                D,
            )
        })
    }
}
impl<T, K, S> Copy for NodeRef<'_, T, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Copy + Debug + Eq,
{
}
impl<T, K, S> Clone for NodeRef<'_, T, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    fn clone(&self) -> Self {
        Self {
            storage: self.storage,
            key: self.key.clone(),
            _marker: PhantomData,
        }
    }
}
impl<T, K, S> Debug for NodeRef<'_, T, K, S>
where
    T: Debug,
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("key", &self.key)
            .field("node", self.node())
            .finish()
    }
}
impl<T, K, S> PartialEq for NodeRef<'_, T, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    /// Two references are equal if they point at the same node of the same storage.
    fn eq(&self, other: &Self) -> bool {
        core::ptr::eq(self.storage, other.storage) && self.key == other.key
    }
}
impl<T, K, S> Eq for NodeRef<'_, T, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
}
