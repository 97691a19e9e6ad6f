//! Sparse `D`-dimensional matrices, addressed by `D` non-negative indices.
//!
//! Every cell which was never assigned, or was assigned the default value, holds the default value implicitly and costs no memory. Only cells with other values are stored, as the leaves of an arena-allocated [index tree].
//!
//! # Example
//! ```rust
//! use sparse_tree_matrix::Matrix;
//!
//! // A 2-dimensional matrix of i32 in which every cell defaults to -1.
//! let mut matrix = Matrix::<i32, 2>::with_default(-1);
//! assert_eq!(matrix[[100, 100]], -1);
//! assert_eq!(matrix.size(), 0);
//!
//! // Handles walk one dimension at a time and assign at the end. Assignments chain.
//! matrix.at(100).cell(100).set(2).set(4).set(8);
//! assert_eq!(matrix[[100, 100]], 8);
//! assert_eq!(matrix.size(), 1);
//!
//! // Writing the default value back removes the cell.
//! matrix.set([100, 100], -1);
//! assert_eq!(matrix.size(), 0);
//! assert!(matrix.iter().next().is_none());
//! ```
//!
//! [index tree]: ../node/index.html " "

use core::{
    fmt::{self, Formatter, Debug},
    mem,
    ops::Index,
};
use arrayvec::ArrayVec;
use crate::{
    storage::{Storage, DefaultStorage, SparseVec},
    node::{self, Node, NodeRef, node_at, node_at_mut},
    iter::{Iter, Keys, Values, CursorMut},
    error::{DimensionMismatchError, check_dimensions},
};

mod view;
mod cell;
pub use view::View;
pub use cell::Cell;


/// A sparse matrix with `D` dimensions.
///
/// See the [module-level documentation] for more.
///
/// Cloning a matrix, or calling [`snapshot`], creates a deep copy which shares nothing with the original. Handles obtained with [`at`], [`cell`] and [`cell_at`] are live views borrowing the matrix.
///
/// [module-level documentation]: index.html " "
/// [`snapshot`]: #method.snapshot " "
/// [`at`]: #method.at " "
/// [`cell`]: #method.cell " "
/// [`cell_at`]: #method.cell_at " "
#[derive(Clone)]
pub struct Matrix<T, const D: usize, K = usize, S = DefaultStorage<Node<T, K>>>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    storage: S,
    root: K,
    default: T,
}
impl<T, const D: usize, K, S> Matrix<T, D, K, S>
where
    T: Clone + PartialEq,
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    /// Creates an empty matrix in which every cell holds `T::default()`.
    ///
    /// # Example
    /// ```rust
    /// # use sparse_tree_matrix::Matrix;
    /// // The turbofish is needed to state the number of dimensions.
    /// let matrix = Matrix::<u8, 3>::new();
    /// assert_eq!(matrix[[1, 2, 3]], 0);
    /// assert!(matrix.is_empty());
    /// ```
    #[inline(always)]
    pub fn new() -> Self
    where T: Default {
        Self::with_default(T::default())
    }
    /// Creates an empty matrix in which every cell holds the specified default value.
    #[inline(always)]
    pub fn with_default(default: T) -> Self {
        Self::with_capacity(0, default)
    }
    /// Creates an empty matrix with the specified capacity for the storage. Every stored cell takes up `D` nodes at most.
    pub fn with_capacity(capacity: usize, default: T) -> Self {
        let mut storage = S::with_capacity(capacity);
        let root = storage.add(Node::root(D, || default.clone()));
        Self {
            storage,
            root,
            default,
        }
    }

    /// Returns the value which every unset cell holds.
    #[inline(always)]
    pub fn default_value(&self) -> &T {
        &self.default
    }
    /// Returns the number of indices needed to address a cell.
    #[inline(always)]
    pub const fn dimensions(&self) -> usize {
        D
    }
    /// Returns a reference to the root node of the index tree.
    #[inline(always)]
    pub fn root(&self) -> NodeRef<'_, T, K, S> {
        NodeRef::new_trusted(&self.storage, self.root.clone())
    }
    /// Returns the backing storage of the index tree.
    #[inline(always)]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Returns a handle to the whole matrix, which can be indexed one dimension at a time.
    ///
    /// # Panics
    /// Zero-dimensional matrices have no dimensions to index; use [`cell_at`] with an empty array instead.
    ///
    /// [`cell_at`]: #method.cell_at " "
    #[track_caller]
    pub fn view(&mut self) -> View<'_, T, D, K, S> {
        assert!(D > 0, "zero-dimensional matrices cannot be indexed, use `cell_at([])`");
        let root = self.root.clone();
        View::new(self, root, ArrayVec::new(), D)
    }
    /// Indexes the outermost dimension, returning a handle to the `D - 1`-dimensional slice at `index`.
    ///
    /// Nothing is allocated until a value is assigned through a cell of the returned handle.
    ///
    /// # Panics
    /// Panics if the matrix has less than 2 dimensions; one-dimensional matrices are indexed with [`cell`].
    ///
    /// [`cell`]: #method.cell " "
    #[inline]
    #[track_caller]
    pub fn at(&mut self, index: usize) -> View<'_, T, D, K, S> {
        self.view().at(index)
    }
    /// Returns the cell at `index` of a one-dimensional matrix.
    ///
    /// # Panics
    /// Panics if the matrix does not have exactly one dimension.
    #[inline]
    #[track_caller]
    pub fn cell(&mut self, index: usize) -> Cell<'_, T, D, K, S> {
        self.view().cell(index)
    }
    /// Returns the cell at the specified coordinates, which works for any number of dimensions.
    ///
    /// # Example
    /// ```rust
    /// # use sparse_tree_matrix::Matrix;
    /// let mut matrix = Matrix::<i64, 3>::new();
    /// let mut cell = matrix.cell_at([4, 8, 15]);
    /// assert_eq!(*cell.get(), 0);
    /// assert!(!cell.is_materialized());
    /// cell.set(16);
    /// assert!(cell.is_materialized());
    /// drop(cell);
    /// assert_eq!(matrix[[4, 8, 15]], 16);
    /// ```
    pub fn cell_at(&mut self, coords: [usize; D]) -> Cell<'_, T, D, K, S> {
        let mut anchor = self.root.clone();
        let mut pending = ArrayVec::new();
        for &index in &coords {
            anchor = self.step(&anchor, &mut pending, index);
        }
        Cell::new(self, anchor, pending)
    }

    /// Returns the value at the specified coordinates, or the default value if that cell is unset.
    pub fn get(&self, coords: [usize; D]) -> &T {
        self.lookup(&coords)
            .and_then(|leaf| node_at(&self.storage, &leaf).value())
            .unwrap_or(&self.default)
    }
    /// Same as `get`, but takes the coordinates as a slice.
    ///
    /// # Errors
    /// Fails if the number of coordinates is not `D`.
    pub fn try_get(&self, coords: &[usize]) -> Result<&T, DimensionMismatchError> {
        check_dimensions(coords, D)?;
        Ok(self
            .lookup(coords)
            .and_then(|leaf| node_at(&self.storage, &leaf).value())
            .unwrap_or(&self.default))
    }
    /// Assigns a value at the specified coordinates, returning the previous value if it was not the default. Assigning the default value removes the cell.
    pub fn set(&mut self, coords: [usize; D], value: T) -> Option<T> {
        let previous = {
            let mut cell = self.cell_at(coords);
            let previous = cell.stored().cloned();
            cell.set(value);
            previous
        };
        previous.filter(|x| *x != self.default)
    }
    /// Same as `set`, but takes the coordinates as a slice.
    ///
    /// # Errors
    /// Fails if the number of coordinates is not `D`, in which case nothing is assigned.
    pub fn try_set(&mut self, coords: &[usize], value: T) -> Result<Option<T>, DimensionMismatchError> {
        let coords = <[usize; D]>::try_from(coords).map_err(|_| DimensionMismatchError {
            expected: D,
            found: coords.len(),
        })?;
        Ok(self.set(coords, value))
    }
    /// Resets the cell at the specified coordinates to the default value, returning the previous value if it was not the default.
    pub fn remove(&mut self, coords: [usize; D]) -> Option<T> {
        let leaf = self.lookup(&coords)?;
        self.remove_leaf(&leaf)
    }
    /// Returns `true` if the cell at the specified coordinates holds a value other than the default.
    pub fn contains(&self, coords: [usize; D]) -> bool {
        self.lookup(&coords)
            .and_then(|leaf| node_at(&self.storage, &leaf).value())
            .map_or(false, |x| *x != self.default)
    }

    /// Returns the number of cells which hold a value other than the default.
    pub fn size(&self) -> usize {
        if D == 0 {
            usize::from(*self.root_value() != self.default)
        } else {
            self.root().size()
        }
    }
    /// Same as [`size`].
    ///
    /// [`size`]: #method.size " "
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.size()
    }
    /// Returns `true` if every cell holds the default value.
    pub fn is_empty(&self) -> bool {
        match node_at(&self.storage, &self.root).children() {
            Some(children) => children.is_empty(),
            None => *self.root_value() == self.default,
        }
    }
    /// Resets every cell to the default value, deallocating the whole tree except for the root.
    pub fn clear(&mut self) {
        let default = self.default.clone();
        self.storage = S::new();
        self.root = self.storage.add(Node::root(D, || default));
    }

    /// Returns an iterator over the coordinates and values of the cells which hold a value other than the default, in ascending order of coordinates.
    ///
    /// # Example
    /// ```rust
    /// # use sparse_tree_matrix::Matrix;
    /// let mut matrix = Matrix::<i32, 2>::new();
    /// matrix.set([3, 1], 31);
    /// matrix.set([0, 7], 7);
    /// matrix.set([3, 0], 30);
    /// let cells: Vec<_> = matrix.iter().map(|(coords, &value)| (coords, value)).collect();
    /// assert_eq!(cells, [([0, 7], 7), ([3, 0], 30), ([3, 1], 31)]);
    /// // Iteration can go both ways:
    /// assert_eq!(matrix.iter().next_back(), Some(([3, 1], &31)));
    /// ```
    pub fn iter(&self) -> Iter<'_, T, D, K, S> {
        if self.is_empty() {
            Iter::empty(&self.storage, self.root.clone())
        } else {
            Iter::new(&self.storage, self.root.clone())
        }
    }
    /// Returns an iterator over the coordinates of the cells which hold a value other than the default.
    #[inline]
    pub fn keys(&self) -> Keys<'_, T, D, K, S> {
        Keys::new(self.iter())
    }
    /// Returns an iterator over the values of the cells which hold a value other than the default.
    #[inline]
    pub fn values(&self) -> Values<'_, T, D, K, S> {
        Values::new(self.iter())
    }
    /// Returns the first cell in iteration order.
    #[inline]
    pub fn first(&self) -> Option<([usize; D], &T)> {
        self.iter().next()
    }
    /// Returns the last cell in iteration order.
    #[inline]
    pub fn last(&self) -> Option<([usize; D], &T)> {
        self.iter().next_back()
    }
    /// Returns a cursor over the stored cells which can rewrite values as it goes. Cells rewritten to the default value are removed when the cursor leaves them.
    #[inline]
    pub fn cursor_mut(&mut self) -> CursorMut<'_, T, D, K, S> {
        CursorMut::new(self)
    }
    /// Creates a deep copy of the matrix, detached from the original.
    #[inline(always)]
    pub fn snapshot(&self) -> Self
    where S: Clone {
        self.clone()
    }

    /// Moves one index down from `anchor`, the deepest existing node of a handle. Indices which do not exist yet are queued in `pending` instead of being created.
    pub(crate) fn step(&self, anchor: &K, pending: &mut ArrayVec<usize, D>, index: usize) -> K {
        if pending.is_empty() {
            if let Some(child) = NodeRef::new_trusted(&self.storage, anchor.clone()).child(index) {
                return child.into_raw_key();
            }
        }
        pending.push(index);
        anchor.clone()
    }
    /// Creates the queued chain of nodes under `anchor`, returning the key of the leaf at its end. The leaf holds the default value.
    pub(crate) fn materialize(&mut self, anchor: &K, pending: &[usize]) -> K {
        let mut current = anchor.clone();
        for &index in pending {
            current = node::insert_child(&mut self.storage, &current, index, || self.default.clone());
        }
        debug_assert!(
            node_at(&self.storage, &current).is_leaf(),
            "materialized a path which did not end with a leaf",
        );
        node::check_path(&self.storage, &current);
        current
    }
    /// Removes the leaf if it holds the default value, pruning the branches left empty. Returns `true` if the leaf got removed. The root is never removed.
    pub(crate) fn vacuum(&mut self, leaf: &K) -> bool {
        let node = node_at(&self.storage, leaf);
        if node.parent.is_none() || node.value() != Some(&self.default) {
            return false;
        }
        node::remove_subtree(&mut self.storage, leaf);
        true
    }
    /// Returns the key of the leaf at the specified coordinates, if one exists.
    pub(crate) fn lookup(&self, coords: &[usize]) -> Option<K> {
        coords
            .iter()
            .try_fold(self.root(), |node, &index| node.child(index))
            .map(NodeRef::into_raw_key)
    }
    /// Returns the key of the first stored cell.
    pub(crate) fn first_key(&self) -> Option<K> {
        if self.is_empty() {
            None
        } else {
            self.root().first_leaf().map(NodeRef::into_raw_key)
        }
    }
    /// Returns the key of the last stored cell.
    pub(crate) fn last_key(&self) -> Option<K> {
        if self.is_empty() {
            None
        } else {
            self.root().last_leaf().map(NodeRef::into_raw_key)
        }
    }
    #[track_caller]
    pub(crate) fn leaf_value(&self, leaf: &K) -> &T {
        node_at(&self.storage, leaf)
            .value()
            .unwrap_or_else(|| panic!("node {:?} is not a leaf", leaf))
    }
    #[track_caller]
    pub(crate) fn leaf_value_mut(&mut self, leaf: &K) -> &mut T {
        node_at_mut(&mut self.storage, leaf)
            .value_mut()
            .unwrap_or_else(|| panic!("node {:?} is not a leaf", leaf))
    }
    pub(crate) fn root_value(&self) -> &T {
        node_at(&self.storage, &self.root).value().unwrap_or(&self.default)
    }
    /// Resets the leaf to the default value, removing it from the tree unless it is the root. Returns the previous value if it was not the default.
    pub(crate) fn remove_leaf(&mut self, leaf: &K) -> Option<T> {
        let previous = if node_at(&self.storage, leaf).parent.is_none() {
            let default = self.default.clone();
            Some(mem::replace(self.leaf_value_mut(leaf), default))
        } else {
            node::remove_subtree(&mut self.storage, leaf)
        };
        previous.filter(|x| *x != self.default)
    }
}

impl<T, const D: usize> Matrix<T, D, usize, SparseVec<Node<T, usize>>>
where
    T: Clone + PartialEq,
{
    /// Removes all holes which removed nodes left in the storage, fixing the links between the nodes.
    ///
    /// # Example
    /// ```rust
    /// # use sparse_tree_matrix::Matrix;
    /// let mut matrix = Matrix::<u32, 2>::new();
    /// for i in 0..8 {
    ///     matrix.set([i, i], 1);
    /// }
    /// for i in 0..4 {
    ///     matrix.remove([i, i]);
    /// }
    /// // Every removed cell took its leaf and its branch with it:
    /// assert_eq!(matrix.num_holes(), 8);
    /// matrix.defragment();
    /// assert!(matrix.is_dense());
    /// assert_eq!(matrix.size(), 4);
    /// assert_eq!(matrix[[6, 6]], 1);
    /// ```
    pub fn defragment(&mut self) {
        let root = &mut self.root;
        self.storage.defragment_with(|storage, previous, current| {
            <Node<T, usize> as crate::storage::MoveFix>::fix_move(storage, previous, current);
            if *root == previous {
                *root = current;
            }
        });
    }
    /// Returns the number of holes in the storage.
    #[inline(always)]
    pub fn num_holes(&self) -> usize {
        self.storage.num_holes()
    }
    /// Returns `true` if there are no holes in the storage, `false` otherwise.
    #[inline(always)]
    pub fn is_dense(&self) -> bool {
        self.storage.is_dense()
    }
}

impl<T, K, S> Matrix<T, 0, K, S>
where
    T: Clone + PartialEq,
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    /// Creates a zero-dimensional matrix holding the specified value, with `T::default()` as its default value.
    ///
    /// # Example
    /// ```rust
    /// # use sparse_tree_matrix::Matrix;
    /// let scalar = Matrix::<i32, 0>::from_value(9);
    /// assert_eq!(scalar, 9);
    /// assert_eq!(scalar.size(), 1);
    /// ```
    pub fn from_value(value: T) -> Self
    where T: Default {
        let mut matrix = Self::new();
        matrix.set_value(value);
        matrix
    }
    /// Returns the single value of the matrix.
    #[inline(always)]
    pub fn value(&self) -> &T {
        self.root_value()
    }
    /// Replaces the single value of the matrix, returning the previous one.
    pub fn set_value(&mut self, value: T) -> T {
        let root = self.root.clone();
        mem::replace(self.leaf_value_mut(&root), value)
    }
}
impl<T, K, S> PartialEq<T> for Matrix<T, 0, K, S>
where
    T: Clone + PartialEq,
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    fn eq(&self, other: &T) -> bool {
        self.value() == other
    }
}
impl<T, K, S> From<T> for Matrix<T, 0, K, S>
where
    T: Clone + PartialEq + Default,
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    #[inline(always)]
    fn from(value: T) -> Self {
        Self::from_value(value)
    }
}

impl<T, const D: usize, K, S> PartialEq for Matrix<T, D, K, S>
where
    T: Clone + PartialEq,
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    /// Two matrices are equal if every cell resolves to the same value in both, defaults included.
    fn eq(&self, other: &Self) -> bool {
        if D == 0 {
            return self.root_value() == other.root_value();
        }
        self.default == other.default && self.iter().eq(other.iter())
    }
}
impl<T, const D: usize, K, S> Eq for Matrix<T, D, K, S>
where
    T: Clone + Eq,
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
}
impl<T, const D: usize, K, S> Default for Matrix<T, D, K, S>
where
    T: Clone + PartialEq + Default,
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}
impl<T, const D: usize, K, S> Debug for Matrix<T, D, K, S>
where
    T: Clone + PartialEq + Debug,
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Matrix")
            .field("default", &self.default)
            .field("cells", &self.iter())
            .finish()
    }
}
impl<T, const D: usize, K, S> Index<[usize; D]> for Matrix<T, D, K, S>
where
    T: Clone + PartialEq,
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    type Output = T;
    #[inline(always)]
    fn index(&self, coords: [usize; D]) -> &T {
        self.get(coords)
    }
}
impl<'a, T, const D: usize, K, S> IntoIterator for &'a Matrix<T, D, K, S>
where
    T: Clone + PartialEq,
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    type Item = ([usize; D], &'a T);
    type IntoIter = Iter<'a, T, D, K, S>;
    #[inline(always)]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
impl<T, const D: usize, K, S> Extend<([usize; D], T)> for Matrix<T, D, K, S>
where
    T: Clone + PartialEq,
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    fn extend<I: IntoIterator<Item = ([usize; D], T)>>(&mut self, iter: I) {
        for (coords, value) in iter {
            self.set(coords, value);
        }
    }
}
impl<T, const D: usize, K, S> FromIterator<([usize; D], T)> for Matrix<T, D, K, S>
where
    T: Clone + PartialEq + Default,
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    fn from_iter<I: IntoIterator<Item = ([usize; D], T)>>(iter: I) -> Self {
        let mut matrix = Self::new();
        matrix.extend(iter);
        matrix
    }
}
