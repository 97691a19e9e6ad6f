use core::fmt::{self, Formatter, Debug};
use arrayvec::ArrayVec;
use crate::{
    storage::{Storage, DefaultStorage},
    node::{Node, NodeRef},
};
use super::Matrix;

/// A handle to a single cell of a matrix.
///
/// A cell starts out either *materialized*, if a leaf for it already exists in the tree, or *unmaterialized*, carrying only the path to the place where its leaf would go. The first [`set`] on an unmaterialized cell creates the leaf along with every missing branch above it; there is no way back to the unmaterialized state.
///
/// When the cell is dropped or [`commit`]ted, a leaf holding the default value is removed from the tree together with the branches it leaves empty. This is what keeps the size of a matrix equal to the number of cells holding something other than the default.
///
/// # Example
/// ```rust
/// # use sparse_tree_matrix::Matrix;
/// let mut matrix = Matrix::<i32, 1>::new();
/// matrix.cell(1).set(5);
/// matrix.cell(3).set(7).set(0);
/// assert_eq!(matrix.size(), 1);
/// assert_eq!(matrix.cell(1), 5);
/// assert_eq!(matrix.cell(3), 0);
/// ```
///
/// [`set`]: #method.set " "
/// [`commit`]: #method.commit " "
pub struct Cell<'a, T, const D: usize, K = usize, S = DefaultStorage<Node<T, K>>>
where
    T: Clone + PartialEq,
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    matrix: &'a mut Matrix<T, D, K, S>,
    /// The deepest existing node on the path, which is the leaf itself once materialized.
    anchor: K,
    pending: ArrayVec<usize, D>,
    leaf: Option<K>,
}
impl<'a, T, const D: usize, K, S> Cell<'a, T, D, K, S>
where
    T: Clone + PartialEq,
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    pub(crate) fn new(
        matrix: &'a mut Matrix<T, D, K, S>,
        anchor: K,
        pending: ArrayVec<usize, D>,
    ) -> Self {
        let leaf = if pending.is_empty() {
            debug_assert!(
                NodeRef::new_trusted(matrix.storage(), anchor.clone()).is_leaf(),
                "a cell without pending indices must sit on a leaf",
            );
            Some(anchor.clone())
        } else {
            None
        };
        Self {
            matrix,
            anchor,
            pending,
            leaf,
        }
    }

    /// Returns the value of the cell, or the default value if the cell is not materialized.
    pub fn get(&self) -> &T {
        self.stored().unwrap_or_else(|| self.matrix.default_value())
    }
    /// Returns the value stored in the leaf, or `None` if the cell is not materialized.
    pub fn stored(&self) -> Option<&T> {
        self.leaf.as_ref().map(|leaf| self.matrix.leaf_value(leaf))
    }
    /// Assigns a value to the cell, materializing it if needed. Returns the cell again so that assignments can be chained.
    pub fn set(&mut self, value: T) -> &mut Self {
        let leaf = match &self.leaf {
            Some(leaf) => leaf.clone(),
            None => {
                let leaf = self.matrix.materialize(&self.anchor, &self.pending);
                self.pending.clear();
                self.anchor = leaf.clone();
                self.leaf = Some(leaf.clone());
                leaf
            }
        };
        *self.matrix.leaf_value_mut(&leaf) = value;
        self
    }
    /// Returns `true` if a leaf for the cell exists in the tree.
    #[inline(always)]
    pub fn is_materialized(&self) -> bool {
        self.leaf.is_some()
    }
    /// Returns the coordinates of the cell in the matrix.
    #[track_caller]
    pub fn coords(&self) -> [usize; D] {
        let mut path = NodeRef::new_trusted(self.matrix.storage(), self.anchor.clone()).path::<D>();
        path.extend(self.pending.iter().copied());
        path.into_inner()
            .unwrap_or_else(|path| panic!("cell path {:?} is not {} indices long", path.as_slice(), D))
    }
    /// Finishes working with the cell, removing it from the tree if it holds the default value. Returns `true` if the cell holds a value other than the default.
    ///
    /// Dropping the cell does the same, this is only needed to learn the outcome.
    #[inline]
    pub fn commit(mut self) -> bool {
        self.settle()
    }

    fn settle(&mut self) -> bool {
        let leaf = match &self.leaf {
            Some(leaf) => leaf.clone(),
            None => return false,
        };
        if self.matrix.leaf_value(&leaf) != self.matrix.default_value() {
            return true;
        }
        if self.matrix.vacuum(&leaf) {
            self.leaf = None;
        }
        false
    }
}
impl<T, const D: usize, K, S> Drop for Cell<'_, T, D, K, S>
where
    T: Clone + PartialEq,
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    fn drop(&mut self) {
        self.settle();
    }
}
impl<T, const D: usize, K, S> PartialEq<T> for Cell<'_, T, D, K, S>
where
    T: Clone + PartialEq,
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    fn eq(&self, other: &T) -> bool {
        self.get() == other
    }
}
impl<'b, T, const D: usize, const E: usize, K, S, L, R> PartialEq<Cell<'b, T, E, L, R>>
    for Cell<'_, T, D, K, S>
where
    T: Clone + PartialEq,
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
    R: Storage<Element = Node<T, L>, Key = L>,
    L: Clone + Debug + Eq,
{
    /// Compares the values the cells resolve to, defaults included.
    fn eq(&self, other: &Cell<'b, T, E, L, R>) -> bool {
        self.get() == other.get()
    }
}
impl<T, const D: usize, K, S> Debug for Cell<'_, T, D, K, S>
where
    T: Clone + PartialEq + Debug,
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cell")
            .field("coords", &self.coords())
            .field("value", self.get())
            .field("materialized", &self.is_materialized())
            .finish()
    }
}
