use core::fmt::{self, Formatter, Debug};
use arrayvec::ArrayVec;
use crate::{
    storage::{Storage, DefaultStorage},
    node::{Node, NodeRef},
    iter::Iter,
    error::{DimensionMismatchError, check_dimensions},
};
use super::{Matrix, Cell};

/// A handle to a slice of a matrix with one or more dimensions left to index.
///
/// Obtained with [`Matrix::view`] or [`Matrix::at`], and consumed by indexing it further: [`at`] goes one dimension down, [`cell`] goes down the last dimension and returns the [`Cell`] there.
///
/// The view borrows the matrix mutably and keeps track of the deepest existing node on its path. Indices which lead into parts of the tree that do not exist yet are remembered instead of being allocated, so that reading through a view never changes the matrix; the missing nodes are created when a value is written through the final cell.
///
/// [`Matrix::view`]: struct.Matrix.html#method.view " "
/// [`Matrix::at`]: struct.Matrix.html#method.at " "
/// [`at`]: #method.at " "
/// [`cell`]: #method.cell " "
/// [`Cell`]: struct.Cell.html " "
pub struct View<'a, T, const D: usize, K = usize, S = DefaultStorage<Node<T, K>>>
where
    T: Clone + PartialEq,
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    matrix: &'a mut Matrix<T, D, K, S>,
    anchor: K,
    pending: ArrayVec<usize, D>,
    depth: usize,
}
impl<'a, T, const D: usize, K, S> View<'a, T, D, K, S>
where
    T: Clone + PartialEq,
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    pub(crate) fn new(
        matrix: &'a mut Matrix<T, D, K, S>,
        anchor: K,
        pending: ArrayVec<usize, D>,
        depth: usize,
    ) -> Self {
        Self {
            matrix,
            anchor,
            pending,
            depth,
        }
    }
    /// Returns the number of dimensions left to index.
    #[inline(always)]
    pub fn depth(&self) -> usize {
        self.depth
    }
    /// Returns `true` if the node addressed by the view exists in the tree. Views into parts of the tree which were never written to do not allocate anything.
    #[inline(always)]
    pub fn exists(&self) -> bool {
        self.pending.is_empty()
    }

    /// Indexes the outermost remaining dimension.
    ///
    /// # Panics
    /// Panics if only one dimension is left, which has to be indexed with [`cell`] instead.
    ///
    /// [`cell`]: #method.cell " "
    #[track_caller]
    pub fn at(mut self, index: usize) -> Self {
        assert!(
            self.depth >= 2,
            "`at` needs at least 2 dimensions left, found {}; use `cell` for the last one",
            self.depth,
        );
        self.anchor = self.matrix.step(&self.anchor, &mut self.pending, index);
        self.depth -= 1;
        self
    }
    /// Indexes the last remaining dimension, returning the cell there.
    ///
    /// # Panics
    /// Panics if more than one dimension is left.
    #[track_caller]
    pub fn cell(mut self, index: usize) -> Cell<'a, T, D, K, S> {
        assert!(
            self.depth == 1,
            "`cell` needs exactly 1 dimension left, found {}; use `at` first",
            self.depth,
        );
        let anchor = self.matrix.step(&self.anchor, &mut self.pending, index);
        Cell::new(self.matrix, anchor, self.pending)
    }

    /// Returns the value at the specified coordinates relative to the view, or the default value if that cell is unset.
    ///
    /// # Errors
    /// Fails if the number of coordinates is not equal to the number of dimensions left.
    ///
    /// # Example
    /// ```rust
    /// # use sparse_tree_matrix::Matrix;
    /// let mut matrix = Matrix::<char, 3>::with_default('.');
    /// matrix.set([1, 2, 3], '#');
    /// let view = matrix.at(1);
    /// assert_eq!(view.get(&[2, 3]), Ok(&'#'));
    /// assert_eq!(view.get(&[3, 2]), Ok(&'.'));
    /// assert!(view.get(&[2]).is_err());
    /// ```
    pub fn get(&self, coords: &[usize]) -> Result<&T, DimensionMismatchError> {
        check_dimensions(coords, self.depth)?;
        let default = self.matrix.default_value();
        if !self.exists() {
            return Ok(default);
        }
        Ok(coords
            .iter()
            .try_fold(self.anchor_ref(), |node, &index| node.child(index))
            .and_then(|leaf| leaf.value())
            .unwrap_or(default))
    }
    /// Returns the number of cells in the slice which hold a value other than the default.
    pub fn size(&self) -> usize {
        if self.exists() {
            self.anchor_ref().size()
        } else {
            0
        }
    }
    /// Returns `true` if every cell in the slice holds the default value.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }
    /// Returns an iterator over the stored cells of the slice. The coordinates yielded are those of the whole matrix, not relative to the view.
    pub fn iter(&self) -> Iter<'_, T, D, K, S> {
        let storage = self.matrix.storage();
        if self.exists() {
            Iter::new(storage, self.anchor.clone())
        } else {
            Iter::empty(storage, self.anchor.clone())
        }
    }

    fn anchor_ref(&self) -> NodeRef<'_, T, K, S> {
        NodeRef::new_trusted(self.matrix.storage(), self.anchor.clone())
    }
}
impl<T, const D: usize, K, S> Debug for View<'_, T, D, K, S>
where
    T: Clone + PartialEq,
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("View")
            .field("anchor", &self.anchor)
            .field("pending", &self.pending.as_slice())
            .field("depth", &self.depth)
            .finish()
    }
}
