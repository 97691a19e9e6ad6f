use core::{
    fmt::{self, Formatter, Debug},
    mem,
};
use crate::{
    storage::{Storage, DefaultStorage},
    node::{Node, NodeRef},
    matrix::Matrix,
};

/// A cursor over the stored cells of a matrix which can rewrite the values it passes.
///
/// The cursor sits either on a stored cell or on the "ghost" position past both ends. Moving forward from the ghost goes to the first stored cell, moving backward from it goes to the last one.
///
/// A cell rewritten to the default value stays in the tree while the cursor is on it, and is removed once the cursor moves away or is dropped.
///
/// Created by [`Matrix::cursor_mut`].
///
/// # Example
/// ```rust
/// # use sparse_tree_matrix::Matrix;
/// let mut matrix = Matrix::<i32, 2>::new();
/// matrix.extend([([0, 0], 1), ([0, 5], 2), ([4, 1], 3)]);
/// let mut cursor = matrix.cursor_mut();
/// while !cursor.is_end() {
///     let value = cursor.value_mut().unwrap();
///     *value -= 1;
///     cursor.move_next();
/// }
/// drop(cursor);
/// // The cell which became 0 is gone.
/// assert_eq!(matrix.size(), 2);
/// assert_eq!(matrix[[4, 1]], 2);
/// ```
///
/// [`Matrix::cursor_mut`]: ../matrix/struct.Matrix.html#method.cursor_mut " "
pub struct CursorMut<'a, T, const D: usize, K = usize, S = DefaultStorage<Node<T, K>>>
where
    T: Clone + PartialEq,
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    matrix: &'a mut Matrix<T, D, K, S>,
    current: Option<K>,
}
impl<'a, T, const D: usize, K, S> CursorMut<'a, T, D, K, S>
where
    T: Clone + PartialEq,
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    pub(crate) fn new(matrix: &'a mut Matrix<T, D, K, S>) -> Self {
        let current = matrix.first_key();
        Self { matrix, current }
    }
    /// Returns `true` if the cursor is on the ghost position rather than on a cell.
    #[inline(always)]
    pub fn is_end(&self) -> bool {
        self.current.is_none()
    }
    /// Returns the coordinates of the current cell.
    pub fn coords(&self) -> Option<[usize; D]> {
        let current = self.current.clone()?;
        Some(NodeRef::new_trusted(self.matrix.storage(), current).coords::<D>())
    }
    /// Returns the value of the current cell.
    pub fn value(&self) -> Option<&T> {
        let current = self.current.as_ref()?;
        Some(self.matrix.leaf_value(current))
    }
    /// Returns a mutable reference to the value of the current cell.
    pub fn value_mut(&mut self) -> Option<&mut T> {
        let current = self.current.clone()?;
        Some(self.matrix.leaf_value_mut(&current))
    }
    /// Replaces the value of the current cell, returning the previous one. Does nothing and returns `None` on the ghost position.
    pub fn replace(&mut self, value: T) -> Option<T> {
        self.value_mut().map(|x| mem::replace(x, value))
    }
    /// Removes the current cell and moves to the next one, returning the removed value if it was not the default.
    pub fn remove_current(&mut self) -> Option<T> {
        let current = self.current.clone()?;
        self.current = self.neighbor(&current, true);
        self.matrix.remove_leaf(&current)
    }
    /// Moves to the next stored cell, or to the ghost position after the last one. From the ghost position, moves to the first stored cell.
    pub fn move_next(&mut self) {
        self.current = match self.current.clone() {
            Some(current) => {
                let next = self.neighbor(&current, true);
                self.settle(&current);
                next
            }
            None => self.matrix.first_key(),
        };
    }
    /// Moves to the previous stored cell, or to the ghost position before the first one. From the ghost position, moves to the last stored cell.
    pub fn move_prev(&mut self) {
        self.current = match self.current.clone() {
            Some(current) => {
                let prev = self.neighbor(&current, false);
                self.settle(&current);
                prev
            }
            None => self.matrix.last_key(),
        };
    }

    fn neighbor(&self, current: &K, forward: bool) -> Option<K> {
        let node = NodeRef::new_trusted(self.matrix.storage(), current.clone());
        let neighbor = if forward {
            node.successor()
        } else {
            node.predecessor()
        };
        neighbor.map(NodeRef::into_raw_key)
    }
    /// Removes the cell if it was rewritten to the default value.
    fn settle(&mut self, leaf: &K) {
        self.matrix.vacuum(leaf);
    }
}
impl<T, const D: usize, K, S> Drop for CursorMut<'_, T, D, K, S>
where
    T: Clone + PartialEq,
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    fn drop(&mut self) {
        if let Some(current) = self.current.take() {
            self.settle(&current);
        }
    }
}
impl<T, const D: usize, K, S> Debug for CursorMut<'_, T, D, K, S>
where
    T: Clone + PartialEq + Debug,
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("CursorMut")
            .field("coords", &self.coords())
            .field("value", &self.value())
            .finish()
    }
}
