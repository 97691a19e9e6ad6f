//! Iteration over the stored cells of a matrix.
//!
//! - [`Iter`] yields the coordinates and values of the stored cells in ascending order of coordinates, from either end
//! - [`Keys`] and [`Values`] yield only the coordinates or only the values
//! - [`CursorMut`] walks the stored cells both ways and can rewrite them, removing the cells rewritten to the default value
//!
//! Coordinates are not stored anywhere in the tree; each step reconstructs them by walking from the leaf up to the root and reading the indices along the way.
//!
//! [`Iter`]: struct.Iter.html " "
//! [`Keys`]: struct.Keys.html " "
//! [`Values`]: struct.Values.html " "
//! [`CursorMut`]: struct.CursorMut.html " "

use core::{
    fmt::{self, Formatter, Debug},
    iter::FusedIterator,
    marker::PhantomData,
};
use crate::{
    storage::{Storage, DefaultStorage},
    node::{Node, NodeRef},
};

mod cursor;
pub use cursor::CursorMut;


/// An iterator over the stored cells of a matrix or a view, yielding their coordinates and values.
///
/// Created by [`Matrix::iter`] and [`View::iter`].
///
/// [`Matrix::iter`]: ../matrix/struct.Matrix.html#method.iter " "
/// [`View::iter`]: ../matrix/struct.View.html#method.iter " "
pub struct Iter<'a, T, const D: usize, K = usize, S = DefaultStorage<Node<T, K>>>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    storage: &'a S,
    /// The node whose subtree is iterated over.
    scope: K,
    front: Option<K>,
    back: Option<K>,
    _marker: PhantomData<&'a Node<T, K>>,
}
impl<'a, T, const D: usize, K, S> Iter<'a, T, D, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    /// Creates an iterator over the leaves under `scope`.
    pub(crate) fn new(storage: &'a S, scope: K) -> Self {
        let scope_ref = NodeRef::new_trusted(storage, scope.clone());
        let front = scope_ref.first_leaf().map(NodeRef::into_raw_key);
        let back = scope_ref.last_leaf().map(NodeRef::into_raw_key);
        Self {
            storage,
            scope,
            front,
            back,
            _marker: PhantomData,
        }
    }
    /// Creates an iterator which is already exhausted.
    pub(crate) fn empty(storage: &'a S, scope: K) -> Self {
        Self {
            storage,
            scope,
            front: None,
            back: None,
            _marker: PhantomData,
        }
    }
    #[track_caller]
    fn item(node: NodeRef<'a, T, K, S>) -> ([usize; D], &'a T) {
        let value = node
            .value()
            .unwrap_or_else(|| unreachable!("iteration visited branch {:?}", node.raw_key()));
        (node.coords::<D>(), value)
    }
}
impl<'a, T, const D: usize, K, S> Iterator for Iter<'a, T, D, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    type Item = ([usize; D], &'a T);
    fn next(&mut self) -> Option<Self::Item> {
        let node = NodeRef::new_trusted(self.storage, self.front.take()?);
        if self.back.as_ref() == Some(node.raw_key()) {
            // The ends met, nothing left on either side
            self.back = None;
        } else {
            self.front = node
                .successor_within(Some(&self.scope))
                .map(NodeRef::into_raw_key);
        }
        Some(Self::item(node))
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.front.is_some() {
            (1, None)
        } else {
            (0, Some(0))
        }
    }
}
impl<T, const D: usize, K, S> DoubleEndedIterator for Iter<'_, T, D, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        let node = NodeRef::new_trusted(self.storage, self.back.take()?);
        if self.front.as_ref() == Some(node.raw_key()) {
            self.front = None;
        } else {
            self.back = node
                .predecessor_within(Some(&self.scope))
                .map(NodeRef::into_raw_key);
        }
        Some(Self::item(node))
    }
}
impl<T, const D: usize, K, S> FusedIterator for Iter<'_, T, D, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
}
impl<T, const D: usize, K, S> Clone for Iter<'_, T, D, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    fn clone(&self) -> Self {
        Self {
            storage: self.storage,
            scope: self.scope.clone(),
            front: self.front.clone(),
            back: self.back.clone(),
            _marker: PhantomData,
        }
    }
}
impl<T, const D: usize, K, S> Debug for Iter<'_, T, D, K, S>
where
    T: Debug,
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    /// Lists the cells which are left to be yielded.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.clone()).finish()
    }
}

/// An iterator over the coordinates of the stored cells of a matrix.
///
/// Created by [`Matrix::keys`].
///
/// [`Matrix::keys`]: ../matrix/struct.Matrix.html#method.keys " "
pub struct Keys<'a, T, const D: usize, K = usize, S = DefaultStorage<Node<T, K>>>(
    Iter<'a, T, D, K, S>,
)
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq;
impl<'a, T, const D: usize, K, S> Keys<'a, T, D, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    pub(crate) fn new(iter: Iter<'a, T, D, K, S>) -> Self {
        Self(iter)
    }
}
impl<T, const D: usize, K, S> Iterator for Keys<'_, T, D, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    type Item = [usize; D];
    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(coords, _)| coords)
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}
impl<T, const D: usize, K, S> DoubleEndedIterator for Keys<'_, T, D, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        self.0.next_back().map(|(coords, _)| coords)
    }
}
impl<T, const D: usize, K, S> FusedIterator for Keys<'_, T, D, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
}
impl<T, const D: usize, K, S> Debug for Keys<'_, T, D, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(Self(self.0.clone())).finish()
    }
}

/// An iterator over the values of the stored cells of a matrix.
///
/// Created by [`Matrix::values`].
///
/// [`Matrix::values`]: ../matrix/struct.Matrix.html#method.values " "
pub struct Values<'a, T, const D: usize, K = usize, S = DefaultStorage<Node<T, K>>>(
    Iter<'a, T, D, K, S>,
)
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq;
impl<'a, T, const D: usize, K, S> Values<'a, T, D, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    pub(crate) fn new(iter: Iter<'a, T, D, K, S>) -> Self {
        Self(iter)
    }
}
impl<'a, T, const D: usize, K, S> Iterator for Values<'a, T, D, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    type Item = &'a T;
    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(_, value)| value)
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}
impl<T, const D: usize, K, S> DoubleEndedIterator for Values<'_, T, D, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        self.0.next_back().map(|(_, value)| value)
    }
}
impl<T, const D: usize, K, S> FusedIterator for Values<'_, T, D, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
}
impl<T, const D: usize, K, S> Debug for Values<'_, T, D, K, S>
where
    T: Debug,
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(Self(self.0.clone())).finish()
    }
}
