//! Utilities for treating the backing storage for matrix trees generically.
//!
//! This module is home for the following items:
//! - [`Storage`], the trait for the arenas which hold the nodes of a matrix tree
//! - [`SparseVec`], a `Vec` of slots which leaves holes behind removed elements instead of shifting the rest, so that keys stay valid
//! - [`DefaultStorage`], a type definition for the backing storage used by matrices unless a different one is specified
//!
//! With the `slotmap` feature flag, `Storage` is also implemented for [`SlotMap`] and [`DenseSlotMap`].
//!
//! [`Storage`]: trait.Storage.html " "
//! [`SparseVec`]: struct.SparseVec.html " "
//! [`DefaultStorage`]: type.DefaultStorage.html " "
//! [`SlotMap`]: https://docs.rs/slotmap/*/slotmap/struct.SlotMap.html " "
//! [`DenseSlotMap`]: https://docs.rs/slotmap/*/slotmap/dense/struct.DenseSlotMap.html " "

mod sparse;
pub use sparse::{SparseVec, Slot as SparseVecSlot};

#[cfg(feature = "slotmap")]
mod slotmap_impl;

#[cfg(test)]
mod tests;

use core::fmt::Debug;

/// Trait for various kinds of containers which can be the backing storage for matrix trees.
///
/// There's a number of invariants which have to be followed by the container, and the matrix relies on them for correctness:
/// - `new` and `with_capacity` ***must*** return empty storages, i.e. those which have `len() == 0` and `is_empty() == true`;
/// - keys handed out by `add` must stay valid, and keep pointing at the same element, until that element is removed with `remove`;
/// - calling `remove` if `contains_key` on the same key returns `true` should *never* panic, as that might leave the tree in an invalid state during some operations.
pub trait Storage: Sized {
    /// The type used for element naming.
    type Key: Clone + Debug + Eq;
    /// The type of the elements stored.
    type Element;

    /// Adds an element to the collection with an unspecified key, returning that key.
    fn add(&mut self, element: Self::Element) -> Self::Key;
    /// Removes and returns the element identified by `key` within the storage.
    ///
    /// # Panics
    /// Required to panic if the specified key does not exist.
    fn remove(&mut self, key: &Self::Key) -> Self::Element;
    /// Returns the number of elements in the storage, also referred to as its 'length'.
    fn len(&self) -> usize;
    /// Creates an empty storage with the specified capacity.
    fn with_capacity(capacity: usize) -> Self;
    /// Returns a reference to the specified element in the collection, or `None` if the key is not present in the storage.
    fn get(&self, key: &Self::Key) -> Option<&Self::Element>;
    /// Returns a *mutable* reference to the specified element in the collection, or `None` if the key is not present in the storage.
    fn get_mut(&mut self, key: &Self::Key) -> Option<&mut Self::Element>;

    /// Returns `true` if the specified key is present in the storage, `false` otherwise.
    #[inline]
    fn contains_key(&self, key: &Self::Key) -> bool {
        self.get(key).is_some()
    }
    /// Creates a new empty storage. Dynamically-allocated storages created this way do not allocate memory.
    #[inline(always)]
    fn new() -> Self {
        Self::with_capacity(0)
    }
    /// Returns `true` if the storage contains no elements, `false` otherwise.
    #[inline(always)]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    /// Returns the amount of elements the storage can hold without requiring a memory allocation.
    ///
    /// The default implementation returns the length.
    #[inline(always)]
    fn capacity(&self) -> usize {
        self.len()
    }
    /// Reserves capacity for at least `additional` more elements to be inserted in the given storage. Does nothing if capacity is already sufficient.
    ///
    /// The default implementation does nothing.
    #[inline(always)]
    fn reserve(&mut self, additional: usize) {
        let _ = additional;
    }
    /// Shrinks the capacity of the storage as much as possible.
    ///
    /// The default implementation does nothing.
    #[inline(always)]
    fn shrink_to_fit(&mut self) {}
}

/// Elements which store keys of other elements of the same `SparseVec` and thus need their links fixed up when they are moved around during defragmentation.
pub trait MoveFix: Sized {
    /// Fixes the links pointing to and from the element which was moved from `previous_index` to `current_index`.
    ///
    /// Called after the move has happened, i.e. the element is already at `current_index`.
    fn fix_move(storage: &mut SparseVec<Self>, previous_index: usize, current_index: usize);
}

/// The default storage type used by matrices when a storage type is not provided.
///
/// This is always [`SparseVec`], which is a `Vec` wrapped into a hole list so that removing nodes does not invalidate the keys of other nodes.
///
/// [`SparseVec`]: struct.SparseVec.html " "
pub type DefaultStorage<T> = SparseVec<T>;
