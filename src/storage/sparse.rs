use core::num::NonZeroUsize;
use alloc::vec::Vec;
use super::{Storage, MoveFix};

/// A `Vec` of [`Slot`]s which greatly improves element removal performance and keeps keys stable.
///
/// Removing an element does not shift the ones after it; instead, the element is replaced with a "hole". Holes are chained into a list and reused by later insertions, so that the elements which store indices towards other elements of the storage never get their links invalidated.
///
/// Holes left behind can be cleaned up all at once with [`defragment_with`], which moves elements from the end of the storage into the holes and reports every move so that links can be fixed.
///
/// [`Slot`]: struct.Slot.html " "
/// [`defragment_with`]: #method.defragment_with " "
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SparseVec<T> {
    slots: Vec<Slot<T>>,
    /// Length, first hole, last hole
    hole_list: Option<(NonZeroUsize, usize, usize)>,
}
impl<T> SparseVec<T> {
    /// Returns the number of holes in the storage. This operation returns immediately instead of looping through the entire storage, since the sparse storage tracks the number of holes it creates and destroys.
    #[inline(always)]
    pub fn num_holes(&self) -> usize {
        self.hole_list.map_or(0, |x| x.0.get())
    }
    /// Returns `true` if there are no holes in the storage, `false` otherwise.
    #[inline(always)]
    pub fn is_dense(&self) -> bool {
        self.num_holes() == 0
    }
    /// Returns the total number of slots, including holes.
    #[inline(always)]
    pub fn num_slots(&self) -> usize {
        self.slots.len()
    }
    /// Removes all holes from the storage by moving elements from the back into them, calling `fix(storage, previous_index, current_index)` after every move. **This is an expensive operation and should only be called if `is_dense` is `false` to avoid needless overhead.**
    pub fn defragment_with<F>(&mut self, mut fix: F)
    where F: FnMut(&mut Self, usize, usize) {
        if self.is_dense() {
            return;
        }
        // Every hole gets either popped or filled below
        self.hole_list = None;
        let mut front = 0;
        loop {
            while matches!(self.slots.last(), Some(Slot(SlotInner::Hole(..)))) {
                self.slots.pop();
            }
            while front < self.slots.len() && self.slots[front].is_element() {
                front += 1;
            }
            if front >= self.slots.len() {
                break;
            }
            let back = self.slots.len() - 1;
            self.slots.swap(front, back);
            self.slots.pop();
            fix(self, back, front);
        }
    }
    /// Removes all holes from the storage, fixing the links between the elements.
    #[inline(always)]
    pub fn defragment(&mut self)
    where T: MoveFix {
        self.defragment_with(|s, i, j| T::fix_move(s, i, j));
    }

    /// Sets the specified element to a hole, returning the value or `None` if it was out of bounds or already a hole.
    fn punch_hole(&mut self, index: usize) -> Option<T> {
        let value = self.slots.get_mut(index)?.punch_hole()?;
        if let Some(hole_info) = &mut self.hole_list {
            // It's impossible to have more than usize::MAX elements in a Vec
            hole_info.0 = NonZeroUsize::new(hole_info.0.get() + 1).unwrap_or(hole_info.0);
            // Make the previous end point to the hole we just punched
            let old_end = hole_info.2;
            self.slots[old_end] = Slot(SlotInner::Hole(Some(index)));
            hole_info.2 = index;
        } else {
            // Only one hole, so the list starts and ends with it
            self.hole_list = Some((NonZeroUsize::MIN, index, index));
        }
        Some(value)
    }
}
impl<T> Default for SparseVec<T> {
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}
impl<T> Storage for SparseVec<T> {
    type Key = usize;
    type Element = T;

    #[inline]
    fn add(&mut self, element: Self::Element) -> usize {
        if let Some(hole_info) = &mut self.hole_list {
            let used_hole_index = hole_info.1;
            let next_hole = match self.slots[used_hole_index].0 {
                SlotInner::Hole(next) => next,
                SlotInner::Element(..) => unreachable!("the hole list pointed at an element"),
            };
            self.slots[used_hole_index] = Slot(SlotInner::Element(element));
            match (NonZeroUsize::new(hole_info.0.get() - 1), next_hole) {
                (Some(new_hole_count), Some(next_hole)) => {
                    hole_info.0 = new_hole_count;
                    hole_info.1 = next_hole;
                }
                _ => self.hole_list = None,
            }
            used_hole_index
        } else {
            self.slots.push(Slot(SlotInner::Element(element)));
            self.slots.len() - 1
        }
    }
    #[inline]
    #[track_caller]
    fn remove(&mut self, key: &usize) -> Self::Element {
        self.punch_hole(*key)
            .unwrap_or_else(|| panic!("no element at index {} in the sparse storage", key))
    }
    #[inline(always)]
    fn len(&self) -> usize {
        self.slots.len() - self.num_holes()
    }
    #[inline(always)]
    fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            hole_list: None,
        }
    }
    #[inline]
    fn get(&self, key: &usize) -> Option<&Self::Element> {
        self.slots.get(*key).and_then(Slot::element)
    }
    #[inline]
    fn get_mut(&mut self, key: &usize) -> Option<&mut Self::Element> {
        self.slots.get_mut(*key).and_then(Slot::element_mut)
    }
    #[inline(always)]
    fn new() -> Self {
        Self {
            slots: Vec::new(),
            hole_list: None,
        }
    }
    #[inline(always)]
    fn capacity(&self) -> usize {
        self.slots.capacity()
    }
    #[inline(always)]
    fn reserve(&mut self, additional: usize) {
        self.slots.reserve(additional)
    }
    #[inline(always)]
    fn shrink_to_fit(&mut self) {
        self.slots.shrink_to_fit()
    }
}

/// A slot inside a [`SparseVec`].
///
/// This is an opaque structure, only public so that the type of the backing `Vec` can be named.
///
/// [`SparseVec`]: struct.SparseVec.html " "
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Slot<T>(SlotInner<T>);

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
enum SlotInner<T> {
    /// A value in the slot.
    Element(T),
    /// A hole, with an index to the next one.
    Hole(Option<usize>),
}

impl<T> Slot<T> {
    #[inline(always)]
    const fn is_element(&self) -> bool {
        matches!(self.0, SlotInner::Element(..))
    }
    #[inline]
    fn element(&self) -> Option<&T> {
        match &self.0 {
            SlotInner::Element(x) => Some(x),
            SlotInner::Hole(..) => None,
        }
    }
    #[inline]
    fn element_mut(&mut self) -> Option<&mut T> {
        match &mut self.0 {
            SlotInner::Element(x) => Some(x),
            SlotInner::Hole(..) => None,
        }
    }
    /// Turns the slot into a hole which is the end of the hole list, returning the element if there was one.
    fn punch_hole(&mut self) -> Option<T> {
        match core::mem::replace(&mut self.0, SlotInner::Hole(None)) {
            SlotInner::Element(val) => Some(val),
            hole @ SlotInner::Hole(..) => {
                self.0 = hole;
                None
            }
        }
    }
}
