use slotmap::{SlotMap, DenseSlotMap, Key};
use super::Storage;

impl<K, V> Storage for SlotMap<K, V>
where
    K: Key,
{
    type Key = K;
    type Element = V;
    // Those methods copy the keys which have been fed into them, slotmap keys are Copy
    #[inline(always)]
    fn add(&mut self, element: Self::Element) -> Self::Key {
        self.insert(element)
    }
    #[inline(always)]
    #[track_caller]
    fn remove(&mut self, key: &Self::Key) -> Self::Element {
        SlotMap::remove(self, *key).expect("the value with this key has already been removed")
    }
    #[inline(always)]
    fn len(&self) -> usize {
        SlotMap::len(self)
    }
    #[inline(always)]
    fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_key(capacity)
    }
    #[inline(always)]
    fn get(&self, key: &Self::Key) -> Option<&Self::Element> {
        SlotMap::get(self, *key)
    }
    #[inline(always)]
    fn get_mut(&mut self, key: &Self::Key) -> Option<&mut Self::Element> {
        SlotMap::get_mut(self, *key)
    }
    #[inline(always)]
    fn contains_key(&self, key: &Self::Key) -> bool {
        SlotMap::contains_key(self, *key)
    }
    #[inline(always)]
    fn new() -> Self {
        Self::with_key()
    }
    #[inline(always)]
    fn capacity(&self) -> usize {
        SlotMap::capacity(self)
    }
    #[inline(always)]
    fn reserve(&mut self, additional: usize) {
        SlotMap::reserve(self, additional)
    }
}

impl<K, V> Storage for DenseSlotMap<K, V>
where
    K: Key,
{
    type Key = K;
    type Element = V;
    #[inline(always)]
    fn add(&mut self, element: Self::Element) -> Self::Key {
        self.insert(element)
    }
    #[inline(always)]
    #[track_caller]
    fn remove(&mut self, key: &Self::Key) -> Self::Element {
        DenseSlotMap::remove(self, *key).expect("the value with this key has already been removed")
    }
    #[inline(always)]
    fn len(&self) -> usize {
        DenseSlotMap::len(self)
    }
    #[inline(always)]
    fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_key(capacity)
    }
    #[inline(always)]
    fn get(&self, key: &Self::Key) -> Option<&Self::Element> {
        DenseSlotMap::get(self, *key)
    }
    #[inline(always)]
    fn get_mut(&mut self, key: &Self::Key) -> Option<&mut Self::Element> {
        DenseSlotMap::get_mut(self, *key)
    }
    #[inline(always)]
    fn contains_key(&self, key: &Self::Key) -> bool {
        DenseSlotMap::contains_key(self, *key)
    }
    #[inline(always)]
    fn new() -> Self {
        Self::with_key()
    }
    #[inline(always)]
    fn capacity(&self) -> usize {
        DenseSlotMap::capacity(self)
    }
    #[inline(always)]
    fn reserve(&mut self, additional: usize) {
        DenseSlotMap::reserve(self, additional)
    }
}
