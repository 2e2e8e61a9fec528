use slotmap::{SlotMap, HopSlotMap, DenseSlotMap, Key};
use super::Storage;

// All three slot maps share the same method names, only the types differ. Keys are Copy, so
// cloning them out of references is free.
macro_rules! impl_storage_for_slotmap {
    ($($map:ident),+ $(,)?) => {$(
        unsafe impl<K: Key, V> Storage for $map<K, V> {
            type Key = K;
            type Element = V;

            #[inline(always)]
            fn add(&mut self, element: Self::Element) -> Self::Key {
                self.insert(element)
            }
            #[inline(always)]
            fn remove(&mut self, key: &Self::Key) -> Self::Element {
                $map::remove(self, *key)
                    .expect("the value with this key has already been removed")
            }
            #[inline(always)]
            fn len(&self) -> usize {
                $map::len(self)
            }
            #[inline(always)]
            fn with_capacity(capacity: usize) -> Self {
                Self::with_capacity_and_key(capacity)
            }
            #[inline(always)]
            unsafe fn get_unchecked(&self, key: &Self::Key) -> &Self::Element {
                $map::get_unchecked(self, *key)
            }
            #[inline(always)]
            unsafe fn get_unchecked_mut(&mut self, key: &Self::Key) -> &mut Self::Element {
                $map::get_unchecked_mut(self, *key)
            }
            #[inline(always)]
            fn contains_key(&self, key: &Self::Key) -> bool {
                $map::contains_key(self, *key)
            }
            #[inline(always)]
            fn get(&self, key: &Self::Key) -> Option<&Self::Element> {
                $map::get(self, *key)
            }
            #[inline(always)]
            fn get_mut(&mut self, key: &Self::Key) -> Option<&mut Self::Element> {
                $map::get_mut(self, *key)
            }
            #[inline(always)]
            fn capacity(&self) -> usize {
                $map::capacity(self)
            }
            #[inline(always)]
            fn reserve(&mut self, additional: usize) {
                $map::reserve(self, additional)
            }
        }
    )+};
}
impl_storage_for_slotmap!(SlotMap, HopSlotMap, DenseSlotMap);
