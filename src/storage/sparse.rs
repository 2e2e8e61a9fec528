use core::{hint, mem, num::NonZeroUsize};
use super::Storage;

/// A `Vec` which leaves holes behind removed elements instead of shifting the rest of the storage.
///
/// Holes are chained into a free list and get filled by subsequent `add` calls, most recently punched hole first. Because nothing is ever shifted, keys of elements stay valid until those elements are removed, which is what lets tree nodes store the keys of their parents and children.
///
/// # Example
/// ```rust
/// use sapling::storage::{Storage, SparseVec};
///
/// let mut storage = SparseVec::new();
/// let a = storage.add("a");
/// let b = storage.add("b");
/// assert_eq!(storage.remove(&a), "a");
/// assert_eq!(storage.num_holes(), 1);
///
/// // The hole is reused and `b` stays where it was:
/// let c = storage.add("c");
/// assert_eq!(c, a);
/// assert_eq!(storage.get(&b), Some(&"b"));
/// assert!(storage.is_dense());
/// ```
#[derive(Clone, Debug, Hash)]
pub struct SparseVec<T> {
    slots: Vec<Slot<T>>,
    /// Number of holes, first hole of the free list.
    hole_list: Option<(NonZeroUsize, usize)>,
}
impl<T> SparseVec<T> {
    /// Returns the number of holes in the storage. This operation returns immediately instead of looping through the entire storage, since the storage tracks the number of holes it creates and fills.
    #[inline(always)]
    pub fn num_holes(&self) -> usize {
        self.hole_list.map_or(0, |x| x.0.get())
    }
    /// Returns `true` if there are no holes in the storage, `false` otherwise.
    #[inline(always)]
    pub fn is_dense(&self) -> bool {
        self.num_holes() == 0
    }
    /// Consumes the storage and returns its slots, holes included.
    #[inline(always)]
    pub fn into_inner(self) -> Vec<Slot<T>> {
        self.slots
    }
}
impl<T> Default for SparseVec<T> {
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}
static HOLE_PANIC_MSG: &str = "\
the element at the specified index was a hole in the sparse storage";
unsafe impl<T> Storage for SparseVec<T> {
    type Key = usize;
    type Element = T;

    fn add(&mut self, element: T) -> usize {
        if let Some((count, first)) = self.hole_list {
            let next = match mem::replace(&mut self.slots[first], Slot::Element(element)) {
                Slot::Hole(next) => next,
                Slot::Element(..) => unreachable!("hole list pointed at an element"),
            };
            self.hole_list = NonZeroUsize::new(count.get() - 1).map(|count| {
                (
                    count,
                    next.unwrap_or_else(|| unreachable!("hole list ended before its hole count")),
                )
            });
            first
        } else {
            self.slots.push(Slot::Element(element));
            self.slots.len() - 1
        }
    }
    #[track_caller]
    fn remove(&mut self, key: &usize) -> T {
        let index = *key;
        assert!(self.contains_key(key), "{}", HOLE_PANIC_MSG);
        let next = self.hole_list.map(|(_, first)| first);
        let count = self.num_holes() + 1;
        let element = match mem::replace(&mut self.slots[index], Slot::Hole(next)) {
            Slot::Element(x) => x,
            Slot::Hole(..) => unreachable!("contains_key returned true for a hole"),
        };
        self.hole_list = NonZeroUsize::new(count).map(|count| (count, index));
        element
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
    unsafe fn get_unchecked(&self, key: &usize) -> &T {
        match self.slots.get_unchecked(*key) {
            Slot::Element(x) => x,
            Slot::Hole(..) => hint::unreachable_unchecked(),
        }
    }
    #[inline]
    unsafe fn get_unchecked_mut(&mut self, key: &usize) -> &mut T {
        match self.slots.get_unchecked_mut(*key) {
            Slot::Element(x) => x,
            Slot::Hole(..) => hint::unreachable_unchecked(),
        }
    }
    #[inline]
    fn contains_key(&self, key: &usize) -> bool {
        matches!(self.slots.get(*key), Some(Slot::Element(..)))
    }
    #[inline(always)]
    fn capacity(&self) -> usize {
        self.slots.capacity()
    }
    #[inline(always)]
    fn reserve(&mut self, additional: usize) {
        // Holes count towards the additional elements we can fit
        self.slots.reserve(additional.saturating_sub(self.num_holes()))
    }
    #[inline(always)]
    fn shrink_to_fit(&mut self) {
        self.slots.shrink_to_fit()
    }
}

/// A slot inside a [`SparseVec`].
///
/// Only public so that the result of [`into_inner`] can be named.
///
/// [`SparseVec`]: struct.SparseVec.html " "
/// [`into_inner`]: struct.SparseVec.html#method.into_inner " "
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Slot<T> {
    /// A value in the slot.
    Element(T),
    /// A hole, with the index of the next one in the free list.
    Hole(Option<usize>),
}
impl<T> Slot<T> {
    /// Returns `true` if the slot holds a value, `false` if it's a hole.
    #[inline(always)]
    pub const fn is_element(&self) -> bool {
        matches!(self, Self::Element(..))
    }
    /// Returns `true` if the slot is a hole, `false` if it holds a value.
    #[inline(always)]
    pub const fn is_hole(&self) -> bool {
        matches!(self, Self::Hole(..))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn holes_are_reused_last_in_first_out() {
        let mut storage = SparseVec::new();
        let keys: Vec<usize> = (0..5).map(|x| storage.add(x)).collect();
        assert_eq!(storage.remove(&keys[1]), 1);
        assert_eq!(storage.remove(&keys[3]), 3);
        assert_eq!(storage.num_holes(), 2);
        assert_eq!(storage.len(), 3);
        assert!(!storage.contains_key(&keys[1]));

        assert_eq!(storage.add(30), keys[3]);
        assert_eq!(storage.add(10), keys[1]);
        assert!(storage.is_dense());
        assert_eq!(storage.add(5), 5);
        assert_eq!(storage.get(&keys[3]), Some(&30));
        assert_eq!(storage.get(&keys[4]), Some(&4));
    }

    #[test]
    #[should_panic]
    fn removing_a_hole_panics() {
        let mut storage = SparseVec::new();
        let key = storage.add(());
        storage.remove(&key);
        storage.remove(&key);
    }

    #[test]
    fn out_of_bounds_keys_are_absent() {
        let mut storage = SparseVec::<u8>::with_capacity(4);
        assert!(storage.is_empty());
        assert_eq!(storage.get(&0), None);
        assert_eq!(storage.get_mut(&7), None);
    }
}
