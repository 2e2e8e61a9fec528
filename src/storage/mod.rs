//! Utilities for treating the backing storage for trees generically.
//!
//! This module is home for the following items:
//! - [`Storage`], the main trait for the backing arenas of trees
//! - [`SparseVec`], a `Vec`-backed arena which leaves holes behind removed elements and reuses them for new ones, so that keys of live elements never move
//! - [`DefaultStorage`], a type definition for the storage used by trees unless a different one is specified
//!
//! With the `slotmap` feature flag, `Storage` is also implemented for [`SlotMap`], [`HopSlotMap`] and [`DenseSlotMap`].
//!
//! [`Storage`]: trait.Storage.html " "
//! [`SparseVec`]: struct.SparseVec.html " "
//! [`DefaultStorage`]: type.DefaultStorage.html " "
//! [`SlotMap`]: https://docs.rs/slotmap/*/slotmap/struct.SlotMap.html " "
//! [`HopSlotMap`]: https://docs.rs/slotmap/*/slotmap/hop/struct.HopSlotMap.html " "
//! [`DenseSlotMap`]: https://docs.rs/slotmap/*/slotmap/dense/struct.DenseSlotMap.html " "

mod sparse;
pub use sparse::{SparseVec, Slot as SparseVecSlot};

#[cfg(feature = "slotmap")]
mod slotmap_impl;

use core::fmt::Debug;

/// Trait for various kinds of containers which can be the backing storage for trees.
///
/// # Safety
/// There's a number of invariants which have to be followed by the container:
/// - `new` and `with_capacity` ***must*** return empty storages, i.e. those which have `len() == 0` and `is_empty() == true`;
/// - Calling [`get_unchecked`] or [`get_unchecked_mut`] if `contains_key` on the same key returns `true` should *not* cause undefined behavior;
/// - Calling `remove` if `contains_key` on the same key returns `true` should *never* panic, as that might leave the tree in an invalid state during some operations;
/// - Adding or removing an element must not change the key of any other element;
/// - If an element is added at a key, it must be retrieveable in the exact same state as it was inserted until it is removed or modified using a method which explicitly does so.
///
/// Tree structures rely on those invariants for safety.
///
/// [`get_unchecked`]: #tymethod.get_unchecked " "
/// [`get_unchecked_mut`]: #tymethod.get_unchecked_mut " "
pub unsafe trait Storage: Sized {
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
    /// Returns a reference to the specified element in the storage, without checking for presence of the key inside the collection.
    ///
    /// # Safety
    /// If the element at the specified key is not present in the storage, a dangling reference will be created, causing *immediate undefined behavior*.
    unsafe fn get_unchecked(&self, key: &Self::Key) -> &Self::Element;
    /// Returns a *mutable* reference to the specified element in the storage, without checking for presence of the key inside the collection.
    ///
    /// # Safety
    /// If the element at the specified key is not present in the storage, a dangling reference will be created, causing *immediate undefined behavior*.
    unsafe fn get_unchecked_mut(&mut self, key: &Self::Key) -> &mut Self::Element;
    /// Returns `true` if the specified key is present in the storage, `false` otherwise.
    ///
    /// If this method returned `true`, calling `get_unchecked`/`get_unchecked_mut` on the same key is guaranteed to be safe.
    fn contains_key(&self, key: &Self::Key) -> bool;

    /// Returns a reference to the specified element in the collection, or `None` if the key is not present in the storage.
    #[inline]
    fn get(&self, key: &Self::Key) -> Option<&Self::Element> {
        if self.contains_key(key) {
            Some(unsafe {
                // SAFETY: we just checked for key presence
                self.get_unchecked(key)
            })
        } else {
            None
        }
    }
    /// Returns a *mutable* reference to the specified element in the collection, or `None` if the key is not present in the storage.
    #[inline]
    fn get_mut(&mut self, key: &Self::Key) -> Option<&mut Self::Element> {
        if self.contains_key(key) {
            Some(unsafe {
                // SAFETY: we just checked for key presence
                self.get_unchecked_mut(key)
            })
        } else {
            None
        }
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

/// The default storage type used by the tree types when a storage type is not provided.
///
/// This is always [`SparseVec`], since the trees rely on keys staying put while nodes are removed from elsewhere in the tree.
///
/// [`SparseVec`]: struct.SparseVec.html " "
pub type DefaultStorage<T> = SparseVec<T>;
