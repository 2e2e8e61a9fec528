use core::fmt::Debug;
use tracing::{trace, instrument};
use crate::{
    storage::{Storage, DefaultStorage, SparseVec},
    util::Stack,
};
use super::{Node, NodeRef, NodeRefMut, node::Side};

/// A binary tree which is grown lazily through its node cursors.
///
/// See the [module-level documentation] for more.
///
/// [module-level documentation]: index.html " "
#[derive(Clone, Debug)]
pub struct BinaryTree<T, K = usize, S = DefaultStorage<Node<T, K>>>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    pub(super) storage: S,
    pub(super) root: K,
}
impl<T, K, S> BinaryTree<T, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    /// Creates a binary tree consisting of a single empty root node.
    ///
    /// # Example
    /// ```rust
    /// # use sapling::BinaryTree;
    /// // The turbofish there is needed to state that we are using the default key and storage
    /// // instead of asking the compiler to infer them, which would be impossible.
    /// let tree = BinaryTree::<String>::new();
    ///
    /// assert!(tree.root().is_empty());
    /// assert!(tree.root().is_root());
    /// ```
    pub fn new() -> Self {
        Self::from_payload(None)
    }
    /// Creates a binary tree whose root is a leaf holding the specified payload.
    ///
    /// Such a tree is complete by itself and is typically grafted into another tree with [`insert_left`] or [`insert_right`].
    ///
    /// # Example
    /// ```rust
    /// # use sapling::BinaryTree;
    /// let tree = BinaryTree::<_>::leaf("OP_TRUE");
    ///
    /// assert!(tree.root().is_leaf());
    /// assert_eq!(tree.root().obj(), Some(&"OP_TRUE"));
    /// ```
    ///
    /// [`insert_left`]: struct.NodeRefMut.html#method.insert_left " "
    /// [`insert_right`]: struct.NodeRefMut.html#method.insert_right " "
    pub fn leaf(payload: T) -> Self {
        Self::from_payload(Some(payload))
    }
    /// Creates a binary tree whose root is a leaf if `payload` is `Some`, or an empty node if it's `None`.
    pub fn from_payload(payload: Option<T>) -> Self {
        let mut storage = S::new();
        let root = storage.add(Node::root(payload));
        Self { storage, root }
    }
    /// Creates a binary tree with an empty root and the specified capacity for the storage.
    ///
    /// # Example
    /// ```rust
    /// # use sapling::BinaryTree;
    /// let tree = BinaryTree::<u32>::with_capacity(15);
    ///
    /// // Capacity does not affect the actual nodes:
    /// assert_eq!(tree.len(), 1);
    /// assert!(tree.capacity() >= 15);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        let mut storage = S::with_capacity(capacity);
        let root = storage.add(Node::root(None));
        Self { storage, root }
    }

    /// Returns a reference to the root node of the tree.
    #[allow(clippy::missing_const_for_fn)]
    pub fn root(&self) -> NodeRef<'_, T, K, S> {
        unsafe {
            // SAFETY: binary trees cannot be created without a root, and the root is never removed
            NodeRef::new_raw_unchecked(self, self.root.clone())
        }
    }
    /// Returns a *mutable* reference to the root node of the tree, which is where a builder starts growing the tree from.
    ///
    /// # Example
    /// ```rust
    /// # use sapling::BinaryTree;
    /// let mut tree = BinaryTree::<_>::new();
    ///
    /// let mut root = tree.root_mut();
    /// let mut left = root.get_init_left_child().unwrap();
    /// left.insert_leaf("A").unwrap();
    /// ```
    pub fn root_mut(&mut self) -> NodeRefMut<'_, T, K, S> {
        let root = self.root.clone();
        unsafe {
            // SAFETY: as above
            NodeRefMut::new_raw_unchecked(self, root)
        }
    }
    /// Returns a reference to the node with the specified key, or `None` if no such node exists.
    ///
    /// Keys can be obtained from any node reference with `raw_key` and stay valid until the node is removed.
    pub fn node(&self, key: K) -> Option<NodeRef<'_, T, K, S>> {
        NodeRef::new_raw(self, key)
    }
    /// Returns a *mutable* reference to the node with the specified key, or `None` if no such node exists.
    ///
    /// This is how a cursor can be resumed after the borrow of the tree was released.
    pub fn node_mut(&mut self, key: K) -> Option<NodeRefMut<'_, T, K, S>> {
        NodeRefMut::new_raw(self, key)
    }
    /// Returns the raw storage key of the root node.
    pub fn root_key(&self) -> &K {
        &self.root
    }
    /// Returns the number of nodes in the tree, which includes empty and internal nodes. Never zero, since the root always exists.
    pub fn len(&self) -> usize {
        self.storage.len()
    }
    /// Returns the number of nodes the backing storage can hold without reallocating.
    pub fn capacity(&self) -> usize {
        self.storage.capacity()
    }
    /// Reserves capacity for at least `additional` more nodes.
    pub fn reserve(&mut self, additional: usize) {
        self.storage.reserve(additional)
    }
    /// Shrinks the capacity of the backing storage as much as possible.
    pub fn shrink_to_fit(&mut self) {
        self.storage.shrink_to_fit()
    }
    /// Consumes the tree and returns its backing storage and the key of the root node.
    pub fn into_raw_parts(self) -> (S, K) {
        (self.storage, self.root)
    }

    pub(super) fn get(&self, key: &K) -> &Node<T, K> {
        debug_assert!(
            self.storage.contains_key(key),
            "\
debug key check failed: tried to reference key {:?} which is not present in the storage",
            key,
        );
        unsafe {
            // SAFETY: keys stored in nodes and node references are never dangling
            self.storage.get_unchecked(key)
        }
    }
    pub(super) fn get_mut(&mut self, key: &K) -> &mut Node<T, K> {
        debug_assert!(
            self.storage.contains_key(key),
            "\
debug key check failed: tried to reference key {:?} which is not present in the storage",
            key,
        );
        unsafe {
            // SAFETY: as above
            self.storage.get_unchecked_mut(key)
        }
    }

    /// Returns the key of the child of `parent` on the specified side, creating an empty internal node there first if the slot is vacant.
    ///
    /// The caller is responsible for `parent` not being a leaf.
    pub(super) fn materialize_child(&mut self, parent: &K, side: Side) -> K {
        if let Some(child) = self.get(parent).child(side) {
            return child.clone();
        }
        let child = self.storage.add(Node::empty_child(parent.clone()));
        *self.get_mut(parent).child_mut(side) = Some(child.clone());
        trace!(?parent, ?side, ?child, "materialized empty node");
        child
    }
    /// Moves every node of `subtree` into this tree, hanging its root off the vacant `side` slot of `parent`. Returns the new key of the grafted root.
    ///
    /// The caller is responsible for the slot being vacant and `parent` not being a leaf.
    #[instrument(level = "trace", skip_all, fields(parent = ?parent, side = ?side))]
    pub(super) fn graft<K2, S2>(&mut self, parent: &K, side: Side, subtree: BinaryTree<T, K2, S2>) -> K
    where
        S2: Storage<Element = Node<T, K2>, Key = K2>,
        K2: Clone + Debug + Eq,
    {
        let BinaryTree { storage: mut source, root: source_root } = subtree;
        let mut pending = Stack::new();
        let new_root = self.adopt(&mut source, &source_root, parent.clone(), side, &mut pending);
        let mut moved = 1_usize;
        while let Some((old_key, new_parent, side)) = pending.pop() {
            self.adopt(&mut source, &old_key, new_parent, side, &mut pending);
            moved += 1;
        }
        debug_assert!(source.is_empty(), "subtree storage had nodes unreachable from its root");
        trace!(moved, "grafted subtree");
        new_root
    }
    /// Moves the node at `old_key` out of `source` into a fresh node of this tree, linked to `new_parent` on the specified side. Its children are queued onto `pending` to be adopted by the new node.
    fn adopt<K2, S2>(
        &mut self,
        source: &mut S2,
        old_key: &K2,
        new_parent: K,
        side: Side,
        pending: &mut Stack<(K2, K, Side)>,
    ) -> K
    where
        S2: Storage<Element = Node<T, K2>, Key = K2>,
        K2: Clone + Debug + Eq,
    {
        let Node { payload, left_child, right_child, .. } = source.remove(old_key);
        let new_key = self.storage.add(Node {
            payload,
            left_child: None,
            right_child: None,
            parent: Some(new_parent.clone()),
        });
        *self.get_mut(&new_parent).child_mut(side) = Some(new_key.clone());
        if let Some(right_child) = right_child {
            pending.push((right_child, new_key.clone(), Side::Right));
        }
        if let Some(left_child) = left_child {
            pending.push((left_child, new_key.clone(), Side::Left));
        }
        new_key
    }
    /// Removes the node with the specified key and everything below it from the storage. The slot of the parent which pointed to the node must already be cleared.
    pub(super) fn remove_subtree(&mut self, key: K) {
        let mut pending = Stack::new();
        pending.push(key);
        let mut removed = 0_usize;
        while let Some(key) = pending.pop() {
            let node = self.storage.remove(&key);
            pending.extend(node.children());
            removed += 1;
        }
        trace!(removed, "removed subtree");
    }
}
impl<T> BinaryTree<T, usize, SparseVec<Node<T, usize>>> {
    /// Returns the number of holes left in the sparse storage by removed subtrees. Holes are filled by nodes created later on.
    ///
    /// # Example
    /// ```rust
    /// # use sapling::BinaryTree;
    /// let mut tree = BinaryTree::<_>::new();
    /// let mut root = tree.root_mut();
    /// root.get_init_left_child().unwrap().insert_leaf(1).unwrap();
    /// root.remove_left_child();
    /// assert_eq!(tree.num_holes(), 1);
    ///
    /// tree.root_mut().get_init_right_child().unwrap();
    /// assert!(tree.is_dense());
    /// ```
    pub fn num_holes(&self) -> usize {
        self.storage.num_holes()
    }
    /// Returns `true` if there are no holes in the sparse storage, `false` otherwise.
    pub fn is_dense(&self) -> bool {
        self.storage.is_dense()
    }
}
impl<T, K, S> Default for BinaryTree<T, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    fn default() -> Self {
        Self::new()
    }
}
impl<T, K, S> From<T> for BinaryTree<T, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    fn from(payload: T) -> Self {
        Self::leaf(payload)
    }
}
