use core::fmt::Debug;
use tracing::trace;
use crate::storage::{Storage, DefaultStorage};
use super::{
    BinaryTree,
    Node,
    NodeRef,
    node::Side,
    InsertLeafError,
    ReplaceLeafError,
    InsertChildError,
};

/// A *mutable* reference to a node in a binary tree, used as the cursor which grows the tree.
///
/// Since this type does not point to the node directly, but rather the tree the node is in and the key of the node in the storage, it can be used to traverse the tree and modify it as a whole.
///
/// Navigation comes in two flavors:
/// - `get_*`/`*_mut` methods reborrow the cursor and return a reference to another node, leaving the original cursor usable once the returned one is dropped;
/// - `into_*` methods move the cursor itself and hand it back unchanged in `Err` if there is nowhere to go, so that a builder can walk the tree with a single variable.
#[derive(Debug)]
pub struct NodeRefMut<'a, T, K = usize, S = DefaultStorage<Node<T, K>>>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    tree: &'a mut BinaryTree<T, K, S>,
    key: K,
}
impl<'a, T, K, S> NodeRefMut<'a, T, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    /// Creates a new `NodeRefMut` pointing to the specified key in the storage, or `None` if it does not exist.
    pub fn new_raw(tree: &'a mut BinaryTree<T, K, S>, key: K) -> Option<Self> {
        if tree.storage.contains_key(&key) {
            Some(unsafe {
                // SAFETY: we just did key checking
                Self::new_raw_unchecked(tree, key)
            })
        } else {
            None
        }
    }
    /// Creates a new `NodeRefMut` pointing to the specified key in the storage without doing key checking.
    ///
    /// # Safety
    /// Causes *immediate* undefined behavior if the specified key is not present in the storage.
    pub unsafe fn new_raw_unchecked(tree: &'a mut BinaryTree<T, K, S>, key: K) -> Self {
        Self { tree, key }
    }
    /// Returns a reference to the raw storage key for the node.
    pub fn raw_key(&self) -> &K {
        &self.key
    }
    /// Consumes the reference and returns the underlying raw storage key for the node.
    pub fn into_raw_key(self) -> K {
        self.key
    }

    /// Returns `true` if the node is the root node, `false` otherwise.
    pub fn is_root(&self) -> bool {
        NodeRef::from(self).is_root()
    }
    /// Returns `true` if the node is a *leaf*, i.e. holds a payload; `false` otherwise.
    pub fn is_leaf(&self) -> bool {
        NodeRef::from(self).is_leaf()
    }
    /// Returns `true` if the node is an *internal node*, i.e. holds no payload; `false` otherwise.
    pub fn is_node(&self) -> bool {
        NodeRef::from(self).is_node()
    }
    /// Returns `true` if the node has neither children nor a payload; `false` otherwise.
    pub fn is_empty(&self) -> bool {
        NodeRef::from(self).is_empty()
    }
    /// Returns `true` if the node is a leaf or has both children; `false` otherwise.
    pub fn is_full(&self) -> bool {
        NodeRef::from(self).is_full()
    }
    /// Returns `true` if the node is the left child of its parent, `false` if it's the right one and `None` if it's the root node.
    pub fn is_left_child(&self) -> Option<bool> {
        NodeRef::from(self).is_left_child()
    }
    /// Returns `true` if the node is the right child of its parent, `false` if it's the left one and `None` if it's the root node.
    pub fn is_right_child(&self) -> Option<bool> {
        NodeRef::from(self).is_right_child()
    }
    /// Returns a reference to the payload if the node is a leaf, `None` otherwise.
    pub fn obj(&self) -> Option<&T> {
        self.node().payload.as_ref()
    }
    /// Returns a *mutable* reference to the payload if the node is a leaf, `None` otherwise.
    pub fn obj_mut(&mut self) -> Option<&mut T> {
        self.node_mut().payload.as_mut()
    }
    /// Consumes the cursor and returns a *mutable* reference to the payload which lives as long as the borrow of the tree, or `None` if the node is not a leaf.
    pub fn into_obj_mut(self) -> Option<&'a mut T> {
        let Self { tree, key } = self;
        tree.get_mut(&key).payload.as_mut()
    }

    /// Returns a reference to the parent node of the pointee, or `None` if it's the root node.
    pub fn parent(&self) -> Option<NodeRef<'_, T, K, S>> {
        NodeRef::from(self).parent()
    }
    /// Returns a reference to the left child, or `None` if the slot is vacant. Never creates any nodes.
    pub fn left_child(&self) -> Option<NodeRef<'_, T, K, S>> {
        NodeRef::from(self).left_child()
    }
    /// Returns a reference to the right child, or `None` if the slot is vacant. Never creates any nodes.
    pub fn right_child(&self) -> Option<NodeRef<'_, T, K, S>> {
        NodeRef::from(self).right_child()
    }
    /// Returns a *mutable* reference to the parent node of the pointee, or `None` if it's the root node.
    pub fn parent_mut(&mut self) -> Option<NodeRefMut<'_, T, K, S>> {
        let key = self.node().parent.clone()?;
        Some(self.reborrow(key))
    }
    /// Returns a *mutable* reference to the left child, or `None` if the slot is vacant. Never creates any nodes.
    pub fn left_child_mut(&mut self) -> Option<NodeRefMut<'_, T, K, S>> {
        let key = self.node().left_child.clone()?;
        Some(self.reborrow(key))
    }
    /// Returns a *mutable* reference to the right child, or `None` if the slot is vacant. Never creates any nodes.
    pub fn right_child_mut(&mut self) -> Option<NodeRefMut<'_, T, K, S>> {
        let key = self.node().right_child.clone()?;
        Some(self.reborrow(key))
    }
    /// Moves the cursor to the parent node.
    ///
    /// # Errors
    /// Returns the cursor unchanged if it points to the root node.
    pub fn into_parent(mut self) -> Result<Self, Self> {
        match self.node().parent.clone() {
            Some(parent) => {
                self.key = parent;
                Ok(self)
            }
            None => Err(self),
        }
    }

    /// Returns a *mutable* reference to the left child, first creating an empty internal node in the slot if it's vacant. Returns `None` only if the node is a leaf, which cannot have children.
    ///
    /// Calling this repeatedly returns the same child every time.
    ///
    /// # Example
    /// ```rust
    /// # use sapling::BinaryTree;
    /// let mut tree = BinaryTree::<&str>::new();
    /// let mut root = tree.root_mut();
    ///
    /// let left_key = *root.get_init_left_child().unwrap().raw_key();
    /// assert_eq!(root.get_init_left_child().unwrap().raw_key(), &left_key);
    /// assert!(root.left_child().unwrap().is_empty());
    /// ```
    pub fn get_init_left_child(&mut self) -> Option<NodeRefMut<'_, T, K, S>> {
        let key = self.init_child_key(Side::Left)?;
        Some(self.reborrow(key))
    }
    /// Returns a *mutable* reference to the right child, first creating an empty internal node in the slot if it's vacant. Returns `None` only if the node is a leaf, which cannot have children.
    pub fn get_init_right_child(&mut self) -> Option<NodeRefMut<'_, T, K, S>> {
        let key = self.init_child_key(Side::Right)?;
        Some(self.reborrow(key))
    }
    /// Moves the cursor to the left child, creating it if needed, as [`get_init_left_child`] does.
    ///
    /// # Errors
    /// Returns the cursor unchanged if the node is a leaf.
    ///
    /// [`get_init_left_child`]: #method.get_init_left_child " "
    pub fn into_init_left_child(self) -> Result<Self, Self> {
        self.into_init(Self::init_child_key, Side::Left)
    }
    /// Moves the cursor to the right child, creating it if needed, as [`get_init_right_child`] does.
    ///
    /// # Errors
    /// Returns the cursor unchanged if the node is a leaf.
    ///
    /// [`get_init_right_child`]: #method.get_init_right_child " "
    pub fn into_init_right_child(self) -> Result<Self, Self> {
        self.into_init(Self::init_child_key, Side::Right)
    }

    /// Returns a *mutable* reference to the right child of the parent, first creating an empty internal node in that slot if it's vacant.
    ///
    /// Returns `None` if the node is the root node, or if it is itself the right child of its parent.
    ///
    /// # Example
    /// ```rust
    /// # use sapling::BinaryTree;
    /// let mut tree = BinaryTree::<&str>::new();
    /// let mut left = tree.root_mut().into_init_left_child().unwrap();
    /// left.insert_leaf("x").unwrap();
    ///
    /// let mut right = left.into_init_right_sibling().unwrap();
    /// assert_eq!(right.is_right_child(), Some(true));
    /// // A right child has no right sibling:
    /// assert!(right.get_init_right_sibling().is_none());
    /// ```
    pub fn get_init_right_sibling(&mut self) -> Option<NodeRefMut<'_, T, K, S>> {
        let key = self.init_sibling_key(Side::Right)?;
        Some(self.reborrow(key))
    }
    /// Returns a *mutable* reference to the left child of the parent, first creating an empty internal node in that slot if it's vacant.
    ///
    /// Returns `None` if the node is the root node. Unlike [`get_init_right_sibling`], a node which is itself the left child of its parent gets a reference to itself.
    ///
    /// [`get_init_right_sibling`]: #method.get_init_right_sibling " "
    pub fn get_init_left_sibling(&mut self) -> Option<NodeRefMut<'_, T, K, S>> {
        let key = self.init_sibling_key(Side::Left)?;
        Some(self.reborrow(key))
    }
    /// Moves the cursor to the right sibling, creating it if needed, as [`get_init_right_sibling`] does.
    ///
    /// # Errors
    /// Returns the cursor unchanged if it points to the root node or a right child.
    ///
    /// [`get_init_right_sibling`]: #method.get_init_right_sibling " "
    pub fn into_init_right_sibling(self) -> Result<Self, Self> {
        self.into_init(Self::init_sibling_key, Side::Right)
    }
    /// Moves the cursor to the left sibling, creating it if needed, as [`get_init_left_sibling`] does.
    ///
    /// # Errors
    /// Returns the cursor unchanged if it points to the root node.
    ///
    /// [`get_init_left_sibling`]: #method.get_init_left_sibling " "
    pub fn into_init_left_sibling(self) -> Result<Self, Self> {
        self.into_init(Self::init_sibling_key, Side::Left)
    }

    /// Turns an empty node into a leaf holding the specified payload.
    ///
    /// # Errors
    /// Will fail if the node is not empty, i.e. already is a leaf or already has children. The node is left untouched and the payload is returned back to the caller.
    pub fn insert_leaf(&mut self, payload: T) -> Result<(), InsertLeafError<T>> {
        let node = self.node_mut();
        if node.is_leaf() {
            return Err(InsertLeafError::WasLeafNode { payload });
        }
        if node.has_children() {
            return Err(InsertLeafError::HadChildren { payload });
        }
        node.payload = Some(payload);
        Ok(())
    }
    /// Swaps the payload of the node with the specified one, returning the previous payload, if any.
    ///
    /// Passing `None` empties a leaf, turning it back into an empty node. Passing `Some` into an empty node makes it a leaf, same as [`insert_leaf`].
    ///
    /// # Errors
    /// Will fail if a payload is given and the node has children, since leaves cannot have children. The payload is returned back to the caller.
    ///
    /// # Example
    /// ```rust
    /// # use sapling::BinaryTree;
    /// let mut tree = BinaryTree::<_>::leaf(1);
    /// let mut root = tree.root_mut();
    ///
    /// assert_eq!(root.replace_leaf(Some(2)), Ok(Some(1)));
    /// assert_eq!(root.replace_leaf(None), Ok(Some(2)));
    /// assert!(root.is_empty());
    /// ```
    ///
    /// [`insert_leaf`]: #method.insert_leaf " "
    pub fn replace_leaf(&mut self, payload: Option<T>) -> Result<Option<T>, ReplaceLeafError<T>> {
        let node = self.node_mut();
        match payload {
            Some(payload) if node.has_children() => Err(ReplaceLeafError::HadChildren { payload }),
            Some(payload) => Ok(node.payload.replace(payload)),
            None => Ok(node.payload.take()),
        }
    }
    /// Moves all nodes of `subtree` into this tree, installing its root as the left child of this node. Returns the key which the root of the subtree got in this tree.
    ///
    /// # Errors
    /// Will fail if the node is a leaf or already has a left child. The subtree is returned back to the caller.
    ///
    /// # Example
    /// ```rust
    /// # use sapling::BinaryTree;
    /// let mut tree = BinaryTree::<_>::new();
    /// let mut root = tree.root_mut();
    ///
    /// let key = root.insert_left(BinaryTree::<_>::leaf('a')).unwrap();
    /// let left = root.left_child().unwrap();
    /// assert_eq!(left.raw_key(), &key);
    /// assert_eq!(left.obj(), Some(&'a'));
    ///
    /// // The slot is taken now:
    /// let rejected = root.insert_left(BinaryTree::<_>::leaf('b')).unwrap_err();
    /// assert_eq!(rejected.subtree().root().obj(), Some(&'b'));
    /// ```
    pub fn insert_left<K2, S2>(
        &mut self,
        subtree: BinaryTree<T, K2, S2>,
    ) -> Result<K, InsertChildError<BinaryTree<T, K2, S2>>>
    where
        S2: Storage<Element = Node<T, K2>, Key = K2>,
        K2: Clone + Debug + Eq,
    {
        self.insert_child(Side::Left, subtree)
    }
    /// Moves all nodes of `subtree` into this tree, installing its root as the right child of this node. Returns the key which the root of the subtree got in this tree.
    ///
    /// # Errors
    /// Will fail if the node is a leaf or already has a right child. The subtree is returned back to the caller.
    pub fn insert_right<K2, S2>(
        &mut self,
        subtree: BinaryTree<T, K2, S2>,
    ) -> Result<K, InsertChildError<BinaryTree<T, K2, S2>>>
    where
        S2: Storage<Element = Node<T, K2>, Key = K2>,
        K2: Clone + Debug + Eq,
    {
        self.insert_child(Side::Right, subtree)
    }
    /// Removes the left child together with everything below it, dropping all of their payloads. Returns `true` if there was a left child to remove, `false` otherwise.
    pub fn remove_left_child(&mut self) -> bool {
        match self.node_mut().left_child.take() {
            Some(left_child) => {
                trace!(parent = ?self.key, ?left_child, "removing left child");
                self.tree.remove_subtree(left_child);
                true
            }
            None => false,
        }
    }

    pub(super) fn tree(&self) -> &BinaryTree<T, K, S> {
        &*self.tree
    }
    pub(super) fn into_parts(self) -> (&'a BinaryTree<T, K, S>, K) {
        let Self { tree, key } = self;
        (&*tree, key)
    }

    fn init_child_key(&mut self, side: Side) -> Option<K> {
        if self.is_leaf() {
            return None;
        }
        Some(self.tree.materialize_child(&self.key, side))
    }
    fn init_sibling_key(&mut self, side: Side) -> Option<K> {
        let parent = self.node().parent.clone()?;
        let sibling = self.tree.materialize_child(&parent, side);
        // The left sibling of a left child is the node itself; only the right side is guarded
        if side == Side::Right && sibling == self.key {
            return None;
        }
        Some(sibling)
    }
    fn into_init(mut self, f: impl FnOnce(&mut Self, Side) -> Option<K>, side: Side) -> Result<Self, Self> {
        match f(&mut self, side) {
            Some(key) => {
                self.key = key;
                Ok(self)
            }
            None => Err(self),
        }
    }
    fn insert_child<K2, S2>(
        &mut self,
        side: Side,
        subtree: BinaryTree<T, K2, S2>,
    ) -> Result<K, InsertChildError<BinaryTree<T, K2, S2>>>
    where
        S2: Storage<Element = Node<T, K2>, Key = K2>,
        K2: Clone + Debug + Eq,
    {
        let node = self.node();
        if node.is_leaf() {
            return Err(InsertChildError::WasLeafNode { subtree });
        }
        if node.child(side).is_some() {
            return Err(InsertChildError::SlotOccupied { subtree });
        }
        Ok(self.tree.graft(&self.key, side, subtree))
    }
    fn reborrow(&mut self, key: K) -> NodeRefMut<'_, T, K, S> {
        NodeRefMut { tree: &mut *self.tree, key }
    }

    fn node(&self) -> &Node<T, K> {
        self.tree.get(&self.key)
    }
    fn node_mut(&mut self) -> &mut Node<T, K> {
        self.tree.get_mut(&self.key)
    }
}
