use core::fmt::Debug;
use crate::storage::{Storage, DefaultStorage};
use super::{BinaryTree, Node, NodeRefMut};

/// A reference to a node in a binary tree.
///
/// Since this type does not point to the node directly, but rather the tree the node is in and the key of the node in the storage, it can be used to traverse the tree.
#[derive(Debug)]
pub struct NodeRef<'a, T, K = usize, S = DefaultStorage<Node<T, K>>>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    tree: &'a BinaryTree<T, K, S>,
    key: K,
}
impl<'a, T, K, S> NodeRef<'a, T, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    /// Creates a new `NodeRef` pointing to the specified key in the storage, or `None` if it does not exist.
    #[inline]
    pub fn new_raw(tree: &'a BinaryTree<T, K, S>, key: K) -> Option<Self> {
        if tree.storage.contains_key(&key) {
            Some(unsafe {
                // SAFETY: we just did a key check
                Self::new_raw_unchecked(tree, key)
            })
        } else {
            None
        }
    }
    /// Creates a new `NodeRef` pointing to the specified key in the storage without doing key checking.
    ///
    /// # Safety
    /// Causes *immediate* undefined behavior if the specified key is not present in the storage.
    #[inline(always)]
    pub unsafe fn new_raw_unchecked(tree: &'a BinaryTree<T, K, S>, key: K) -> Self {
        Self { tree, key }
    }
    /// Returns a reference the raw storage key for the node.
    #[inline(always)]
    pub fn raw_key(&self) -> &K {
        &self.key
    }
    /// Consumes the reference and returns the underlying raw storage key for the node.
    #[inline(always)]
    pub fn into_raw_key(self) -> K {
        self.key
    }
    /// Returns a reference to the parent node of the pointee, or `None` if it's the root node.
    #[inline]
    pub fn parent(&self) -> Option<Self> {
        self.node().parent.as_ref().map(|x| unsafe {
            // SAFETY: nodes can never have nonexistent parents
            Self::new_raw_unchecked(self.tree, x.clone())
        })
    }
    /// Returns a reference to the left child, or `None` if the slot is vacant. Never creates any nodes.
    #[inline]
    pub fn left_child(&self) -> Option<Self> {
        self.node().left_child.as_ref().map(|x| unsafe {
            // SAFETY: child keys are guaranteed to be valid
            Self::new_raw_unchecked(self.tree, x.clone())
        })
    }
    /// Returns a reference to the right child, or `None` if the slot is vacant. Never creates any nodes.
    #[inline]
    pub fn right_child(&self) -> Option<Self> {
        self.node().right_child.as_ref().map(|x| unsafe {
            // SAFETY: as above
            Self::new_raw_unchecked(self.tree, x.clone())
        })
    }
    /// Returns `true` if the node is the root node, `false` otherwise.
    #[inline(always)]
    #[allow(clippy::missing_const_for_fn)]
    pub fn is_root(&self) -> bool {
        self.node().parent.is_none()
    }
    /// Returns `true` if the node is a *leaf*, i.e. holds a payload; `false` otherwise. Leaves never have children.
    #[inline(always)]
    pub fn is_leaf(&self) -> bool {
        self.node().is_leaf()
    }
    /// Returns `true` if the node is an *internal node*, i.e. holds no payload, regardless of whether it has any children yet; `false` otherwise.
    #[inline(always)]
    pub fn is_node(&self) -> bool {
        !self.is_leaf()
    }
    /// Returns `true` if the node has neither children nor a payload, which is the state of a freshly materialized node; `false` otherwise.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.node().is_empty()
    }
    /// Returns `true` if the node needs no further construction, i.e. is a leaf or has both children; `false` otherwise.
    ///
    /// This does not look at the children themselves, which may still be empty.
    #[inline(always)]
    pub fn is_full(&self) -> bool {
        self.node().is_full()
    }
    /// Returns a reference to the payload if the node is a leaf, `None` otherwise.
    #[inline(always)]
    pub fn obj(&self) -> Option<&'a T> {
        self.tree.get(&self.key).payload.as_ref()
    }
    /// Returns `true` if the node is the left child of its parent, `false` if it's the right one and `None` if it's the root node.
    pub fn is_left_child(&self) -> Option<bool> {
        let parent = self.parent()?;
        Some(parent.node().left_child.as_ref() == Some(&self.key))
    }
    /// Returns `true` if the node is the right child of its parent, `false` if it's the left one and `None` if it's the root node.
    pub fn is_right_child(&self) -> Option<bool> {
        let parent = self.parent()?;
        Some(parent.node().right_child.as_ref() == Some(&self.key))
    }

    #[inline(always)]
    fn node(&self) -> &'a Node<T, K> {
        self.tree.get(&self.key)
    }
}
impl<T, K, S> Copy for NodeRef<'_, T, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Copy + Debug + Eq,
{}
impl<T, K, S> Clone for NodeRef<'_, T, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    #[inline(always)]
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            key: self.key.clone(),
        }
    }
}
/// Two references are equal when they point to the same node of the same tree.
impl<T, K, S> PartialEq for NodeRef<'_, T, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    fn eq(&self, other: &Self) -> bool {
        core::ptr::eq(self.tree, other.tree) && self.key == other.key
    }
}
impl<T, K, S> Eq for NodeRef<'_, T, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{}
impl<'a, T, K, S> From<NodeRefMut<'a, T, K, S>> for NodeRef<'a, T, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    fn from(op: NodeRefMut<'a, T, K, S>) -> Self {
        let (tree, key) = op.into_parts();
        NodeRef { tree, key }
    }
}
impl<'a, 'b: 'a, T, K, S> From<&'a NodeRefMut<'b, T, K, S>> for NodeRef<'a, T, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    fn from(op: &'a NodeRefMut<'b, T, K, S>) -> Self {
        NodeRef {
            tree: op.tree(),
            key: op.raw_key().clone(),
        }
    }
}
