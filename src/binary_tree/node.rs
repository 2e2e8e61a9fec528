use core::fmt::Debug;
use arrayvec::ArrayVec;

/// A node of a binary tree.
///
/// Created by the binary tree internally and only publicly exposed so that binary tree storages' generic arguments could be specified.
///
/// The shape of the node is derived from which fields are populated: a node with a payload is a leaf and never has children, a node without one is an internal node with zero, one or two children.
#[derive(Copy, Clone, Debug, Hash)]
pub struct Node<T, K>
where K: Clone + Debug + Eq,
{
    pub(super) payload: Option<T>,
    pub(super) left_child: Option<K>,
    pub(super) right_child: Option<K>,
    pub(super) parent: Option<K>,
}
impl<T, K> Node<T, K>
where K: Clone + Debug + Eq,
{
    /// Creates a root node, which is a leaf if a payload is given and an empty node otherwise.
    #[inline(always)]
    pub(super) fn root(payload: Option<T>) -> Self {
        Self {
            payload,
            left_child: None,
            right_child: None,
            parent: None,
        }
    }
    /// Creates an empty internal node which is to be put into one of the child slots of `parent`.
    #[inline(always)]
    pub(super) fn empty_child(parent: K) -> Self {
        Self {
            payload: None,
            left_child: None,
            right_child: None,
            parent: Some(parent),
        }
    }

    #[inline(always)]
    pub(super) fn is_leaf(&self) -> bool {
        self.payload.is_some()
    }
    #[inline(always)]
    pub(super) fn has_children(&self) -> bool {
        self.left_child.is_some() || self.right_child.is_some()
    }
    #[inline(always)]
    pub(super) fn is_empty(&self) -> bool {
        !self.is_leaf() && !self.has_children()
    }
    #[inline(always)]
    pub(super) fn is_full(&self) -> bool {
        (self.left_child.is_some() && self.right_child.is_some()) || self.is_leaf()
    }
    #[inline]
    pub(super) fn child(&self, side: Side) -> Option<&K> {
        match side {
            Side::Left => self.left_child.as_ref(),
            Side::Right => self.right_child.as_ref(),
        }
    }
    #[inline]
    pub(super) fn child_mut(&mut self, side: Side) -> &mut Option<K> {
        match side {
            Side::Left => &mut self.left_child,
            Side::Right => &mut self.right_child,
        }
    }
    /// Keys of the children which are present, left one first.
    pub(super) fn children(&self) -> ArrayVec<[K; 2]> {
        self.left_child
            .iter()
            .chain(self.right_child.iter())
            .cloned()
            .collect()
    }
}

/// One of the two child slots of a node.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub(super) enum Side {
    Left,
    Right,
}
