//! Binary trees which are grown lazily through a cursor.
//!
//! Every node is in one of three shapes, derived from which of its fields are populated:
//! - *empty* — no payload and no children, which is what a freshly materialized node looks like;
//! - *internal* — no payload, one or two children;
//! - *leaf* — a payload and never any children.
//!
//! Nodes own their children and store a key to their parent, which lets a [`NodeRefMut`] cursor move up, down and sideways. The cursor creates empty internal nodes in vacant slots as it visits them, so the shape of the tree can be discovered while it's being decoded from a compact description instead of being known upfront.
//!
//! # Example
//! ```rust
//! use sapling::binary_tree::{BinaryTree, NodeRef};
//!
//! // Create the tree. The turbofish there is needed to state that we are using the default key
//! // and storage instead of asking the compiler to infer them, which would be impossible.
//! let mut tree = BinaryTree::<_>::new();
//!
//! // Walk into the left child, which does not exist yet and is created on the spot:
//! let mut cursor = tree.root_mut().into_init_left_child().unwrap();
//! cursor.insert_leaf("x").unwrap();
//! // Pivot over to the other side and finish it off too:
//! let mut cursor = cursor.into_init_right_sibling().unwrap();
//! cursor.insert_leaf("y").unwrap();
//!
//! // Let's return to an immutable reference and look at our tree.
//! let root = NodeRef::from(cursor.into_parent().unwrap());
//! assert!(root.is_full());
//! assert_eq!(root.left_child().unwrap().obj(), Some(&"x"));
//! assert_eq!(root.right_child().unwrap().obj(), Some(&"y"));
//! ```

use thiserror::Error;

mod base;
mod node;
mod node_ref;
mod node_ref_mut;

pub use node::Node;
pub use node_ref::NodeRef;
pub use node_ref_mut::NodeRefMut;
pub use base::BinaryTree;

/// The error type returned by [`NodeRefMut::insert_leaf`].
///
/// [`NodeRefMut::insert_leaf`]: struct.NodeRefMut.html#method.insert_leaf " "
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Error)]
pub enum InsertLeafError<T> {
    /// The node already was a leaf.
    #[error("the node already was a leaf")]
    WasLeafNode {
        /// The provided payload, which was deemed useless when the operation failed and is returned to the caller to avoid dropping it.
        payload: T,
    },
    /// The node already had children, and leaves cannot have any.
    #[error("the node already had children")]
    HadChildren {
        /// The provided payload, which was deemed useless when the operation failed and is returned to the caller to avoid dropping it.
        payload: T,
    },
}
impl<T> InsertLeafError<T> {
    /// Extracts the provided payload, which was deemed useless when the operation failed.
    #[allow(clippy::missing_const_for_fn)] // Clippy has no idea what a destructor is
    pub fn payload(self) -> T {
        match self {
            Self::WasLeafNode { payload } | Self::HadChildren { payload } => payload,
        }
    }
}

/// The error type returned by [`NodeRefMut::replace_leaf`].
///
/// [`NodeRefMut::replace_leaf`]: struct.NodeRefMut.html#method.replace_leaf " "
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Error)]
pub enum ReplaceLeafError<T> {
    /// The node had children, which a leaf cannot have, so no payload can be put into it.
    #[error("cannot put a payload into a node which has children")]
    HadChildren {
        /// The provided payload, returned to the caller to avoid dropping it.
        payload: T,
    },
}
impl<T> ReplaceLeafError<T> {
    /// Extracts the provided payload, which was deemed useless when the operation failed.
    #[allow(clippy::missing_const_for_fn)]
    pub fn payload(self) -> T {
        match self {
            Self::HadChildren { payload } => payload,
        }
    }
}

/// The error type returned by [`NodeRefMut::insert_left`] and [`NodeRefMut::insert_right`].
///
/// [`NodeRefMut::insert_left`]: struct.NodeRefMut.html#method.insert_left " "
/// [`NodeRefMut::insert_right`]: struct.NodeRefMut.html#method.insert_right " "
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Error)]
pub enum InsertChildError<X> {
    /// The node was a leaf, which cannot have children.
    #[error("the node was a leaf, which cannot have children")]
    WasLeafNode {
        /// The provided subtree, returned to the caller to avoid dropping it.
        subtree: X,
    },
    /// The targeted child slot was already taken.
    #[error("the child slot was already occupied")]
    SlotOccupied {
        /// The provided subtree, returned to the caller to avoid dropping it.
        subtree: X,
    },
}
impl<X> InsertChildError<X> {
    /// Returns a reference to the provided subtree.
    pub fn subtree(&self) -> &X {
        match self {
            Self::WasLeafNode { subtree } | Self::SlotOccupied { subtree } => subtree,
        }
    }
    /// Extracts the provided subtree, which was deemed useless when the operation failed.
    #[allow(clippy::missing_const_for_fn)]
    pub fn into_subtree(self) -> X {
        match self {
            Self::WasLeafNode { subtree } | Self::SlotOccupied { subtree } => subtree,
        }
    }
}

/// A binary tree which uses a `SlotMap` as backing storage, with generational keys.
#[cfg(feature = "slotmap")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "slotmap")))]
pub type SlotMapBinaryTree<T> =
    BinaryTree<T, slotmap::DefaultKey, slotmap::SlotMap<slotmap::DefaultKey, Node<T, slotmap::DefaultKey>>>;

#[cfg(test)]
mod tests;
