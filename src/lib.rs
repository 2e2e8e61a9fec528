//! Implements an arena-allocated binary tree which is grown lazily through a cursor.
//!
//! # Overview
//! The tree is built incrementally rather than constructed all at once: a builder holds a [`NodeRefMut`] cursor, walks into children and siblings which do not exist yet and the tree creates the missing empty nodes as they are visited. Leaves receive their payloads one by one, and complete subtrees built elsewhere can be grafted into vacant slots. This is the shape of work done when decoding a compact description of a binary structure, such as a script tree given as a list of leaf depths, where the layout is only known once the last leaf has been placed.
//!
//! Nodes are stored using a technique called ["arena-allocated trees"][arena tree blog post]: instead of using pointers to link nodes, keys into a backing storage are used. Children are owned top-down, while the key of the parent lets any node find its way back up without owning anything. Removing a child removes its entire subtree from the storage.
//!
//! # Storage
//! The trait used for defining the "arena" type is `Storage`. By default, trees use [`SparseVec`], a `Vec` which leaves holes behind removed nodes and fills them with new ones, so that the keys of live nodes never change.
//!
//! # Feature flags
//! - `slotmap` — adds `Storage` trait implementations for [`SlotMap`], [`HopSlotMap`] and [`DenseSlotMap`], which give generational keys.
//! - `doc_cfg` — marks feature-gated items in the documentation. **Requires a nightly compiler.**
//!
//! # Logging
//! Node materialization, subtree grafting and subtree removal are reported through [`tracing`] at the `trace` level. No subscriber is installed by the crate.
//!
//! [`SparseVec`]: storage/struct.SparseVec.html " "
//! [`NodeRefMut`]: binary_tree/struct.NodeRefMut.html " "
//! [`SlotMap`]: https://docs.rs/slotmap/*/slotmap/struct.SlotMap.html " "
//! [`HopSlotMap`]: https://docs.rs/slotmap/*/slotmap/hop/struct.HopSlotMap.html " "
//! [`DenseSlotMap`]: https://docs.rs/slotmap/*/slotmap/dense/struct.DenseSlotMap.html " "
//! [`tracing`]: https://docs.rs/tracing " "
//! [arena tree blog post]: https://dev.to/deciduously/no-more-tears-no-more-knots-arena-allocated-trees-in-rust-44k6 " "

#![warn(
    rust_2018_idioms,
    clippy::cargo,
    clippy::nursery,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unused_qualifications,
    variant_size_differences,
    clippy::cast_lossless,
    clippy::checked_conversions,
    clippy::explicit_iter_loop,
    clippy::explicit_into_iter_loop,
    clippy::map_flatten,
    clippy::map_unwrap_or,
    clippy::fn_params_excessive_bools,
    clippy::implicit_saturating_sub,
    clippy::inefficient_to_string,
    clippy::items_after_statements,
    clippy::let_unit_value,
    clippy::macro_use_imports,
    clippy::match_same_arms,
    clippy::match_wildcard_for_single_variants,
    clippy::mut_mut,
    clippy::needless_continue,
    clippy::needless_pass_by_value,
    clippy::option_option,
    clippy::range_plus_one,
    clippy::range_minus_one,
    clippy::redundant_closure_for_method_calls,
    clippy::same_functions_in_if_condition,
    clippy::similar_names,
    clippy::single_match_else,
    clippy::type_repetition_in_bounds,
    clippy::trivially_copy_pass_by_ref,
    clippy::unnested_or_patterns,
    clippy::unused_self,
    clippy::used_underscore_binding,
    clippy::clone_on_ref_ptr,
    clippy::dbg_macro,
    clippy::get_unwrap,
    clippy::rest_pat_in_fully_bound_structs,
    clippy::unneeded_field_pattern,
    clippy::unwrap_used, // Only .expect() allowed
    clippy::use_debug,
)]
#![deny(
    anonymous_parameters,
    bare_trait_objects,
    clippy::exit,
)]
#![allow(clippy::use_self)]
#![cfg_attr(feature = "doc_cfg", feature(doc_cfg))]

pub mod storage;
#[doc(no_inline)]
pub use storage::{Storage, DefaultStorage};

pub mod binary_tree;
pub use binary_tree::{BinaryTree, NodeRef, NodeRefMut};

/// A prelude for using Sapling, containing the most used types in a renamed form for safe glob-importing.
pub mod prelude {
    #[doc(no_inline)]
    pub use crate::storage::{
        Storage as TreeStorage,
        SparseVec as SparseTreeStorage,
        DefaultStorage as DefaultTreeStorage,
    };
    #[doc(no_inline)]
    pub use crate::binary_tree::{
        BinaryTree,
        NodeRef as BinaryTreeNodeRef,
        NodeRefMut as BinaryTreeNodeRefMut,
        InsertLeafError,
        ReplaceLeafError,
        InsertChildError,
    };
}

pub(crate) mod util;
