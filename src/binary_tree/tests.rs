use super::*;
use core::fmt::Debug;
use rstest::rstest;
use crate::util::testing::init_test_logging;

/// Walks the whole tree and checks the structural invariants: leaves have no children, every child points back at its owner and every stored node is reachable from the root.
fn assert_well_formed<T: Debug>(tree: &BinaryTree<T>) {
    assert!(tree.root().is_root());
    let mut pending = vec![tree.root()];
    let mut seen = 0;
    while let Some(node) = pending.pop() {
        seen += 1;
        assert_eq!(node.is_node(), !node.is_leaf());
        let children: Vec<_> = node.left_child().into_iter().chain(node.right_child()).collect();
        if node.is_leaf() {
            assert!(children.is_empty(), "leaf {:?} has children", node.raw_key());
        }
        for child in children {
            assert!(!child.is_root());
            assert_eq!(child.parent(), Some(node));
            pending.push(child);
        }
    }
    assert_eq!(seen, tree.len());
}

fn leaf_root() -> BinaryTree<u32> {
    BinaryTree::leaf(7)
}
fn half_built_root() -> BinaryTree<u32> {
    let mut tree = BinaryTree::<u32>::new();
    tree.root_mut().get_init_right_child().unwrap();
    tree
}
/// `(1, 2)` under the left slot of the root, `3` in the right one.
fn three_leaves() -> BinaryTree<u32> {
    let mut tree = BinaryTree::<u32>::new();
    let mut root = tree.root_mut();
    {
        let mut left = root.get_init_left_child().unwrap();
        left.get_init_left_child().unwrap().insert_leaf(1).unwrap();
        left.get_init_right_child().unwrap().insert_leaf(2).unwrap();
    }
    root.get_init_right_child().unwrap().insert_leaf(3).unwrap();
    tree
}

#[test]
fn builds_two_leaves_through_a_cursor() {
    init_test_logging();
    let mut tree = BinaryTree::<_>::new();
    let (a_key, b_key) = {
        let mut root = tree.root_mut();
        let mut a = root.get_init_left_child().unwrap();
        assert!(a.insert_leaf("x").is_ok());
        let a_key = *a.raw_key();
        let mut b = a.into_init_right_sibling().unwrap();
        assert!(b.insert_leaf("y").is_ok());
        (a_key, *b.raw_key())
    };

    let root = tree.root();
    assert!(root.is_full());
    assert_eq!(root.parent(), None);
    let a = tree.node(a_key).unwrap();
    let b = tree.node(b_key).unwrap();
    assert!(a.is_leaf() && b.is_leaf());
    assert_eq!(a.obj(), Some(&"x"));
    assert_eq!(b.obj(), Some(&"y"));
    assert_eq!(a.parent(), Some(root));
    assert_eq!(b.parent(), Some(root));
    assert_eq!(a.is_left_child(), Some(true));
    assert_eq!(b.is_right_child(), Some(true));
    assert_well_formed(&tree);
}

#[test]
fn materialized_nodes_start_empty() {
    let mut tree = BinaryTree::<u32>::new();
    let mut root = tree.root_mut();
    assert!(root.is_empty() && !root.is_full());
    let child = root.get_init_left_child().unwrap();
    assert!(child.is_empty());
    assert!(!child.is_full());
    assert!(child.is_node());
    assert!(!root.is_empty());
    assert!(!root.is_full());
    assert!(root.is_node());
}

#[test]
fn lazy_descent_is_idempotent() {
    let mut tree = BinaryTree::<u32>::new();
    let mut root = tree.root_mut();
    let first = *root.get_init_left_child().unwrap().raw_key();
    let second = *root.get_init_left_child().unwrap().raw_key();
    assert_eq!(first, second);
    let right = *root.get_init_right_child().unwrap().raw_key();
    assert_eq!(*root.get_init_right_child().unwrap().raw_key(), right);
    assert_eq!(tree.len(), 3);
}

#[rstest]
#[case::left(true)]
#[case::right(false)]
fn leaves_cannot_grow_children(#[case] left: bool) {
    let mut tree = leaf_root();
    let mut root = tree.root_mut();
    let child = if left {
        root.get_init_left_child()
    } else {
        root.get_init_right_child()
    };
    assert!(child.is_none());
    let root = if left {
        root.into_init_left_child()
    } else {
        root.into_init_right_child()
    };
    let root = root.unwrap_err();
    assert!(root.is_root());
    assert_eq!(root.obj(), Some(&7));
    assert_eq!(tree.len(), 1);
}

#[rstest]
#[case::leaf(leaf_root(), true)]
#[case::with_child(half_built_root(), false)]
fn insert_leaf_into_non_empty_node_fails(#[case] tree: BinaryTree<u32>, #[case] was_leaf: bool) {
    let mut tree = tree;
    let mut root = tree.root_mut();
    let (leaf, full, empty) = (root.is_leaf(), root.is_full(), root.is_empty());
    let err = root.insert_leaf(42).unwrap_err();
    assert_eq!(matches!(err, InsertLeafError::WasLeafNode { .. }), was_leaf);
    assert_eq!(err.payload(), 42);
    assert_eq!((root.is_leaf(), root.is_full(), root.is_empty()), (leaf, full, empty));
    assert_well_formed(&tree);
}

#[test]
fn insert_into_occupied_slot_keeps_existing_child() {
    let mut tree = three_leaves();
    let mut root = tree.root_mut();
    let right_before = *root.right_child().unwrap().raw_key();
    let err = root.insert_right(BinaryTree::<_>::leaf(99)).unwrap_err();
    assert!(matches!(err, InsertChildError::SlotOccupied { .. }));
    assert_eq!(err.into_subtree().root().obj(), Some(&99));
    let right = root.right_child().unwrap();
    assert_eq!(*right.raw_key(), right_before);
    assert_eq!(right.obj(), Some(&3));

    let err = root.insert_left(BinaryTree::<_>::new()).unwrap_err();
    assert!(matches!(err, InsertChildError::SlotOccupied { .. }));
    assert_eq!(tree.len(), 5);
    assert_well_formed(&tree);
}

#[test]
fn insert_into_leaf_fails() {
    let mut tree = leaf_root();
    let err = tree.root_mut().insert_left(BinaryTree::<_>::leaf(1)).unwrap_err();
    assert!(matches!(err, InsertChildError::WasLeafNode { .. }));
    assert_eq!(tree.len(), 1);
}

#[test]
fn grafted_subtree_is_relinked() {
    init_test_logging();
    let mut tree = BinaryTree::<u32>::new();
    let mut root = tree.root_mut();
    root.get_init_right_child().unwrap().insert_leaf(4).unwrap();
    let key = root.insert_left(three_leaves()).unwrap();

    let left = root.left_child().unwrap();
    assert_eq!(*left.raw_key(), key);
    assert_eq!(left.parent().map(|x| *x.raw_key()), Some(*root.raw_key()));
    let inner = left.left_child().unwrap();
    assert_eq!(inner.left_child().unwrap().obj(), Some(&1));
    assert_eq!(inner.right_child().unwrap().obj(), Some(&2));
    assert_eq!(left.right_child().unwrap().obj(), Some(&3));
    assert_eq!(tree.len(), 7);
    assert_well_formed(&tree);
}

#[test]
fn right_sibling_of_right_child_does_not_exist() {
    let mut tree = BinaryTree::<u32>::new();
    let mut right = tree.root_mut().into_init_right_child().unwrap();
    assert!(right.get_init_right_sibling().is_none());
    let right = right.into_init_right_sibling().unwrap_err();
    assert_eq!(right.is_right_child(), Some(true));
    // Only the slot the cursor came from exists
    assert_eq!(tree.len(), 2);
}

#[test]
fn left_sibling_of_left_child_is_itself() {
    let mut tree = BinaryTree::<u32>::new();
    let mut left = tree.root_mut().into_init_left_child().unwrap();
    let key = *left.raw_key();
    assert_eq!(*left.get_init_left_sibling().unwrap().raw_key(), key);
    let left = left.into_init_left_sibling().unwrap();
    assert_eq!(*left.raw_key(), key);
    assert_eq!(tree.len(), 2);
}

#[test]
fn left_sibling_is_materialized_from_the_right() {
    let mut tree = BinaryTree::<u32>::new();
    let right = tree.root_mut().into_init_right_child().unwrap();
    let mut left = right.into_init_left_sibling().unwrap();
    assert!(left.is_empty());
    assert_eq!(left.is_left_child(), Some(true));
    left.insert_leaf(0).unwrap();
    assert!(tree.root().is_full());
    assert_well_formed(&tree);
}

#[test]
fn root_has_no_siblings() {
    let mut tree = BinaryTree::<u32>::new();
    let mut root = tree.root_mut();
    assert!(root.get_init_left_sibling().is_none());
    assert!(root.get_init_right_sibling().is_none());
    assert!(root.parent_mut().is_none());
    let root = root.into_parent().unwrap_err();
    assert!(root.is_root());
    assert_eq!(tree.len(), 1);
}

#[test]
fn removing_left_child_drops_whole_subtree() {
    init_test_logging();
    let mut tree = three_leaves();
    let left_key = *tree.root().left_child().unwrap().raw_key();
    let mut root = tree.root_mut();
    assert!(root.remove_left_child());
    assert!(root.left_child().is_none());
    assert!(!root.remove_left_child());
    assert!(root.right_child().is_some());
    assert!(!root.is_full());

    assert_eq!(tree.len(), 2);
    assert_eq!(tree.num_holes(), 3);
    assert!(tree.node(left_key).is_none());
    assert_well_formed(&tree);
}

#[test]
fn replace_leaf_keeps_leaves_childless() {
    let mut tree = half_built_root();
    let mut root = tree.root_mut();
    let err = root.replace_leaf(Some(5)).unwrap_err();
    assert_eq!(err.payload(), 5);
    assert!(root.is_node());
    // Swapping nothing in is always allowed
    assert_eq!(root.replace_leaf(None), Ok(None));

    let mut right = root.right_child_mut().unwrap();
    assert_eq!(right.replace_leaf(Some(1)), Ok(None));
    assert!(right.is_leaf());
    assert_eq!(right.replace_leaf(Some(2)), Ok(Some(1)));
    assert_eq!(right.replace_leaf(None), Ok(Some(2)));
    assert!(right.is_empty());
    assert_well_formed(&tree);
}

#[test]
fn payloads_can_be_modified_in_place() {
    let mut tree = three_leaves();
    let mut root = tree.root_mut();
    assert!(root.obj_mut().is_none());
    *root.right_child_mut().unwrap().obj_mut().unwrap() += 10;
    let payload = tree.root_mut().into_init_right_child().unwrap().into_obj_mut().unwrap();
    *payload *= 2;
    assert_eq!(tree.root().right_child().unwrap().obj(), Some(&26));
}

#[test]
fn cursor_resumes_from_stored_key() {
    let mut tree = BinaryTree::<u32>::new();
    let key = tree.root_mut().into_init_left_child().unwrap().into_raw_key();
    let mut cursor = tree.node_mut(key).unwrap();
    cursor.insert_leaf(8).unwrap();
    let right = cursor.into_init_right_sibling().unwrap().into_raw_key();
    assert!(tree.node(right).unwrap().is_empty());

    assert!(tree.root_mut().remove_left_child());
    assert!(tree.node_mut(key).is_none());
}

#[test]
fn errors_describe_themselves() {
    assert_eq!(
        InsertLeafError::WasLeafNode { payload: () }.to_string(),
        "the node already was a leaf",
    );
    assert_eq!(
        InsertLeafError::HadChildren { payload: () }.to_string(),
        "the node already had children",
    );
    assert_eq!(
        ReplaceLeafError::HadChildren { payload: () }.to_string(),
        "cannot put a payload into a node which has children",
    );
    assert_eq!(
        InsertChildError::SlotOccupied { subtree: () }.to_string(),
        "the child slot was already occupied",
    );
    assert_eq!(
        InsertChildError::WasLeafNode { subtree: () }.to_string(),
        "the node was a leaf, which cannot have children",
    );
}

#[test]
fn payloads_are_dropped_with_their_subtree() {
    use std::rc::Rc;
    let payload = Rc::new(());
    let mut tree = BinaryTree::<Rc<()>>::new();
    let mut root = tree.root_mut();
    {
        let mut left = root.get_init_left_child().unwrap();
        left.get_init_left_child().unwrap().insert_leaf(Rc::clone(&payload)).unwrap();
        left.get_init_right_child().unwrap().insert_leaf(Rc::clone(&payload)).unwrap();
    }
    assert_eq!(Rc::strong_count(&payload), 3);
    root.remove_left_child();
    assert_eq!(Rc::strong_count(&payload), 1);
}

#[cfg(feature = "slotmap")]
mod slotmap_storage {
    use super::*;
    use slotmap::{DefaultKey, HopSlotMap};

    #[test]
    fn grows_on_slotmap() {
        let mut tree = SlotMapBinaryTree::<&str>::new();
        let mut left = tree.root_mut().into_init_left_child().unwrap();
        left.insert_leaf("a").unwrap();
        let mut right = left.into_init_right_sibling().unwrap();
        right.insert_leaf("b").unwrap();
        let root = NodeRef::from(right.into_parent().unwrap());
        assert!(root.is_full());
        assert_eq!(root.right_child().unwrap().obj(), Some(&"b"));
    }

    #[test]
    fn grafts_across_storages() {
        let mut tree: BinaryTree<u32, DefaultKey, HopSlotMap<DefaultKey, Node<u32, DefaultKey>>> =
            BinaryTree::new();
        let mut root = tree.root_mut();
        root.insert_left(three_leaves()).unwrap();
        assert!(root.remove_left_child());
        assert_eq!(tree.len(), 1);
    }
}
