use bstree::avl::{Rotation, Tree};

use std::collections::BTreeSet;

use crate::{ascending, Op};

fn keys(tree: &Tree<i8>) -> Vec<i8> {
    tree.in_order().into_iter().map(|n| *n.key()).collect()
}

#[quickcheck]
fn balanced_after_every_op(ops: Vec<Op<i8>>) -> bool {
    let mut tree = Tree::new();
    let mut set = BTreeSet::new();
    for op in &ops {
        match op {
            Op::Insert(k) => {
                tree = tree.insert(*k);
                set.insert(*k);
            }
            Op::Remove(k) => {
                tree = tree.delete(k);
                set.remove(k);
            }
        }
        if !tree.is_balanced() || !ascending(&keys(&tree)) {
            return false;
        }
    }

    keys(&tree) == set.into_iter().collect::<Vec<_>>()
}

#[quickcheck]
fn insert_idempotent(xs: Vec<i8>, k: i8) -> bool {
    let once = Tree::create(xs).insert(k);

    once.insert(k).ptr_eq(&once)
}

#[quickcheck]
fn height_is_logarithmic(xs: Vec<i8>) -> bool {
    let tree = Tree::create(xs);
    let n = tree.size() as f64;

    // An AVL tree is never more than ~1.44 times taller than a perfect one.
    tree.height() as f64 <= 1.45 * (n + 2.0).log2()
}

#[quickcheck]
fn unrotated_tree_matches_plain_bst(xs: Vec<i8>) -> bool {
    let mut rotations = 0;
    let mut count = |_: Rotation, _: &i8| rotations += 1;
    let avl = xs
        .iter()
        .fold(Tree::new(), |tree, &x| tree.insert_with(x, &mut count));
    let plain = bstree::bst::Tree::create(xs);

    // Without a rotation, AVL insertion is plain BST insertion.
    let avl_shape: Vec<i8> = avl.level_order().into_iter().map(|n| *n.key()).collect();
    let plain_shape: Vec<i8> = plain.level_order().into_iter().map(|n| *n.key()).collect();
    rotations > 0 || avl_shape == plain_shape
}

#[quickcheck]
fn same_keys_as_plain_bst(xs: Vec<i8>) -> bool {
    let avl = Tree::create(xs.clone());
    let plain = bstree::bst::Tree::create(xs);
    let plain_keys: Vec<i8> = plain.in_order().into_iter().map(|n| *n.key()).collect();

    keys(&avl) == plain_keys
}
