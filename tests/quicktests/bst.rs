use bstree::bst::Tree;
use bstree::Error;

use std::collections::BTreeSet;
use std::ops::Bound::{Excluded, Unbounded};

use crate::{ascending, Op};

/// Applies a set of operations to a tree and a set.
/// This way we can ensure that after a random smattering of inserts
/// and deletes we have the same keys in both.
fn do_ops(ops: &[Op<i8>], mut bst: Tree<i8>, set: &mut BTreeSet<i8>) -> Tree<i8> {
    for op in ops {
        match op {
            Op::Insert(k) => {
                bst = bst.insert(*k);
                set.insert(*k);
            }
            Op::Remove(k) => {
                bst = bst.delete(k);
                set.remove(k);
            }
        }
    }

    bst
}

fn keys(tree: &Tree<i8>) -> Vec<i8> {
    tree.in_order().into_iter().map(|n| *n.key()).collect()
}

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
    let mut set = BTreeSet::new();
    let tree = do_ops(&ops, Tree::new(), &mut set);

    keys(&tree) == set.into_iter().collect::<Vec<_>>()
}

#[quickcheck]
fn in_order_ascending(ops: Vec<Op<i8>>) -> bool {
    let tree = do_ops(&ops, Tree::new(), &mut BTreeSet::new());

    ascending(&keys(&tree)) && ascending(&keys(&tree.balance()))
}

#[quickcheck]
fn insert_idempotent(xs: Vec<i8>, k: i8) -> bool {
    let once = Tree::create(xs).insert(k);
    let twice = once.insert(k);

    twice.compare(&once) && twice.ptr_eq(&once)
}

#[quickcheck]
fn delete_then_find(xs: Vec<i8>, k: i8) -> bool {
    Tree::create(xs).delete(&k).find(&k).is_none()
}

#[quickcheck]
fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    let tree = deletes
        .iter()
        .fold(Tree::create(xs.clone()), |tree, delete| tree.delete(delete));

    deletes.iter().all(|x| !tree.contains(x))
        && xs
            .iter()
            .filter(|x| !deletes.contains(x))
            .all(|x| tree.contains(x))
}

#[quickcheck]
fn round_trip_through_in_order(xs: Vec<i8>) -> bool {
    let tree = Tree::create(xs);
    let a = Tree::create(keys(&tree));
    let b = Tree::create(keys(&tree));

    a.compare(&b) && keys(&a) == keys(&tree)
}

#[quickcheck]
fn balance_height_bound(xs: Vec<i8>) -> bool {
    let tree = Tree::create(xs);
    let balanced = tree.balance();
    let n = balanced.size();
    // ceil(log2(n + 1)) is the bit length of n.
    let bound = (usize::BITS - n.leading_zeros()) as usize;

    balanced.height() <= bound && keys(&balanced) == keys(&tree)
}

#[quickcheck]
fn neighbours_match_set(xs: Vec<i8>, k: i8) -> bool {
    let tree = Tree::create(xs.clone());
    let set: BTreeSet<i8> = xs.into_iter().collect();
    let key = |n: Option<&bstree::bst::Node<i8>>| n.map(|n| *n.key());

    if set.is_empty() {
        return tree.next_smallest(&k).err() == Some(Error::EmptyTree);
    }
    if !set.contains(&k) {
        return tree.next_smallest(&k).err() == Some(Error::NotFound)
            && tree.next_largest(&k).err() == Some(Error::NotFound);
    }
    tree.next_smallest(&k).map(key) == Ok(set.range(..k).next_back().copied())
        && tree.next_largest(&k).map(key) == Ok(set.range((Excluded(k), Unbounded)).next().copied())
}

#[quickcheck]
fn aggregates_match_set(xs: Vec<i8>) -> bool {
    let tree: Tree<i64> = xs.iter().map(|&x| i64::from(x)).collect();
    let set: BTreeSet<i64> = xs.iter().map(|&x| i64::from(x)).collect();

    tree.size() == set.len()
        && tree.sum() == set.iter().sum::<i64>()
        && tree.smallest().ok().map(|n| *n.key()) == set.iter().next().copied()
        && tree.largest().ok().map(|n| *n.key()) == set.iter().next_back().copied()
}

#[test]
fn compare_depends_on_shape() {
    assert!(Tree::create(vec![2, 3, 1]).compare(&Tree::create(vec![2, 3, 1])));
    assert!(!Tree::create(vec![2, 3, 1]).compare(&Tree::create(vec![3, 2, 1])));
}
