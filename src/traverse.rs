//! Ordered walks and folds over any [`BinaryNode`] tree.
//!
//! Every function here takes the root of a tree (`None` for the empty tree)
//! and only ever reads it. The walks are iterative, driven by an explicit
//! stack or queue, so a degenerate (list-shaped) tree can't overflow the
//! call stack. Each walk eagerly collects its nodes into a `Vec`; calling it
//! again produces the same sequence.

use std::collections::VecDeque;

use crate::node::BinaryNode;

/// Left subtree, node, right subtree. For a valid BST the keys come out
/// ascending.
pub fn in_order<N: BinaryNode>(root: Option<&N>) -> Vec<&N> {
    let mut nodes = Vec::new();
    let mut stack = Vec::new();
    let mut current = root;

    loop {
        while let Some(node) = current {
            stack.push(node);
            current = node.left_node();
        }
        match stack.pop() {
            Some(node) => {
                nodes.push(node);
                current = node.right_node();
            }
            None => return nodes,
        }
    }
}

/// Node, left subtree, right subtree.
pub fn pre_order<N: BinaryNode>(root: Option<&N>) -> Vec<&N> {
    reduce(root, Vec::new(), |mut nodes, node| {
        nodes.push(node);
        nodes
    })
}

/// Left subtree, right subtree, node.
pub fn post_order<N: BinaryNode>(root: Option<&N>) -> Vec<&N> {
    // Visiting node, right, left and reversing gives left, right, node.
    let mut nodes = Vec::new();
    let mut stack: Vec<&N> = root.into_iter().collect();
    while let Some(node) = stack.pop() {
        nodes.push(node);
        stack.extend(node.left_node());
        stack.extend(node.right_node());
    }
    nodes.reverse();
    nodes
}

/// Breadth first: top to bottom, left to right within a level.
pub fn level_order<N: BinaryNode>(root: Option<&N>) -> Vec<&N> {
    let mut nodes = Vec::new();
    let mut queue = VecDeque::new();
    queue.push_back(root);

    while let Some(next) = queue.pop_front() {
        if let Some(node) = next {
            nodes.push(node);
            queue.push_back(node.left_node());
            queue.push_back(node.right_node());
        }
    }
    nodes
}

/// A pre-order fold. `visit` combines each node into the accumulator, then
/// the left subtree is folded with the result, then the right subtree.
/// The empty tree returns `init` untouched.
pub fn reduce<'a, N, A, F>(root: Option<&'a N>, init: A, mut visit: F) -> A
where
    N: BinaryNode,
    F: FnMut(A, &'a N) -> A,
{
    let mut acc = init;
    let mut stack: Vec<&N> = root.into_iter().collect();
    while let Some(node) = stack.pop() {
        acc = visit(acc, node);
        // Right first so the left subtree is popped (and folded) first.
        stack.extend(node.right_node());
        stack.extend(node.left_node());
    }
    acc
}

/// The number of nodes in the tree.
pub fn size<N: BinaryNode>(root: Option<&N>) -> usize {
    reduce(root, 0, |count, _| count + 1)
}

/// The number of nodes on the longest root-to-leaf path. The empty tree has
/// a height of 0 and a lone node a height of 1.
pub fn height<N: BinaryNode>(root: Option<&N>) -> usize {
    let mut tallest = 0;
    let mut stack: Vec<(&N, usize)> = root.into_iter().map(|node| (node, 1)).collect();
    while let Some((node, depth)) = stack.pop() {
        tallest = tallest.max(depth);
        stack.extend(node.left_node().map(|child| (child, depth + 1)));
        stack.extend(node.right_node().map(|child| (child, depth + 1)));
    }
    tallest
}

/// Structural and value equality: both trees have the same shape and equal
/// keys in every position.
pub fn compare<N: BinaryNode>(a: Option<&N>, b: Option<&N>) -> bool
where
    N::Key: PartialEq,
{
    let mut pairs = vec![(a, b)];
    while let Some(pair) = pairs.pop() {
        match pair {
            (None, None) => {}
            (Some(a), Some(b)) => {
                if a.key() != b.key() {
                    return false;
                }
                pairs.push((a.left_node(), b.left_node()));
                pairs.push((a.right_node(), b.right_node()));
            }
            _ => return false,
        }
    }
    true
}
