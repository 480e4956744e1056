//! Key lookups, bounds and neighbour queries over any [`BinaryNode`] tree.
//!
//! All of these descend from the root following the BST invariant so they
//! cost `O(height)`. Nodes carry no parent links, so the neighbour queries
//! re-descend from the root they are given instead of walking upwards.

use std::cmp::Ordering;

use crate::node::BinaryNode;
use crate::Error;

/// Finds the node holding `key`.
pub fn find<'a, N>(root: Option<&'a N>, key: &N::Key) -> Option<&'a N>
where
    N: BinaryNode,
    N::Key: Ord,
{
    let mut current = root;
    while let Some(node) = current {
        current = match key.cmp(node.key()) {
            Ordering::Less => node.left_node(),
            Ordering::Equal => return Some(node),
            Ordering::Greater => node.right_node(),
        };
    }
    None
}

/// The left-most node, holding the smallest key.
pub fn smallest<N: BinaryNode>(root: Option<&N>) -> Result<&N, Error> {
    let mut node = root.ok_or(Error::EmptyTree)?;
    while let Some(left) = node.left_node() {
        node = left;
    }
    Ok(node)
}

/// The right-most node, holding the largest key.
pub fn largest<N: BinaryNode>(root: Option<&N>) -> Result<&N, Error> {
    let mut node = root.ok_or(Error::EmptyTree)?;
    while let Some(right) = node.right_node() {
        node = right;
    }
    Ok(node)
}

/// The in-order predecessor of `key`: the node with the greatest key less
/// than `key`.
///
/// Returns `Ok(None)` if `key` is the smallest key in the tree, and
/// [`Error::NotFound`] if `key` isn't in the tree at all.
pub fn next_smallest<'a, N>(root: Option<&'a N>, key: &N::Key) -> Result<Option<&'a N>, Error>
where
    N: BinaryNode,
    N::Key: Ord,
{
    let mut current = Some(root.ok_or(Error::EmptyTree)?);
    // The last node we stepped right from is the closest smaller ancestor.
    let mut candidate = None;
    while let Some(node) = current {
        current = match node.key().cmp(key) {
            Ordering::Less => {
                candidate = Some(node);
                node.right_node()
            }
            Ordering::Greater => node.left_node(),
            Ordering::Equal => {
                return match node.left_node() {
                    Some(left) => largest(Some(left)).map(Some),
                    None => Ok(candidate),
                };
            }
        };
    }
    Err(Error::NotFound)
}

/// The in-order successor of `key`: the node with the smallest key greater
/// than `key`.
///
/// Returns `Ok(None)` if `key` is the largest key in the tree, and
/// [`Error::NotFound`] if `key` isn't in the tree at all.
pub fn next_largest<'a, N>(root: Option<&'a N>, key: &N::Key) -> Result<Option<&'a N>, Error>
where
    N: BinaryNode,
    N::Key: Ord,
{
    let mut current = Some(root.ok_or(Error::EmptyTree)?);
    // The last node we stepped left from is the closest larger ancestor.
    let mut candidate = None;
    while let Some(node) = current {
        current = match node.key().cmp(key) {
            Ordering::Greater => {
                candidate = Some(node);
                node.left_node()
            }
            Ordering::Less => node.right_node(),
            Ordering::Equal => {
                return match node.right_node() {
                    Some(right) => smallest(Some(right)).map(Some),
                    None => Ok(candidate),
                };
            }
        };
    }
    Err(Error::NotFound)
}
