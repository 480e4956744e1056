//! A persistent, unbalanced Binary Search Tree. Any operation that one
//! would expect to modify the tree (e.g. `insert` or `delete`) instead
//! returns a new tree that shares every untouched subtree with the
//! original. Only the nodes on the path to the change are copied.
//!
//! The tree is a set: each key is stored once and inserting a key that is
//! already present is a no-op.
//!
//! # Examples
//!
//! ```
//! use bstree::bst::Tree;
//!
//! let tree = Tree::create(vec![10, 19, -6, 21, 15, 0]);
//!
//! let keys: Vec<_> = tree.in_order().into_iter().map(|n| *n.key()).collect();
//! assert_eq!(keys, vec![-6, 0, 10, 15, 19, 21]);
//!
//! // `delete` returns a new tree, the old one is untouched.
//! let smaller = tree.delete(&19);
//! assert!(smaller.find(&19).is_none());
//! assert!(tree.find(&19).is_some());
//!
//! // Neighbour queries re-descend from the root.
//! assert_eq!(tree.next_smallest(&19).unwrap().map(|n| *n.key()), Some(15));
//! assert_eq!(tree.next_largest(&10).unwrap().map(|n| *n.key()), Some(15));
//! ```

use std::cmp::Ordering;
use std::iter::{FromIterator, Sum};
use std::mem;
use std::sync::Arc;

use crate::node::BinaryNode;
use crate::{search, traverse, Error};

/// A Binary Search Tree: either empty or a reference counted root
/// [`Node`]. Cloning a `Tree` is cheap, it only bumps a reference count.
#[derive(Debug)]
pub enum Tree<K> {
    /// The empty tree, also found at the bottom of every subtree.
    Leaf,
    /// A shared `Node` with a key and two children (which are both
    /// `Tree`s).
    Node(Arc<Node<K>>),
}

impl<K> Default for Tree<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// Manual implementation of `Clone` so we don't require `K: Clone` just to
/// bump a reference count.
impl<K> Clone for Tree<K> {
    fn clone(&self) -> Self {
        match self {
            Self::Leaf => Self::Leaf,
            Self::Node(n) => Self::Node(Arc::clone(n)),
        }
    }
}

impl<K> From<Node<K>> for Tree<K> {
    fn from(node: Node<K>) -> Self {
        Self::Node(Arc::new(node))
    }
}

impl<K: Ord> FromIterator<K> for Tree<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        Self::create(iter)
    }
}

impl<K: PartialEq> PartialEq for Tree<K> {
    fn eq(&self, other: &Self) -> bool {
        self.compare(other)
    }
}

impl<K: Eq> Eq for Tree<K> {}

impl<K> Tree<K> {
    /// Generates a new, empty `Tree`.
    pub fn new() -> Self {
        Self::Leaf
    }

    /// Builds a tree by inserting every key in order, starting from an
    /// empty tree. The shape depends on the order of the keys; nothing is
    /// balanced.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::bst::Tree;
    ///
    /// let tree = Tree::create(vec![2, 3, 1]);
    /// assert_eq!(tree.root().map(|n| *n.key()), Some(2));
    /// assert_eq!(tree.size(), 3);
    /// ```
    pub fn create<I>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Ord,
    {
        keys.into_iter().fold(Self::new(), |tree, key| tree.insert(key))
    }

    /// Whether this tree has no nodes.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Leaf)
    }

    /// The root node, or `None` for the empty tree.
    pub fn root(&self) -> Option<&Node<K>> {
        match self {
            Self::Leaf => None,
            Self::Node(n) => Some(n.as_ref()),
        }
    }

    /// Whether both trees are the very same allocation (or both empty).
    /// Operations that leave a tree unchanged return a tree that is
    /// `ptr_eq` to their input.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Leaf, Self::Leaf) => true,
            (Self::Node(a), Self::Node(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Returns a new tree that includes `key`. If `key` is already in the
    /// tree, the tree itself is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::bst::Tree;
    ///
    /// let tree = Tree::new();
    /// let new_tree = tree.insert(1);
    ///
    /// // All history is preserved.
    /// assert!(new_tree.contains(&1));
    /// assert!(!tree.contains(&1));
    ///
    /// // Inserting it again changes nothing.
    /// assert!(new_tree.insert(1).ptr_eq(&new_tree));
    /// ```
    pub fn insert(&self, key: K) -> Self
    where
        K: Ord,
    {
        let (path, stop) = self.descend(&key);
        if !stop.is_empty() {
            return self.clone();
        }
        Self::rebuild(path, Node::new(Arc::new(key), Self::Leaf, Self::Leaf).into())
    }

    /// Returns a new tree without `key`. If the tree never contained
    /// `key`, the tree itself is returned.
    ///
    /// A node with two children is replaced by its in-order successor (the
    /// smallest key of its right subtree), which is removed from that
    /// subtree in turn.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::bst::Tree;
    ///
    /// let tree = Tree::create(vec![2, 1, 3]);
    /// let newer_tree = tree.delete(&2);
    ///
    /// assert!(!newer_tree.contains(&2));
    /// assert_eq!(newer_tree.root().map(|n| *n.key()), Some(3));
    /// assert!(tree.contains(&2));
    /// ```
    pub fn delete(&self, key: &K) -> Self
    where
        K: Ord,
    {
        let (path, stop) = self.descend(key);
        let replacement = match stop {
            Self::Leaf => {
                tracing::trace!(depth = path.len(), "key not present, nothing to delete");
                return self.clone();
            }
            Self::Node(n) => match (&n.left, &n.right) {
                (Self::Leaf, Self::Leaf) => Self::Leaf,
                (Self::Leaf, only) | (only, Self::Leaf) => only.clone(),
                (_, Self::Node(right)) => {
                    let (successor, new_right) = right.remove_smallest();
                    Node::new(successor, n.left.clone(), new_right).into()
                }
            },
        };
        Self::rebuild(path, replacement)
    }

    /// Rebuilds the tree into a minimum-height shape holding the same keys.
    /// For `n` keys the root is the `n / 2`th smallest key and both halves
    /// are built the same way. Keys are shared with this tree, not cloned.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::bst::Tree;
    ///
    /// let list = Tree::create(0..10);
    /// assert_eq!(list.height(), 10);
    ///
    /// let balanced = list.balance();
    /// assert_eq!(balanced.height(), 4);
    /// assert_eq!(balanced.root().map(|n| *n.key()), Some(5));
    /// ```
    pub fn balance(&self) -> Self {
        let keys: Vec<Arc<K>> = self
            .in_order()
            .into_iter()
            .map(|n| Arc::clone(&n.key))
            .collect();
        tracing::debug!(nodes = keys.len(), "balancing tree");
        Self::from_sorted(&keys)
    }

    fn from_sorted(keys: &[Arc<K>]) -> Self {
        if keys.is_empty() {
            return Self::Leaf;
        }
        let mid = keys.len() / 2;
        Node::new(
            Arc::clone(&keys[mid]),
            Self::from_sorted(&keys[..mid]),
            Self::from_sorted(&keys[mid + 1..]),
        )
        .into()
    }

    /// Potentially finds the node holding `key`.
    pub fn find(&self, key: &K) -> Option<&Node<K>>
    where
        K: Ord,
    {
        search::find(self.root(), key)
    }

    /// Whether `key` is in the tree.
    pub fn contains(&self, key: &K) -> bool
    where
        K: Ord,
    {
        self.find(key).is_some()
    }

    /// The node with the smallest key.
    pub fn smallest(&self) -> Result<&Node<K>, Error> {
        search::smallest(self.root())
    }

    /// The node with the largest key.
    pub fn largest(&self) -> Result<&Node<K>, Error> {
        search::largest(self.root())
    }

    /// The in-order predecessor of `key` in this tree, `None` if `key` is
    /// the smallest. Fails with [`Error::NotFound`] if `key` isn't here.
    pub fn next_smallest(&self, key: &K) -> Result<Option<&Node<K>>, Error>
    where
        K: Ord,
    {
        search::next_smallest(self.root(), key)
    }

    /// The in-order successor of `key` in this tree, `None` if `key` is
    /// the largest. Fails with [`Error::NotFound`] if `key` isn't here.
    pub fn next_largest(&self, key: &K) -> Result<Option<&Node<K>>, Error>
    where
        K: Ord,
    {
        search::next_largest(self.root(), key)
    }

    /// Like [`next_smallest`](Self::next_smallest) for a node. The node
    /// is located in this tree by its key, so it may come from another
    /// version of the tree.
    pub fn next_smallest_of(&self, node: &Node<K>) -> Result<Option<&Node<K>>, Error>
    where
        K: Ord,
    {
        self.next_smallest(node.key())
    }

    /// Like [`next_largest`](Self::next_largest) for a node.
    pub fn next_largest_of(&self, node: &Node<K>) -> Result<Option<&Node<K>>, Error>
    where
        K: Ord,
    {
        self.next_largest(node.key())
    }

    /// Nodes in ascending key order.
    pub fn in_order(&self) -> Vec<&Node<K>> {
        traverse::in_order(self.root())
    }

    /// Nodes with each node before its subtrees.
    pub fn pre_order(&self) -> Vec<&Node<K>> {
        traverse::pre_order(self.root())
    }

    /// Nodes with each node after its subtrees.
    pub fn post_order(&self) -> Vec<&Node<K>> {
        traverse::post_order(self.root())
    }

    /// Nodes level by level, left to right.
    pub fn level_order(&self) -> Vec<&Node<K>> {
        traverse::level_order(self.root())
    }

    /// Folds every node into an accumulator in pre-order.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::bst::Tree;
    ///
    /// let tree = Tree::create(vec![2, 3, 1]);
    /// let largest = tree.reduce(i32::MIN, |acc, n| acc.max(*n.key()));
    /// assert_eq!(largest, 3);
    /// ```
    pub fn reduce<'a, A, F>(&'a self, init: A, visit: F) -> A
    where
        F: FnMut(A, &'a Node<K>) -> A,
    {
        traverse::reduce(self.root(), init, visit)
    }

    /// The number of keys in the tree.
    pub fn size(&self) -> usize {
        traverse::size(self.root())
    }

    /// The number of levels in the tree; 0 when empty.
    pub fn height(&self) -> usize {
        traverse::height(self.root())
    }

    /// The sum of every key; the empty sum for an empty tree.
    pub fn sum<'a>(&'a self) -> K
    where
        K: Sum<&'a K>,
    {
        self.in_order().into_iter().map(Node::key).sum()
    }

    /// Whether both trees have the same shape and the same keys in the same
    /// places. Two trees holding the same keys in different shapes are not
    /// equal.
    pub fn compare(&self, other: &Self) -> bool
    where
        K: PartialEq,
    {
        self.ptr_eq(other) || traverse::compare(self.root(), other.root())
    }

    /// Walks down from the root towards `key` without recursing. Returns
    /// every subtree passed through, with the side we left it by, and the
    /// subtree the walk stopped at: the node holding `key`, or the leaf
    /// where it would go.
    fn descend<'a>(&'a self, key: &K) -> (Vec<(&'a Self, Side)>, &'a Self)
    where
        K: Ord,
    {
        let mut path = Vec::new();
        let mut current = self;
        while let Self::Node(n) = current {
            let side = match key.cmp(n.key()) {
                Ordering::Less => Side::Left,
                Ordering::Equal => break,
                Ordering::Greater => Side::Right,
            };
            path.push((current, side));
            current = match side {
                Side::Left => &n.left,
                Side::Right => &n.right,
            };
        }
        (path, current)
    }

    /// Copies `path` bottom-up around a new subtree at its end. Ancestors
    /// whose child didn't change are reused as they are.
    fn rebuild(path: Vec<(&Self, Side)>, bottom: Self) -> Self {
        path.into_iter()
            .rev()
            .fold(bottom, |child, (tree, side)| match side {
                Side::Left => tree.with_left(child),
                Side::Right => tree.with_right(child),
            })
    }

    /// A copy of this (non-empty) tree's root with a new left child. Returns
    /// this tree itself when the child didn't change.
    fn with_left(&self, left: Self) -> Self {
        match self {
            Self::Node(n) if !left.ptr_eq(&n.left) => {
                Node::new(Arc::clone(&n.key), left, n.right.clone()).into()
            }
            _ => self.clone(),
        }
    }

    /// A copy of this (non-empty) tree's root with a new right child.
    fn with_right(&self, right: Self) -> Self {
        match self {
            Self::Node(n) if !right.ptr_eq(&n.right) => {
                Node::new(Arc::clone(&n.key), n.left.clone(), right).into()
            }
            _ => self.clone(),
        }
    }
}

/// Which child a walk down the tree stepped into.
#[derive(Clone, Copy)]
enum Side {
    Left,
    Right,
}

/// A `Node` holds a key and always has two children although those
/// children may be [`Leaf`][Tree::Leaf]s.
#[derive(Debug)]
pub struct Node<K> {
    key: Arc<K>,
    left: Tree<K>,
    right: Tree<K>,
}

impl<K> Node<K> {
    fn new(key: Arc<K>, left: Tree<K>, right: Tree<K>) -> Self {
        Self { key, left, right }
    }

    /// The key stored in this node.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// The subtree of keys smaller than this node's key.
    pub fn left(&self) -> &Tree<K> {
        &self.left
    }

    /// The subtree of keys larger than this node's key.
    pub fn right(&self) -> &Tree<K> {
        &self.right
    }

    /// Returns the smallest key and a new subtree without it. The smallest
    /// node has no left child so it is replaced by its right subtree.
    fn remove_smallest(&self) -> (Arc<K>, Tree<K>) {
        let mut spine = Vec::new();
        let mut smallest = self;
        while let Tree::Node(l) = &smallest.left {
            spine.push(smallest);
            smallest = l.as_ref();
        }
        let without = spine.into_iter().rev().fold(smallest.right.clone(), |left, node| {
            Node::new(Arc::clone(&node.key), left, node.right.clone()).into()
        });
        (Arc::clone(&smallest.key), without)
    }
}

impl<K> BinaryNode for Node<K> {
    type Key = K;

    fn key(&self) -> &K {
        &self.key
    }

    fn left_node(&self) -> Option<&Self> {
        self.left.root()
    }

    fn right_node(&self) -> Option<&Self> {
        self.right.root()
    }
}

/// Nothing keeps this tree balanced, so a tree built from sorted keys is a
/// list and dropping it recursively could overflow the stack. Children we
/// hold the last reference to are unlinked onto a heap stack instead.
impl<K> Drop for Node<K> {
    fn drop(&mut self) {
        if self.left.is_empty() && self.right.is_empty() {
            return;
        }
        let mut pending = vec![mem::take(&mut self.left), mem::take(&mut self.right)];
        while let Some(tree) = pending.pop() {
            if let Tree::Node(n) = tree {
                if let Ok(mut node) = Arc::try_unwrap(n) {
                    pending.push(mem::take(&mut node.left));
                    pending.push(mem::take(&mut node.right));
                }
            }
        }
    }
}
