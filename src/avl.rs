//! A persistent, self-balancing Binary Search Tree (specifically, an AVL
//! tree). Like [`bst::Tree`](crate::bst::Tree), every "modifying" operation
//! returns a new tree sharing untouched subtrees with the old one. On the
//! way back up from an insertion, every node on the path is checked and, if
//! its subtrees' heights differ by two, rotated back into balance before it
//! is handed to its parent.
//!
//! # Examples
//!
//! ```
//! use bstree::avl::{Rotation, Tree};
//!
//! let mut rotations = Vec::new();
//! let mut tree = Tree::new();
//! for key in 1..=3 {
//!     let mut record = |rotation: Rotation, _: &i32| rotations.push(rotation);
//!     tree = tree.insert_with(key, &mut record);
//! }
//!
//! // Inserting ascending keys would build a list; one rotation fixes it.
//! assert_eq!(rotations, vec![Rotation::RightRight]);
//! assert_eq!(tree.root().map(|n| *n.key()), Some(2));
//! assert_eq!(tree.height(), 2);
//! assert!(tree.is_balanced());
//! ```

use std::cmp::Ordering;
use std::iter::FromIterator;
use std::sync::Arc;

use crate::node::BinaryNode;
use crate::{search, traverse, Error};

/// The four ways of restoring balance to a subtree whose children's heights
/// differ by two. Each is named after the path from the unbalanced node
/// down to its too-tall grandchild.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Rotation {
    /// The left child is lifted to the root.
    LeftLeft,
    /// The right child is lifted to the root.
    RightRight,
    /// The left child's right child is lifted to the root.
    LeftRight,
    /// The right child's left child is lifted to the root.
    RightLeft,
}

/// Told about every rotation an insertion performs. Closures taking the
/// rotation and the key of the unbalanced node implement this.
pub trait Observer<K> {
    /// Called just before `rotation` is applied to the subtree rooted at
    /// the node holding `key`.
    fn rotated(&mut self, rotation: Rotation, key: &K);
}

impl<K, F> Observer<K> for F
where
    F: FnMut(Rotation, &K),
{
    fn rotated(&mut self, rotation: Rotation, key: &K) {
        self(rotation, key)
    }
}

/// A self-balancing Binary Search Tree: either empty or a reference counted
/// root [`Node`].
#[derive(Debug)]
pub enum Tree<K> {
    /// The empty tree, also found at the bottom of every subtree.
    Leaf,
    /// A shared `Node` with a key, its height, and two children.
    Node(Arc<Node<K>>),
}

impl<K> Default for Tree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Clone for Tree<K> {
    fn clone(&self) -> Self {
        match self {
            Self::Leaf => Self::Leaf,
            Self::Node(n) => Self::Node(Arc::clone(n)),
        }
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

    /// Builds a tree by inserting every key in order. Unlike the plain BST
    /// the result is balanced whatever the order.
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
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Leaf, Self::Leaf) => true,
            (Self::Node(a), Self::Node(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Gets the height of this tree. This is cached in every node so it
    /// costs `O(1)`.
    pub fn height(&self) -> usize {
        match self {
            Self::Leaf => 0,
            Self::Node(n) => n.height,
        }
    }

    /// Returns a new, balanced tree that includes `key`. If `key` is already
    /// in the tree, the tree itself is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::avl::Tree;
    ///
    /// let tree = Tree::create(0..7);
    /// assert_eq!(tree.height(), 3);
    ///
    /// let new_tree = tree.insert(7);
    /// assert_eq!(new_tree.height(), 4);
    /// assert!(!tree.contains(&7));
    /// ```
    pub fn insert(&self, key: K) -> Self
    where
        K: Ord,
    {
        self.insert_with(key, &mut |_: Rotation, _: &K| {})
    }

    /// Like [`insert`](Self::insert) but reports every rotation it performs
    /// to `observer`.
    pub fn insert_with<O>(&self, key: K, observer: &mut O) -> Self
    where
        K: Ord,
        O: Observer<K>,
    {
        self.insert_shared(&Arc::new(key), observer)
    }

    fn insert_shared<O>(&self, key: &Arc<K>, observer: &mut O) -> Self
    where
        K: Ord,
        O: Observer<K>,
    {
        match self {
            Self::Leaf => Node::join(Arc::clone(key), Self::Leaf, Self::Leaf),
            Self::Node(n) => match (**key).cmp(n.key()) {
                Ordering::Less => {
                    let new_left = n.left.insert_shared(key, observer);
                    if new_left.ptr_eq(&n.left) {
                        return self.clone();
                    }
                    Node::join(Arc::clone(&n.key), new_left, n.right.clone())
                        .rebalance_inserted(key, observer)
                }
                Ordering::Equal => self.clone(),
                Ordering::Greater => {
                    let new_right = n.right.insert_shared(key, observer);
                    if new_right.ptr_eq(&n.right) {
                        return self.clone();
                    }
                    Node::join(Arc::clone(&n.key), n.left.clone(), new_right)
                        .rebalance_inserted(key, observer)
                }
            },
        }
    }

    /// Rotates this freshly rebuilt subtree if the insertion of `key` left
    /// its children's heights two apart. Which rotation is needed depends on
    /// which grandchild `key` went into.
    fn rebalance_inserted<O>(self, key: &K, observer: &mut O) -> Self
    where
        K: Ord,
        O: Observer<K>,
    {
        let rotation = match &self {
            Self::Node(n) if n.left.height() == n.right.height() + 2 => match n.left.root() {
                Some(left) if key > left.key() => Rotation::LeftRight,
                _ => Rotation::LeftLeft,
            },
            Self::Node(n) if n.right.height() == n.left.height() + 2 => match n.right.root() {
                Some(right) if key < right.key() => Rotation::RightLeft,
                _ => Rotation::RightRight,
            },
            _ => return self,
        };
        self.apply(rotation, observer)
    }

    /// Returns a new tree without `key`, rebalanced on the way back up. A
    /// node with two children is replaced by its in-order predecessor.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::avl::Tree;
    ///
    /// let tree = Tree::create(0..7);
    /// let newer_tree = (0..3).fold(tree.clone(), |t, k| t.delete(&k));
    ///
    /// assert!(newer_tree.is_balanced());
    /// assert_eq!(newer_tree.size(), 4);
    /// assert_eq!(tree.size(), 7);
    /// ```
    pub fn delete(&self, key: &K) -> Self
    where
        K: Ord,
    {
        match self {
            Self::Leaf => Self::Leaf,
            Self::Node(n) => match key.cmp(n.key()) {
                Ordering::Less => {
                    let new_left = n.left.delete(key);
                    if new_left.ptr_eq(&n.left) {
                        return self.clone();
                    }
                    n.clone_with_children(new_left, n.right.clone())
                }
                Ordering::Greater => {
                    let new_right = n.right.delete(key);
                    if new_right.ptr_eq(&n.right) {
                        return self.clone();
                    }
                    n.clone_with_children(n.left.clone(), new_right)
                }
                Ordering::Equal => match (&n.left, &n.right) {
                    (Self::Leaf, Self::Leaf) => Self::Leaf,
                    (Self::Leaf, only) | (only, Self::Leaf) => only.clone(),

                    // If we have two children we have to figure out
                    // which node to promote. We choose here this node's
                    // predecessor. That is, the largest node in this node's
                    // left subtree.
                    (Self::Node(left), _) => {
                        let (pred_key, new_left) = left.delete_largest();
                        Node::join(pred_key, new_left, n.right.clone()).rebalance()
                    }
                },
            },
        }
    }

    /// Restores the AVL invariant at the root using the children's balance,
    /// for when we don't know where the change came from (deletion).
    fn rebalance(self) -> Self {
        let rotation = match &self {
            Self::Node(n) if n.left.height() > n.right.height() + 1 => match n.left.root() {
                Some(l) if l.right.height() > l.left.height() => Rotation::LeftRight,
                _ => Rotation::LeftLeft,
            },
            Self::Node(n) if n.right.height() > n.left.height() + 1 => match n.right.root() {
                Some(r) if r.left.height() > r.right.height() => Rotation::RightLeft,
                _ => Rotation::RightRight,
            },
            _ => return self,
        };
        self.apply(rotation, &mut |_: Rotation, _: &K| {})
    }

    fn apply<O>(self, rotation: Rotation, observer: &mut O) -> Self
    where
        O: Observer<K>,
    {
        if let Self::Node(n) = &self {
            tracing::debug!(
                ?rotation,
                left_height = n.left.height(),
                right_height = n.right.height(),
                "rotating unbalanced subtree"
            );
            observer.rotated(rotation, n.key());
        }
        let rotated = self.rotate(rotation);

        // In tests, after rotating, assert that we've restored the AVL invariant.
        if cfg!(test) {
            if let Self::Node(n) = &rotated {
                let left_height = n.left.height() as isize;
                let right_height = n.right.height() as isize;
                assert!((left_height - right_height).abs() <= 1);
            }
        }
        rotated
    }

    /// Applies the given rotation to the root of this tree.
    pub fn rotate(&self, rotation: Rotation) -> Self {
        match rotation {
            Rotation::LeftLeft => self.rotate_left_left(),
            Rotation::RightRight => self.rotate_right_right(),
            Rotation::LeftRight => self.rotate_left_right(),
            Rotation::RightLeft => self.rotate_right_left(),
        }
    }

    /// Returns a new tree by rotating the left child up to become the root.
    /// The left child's right subtree becomes the old root's left subtree
    /// and the old root becomes the new root's right child.
    ///
    /// A tree without a left child is returned as is.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::avl::Tree;
    ///
    /// let tree = Tree::create(vec![2, 1, 3]);
    /// let rotated = tree.rotate_left_left();
    ///
    /// let keys: Vec<_> = rotated.level_order().into_iter().map(|n| *n.key()).collect();
    /// assert_eq!(keys, vec![1, 2, 3]);
    /// ```
    pub fn rotate_left_left(&self) -> Self {
        match self {
            Self::Node(old_root) => match old_root.left.root() {
                Some(new_root) => {
                    let new_right = Node::join(
                        Arc::clone(&old_root.key),
                        new_root.right.clone(),
                        old_root.right.clone(),
                    );
                    Node::join(Arc::clone(&new_root.key), new_root.left.clone(), new_right)
                }
                None => self.clone(),
            },
            Self::Leaf => Self::Leaf,
        }
    }

    /// Returns a new tree by rotating the right child up to become the
    /// root; the mirror image of [`rotate_left_left`](Self::rotate_left_left).
    ///
    /// A tree without a right child is returned as is.
    pub fn rotate_right_right(&self) -> Self {
        match self {
            Self::Node(old_root) => match old_root.right.root() {
                Some(new_root) => {
                    let new_left = Node::join(
                        Arc::clone(&old_root.key),
                        old_root.left.clone(),
                        new_root.left.clone(),
                    );
                    Node::join(Arc::clone(&new_root.key), new_left, new_root.right.clone())
                }
                None => self.clone(),
            },
            Self::Leaf => Self::Leaf,
        }
    }

    /// Rotates the left child right-right, then the result left-left.
    pub fn rotate_left_right(&self) -> Self {
        match self {
            Self::Node(n) if !n.left.is_empty() => {
                Node::join(Arc::clone(&n.key), n.left.rotate_right_right(), n.right.clone())
                    .rotate_left_left()
            }
            _ => self.clone(),
        }
    }

    /// Rotates the right child left-left, then the result right-right.
    pub fn rotate_right_left(&self) -> Self {
        match self {
            Self::Node(n) if !n.right.is_empty() => {
                Node::join(Arc::clone(&n.key), n.left.clone(), n.right.rotate_left_left())
                    .rotate_right_right()
            }
            _ => self.clone(),
        }
    }

    /// Whether every node satisfies the AVL invariant and caches the right
    /// height.
    pub fn is_balanced(&self) -> bool {
        self.reduce(true, |ok, n| {
            let (left, right) = (n.left.height(), n.right.height());
            ok && left.max(right) - left.min(right) <= 1 && n.height == left.max(right) + 1
        })
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

    /// The in-order predecessor of `key`, see
    /// [`bst::Tree::next_smallest`](crate::bst::Tree::next_smallest).
    pub fn next_smallest(&self, key: &K) -> Result<Option<&Node<K>>, Error>
    where
        K: Ord,
    {
        search::next_smallest(self.root(), key)
    }

    /// The in-order successor of `key`, see
    /// [`bst::Tree::next_largest`](crate::bst::Tree::next_largest).
    pub fn next_largest(&self, key: &K) -> Result<Option<&Node<K>>, Error>
    where
        K: Ord,
    {
        search::next_largest(self.root(), key)
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

    /// Whether both trees have the same shape and keys.
    pub fn compare(&self, other: &Self) -> bool
    where
        K: PartialEq,
    {
        self.ptr_eq(other) || traverse::compare(self.root(), other.root())
    }
}

/// A `Node` has a key and always has two children although those children
/// may be [`Leaf`][Tree::Leaf]s.
#[derive(Debug)]
pub struct Node<K> {
    key: Arc<K>,
    left: Tree<K>,
    right: Tree<K>,

    /// How many levels are in the subtree rooted at this node.
    /// A node with no children has a height of 1.
    height: usize,
}

impl<K> Node<K> {
    /// Builds a subtree from a key and two children, computing its height.
    /// No balancing is done.
    fn join(key: Arc<K>, left: Tree<K>, right: Tree<K>) -> Tree<K> {
        let height = left.height().max(right.height()) + 1;
        Tree::Node(Arc::new(Self {
            key,
            left,
            right,
            height,
        }))
    }

    /// Create a new subtree with the same key as this node but with the
    /// given children, rebalanced.
    fn clone_with_children(&self, left: Tree<K>, right: Tree<K>) -> Tree<K> {
        Self::join(Arc::clone(&self.key), left, right).rebalance()
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

    /// How many levels are in the subtree rooted at this node.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the largest key and a new, rebalanced subtree without it.
    fn delete_largest(&self) -> (Arc<K>, Tree<K>) {
        match &self.right {
            Tree::Leaf => (Arc::clone(&self.key), self.left.clone()),
            Tree::Node(r) => {
                let (key, new_right) = r.delete_largest();
                (key, self.clone_with_children(self.left.clone(), new_right))
            }
        }
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
