//! This crate exposes persistent Binary Search Trees (BSTs): an
//! unbalanced one in [`bst`] and a height-balanced (AVL) one in [`avl`].
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored keys. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` stores a key and
//! will sometimes have child `Node`s. The most important invariants of a
//! BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    key less than its own key.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    key greater than its own key.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! The benefits of these invariants are many. For instance, searching for
//! keys in the tree takes `O(height)` (where `height` is defined as the longest
//! path from the root `Node` to a leaf `Node`). With clever construction the
//! height of a BST can be limited to `O(lg N)` where `N` is the number of nodes
//! in the tree. BSTs also naturally support sorted iteration by visiting the
//! left subtree, then the subtree root, then the right subtree.
//!
//! ## Persistence
//!
//! Trees here are values. `insert`, `delete` and `balance` return a new
//! tree and leave the original alone; the two share every subtree the
//! operation didn't touch. Subtrees are reference counted with `Arc`, so a
//! tree can be read from (and new trees derived from it) on many threads at
//! once without locking.
//!
//! The read-only algorithms (walks in [`traverse`], lookups in [`search`])
//! work on anything implementing [`BinaryNode`], so both trees share them.

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod avl;
pub mod bst;
mod error;
mod node;
pub mod search;
pub mod traverse;

pub use avl::{Observer, Rotation};
pub use error::Error;
pub use node::BinaryNode;
