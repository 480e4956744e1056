/// A read-only view of a binary search tree node.
///
/// Both tree flavours in this crate implement this so that traversals,
/// searches and folds are only written once. Implementors must uphold the
/// BST invariant: every key reachable through `left_node` is less than
/// `key` and every key reachable through `right_node` is greater.
pub trait BinaryNode {
    /// The ordered key stored in each node.
    type Key;

    /// The key stored in this node.
    fn key(&self) -> &Self::Key;

    /// The root of the left subtree, if there is one.
    fn left_node(&self) -> Option<&Self>;

    /// The root of the right subtree, if there is one.
    fn right_node(&self) -> Option<&Self>;
}
