use thiserror::Error;

/// The ways a query against a tree can fail.
///
/// Mutations (`insert`, `delete`, `balance`) never fail: duplicate inserts
/// and deletes of absent keys are no-ops.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The operation is undefined on an empty tree (e.g. `smallest`).
    #[error("tree is empty")]
    EmptyTree,

    /// The requested key is not present in the tree that was searched.
    #[error("key not found in tree")]
    NotFound,
}
