//! Errors reported by [`Tree`](crate::Tree) operations.
//!
//! Only two operations can fail. Everything else reports "nothing matched"
//! through an `Option` or an empty `Vec`.

/// Errors triggered by tree operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// `remove` was asked for a value that isn't stored in the tree.
    #[error("value not found in tree")]
    KeyNotFound,
    /// `range_find` was given a lower bound greater than its upper bound.
    #[error("range lower bound is greater than its upper bound")]
    InvalidRange,
}

/// Result alias defaulting to this crate's [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;
