//! A link-based Binary Search Tree (BST) usable as an ordered multiset.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored records. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` stores one value
//! and owns up to two child `Node`s. The invariants kept by this crate are:
//!
//! 1. For every `Node` in the tree, all the `Node`s in its left subtree have a
//!    value strictly less than its own value.
//! 2. For every `Node` in the tree, all the `Node`s in its right subtree have a
//!    value greater than or equal to its own value.
//!
//! > The second rule is what lets the tree hold duplicates: an equal value
//! > always goes right.
//!
//! Searching takes `O(height)` where `height` is the longest path from the
//! root `Node` to a leaf `Node`. The tree never rebalances itself, so inserting
//! in sorted order degrades it into a list. [`Tree::rebalance`] rebuilds it to
//! `O(lg N)` height on demand.
//!
//! # Examples
//!
//! ```
//! use linked_bst::{Error, Tree};
//!
//! let mut tree: Tree<i32> = [5, 3, 8, 1, 4, 7, 9].into_iter().collect();
//!
//! assert_eq!(tree.find(&4), Some(&4));
//! assert_eq!(tree.remove(&3), Ok(3));
//! assert_eq!(tree.remove(&99), Err(Error::KeyNotFound));
//! assert_eq!(tree.inorder().copied().collect::<Vec<_>>(), [1, 4, 5, 7, 8, 9]);
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]
#![forbid(unsafe_code)]

pub mod error;
pub mod linked;
mod util;

pub use error::{Error, Result};
pub use linked::Tree;
