//! A linked BST. Every `Node` owns its two children through a `Box`, so there are no parent
//! pointers, no reference counting and no `unsafe`. The tree never rebalances on its own:
//! [`Tree::rebalance`] is an explicit, on-demand rebuild.
//!
//! Duplicates are allowed. A value equal to a node's value always goes to that node's right, so
//! equal values keep their insertion order along the right spine.
//!
//! Every walk is iterative, which keeps a degenerate tree (say, one built from sorted input) from
//! exhausting the call stack. Dropping a tree is iterative too.
//!
//! # Examples
//!
//! ```
//! use linked_bst::Tree;
//!
//! let mut tree = Tree::new();
//!
//! // Nothing in here yet.
//! assert_eq!(tree.find(&1), None);
//!
//! tree.add(1);
//! tree.add(1);
//! assert_eq!(tree.len(), 2);
//!
//! // Removing takes out one copy at a time.
//! assert_eq!(tree.remove(&1), Ok(1));
//! assert_eq!(tree.find(&1), Some(&1));
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::mem;

use log::{debug, log_enabled, trace, Level};

use crate::error::{Error, Result};
use crate::util::Direction;

mod iter;

pub use iter::{Inorder, IntoIter, Iter, LevelOrder, Postorder};

/// An owning link to a (possibly empty) subtree.
type Link<T> = Option<Box<Node<T>>>;

/// A Binary Search Tree holding values of type `T`. This can be used for adding, finding,
/// removing and range-querying values.
pub struct Tree<T> {
    root: Link<T>,
    len: usize,
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for Tree<T> {
    fn drop(&mut self) {
        dismantle(self.root.take());
    }
}

/// Drops every node reachable from `links` without recursing, so the depth of the tree doesn't
/// matter.
fn dismantle<T>(links: impl IntoIterator<Item = Box<Node<T>>>) {
    let mut stack: Vec<Box<Node<T>>> = links.into_iter().collect();
    while let Some(mut node) = stack.pop() {
        stack.extend(node.left.take());
        stack.extend(node.right.take());
    }
}

/// Copies node by node, so the clone has exactly the same shape, even where `replace` broke the
/// ordering.
impl<T> Clone for Tree<T>
where
    T: Clone,
{
    fn clone(&self) -> Self {
        let mut root = None;
        {
            // Each source node is paired with the empty link its copy goes into.
            let mut stack: Vec<(&Node<T>, &mut Link<T>)> = Vec::new();
            if let Some(node) = self.root.as_deref() {
                stack.push((node, &mut root));
            }
            while let Some((source, slot)) = stack.pop() {
                let copy = slot.insert(Node::new_boxed(source.value.clone()));
                let Node { left, right, .. } = &mut **copy;
                if let Some(child) = source.left.as_deref() {
                    stack.push((child, left));
                }
                if let Some(child) = source.right.as_deref() {
                    stack.push((child, right));
                }
            }
        }

        Self {
            root,
            len: self.len,
        }
    }
}

impl<T> fmt::Debug for Tree<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.inorder()).finish()
    }
}

/// Draws the tree rotated 90 degrees counter-clockwise: the right subtree comes first and each
/// level is indented by one `"| "`.
impl<T> fmt::Display for Tree<T>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut stack = Vec::new();
        let mut cursor = self.root.as_deref().map(|n| (n, 0));
        loop {
            while let Some((node, level)) = cursor {
                stack.push((node, level));
                cursor = node.right.as_deref().map(|n| (n, level + 1));
            }
            let (node, level) = match stack.pop() {
                Some(entry) => entry,
                None => return Ok(()),
            };
            writeln!(f, "{}{}", "| ".repeat(level), node.value)?;
            cursor = node.left.as_deref().map(|n| (n, level + 1));
        }
    }
}

/// Two trees are equal when they hold the same values, whatever their shapes.
impl<T> PartialEq for Tree<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.inorder().eq(other.inorder())
    }
}

impl<T> Eq for Tree<T> where T: Eq {}

impl<T> FromIterator<T> for Tree<T>
where
    T: Ord,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<T> Extend<T> for Tree<T>
where
    T: Ord,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.add(value);
        }
    }
}

impl<'a, T> IntoIterator for &'a Tree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<T> IntoIterator for Tree<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    /// Consumes the tree, yielding its values in ascending order.
    fn into_iter(mut self) -> IntoIter<T> {
        IntoIter::new(self.root.take(), mem::take(&mut self.len))
    }
}

impl<T> Tree<T> {
    /// Generates a new, empty `Tree`.
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// The number of values stored, counting duplicates.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree holds no values.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Removes every value.
    pub fn clear(&mut self) {
        debug!("clearing tree of {} values", self.len);
        dismantle(self.root.take());
        self.len = 0;
    }

    /// The number of edges on the longest path from the root to a leaf. Both an empty tree and a
    /// lone root have a height of 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Tree;
    ///
    /// let tree: Tree<_> = (1..=4).collect();
    /// assert_eq!(tree.height(), 3);
    /// ```
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: Vec<_> = self.root.as_deref().map(|n| (n, 0)).into_iter().collect();
        while let Some((node, depth)) = stack.pop() {
            height = height.max(depth);
            stack.extend(node.left.as_deref().map(|n| (n, depth + 1)));
            stack.extend(node.right.as_deref().map(|n| (n, depth + 1)));
        }

        height
    }

    /// A heuristic balance test: whether the height is below `2 * log2(len + 1) - 1`. This is not
    /// an AVL or red-black guarantee, only a comparison against the minimum possible height. An
    /// empty tree is never balanced by this measure.
    pub fn is_balanced(&self) -> bool {
        let bound = 2.0 * ((self.len + 1) as f64).log2() - 1.0;
        (self.height() as f64) < bound
    }

    /// Iterates in preorder: node, left subtree, right subtree. This is also what iterating over
    /// `&Tree` gives.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.root.as_deref(), self.len)
    }

    /// Iterates in ascending order.
    pub fn inorder(&self) -> Inorder<'_, T> {
        Inorder::new(self.root.as_deref(), self.len)
    }

    /// Iterates in postorder: left subtree, right subtree, node.
    pub fn postorder(&self) -> Postorder<'_, T> {
        Postorder::new(self.root.as_deref(), self.len)
    }

    /// Iterates breadth-first, top to bottom and left to right within a level.
    pub fn levelorder(&self) -> LevelOrder<'_, T> {
        LevelOrder::new(self.root.as_deref(), self.len)
    }
}

impl<T> Tree<T>
where
    T: Ord,
{
    /// Adds `value` to the tree. Duplicates are kept: a value equal to a node's value goes to its
    /// right.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.add(2);
    /// tree.add(2);
    ///
    /// assert_eq!(tree.len(), 2);
    /// assert_eq!(tree.iter().collect::<Vec<_>>(), [&2, &2]);
    /// ```
    pub fn add(&mut self, value: T) {
        let mut slot = &mut self.root;
        while let Some(node) = slot {
            let direction = Direction::towards(&value, &node.value);
            slot = node.child_mut(direction);
        }
        *slot = Some(Node::new_boxed(value));
        self.len += 1;
    }

    /// Finds the stored value equal to `value`, if any. With duplicates, this is the one closest
    /// to the root.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Tree;
    ///
    /// let tree: Tree<_> = [2, 1, 3].into_iter().collect();
    ///
    /// assert_eq!(tree.find(&1), Some(&1));
    /// assert_eq!(tree.find(&42), None);
    /// ```
    pub fn find(&self, value: &T) -> Option<&T> {
        let mut cursor = self.root.as_deref();
        while let Some(node) = cursor {
            cursor = match value.cmp(&node.value) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Equal => return Some(&node.value),
                Ordering::Greater => node.right.as_deref(),
            };
        }

        None
    }

    /// Whether a value equal to `value` is stored.
    pub fn contains(&self, value: &T) -> bool {
        self.find(value).is_some()
    }

    /// Removes one stored value equal to `value` and returns it. With duplicates, the copy closest
    /// to the root goes.
    ///
    /// # Errors
    ///
    /// [`Error::KeyNotFound`] if no stored value equals `value`. The tree is left untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::{Error, Tree};
    ///
    /// let mut tree: Tree<_> = [5, 3, 8].into_iter().collect();
    ///
    /// assert_eq!(tree.remove(&5), Ok(5));
    /// assert_eq!(tree.remove(&5), Err(Error::KeyNotFound));
    /// assert_eq!(tree.len(), 2);
    /// ```
    pub fn remove(&mut self, value: &T) -> Result<T> {
        let slot = match Self::locate(&mut self.root, value) {
            Some(slot) => slot,
            None => {
                trace!("remove: no stored value matched");
                return Err(Error::KeyNotFound);
            }
        };

        let mut node = match slot.take() {
            Some(node) => node,
            None => unreachable!("`locate` only hands back links holding a match"),
        };
        let removed = match (node.left.take(), node.right.take()) {
            (Some(left), Some(right)) => {
                // Lift the largest value of the left subtree into this node. The node keeps its
                // place; only its value and its left subtree change.
                let (max, rest) = Node::split_max(left);
                node.left = rest;
                node.right = Some(right);
                let removed = mem::replace(&mut node.value, max);
                *slot = Some(node);
                removed
            }
            (left, right) => {
                // At most one child, which takes this node's place in the parent's link.
                *slot = left.or(right);
                node.value
            }
        };

        self.len -= 1;
        Ok(removed)
    }

    /// Overwrites the first stored value equal to `target` with `value`, returning the old one.
    ///
    /// **Caveat**: the node is not moved. If `value` doesn't belong where `target` was, the
    /// ordering is broken: searches may miss values and [`inorder`](Self::inorder) may come out
    /// unsorted until the next [`rebalance`](Self::rebalance), which sorts before rebuilding.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Tree;
    ///
    /// let mut tree: Tree<_> = [5, 3, 8].into_iter().collect();
    ///
    /// assert_eq!(tree.replace(&3, 4), Some(3));
    /// assert_eq!(tree.replace(&3, 4), None);
    /// assert_eq!(tree.find(&4), Some(&4));
    /// ```
    pub fn replace(&mut self, target: &T, value: T) -> Option<T> {
        let node = Self::locate(&mut self.root, target)?.as_mut()?;
        Some(mem::replace(&mut node.value, value))
    }

    /// Returns every stored value in `low..=high`, in ascending order. An empty `Vec` means nothing
    /// matched.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidRange`] when `low > high`.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::{Error, Tree};
    ///
    /// let tree: Tree<_> = [5, 3, 8, 1, 4, 7, 9].into_iter().collect();
    ///
    /// assert_eq!(tree.range_find(&4, &8), Ok(vec![&4, &5, &7, &8]));
    /// assert_eq!(tree.range_find(&10, &20), Ok(vec![]));
    /// assert_eq!(tree.range_find(&8, &4), Err(Error::InvalidRange));
    /// ```
    pub fn range_find(&self, low: &T, high: &T) -> Result<Vec<&T>> {
        if low > high {
            return Err(Error::InvalidRange);
        }

        let mut found = Vec::new();
        // Only nodes at or above `low` are ever pushed, so they pop in ascending order.
        let mut stack = Vec::new();
        let mut cursor = self.root.as_deref();
        loop {
            while let Some(node) = cursor {
                if node.value < *low {
                    // Nothing to the left of this node can reach `low`.
                    cursor = node.right.as_deref();
                } else {
                    stack.push(node);
                    cursor = node.left.as_deref();
                }
            }

            let node = match stack.pop() {
                Some(node) if node.value <= *high => node,
                // Everything still pending is at least this large.
                _ => break,
            };
            found.push(&node.value);
            cursor = node.right.as_deref();
        }

        Ok(found)
    }

    /// The smallest stored value strictly greater than `value`. `value` doesn't have to be stored.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Tree;
    ///
    /// let tree: Tree<_> = [10, 4, 8].into_iter().collect();
    ///
    /// assert_eq!(tree.successor(&5), Some(&8));
    /// assert_eq!(tree.successor(&10), None);
    /// ```
    pub fn successor(&self, value: &T) -> Option<&T> {
        let mut best = None;
        let mut cursor = self.root.as_deref();
        while let Some(node) = cursor {
            if node.value > *value {
                // A candidate; anything tighter is to its left.
                best = Some(&node.value);
                cursor = node.left.as_deref();
            } else {
                cursor = node.right.as_deref();
            }
        }

        best
    }

    /// The largest stored value strictly less than `value`. `value` doesn't have to be stored.
    pub fn predecessor(&self, value: &T) -> Option<&T> {
        let mut best = None;
        let mut cursor = self.root.as_deref();
        while let Some(node) = cursor {
            if node.value < *value {
                best = Some(&node.value);
                cursor = node.right.as_deref();
            } else {
                cursor = node.left.as_deref();
            }
        }

        best
    }

    /// Rebuilds the whole tree to near-minimum height. The values are pulled out in order, sorted
    /// (a no-op unless [`replace`](Self::replace) broke the ordering) and added back median
    /// first, recursively for each half.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Tree;
    ///
    /// let mut tree: Tree<_> = (1..=1000).collect();
    /// assert!(!tree.is_balanced());
    ///
    /// tree.rebalance();
    /// assert!(tree.is_balanced());
    /// assert_eq!(tree.height(), 9);
    /// ```
    pub fn rebalance(&mut self) {
        let old_height = if log_enabled!(Level::Debug) {
            Some(self.height())
        } else {
            None
        };

        let mut values: Vec<T> = mem::take(self).into_iter().collect();
        values.sort();
        let len = values.len();
        self.add_middle(values);

        if let Some(old_height) = old_height {
            debug!(
                "rebalanced {} values: height {} -> {}",
                len,
                old_height,
                self.height()
            );
        }
        if cfg!(debug_assertions) {
            let mut sorted = self.inorder();
            if let Some(mut prev) = sorted.next() {
                for value in sorted {
                    assert!(prev <= value);
                    prev = value;
                }
            }
        }
    }

    /// Adds the median of the sorted `values`, then recurses on the values either side of it.
    /// The recursion depth is logarithmic in `values.len()`.
    fn add_middle(&mut self, mut values: Vec<T>) {
        if values.is_empty() {
            return;
        }

        let right = values.split_off(values.len() / 2 + 1);
        if let Some(median) = values.pop() {
            self.add(median);
        }
        self.add_middle(values);
        self.add_middle(right);
    }

    /// Walks down from `slot` to the first node holding `value` and returns the link that owns
    /// that node: the tree's root slot when the root matches, otherwise the child link of the
    /// parent in the direction last taken. That link is all deletion needs to rewire the parent.
    fn locate<'a>(mut slot: &'a mut Link<T>, value: &T) -> Option<&'a mut Link<T>> {
        loop {
            let node = slot.as_deref()?;
            let direction = match value.cmp(&node.value) {
                Ordering::Less => Direction::Left,
                Ordering::Equal => return Some(slot),
                Ordering::Greater => Direction::Right,
            };
            slot = slot.as_mut()?.child_mut(direction);
        }
    }
}

/// A `Node` holds one value and owns its children, either of which may be missing.
struct Node<T> {
    value: T,
    left: Link<T>,
    right: Link<T>,
}

impl<T> Node<T> {
    fn new_boxed(value: T) -> Box<Self> {
        Box::new(Self {
            value,
            left: None,
            right: None,
        })
    }

    /// Splits the largest value off the subtree rooted at `root`, returning it along with what
    /// remains of the subtree.
    fn split_max(mut root: Box<Self>) -> (T, Link<T>) {
        match root.take_max_below() {
            Some(max) => (max, Some(root)),
            // No right child, so `root` itself is the largest and its left subtree is the rest.
            None => (root.value, root.left),
        }
    }

    /// Splices the largest node out of this node's right subtree and returns its value. The
    /// donor has no right child, so its parent simply adopts its left child. `None` when there is
    /// no right subtree.
    fn take_max_below(&mut self) -> Option<T> {
        let mut slot = &mut self.right;
        while slot.as_ref()?.right.is_some() {
            slot = &mut slot.as_mut()?.right;
        }

        let mut donor = slot.take()?;
        *slot = donor.left.take();
        Some(donor.value)
    }

    fn child_mut(&mut self, direction: Direction) -> &mut Link<T> {
        match direction {
            Direction::Left => &mut self.left,
            Direction::Right => &mut self.right,
        }
    }
}
