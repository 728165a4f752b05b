//! An owned, deliberately unbalanced binary search tree with AVL diagnostics.
//!
//! Keys are inserted exactly as they arrive, so the tree takes whatever shape the input gives
//! it. The interesting part is what happens afterwards: every node can be asked for its height
//! and balance factor, the whole tree can be checked against the AVL height rule, and the keys
//! can be folded into summary statistics.

// Conventions used in comments:
// - The height of an empty subtree is -1, so a leaf has height 0.
// - The balance factor of a node `x` is `h(right(x)) - h(left(x))`.
// - A node violates the AVL rule if the absolute value of its balance factor exceeds 1.
//
// The fundamental invariants of the tree are:
// 1. Every key in a node's left subtree is strictly less than the node's key.
// 2. Every key in a node's right subtree is strictly greater than the node's key.
//
// Corollaries:
// 3. Keys are unique.
// 4. An in-order walk yields keys in strictly ascending order.
//
// Nothing derived from the shape (heights, balance factors, AVL validity, statistics) is stored
// on the nodes. Every query walks the tree again, so answers always match the current shape.
//
// None of the walks recurse on the call stack. The tree is expected to degenerate into long
// chains, and a chain of a few hundred thousand nodes would overflow the stack otherwise.

use core::{cmp::Ordering, fmt, ops::Not};
use std::{io, path::Path};

mod avl;
mod balance;
mod debug;
mod error;
mod height;
pub mod input;
mod iter;
mod report;
mod stats;

#[cfg(any(test, feature = "model"))]
pub mod model;

#[cfg(test)]
mod tests;

pub use crate::{
    avl::is_avl,
    balance::BalanceFactor,
    error::Error,
    height::height,
    iter::Iter,
    report::Report,
    stats::Statistics,
};

/// The type of key held by each node.
pub type Key = i32;

type Link = Option<Box<Node>>;

/// A single key holder.
///
/// A node exclusively owns both of its children. There are no parent pointers.
#[derive(Debug)]
pub struct Node {
    key: Key,
    left: Link,
    right: Link,
}

/// An unbalanced binary search tree of [`Key`]s.
///
/// Insertion never rotates, so inserting keys in sorted order produces a chain. Use
/// [`Tree::is_avl`] and [`Tree::balance_factors`] to find out how far from balanced the result
/// is.
#[derive(Default)]
pub struct Tree {
    root: Link,
    len: usize,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Dir {
    Left = 0,
    Right = 1,
}

impl Not for Dir {
    type Output = Dir;

    fn not(self) -> Self::Output {
        match self {
            Dir::Left => Dir::Right,
            Dir::Right => Dir::Left,
        }
    }
}

/// Reads keys from `path`, builds a tree from them and writes the diagnostic report to `out`.
pub fn run<W: io::Write>(path: &Path, mut out: W) -> Result<(), Error> {
    let keys = input::read_keys(path)?;
    let tree: Tree = keys.iter().copied().collect();

    log::debug!(
        "built tree from {} keys: {} nodes, height {}",
        keys.len(),
        tree.len(),
        tree.height()
    );

    let report = Report::from_tree(&tree)?;
    report.write_to(&mut out).map_err(Error::Write)?;
    out.flush().map_err(Error::Write)
}

impl Node {
    fn leaf(key: Key) -> Box<Node> {
        Box::new(Node {
            key,
            left: None,
            right: None,
        })
    }

    /// Returns the key held by this node.
    #[inline]
    pub fn key(&self) -> Key {
        self.key
    }

    /// Returns the left child, whose subtree holds only smaller keys.
    #[inline]
    pub fn left(&self) -> Option<&Node> {
        self.left.as_deref()
    }

    /// Returns the right child, whose subtree holds only greater keys.
    #[inline]
    pub fn right(&self) -> Option<&Node> {
        self.right.as_deref()
    }

    /// Returns `true` if this node has no children.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    #[inline]
    fn child(&self, dir: Dir) -> Option<&Node> {
        match dir {
            Dir::Left => self.left(),
            Dir::Right => self.right(),
        }
    }

    #[inline]
    fn child_mut(&mut self, dir: Dir) -> &mut Link {
        match dir {
            Dir::Left => &mut self.left,
            Dir::Right => &mut self.right,
        }
    }
}

/// Returns the node holding the smallest key in the subtree rooted at `node`.
pub fn find_min(node: &Node) -> &Node {
    find_extreme(node, Dir::Left)
}

/// Returns the node holding the greatest key in the subtree rooted at `node`.
pub fn find_max(node: &Node) -> &Node {
    find_extreme(node, Dir::Right)
}

fn find_extreme(node: &Node, dir: Dir) -> &Node {
    let mut cur = node;

    while let Some(next) = cur.child(dir) {
        cur = next;
    }

    cur
}

impl Tree {
    /// Returns a new empty tree.
    pub const fn new() -> Tree {
        Tree { root: None, len: 0 }
    }

    /// Returns `true` if the tree contains no keys.
    pub fn is_empty(&self) -> bool {
        let empty = self.len == 0;
        debug_assert_eq!(empty, self.root.is_none());
        empty
    }

    /// Returns the number of keys in the tree.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns the root node, if any.
    pub fn root(&self) -> Option<&Node> {
        self.root.as_deref()
    }

    #[doc(hidden)]
    pub fn assert_invariants(&self) {
        let mut count = 0;
        let mut stack: Vec<(&Node, Option<Key>, Option<Key>)> = Vec::new();
        stack.extend(self.root().map(|root| (root, None, None)));

        while let Some((node, lower, upper)) = stack.pop() {
            count += 1;

            // Every key lies strictly between the bounds set by its ancestors.
            if let Some(lower) = lower {
                assert!(node.key > lower, "{} is not greater than {lower}", node.key);
            }
            if let Some(upper) = upper {
                assert!(node.key < upper, "{} is not less than {upper}", node.key);
            }

            stack.extend(node.left().map(|left| (left, lower, Some(node.key))));
            stack.extend(node.right().map(|right| (right, Some(node.key), upper)));
        }

        assert_eq!(count, self.len, "cached length does not match node count");
    }

    /// Returns the node holding `key`.
    pub fn get(&self, key: Key) -> Option<&Node> {
        let mut opt_cur = self.root();

        loop {
            let cur = opt_cur?;

            match key.cmp(&cur.key) {
                Ordering::Less => opt_cur = cur.left(),
                Ordering::Equal => return Some(cur),
                Ordering::Greater => opt_cur = cur.right(),
            }
        }
    }

    /// Returns `true` if the tree contains `key`.
    pub fn contains(&self, key: Key) -> bool {
        self.get(key).is_some()
    }

    /// Returns the smallest key in the tree.
    pub fn first(&self) -> Option<Key> {
        self.root().map(|root| find_min(root).key)
    }

    /// Returns the greatest key in the tree.
    pub fn last(&self) -> Option<Key> {
        self.root().map(|root| find_max(root).key)
    }

    /// Inserts `key` into the tree.
    ///
    /// The new key always becomes a leaf; no rebalancing takes place. Returns `false` and leaves
    /// the tree untouched if `key` is already present.
    pub fn insert(&mut self, key: Key) -> bool {
        let mut slot = &mut self.root;

        // Descend the tree, looking for the empty slot where `key` belongs.
        while let Some(node) = slot {
            slot = match key.cmp(&node.key) {
                Ordering::Less => &mut node.left,
                Ordering::Greater => &mut node.right,
                Ordering::Equal => {
                    log::trace!("insert({key}): duplicate ignored");
                    return false;
                }
            };
        }

        *slot = Some(Node::leaf(key));
        self.len += 1;

        log::trace!("insert({key}): ok");
        true
    }

    /// Removes `key` from the tree.
    ///
    /// Returns `false` if `key` was not present, in which case the tree is unchanged.
    pub fn delete(&mut self, key: Key) -> bool {
        let removed = delete_from(&mut self.root, key);

        if removed {
            self.len -= 1;
        }

        log::trace!("delete({key}): {}", if removed { "ok" } else { "not found" });
        removed
    }

    /// Removes and returns the smallest key in the tree.
    pub fn pop_first(&mut self) -> Option<Key> {
        let key = take_extreme(&mut self.root, Dir::Left)?;
        self.len -= 1;
        Some(key)
    }

    /// Removes and returns the greatest key in the tree.
    pub fn pop_last(&mut self) -> Option<Key> {
        let key = take_extreme(&mut self.root, Dir::Right)?;
        self.len -= 1;
        Some(key)
    }

    /// Clears the tree, removing all keys.
    pub fn clear(&mut self) {
        while let Some(mut node) = self.root.take() {
            self.root = match node.left.take() {
                // Rotate the left child up so the left spine shrinks by one.
                Some(mut left) => {
                    node.left = left.right.take();
                    left.right = Some(node);
                    Some(left)
                }

                // No left child: elevate the right child and drop the node.
                None => node.right.take(),
            };
        }

        self.len = 0;
    }

    /// Returns an iterator over the keys of the tree in ascending order.
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(self)
    }

    /// Calls `visit` with every key of the tree in ascending order.
    pub fn inorder<F: FnMut(Key)>(&self, visit: F) {
        self.iter().for_each(visit);
    }

    /// Returns the height of the tree; `-1` if it is empty.
    pub fn height(&self) -> isize {
        height(self.root())
    }
}

// Removes `key` from the subtree in `slot`. Returns `false` if it is not there.
fn delete_from(mut slot: &mut Link, key: Key) -> bool {
    loop {
        // Pick the direction through a shared borrow, then descend through a mutable one.
        let Some(node) = slot.as_deref() else {
            return false;
        };

        let dir = match key.cmp(&node.key) {
            Ordering::Less => Dir::Left,
            Ordering::Greater => Dir::Right,
            Ordering::Equal => break,
        };

        slot = match slot {
            Some(node) => node.child_mut(dir),
            None => return false,
        };
    }

    remove_at(slot);
    true
}

// Removes the node in `slot`, putting its replacement in its place.
//
// There are two cases:
//
// 1. The node has at most one child. That child (which may be `None`) is elevated.
//
// 2. The node has two children. The node keeps its place and takes over the key of its
//    successor[^1], and the successor is removed from the right subtree instead. The successor
//    has no left child, so that removal is always case 1.
//
// [^1]: The successor of a node `a` is the least node in `a`'s right subtree.
fn remove_at(slot: &mut Link) {
    let Some(mut node) = slot.take() else {
        return;
    };

    *slot = match (node.left.take(), node.right.take()) {
        (None, child) | (child, None) => child,
        (Some(left), Some(right)) => {
            let successor = find_min(&right).key;

            node.key = successor;
            node.left = Some(left);
            node.right = Some(right);
            delete_from(&mut node.right, successor);

            Some(node)
        }
    };
}

// Removes the outermost node in direction `dir` from the subtree in `slot`, elevating its one
// possible child, and returns its key.
fn take_extreme(mut slot: &mut Link, dir: Dir) -> Option<Key> {
    while slot.as_ref()?.child(dir).is_some() {
        slot = slot.as_mut()?.child_mut(dir);
    }

    let mut node = slot.take()?;
    *slot = node.child_mut(!dir).take();
    Some(node.key)
}

impl Drop for Tree {
    fn drop(&mut self) {
        self.clear();
    }
}

impl fmt::Debug for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl FromIterator<Key> for Tree {
    fn from_iter<I: IntoIterator<Item = Key>>(iter: I) -> Self {
        let mut tree = Tree::new();
        tree.extend(iter);
        tree
    }
}

impl Extend<Key> for Tree {
    fn extend<I: IntoIterator<Item = Key>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<'tree> IntoIterator for &'tree Tree {
    type Item = Key;
    type IntoIter = Iter<'tree>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
