use core::ops::ControlFlow;

use crate::{height::walk_heights, Node, Tree};

/// Returns `true` if every node in the subtree rooted at `node` satisfies the AVL height rule:
/// the heights of its two subtrees differ by at most one.
///
/// An empty subtree is vacuously AVL. A single violating node anywhere makes the whole subtree
/// invalid, and the walk stops at the first one found.
pub fn is_avl(node: Option<&Node>) -> bool {
    let walk = walk_heights(node, |cur, left, right| {
        if (left - right).abs() > 1 {
            log::debug!("not AVL: node {} has heights {left} and {right}", cur.key());
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    });

    walk.is_continue()
}

impl Node {
    /// Returns `true` if the subtree rooted at this node is AVL-balanced.
    pub fn is_avl(&self) -> bool {
        is_avl(Some(self))
    }
}

impl Tree {
    /// Returns `true` if the tree as a whole satisfies the AVL height rule.
    pub fn is_avl(&self) -> bool {
        is_avl(self.root())
    }
}
