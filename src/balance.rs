use core::{fmt, ops::ControlFlow};

use crate::{
    height::{height, walk_heights},
    Key, Node, Tree,
};

/// The balance factor of a single node, as reported by [`Tree::balance_factors`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BalanceFactor {
    pub key: Key,

    /// Height of the right subtree minus height of the left subtree.
    pub factor: isize,
}

impl BalanceFactor {
    /// Returns `true` if this node breaks the AVL height rule.
    #[inline]
    pub fn is_violation(&self) -> bool {
        self.factor.abs() > 1
    }
}

impl fmt::Display for BalanceFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "bal({}) = {}", self.key, self.factor)?;

        if self.is_violation() {
            f.write_str(" (AVL violation!)")?;
        }

        Ok(())
    }
}

impl Node {
    /// Returns the height of the right subtree minus the height of the left subtree.
    pub fn balance_factor(&self) -> isize {
        height(self.right()) - height(self.left())
    }
}

impl Tree {
    /// Returns the balance factor of the node holding `key`, if there is one.
    pub fn balance_factor(&self, key: Key) -> Option<isize> {
        self.get(key).map(Node::balance_factor)
    }

    /// Returns the balance factor of every node in the tree.
    ///
    /// Nodes are listed right subtree first, then left subtree, then the node itself.
    pub fn balance_factors(&self) -> Vec<BalanceFactor> {
        let mut factors = Vec::with_capacity(self.len());

        let _ = walk_heights(self.root(), |node, left, right| {
            let entry = BalanceFactor {
                key: node.key(),
                factor: right - left,
            };

            if entry.is_violation() {
                log::trace!("AVL violation at {}: {}", entry.key, entry.factor);
            }

            factors.push(entry);
            ControlFlow::<()>::Continue(())
        });

        factors
    }
}
