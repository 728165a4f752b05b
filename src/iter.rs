use core::iter::FusedIterator;

use crate::{Key, Node, Tree};

/// An iterator over the keys of a [`Tree`] in ascending order.
///
/// Created by [`Tree::iter`].
pub struct Iter<'tree> {
    // Nodes whose left subtree has been exhausted but which have not been yielded yet. The top of
    // the stack is always the next node in order.
    pending: Vec<&'tree Node>,

    len: usize,
}

impl<'tree> Iter<'tree> {
    pub(crate) fn new(tree: &'tree Tree) -> Self {
        let mut iter = Iter {
            pending: Vec::new(),
            len: tree.len(),
        };

        iter.descend(tree.root());
        iter
    }

    // Upon entering a new subtree, walk down to its minimum, remembering every node passed.
    fn descend(&mut self, mut opt_cur: Option<&'tree Node>) {
        while let Some(cur) = opt_cur {
            self.pending.push(cur);
            opt_cur = cur.left();
        }
    }
}

impl Iterator for Iter<'_> {
    type Item = Key;

    fn next(&mut self) -> Option<Self::Item> {
        let cur = self.pending.pop()?;

        // The left subtree of `cur` is done. Its right subtree comes next, before any ancestor.
        self.descend(cur.right());
        self.len -= 1;

        Some(cur.key())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}
