use std::{collections::VecDeque, ops::ControlFlow};

use crate::Node;

/// Returns the height of the subtree rooted at `node`.
///
/// An empty subtree has height `-1` and a single leaf has height `0`. Otherwise the height is one
/// more than the greater of the heights of the two children.
///
/// The height is recomputed on every call. The walk goes level by level, so it needs memory
/// proportional to the widest level rather than to the depth of the tree.
pub fn height(node: Option<&Node>) -> isize {
    let Some(root) = node else {
        return -1;
    };

    let mut queue = VecDeque::new();
    queue.push_back(root);

    let mut height = -1;

    while !queue.is_empty() {
        height += 1;

        for _ in 0..queue.len() {
            if let Some(cur) = queue.pop_front() {
                queue.extend(cur.left());
                queue.extend(cur.right());
            }
        }
    }

    height
}

impl Node {
    /// Returns the height of the subtree rooted at this node.
    pub fn height(&self) -> isize {
        height(Some(self))
    }
}

enum Frame<'a> {
    Enter(&'a Node),
    Exit(&'a Node),
}

/// Walks the subtree rooted at `node` bottom-up, passing every node to `visit` together with the
/// heights of its left and right subtrees.
///
/// Nodes are visited right subtree first, then left subtree, then the node itself. Each height is
/// computed once, so the whole walk is linear. `visit` may stop the walk early by returning
/// `ControlFlow::Break`; otherwise the height of `node` is returned.
pub(crate) fn walk_heights<'a, B, F>(node: Option<&'a Node>, mut visit: F) -> ControlFlow<B, isize>
where
    F: FnMut(&'a Node, isize, isize) -> ControlFlow<B>,
{
    let mut stack = Vec::new();
    stack.extend(node.map(Frame::Enter));

    // Heights of finished subtrees whose parent has not been exited yet.
    let mut heights: Vec<isize> = Vec::new();

    while let Some(frame) = stack.pop() {
        match frame {
            Frame::Enter(cur) => {
                stack.push(Frame::Exit(cur));
                stack.extend(cur.left().map(Frame::Enter));
                stack.extend(cur.right().map(Frame::Enter));
            }

            Frame::Exit(cur) => {
                // The left subtree was finished last, so its height is on top.
                let left = cur.left().and_then(|_| heights.pop()).unwrap_or(-1);
                let right = cur.right().and_then(|_| heights.pop()).unwrap_or(-1);

                visit(cur, left, right)?;

                heights.push(1 + left.max(right));
            }
        }
    }

    debug_assert!(heights.len() <= 1);
    ControlFlow::Continue(heights.pop().unwrap_or(-1))
}
