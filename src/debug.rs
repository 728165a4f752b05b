use std::{collections::VecDeque, fmt};

use crate::{Node, Tree};

impl Tree {
    /// Renders the shape of the tree as a Graphviz digraph.
    ///
    /// Each node is labelled `key:balance_factor`; nodes breaking the AVL rule are drawn in red.
    /// Missing children are drawn as points so that left and right stay distinguishable.
    pub fn dotgraph<W>(&self, name: &str, mut w: W) -> fmt::Result
    where
        W: fmt::Write,
    {
        let root = match self.root() {
            Some(r) => r,
            None => return write!(w, "digraph \"graph-{name}\" {{}}"),
        };

        enum Item<'a> {
            Node(&'a Node),
            Missing(u32),
        }

        let mut queue = VecDeque::new();
        queue.push_back(Item::Node(root));

        write!(
            w,
            "digraph \"graph-{name}\" {{\n subgraph \"subgraph-{name}\" {{"
        )?;

        let mut missing = 0;
        let mut edges = String::new();

        // One `rank=same` group per level of the tree.
        loop {
            use fmt::Write;
            let remaining = queue.len();
            if remaining == 0 {
                break;
            }

            write!(w, "{{rank=same; ")?;

            for item in queue.drain(..remaining).collect::<Vec<_>>() {
                let node = match item {
                    Item::Node(node) => node,
                    Item::Missing(id) => {
                        write!(w, "\"graph{name}-missing{id}\" [shape=point]; ")?;
                        continue;
                    }
                };

                let key = node.key();
                let factor = node.balance_factor();
                let color = if factor.abs() > 1 { "red" } else { "black" };
                write!(
                    w,
                    "\"graph{name}-{key}\" [label=\"{key}:{factor}\", color={color}]; "
                )?;

                for child in [node.left(), node.right()] {
                    match child {
                        Some(child) => {
                            queue.push_back(Item::Node(child));
                            writeln!(
                                edges,
                                "\"graph{name}-{key}\" -> \"graph{name}-{}\";",
                                child.key()
                            )?;
                        }
                        None => {
                            queue.push_back(Item::Missing(missing));
                            writeln!(
                                edges,
                                "\"graph{name}-{key}\" -> \"graph{name}-missing{missing}\";"
                            )?;
                            missing += 1;
                        }
                    }
                }
            }

            writeln!(w, "}}")?;
        }

        w.write_str(&edges)?;

        w.write_str(" }\n}")
    }
}
