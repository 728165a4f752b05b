use std::io;

use crate::{BalanceFactor, Error, Statistics, Tree};

/// Everything printed about a tree, gathered up front.
///
/// Building a report does not touch the output, so a tree with nothing to report fails before a
/// single line is written.
#[derive(Clone, Debug, PartialEq)]
pub struct Report {
    pub balance_factors: Vec<BalanceFactor>,
    pub is_avl: bool,
    pub statistics: Statistics,
    pub average: f64,
}

impl Report {
    /// Analyzes `tree`.
    ///
    /// Fails with [`Error::EmptyTree`] if the tree has no nodes.
    pub fn from_tree(tree: &Tree) -> Result<Report, Error> {
        let statistics = tree.statistics()?;
        let average = statistics.average()?;

        Ok(Report {
            balance_factors: tree.balance_factors(),
            is_avl: tree.is_avl(),
            statistics,
            average,
        })
    }

    /// Writes the report: one line per node, the AVL verdict, then the statistics.
    pub fn write_to<W: io::Write>(&self, mut w: W) -> io::Result<()> {
        for bf in &self.balance_factors {
            writeln!(w, "{bf}")?;
        }

        writeln!(w, "AVL: {}", if self.is_avl { "yes" } else { "no" })?;

        writeln!(
            w,
            "min: {}, max: {}, avg: {:.1}",
            self.statistics.min, self.statistics.max, self.average
        )
    }
}
