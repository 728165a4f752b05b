use crate::{Error, Key, Node, Tree};

/// Aggregate values folded over every key of a tree.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Statistics {
    pub min: Key,
    pub max: Key,
    /// Sum of all keys. Wider than [`Key`] so that it cannot overflow.
    pub sum: i64,
    pub count: usize,
}

impl Statistics {
    /// Returns the starting accumulator for a fold, with `min` and `max` both set to `key`.
    ///
    /// `key` is normally the root key; it only seeds the extremes and is not counted.
    pub fn seed(key: Key) -> Statistics {
        Statistics {
            min: key,
            max: key,
            sum: 0,
            count: 0,
        }
    }

    /// Folds every key of the subtree rooted at `node` into `self`.
    ///
    /// An empty subtree returns `self` unchanged.
    #[must_use]
    pub fn collect(mut self, node: Option<&Node>) -> Statistics {
        let mut stack = Vec::new();
        stack.extend(node);

        while let Some(cur) = stack.pop() {
            self.min = self.min.min(cur.key());
            self.max = self.max.max(cur.key());
            self.sum += i64::from(cur.key());
            self.count += 1;

            stack.extend(cur.right());
            stack.extend(cur.left());
        }

        self
    }

    /// Returns the mean of the folded keys.
    ///
    /// Fails with [`Error::EmptyTree`] if nothing has been folded in.
    pub fn average(&self) -> Result<f64, Error> {
        if self.count == 0 {
            return Err(Error::EmptyTree);
        }

        Ok(self.sum as f64 / self.count as f64)
    }
}

impl Tree {
    /// Returns the minimum, maximum, sum and count of the keys in the tree.
    ///
    /// An empty tree has no extremes to report and yields [`Error::EmptyTree`].
    pub fn statistics(&self) -> Result<Statistics, Error> {
        let root = self.root().ok_or(Error::EmptyTree)?;
        Ok(Statistics::seed(root.key()).collect(Some(root)))
    }
}
