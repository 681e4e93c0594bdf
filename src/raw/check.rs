use crate::Violation;

use super::handle::Link;
use super::raw_llrb_map::RawLlrbMap;

impl<K: Ord, V> RawLlrbMap<K, V> {
    /// Verifies every tree invariant and reports the first one broken.
    ///
    /// Linear in the number of nodes apart from the rank check, which is
    /// O(n log n). Nothing on the mutation paths calls this.
    pub(crate) fn check(&self) -> Result<(), Violation> {
        if self.is_red(self.root) {
            return Err(Violation::RedRoot);
        }
        self.check_order(self.root, None, None, 0)?;
        let reachable = self.check_sizes(self.root)?;
        if reachable != self.nodes.len() {
            return Err(Violation::LenMismatch {
                len: reachable,
                stored: self.nodes.len(),
            });
        }
        self.check_ranks()?;
        self.check_23(self.root, 0)?;
        self.check_black_balance()
    }

    // Keys must lie strictly inside the open interval set by ancestors.
    fn check_order(&self, link: Link, min: Option<&K>, max: Option<&K>, depth: usize) -> Result<(), Violation> {
        let Some(h) = link else {
            return Ok(());
        };
        let node = self.node(h);
        if min.is_some_and(|min| node.key <= *min) || max.is_some_and(|max| node.key >= *max) {
            return Err(Violation::SymmetricOrder { depth });
        }
        self.check_order(node.left, min, Some(&node.key), depth + 1)?;
        self.check_order(node.right, Some(&node.key), max, depth + 1)
    }

    // Returns the actual node count below `link`.
    fn check_sizes(&self, link: Link) -> Result<usize, Violation> {
        let Some(h) = link else {
            return Ok(0);
        };
        let node = self.node(h);
        let actual = 1 + self.check_sizes(node.left)? + self.check_sizes(node.right)?;
        if node.size != actual {
            return Err(Violation::SizeMismatch {
                recorded: node.size,
                actual,
            });
        }
        Ok(actual)
    }

    fn check_ranks(&self) -> Result<(), Violation> {
        for rank in 0..self.len() {
            let Some(h) = self.select(rank) else {
                return Err(Violation::RankMismatch { rank });
            };
            if self.rank(&self.node(h).key) != rank {
                return Err(Violation::RankMismatch { rank });
            }
        }
        for h in self.in_order() {
            let key = &self.node(h).key;
            let rank = self.rank(key);
            if self.select(rank).is_none_or(|found| self.node(found).key != *key) {
                return Err(Violation::RankMismatch { rank });
            }
        }
        Ok(())
    }

    fn check_23(&self, link: Link, depth: usize) -> Result<(), Violation> {
        let Some(h) = link else {
            return Ok(());
        };
        let node = self.node(h);
        if self.is_red(node.right) {
            return Err(Violation::RedRightLink { depth });
        }
        if node.is_red() && self.is_red(node.left) {
            return Err(Violation::ConsecutiveRedLinks { depth });
        }
        self.check_23(node.left, depth + 1)?;
        self.check_23(node.right, depth + 1)
    }

    // The leftmost path sets the expected black count for every other path.
    fn check_black_balance(&self) -> Result<(), Violation> {
        let mut expected = 0;
        let mut current = self.root;
        while let Some(h) = current {
            let node = self.node(h);
            expected += usize::from(!node.is_red());
            current = node.left;
        }
        self.check_black_height(self.root, 0, expected)
    }

    fn check_black_height(&self, link: Link, blacks: usize, expected: usize) -> Result<(), Violation> {
        let Some(h) = link else {
            if blacks == expected {
                return Ok(());
            }
            return Err(Violation::BlackImbalance { expected, found: blacks });
        };
        let node = self.node(h);
        let blacks = blacks + usize::from(!node.is_red());
        self.check_black_height(node.left, blacks, expected)?;
        self.check_black_height(node.right, blacks, expected)
    }
}
