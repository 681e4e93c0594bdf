use core::borrow::Borrow;
use core::cmp::Ordering;
use core::ops::Bound;

use smallvec::SmallVec;

use super::handle::{Handle, Link};
use super::raw_llrb_map::RawLlrbMap;

/// Pending nodes of an in-order walk; the top is the next node to yield.
pub(crate) type Stack = SmallVec<[Handle; 32]>;

impl<K, V> RawLlrbMap<K, V> {
    /// Handle of the node with the smallest key.
    pub(crate) fn first(&self) -> Link {
        let mut current = self.root?;
        while let Some(left) = self.node(current).left {
            current = left;
        }
        Some(current)
    }

    /// Handle of the node with the largest key.
    pub(crate) fn last(&self) -> Link {
        let mut current = self.root?;
        while let Some(right) = self.node(current).right {
            current = right;
        }
        Some(current)
    }

    pub(crate) fn first_key_value(&self) -> Option<(&K, &V)> {
        self.first().map(|h| self.entry(h))
    }

    pub(crate) fn last_key_value(&self) -> Option<(&K, &V)> {
        self.last().map(|h| self.entry(h))
    }

    #[inline]
    pub(crate) fn entry(&self, h: Handle) -> (&K, &V) {
        let node = self.node(h);
        (&node.key, &node.value)
    }

    /// Handle of the node at zero-based position `rank` in key order.
    pub(crate) fn select(&self, rank: usize) -> Link {
        if rank >= self.len() {
            return None;
        }

        let mut current = self.root;
        let mut remaining = rank;
        while let Some(h) = current {
            let node = self.node(h);
            let smaller = self.size_of(node.left);
            current = match remaining.cmp(&smaller) {
                Ordering::Less => node.left,
                Ordering::Greater => {
                    remaining -= smaller + 1;
                    node.right
                }
                Ordering::Equal => return Some(h),
            };
        }
        debug_assert!(false, "select: size fields disagree with the shape at rank {rank}");
        None
    }

    /// Gets an element by its rank (0-indexed position in sorted order).
    pub(crate) fn get_by_rank(&self, rank: usize) -> Option<(&K, &V)> {
        self.select(rank).map(|h| self.entry(h))
    }

    /// Gets an element by its rank with a mutable value.
    pub(crate) fn get_by_rank_mut(&mut self, rank: usize) -> Option<(&K, &mut V)> {
        let h = self.select(rank)?;
        let node = self.node_mut(h);
        Some((&node.key, &mut node.value))
    }

    /// Number of edges on the longest root-to-leaf path.
    pub(crate) fn height(&self) -> Option<usize> {
        self.root.map(|root| self.height_at(root))
    }

    fn height_at(&self, h: Handle) -> usize {
        let node = self.node(h);
        if node.is_leaf() {
            return 0;
        }
        let left = node.left.map_or(0, |l| self.height_at(l));
        let right = node.right.map_or(0, |r| self.height_at(r));
        1 + left.max(right)
    }

    /// Pushes `link` and its chain of left children.
    pub(crate) fn push_left_spine(&self, link: Link, stack: &mut Stack) {
        let mut current = link;
        while let Some(h) = current {
            stack.push(h);
            current = self.node(h).left;
        }
    }

    /// Pushes `link` and its chain of right children.
    pub(crate) fn push_right_spine(&self, link: Link, stack: &mut Stack) {
        let mut current = link;
        while let Some(h) = current {
            stack.push(h);
            current = self.node(h).right;
        }
    }
}

impl<K: Ord, V> RawLlrbMap<K, V> {
    /// Number of keys strictly less than `key`, plus one if `inclusive` and
    /// `key` is present.
    fn count_below<Q>(&self, key: &Q, inclusive: bool) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut count = 0;
        let mut current = self.root;
        while let Some(h) = current {
            let node = self.node(h);
            match key.cmp(node.key.borrow()) {
                Ordering::Less => current = node.left,
                Ordering::Greater => {
                    count += 1 + self.size_of(node.left);
                    current = node.right;
                }
                Ordering::Equal => return count + self.size_of(node.left) + usize::from(inclusive),
            }
        }
        count
    }

    /// Number of keys strictly less than `key`.
    pub(crate) fn rank<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.count_below(key, false)
    }

    /// Returns the rank of `key` only if it is present.
    pub(crate) fn rank_of<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut rank = 0;
        let mut current = self.root;
        while let Some(h) = current {
            let node = self.node(h);
            match key.cmp(node.key.borrow()) {
                Ordering::Less => current = node.left,
                Ordering::Greater => {
                    rank += 1 + self.size_of(node.left);
                    current = node.right;
                }
                Ordering::Equal => return Some(rank + self.size_of(node.left)),
            }
        }
        None
    }

    /// Handle of the largest key less than or equal to `key`.
    pub(crate) fn floor<Q>(&self, key: &Q) -> Link
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut best = None;
        let mut current = self.root;
        while let Some(h) = current {
            let node = self.node(h);
            match key.cmp(node.key.borrow()) {
                Ordering::Less => current = node.left,
                Ordering::Greater => {
                    best = Some(h);
                    current = node.right;
                }
                Ordering::Equal => return Some(h),
            }
        }
        best
    }

    /// Handle of the smallest key greater than or equal to `key`.
    pub(crate) fn ceiling<Q>(&self, key: &Q) -> Link
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut best = None;
        let mut current = self.root;
        while let Some(h) = current {
            let node = self.node(h);
            match key.cmp(node.key.borrow()) {
                Ordering::Greater => current = node.right,
                Ordering::Less => {
                    best = Some(h);
                    current = node.left;
                }
                Ordering::Equal => return Some(h),
            }
        }
        best
    }

    /// Position of the first key admitted by `lower`.
    fn start_rank<Q>(&self, lower: Bound<&Q>) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        match lower {
            Bound::Included(lo) => self.count_below(lo, false),
            Bound::Excluded(lo) => self.count_below(lo, true),
            Bound::Unbounded => 0,
        }
    }

    /// Position one past the last key admitted by `upper`.
    fn end_rank<Q>(&self, upper: Bound<&Q>) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        match upper {
            Bound::Included(hi) => self.count_below(hi, true),
            Bound::Excluded(hi) => self.count_below(hi, false),
            Bound::Unbounded => self.len(),
        }
    }

    /// Number of keys between the two bounds; zero when they cross.
    pub(crate) fn range_len<Q>(&self, lower: Bound<&Q>, upper: Bound<&Q>) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.end_rank(upper).saturating_sub(self.start_rank(lower))
    }

    /// Seeds `stack` so that its top is the smallest key admitted by `lower`.
    pub(crate) fn seek_front<Q>(&self, lower: Bound<&Q>, stack: &mut Stack)
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = self.root;
        while let Some(h) = current {
            let node = self.node(h);
            let admitted = match lower {
                Bound::Included(lo) => lo.cmp(node.key.borrow()).is_le(),
                Bound::Excluded(lo) => lo.cmp(node.key.borrow()).is_lt(),
                Bound::Unbounded => true,
            };
            if admitted {
                stack.push(h);
                current = node.left;
            } else {
                current = node.right;
            }
        }
    }

    /// Seeds `stack` so that its top is the largest key admitted by `upper`.
    pub(crate) fn seek_back<Q>(&self, upper: Bound<&Q>, stack: &mut Stack)
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = self.root;
        while let Some(h) = current {
            let node = self.node(h);
            let admitted = match upper {
                Bound::Included(hi) => hi.cmp(node.key.borrow()).is_ge(),
                Bound::Excluded(hi) => hi.cmp(node.key.borrow()).is_gt(),
                Bound::Unbounded => true,
            };
            if admitted {
                stack.push(h);
                current = node.right;
            } else {
                current = node.left;
            }
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use proptest::prelude::*;

    fn tree_of(keys: impl IntoIterator<Item = i32>) -> RawLlrbMap<i32, i32> {
        let mut tree = RawLlrbMap::new();
        for key in keys {
            tree.insert(key, key.wrapping_neg());
        }
        tree
    }

    fn key_at(tree: &RawLlrbMap<i32, i32>, link: Link) -> Option<i32> {
        link.map(|h| tree.node(h).key)
    }

    #[test]
    fn empty_tree_has_no_answers() {
        let tree: RawLlrbMap<i32, i32> = RawLlrbMap::new();
        assert_eq!(tree.first(), None);
        assert_eq!(tree.last(), None);
        assert_eq!(tree.select(0), None);
        assert_eq!(tree.floor(&1), None);
        assert_eq!(tree.ceiling(&1), None);
        assert_eq!(tree.rank(&1), 0);
        assert_eq!(tree.height(), None);
    }

    #[test]
    fn floor_and_ceiling_between_keys() {
        let tree = tree_of([10, 20, 30, 40]);
        assert_eq!(key_at(&tree, tree.floor(&25)), Some(20));
        assert_eq!(key_at(&tree, tree.ceiling(&25)), Some(30));
        assert_eq!(key_at(&tree, tree.floor(&30)), Some(30));
        assert_eq!(key_at(&tree, tree.floor(&5)), None);
        assert_eq!(key_at(&tree, tree.ceiling(&45)), None);
    }

    #[test]
    fn range_len_handles_every_bound() {
        let tree = tree_of((0..20).map(|k| k * 2));
        assert_eq!(tree.range_len(Bound::Included(&4), Bound::Included(&10)), 4);
        assert_eq!(tree.range_len(Bound::Excluded(&4), Bound::Included(&10)), 3);
        assert_eq!(tree.range_len(Bound::Included(&5), Bound::Excluded(&10)), 2);
        assert_eq!(tree.range_len::<i32>(Bound::Unbounded, Bound::Unbounded), 20);
        assert_eq!(tree.range_len(Bound::Included(&10), Bound::Included(&4)), 0);
    }

    #[test]
    fn single_node_height_is_zero() {
        let tree = tree_of([1]);
        assert_eq!(tree.height(), Some(0));
        let tree = tree_of([1, 2, 3]);
        assert_eq!(tree.height(), Some(1));
    }

    #[test]
    fn seek_puts_bound_on_top() {
        let tree = tree_of(0..64);
        let mut stack = Stack::new();
        tree.seek_front(Bound::Excluded(&31), &mut stack);
        assert_eq!(key_at(&tree, stack.last().copied()), Some(32));

        let mut stack = Stack::new();
        tree.seek_back(Bound::Excluded(&31), &mut stack);
        assert_eq!(key_at(&tree, stack.last().copied()), Some(30));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn queries_match_sorted_vec(keys in prop::collection::vec(-500i32..500, 1..300), probe in -600i32..600) {
            let tree = tree_of(keys.iter().copied());
            let mut sorted = keys.clone();
            sorted.sort_unstable();
            sorted.dedup();

            prop_assert_eq!(tree.len(), sorted.len());
            prop_assert_eq!(key_at(&tree, tree.first()), sorted.first().copied());
            prop_assert_eq!(key_at(&tree, tree.last()), sorted.last().copied());

            for (i, &key) in sorted.iter().enumerate() {
                prop_assert_eq!(key_at(&tree, tree.select(i)), Some(key));
                prop_assert_eq!(tree.rank(&key), i);
                prop_assert_eq!(tree.rank_of(&key), Some(i));
            }
            prop_assert_eq!(tree.select(sorted.len()), None);

            let below = sorted.iter().filter(|&&k| k < probe).count();
            prop_assert_eq!(tree.rank(&probe), below);
            prop_assert_eq!(key_at(&tree, tree.floor(&probe)), sorted.iter().rev().find(|&&k| k <= probe).copied());
            prop_assert_eq!(key_at(&tree, tree.ceiling(&probe)), sorted.iter().find(|&&k| k >= probe).copied());
        }

        #[test]
        fn height_is_logarithmic(keys in prop::collection::vec(any::<i32>(), 1..1000)) {
            let tree = tree_of(keys);
            // 2 * ceil(lg(n + 1))
            let bound = 2 * (usize::BITS - tree.len().leading_zeros()) as usize;
            prop_assert!(tree.height().unwrap() <= bound);
        }
    }

    #[test]
    fn seek_on_empty_leaves_stack_empty() {
        let tree: RawLlrbMap<i32, i32> = RawLlrbMap::new();
        let mut stack = Stack::new();
        tree.seek_front(Bound::Included(&0), &mut stack);
        tree.seek_back::<i32>(Bound::Unbounded, &mut stack);
        assert!(stack.is_empty());
        assert_eq!(tree.in_order(), Vec::new());
    }
}
