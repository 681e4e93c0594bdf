use core::borrow::Borrow;
use core::ops::Index;

use super::{Iter, LlrbSet};
use crate::{Error, Rank};

impl<T> LlrbSet<T> {
    /// Returns the element at position `rank` in sorted order, or `None` if
    /// `rank` is out of bounds.
    ///
    /// This is an order-statistic extension and is not part of the standard
    /// `BTreeSet` API.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbSet;
    ///
    /// let set = LlrbSet::from([30, 10, 20]);
    /// assert_eq!(set.get_by_rank(0), Some(&10));
    /// assert_eq!(set.get_by_rank(3), None);
    /// ```
    #[must_use]
    pub fn get_by_rank(&self, rank: usize) -> Option<&T> {
        self.map.get_by_rank(rank).map(|(k, ())| k)
    }

    /// Returns the element with exactly `rank` smaller elements in the set.
    ///
    /// # Errors
    ///
    /// [`Error::RankOutOfBounds`] if `rank >= len()`.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::{Error, LlrbSet};
    ///
    /// let set = LlrbSet::from(['c', 'a', 'b']);
    /// assert_eq!(set.select(1), Ok(&'b'));
    /// assert_eq!(set.select(9), Err(Error::RankOutOfBounds { rank: 9, len: 3 }));
    /// ```
    pub fn select(&self, rank: usize) -> Result<&T, Error> {
        self.map.select(rank)
    }
}

impl<T: Ord> LlrbSet<T> {
    /// Returns the number of elements strictly less than `value`, which need
    /// not be present.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbSet;
    ///
    /// let set = LlrbSet::from([10, 20, 30]);
    /// assert_eq!(set.rank(&20), 1);
    /// assert_eq!(set.rank(&35), 3);
    /// ```
    #[must_use]
    pub fn rank<Q>(&self, value: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.map.rank(value)
    }

    /// Returns the zero-based rank of `value`, or `None` if it is not in the
    /// set.
    ///
    /// This is an order-statistic extension and is not part of the standard
    /// `BTreeSet` API.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbSet;
    ///
    /// let set = LlrbSet::from([10, 20, 30]);
    /// assert_eq!(set.rank_of(&30), Some(2));
    /// assert_eq!(set.rank_of(&25), None);
    /// ```
    #[must_use]
    pub fn rank_of<Q>(&self, value: &Q) -> Option<usize>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.map.rank_of(value)
    }

    /// Returns the largest element less than or equal to `value`.
    ///
    /// # Errors
    ///
    /// [`Error::Underflow`] if the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbSet;
    ///
    /// let set = LlrbSet::from([2, 8]);
    /// assert_eq!(set.floor(&5), Ok(Some(&2)));
    /// assert_eq!(set.floor(&1), Ok(None));
    /// ```
    pub fn floor<Q>(&self, value: &Q) -> Result<Option<&T>, Error>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.map.floor(value)
    }

    /// Returns the smallest element greater than or equal to `value`.
    ///
    /// # Errors
    ///
    /// [`Error::Underflow`] if the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbSet;
    ///
    /// let set = LlrbSet::from([2, 8]);
    /// assert_eq!(set.ceiling(&5), Ok(Some(&8)));
    /// assert_eq!(set.ceiling(&9), Ok(None));
    /// ```
    pub fn ceiling<Q>(&self, value: &Q) -> Result<Option<&T>, Error>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.map.ceiling(value)
    }

    /// Returns the number of elements in the closed interval `[lo, hi]`, or
    /// zero if `lo > hi`.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbSet;
    ///
    /// let set: LlrbSet<u32> = (1..=10).collect();
    /// assert_eq!(set.len_between(&3, &7), 5);
    /// assert_eq!(set.len_between(&7, &3), 0);
    /// ```
    #[must_use]
    pub fn len_between<Q>(&self, lo: &Q, hi: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.map.len_between(lo, hi)
    }

    /// Gets an iterator over the elements in the closed interval `[lo, hi]`,
    /// in ascending order. Empty if `lo > hi`.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbSet;
    ///
    /// let set: LlrbSet<u32> = (1..=10).collect();
    /// assert!(set.between(&3, &5).eq([3, 4, 5].iter()));
    /// ```
    pub fn between<Q>(&self, lo: &Q, hi: &Q) -> Iter<'_, T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        Iter {
            inner: self.map.keys_between(lo, hi),
        }
    }
}

/// Indexes into the set by rank.
///
/// # Panics
///
/// Panics if `rank` is out of bounds.
///
/// # Examples
///
/// ```
/// use llrb_tree::{LlrbSet, Rank};
///
/// let set = LlrbSet::from(["b", "a"]);
/// assert_eq!(set[Rank(0)], "a");
/// ```
impl<T> Index<Rank> for LlrbSet<T> {
    type Output = T;

    fn index(&self, rank: Rank) -> &Self::Output {
        self.get_by_rank(rank.0).expect("rank out of bounds")
    }
}
