use core::borrow::Borrow;
use core::ops::{Bound, Index, IndexMut};

use super::{Keys, LlrbMap, Range};
use crate::{Error, Rank};

impl<K, V> LlrbMap<K, V> {
    /// Returns the key-value pair at position `rank` in sorted order.
    ///
    /// This is an order-statistic extension and is not part of the standard
    /// `BTreeMap` API.
    ///
    /// The rank is zero-based. Returns `None` if `rank` is out of bounds.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbMap;
    ///
    /// let mut map = LlrbMap::new();
    /// map.insert("a", 10);
    /// map.insert("c", 30);
    /// map.insert("b", 20);
    ///
    /// let (key, value) = map.get_by_rank(1).unwrap();
    /// assert_eq!((key, value), (&"b", &20));
    /// assert!(map.get_by_rank(3).is_none());
    /// ```
    #[must_use]
    pub fn get_by_rank(&self, rank: usize) -> Option<(&K, &V)> {
        self.raw.get_by_rank(rank)
    }

    /// Returns the key and a mutable reference to the value at position
    /// `rank` in sorted order.
    ///
    /// This is an order-statistic extension and is not part of the standard
    /// `BTreeMap` API.
    ///
    /// The rank is zero-based. Returns `None` if `rank` is out of bounds.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbMap;
    ///
    /// let mut map = LlrbMap::new();
    /// map.insert(10, "a");
    /// map.insert(5, "b");
    ///
    /// if let Some((key, value)) = map.get_by_rank_mut(0) {
    ///     assert_eq!(*key, 5);
    ///     *value = "updated";
    /// }
    ///
    /// assert_eq!(map.get(&5), Some(&"updated"));
    /// ```
    #[must_use]
    pub fn get_by_rank_mut(&mut self, rank: usize) -> Option<(&K, &mut V)> {
        self.raw.get_by_rank_mut(rank)
    }

    /// Returns the key with exactly `rank` smaller keys in the map.
    ///
    /// `select(0)` is the minimum and `select(len() - 1)` the maximum.
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
    /// use llrb_tree::{Error, LlrbMap};
    ///
    /// let map = LlrbMap::from([(30, ()), (10, ()), (20, ())]);
    /// assert_eq!(map.select(0), Ok(&10));
    /// assert_eq!(map.select(2), Ok(&30));
    /// assert_eq!(map.select(3), Err(Error::RankOutOfBounds { rank: 3, len: 3 }));
    /// ```
    pub fn select(&self, rank: usize) -> Result<&K, Error> {
        self.get_by_rank(rank).map(|(k, _)| k).ok_or(Error::RankOutOfBounds {
            rank,
            len: self.len(),
        })
    }
}

impl<K: Ord, V> LlrbMap<K, V> {
    /// Returns the number of keys in the map strictly less than `key`.
    ///
    /// `key` need not be present. For a present key this is its zero-based
    /// position in sorted order.
    ///
    /// This is an order-statistic extension and is not part of the standard
    /// `BTreeMap` API.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbMap;
    ///
    /// let map = LlrbMap::from([(10, "a"), (20, "b"), (30, "c")]);
    /// assert_eq!(map.rank(&20), 1);
    /// assert_eq!(map.rank(&25), 2);
    /// assert_eq!(map.rank(&5), 0);
    /// ```
    #[must_use]
    pub fn rank<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.rank(key)
    }

    /// Returns the zero-based rank of `key` in sorted order, or `None` if the
    /// key is not present.
    ///
    /// This is an order-statistic extension and is not part of the standard
    /// `BTreeMap` API.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbMap;
    ///
    /// let mut map = LlrbMap::new();
    /// map.insert(10, "a");
    /// map.insert(20, "b");
    ///
    /// assert_eq!(map.rank_of(&10), Some(0));
    /// assert_eq!(map.rank_of(&15), None);
    /// ```
    #[must_use]
    pub fn rank_of<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.rank_of(key)
    }

    /// Returns the largest key less than or equal to `key`.
    ///
    /// # Errors
    ///
    /// [`Error::Underflow`] if the map is empty. A non-empty map with no
    /// such key returns `Ok(None)`.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::{Error, LlrbMap};
    ///
    /// let mut map = LlrbMap::new();
    /// assert_eq!(map.floor(&5), Err(Error::Underflow));
    ///
    /// map.insert(2, "b");
    /// map.insert(8, "h");
    /// assert_eq!(map.floor(&5), Ok(Some(&2)));
    /// assert_eq!(map.floor(&8), Ok(Some(&8)));
    /// assert_eq!(map.floor(&1), Ok(None));
    /// ```
    pub fn floor<Q>(&self, key: &Q) -> Result<Option<&K>, Error>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        if self.is_empty() {
            return Err(Error::Underflow);
        }
        Ok(self.raw.floor(key).map(|h| &self.raw.node(h).key))
    }

    /// Returns the smallest key greater than or equal to `key`.
    ///
    /// # Errors
    ///
    /// [`Error::Underflow`] if the map is empty. A non-empty map with no
    /// such key returns `Ok(None)`.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbMap;
    ///
    /// let map = LlrbMap::from([(2, "b"), (8, "h")]);
    /// assert_eq!(map.ceiling(&5), Ok(Some(&8)));
    /// assert_eq!(map.ceiling(&9), Ok(None));
    /// ```
    pub fn ceiling<Q>(&self, key: &Q) -> Result<Option<&K>, Error>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        if self.is_empty() {
            return Err(Error::Underflow);
        }
        Ok(self.raw.ceiling(key).map(|h| &self.raw.node(h).key))
    }

    /// Returns the number of keys in the closed interval `[lo, hi]`, or zero
    /// if `lo > hi`.
    ///
    /// This is an order-statistic extension and is not part of the standard
    /// `BTreeMap` API.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbMap;
    ///
    /// let map: LlrbMap<i32, ()> = (0..10).map(|k| (k * 10, ())).collect();
    /// assert_eq!(map.len_between(&15, &45), 3);
    /// assert_eq!(map.len_between(&20, &40), 3);
    /// assert_eq!(map.len_between(&40, &20), 0);
    /// ```
    #[must_use]
    pub fn len_between<Q>(&self, lo: &Q, hi: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.range_len(Bound::Included(lo), Bound::Included(hi))
    }

    /// Gets an iterator over the keys in the closed interval `[lo, hi]`, in
    /// ascending order. Empty if `lo > hi`.
    ///
    /// # Complexity
    ///
    /// O(log n) to create, amortized O(1) per key.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbMap;
    ///
    /// let map: LlrbMap<char, ()> = "SEARCHEXAMPLE".chars().map(|c| (c, ())).collect();
    /// let keys: String = map.keys_between(&'E', &'Q').collect();
    /// assert_eq!(keys, "EHLMP");
    /// ```
    pub fn keys_between<Q>(&self, lo: &Q, hi: &Q) -> Keys<'_, K, V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        Keys {
            inner: Range::bounded(&self.raw, Bound::Included(lo), Bound::Included(hi)),
        }
    }
}

/// Indexes into the map by rank.
///
/// # Panics
///
/// Panics if `rank` is out of bounds.
///
/// # Examples
///
/// ```
/// use llrb_tree::{LlrbMap, Rank};
///
/// let mut map = LlrbMap::new();
/// map.insert("a", 1);
/// map.insert("b", 2);
///
/// assert_eq!(map[Rank(0)], 1);
/// ```
impl<K, V> Index<Rank> for LlrbMap<K, V> {
    type Output = V;

    fn index(&self, rank: Rank) -> &Self::Output {
        self.get_by_rank(rank.0).map(|(_, v)| v).expect("rank out of bounds")
    }
}

/// Mutably indexes into the map by rank.
///
/// # Panics
///
/// Panics if `rank` is out of bounds.
///
/// # Examples
///
/// ```
/// use llrb_tree::{LlrbMap, Rank};
///
/// let mut map = LlrbMap::from([("a", 1), ("b", 2)]);
/// map[Rank(1)] = 5;
///
/// assert_eq!(map.get(&"b"), Some(&5));
/// ```
impl<K, V> IndexMut<Rank> for LlrbMap<K, V> {
    fn index_mut(&mut self, rank: Rank) -> &mut Self::Output {
        self.get_by_rank_mut(rank.0).map(|(_, v)| v).expect("rank out of bounds")
    }
}
