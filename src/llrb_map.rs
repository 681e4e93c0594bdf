use core::borrow::Borrow;
use core::fmt;
use core::iter::FusedIterator;
use core::ops::{Bound, Index, RangeBounds};

use alloc::vec;

use crate::raw::{RawLlrbMap, Stack};
use crate::{Error, Violation};

mod capacity;
mod order_statistic;

/// An ordered symbol table based on a [left-leaning red-black tree].
///
/// Keys are kept in symmetric order, so iteration, [`range`] and the
/// order-statistic queries ([`rank`], [`select`], [`floor`], [`ceiling`])
/// all see them sorted. Every node records the size of its subtree, which
/// makes those queries O(log n) alongside the usual lookups.
///
/// It is a logic error for a key to be modified in such a way that the key's ordering relative to
/// any other key, as determined by the [`Ord`] trait, changes while it is in the map. This is
/// normally only possible through [`Cell`], [`RefCell`], global state, I/O, or unsafe code.
/// The behavior resulting from such a logic error is not specified, but will be encapsulated to the
/// `LlrbMap` that observed the logic error and not result in undefined behavior.
///
/// # Examples
///
/// ```
/// use llrb_tree::LlrbMap;
///
/// let mut table = LlrbMap::new();
/// for (i, key) in "SEARCHEXAMPLE".chars().enumerate() {
///     table.insert(key, i);
/// }
///
/// // `E` and `A` appear more than once; later values win.
/// assert_eq!(table.len(), 10);
/// assert_eq!(table.get(&'E'), Some(&12));
/// assert_eq!(table.min(), Ok(&'A'));
/// assert_eq!(table.max(), Ok(&'X'));
/// assert_eq!(table.rank(&'M'), 5);
/// assert_eq!(table.floor(&'F'), Ok(Some(&'E')));
/// assert_eq!(table.ceiling(&'F'), Ok(Some(&'H')));
///
/// let keys: String = table.keys().collect();
/// assert_eq!(keys, "ACEHLMPRSX");
/// ```
///
/// # Background
///
/// A left-leaning red-black tree encodes a 2-3 tree as a binary search
/// tree. A 3-node is a pair of nodes joined by a red link, and red links
/// always lean left. Perfect balance of the 2-3 tree becomes perfect
/// *black* balance of the binary tree, which bounds the height by
/// 2 lg n. Insertion and deletion restore the shape with rotations and
/// color flips on the way back up the search path.
///
/// Nodes live in an arena owned by the map and refer to their children by
/// index, so a removed node's slot is reused by the next insertion.
///
/// [left-leaning red-black tree]: https://en.wikipedia.org/wiki/Left-leaning_red%E2%80%93black_tree
/// [`range`]: LlrbMap::range
/// [`rank`]: LlrbMap::rank
/// [`select`]: LlrbMap::select
/// [`floor`]: LlrbMap::floor
/// [`ceiling`]: LlrbMap::ceiling
/// [`Cell`]: core::cell::Cell
/// [`RefCell`]: core::cell::RefCell
pub struct LlrbMap<K, V> {
    raw: RawLlrbMap<K, V>,
}

/// An iterator over a sub-range of entries in a `LlrbMap`.
///
/// This `struct` is created by the [`range`] method on [`LlrbMap`]; [`iter`]
/// wraps one that spans the whole map. See their documentation for more.
///
/// [`range`]: LlrbMap::range
/// [`iter`]: LlrbMap::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Range<'a, K, V> {
    tree: &'a RawLlrbMap<K, V>,
    front: Stack,
    back: Stack,
    remaining: usize,
}

/// An iterator over the entries of a `LlrbMap`.
///
/// This `struct` is created by the [`iter`] method on [`LlrbMap`]. See its
/// documentation for more.
///
/// # Examples
///
/// ```
/// use llrb_tree::LlrbMap;
///
/// let map = LlrbMap::from([(1, "a"), (2, "b")]);
/// let mut iter = map.iter();
/// assert_eq!(iter.next(), Some((&1, &"a")));
/// assert_eq!(iter.next_back(), Some((&2, &"b")));
/// assert_eq!(iter.next(), None);
/// ```
///
/// [`iter`]: LlrbMap::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, K, V> {
    inner: Range<'a, K, V>,
}

/// An iterator over the keys of a `LlrbMap`.
///
/// This `struct` is created by the [`keys`] and [`keys_between`] methods on
/// [`LlrbMap`]. See their documentation for more.
///
/// [`keys`]: LlrbMap::keys
/// [`keys_between`]: LlrbMap::keys_between
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Keys<'a, K, V> {
    inner: Range<'a, K, V>,
}

/// An iterator over the values of a `LlrbMap`.
///
/// This `struct` is created by the [`values`] method on [`LlrbMap`]. See its
/// documentation for more.
///
/// [`values`]: LlrbMap::values
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Values<'a, K, V> {
    inner: Range<'a, K, V>,
}

/// An owning iterator over the entries of a `LlrbMap`, sorted by key.
///
/// This `struct` is created by the [`into_iter`] method on [`LlrbMap`]
/// (provided by the [`IntoIterator`] trait). See its documentation for more.
///
/// [`into_iter`]: IntoIterator::into_iter
pub struct IntoIter<K, V> {
    inner: vec::IntoIter<(K, V)>,
}

/// An owning iterator over the keys of a `LlrbMap`.
///
/// This `struct` is created by the [`into_keys`] method on [`LlrbMap`].
///
/// [`into_keys`]: LlrbMap::into_keys
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct IntoKeys<K, V> {
    inner: IntoIter<K, V>,
}

/// An owning iterator over the values of a `LlrbMap`.
///
/// This `struct` is created by the [`into_values`] method on [`LlrbMap`].
///
/// [`into_values`]: LlrbMap::into_values
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct IntoValues<K, V> {
    inner: IntoIter<K, V>,
}

// Puts back the entry under test and the unvisited ones if the `retain`
// predicate unwinds. Empty by the time a normal pass finishes.
struct RetainGuard<'a, K: Ord, V> {
    tree: &'a mut RawLlrbMap<K, V>,
    current: Option<(K, V)>,
    rest: vec::IntoIter<(K, V)>,
}

impl<K: Ord, V> Drop for RetainGuard<'_, K, V> {
    fn drop(&mut self) {
        for (key, value) in self.current.take().into_iter().chain(self.rest.by_ref()) {
            self.tree.insert(key, value);
        }
    }
}

impl<'a, K, V> Range<'a, K, V> {
    fn full(tree: &'a RawLlrbMap<K, V>) -> Self {
        let mut front = Stack::new();
        let mut back = Stack::new();
        tree.push_left_spine(tree.root(), &mut front);
        tree.push_right_spine(tree.root(), &mut back);
        Range {
            tree,
            front,
            back,
            remaining: tree.len(),
        }
    }

    fn bounded<Q>(tree: &'a RawLlrbMap<K, V>, lower: Bound<&Q>, upper: Bound<&Q>) -> Self
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        let remaining = tree.range_len(lower, upper);
        let mut front = Stack::new();
        let mut back = Stack::new();
        if remaining > 0 {
            tree.seek_front(lower, &mut front);
            tree.seek_back(upper, &mut back);
        }
        Range {
            tree,
            front,
            back,
            remaining,
        }
    }
}

impl<K, V> LlrbMap<K, V> {
    /// Makes a new, empty `LlrbMap`.
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Complexity
    ///
    /// O(1)
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbMap;
    ///
    /// let mut map = LlrbMap::new();
    ///
    /// // entries can now be inserted into the empty map
    /// map.insert(1, "a");
    /// ```
    #[must_use]
    pub const fn new() -> LlrbMap<K, V> {
        LlrbMap { raw: RawLlrbMap::new() }
    }

    /// Clears the map, removing all elements.
    ///
    /// # Complexity
    ///
    /// O(n)
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbMap;
    ///
    /// let mut a = LlrbMap::new();
    /// a.insert(1, "a");
    /// a.clear();
    /// assert!(a.is_empty());
    /// ```
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Returns the number of elements in the map.
    ///
    /// # Complexity
    ///
    /// O(1) - read from the root's subtree size.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbMap;
    ///
    /// let mut a = LlrbMap::new();
    /// assert_eq!(a.len(), 0);
    /// a.insert(1, "a");
    /// assert_eq!(a.len(), 1);
    /// ```
    #[must_use]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the map contains no elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbMap;
    ///
    /// let mut a = LlrbMap::new();
    /// assert!(a.is_empty());
    /// a.insert(1, "a");
    /// assert!(!a.is_empty());
    /// ```
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Returns the first key-value pair in the map.
    /// The key in this pair is the minimum key in the map.
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
    /// assert_eq!(map.first_key_value(), None);
    /// map.insert(1, "b");
    /// map.insert(2, "a");
    /// assert_eq!(map.first_key_value(), Some((&1, &"b")));
    /// ```
    #[must_use]
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.raw.first_key_value()
    }

    /// Returns the last key-value pair in the map.
    /// The key in this pair is the maximum key in the map.
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
    /// map.insert(1, "b");
    /// map.insert(2, "a");
    /// assert_eq!(map.last_key_value(), Some((&2, &"a")));
    /// ```
    #[must_use]
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self.raw.last_key_value()
    }

    /// Returns the smallest key.
    ///
    /// # Errors
    ///
    /// [`Error::Underflow`] if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::{Error, LlrbMap};
    ///
    /// let mut map = LlrbMap::new();
    /// assert_eq!(map.min(), Err(Error::Underflow));
    /// map.insert(3, "c");
    /// map.insert(1, "a");
    /// assert_eq!(map.min(), Ok(&1));
    /// ```
    pub fn min(&self) -> Result<&K, Error> {
        self.first_key_value().map(|(k, _)| k).ok_or(Error::Underflow)
    }

    /// Returns the largest key.
    ///
    /// # Errors
    ///
    /// [`Error::Underflow`] if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbMap;
    ///
    /// let map = LlrbMap::from([(3, "c"), (1, "a")]);
    /// assert_eq!(map.max(), Ok(&3));
    /// ```
    pub fn max(&self) -> Result<&K, Error> {
        self.last_key_value().map(|(k, _)| k).ok_or(Error::Underflow)
    }

    /// Removes and returns the entry with the smallest key.
    ///
    /// # Errors
    ///
    /// [`Error::Underflow`] if the map is empty; the map is left unchanged.
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
    /// let mut map = LlrbMap::from([(2, "b"), (1, "a")]);
    /// assert_eq!(map.delete_min(), Ok((1, "a")));
    /// assert_eq!(map.delete_min(), Ok((2, "b")));
    /// assert_eq!(map.delete_min(), Err(Error::Underflow));
    /// ```
    pub fn delete_min(&mut self) -> Result<(K, V), Error> {
        self.raw.pop_first().ok_or(Error::Underflow)
    }

    /// Removes and returns the entry with the largest key.
    ///
    /// # Errors
    ///
    /// [`Error::Underflow`] if the map is empty; the map is left unchanged.
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
    /// let mut map = LlrbMap::from([(2, "b"), (1, "a")]);
    /// assert_eq!(map.delete_max(), Ok((2, "b")));
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn delete_max(&mut self) -> Result<(K, V), Error> {
        self.raw.pop_last().ok_or(Error::Underflow)
    }

    /// Removes and returns the first element in the map, or `None` if it is
    /// empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbMap;
    ///
    /// let mut map = LlrbMap::new();
    /// map.insert(1, "a");
    /// map.insert(2, "b");
    /// while let Some((key, _val)) = map.pop_first() {
    ///     assert!(map.iter().all(|(k, _v)| *k > key));
    /// }
    /// assert!(map.is_empty());
    /// ```
    pub fn pop_first(&mut self) -> Option<(K, V)> {
        self.raw.pop_first()
    }

    /// Removes and returns the last element in the map, or `None` if it is
    /// empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbMap;
    ///
    /// let mut map = LlrbMap::from([(1, "a"), (2, "b")]);
    /// assert_eq!(map.pop_last(), Some((2, "b")));
    /// ```
    pub fn pop_last(&mut self) -> Option<(K, V)> {
        self.raw.pop_last()
    }

    /// Returns the number of edges on the longest path from the root to a
    /// leaf, or `None` if the map is empty.
    ///
    /// Balance keeps this at most 2 lg(n + 1).
    ///
    /// # Complexity
    ///
    /// O(n)
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbMap;
    ///
    /// let mut map = LlrbMap::new();
    /// assert_eq!(map.height(), None);
    /// map.insert(1, ());
    /// assert_eq!(map.height(), Some(0));
    /// map.extend((2..=1000).map(|k| (k, ())));
    /// assert!(map.height().unwrap() <= 20);
    /// ```
    #[must_use]
    pub fn height(&self) -> Option<usize> {
        self.raw.height()
    }

    /// Gets an iterator over the entries of the map, sorted by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbMap;
    ///
    /// let mut map = LlrbMap::new();
    /// map.insert(3, "c");
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    ///
    /// for (key, value) in map.iter() {
    ///     println!("{key}: {value}");
    /// }
    ///
    /// let (first_key, first_value) = map.iter().next().unwrap();
    /// assert_eq!((*first_key, *first_value), (1, "a"));
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: Range::full(&self.raw),
        }
    }

    /// Gets an iterator over the keys of the map, in sorted order.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbMap;
    ///
    /// let mut a = LlrbMap::new();
    /// a.insert(2, "b");
    /// a.insert(1, "a");
    ///
    /// let keys: Vec<_> = a.keys().cloned().collect();
    /// assert_eq!(keys, [1, 2]);
    /// ```
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys {
            inner: Range::full(&self.raw),
        }
    }

    /// Gets an iterator over the values of the map, in order by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbMap;
    ///
    /// let mut a = LlrbMap::new();
    /// a.insert(1, "hello");
    /// a.insert(2, "goodbye");
    ///
    /// let values: Vec<&str> = a.values().cloned().collect();
    /// assert_eq!(values, ["hello", "goodbye"]);
    /// ```
    pub fn values(&self) -> Values<'_, K, V> {
        Values {
            inner: Range::full(&self.raw),
        }
    }

    /// Creates a consuming iterator visiting all the keys, in sorted order.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbMap;
    ///
    /// let map = LlrbMap::from([(2, "b"), (1, "a")]);
    /// let keys: Vec<i32> = map.into_keys().collect();
    /// assert_eq!(keys, [1, 2]);
    /// ```
    pub fn into_keys(self) -> IntoKeys<K, V> {
        IntoKeys {
            inner: self.into_iter(),
        }
    }

    /// Creates a consuming iterator visiting all the values, in order by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbMap;
    ///
    /// let map = LlrbMap::from([(2, "b"), (1, "a")]);
    /// let values: Vec<&str> = map.into_values().collect();
    /// assert_eq!(values, ["a", "b"]);
    /// ```
    pub fn into_values(self) -> IntoValues<K, V> {
        IntoValues {
            inner: self.into_iter(),
        }
    }
}

impl<K: Ord, V> LlrbMap<K, V> {
    /// Returns a reference to the value corresponding to the key.
    ///
    /// The key may be any borrowed form of the map's key type, but the ordering
    /// on the borrowed form *must* match the ordering on the key type.
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
    /// map.insert(1, "a");
    /// assert_eq!(map.get(&1), Some(&"a"));
    /// assert_eq!(map.get(&2), None);
    /// ```
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.get(key)
    }

    /// Returns the key-value pair corresponding to the supplied key.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbMap;
    ///
    /// let mut map = LlrbMap::new();
    /// map.insert(String::from("a"), 1);
    /// assert_eq!(map.get_key_value("a"), Some((&String::from("a"), &1)));
    /// assert_eq!(map.get_key_value("b"), None);
    /// ```
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.get_key_value(key)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbMap;
    ///
    /// let mut map = LlrbMap::new();
    /// map.insert(1, "a");
    /// if let Some(x) = map.get_mut(&1) {
    ///     *x = "b";
    /// }
    /// assert_eq!(map[&1], "b");
    /// ```
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.get_mut(key)
    }

    /// Returns `true` if the map contains a value for the specified key.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbMap;
    ///
    /// let mut map = LlrbMap::new();
    /// map.insert(1, "a");
    /// assert!(map.contains_key(&1));
    /// assert!(!map.contains_key(&2));
    /// ```
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.contains_key(key)
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the map did not have this key present, `None` is returned.
    ///
    /// If the map did have this key present, the value is updated in place
    /// and the old value is returned. The key is not updated and the tree's
    /// shape does not change.
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
    /// assert_eq!(map.insert(37, "a"), None);
    /// assert_eq!(map.is_empty(), false);
    ///
    /// map.insert(37, "b");
    /// assert_eq!(map.insert(37, "c"), Some("b"));
    /// assert_eq!(map[&37], "c");
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.raw.insert(key, value)
    }

    /// Removes a key from the map, returning the value at the key if the key
    /// was previously in the map.
    ///
    /// Removing an absent key is a no-op.
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
    /// map.insert(1, "a");
    /// assert_eq!(map.remove(&1), Some("a"));
    /// assert_eq!(map.remove(&1), None);
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.remove_entry(key).map(|(_, v)| v)
    }

    /// Removes a key from the map, returning the stored key and value if the
    /// key was previously in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbMap;
    ///
    /// let mut map = LlrbMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.remove_entry(&1), Some((1, "a")));
    /// assert_eq!(map.remove_entry(&1), None);
    /// ```
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.remove_entry(key)
    }

    /// Retains only the elements specified by the predicate.
    ///
    /// In other words, remove all pairs `(k, v)` for which `f(&k, &mut v)`
    /// returns `false`. The elements are visited in ascending key order.
    ///
    /// # Complexity
    ///
    /// O(n log n) - the surviving entries are reinserted into a fresh tree.
    ///
    /// If `f` panics, the entry it was called on and every entry not yet
    /// visited stay in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbMap;
    ///
    /// let mut map: LlrbMap<i32, i32> = (0..8).map(|x| (x, x * 10)).collect();
    /// // Keep only the elements with even-numbered keys.
    /// map.retain(|&k, _| k % 2 == 0);
    /// assert!(map.into_iter().eq(vec![(0, 0), (2, 20), (4, 40), (6, 60)]));
    /// ```
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&K, &mut V) -> bool,
    {
        let entries = self.raw.drain_to_vec();
        let mut guard = RetainGuard {
            tree: &mut self.raw,
            current: None,
            rest: entries.into_iter(),
        };
        while let Some(entry) = guard.rest.next() {
            let (key, value) = guard.current.insert(entry);
            if !f(key, value) {
                guard.current = None;
            }
            if let Some((key, value)) = guard.current.take() {
                guard.tree.insert(key, value);
            }
        }
    }

    /// Constructs a double-ended iterator over a sub-range of elements in the
    /// map.
    ///
    /// The simplest way is to use the range syntax `min..max`, thus
    /// `range(min..max)` will yield elements from min (inclusive) to max
    /// (exclusive). The range may also be entered as `(Bound<T>, Bound<T>)`,
    /// so for example `range((Excluded(4), Included(10)))` will yield a
    /// left-exclusive, right-inclusive range from 4 to 10.
    ///
    /// Unlike `BTreeMap::range`, a range whose start lies after its end is
    /// simply empty.
    ///
    /// # Complexity
    ///
    /// O(log n) to create, amortized O(1) per element.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbMap;
    /// use std::ops::Bound::Included;
    ///
    /// let mut map = LlrbMap::new();
    /// map.insert(3, "a");
    /// map.insert(5, "b");
    /// map.insert(8, "c");
    /// for (&key, &value) in map.range((Included(&4), Included(&8))) {
    ///     println!("{key}: {value}");
    /// }
    /// assert_eq!(Some((&5, &"b")), map.range(4..).next());
    /// assert_eq!(map.range(4..).len(), 2);
    /// assert_eq!(map.range(9..2).count(), 0);
    /// ```
    pub fn range<T, R>(&self, range: R) -> Range<'_, K, V>
    where
        T: ?Sized + Ord,
        K: Borrow<T>,
        R: RangeBounds<T>,
    {
        Range::bounded(&self.raw, range.start_bound(), range.end_bound())
    }

    /// Verifies every structural invariant of the tree: symmetric order,
    /// subtree sizes, rank/select agreement, the 2-3 shape (no red right
    /// links, no two red links in a row, black root) and perfect black
    /// balance.
    ///
    /// No other method calls this; it exists for tests and debugging.
    ///
    /// # Errors
    ///
    /// The first [`Violation`] found.
    ///
    /// # Complexity
    ///
    /// O(n log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbMap;
    ///
    /// let mut map: LlrbMap<u32, u32> = (0..100).map(|k| (k, k)).collect();
    /// for k in (0..100).step_by(3) {
    ///     map.remove(&k);
    ///     assert_eq!(map.check_invariants(), Ok(()));
    /// }
    /// ```
    pub fn check_invariants(&self) -> Result<(), Violation> {
        self.raw.check()
    }
}

impl<K: Clone, V: Clone> Clone for LlrbMap<K, V> {
    fn clone(&self) -> Self {
        LlrbMap { raw: self.raw.clone() }
    }
}

impl<K: PartialEq, V: PartialEq> PartialEq for LlrbMap<K, V> {
    fn eq(&self, other: &LlrbMap<K, V>) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq> Eq for LlrbMap<K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for LlrbMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V> Default for LlrbMap<K, V> {
    /// Creates an empty `LlrbMap`.
    fn default() -> LlrbMap<K, V> {
        LlrbMap::new()
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for LlrbMap<K, V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> LlrbMap<K, V> {
        let mut map = LlrbMap::new();
        map.extend(iter);
        map
    }
}

impl<K: Ord, V> Extend<(K, V)> for LlrbMap<K, V> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        let iter = iter.into_iter();
        self.raw.reserve(iter.size_hint().0);
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<'a, K: Ord + Copy, V: Copy> Extend<(&'a K, &'a V)> for LlrbMap<K, V> {
    fn extend<T: IntoIterator<Item = (&'a K, &'a V)>>(&mut self, iter: T) {
        for (&k, &v) in iter {
            self.insert(k, v);
        }
    }
}

impl<'a, K, V> IntoIterator for &'a LlrbMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

impl<K, V> IntoIterator for LlrbMap<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    /// Gets an owning iterator over the entries of the map, sorted by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbMap;
    ///
    /// let map = LlrbMap::from([(2, "b"), (1, "a")]);
    /// let mut iter = map.into_iter();
    /// assert_eq!(iter.next(), Some((1, "a")));
    /// assert_eq!(iter.next_back(), Some((2, "b")));
    /// ```
    fn into_iter(mut self) -> IntoIter<K, V> {
        IntoIter {
            inner: self.raw.drain_to_vec().into_iter(),
        }
    }
}

impl<K, Q, V> Index<&Q> for LlrbMap<K, V>
where
    K: Borrow<Q> + Ord,
    Q: ?Sized + Ord,
{
    type Output = V;

    /// Returns a reference to the value corresponding to the supplied key.
    ///
    /// # Panics
    ///
    /// Panics if the key is not present in the map.
    fn index(&self, key: &Q) -> &V {
        self.get(key).expect("no entry found for key")
    }
}

impl<K: Ord, V, const N: usize> From<[(K, V); N]> for LlrbMap<K, V> {
    fn from(arr: [(K, V); N]) -> Self {
        arr.into_iter().collect()
    }
}

// ─── Range ───────────────────────────────────────────────────────────────────

impl<'a, K, V> Iterator for Range<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<(&'a K, &'a V)> {
        if self.remaining == 0 {
            return None;
        }
        let tree = self.tree;
        let h = self.front.pop()?;
        self.remaining -= 1;
        tree.push_left_spine(tree.node(h).right, &mut self.front);
        Some(tree.entry(h))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }

    fn last(mut self) -> Option<(&'a K, &'a V)> {
        self.next_back()
    }

    fn min(mut self) -> Option<(&'a K, &'a V)>
    where
        (&'a K, &'a V): Ord,
    {
        self.next()
    }

    fn max(mut self) -> Option<(&'a K, &'a V)>
    where
        (&'a K, &'a V): Ord,
    {
        self.next_back()
    }
}

impl<'a, K, V> DoubleEndedIterator for Range<'a, K, V> {
    fn next_back(&mut self) -> Option<(&'a K, &'a V)> {
        if self.remaining == 0 {
            return None;
        }
        let tree = self.tree;
        let h = self.back.pop()?;
        self.remaining -= 1;
        tree.push_right_spine(tree.node(h).left, &mut self.back);
        Some(tree.entry(h))
    }
}

impl<K, V> ExactSizeIterator for Range<'_, K, V> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K, V> FusedIterator for Range<'_, K, V> {}

impl<K, V> Clone for Range<'_, K, V> {
    fn clone(&self) -> Self {
        Range {
            tree: self.tree,
            front: self.front.clone(),
            back: self.back.clone(),
            remaining: self.remaining,
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Range<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

// ─── Iter ────────────────────────────────────────────────────────────────────

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<(&'a K, &'a V)> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }

    fn last(mut self) -> Option<(&'a K, &'a V)> {
        self.next_back()
    }
}

impl<'a, K, V> DoubleEndedIterator for Iter<'a, K, V> {
    fn next_back(&mut self) -> Option<(&'a K, &'a V)> {
        self.inner.next_back()
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Iter {
            inner: self.inner.clone(),
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Iter<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

// ─── Keys / Values ───────────────────────────────────────────────────────────

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }

    fn last(mut self) -> Option<&'a K> {
        self.next_back()
    }

    fn min(mut self) -> Option<&'a K>
    where
        &'a K: Ord,
    {
        self.next()
    }

    fn max(mut self) -> Option<&'a K>
    where
        &'a K: Ord,
    {
        self.next_back()
    }
}

impl<'a, K, V> DoubleEndedIterator for Keys<'a, K, V> {
    fn next_back(&mut self) -> Option<&'a K> {
        self.inner.next_back().map(|(k, _)| k)
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for Keys<'_, K, V> {}

impl<K, V> Clone for Keys<'_, K, V> {
    fn clone(&self) -> Self {
        Keys {
            inner: self.inner.clone(),
        }
    }
}

impl<K: fmt::Debug, V> fmt::Debug for Keys<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }

    fn last(mut self) -> Option<&'a V> {
        self.next_back()
    }
}

impl<'a, K, V> DoubleEndedIterator for Values<'a, K, V> {
    fn next_back(&mut self) -> Option<&'a V> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for Values<'_, K, V> {}

impl<K, V> Clone for Values<'_, K, V> {
    fn clone(&self) -> Self {
        Values {
            inner: self.inner.clone(),
        }
    }
}

impl<K, V: fmt::Debug> fmt::Debug for Values<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

// ─── Owning iterators ────────────────────────────────────────────────────────

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<(K, V)> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<(K, V)> {
        self.inner.next_back()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for IntoIter<K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for IntoIter<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.inner.as_slice()).finish()
    }
}

impl<K, V> Default for IntoIter<K, V> {
    /// Creates an empty `llrb_map::IntoIter`.
    ///
    /// ```
    /// # use llrb_tree::llrb_map;
    /// let iter: llrb_map::IntoIter<u8, u8> = Default::default();
    /// assert_eq!(iter.len(), 0);
    /// ```
    fn default() -> Self {
        IntoIter {
            inner: vec::IntoIter::default(),
        }
    }
}

impl<K, V> Iterator for IntoKeys<K, V> {
    type Item = K;

    fn next(&mut self) -> Option<K> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoKeys<K, V> {
    fn next_back(&mut self) -> Option<K> {
        self.inner.next_back().map(|(k, _)| k)
    }
}

impl<K, V> ExactSizeIterator for IntoKeys<K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for IntoKeys<K, V> {}

impl<K: fmt::Debug, V> fmt::Debug for IntoKeys<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.inner.inner.as_slice().iter().map(|(k, _)| k)).finish()
    }
}

impl<K, V> Iterator for IntoValues<K, V> {
    type Item = V;

    fn next(&mut self) -> Option<V> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoValues<K, V> {
    fn next_back(&mut self) -> Option<V> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

impl<K, V> ExactSizeIterator for IntoValues<K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for IntoValues<K, V> {}

impl<K, V: fmt::Debug> fmt::Debug for IntoValues<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.inner.inner.as_slice().iter().map(|(_, v)| v)).finish()
    }
}
