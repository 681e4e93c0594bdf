use core::borrow::Borrow;
use core::fmt;
use core::iter::FusedIterator;
use core::ops::RangeBounds;

use crate::llrb_map::{IntoKeys, Keys, Range as MapRange};
use crate::{Error, LlrbMap, Violation};

mod capacity;
mod order_statistic;

/// An ordered set based on a left-leaning red-black tree.
///
/// See [`LlrbMap`]'s documentation for a discussion of the tree and its
/// invariants; an `LlrbSet<T>` is an `LlrbMap<T, ()>`.
///
/// It is a logic error for an item to be modified in such a way that the item's ordering relative
/// to any other item, as determined by the [`Ord`] trait, changes while it is in the set.
///
/// # Examples
///
/// ```
/// use llrb_tree::LlrbSet;
///
/// let mut books = LlrbSet::new();
/// books.insert("A Dance With Dragons");
/// books.insert("To Kill a Mockingbird");
/// books.insert("The Odyssey");
/// books.insert("The Great Gatsby");
///
/// if !books.contains("The Winds of Winter") {
///     println!("We have {} books, but The Winds of Winter ain't one.", books.len());
/// }
///
/// books.remove("The Odyssey");
///
/// for book in &books {
///     println!("{book}");
/// }
/// assert_eq!(books.select(0), Ok(&"A Dance With Dragons"));
/// ```
pub struct LlrbSet<T> {
    map: LlrbMap<T, ()>,
}

/// An iterator over the items of a `LlrbSet`.
///
/// This `struct` is created by the [`iter`] method on [`LlrbSet`].
///
/// [`iter`]: LlrbSet::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, T> {
    inner: Keys<'a, T, ()>,
}

/// An iterator over a sub-range of items in a `LlrbSet`.
///
/// This `struct` is created by the [`range`] method on [`LlrbSet`].
///
/// [`range`]: LlrbSet::range
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Range<'a, T> {
    inner: MapRange<'a, T, ()>,
}

/// An owning iterator over the items of a `LlrbSet` in ascending order.
///
/// This `struct` is created by the [`into_iter`] method on [`LlrbSet`]
/// (provided by the [`IntoIterator`] trait).
///
/// [`into_iter`]: LlrbSet#method.into_iter
pub struct IntoIter<T> {
    inner: IntoKeys<T, ()>,
}

impl<T> LlrbSet<T> {
    /// Makes a new, empty `LlrbSet`.
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbSet;
    ///
    /// let mut set: LlrbSet<i32> = LlrbSet::new();
    /// ```
    #[must_use]
    pub const fn new() -> LlrbSet<T> {
        LlrbSet { map: LlrbMap::new() }
    }

    /// Clears the set, removing all elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbSet;
    ///
    /// let mut v = LlrbSet::new();
    /// v.insert(1);
    /// v.clear();
    /// assert!(v.is_empty());
    /// ```
    pub fn clear(&mut self) {
        self.map.clear();
    }

    /// Returns the number of elements in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbSet;
    ///
    /// let mut v = LlrbSet::new();
    /// assert_eq!(v.len(), 0);
    /// v.insert(1);
    /// assert_eq!(v.len(), 1);
    /// ```
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if the set contains no elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbSet;
    ///
    /// let mut v = LlrbSet::new();
    /// assert!(v.is_empty());
    /// v.insert(1);
    /// assert!(!v.is_empty());
    /// ```
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Returns a reference to the first element in the set, if any.
    /// This element is always the minimum of all elements in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbSet;
    ///
    /// let mut set = LlrbSet::new();
    /// assert_eq!(set.first(), None);
    /// set.insert(1);
    /// set.insert(2);
    /// assert_eq!(set.first(), Some(&1));
    /// ```
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.map.first_key_value().map(|(k, ())| k)
    }

    /// Returns a reference to the last element in the set, if any.
    /// This element is always the maximum of all elements in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbSet;
    ///
    /// let set = LlrbSet::from([1, 2]);
    /// assert_eq!(set.last(), Some(&2));
    /// ```
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.map.last_key_value().map(|(k, ())| k)
    }

    /// Returns the smallest element.
    ///
    /// # Errors
    ///
    /// [`Error::Underflow`] if the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::{Error, LlrbSet};
    ///
    /// assert_eq!(LlrbSet::<u8>::new().min(), Err(Error::Underflow));
    /// assert_eq!(LlrbSet::from([3, 1, 2]).min(), Ok(&1));
    /// ```
    pub fn min(&self) -> Result<&T, Error> {
        self.map.min()
    }

    /// Returns the largest element.
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
    /// assert_eq!(LlrbSet::from([3, 1, 2]).max(), Ok(&3));
    /// ```
    pub fn max(&self) -> Result<&T, Error> {
        self.map.max()
    }

    /// Removes and returns the smallest element.
    ///
    /// # Errors
    ///
    /// [`Error::Underflow`] if the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::{Error, LlrbSet};
    ///
    /// let mut set = LlrbSet::from([2, 1]);
    /// assert_eq!(set.delete_min(), Ok(1));
    /// assert_eq!(set.delete_min(), Ok(2));
    /// assert_eq!(set.delete_min(), Err(Error::Underflow));
    /// ```
    pub fn delete_min(&mut self) -> Result<T, Error> {
        self.map.delete_min().map(|(k, ())| k)
    }

    /// Removes and returns the largest element.
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
    /// let mut set = LlrbSet::from([2, 1]);
    /// assert_eq!(set.delete_max(), Ok(2));
    /// ```
    pub fn delete_max(&mut self) -> Result<T, Error> {
        self.map.delete_max().map(|(k, ())| k)
    }

    /// Removes the first element from the set and returns it, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbSet;
    ///
    /// let mut set = LlrbSet::from([1]);
    /// assert_eq!(set.pop_first(), Some(1));
    /// assert_eq!(set.pop_first(), None);
    /// ```
    pub fn pop_first(&mut self) -> Option<T> {
        self.map.pop_first().map(|(k, ())| k)
    }

    /// Removes the last element from the set and returns it, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbSet;
    ///
    /// let mut set = LlrbSet::from([1, 2]);
    /// assert_eq!(set.pop_last(), Some(2));
    /// ```
    pub fn pop_last(&mut self) -> Option<T> {
        self.map.pop_last().map(|(k, ())| k)
    }

    /// Returns the number of edges on the longest root-to-leaf path, or
    /// `None` if the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbSet;
    ///
    /// let set: LlrbSet<u32> = (0..255).collect();
    /// assert!(set.height().unwrap() <= 16);
    /// ```
    #[must_use]
    pub fn height(&self) -> Option<usize> {
        self.map.height()
    }

    /// Gets an iterator that visits the elements in the `LlrbSet` in
    /// ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbSet;
    ///
    /// let set = LlrbSet::from([3, 1, 2]);
    /// let mut set_iter = set.iter();
    /// assert_eq!(set_iter.next(), Some(&1));
    /// assert_eq!(set_iter.next(), Some(&2));
    /// assert_eq!(set_iter.next(), Some(&3));
    /// assert_eq!(set_iter.next(), None);
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        Iter { inner: self.map.keys() }
    }
}

impl<T: Ord> LlrbSet<T> {
    /// Returns `true` if the set contains an element equal to the value.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbSet;
    ///
    /// let set = LlrbSet::from([1, 2, 3]);
    /// assert_eq!(set.contains(&1), true);
    /// assert_eq!(set.contains(&4), false);
    /// ```
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.map.contains_key(value)
    }

    /// Returns a reference to the element in the set, if any, that is equal
    /// to the value.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbSet;
    ///
    /// let set = LlrbSet::from([1, 2, 3]);
    /// assert_eq!(set.get(&2), Some(&2));
    /// assert_eq!(set.get(&4), None);
    /// ```
    pub fn get<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.map.get_key_value(value).map(|(k, ())| k)
    }

    /// Adds a value to the set.
    ///
    /// Returns whether the value was newly inserted. An equal value already
    /// in the set is kept and the new one dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbSet;
    ///
    /// let mut set = LlrbSet::new();
    ///
    /// assert_eq!(set.insert(2), true);
    /// assert_eq!(set.insert(2), false);
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn insert(&mut self, value: T) -> bool {
        self.map.insert(value, ()).is_none()
    }

    /// If the set contains an element equal to the value, removes it from
    /// the set and drops it. Returns whether such an element was present.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbSet;
    ///
    /// let mut set = LlrbSet::new();
    ///
    /// set.insert(2);
    /// assert_eq!(set.remove(&2), true);
    /// assert_eq!(set.remove(&2), false);
    /// ```
    pub fn remove<Q>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.map.remove(value).is_some()
    }

    /// Removes and returns the element in the set, if any, that is equal to
    /// the value.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbSet;
    ///
    /// let mut set = LlrbSet::from([1, 2, 3]);
    /// assert_eq!(set.take(&2), Some(2));
    /// assert_eq!(set.take(&2), None);
    /// ```
    pub fn take<Q>(&mut self, value: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.map.remove_entry(value).map(|(k, ())| k)
    }

    /// Retains only the elements specified by the predicate.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbSet;
    ///
    /// let mut set = LlrbSet::from([1, 2, 3, 4, 5, 6]);
    /// set.retain(|&k| k % 2 == 0);
    /// assert!(set.iter().eq([2, 4, 6].iter()));
    /// ```
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&T) -> bool,
    {
        self.map.retain(|k, ()| f(k));
    }

    /// Constructs a double-ended iterator over a sub-range of elements in the
    /// set. A range whose start lies after its end is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbSet;
    /// use std::ops::Bound::Included;
    ///
    /// let mut set = LlrbSet::new();
    /// set.insert(3);
    /// set.insert(5);
    /// set.insert(8);
    /// for &elem in set.range((Included(&4), Included(&8))) {
    ///     println!("{elem}");
    /// }
    /// assert_eq!(Some(&5), set.range(4..).next());
    /// ```
    pub fn range<K, R>(&self, range: R) -> Range<'_, T>
    where
        K: ?Sized + Ord,
        T: Borrow<K>,
        R: RangeBounds<K>,
    {
        Range {
            inner: self.map.range(range),
        }
    }

    /// Verifies every structural invariant of the underlying tree.
    ///
    /// # Errors
    ///
    /// The first [`Violation`] found.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbSet;
    ///
    /// let set: LlrbSet<u32> = (0..64).rev().collect();
    /// assert_eq!(set.check_invariants(), Ok(()));
    /// ```
    pub fn check_invariants(&self) -> Result<(), Violation> {
        self.map.check_invariants()
    }
}

impl<T: Clone> Clone for LlrbSet<T> {
    fn clone(&self) -> Self {
        LlrbSet { map: self.map.clone() }
    }
}

impl<T: PartialEq> PartialEq for LlrbSet<T> {
    fn eq(&self, other: &LlrbSet<T>) -> bool {
        self.map.eq(&other.map)
    }
}

impl<T: Eq> Eq for LlrbSet<T> {}

impl<T: fmt::Debug> fmt::Debug for LlrbSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T> Default for LlrbSet<T> {
    /// Creates an empty `LlrbSet`.
    fn default() -> LlrbSet<T> {
        LlrbSet::new()
    }
}

impl<T: Ord> FromIterator<T> for LlrbSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> LlrbSet<T> {
        let mut set = LlrbSet::new();
        set.extend(iter);
        set
    }
}

impl<T: Ord> Extend<T> for LlrbSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.map.extend(iter.into_iter().map(|k| (k, ())));
    }
}

impl<'a, T: 'a + Ord + Copy> Extend<&'a T> for LlrbSet<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T: Ord, const N: usize> From<[T; N]> for LlrbSet<T> {
    fn from(arr: [T; N]) -> Self {
        arr.into_iter().collect()
    }
}

impl<'a, T> IntoIterator for &'a LlrbSet<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<T> IntoIterator for LlrbSet<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    /// Gets an iterator for moving out the `LlrbSet`'s contents in ascending
    /// order.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbSet;
    ///
    /// let set = LlrbSet::from([1, 2, 3, 4]);
    ///
    /// let v: Vec<_> = set.into_iter().collect();
    /// assert_eq!(v, [1, 2, 3, 4]);
    /// ```
    fn into_iter(self) -> IntoIter<T> {
        IntoIter {
            inner: self.map.into_keys(),
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }

    fn last(mut self) -> Option<&'a T> {
        self.next_back()
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        self.inner.next_back()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter {
            inner: self.inner.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, T> Iterator for Range<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        self.inner.next().map(|(k, ())| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }

    fn last(mut self) -> Option<&'a T> {
        self.next_back()
    }
}

impl<'a, T> DoubleEndedIterator for Range<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        self.inner.next_back().map(|(k, ())| k)
    }
}

impl<T> ExactSizeIterator for Range<'_, T> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<T> FusedIterator for Range<'_, T> {}

impl<T> Clone for Range<'_, T> {
    fn clone(&self) -> Self {
        Range {
            inner: self.inner.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Range<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        self.inner.next_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<T> FusedIterator for IntoIter<T> {}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.inner.fmt(f)
    }
}
