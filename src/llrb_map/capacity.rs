use super::LlrbMap;
use crate::raw::RawLlrbMap;

impl<K, V> LlrbMap<K, V> {
    /// Creates an empty map with node storage for at least `capacity`
    /// entries.
    ///
    /// This is an extension and is not part of the standard `BTreeMap` API.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbMap;
    ///
    /// let map: LlrbMap<i32, i32> = LlrbMap::with_capacity(32);
    /// assert!(map.is_empty());
    /// assert!(map.capacity() >= 32);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(capacity) for memory allocation.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        LlrbMap {
            raw: RawLlrbMap::with_capacity(capacity),
        }
    }

    /// Returns the number of entries the map can hold without reallocating.
    ///
    /// Slots freed by removals are reused before the map grows.
    ///
    /// This is an extension and is not part of the standard `BTreeMap` API.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbMap;
    ///
    /// let mut map: LlrbMap<i32, i32> = LlrbMap::with_capacity(32);
    /// map.insert(1, 1);
    /// map.remove(&1);
    /// map.insert(2, 2);
    /// assert!(map.capacity() >= 32);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }

    /// Reserves node storage for at least `additional` more entries.
    ///
    /// Free slots left by earlier removals count toward the reservation.
    ///
    /// This is an extension and is not part of the standard `BTreeMap` API.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbMap;
    ///
    /// let mut map: LlrbMap<i32, i32> = LlrbMap::new();
    /// map.reserve(10);
    /// assert!(map.capacity() >= 10);
    /// ```
    pub fn reserve(&mut self, additional: usize) {
        self.raw.reserve(additional);
    }

    /// Shrinks node storage as much as the current layout allows.
    ///
    /// Storage freed by removals at the end of the arena is released; a
    /// freed slot in the middle is kept for reuse.
    ///
    /// This is an extension and is not part of the standard `BTreeMap` API.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbMap;
    ///
    /// let mut map: LlrbMap<i32, i32> = LlrbMap::with_capacity(100);
    /// map.insert(1, 1);
    /// map.shrink_to_fit();
    /// assert!(map.capacity() >= 1);
    /// assert_eq!(map.get(&1), Some(&1));
    /// ```
    pub fn shrink_to_fit(&mut self) {
        self.raw.shrink_to_fit();
    }
}
