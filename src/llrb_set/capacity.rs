use super::LlrbSet;
use crate::LlrbMap;

impl<T> LlrbSet<T> {
    /// Creates an empty set with node storage for at least `capacity`
    /// elements.
    ///
    /// This is an extension and is not part of the standard `BTreeSet` API.
    ///
    /// # Examples
    ///
    /// ```
    /// use llrb_tree::LlrbSet;
    ///
    /// let set: LlrbSet<i32> = LlrbSet::with_capacity(16);
    /// assert!(set.is_empty());
    /// assert!(set.capacity() >= 16);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(capacity) for memory allocation.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        LlrbSet {
            map: LlrbMap::with_capacity(capacity),
        }
    }

    /// Returns the number of elements the set can hold without reallocating.
    ///
    /// This is an extension and is not part of the standard `BTreeSet` API.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.map.capacity()
    }

    /// Reserves node storage for at least `additional` more elements.
    ///
    /// This is an extension and is not part of the standard `BTreeSet` API.
    pub fn reserve(&mut self, additional: usize) {
        self.map.reserve(additional);
    }

    /// Shrinks node storage as much as the current layout allows.
    ///
    /// This is an extension and is not part of the standard `BTreeSet` API.
    pub fn shrink_to_fit(&mut self) {
        self.map.shrink_to_fit();
    }
}
