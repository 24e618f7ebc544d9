use super::AvlMultiset;
use crate::raw::RawAvlTree;

impl<T> AvlMultiset<T> {
    /// Creates an empty multiset with room for at least `capacity` distinct
    /// values before reallocating. Duplicates of a present value never need
    /// extra room.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::AvlMultiset;
    ///
    /// let set: AvlMultiset<i32> = AvlMultiset::with_capacity(16);
    /// assert!(set.is_empty());
    /// assert!(set.capacity() >= 16);
    /// ```
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        AvlMultiset {
            tree: RawAvlTree::with_capacity(capacity),
        }
    }

    /// Returns how many distinct values the multiset can hold without
    /// reallocating.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::AvlMultiset;
    ///
    /// let mut set = AvlMultiset::with_capacity(4);
    /// for _ in 0..100 {
    ///     set.insert('x');
    /// }
    /// assert!(set.capacity() >= 4);
    /// assert_eq!(set.distinct_len(), 1);
    /// ```
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.tree.capacity()
    }
}
