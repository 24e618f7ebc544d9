use core::borrow::Borrow;
use core::ops::Index;

use super::AvlMultiset;
use crate::{Rank, RankError};

impl<T> AvlMultiset<T> {
    /// Returns the `k`-th largest element, counting from 1 and counting every
    /// copy of a duplicate.
    ///
    /// # Errors
    ///
    /// [`RankError::Empty`] if the multiset is empty, otherwise
    /// [`RankError::OutOfRange`] unless `1 <= k <= len`.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::AvlMultiset;
    ///
    /// let set = AvlMultiset::from([1, 3, 3, 5, 8]);
    /// assert_eq!(set.kth_largest(1), Ok(&8));
    /// assert_eq!(set.kth_largest(3), Ok(&3));
    /// assert_eq!(set.kth_largest(5), Ok(&1));
    /// assert!(set.kth_largest(0).is_err());
    /// ```
    pub fn kth_largest(&self, k: usize) -> Result<&T, RankError> {
        self.kth_largest_with_probes(k).map(|(value, _)| value)
    }

    /// Like [`kth_largest`](Self::kth_largest), also returning how many tree
    /// nodes the descent visited. The count never exceeds
    /// [`height`](Self::height).
    ///
    /// # Errors
    ///
    /// The same as [`kth_largest`](Self::kth_largest).
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::AvlMultiset;
    ///
    /// let set: AvlMultiset<u32> = (0..1024).collect();
    /// let (value, probes) = set.kth_largest_with_probes(100).unwrap();
    /// assert_eq!(*value, 924);
    /// assert!(probes <= set.height());
    /// ```
    pub fn kth_largest_with_probes(&self, k: usize) -> Result<(&T, usize), RankError> {
        let k = RankError::check(k, self.len())?;
        let found = self.tree.kth_largest(k);
        debug_assert!(found.is_some(), "kth_largest: subtree sizes disagree with len {}", self.len());
        found.ok_or(RankError::OutOfRange {
            k,
            len: self.len(),
        })
    }

    /// Returns the `k`-th smallest element, counting from 1 and counting every
    /// copy of a duplicate.
    ///
    /// # Errors
    ///
    /// The same as [`kth_largest`](Self::kth_largest).
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::AvlMultiset;
    ///
    /// let set = AvlMultiset::from([1, 3, 3, 5, 8]);
    /// assert_eq!(set.kth_smallest(2), Ok(&3));
    /// assert_eq!(set.kth_smallest(3), Ok(&3));
    /// ```
    pub fn kth_smallest(&self, k: usize) -> Result<&T, RankError> {
        let k = RankError::check(k, self.len())?;
        self.tree.kth_smallest(k).ok_or(RankError::OutOfRange {
            k,
            len: self.len(),
        })
    }

    /// Returns the median: the `(len + 1) / 2`-th largest element. For an even
    /// number of elements that is the larger of the two middle values.
    ///
    /// # Errors
    ///
    /// [`RankError::Empty`] if the multiset is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::AvlMultiset;
    ///
    /// let odd = AvlMultiset::from([1, 3, 3, 5, 8]);
    /// assert_eq!(odd.median(), Ok(&3));
    ///
    /// let even = AvlMultiset::from([1, 3, 5, 8]);
    /// assert_eq!(even.median(), Ok(&5));
    /// ```
    pub fn median(&self) -> Result<&T, RankError> {
        self.tree.median().ok_or(RankError::Empty)
    }

    /// Returns the element at zero-based position `rank` in ascending order.
    ///
    /// Returns `None` if `rank` is out of bounds.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::AvlMultiset;
    ///
    /// let set = AvlMultiset::from([10, 20, 20, 30]);
    /// assert_eq!(set.get_by_rank(2), Some(&20));
    /// assert!(set.get_by_rank(4).is_none());
    /// ```
    #[must_use]
    pub fn get_by_rank(&self, rank: usize) -> Option<&T> {
        self.tree.kth_smallest(rank.checked_add(1)?)
    }
}

impl<T: Ord> AvlMultiset<T> {
    /// Returns the zero-based rank of the first copy of `value`, which is the
    /// number of elements strictly smaller than it, or `None` if the value is
    /// not present.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::AvlMultiset;
    ///
    /// let set = AvlMultiset::from([10, 20, 20, 30]);
    ///
    /// assert_eq!(set.rank_of(&20), Some(1));
    /// assert_eq!(set.rank_of(&30), Some(3));
    /// assert_eq!(set.rank_of(&15), None);
    /// ```
    #[must_use]
    pub fn rank_of<Q>(&self, value: &Q) -> Option<usize>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.tree.rank_of(value)
    }
}

/// Indexes into the multiset by ascending zero-based rank.
///
/// # Panics
///
/// Panics if `rank` is out of bounds.
///
/// # Examples
///
/// ```
/// use avl_ost::{AvlMultiset, Rank};
///
/// let set = AvlMultiset::from([10, 20, 30]);
/// assert_eq!(set[Rank(1)], 20);
/// ```
impl<T> Index<Rank> for AvlMultiset<T> {
    type Output = T;

    fn index(&self, rank: Rank) -> &Self::Output {
        self.get_by_rank(rank.0).expect("index out of bounds")
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn empty_multiset_rank_queries() {
        let set: AvlMultiset<i32> = AvlMultiset::new();
        assert_eq!(set.kth_largest(1), Err(RankError::Empty));
        assert_eq!(set.kth_smallest(1), Err(RankError::Empty));
        assert_eq!(set.median(), Err(RankError::Empty));
        assert!(set.get_by_rank(0).is_none());
        assert!(set.get_by_rank(usize::MAX).is_none());
    }

    #[test]
    fn duplicates_occupy_consecutive_ranks() {
        let set = AvlMultiset::from([4, 9, 4, 4, 1]);
        assert_eq!(set.rank_of(&4), Some(1));
        assert_eq!(set.rank_of(&9), Some(4));
        for rank in 1..=3 {
            assert_eq!(set[Rank(rank)], 4);
        }
        assert_eq!(set.kth_largest(2), Ok(&4));
        assert_eq!(set.kth_largest(4), Ok(&4));
    }

    #[test]
    #[should_panic(expected = "index out of bounds")]
    fn index_past_end_panics() {
        let set = AvlMultiset::from([1]);
        let _ = &set[Rank(1)];
    }
}
