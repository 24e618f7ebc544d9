use core::borrow::Borrow;
use core::fmt;
use core::iter::FusedIterator;

use crate::raw::{InOrder, PreOrder, RawAvlTree};

mod capacity;
mod order_statistic;

/// An ordered multiset based on a size-augmented AVL tree.
///
/// Equal values collapse into a single node that counts its copies, so the
/// tree holds one node per distinct value while [`len`] counts every copy.
/// Each node also records how many elements live in its left and right
/// subtrees, which lets rank queries such as [`kth_largest`] and [`median`]
/// descend straight to the answer in O(log n).
///
/// It is a logic error for a value to be modified in such a way that its
/// ordering relative to any other value, as determined by the [`Ord`] trait,
/// changes while it is in the multiset. This is normally only possible through
/// [`Cell`], [`RefCell`], global state, I/O, or unsafe code. The behavior
/// resulting from such a logic error is not specified, but will be
/// encapsulated to the `AvlMultiset` that observed the logic error and not
/// result in undefined behavior.
///
/// [`len`]: AvlMultiset::len
/// [`kth_largest`]: AvlMultiset::kth_largest
/// [`median`]: AvlMultiset::median
/// [`Cell`]: core::cell::Cell
/// [`RefCell`]: core::cell::RefCell
///
/// # Examples
///
/// ```
/// use avl_ost::AvlMultiset;
///
/// let mut scores = AvlMultiset::new();
/// for score in [5, 3, 8, 3, 1] {
///     scores.insert(score);
/// }
///
/// assert_eq!(scores.len(), 5);
/// assert_eq!(scores.count(&3), 2);
/// assert_eq!(scores.median(), Ok(&3));
/// assert_eq!(scores.kth_largest(1), Ok(&8));
///
/// // Removing takes away a single copy.
/// assert!(scores.remove(&3));
/// assert_eq!(scores.count(&3), 1);
/// assert_eq!(scores.median(), Ok(&5));
///
/// // Removing an absent value changes nothing.
/// assert!(!scores.remove(&42));
/// ```
#[derive(Clone)]
pub struct AvlMultiset<T> {
    tree: RawAvlTree<T>,
}

/// An ascending iterator over the elements of an `AvlMultiset`, yielding each
/// value once per copy.
///
/// This `struct` is created by the [`iter`] method on [`AvlMultiset`].
///
/// # Examples
///
/// ```
/// use avl_ost::AvlMultiset;
///
/// let set = AvlMultiset::from([3, 1, 2, 1]);
/// let mut iter = set.iter();
/// assert_eq!(iter.next(), Some(&1));
/// assert_eq!(iter.next_back(), Some(&3));
/// assert_eq!(iter.next(), Some(&1));
/// assert_eq!(iter.next(), Some(&2));
/// assert_eq!(iter.next(), None);
/// ```
///
/// [`iter`]: AvlMultiset::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, T: 'a> {
    inner: InOrder<'a, T>,
}

/// A pre-order iterator over the elements of an `AvlMultiset`: each node's
/// copies come before its left subtree, which comes before its right subtree.
///
/// This `struct` is created by the [`traverse`] method on [`AvlMultiset`].
/// Clone it, or call [`traverse`] again, to restart the walk.
///
/// # Examples
///
/// ```
/// use avl_ost::AvlMultiset;
///
/// let set = AvlMultiset::from([5, 3, 8, 3, 1]);
/// let dump: Vec<_> = set.traverse().copied().collect();
/// assert_eq!(dump, [5, 3, 3, 1, 8]);
/// ```
///
/// [`traverse`]: AvlMultiset::traverse
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Traverse<'a, T: 'a> {
    inner: PreOrder<'a, T>,
}

impl<T> AvlMultiset<T> {
    /// Makes a new, empty `AvlMultiset`.
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::AvlMultiset;
    ///
    /// let set: AvlMultiset<i32> = AvlMultiset::new();
    /// assert!(set.is_empty());
    /// ```
    #[must_use]
    pub const fn new() -> Self {
        AvlMultiset {
            tree: RawAvlTree::new(),
        }
    }

    /// Returns the number of elements, counting every copy of a duplicate.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::AvlMultiset;
    ///
    /// let set = AvlMultiset::from([7, 7, 9]);
    /// assert_eq!(set.len(), 3);
    /// ```
    #[must_use]
    pub const fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns the number of distinct values.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::AvlMultiset;
    ///
    /// let set = AvlMultiset::from([7, 7, 9]);
    /// assert_eq!(set.distinct_len(), 2);
    /// ```
    #[must_use]
    pub const fn distinct_len(&self) -> usize {
        self.tree.distinct_len()
    }

    /// Returns `true` if the multiset contains no elements.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Returns the height of the underlying tree: 0 when empty, 1 for a
    /// single distinct value.
    ///
    /// The AVL balance keeps this below `1.44 * log2(distinct_len + 2)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::AvlMultiset;
    ///
    /// let set: AvlMultiset<u32> = (0..1000).collect();
    /// assert!(set.height() <= 14);
    /// ```
    #[must_use]
    pub fn height(&self) -> usize {
        self.tree.height()
    }

    /// Clears the multiset, removing all elements.
    ///
    /// Nodes are released children-first; the storage they occupied is kept
    /// for later insertions.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::AvlMultiset;
    ///
    /// let mut set = AvlMultiset::from([1, 1, 2]);
    /// set.clear();
    /// assert!(set.is_empty());
    /// ```
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Gets an iterator that visits the elements in ascending order, each
    /// value repeated once per copy.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::AvlMultiset;
    ///
    /// let set = AvlMultiset::from([3, 1, 3]);
    /// let values: Vec<_> = set.iter().copied().collect();
    /// assert_eq!(values, [1, 3, 3]);
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.tree.iter(),
        }
    }

    /// Gets an iterator that walks the tree in pre-order, each value
    /// repeated once per copy.
    ///
    /// The order reflects the current tree shape, which depends on the
    /// history of insertions and removals, not only on the contents.
    pub fn traverse(&self) -> Traverse<'_, T> {
        Traverse {
            inner: self.tree.traverse(),
        }
    }

    /// Returns a reference to the smallest element, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::AvlMultiset;
    ///
    /// let set = AvlMultiset::from([4, 2, 9]);
    /// assert_eq!(set.first(), Some(&2));
    /// ```
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.tree.kth_smallest(1)
    }

    /// Returns a reference to the largest element, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::AvlMultiset;
    ///
    /// let set = AvlMultiset::from([4, 2, 9]);
    /// assert_eq!(set.last(), Some(&9));
    /// ```
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.tree.kth_largest(1).map(|(value, _)| value)
    }
}

impl<T: Ord> AvlMultiset<T> {
    /// Adds one copy of `value` and returns how many copies are now present.
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
    /// let mut set = AvlMultiset::new();
    /// assert_eq!(set.insert("b"), 1);
    /// assert_eq!(set.insert("b"), 2);
    /// assert_eq!(set.len(), 2);
    /// ```
    pub fn insert(&mut self, value: T) -> usize {
        self.tree.insert(value)
    }

    /// Removes one copy of `value`. Returns whether a copy was present; an
    /// absent value leaves the multiset unchanged.
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
    /// let mut set = AvlMultiset::from([2, 2]);
    /// assert!(set.remove(&2));
    /// assert!(set.remove(&2));
    /// assert!(!set.remove(&2));
    /// assert!(set.is_empty());
    /// ```
    pub fn remove<Q>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.tree.remove(value)
    }

    /// Returns `true` if at least one copy of `value` is present.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::AvlMultiset;
    ///
    /// let set = AvlMultiset::from([String::from("ada")]);
    /// assert!(set.contains("ada"));
    /// assert!(!set.contains("grace"));
    /// ```
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.tree.contains(value)
    }

    /// Returns the number of copies of `value`, 0 if absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::AvlMultiset;
    ///
    /// let set = AvlMultiset::from([1, 5, 5, 5]);
    /// assert_eq!(set.count(&5), 3);
    /// assert_eq!(set.count(&2), 0);
    /// ```
    pub fn count<Q>(&self, value: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.tree.count(value)
    }
}

impl<T> Default for AvlMultiset<T> {
    /// Creates an empty `AvlMultiset`.
    fn default() -> AvlMultiset<T> {
        AvlMultiset::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for AvlMultiset<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for AvlMultiset<T> {
    fn eq(&self, other: &AvlMultiset<T>) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for AvlMultiset<T> {}

impl<T: Ord> FromIterator<T> for AvlMultiset<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> AvlMultiset<T> {
        let mut set = AvlMultiset::new();
        set.extend(iter);
        set
    }
}

impl<T: Ord, const N: usize> From<[T; N]> for AvlMultiset<T> {
    /// Converts a `[T; N]` into an `AvlMultiset<T>`, keeping duplicates.
    ///
    /// ```
    /// use avl_ost::AvlMultiset;
    ///
    /// let set1 = AvlMultiset::from([1, 2, 2]);
    /// let set2: AvlMultiset<_> = [2, 1, 2].into();
    /// assert_eq!(set1, set2);
    /// ```
    fn from(arr: [T; N]) -> Self {
        AvlMultiset::from_iter(arr)
    }
}

impl<T: Ord> Extend<T> for AvlMultiset<T> {
    #[inline]
    fn extend<Iter: IntoIterator<Item = T>>(&mut self, iter: Iter) {
        for elem in iter {
            self.insert(elem);
        }
    }
}

impl<'a, T: 'a + Ord + Copy> Extend<&'a T> for AvlMultiset<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<'a, T> IntoIterator for &'a AvlMultiset<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
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
        f.debug_tuple("Iter").field(&self.clone().collect::<alloc::vec::Vec<_>>()).finish()
    }
}

impl<'a, T> Iterator for Traverse<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for Traverse<'_, T> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<T> FusedIterator for Traverse<'_, T> {}

impl<T> Clone for Traverse<'_, T> {
    fn clone(&self) -> Self {
        Traverse {
            inner: self.inner.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Traverse<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Traverse").field(&self.clone().collect::<alloc::vec::Vec<_>>()).finish()
    }
}
