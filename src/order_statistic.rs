/// A zero-based position in the ascending order of a multiset, counting
/// every copy of a duplicated key.
///
/// # Examples
///
/// ```
/// use avl_ost::{AvlMultiset, Rank};
///
/// let set = AvlMultiset::from([20, 10, 10]);
///
/// assert_eq!(set[Rank(0)], 10);
/// assert_eq!(set[Rank(1)], 10);
/// assert_eq!(set[Rank(2)], 20);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Rank(pub usize);

/// The error returned by a 1-based rank query that has no answer.
///
/// # Examples
///
/// ```
/// use avl_ost::{AvlMultiset, RankError};
///
/// let set = AvlMultiset::from([1, 2]);
/// assert_eq!(set.kth_largest(3), Err(RankError::OutOfRange { k: 3, len: 2 }));
///
/// let empty: AvlMultiset<i32> = AvlMultiset::new();
/// assert_eq!(empty.median(), Err(RankError::Empty));
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
pub enum RankError {
    /// The multiset holds no elements.
    #[error("rank query on an empty multiset")]
    Empty,
    /// `k` was 0 or larger than the number of elements.
    #[error("rank {k} is outside 1..={len}")]
    OutOfRange {
        /// The requested rank.
        k: usize,
        /// The number of elements at the time of the query.
        len: usize,
    },
}

impl RankError {
    /// Checks a 1-based rank against a multiset of `len` elements.
    pub(crate) const fn check(k: usize, len: usize) -> Result<usize, Self> {
        if len == 0 {
            Err(Self::Empty)
        } else if k == 0 || k > len {
            Err(Self::OutOfRange {
                k,
                len,
            })
        } else {
            Ok(k)
        }
    }
}
