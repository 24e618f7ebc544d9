use std::collections::BTreeMap;

use avl_ost::{AvlMultiset, Rank, RankError};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

/// The number of operations to perform in each proptest case.
const TEST_SIZE: usize = 5_000;

/// Generates values in a narrow range so that duplicates are common.
fn value_strategy() -> impl Strategy<Value = i64> {
    -500i64..500i64
}

// ─── Reference model ─────────────────────────────────────────────────────────

/// Sorted vector holding every copy; the slow but obviously-correct multiset.
#[derive(Default)]
struct Model(Vec<i64>);

impl Model {
    fn insert(&mut self, value: i64) {
        let at = self.0.partition_point(|&v| v <= value);
        self.0.insert(at, value);
    }

    fn remove(&mut self, value: i64) -> bool {
        match self.0.binary_search(&value) {
            Ok(at) => {
                self.0.remove(at);
                true
            }
            Err(_) => false,
        }
    }

    fn count(&self, value: i64) -> usize {
        self.0.iter().filter(|&&v| v == value).count()
    }

    fn kth_largest(&self, k: usize) -> i64 {
        self.0[self.0.len() - k]
    }
}

// ─── Operations enum for driving randomized tests ────────────────────────────

#[derive(Debug, Clone)]
enum Op {
    Insert(i64),
    Remove(i64),
    Contains(i64),
    KthLargest(usize),
    Median,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        6 => value_strategy().prop_map(Op::Insert),
        4 => value_strategy().prop_map(Op::Remove),
        2 => value_strategy().prop_map(Op::Contains),
        2 => (0usize..2_000).prop_map(Op::KthLargest),
        1 => Just(Op::Median),
    ]
}

fn build(values: &[i64]) -> AvlMultiset<i64> {
    values.iter().copied().collect()
}

/// Tallest height an AVL tree over `distinct` keys can reach.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn avl_height_bound(distinct: usize) -> usize {
    (1.44 * ((distinct + 2) as f64).log2()) as usize
}

// ─── Core operations ─────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// Replays a random sequence of operations on both the multiset and the
    /// sorted-vector model and asserts identical results at every step.
    #[test]
    fn ops_match_model(ops in proptest::collection::vec(op_strategy(), TEST_SIZE)) {
        let mut set = AvlMultiset::new();
        let mut model = Model::default();

        for op in &ops {
            match *op {
                Op::Insert(v) => {
                    model.insert(v);
                    prop_assert_eq!(set.insert(v), model.count(v), "insert({})", v);
                }
                Op::Remove(v) => {
                    prop_assert_eq!(set.remove(&v), model.remove(v), "remove({})", v);
                }
                Op::Contains(v) => {
                    prop_assert_eq!(set.contains(&v), model.count(v) > 0, "contains({})", v);
                    prop_assert_eq!(set.count(&v), model.count(v), "count({})", v);
                }
                Op::KthLargest(k) => {
                    let expected = match model.0.len() {
                        0 => Err(RankError::Empty),
                        len if k == 0 || k > len => Err(RankError::OutOfRange { k, len }),
                        _ => Ok(model.kth_largest(k)),
                    };
                    prop_assert_eq!(set.kth_largest(k).copied(), expected, "kth_largest({})", k);
                }
                Op::Median => {
                    let expected = match model.0.len() {
                        0 => Err(RankError::Empty),
                        len => Ok(model.kth_largest(len.div_ceil(2))),
                    };
                    prop_assert_eq!(set.median().copied(), expected, "median()");
                }
            }
            prop_assert_eq!(set.len(), model.0.len(), "len mismatch after {:?}", op);
            prop_assert_eq!(set.is_empty(), model.0.is_empty(), "is_empty mismatch after {:?}", op);
        }

        prop_assert_eq!(set.iter().copied().collect::<Vec<_>>(), model.0);
    }

    /// Every rank in 1..=N agrees with the sorted reference, from both ends.
    #[test]
    fn order_statistics_match_sorted_vec(
        values in proptest::collection::vec(value_strategy(), 1..TEST_SIZE),
        removals in proptest::collection::vec(value_strategy(), 0..TEST_SIZE / 2),
    ) {
        let mut set = build(&values);
        let mut model = Model::default();
        values.iter().for_each(|&v| model.insert(v));
        for v in &removals {
            set.remove(v);
            model.remove(*v);
        }

        let n = model.0.len();
        for k in 1..=n {
            prop_assert_eq!(set.kth_largest(k), Ok(&model.kth_largest(k)), "kth_largest({})", k);
            prop_assert_eq!(set.kth_smallest(k), Ok(&model.0[k - 1]), "kth_smallest({})", k);
            prop_assert_eq!(set[Rank(k - 1)], model.0[k - 1]);
        }
        prop_assert_eq!(set.get_by_rank(n), None);
        prop_assert_eq!(set.kth_largest(n + 1), Err(RankError::OutOfRange { k: n + 1, len: n }));
    }

    /// The median is the (N + 1) / 2-th largest element.
    #[test]
    fn median_is_upper_of_the_middle_pair(values in proptest::collection::vec(value_strategy(), 1..TEST_SIZE)) {
        let set = build(&values);
        let mut sorted = values.clone();
        sorted.sort_unstable();

        let n = sorted.len();
        prop_assert_eq!(set.median(), set.kth_largest(n.div_ceil(2)));
        prop_assert_eq!(set.median(), Ok(&sorted[n / 2]));
    }

    /// rank_of reports the number of strictly smaller elements.
    #[test]
    fn rank_of_matches_sorted_vec(values in proptest::collection::vec(value_strategy(), TEST_SIZE)) {
        let set = build(&values);
        let mut sorted = values.clone();
        sorted.sort_unstable();

        for v in &values {
            let rank = set.rank_of(v).expect("present value has a rank");
            prop_assert_eq!(rank, sorted.partition_point(|x| x < v));
            prop_assert_eq!(set.get_by_rank(rank), Some(v));
        }
        prop_assert_eq!(set.rank_of(&10_000), None);
    }

    /// Height stays inside the AVL worst-case bound, even under sorted input.
    #[test]
    fn height_within_avl_bound(ops in proptest::collection::vec(op_strategy(), TEST_SIZE), ascending in 0usize..3_000) {
        let mut set: AvlMultiset<i64> = (0..ascending as i64).collect();
        prop_assert!(set.height() <= avl_height_bound(set.distinct_len()));

        for op in &ops {
            match *op {
                Op::Insert(v) => { set.insert(v); }
                Op::Remove(v) => { set.remove(&v); }
                _ => {}
            }
            prop_assert!(
                set.height() <= avl_height_bound(set.distinct_len()),
                "height {} over bound for {} distinct values",
                set.height(),
                set.distinct_len()
            );
        }
    }

    /// Inserting and then removing a value restores the contents; when the
    /// value was already present the shape is untouched as well.
    #[test]
    fn insert_then_remove_round_trips(values in proptest::collection::vec(value_strategy(), 1..1_000), value in value_strategy()) {
        let mut set = build(&values);
        let contents: Vec<i64> = set.iter().copied().collect();
        let shape: Vec<i64> = set.traverse().copied().collect();
        let was_present = set.contains(&value);

        set.insert(value);
        prop_assert!(set.remove(&value));

        prop_assert_eq!(set.iter().copied().collect::<Vec<_>>(), contents);
        if was_present {
            prop_assert_eq!(set.traverse().copied().collect::<Vec<_>>(), shape);
        }
    }

    /// Iteration forwards, backwards and in pre-order yields every copy.
    #[test]
    fn iterators_yield_every_copy(values in proptest::collection::vec(value_strategy(), TEST_SIZE)) {
        let set = build(&values);
        let mut counts: BTreeMap<i64, usize> = BTreeMap::new();
        for v in &values {
            *counts.entry(*v).or_default() += 1;
        }
        let expected: Vec<i64> = counts.iter().flat_map(|(&v, &c)| std::iter::repeat_n(v, c)).collect();

        prop_assert_eq!(set.iter().len(), values.len());
        prop_assert_eq!(set.iter().copied().collect::<Vec<_>>(), expected.clone());
        prop_assert_eq!(set.iter().rev().copied().collect::<Vec<_>>(), expected.iter().rev().copied().collect::<Vec<_>>());

        let mut preorder: Vec<i64> = set.traverse().copied().collect();
        prop_assert_eq!(preorder.len(), values.len());
        preorder.sort_unstable();
        prop_assert_eq!(preorder, expected);
    }
}

// ─── Fixed scenarios ─────────────────────────────────────────────────────────

#[test]
fn five_key_scenario() {
    let mut set = AvlMultiset::new();
    for key in [5, 3, 8, 3, 1] {
        set.insert(key);
    }

    assert_eq!(set.len(), 5);
    assert_eq!(set.iter().copied().collect::<Vec<_>>(), [1, 3, 3, 5, 8]);
    assert_eq!(set.traverse().copied().collect::<Vec<_>>(), [5, 3, 3, 1, 8]);
    assert_eq!(set.median(), Ok(&3));
    assert_eq!(set.kth_largest(1), Ok(&8));
    assert_eq!(set.kth_largest(5), Ok(&1));

    assert!(set.remove(&3));
    assert_eq!(set.len(), 4);
    assert_eq!(set.iter().copied().collect::<Vec<_>>(), [1, 3, 5, 8]);
    assert_eq!(set.median(), Ok(&5));
    assert_eq!(set.median(), set.kth_largest(2));
}

#[test]
fn multiplicity_rises_and_falls() {
    let mut set: AvlMultiset<i64> = (0..50).collect();
    let shape: Vec<i64> = set.traverse().copied().collect();

    for m in 1..=6 {
        assert_eq!(set.insert(25), m + 1);
    }
    assert_eq!(set.distinct_len(), 50);

    for remaining in (1..=6).rev() {
        assert!(set.remove(&25));
        assert_eq!(set.count(&25), remaining);
    }
    assert_eq!(set.traverse().copied().collect::<Vec<_>>(), shape);

    assert!(set.remove(&25));
    assert!(!set.contains(&25));
    assert_eq!(set.distinct_len(), 49);
    assert!(!set.remove(&25));
}

#[test]
fn removing_absent_value_is_a_no_op() {
    let mut set = AvlMultiset::from([2, 4, 6]);
    let shape: Vec<i32> = set.traverse().copied().collect();

    assert!(!set.remove(&5));
    assert_eq!(set.len(), 3);
    assert_eq!(set.traverse().copied().collect::<Vec<_>>(), shape);

    let mut empty: AvlMultiset<i32> = AvlMultiset::new();
    assert!(!empty.remove(&1));
}

#[test]
fn clear_then_reuse() {
    let mut set: AvlMultiset<i64> = (0..100).chain(0..100).collect();
    assert_eq!(set.len(), 200);
    set.clear();
    assert!(set.is_empty());
    assert_eq!(set.height(), 0);
    assert_eq!(set.median(), Err(RankError::Empty));

    set.extend([3, 1, 2]);
    assert_eq!(set.median(), Ok(&2));
}

#[test]
fn probes_are_bounded_by_height() {
    let set: AvlMultiset<i64> = (0..10_000).collect();
    let n = set.len();
    for k in [1, n / 3, n / 2, n] {
        let (value, probes) = set.kth_largest_with_probes(k).expect("rank in range");
        assert_eq!(*value, (n - k) as i64);
        assert!(probes >= 1 && probes <= set.height(), "{probes} probes for k = {k}");
    }
}

#[test]
fn works_with_borrowed_lookups() {
    let set: AvlMultiset<String> = ["pear", "fig", "pear", "apple"].into_iter().map(String::from).collect();
    assert_eq!(set.count("pear"), 2);
    assert_eq!(set.rank_of("fig"), Some(1));
    assert_eq!(set.first().map(String::as_str), Some("apple"));
    assert_eq!(set.median().map(String::as_str), Ok("pear"));
}
