//! An order-statistic multiset for Rust, built on a size-augmented AVL tree.
//!
//! This crate provides [`AvlMultiset`], an ordered collection that keeps
//! duplicate values and answers rank queries in O(log n):
//!
//! - [`kth_largest`](AvlMultiset::kth_largest) / [`kth_smallest`](AvlMultiset::kth_smallest) -
//!   the element at a 1-based rank from either end
//! - [`median`](AvlMultiset::median) - the `(len + 1) / 2`-th largest element
//! - [`get_by_rank`](AvlMultiset::get_by_rank) and indexing by [`Rank`] - zero-based ascending access
//! - [`rank_of`](AvlMultiset::rank_of) - the sorted position of a value
//!
//! # Example
//!
//! ```
//! use avl_ost::{AvlMultiset, Rank, RankError};
//!
//! let mut latencies = AvlMultiset::new();
//! for ms in [12, 7, 30, 7, 19] {
//!     latencies.insert(ms);
//! }
//!
//! // Duplicates are kept and counted.
//! assert_eq!(latencies.len(), 5);
//! assert_eq!(latencies.count(&7), 2);
//!
//! // Order-statistic operations (O(log n))
//! assert_eq!(latencies.median(), Ok(&12));
//! assert_eq!(latencies.kth_largest(1), Ok(&30));
//! assert_eq!(latencies[Rank(0)], 7);
//!
//! // Ranks outside 1..=len are reported, not guessed.
//! assert_eq!(latencies.kth_largest(6), Err(RankError::OutOfRange { k: 6, len: 5 }));
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **Multiset semantics** - One node per distinct value, with a per-node copy count
//! - **O(log n) rank operations** - Every node tracks the element counts of both subtrees
//! - **Arena storage** - Nodes live in a slot arena linked by compact handles
//!
//! # Implementation
//!
//! The tree is a classic AVL tree: every node's subtrees differ in height by
//! at most one, restored by single and double rotations after each insertion
//! and removal. Rotations also move the left/right element counts between the
//! two nodes involved, so rank queries stay exact without ever walking a
//! whole subtree.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod order_statistic;
mod raw;

pub mod avl_multiset;

pub use avl_multiset::AvlMultiset;
pub use order_statistic::{Rank, RankError};
