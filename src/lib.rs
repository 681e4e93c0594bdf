//! Ordered symbol tables backed by a left-leaning red-black tree.
//!
//! This crate provides [`LlrbMap`] and [`LlrbSet`], ordered collections with
//! a `BTreeMap`-like API plus the classic symbol-table queries, all in
//! O(log n):
//!
//! - [`min`](LlrbMap::min) / [`max`](LlrbMap::max) and
//!   [`delete_min`](LlrbMap::delete_min) / [`delete_max`](LlrbMap::delete_max)
//! - [`floor`](LlrbMap::floor) / [`ceiling`](LlrbMap::ceiling) - nearest keys at or below/above a probe
//! - [`select`](LlrbMap::select) / [`rank`](LlrbMap::rank) - position-based access in sorted order
//! - [`len_between`](LlrbMap::len_between) / [`keys_between`](LlrbMap::keys_between) - closed-interval counts and scans
//! - Indexing by [`Rank`] - e.g., `map[Rank(0)]` for the first value
//!
//! # Example
//!
//! ```
//! use llrb_tree::{Error, LlrbMap, Rank};
//!
//! let mut scores = LlrbMap::new();
//! scores.insert("Alice", 100);
//! scores.insert("Bob", 85);
//! scores.insert("Carol", 92);
//!
//! assert_eq!(scores.get(&"Bob"), Some(&85));
//! assert_eq!(scores.len(), 3);
//!
//! // Keys are sorted alphabetically.
//! assert_eq!(scores.select(1), Ok(&"Bob"));
//! assert_eq!(scores.rank(&"Carol"), 2);
//! assert_eq!(scores.floor(&"Bz"), Ok(Some(&"Bob")));
//! assert_eq!(scores[Rank(0)], 100);
//!
//! scores.clear();
//! assert_eq!(scores.min(), Err(Error::Underflow));
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **No unsafe code** - Nodes live in an index arena and link by handle
//! - **Balanced** - Height is at most 2 lg n, checked by [`LlrbMap::check_invariants`]
//!
//! # Implementation
//!
//! The tree is a left-leaning red-black BST: a binary encoding of a 2-3 tree
//! in which every red link leans left, no node has two red links, and every
//! root-to-null path crosses the same number of black links. Each node stores
//! the size of its subtree, which is what makes rank and select logarithmic.
//! Mutations log their rotations and color flips at `trace` level through the
//! [`log`](https://docs.rs/log) facade.

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

mod error;
mod order_statistic;
mod raw;

pub mod llrb_map;
pub mod llrb_set;

pub use error::{Error, Violation};
pub use llrb_map::LlrbMap;
pub use llrb_set::LlrbSet;
pub use order_statistic::Rank;
