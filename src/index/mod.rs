//! Index Module
//!
//! In-memory ordered sequence of keyed records.
//!
//! ## Responsibilities
//! - Keep records ascending by key
//! - O(log n) point lookup by binary search
//! - Order-preserving insert
//!
//! ## Data Structure Choice
//! A plain sorted `Vec`:
//! - Matches the persisted layout one-to-one (file order == index order)
//! - Binary search over a contiguous slice
//! - Collections are small, so the O(n) shift on insert is cheap
//!
//! Duplicate keys are NOT rejected here. Whether a clash is an error or an
//! overwrite is the caller's decision; `first_duplicate` lets it check.

mod sorted;

pub use sorted::SortedIndex;
