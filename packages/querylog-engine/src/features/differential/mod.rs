//! Differencing Engine
//!
//! Multiset difference between a stored [`ResultSet`](crate::shared::models::ResultSet)
//! and freshly executed rows. Sort and merge, O(n log n).

mod diff;

pub use diff::diff;
