//! Result-tracking features
//!
//! - `differential`: multiset diff between stored and current rows
//! - `query`: per-name epoch/counter state machine and commit engine
//! - `serialization`: legacy and event wire forms

pub mod differential;
pub mod query;
pub mod serialization;
