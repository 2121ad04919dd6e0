//! Epoch/Counter State Machine and Result Commit Engine
//!
//! [`Query`] is a handle over the four keys one scheduled query name owns.
//!
//! # Examples
//!
//! ```rust
//! use querylog_engine::features::query::Query;
//! use querylog_engine::shared::models::{LogItem, RowTyped};
//! use querylog_storage::InMemoryStore;
//!
//! let store = InMemoryStore::new();
//! let query = Query::new("users", "SELECT uid FROM users", &store);
//!
//! let mut item = LogItem::new("users", "host-1", 1);
//! let status = query
//!     .add_new_results(vec![RowTyped::new().with("uid", 0)], &mut item, true)
//!     .unwrap();
//!
//! assert!(status.new_query);
//! assert_eq!(item.results.added.len(), 1);
//! assert_eq!(item.counter, 1);
//! ```

mod commit;
mod record;

pub use record::{Query, QueryKeys, QueryStatus, QUERY_TEXT_PREFIX};
