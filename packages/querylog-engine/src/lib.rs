//! querylog-engine - result tracking for scheduled queries
//!
//! For each named scheduled query this crate decides, on every execution,
//! whether to report a full snapshot or a differential of rows, assigns the
//! per-query counter and epoch, and renders the outcome in the wire forms
//! downstream collectors consume.
//!
//! ## Flow
//!
//! ```text
//! scheduler (rows, epoch)
//!           ↓
//! features::query       (status → diff → writes → LogItem)
//!           ↓
//! features::serialization (legacy documents / per-row events)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use querylog_engine::config::LoggerConfig;
//! use querylog_engine::features::query::Query;
//! use querylog_engine::features::serialization::serialize_query_log_item;
//! use querylog_engine::shared::models::{LogItem, RowTyped};
//! use querylog_storage::InMemoryStore;
//!
//! let store = InMemoryStore::new();
//! let query = Query::new("q1", "SELECT a FROM t", &store);
//!
//! let mut first = LogItem::new("q1", "host", 1);
//! query.add_new_results(vec![RowTyped::new().with("a", "1")], &mut first, true)?;
//!
//! let mut second = LogItem::new("q1", "host", 1);
//! let rows = vec![RowTyped::new().with("a", "1"), RowTyped::new().with("a", "2")];
//! query.add_new_results(rows, &mut second, true)?;
//! assert_eq!(second.results.added, vec![RowTyped::new().with("a", "2")]);
//! assert_eq!(second.counter, 2);
//!
//! let docs = serialize_query_log_item(&second, &LoggerConfig::default())?;
//! assert_eq!(docs[0]["counter"], 2);
//! # Ok::<(), querylog_engine::QueryLogError>(())
//! ```

pub mod config;
pub mod errors;
pub mod features;
pub mod shared;

pub use errors::{QueryLogError, Result};

pub use config::{LoggerConfig, RenderOptions};
pub use features::differential::diff;
pub use features::query::{Query, QueryStatus};
pub use features::serialization::{
    deserialize_query_log_item, serialize_query_log_item, serialize_query_log_item_as_events,
    serialize_query_log_item_as_events_json, serialize_query_log_item_json,
};
pub use shared::models::{ColumnValue, DiffResults, LogItem, QueryData, ResultSet, Row, RowTyped};
