//! querylog-storage - persisted state for scheduled-query result tracking
//!
//! A small text key-value port plus two adapters. The result-tracking
//! engine keeps four keys per query name in the [`QUERIES_DOMAIN`]
//! namespace:
//!
//! | key              | value                              |
//! |------------------|------------------------------------|
//! | `query.<name>`   | last committed query text          |
//! | `<name>`         | last committed result set (JSON)   |
//! | `<name>epoch`    | epoch of the stored result set     |
//! | `<name>counter`  | last emitted execution counter     |
//!
//! ## Usage
//!
//! ```rust
//! use querylog_storage::{InMemoryStore, KeyValueStore, QUERIES_DOMAIN};
//!
//! let store = InMemoryStore::new();
//! store.put(QUERIES_DOMAIN, "query.users", "SELECT * FROM users")?;
//! store.put(QUERIES_DOMAIN, "query.mounts", "SELECT * FROM mounts")?;
//!
//! let names = store.scan_keys(QUERIES_DOMAIN, "query.")?;
//! assert_eq!(names, vec!["query.mounts", "query.users"]);
//! # Ok::<(), querylog_storage::StorageError>(())
//! ```

pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::{ErrorKind, Result, StorageError};

pub use domain::{KeyValueStore, QUERIES_DOMAIN};
pub use infrastructure::InMemoryStore;

#[cfg(feature = "sqlite")]
pub use infrastructure::SqliteStore;
