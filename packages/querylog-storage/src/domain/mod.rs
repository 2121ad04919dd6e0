//! Domain layer for the persisted query-state store
//!
//! Every value is text. Keys live inside a logical *domain* (namespace);
//! the result-tracking engine keeps everything it owns under
//! [`QUERIES_DOMAIN`].
//!
//! # Port Trait
//!
//! - `KeyValueStore`: primary storage abstraction
//!
//! # Examples
//!
//! ```rust
//! use querylog_storage::{InMemoryStore, KeyValueStore, QUERIES_DOMAIN};
//!
//! let store = InMemoryStore::new();
//! store.put(QUERIES_DOMAIN, "query.users", "SELECT * FROM users").unwrap();
//!
//! let text = store.get(QUERIES_DOMAIN, "query.users").unwrap();
//! assert_eq!(text.as_deref(), Some("SELECT * FROM users"));
//! assert!(store.get(QUERIES_DOMAIN, "missing").unwrap().is_none());
//! ```

use crate::Result;

/// Namespace holding scheduled-query results, texts, epochs and counters.
pub const QUERIES_DOMAIN: &str = "queries";

// ═══════════════════════════════════════════════════════════════════════════
// Port Trait: KeyValueStore
// ═══════════════════════════════════════════════════════════════════════════

/// Text key-value storage abstraction
///
/// Calls are synchronous and offer no isolation between callers: two
/// read-modify-write sequences on the same keys may interleave. Callers that
/// need consistency serialize access per key group.
///
/// # Implementations
///
/// - `InMemoryStore`: `BTreeMap` behind a lock (tests, ephemeral agents)
/// - `SqliteStore`: single-table SQLite adapter
pub trait KeyValueStore: Send + Sync {
    /// Read a value.
    ///
    /// Returns `Ok(None)` when the key does not exist; `Err` only when the
    /// backend itself failed.
    fn get(&self, domain: &str, key: &str) -> Result<Option<String>>;

    /// Insert or replace a value.
    fn put(&self, domain: &str, key: &str, value: &str) -> Result<()>;

    /// Insert or replace several values.
    ///
    /// The default implementation writes sequentially and stops at the first
    /// failure, leaving earlier writes in place. Backends with transactions
    /// override this to apply all-or-nothing.
    fn put_batch(&self, domain: &str, entries: &[(String, String)]) -> Result<()> {
        for (key, value) in entries {
            self.put(domain, key, value)?;
        }
        Ok(())
    }

    /// Remove a key. Removing a missing key is not an error.
    fn delete(&self, domain: &str, key: &str) -> Result<()>;

    /// List keys starting with `prefix`, sorted ascending.
    ///
    /// An empty prefix lists the whole domain.
    fn scan_keys(&self, domain: &str, prefix: &str) -> Result<Vec<String>>;
}
