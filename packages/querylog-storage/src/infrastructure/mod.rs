//! Infrastructure layer - Storage adapters
//!
//! - `memory`: process-local map
//! - `sqlite`: file-backed SQLite adapter

pub mod memory;
pub use memory::InMemoryStore;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteStore;
