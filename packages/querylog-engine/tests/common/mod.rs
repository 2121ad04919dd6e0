//! Common test utilities for querylog-engine
//!
//! Row builders and a store wrapper that injects backend failures.

#![allow(dead_code)]

use querylog_engine::shared::models::{QueryData, Row, RowTyped};
use querylog_storage::{InMemoryStore, KeyValueStore, Result, StorageError};

/// Single-column text rows: `rows("a", &["1", "2"])`
pub fn rows(column: &str, values: &[&str]) -> QueryData {
    values
        .iter()
        .map(|v| RowTyped::new().with(column, *v))
        .collect()
}

/// Text projections, sorted: multiset comparison of row collections
pub fn sorted_text(rows: &[RowTyped]) -> Vec<Row> {
    let mut text: Vec<Row> = rows.iter().map(RowTyped::to_row).collect();
    text.sort();
    text
}

/// In-memory store that fails reads and/or writes of chosen keys
#[derive(Default)]
pub struct FailingStore {
    pub inner: InMemoryStore,
    pub fail_get: Option<String>,
    pub fail_put: Option<String>,
}

impl FailingStore {
    pub fn failing_get(key: &str) -> Self {
        Self {
            fail_get: Some(key.to_string()),
            ..Self::default()
        }
    }

    pub fn failing_put(key: &str) -> Self {
        Self {
            fail_put: Some(key.to_string()),
            ..Self::default()
        }
    }
}

impl KeyValueStore for FailingStore {
    fn get(&self, domain: &str, key: &str) -> Result<Option<String>> {
        if self.fail_get.as_deref() == Some(key) {
            return Err(StorageError::database(format!("read of {} failed", key)));
        }
        self.inner.get(domain, key)
    }

    fn put(&self, domain: &str, key: &str, value: &str) -> Result<()> {
        if self.fail_put.as_deref() == Some(key) {
            return Err(StorageError::database(format!("write of {} failed", key)));
        }
        self.inner.put(domain, key, value)
    }

    fn delete(&self, domain: &str, key: &str) -> Result<()> {
        self.inner.delete(domain, key)
    }

    fn scan_keys(&self, domain: &str, prefix: &str) -> Result<Vec<String>> {
        self.inner.scan_keys(domain, prefix)
    }
}
