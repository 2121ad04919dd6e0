//! In-memory key-value store
//!
//! `BTreeMap`-based implementation, so prefix scans come back sorted.
//! Nothing survives the process.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use crate::domain::KeyValueStore;
use crate::{Result, StorageError};

type Table = BTreeMap<(String, String), String>;

#[derive(Clone, Default)]
pub struct InMemoryStore {
    entries: Arc<RwLock<Table>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys across all domains
    pub fn len(&self) -> Result<usize> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.read()?.is_empty())
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Table>> {
        self.entries
            .read()
            .map_err(|e| StorageError::lock(format!("in-memory store poisoned: {}", e)))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, Table>> {
        self.entries
            .write()
            .map_err(|e| StorageError::lock(format!("in-memory store poisoned: {}", e)))
    }
}

impl KeyValueStore for InMemoryStore {
    fn get(&self, domain: &str, key: &str) -> Result<Option<String>> {
        Ok(self
            .read()?
            .get(&(domain.to_string(), key.to_string()))
            .cloned())
    }

    fn put(&self, domain: &str, key: &str, value: &str) -> Result<()> {
        self.write()?
            .insert((domain.to_string(), key.to_string()), value.to_string());
        Ok(())
    }

    fn put_batch(&self, domain: &str, entries: &[(String, String)]) -> Result<()> {
        // Single guard: readers never observe half of the batch.
        let mut table = self.write()?;
        for (key, value) in entries {
            table.insert((domain.to_string(), key.clone()), value.clone());
        }
        Ok(())
    }

    fn delete(&self, domain: &str, key: &str) -> Result<()> {
        self.write()?.remove(&(domain.to_string(), key.to_string()));
        Ok(())
    }

    fn scan_keys(&self, domain: &str, prefix: &str) -> Result<Vec<String>> {
        let start = (domain.to_string(), prefix.to_string());
        Ok(self
            .read()?
            .range(start..)
            .take_while(|((d, k), _)| d == domain && k.starts_with(prefix))
            .map(|((_, k), _)| k.clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::QUERIES_DOMAIN;

    #[test]
    fn test_get_missing_is_none() {
        let store = InMemoryStore::new();
        assert_eq!(store.get(QUERIES_DOMAIN, "nope").unwrap(), None);
    }

    #[test]
    fn test_put_replaces() {
        let store = InMemoryStore::new();
        store.put(QUERIES_DOMAIN, "pcounter", "1").unwrap();
        store.put(QUERIES_DOMAIN, "pcounter", "2").unwrap();

        assert_eq!(
            store.get(QUERIES_DOMAIN, "pcounter").unwrap().as_deref(),
            Some("2")
        );
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn test_domains_are_isolated() {
        let store = InMemoryStore::new();
        store.put("a", "k", "1").unwrap();
        store.put("b", "k", "2").unwrap();

        assert_eq!(store.get("a", "k").unwrap().as_deref(), Some("1"));
        assert_eq!(store.scan_keys("b", "").unwrap(), vec!["k".to_string()]);
    }

    #[test]
    fn test_scan_keys_prefix_sorted() {
        let store = InMemoryStore::new();
        for key in ["query.zeta", "query.alpha", "alpha", "alphaepoch", "query."] {
            store.put(QUERIES_DOMAIN, key, "x").unwrap();
        }
        store.put("other", "query.beta", "x").unwrap();

        let keys = store.scan_keys(QUERIES_DOMAIN, "query.").unwrap();
        assert_eq!(keys, vec!["query.", "query.alpha", "query.zeta"]);
    }

    #[test]
    fn test_put_batch_and_delete() {
        let store = InMemoryStore::new();
        store
            .put_batch(
                QUERIES_DOMAIN,
                &[
                    ("procs".to_string(), "[]".to_string()),
                    ("procsepoch".to_string(), "3".to_string()),
                ],
            )
            .unwrap();
        assert_eq!(store.len().unwrap(), 2);

        store.delete(QUERIES_DOMAIN, "procs").unwrap();
        store.delete(QUERIES_DOMAIN, "procs").unwrap();
        assert_eq!(store.get(QUERIES_DOMAIN, "procs").unwrap(), None);
        assert!(!store.is_empty().unwrap());
    }
}
