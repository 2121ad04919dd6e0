//! Per-name persisted state and the epoch/counter state machine

use querylog_storage::{KeyValueStore, QUERIES_DOMAIN};
use tracing::{debug, info, warn};

use crate::errors::Result;
use crate::shared::models::{deserialize_query_data_json, QueryData, ResultSet};

/// Key prefix for stored query texts
pub const QUERY_TEXT_PREFIX: &str = "query.";

/// Storage keys owned by one query name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryKeys {
    pub results: String,
    pub query_text: String,
    pub epoch: String,
    pub counter: String,
}

impl QueryKeys {
    pub fn for_name(name: &str) -> Self {
        Self {
            results: name.to_string(),
            query_text: format!("{}{}", QUERY_TEXT_PREFIX, name),
            epoch: format!("{}epoch", name),
            counter: format!("{}counter", name),
        }
    }
}

/// What the persisted history says about this execution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QueryStatus {
    /// Epoch of the stored results, 0 when unknown
    pub previous_epoch: u64,
    /// The stored epoch is absent or differs from the current one
    pub new_epoch: bool,
    /// First encounter, or the configured text differs from the stored one
    pub new_query: bool,
}

/// Handle over the persisted state of one scheduled query name.
///
/// Holds no rows itself. Commits for the same name must be serialized by
/// the caller; the store offers no isolation between read and write.
pub struct Query<'s> {
    pub(crate) name: String,
    pub(crate) query: String,
    pub(crate) keys: QueryKeys,
    pub(crate) store: &'s dyn KeyValueStore,
}

impl<'s> Query<'s> {
    pub fn new(
        name: impl Into<String>,
        query: impl Into<String>,
        store: &'s dyn KeyValueStore,
    ) -> Self {
        let name = name.into();
        Self {
            keys: QueryKeys::for_name(&name),
            name,
            query: query.into(),
            store,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn keys(&self) -> &QueryKeys {
        &self.keys
    }

    /// Names of every query committed at least once, sorted
    pub fn get_stored_query_names(store: &dyn KeyValueStore) -> Result<Vec<String>> {
        let keys = store.scan_keys(QUERIES_DOMAIN, QUERY_TEXT_PREFIX)?;
        Ok(keys
            .into_iter()
            .filter_map(|k| k.strip_prefix(QUERY_TEXT_PREFIX).map(str::to_string))
            .collect())
    }

    /// True once the name has been committed (its query text is stored)
    pub fn is_query_name_in_database(&self) -> Result<bool> {
        Ok(self.get(&self.keys.query_text)?.is_some())
    }

    /// True when the stored query text differs from the configured one
    pub fn is_new_query(&self) -> Result<bool> {
        Ok(self.get(&self.keys.query_text)?.as_deref() != Some(self.query.as_str()))
    }

    /// Epoch of the stored results; absent and unparsable are both `None`
    pub fn get_previous_epoch(&self) -> Result<Option<u64>> {
        self.get_number(&self.keys.epoch)
    }

    /// Results persisted by the last commit (empty when none)
    pub fn get_previous_query_results(&self) -> Result<ResultSet> {
        match self.get(&self.keys.results)? {
            Some(raw) => ResultSet::from_json(&raw),
            None => Ok(ResultSet::new()),
        }
    }

    /// Most recent stored result set, in stored order
    pub fn get_current_results(&self) -> Result<QueryData> {
        match self.get(&self.keys.results)? {
            Some(raw) => deserialize_query_data_json(&raw),
            None => Ok(QueryData::new()),
        }
    }

    /// Classify this execution against persisted history.
    ///
    /// A first encounter or an altered query text stores the configured text
    /// right away, so re-entry sees a known, unaltered query.
    pub fn get_query_status(&self, epoch: u64) -> Result<QueryStatus> {
        let stored_epoch = self.get_previous_epoch()?;
        let mut status = QueryStatus {
            previous_epoch: stored_epoch.unwrap_or(0),
            ..QueryStatus::default()
        };

        if !self.is_query_name_in_database()? {
            status.new_epoch = true;
            status.new_query = true;
            info!(
                "Storing initial results for new scheduled query: {}",
                self.name
            );
            self.save_query()?;
        } else if stored_epoch != Some(epoch) {
            status.new_epoch = true;
            info!("New Epoch {} for scheduled query {}", epoch, self.name);
        } else if self.is_new_query()? {
            status.new_query = true;
            info!("Scheduled query has been updated: {}", self.name);
            self.save_query()?;
        }
        Ok(status)
    }

    /// Counter value for the next emitted item.
    ///
    /// `all_records` → 0; `new_query` → 1; otherwise stored counter + 1, with
    /// an absent or unparsable stored counter counting as 0.
    pub fn get_query_counter(&self, all_records: bool, new_query: bool) -> Result<u64> {
        if all_records {
            return Ok(0);
        }
        // Starting at 1 keeps differential items distinguishable from
        // all-records ones.
        if new_query {
            return Ok(1);
        }
        let stored = self.get_number(&self.keys.counter)?.unwrap_or(0);
        Ok(stored.saturating_add(1))
    }

    /// Compute and persist the next counter. Not idempotent.
    pub fn increment_counter(&self, all_records: bool, new_query: bool) -> Result<u64> {
        let counter = self.get_query_counter(all_records, new_query)?;
        self.put(&self.keys.counter, &counter.to_string())?;
        debug!("query {} counter -> {}", self.name, counter);
        Ok(counter)
    }

    fn save_query(&self) -> Result<()> {
        self.put(&self.keys.query_text, &self.query)
    }

    pub(crate) fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.store.get(QUERIES_DOMAIN, key)?)
    }

    pub(crate) fn put(&self, key: &str, value: &str) -> Result<()> {
        Ok(self.store.put(QUERIES_DOMAIN, key, value)?)
    }

    fn get_number(&self, key: &str) -> Result<Option<u64>> {
        let Some(raw) = self.get(key)? else {
            return Ok(None);
        };
        match raw.trim().parse::<u64>() {
            Ok(n) => Ok(Some(n)),
            Err(e) => {
                warn!(
                    "ignoring unparsable value {:?} under {}: {}",
                    raw, key, e
                );
                Ok(None)
            }
        }
    }
}
