//! Result Commit Engine
//!
//! Reads the previous results for a name, runs the differential, decides
//! which keys to write and fills the caller's [`LogItem`].
//!
//! A failed read or write aborts the commit. Writes that already landed stay
//! (results and epoch go out as one batch; counters are separate writes).

use querylog_storage::QUERIES_DOMAIN;
use tracing::debug;

use super::record::{Query, QueryStatus};
use crate::errors::Result;
use crate::features::differential::diff;
use crate::shared::models::{serialize_query_data_json, DiffResults, LogItem, QueryData};

impl<'s> Query<'s> {
    /// Commit rows that are already incremental events.
    ///
    /// `current` becomes the added set as-is. A new epoch resets the stored
    /// result set to empty and records the epoch.
    pub fn add_new_events(&self, current: QueryData, item: &mut LogItem) -> Result<QueryStatus> {
        let status = self.get_query_status(item.epoch)?;
        item.previous_epoch = status.previous_epoch;

        if status.new_epoch {
            self.store.put_batch(
                QUERIES_DOMAIN,
                &[
                    (self.keys.results.clone(), "[]".to_string()),
                    (self.keys.epoch.clone(), item.epoch.to_string()),
                ],
            )?;
        }

        item.results = DiffResults::all_added(current);
        if !item.results.added.is_empty() {
            item.counter =
                self.increment_counter(false, status.new_epoch || status.new_query)?;
        }
        Ok(status)
    }

    /// Commit a polled result set.
    ///
    /// With `calculate_diff`, a known query is diffed against its stored
    /// results. On a new epoch the outgoing epoch's changes land in
    /// `item.previous_remaining` (with their own counter) and the primary
    /// results restart as "everything added". An unchanged poll in the same
    /// epoch writes nothing and leaves the counter alone.
    ///
    /// A new query, or `calculate_diff == false`, always reports every row as
    /// added and always writes.
    pub fn add_new_results(
        &self,
        current: QueryData,
        item: &mut LogItem,
        calculate_diff: bool,
    ) -> Result<QueryStatus> {
        let status = self.get_query_status(item.epoch)?;
        item.previous_epoch = status.previous_epoch;

        let mut update_db = true;
        let mut changes = None;
        if !status.new_query && calculate_diff {
            let previous = self.get_previous_query_results()?;
            if status.new_epoch {
                item.previous_remaining = diff(&previous, &current);
                debug!(
                    "query {} previous epoch remaining {}",
                    self.name,
                    item.previous_remaining.summary()
                );
            } else {
                let results = diff(&previous, &current);
                debug!("query {} differential {}", self.name, results.summary());
                update_db = !results.is_empty();
                changes = Some(results);
            }
        }

        if update_db {
            let json = serialize_query_data_json(&current)?;
            self.store.put_batch(
                QUERIES_DOMAIN,
                &[
                    (self.keys.results.clone(), json),
                    (self.keys.epoch.clone(), item.epoch.to_string()),
                ],
            )?;
        } else {
            debug!("query {} unchanged, skipping write", self.name);
        }
        item.results = changes.unwrap_or_else(|| DiffResults::all_added(current));

        // The outgoing epoch's query was known by definition: stored + 1.
        if status.new_epoch && item.has_previous_remaining() {
            item.previous_remaining_counter = self.increment_counter(false, false)?;
        }

        if update_db || status.new_epoch || status.new_query {
            // A restarted epoch opens with an all-records item (counter 0);
            // a first encounter or altered text starts at 1.
            let all_records = status.new_epoch && !status.new_query;
            item.counter = self.increment_counter(all_records, status.new_query)?;
        }
        Ok(status)
    }

    /// Non-differential commit; returns the new primary counter.
    pub fn add_new_results_with_epoch(&self, current: QueryData, epoch: u64) -> Result<u64> {
        let mut item = LogItem {
            name: self.name.clone(),
            epoch,
            ..LogItem::default()
        };
        self.add_new_results(current, &mut item, false)?;
        Ok(item.counter)
    }
}
