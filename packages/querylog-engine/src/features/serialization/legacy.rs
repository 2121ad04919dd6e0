//! Legacy form: one snapshot-or-differential document per pass.

use serde_json::{Map, Value};

use super::fields::{add_legacy_fields_and_decorations, serialize_diff_results, Pass};
use crate::config::RenderOptions;
use crate::errors::{QueryLogError, Result};
use crate::shared::models::{query_data_to_json, LogItem};

fn serialize_pass(pass: Pass, item: &LogItem, opts: &RenderOptions) -> Result<Option<Value>> {
    let results = pass.diff_results(item);
    let mut doc = Map::new();

    if !results.is_empty() {
        doc.insert(
            "diffResults".to_string(),
            serialize_diff_results(results, opts.numerics),
        );
    } else if pass == Pass::PreviousRemaining {
        return Ok(None);
    } else if !item.snapshot_results.is_empty() || item.has_previous_remaining() {
        // A rollover to zero rows still closes the new epoch with an
        // (empty) snapshot after the flushed leftovers.
        doc.insert(
            "snapshot".to_string(),
            query_data_to_json(&item.snapshot_results, opts.numerics),
        );
        doc.insert("action".to_string(), Value::from("snapshot"));
    } else {
        return Err(QueryLogError::NoResults);
    }

    add_legacy_fields_and_decorations(pass, item, opts, &mut doc);
    Ok(Some(Value::Object(doc)))
}

/// Render `item` as legacy documents.
///
/// Yields `[previous_epoch_item, current_epoch_item]` when the item carries
/// previous-epoch leftovers, otherwise just the current one.
///
/// # Errors
///
/// [`QueryLogError::NoResults`] when the item has nothing to report: no
/// differential, no snapshot rows and no previous-epoch leftovers.
pub fn serialize_query_log_item(item: &LogItem, opts: &RenderOptions) -> Result<Vec<Value>> {
    let mut docs = Vec::with_capacity(2);
    for pass in Pass::ORDER {
        if let Some(doc) = serialize_pass(pass, item, opts)? {
            docs.push(doc);
        }
    }
    Ok(docs)
}

/// [`serialize_query_log_item`], one JSON string per document
pub fn serialize_query_log_item_json(item: &LogItem, opts: &RenderOptions) -> Result<Vec<String>> {
    serialize_query_log_item(item, opts)?
        .iter()
        .map(|doc| serde_json::to_string(doc).map_err(QueryLogError::from))
        .collect()
}
