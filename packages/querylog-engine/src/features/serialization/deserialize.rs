//! Reading legacy documents back into log items

use serde_json::Value;

use crate::errors::{QueryLogError, Result};
use crate::shared::models::{query_data_from_json, DiffResults, LogItem};

/// Parse a `{"removed": [...], "added": [...]}` object. Missing lists are empty.
pub fn deserialize_diff_results(doc: &Value) -> Result<DiffResults> {
    let obj = doc
        .as_object()
        .ok_or_else(|| QueryLogError::malformed("diffResults must be an object"))?;

    let mut results = DiffResults::new();
    if let Some(removed) = obj.get("removed") {
        results.removed = query_data_from_json(removed)?;
    }
    if let Some(added) = obj.get("added") {
        results.added = query_data_from_json(added)?;
    }
    Ok(results)
}

/// Parse one legacy-form document.
///
/// Only nested decorations are recovered; top-level ones cannot be told
/// apart from metadata.
pub fn deserialize_query_log_item(doc: &Value) -> Result<LogItem> {
    let obj = doc
        .as_object()
        .ok_or_else(|| QueryLogError::malformed("log item must be an object"))?;

    let text = |field: &str| -> Result<String> {
        obj.get(field)
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| QueryLogError::malformed(format!("missing string field '{}'", field)))
    };
    let number = |field: &str| obj.get(field).and_then(Value::as_u64);

    let mut item = LogItem {
        name: text("name")?,
        identifier: text("hostIdentifier")?,
        calendar_time: text("calendarTime")?,
        time: number("unixTime")
            .ok_or_else(|| QueryLogError::malformed("missing numeric field 'unixTime'"))?,
        epoch: number("epoch").unwrap_or(0),
        previous_epoch: number("previous_epoch").unwrap_or(0),
        counter: number("counter").unwrap_or(0),
        ..LogItem::default()
    };

    if let Some(Value::Object(decorations)) = obj.get("decorations") {
        for (key, value) in decorations {
            let value = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            item.decorations.insert(key.clone(), value);
        }
    }

    if let Some(diff) = obj.get("diffResults") {
        item.results = deserialize_diff_results(diff)?;
    }
    if let Some(snapshot) = obj.get("snapshot") {
        item.snapshot_results = query_data_from_json(snapshot)?;
    }
    Ok(item)
}

/// [`deserialize_query_log_item`] from a JSON string
pub fn deserialize_query_log_item_json(json: &str) -> Result<LogItem> {
    let doc: Value = serde_json::from_str(json)?;
    deserialize_query_log_item(&doc)
}
