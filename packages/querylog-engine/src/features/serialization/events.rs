//! Event form: one document per changed (or snapshot) row.

use serde_json::{Map, Value};

use super::fields::{add_legacy_fields_and_decorations, serialize_row, Pass};
use crate::config::RenderOptions;
use crate::errors::{QueryLogError, Result};
use crate::shared::models::{LogItem, RowTyped};

fn serialize_events_pass(
    pass: Pass,
    item: &LogItem,
    opts: &RenderOptions,
    events: &mut Vec<Value>,
) -> Result<()> {
    let results = pass.diff_results(item);
    let actions: Vec<(&str, &[RowTyped])> = if !results.is_empty() {
        vec![
            ("removed", results.removed.as_slice()),
            ("added", results.added.as_slice()),
        ]
    } else if pass == Pass::Current && !item.snapshot_results.is_empty() {
        vec![("snapshot", item.snapshot_results.as_slice())]
    } else if pass == Pass::PreviousRemaining || item.has_previous_remaining() {
        // Nothing to explode; leftovers alone are a valid item.
        return Ok(());
    } else {
        return Err(QueryLogError::NoResults);
    };

    for (action, rows) in actions {
        for row in rows {
            let mut event = Map::new();
            // Columns are nested so they never collide with metadata names.
            event.insert("columns".to_string(), serialize_row(row, opts.numerics));
            event.insert("action".to_string(), Value::from(action));
            add_legacy_fields_and_decorations(pass, item, opts, &mut event);
            events.push(Value::Object(event));
        }
    }
    Ok(())
}

/// Explode `item` into per-row event documents.
///
/// Previous-epoch leftovers come first; within a pass `removed` rows precede
/// `added` rows.
pub fn serialize_query_log_item_as_events(
    item: &LogItem,
    opts: &RenderOptions,
) -> Result<Vec<Value>> {
    let mut events = Vec::new();
    for pass in Pass::ORDER {
        serialize_events_pass(pass, item, opts, &mut events)?;
    }
    Ok(events)
}

/// [`serialize_query_log_item_as_events`], one JSON string per event
pub fn serialize_query_log_item_as_events_json(
    item: &LogItem,
    opts: &RenderOptions,
) -> Result<Vec<String>> {
    serialize_query_log_item_as_events(item, opts)?
        .iter()
        .map(|event| serde_json::to_string(event).map_err(QueryLogError::from))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::models::DiffResults;
    use serde_json::json;

    fn base() -> LogItem {
        LogItem {
            name: "users".to_string(),
            identifier: "h".to_string(),
            epoch: 3,
            previous_epoch: 2,
            counter: 0,
            previous_remaining_counter: 8,
            ..LogItem::default()
        }
    }

    #[test]
    fn test_events_per_row() {
        let mut item = base();
        item.counter = 6;
        item.results = DiffResults {
            added: vec![
                RowTyped::new().with("uid", 501),
                RowTyped::new().with("uid", 502),
            ],
            removed: vec![RowTyped::new().with("uid", 500)],
        };

        let events =
            serialize_query_log_item_as_events(&item, &RenderOptions::new(true, false)).unwrap();
        let actions: Vec<&str> = events.iter().map(|e| e["action"].as_str().unwrap()).collect();
        assert_eq!(actions, vec!["removed", "added", "added"]);
        assert_eq!(events[0]["columns"], json!({"uid": 500}));
        assert_eq!(events[2]["columns"], json!({"uid": 502}));
        assert!(events.iter().all(|e| e["counter"] == json!(6)));
    }

    #[test]
    fn test_columns_do_not_clobber_metadata() {
        let mut item = base();
        item.results = DiffResults::all_added(vec![RowTyped::new().with("name", "root")]);

        let events = serialize_query_log_item_as_events(&item, &RenderOptions::default()).unwrap();
        assert_eq!(events[0]["name"], json!("users"));
        assert_eq!(events[0]["columns"]["name"], json!("root"));
    }

    #[test]
    fn test_snapshot_events() {
        let item = base().with_snapshot(vec![
            RowTyped::new().with("uid", 0),
            RowTyped::new().with("uid", 1),
        ]);
        let events = serialize_query_log_item_as_events(&item, &RenderOptions::default()).unwrap();
        assert_eq!(events.len(), 2);
        assert!(events.iter().all(|e| e["action"] == json!("snapshot")));
        assert_eq!(events[1]["columns"], json!({"uid": "1"}));
    }

    #[test]
    fn test_previous_remaining_events_first() {
        let mut item = base();
        item.previous_remaining = DiffResults::all_added(vec![RowTyped::new().with("uid", 9)]);
        item.results = DiffResults::all_added(vec![RowTyped::new().with("uid", 10)]);

        let events = serialize_query_log_item_as_events(&item, &RenderOptions::default()).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0]["epoch"], json!(2));
        assert_eq!(events[0]["counter"], json!(8));
        assert_eq!(events[1]["epoch"], json!(3));
        assert_eq!(events[1]["counter"], json!(0));
    }

    #[test]
    fn test_leftovers_alone_are_emitted() {
        let mut item = base();
        item.previous_remaining = DiffResults {
            added: vec![],
            removed: vec![RowTyped::new().with("uid", 9), RowTyped::new().with("uid", 10)],
        };

        let events = serialize_query_log_item_as_events(&item, &RenderOptions::default()).unwrap();
        assert_eq!(events.len(), 2);
        assert!(events.iter().all(|e| e["action"] == json!("removed")));
        assert!(events.iter().all(|e| e["epoch"] == json!(2)));
        assert!(events.iter().all(|e| e["counter"] == json!(8)));
    }

    #[test]
    fn test_empty_item_is_an_error() {
        assert!(matches!(
            serialize_query_log_item_as_events(&base(), &RenderOptions::default()),
            Err(QueryLogError::NoResults)
        ));
    }

    #[test]
    fn test_json_strings() {
        let item = base().with_snapshot(vec![RowTyped::new().with("uid", 0)]);
        let lines =
            serialize_query_log_item_as_events_json(&item, &RenderOptions::default()).unwrap();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("\"columns\":{\"uid\":\"0\"}"));
    }
}
