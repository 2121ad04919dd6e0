//! Shared pieces of both wire forms: metadata fields, decorations, rows.

use serde_json::{Map, Value};
use tracing::warn;

use crate::config::RenderOptions;
use crate::shared::models::{query_data_to_json, DiffResults, LogItem, RowTyped};

/// Which counter track a document is rendered from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Pass {
    /// Leftover changes of the previous epoch
    PreviousRemaining,
    /// Current epoch results
    Current,
}

impl Pass {
    /// Render order: a consumer never sees the epoch go backwards.
    pub(crate) const ORDER: [Pass; 2] = [Pass::PreviousRemaining, Pass::Current];

    pub(crate) fn diff_results(self, item: &LogItem) -> &DiffResults {
        match self {
            Pass::PreviousRemaining => &item.previous_remaining,
            Pass::Current => &item.results,
        }
    }
}

/// Render one row, numeric columns as numbers when `numerics` is set
pub fn serialize_row(row: &RowTyped, numerics: bool) -> Value {
    row.to_json(numerics)
}

/// `{"removed": [...], "added": [...]}`
pub fn serialize_diff_results(results: &DiffResults, numerics: bool) -> Value {
    let mut obj = Map::new();
    obj.insert(
        "removed".to_string(),
        query_data_to_json(&results.removed, numerics),
    );
    obj.insert(
        "added".to_string(),
        query_data_to_json(&results.added, numerics),
    );
    Value::Object(obj)
}

pub(crate) fn add_legacy_fields_and_decorations(
    pass: Pass,
    item: &LogItem,
    opts: &RenderOptions,
    obj: &mut Map<String, Value>,
) {
    obj.insert("name".to_string(), Value::from(item.name.as_str()));
    obj.insert(
        "hostIdentifier".to_string(),
        Value::from(item.identifier.as_str()),
    );
    obj.insert(
        "calendarTime".to_string(),
        Value::from(item.calendar_time.as_str()),
    );
    obj.insert("unixTime".to_string(), Value::from(item.time));

    let (epoch, counter) = match pass {
        Pass::PreviousRemaining => (item.previous_epoch, item.previous_remaining_counter),
        Pass::Current => (item.epoch, item.counter),
    };
    obj.insert("epoch".to_string(), Value::from(epoch));
    obj.insert("previous_epoch".to_string(), Value::from(item.previous_epoch));
    obj.insert("counter".to_string(), Value::from(counter));

    obj.insert("numerics".to_string(), Value::Bool(opts.numerics));

    if item.decorations.is_empty() {
        return;
    }
    if opts.decorations_top_level {
        for (key, value) in &item.decorations {
            // Fields already on the document (metadata, results) win.
            if obj.contains_key(key) {
                warn!(
                    "query {}: decoration '{}' collides with a log field, dropped",
                    item.name, key
                );
                continue;
            }
            obj.insert(key.clone(), Value::from(value.as_str()));
        }
    } else {
        let decorations: Map<String, Value> = item
            .decorations
            .iter()
            .map(|(k, v)| (k.clone(), Value::from(v.as_str())))
            .collect();
        obj.insert("decorations".to_string(), Value::Object(decorations));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item() -> LogItem {
        LogItem {
            name: "pack_ports".to_string(),
            identifier: "host-7".to_string(),
            time: 100,
            calendar_time: "Thu Jan  1 00:01:40 1970 UTC".to_string(),
            epoch: 5,
            previous_epoch: 4,
            counter: 0,
            previous_remaining_counter: 9,
            ..LogItem::default()
        }
        .with_decoration("env", "prod")
    }

    #[test]
    fn test_current_pass_fields() {
        let mut obj = Map::new();
        add_legacy_fields_and_decorations(Pass::Current, &item(), &RenderOptions::default(), &mut obj);

        assert_eq!(
            Value::Object(obj),
            json!({
                "name": "pack_ports",
                "hostIdentifier": "host-7",
                "calendarTime": "Thu Jan  1 00:01:40 1970 UTC",
                "unixTime": 100,
                "epoch": 5,
                "previous_epoch": 4,
                "counter": 0,
                "numerics": false,
                "decorations": {"env": "prod"}
            })
        );
    }

    #[test]
    fn test_previous_pass_fields_top_level_decorations() {
        let mut obj = Map::new();
        let opts = RenderOptions::new(true, true);
        add_legacy_fields_and_decorations(Pass::PreviousRemaining, &item(), &opts, &mut obj);

        assert_eq!(obj["epoch"], json!(4));
        assert_eq!(obj["previous_epoch"], json!(4));
        assert_eq!(obj["counter"], json!(9));
        assert_eq!(obj["numerics"], json!(true));
        assert_eq!(obj["env"], json!("prod"));
        assert!(!obj.contains_key("decorations"));
    }

    #[test]
    fn test_top_level_decorations_keep_metadata() {
        let decorated = item()
            .with_decoration("counter", "999")
            .with_decoration("name", "spoofed")
            .with_decoration("epoch", "0");
        let mut obj = Map::new();
        obj.insert("action".to_string(), json!("snapshot"));
        let opts = RenderOptions::new(false, true);
        add_legacy_fields_and_decorations(Pass::Current, &decorated, &opts, &mut obj);

        assert_eq!(obj["counter"], json!(0));
        assert_eq!(obj["name"], json!("pack_ports"));
        assert_eq!(obj["epoch"], json!(5));
        assert_eq!(obj["action"], json!("snapshot"));
        assert_eq!(obj["env"], json!("prod"));
    }

    #[test]
    fn test_nested_decorations_keep_every_key() {
        let decorated = item().with_decoration("counter", "999");
        let mut obj = Map::new();
        add_legacy_fields_and_decorations(Pass::Current, &decorated, &RenderOptions::default(), &mut obj);

        assert_eq!(obj["counter"], json!(0));
        assert_eq!(obj["decorations"]["counter"], json!("999"));
    }

    #[test]
    fn test_no_decorations_key_when_empty() {
        let mut obj = Map::new();
        let bare = LogItem::default();
        add_legacy_fields_and_decorations(Pass::Current, &bare, &RenderOptions::default(), &mut obj);
        assert!(!obj.contains_key("decorations"));
    }

    #[test]
    fn test_diff_results_shape() {
        let results = DiffResults {
            added: vec![RowTyped::new().with("port", 80)],
            removed: vec![],
        };
        assert_eq!(
            serialize_diff_results(&results, true),
            json!({"added": [{"port": 80}], "removed": []})
        );
        assert_eq!(
            serialize_diff_results(&results, false),
            json!({"added": [{"port": "80"}], "removed": []})
        );
    }
}
