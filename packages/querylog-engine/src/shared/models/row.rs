//! Row model
//!
//! A row is an ordered column map. The engine hands us `RowTyped` values
//! (original column types); persisted state only holds text, so comparison
//! always goes through the text projection `Row`.

use std::collections::BTreeMap;
use std::fmt;

use serde_json::{Map, Number, Value};

use crate::errors::{QueryLogError, Result};

/// A single typed column value
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValue {
    Integer(i64),
    Double(f64),
    Text(String),
}

impl ColumnValue {
    /// Text form used for persistence and comparison.
    ///
    /// Doubles use the shortest decimal that parses back to the same bits.
    pub fn to_text(&self) -> String {
        match self {
            ColumnValue::Integer(i) => i.to_string(),
            ColumnValue::Double(d) => d.to_string(),
            ColumnValue::Text(s) => s.clone(),
        }
    }

    /// JSON rendering. With `numerics` off every value is a string.
    pub fn to_json(&self, numerics: bool) -> Value {
        if !numerics {
            return Value::String(self.to_text());
        }
        match self {
            ColumnValue::Integer(i) => Value::Number((*i).into()),
            // NaN/inf have no JSON number form
            ColumnValue::Double(d) => Number::from_f64(*d)
                .map(Value::Number)
                .unwrap_or_else(|| Value::String(self.to_text())),
            ColumnValue::Text(s) => Value::String(s.clone()),
        }
    }

    /// Inverse of [`to_json`](Self::to_json) for scalar JSON values.
    pub fn from_json(value: &Value) -> Result<Self> {
        match value {
            Value::String(s) => Ok(ColumnValue::Text(s.clone())),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(ColumnValue::Integer(i))
                } else if n.is_u64() {
                    Ok(ColumnValue::Text(n.to_string()))
                } else {
                    n.as_f64().map(ColumnValue::Double).ok_or_else(|| {
                        QueryLogError::malformed(format!("unrepresentable number {}", n))
                    })
                }
            }
            Value::Bool(b) => Ok(ColumnValue::Text(b.to_string())),
            Value::Null => Ok(ColumnValue::Text(String::new())),
            Value::Array(_) | Value::Object(_) => Err(QueryLogError::malformed(
                "column value must be a scalar",
            )),
        }
    }
}

impl fmt::Display for ColumnValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl From<i64> for ColumnValue {
    fn from(v: i64) -> Self {
        ColumnValue::Integer(v)
    }
}

impl From<i32> for ColumnValue {
    fn from(v: i32) -> Self {
        ColumnValue::Integer(v.into())
    }
}

impl From<f64> for ColumnValue {
    fn from(v: f64) -> Self {
        ColumnValue::Double(v)
    }
}

impl From<&str> for ColumnValue {
    fn from(v: &str) -> Self {
        ColumnValue::Text(v.to_string())
    }
}

impl From<String> for ColumnValue {
    fn from(v: String) -> Self {
        ColumnValue::Text(v)
    }
}

/// Text-valued row, as it comes back from persisted state.
///
/// Ordering is total so identical rows sort adjacent.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Row(BTreeMap<String, String>);

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.0.get(column).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.0.iter()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Row(iter
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect())
    }
}

/// Typed row produced by query execution
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowTyped(BTreeMap<String, ColumnValue>);

impl RowTyped {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, column: impl Into<String>, value: impl Into<ColumnValue>) -> Self {
        self.insert(column, value);
        self
    }

    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<ColumnValue>) {
        self.0.insert(column.into(), value.into());
    }

    pub fn get(&self, column: &str) -> Option<&ColumnValue> {
        self.0.get(column)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ColumnValue)> {
        self.0.iter()
    }

    /// Typed-to-text coercion
    pub fn to_row(&self) -> Row {
        self.0.iter().map(|(k, v)| (k.clone(), v.to_text())).collect()
    }

    pub fn to_json(&self, numerics: bool) -> Value {
        let obj: Map<String, Value> = self
            .0
            .iter()
            .map(|(k, v)| (k.clone(), v.to_json(numerics)))
            .collect();
        Value::Object(obj)
    }

    pub fn from_json(value: &Value) -> Result<Self> {
        let obj = value
            .as_object()
            .ok_or_else(|| QueryLogError::malformed("row must be a JSON object"))?;
        let mut row = RowTyped::new();
        for (column, v) in obj {
            let value = ColumnValue::from_json(v).map_err(|e| match e {
                QueryLogError::MalformedResults(msg) => {
                    QueryLogError::malformed(format!("column '{}': {}", column, msg))
                }
                other => other,
            })?;
            row.insert(column.clone(), value);
        }
        Ok(row)
    }
}

impl<K: Into<String>, V: Into<ColumnValue>> FromIterator<(K, V)> for RowTyped {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        RowTyped(iter
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect())
    }
}

/// Ordered query results, in engine return order
pub type QueryData = Vec<RowTyped>;

/// Render rows as a JSON array.
pub fn query_data_to_json(rows: &[RowTyped], numerics: bool) -> Value {
    Value::Array(rows.iter().map(|r| r.to_json(numerics)).collect())
}

/// Parse rows from a JSON array.
pub fn query_data_from_json(value: &Value) -> Result<QueryData> {
    let rows = value
        .as_array()
        .ok_or_else(|| QueryLogError::malformed("results must be a JSON array"))?;
    rows.iter().map(RowTyped::from_json).collect()
}

/// Persisted encoding: numeric columns keep their JSON number form.
pub fn serialize_query_data_json(rows: &[RowTyped]) -> Result<String> {
    Ok(serde_json::to_string(&query_data_to_json(rows, true))?)
}

pub fn deserialize_query_data_json(json: &str) -> Result<QueryData> {
    let value: Value = serde_json::from_str(json)?;
    query_data_from_json(&value)
}
