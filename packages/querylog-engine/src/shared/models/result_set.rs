//! Duplicate-aware previous-results collection

use super::row::{deserialize_query_data_json, QueryData, Row, RowTyped};
use crate::errors::Result;

/// Previous results read back from storage.
///
/// Rows are kept sorted by their text projection, so identical rows sit
/// next to each other and multiplicity is a range length.
#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    entries: Vec<(Row, RowTyped)>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rows(rows: impl IntoIterator<Item = RowTyped>) -> Self {
        let mut entries: Vec<(Row, RowTyped)> =
            rows.into_iter().map(|r| (r.to_row(), r)).collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        Self { entries }
    }

    /// Parse the persisted JSON array.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(Self::from_rows(deserialize_query_data_json(json)?))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rows in sorted order
    pub fn iter(&self) -> impl Iterator<Item = &RowTyped> {
        self.entries.iter().map(|(_, r)| r)
    }

    /// Multiplicity of `row`
    pub fn count(&self, row: &Row) -> usize {
        let start = self.entries.partition_point(|(k, _)| k < row);
        let end = self.entries.partition_point(|(k, _)| k <= row);
        end - start
    }

    pub(crate) fn entries(&self) -> &[(Row, RowTyped)] {
        &self.entries
    }

    pub fn into_rows(self) -> QueryData {
        self.entries.into_iter().map(|(_, r)| r).collect()
    }
}

impl FromIterator<RowTyped> for ResultSet {
    fn from_iter<I: IntoIterator<Item = RowTyped>>(iter: I) -> Self {
        Self::from_rows(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(a: i64) -> RowTyped {
        RowTyped::new().with("a", a)
    }

    #[test]
    fn test_sorted_with_multiplicity() {
        let set: ResultSet = vec![row(2), row(1), row(2), row(3), row(2)]
            .into_iter()
            .collect();

        assert_eq!(set.len(), 5);
        assert_eq!(set.count(&row(2).to_row()), 3);
        assert_eq!(set.count(&row(1).to_row()), 1);
        assert_eq!(set.count(&row(9).to_row()), 0);

        let order: Vec<&RowTyped> = set.iter().collect();
        assert_eq!(order[0], &row(1));
        assert_eq!(order[4], &row(3));
    }

    #[test]
    fn test_from_json() {
        let set = ResultSet::from_json(r#"[{"a":"1"},{"a":1},{"a":"2"}]"#).unwrap();
        // "1" and 1 share a text projection
        assert_eq!(set.count(&row(1).to_row()), 2);
        assert!(ResultSet::from_json("[]").unwrap().is_empty());
        assert!(ResultSet::from_json("not json").is_err());
    }
}
