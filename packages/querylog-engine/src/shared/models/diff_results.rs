//! Differential result types

use super::row::QueryData;

/// Rows added and removed between two result snapshots
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiffResults {
    /// Rows in current beyond their multiplicity in previous
    pub added: QueryData,

    /// Rows in previous beyond their multiplicity in current
    pub removed: QueryData,
}

impl DiffResults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything added, nothing removed
    pub fn all_added(rows: QueryData) -> Self {
        Self {
            added: rows,
            removed: QueryData::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }

    pub fn summary(&self) -> String {
        format!("+{} -{}", self.added.len(), self.removed.len())
    }
}
