//! Output envelope for one scheduled-query execution

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use super::diff_results::DiffResults;
use super::row::QueryData;

/// `asctime`-style calendar time with an explicit zone
const CALENDAR_TIME_FORMAT: &str = "%a %b %e %H:%M:%S %Y UTC";

/// Results of one execution plus the metadata a log consumer needs.
///
/// Built fresh per execution. The commit engine fills the epoch, counter and
/// result fields; the serialization layer consumes it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogItem {
    /// Differential results for the current epoch
    pub results: DiffResults,

    /// Changes from the previous epoch not reported yet (set on a new epoch)
    pub previous_remaining: DiffResults,

    /// Snapshot rows, no differential applied
    pub snapshot_results: QueryData,

    /// Scheduled query name
    pub name: String,

    /// Host identifier (hostname or uuid)
    pub identifier: String,

    /// Execution time, UNIX seconds
    pub time: u64,

    /// Execution time, ASCII calendar form
    pub calendar_time: String,

    /// Epoch the results are placed in
    pub epoch: u64,

    /// Epoch of the previously stored results (0 when unknown)
    pub previous_epoch: u64,

    /// Execution counter for the current epoch
    pub counter: u64,

    /// Counter for `previous_remaining`, when non-empty
    pub previous_remaining_counter: u64,

    /// Extra fields emitted with every log line
    pub decorations: BTreeMap<String, String>,
}

impl LogItem {
    /// New item stamped with the current time
    pub fn new(name: impl Into<String>, identifier: impl Into<String>, epoch: u64) -> Self {
        Self::at(name, identifier, epoch, Utc::now())
    }

    /// New item stamped with an explicit time
    pub fn at(
        name: impl Into<String>,
        identifier: impl Into<String>,
        epoch: u64,
        when: DateTime<Utc>,
    ) -> Self {
        Self {
            name: name.into(),
            identifier: identifier.into(),
            epoch,
            time: u64::try_from(when.timestamp()).unwrap_or(0),
            calendar_time: when.format(CALENDAR_TIME_FORMAT).to_string(),
            ..Self::default()
        }
    }

    pub fn with_decoration(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.decorations.insert(key.into(), value.into());
        self
    }

    /// Snapshot-form item: rows are reported without a differential
    pub fn with_snapshot(mut self, rows: QueryData) -> Self {
        self.snapshot_results = rows;
        self
    }

    /// True when this item reports a full snapshot instead of a differential
    pub fn is_snapshot(&self) -> bool {
        self.results.is_empty() && !self.snapshot_results.is_empty()
    }

    pub fn has_previous_remaining(&self) -> bool {
        !self.previous_remaining.is_empty()
    }
}
