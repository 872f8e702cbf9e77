//! Repair diff records
//!
//! One diff record per repair event per record: it snapshots the values
//! the changed columns held immediately before the event, which is exactly
//! what rollback needs to restore.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;

use super::record::RecordId;

/// Pre-change snapshot of the columns touched by one repair event.
///
/// Immutable after creation. `timestamp` is the event's position in the
/// record's repair history (0 = first repair), not a wall-clock time;
/// `recorded_at` carries the wall-clock time for audit output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiffRecord {
    record_id: RecordId,
    /// Changed column -> value held before the repair (the restore value)
    changed_columns: IndexMap<String, String>,
    /// Sequence number within this record's history, starting at 0
    timestamp: usize,
    recorded_at: DateTime<Utc>,
}

impl DiffRecord {
    /// Creates a diff for one repair event
    pub fn new(
        record_id: RecordId,
        changed_columns: IndexMap<String, String>,
        timestamp: usize,
    ) -> Self {
        Self {
            record_id,
            changed_columns,
            timestamp,
            recorded_at: Utc::now(),
        }
    }

    /// The repaired record's id
    pub fn record_id(&self) -> RecordId {
        self.record_id
    }

    /// Changed columns mapped to their pre-repair values
    pub fn changed_columns(&self) -> &IndexMap<String, String> {
        &self.changed_columns
    }

    /// Position of this event in the record's repair history
    pub fn timestamp(&self) -> usize {
        self.timestamp
    }

    /// Wall-clock time the diff was recorded
    pub fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }
}
