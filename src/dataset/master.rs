//! Master dataset: revealed-value provenance index
//!
//! Tracks which master records have disclosed a trusted value for which
//! column. This is a plain multimap with no repair or entropy semantics.

use std::collections::HashMap;

use super::record::{Record, RecordId};

/// A trusted master dataset with a column -> revealing-record-ids index
#[derive(Debug, Clone, Default)]
pub struct MasterDataset {
    records: Vec<Record>,
    /// Id of the target dataset this master corresponds to
    target_id: u64,
    /// Column name -> ids of records that revealed a value for it,
    /// in reveal order; duplicates permitted
    revealed: HashMap<String, Vec<RecordId>>,
}

impl MasterDataset {
    /// Creates a master dataset over `records`
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            records,
            target_id: 0,
            revealed: HashMap::new(),
        }
    }

    /// The master records
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Id of the corresponding target dataset
    pub fn target_id(&self) -> u64 {
        self.target_id
    }

    /// Links this master to a target dataset
    pub fn set_target_id(&mut self, target_id: u64) {
        self.target_id = target_id;
    }

    /// Records that `record_id` revealed a value for `col`.
    ///
    /// The same record may reveal the same column more than once.
    pub fn reveal(&mut self, col: &str, record_id: RecordId) {
        self.revealed.entry(col.to_string()).or_default().push(record_id);
    }

    /// Ids of all records that revealed a value for `col`, in reveal order
    pub fn revealed_by(&self, col: &str) -> &[RecordId] {
        self.revealed.get(col).map(Vec::as_slice).unwrap_or(&[])
    }
}
