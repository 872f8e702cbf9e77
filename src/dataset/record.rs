//! Row records
//!
//! A record is an identified, ordered column -> value map. The id is the
//! identity key (datasets may contain duplicate content under distinct
//! ids) and never appears as a column. Column order is semantic: every
//! pattern string is rendered in a caller-supplied column order, and the
//! map itself preserves the source schema's column order.

use indexmap::IndexMap;
use serde_json::Value;

use super::errors::{DatasetError, DatasetResult};

/// Identity key for a record; always greater than 0
pub type RecordId = u64;

/// One row of a dataset
#[derive(Debug, Clone)]
pub struct Record {
    /// Identity key, assigned externally, immutable
    id: RecordId,
    /// Column -> value in source schema order
    columns: IndexMap<String, String>,
    /// Opaque error metadata from upstream error detection, passed through
    err_metadata: Option<Value>,
}

impl Record {
    /// Creates a record; fails if `id` is 0
    pub fn new(id: RecordId, columns: IndexMap<String, String>) -> DatasetResult<Self> {
        if id == 0 {
            return Err(DatasetError::InvalidRecordId);
        }
        Ok(Self {
            id,
            columns,
            err_metadata: None,
        })
    }

    /// The record's identity key
    pub fn id(&self) -> RecordId {
        self.id
    }

    /// The ordered column map
    pub fn columns(&self) -> &IndexMap<String, String> {
        &self.columns
    }

    /// Value of `col`, if the column exists
    pub fn value(&self, col: &str) -> Option<&str> {
        self.columns.get(col).map(String::as_str)
    }

    /// Overwrites the value of an existing column.
    ///
    /// A column the record does not have is left alone: callers probe
    /// columns defensively and an unknown name is not an error.
    pub fn modify_existing(&mut self, col: &str, val: &str) {
        if let Some(slot) = self.columns.get_mut(col) {
            *slot = val.to_string();
        }
    }

    /// Space-joined values of `cols`, in the given order.
    ///
    /// This is the pattern string used for frequency counting; a column
    /// the record does not have contributes an empty token.
    pub fn pattern(&self, cols: &[String]) -> String {
        let mut out = String::new();
        for (i, col) in cols.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            if let Some(val) = self.columns.get(col) {
                out.push_str(val);
            }
        }
        out
    }

    /// Opaque upstream error metadata, if any
    pub fn err_metadata(&self) -> Option<&Value> {
        self.err_metadata.as_ref()
    }

    /// Attaches opaque upstream error metadata
    pub fn set_err_metadata(&mut self, metadata: Value) {
        self.err_metadata = Some(metadata);
    }
}

// Identity requires both the id and the full column content: repairs are
// detected by comparing a record against its pre-repair self, and datasets
// may hold duplicate content under different ids.
impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.columns == other.columns
    }
}

impl Eq for Record {}
