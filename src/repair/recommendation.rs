//! Recommendation value type

use serde::{Deserialize, Serialize};

use crate::dataset::RecordId;

/// A proposed single-column value correction for one target record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Id of the target record to correct
    pub target_record_id: RecordId,
    /// Column to overwrite
    pub column: String,
    /// Replacement value
    pub value: String,
}

impl Recommendation {
    /// Creates a recommendation
    pub fn new(target_record_id: RecordId, column: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            target_record_id,
            column: column.into(),
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_roundtrip() {
        let rec = Recommendation::new(4, "B", "1");
        let json = serde_json::to_string(&rec).unwrap();
        let back: Recommendation = serde_json::from_str(&json).unwrap();
        assert_eq!(back, rec);
    }
}
