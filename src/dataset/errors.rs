//! Dataset error types

use thiserror::Error;

use crate::stats::StatsError;

/// Result type for dataset operations
pub type DatasetResult<T> = Result<T, DatasetError>;

/// Errors raised by dataset construction and repair application
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DatasetError {
    /// Record ids are 1-based identity keys; 0 is reserved/invalid
    #[error("record id must be greater than 0")]
    InvalidRecordId,

    /// The entropy ledger rejected an operation
    #[error(transparent)]
    Stats(#[from] StatsError),
}
