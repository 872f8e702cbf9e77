//! Statistics error types
//!
//! All of these are fail-fast invariant violations: they mean the entropy
//! ledger was asked to do something that would desynchronize it from the
//! record collection, or that it already has.

use thiserror::Error;

/// Result type for statistics operations
pub type StatsResult<T> = Result<T, StatsError>;

/// Errors raised by the entropy ledger
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatsError {
    /// Statistics cannot be built over zero records (entropy denominator
    /// would be zero)
    #[error("cannot build statistics over an empty dataset")]
    EmptyDataset,

    /// A pattern change was applied for a constraint that was never
    /// initialized
    #[error("statistics were never built for this constraint")]
    StatsNotBuilt,

    /// A snapshotted pattern is missing from its multiset; the ledger no
    /// longer matches the record collection
    #[error("entropy ledger out of sync: pattern {pattern:?} has no recorded occurrences")]
    LedgerOutOfSync {
        /// The pattern whose retraction failed
        pattern: String,
    },
}
