//! Per-constraint pattern and entropy statistics
//!
//! The ledger tracks, for every functional-dependency constraint, the
//! multiset of antecedent patterns, the multiset of full
//! (antecedent+consequent) patterns, a per-record snapshot of both
//! patterns, and the Shannon entropy of each multiset. Entropy is
//! maintained incrementally as records mutate and must always equal what a
//! from-scratch scan of the multisets would compute.

mod errors;
mod ledger;
mod multiset;

pub use errors::{StatsError, StatsResult};
pub use ledger::{DatasetStats, PatternPair};
pub use multiset::PatternMultiset;
