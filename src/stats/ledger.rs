//! The entropy ledger
//!
//! For each constraint, tracks the antecedent-pattern and full-pattern
//! multisets over the whole record collection, a per-record snapshot of the
//! last observed pattern pair, and the base-2 Shannon entropy of each
//! multiset:
//!
//! ```text
//! H = sum over distinct patterns p of (count(p)/N) * log2(N/count(p))
//! ```
//!
//! where N is the record count, fixed for the lifetime of the ledger
//! (record insert/delete is not supported). Entropy is adjusted
//! incrementally on every pattern change using the exact count transitions
//! `old -> old-1` (retract) and `old -> old+1` (add), so the stored values
//! always equal what a from-scratch scan would compute.

use std::collections::HashMap;

use crate::dataset::{Constraint, Record, RecordId};

use super::errors::{StatsError, StatsResult};
use super::multiset::PatternMultiset;

/// The antecedent and full pattern strings last observed for one record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternPair {
    /// Space-joined antecedent-column values
    pub antecedent: String,
    /// Space-joined antecedent+consequent-column values
    pub full: String,
}

/// Per-constraint pattern multisets, snapshots, and entropies
#[derive(Debug, Clone, Default)]
struct ConstraintStats {
    antecedent_counts: PatternMultiset,
    full_counts: PatternMultiset,
    snapshots: HashMap<RecordId, PatternPair>,
    antecedent_entropy: f64,
    full_entropy: f64,
}

/// Entropy and pattern statistics for one dataset, keyed by constraint
#[derive(Debug, Clone, Default)]
pub struct DatasetStats {
    /// Total record count N; the entropy denominator
    denominator: u64,
    per_constraint: HashMap<Constraint, ConstraintStats>,
}

impl DatasetStats {
    /// Creates an empty ledger for a dataset of `record_count` records
    pub fn new(record_count: usize) -> Self {
        Self {
            denominator: record_count as u64,
            per_constraint: HashMap::new(),
        }
    }

    /// The entropy denominator N
    pub fn denominator(&self) -> u64 {
        self.denominator
    }

    /// Whether statistics have been built for `constraint`
    pub fn contains(&self, constraint: &Constraint) -> bool {
        self.per_constraint.contains_key(constraint)
    }

    /// Builds all structures for `constraint` from a full scan of `records`.
    ///
    /// Safe no-op if the constraint is already present; callers must
    /// `reset` to force a rebuild. Fails on an empty record collection
    /// (the entropy denominator would be zero).
    pub fn initialize(&mut self, constraint: &Constraint, records: &[Record]) -> StatsResult<()> {
        if self.per_constraint.contains_key(constraint) {
            return Ok(());
        }
        if self.denominator == 0 || records.is_empty() {
            return Err(StatsError::EmptyDataset);
        }

        let ant_cols = constraint.antecedent_cols();
        let full_cols = constraint.full_cols();

        let mut cs = ConstraintStats::default();
        for record in records {
            let ant = record.pattern(ant_cols);
            let full = record.pattern(&full_cols);
            cs.antecedent_counts.add(ant.clone());
            cs.full_counts.add(full.clone());
            cs.snapshots.insert(
                record.id(),
                PatternPair {
                    antecedent: ant,
                    full,
                },
            );
        }

        let denom = self.denominator as f64;
        cs.antecedent_entropy = scan_entropy(&cs.antecedent_counts, denom);
        cs.full_entropy = scan_entropy(&cs.full_counts, denom);

        self.per_constraint.insert(constraint.clone(), cs);
        Ok(())
    }

    /// Replaces one record's contribution to the `constraint` statistics.
    ///
    /// Retracts the previously snapshotted pattern pair (no-op if the
    /// record has no snapshot yet), adds the new pair, adjusts both
    /// entropies by the exact count transitions, and stores the new
    /// snapshot. A snapshotted pattern with no recorded occurrences means
    /// the ledger has desynchronized from the records and is a hard error.
    pub fn apply_pattern_change(
        &mut self,
        constraint: &Constraint,
        record_id: RecordId,
        new_antecedent: String,
        new_full: String,
    ) -> StatsResult<()> {
        let denom = self.denominator as f64;
        let cs = self
            .per_constraint
            .get_mut(constraint)
            .ok_or(StatsError::StatsNotBuilt)?;

        if let Some(prev) = cs.snapshots.get(&record_id).cloned() {
            let old_ant = cs.antecedent_counts.count(&prev.antecedent);
            if old_ant == 0 {
                return Err(StatsError::LedgerOutOfSync {
                    pattern: prev.antecedent,
                });
            }
            let old_full = cs.full_counts.count(&prev.full);
            if old_full == 0 {
                return Err(StatsError::LedgerOutOfSync { pattern: prev.full });
            }

            cs.antecedent_entropy -= weighted_self_info(old_ant, denom);
            cs.full_entropy -= weighted_self_info(old_full, denom);
            cs.antecedent_counts.remove(&prev.antecedent);
            cs.full_counts.remove(&prev.full);
            if old_ant > 1 {
                cs.antecedent_entropy += weighted_self_info(old_ant - 1, denom);
            }
            if old_full > 1 {
                cs.full_entropy += weighted_self_info(old_full - 1, denom);
            }
        }

        let before_ant = cs.antecedent_counts.count(&new_antecedent);
        if before_ant > 0 {
            cs.antecedent_entropy -= weighted_self_info(before_ant, denom);
        }
        let after_ant = cs.antecedent_counts.add(new_antecedent.clone());
        cs.antecedent_entropy += weighted_self_info(after_ant, denom);

        let before_full = cs.full_counts.count(&new_full);
        if before_full > 0 {
            cs.full_entropy -= weighted_self_info(before_full, denom);
        }
        let after_full = cs.full_counts.add(new_full.clone());
        cs.full_entropy += weighted_self_info(after_full, denom);

        cs.snapshots.insert(
            record_id,
            PatternPair {
                antecedent: new_antecedent,
                full: new_full,
            },
        );
        Ok(())
    }

    /// Current antecedent entropy for `constraint`, if built
    pub fn antecedent_entropy(&self, constraint: &Constraint) -> Option<f64> {
        self.per_constraint
            .get(constraint)
            .map(|cs| cs.antecedent_entropy)
    }

    /// Current full (antecedent+consequent) entropy for `constraint`, if built
    pub fn full_entropy(&self, constraint: &Constraint) -> Option<f64> {
        self.per_constraint.get(constraint).map(|cs| cs.full_entropy)
    }

    /// The antecedent pattern multiset for `constraint`, if built
    pub fn antecedent_counts(&self, constraint: &Constraint) -> Option<&PatternMultiset> {
        self.per_constraint
            .get(constraint)
            .map(|cs| &cs.antecedent_counts)
    }

    /// The full pattern multiset for `constraint`, if built
    pub fn full_counts(&self, constraint: &Constraint) -> Option<&PatternMultiset> {
        self.per_constraint.get(constraint).map(|cs| &cs.full_counts)
    }

    /// The pattern pair last observed for `record_id` under `constraint`
    pub fn snapshot(&self, constraint: &Constraint, record_id: RecordId) -> Option<&PatternPair> {
        self.per_constraint
            .get(constraint)
            .and_then(|cs| cs.snapshots.get(&record_id))
    }

    /// Discards all per-constraint statistics; the next `initialize` for
    /// each constraint rebuilds from scratch
    pub fn reset(&mut self) {
        self.per_constraint.clear();
    }
}

/// One pattern's entropy contribution: `(count/N) * log2(N/count)`
fn weighted_self_info(count: u64, denom: f64) -> f64 {
    let num = count as f64;
    (num / denom) * (denom / num).log2()
}

/// Full-scan entropy of a multiset.
///
/// The contribution depends only on the occurrence count, not the pattern
/// identity, so it is memoized per count value; the memo lives only for
/// this scan.
fn scan_entropy(counts: &PatternMultiset, denom: f64) -> f64 {
    let mut by_count: HashMap<u64, f64> = HashMap::new();
    let mut entropy = 0.0;
    for (_, count) in counts.iter() {
        let wsi = *by_count
            .entry(count)
            .or_insert_with(|| weighted_self_info(count, denom));
        entropy += wsi;
    }
    entropy
}
