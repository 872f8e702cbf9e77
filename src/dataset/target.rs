//! Target dataset: records, repair history, and the entropy ledger
//!
//! All repair application flows through `apply_recommendation_set`, which
//! keeps the per-constraint entropy statistics exactly in sync with the
//! mutating records. The multi-constraint protocol is deliberate: a
//! record's physical value change stays provisional while earlier
//! constraints take their statistics delta, and is committed only once the
//! final constraint has been processed, so every constraint observes the
//! same before-state and exactly one pattern transition.

use std::collections::{BTreeMap, HashMap};

use indexmap::IndexMap;

use crate::config::EngineConfig;
use crate::observability::Logger;
use crate::repair::Recommendation;
use crate::stats::DatasetStats;

use super::constraint::Constraint;
use super::diff::DiffRecord;
use super::errors::DatasetResult;
use super::record::{Record, RecordId};

/// The dataset under repair
#[derive(Debug, Clone)]
pub struct TargetDataset {
    records: Vec<Record>,
    /// Record id -> position in `records`
    id_index: HashMap<RecordId, usize>,
    constraints: Vec<Constraint>,
    /// Record id -> diffs of every repair event applied to it, oldest first
    repair_history: HashMap<RecordId, Vec<DiffRecord>>,
    stats: DatasetStats,
    config: EngineConfig,
}

impl TargetDataset {
    /// Creates a target dataset with default configuration
    pub fn new(records: Vec<Record>) -> Self {
        Self::with_config(records, EngineConfig::default())
    }

    /// Creates a target dataset with an explicit configuration
    pub fn with_config(records: Vec<Record>, config: EngineConfig) -> Self {
        let id_index = records
            .iter()
            .enumerate()
            .map(|(pos, r)| (r.id(), pos))
            .collect();
        let stats = DatasetStats::new(records.len());
        Self {
            records,
            id_index,
            constraints: Vec::new(),
            repair_history: HashMap::new(),
            stats,
            config,
        }
    }

    /// The record collection, in load order
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Looks up a record by id
    pub fn record(&self, id: RecordId) -> Option<&Record> {
        self.id_index.get(&id).map(|&pos| &self.records[pos])
    }

    /// The active constraint list
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Replaces the constraint list and builds statistics for each
    /// constraint, in list order.
    ///
    /// Constraints already present in the ledger are left untouched.
    pub fn set_constraints(&mut self, constraints: Vec<Constraint>) -> DatasetResult<()> {
        self.constraints = constraints;
        let constraints = self.constraints.clone();
        for constraint in &constraints {
            self.build_stats(constraint)?;
        }
        Ok(())
    }

    /// Builds pattern and entropy statistics for one constraint.
    ///
    /// Safe no-op if already built; fails fast on an empty dataset.
    pub fn build_stats(&mut self, constraint: &Constraint) -> DatasetResult<()> {
        if self.stats.contains(constraint) {
            return Ok(());
        }
        self.stats.initialize(constraint, &self.records)?;

        let n = self.records.len().to_string();
        Logger::info("STATS_BUILT", &[("records", n.as_str())]);
        Ok(())
    }

    /// Discards all statistics and rebuilds them for the current
    /// constraint list.
    ///
    /// Rollback leaves statistics stale on purpose; this is the explicit
    /// refresh for callers that need them current again.
    pub fn rebuild_stats(&mut self) -> DatasetResult<()> {
        self.stats.reset();
        let constraints = self.constraints.clone();
        for constraint in &constraints {
            self.build_stats(constraint)?;
        }
        Ok(())
    }

    /// Applies a batch of column-value corrections.
    ///
    /// `None` entries are skipped, as are recommendations naming an
    /// unknown record id or a column the record does not have. A record
    /// may receive several column corrections in one batch; they count as
    /// one repair event in its history.
    ///
    /// For every constraint in list order the changed records' old
    /// pattern contributions are retracted from the ledger and the new
    /// ones added, using the captured pre-mutation values to restore the
    /// record between constraints (commit discipline: the value change
    /// becomes physical only after the last constraint's delta). On
    /// return, every constraint's entropy equals what a from-scratch
    /// rebuild over the mutated records would produce.
    pub fn apply_recommendation_set(
        &mut self,
        recommendations: &[Option<Recommendation>],
    ) -> DatasetResult<()> {
        let mut grouped: BTreeMap<RecordId, Vec<Recommendation>> = BTreeMap::new();
        for rec in recommendations.iter().flatten() {
            grouped.entry(rec.target_record_id).or_default().push(rec.clone());
        }

        // Record mutation happens inside the constraint loop; with no
        // constraints (or no recommendations) there is nothing to apply.
        if grouped.is_empty() || self.constraints.is_empty() {
            return Ok(());
        }

        let constraints = self.constraints.clone();
        let last = constraints.len() - 1;
        let mut committed: BTreeMap<RecordId, IndexMap<String, String>> = BTreeMap::new();

        for (ci, constraint) in constraints.iter().enumerate() {
            let full_cols = constraint.full_cols();

            for (&rid, recs) in &grouped {
                let Some(&pos) = self.id_index.get(&rid) else {
                    continue;
                };

                // Capture pre-mutation values, then overwrite. If a batch
                // names the same column twice, the first capture (the true
                // before-value) wins.
                let mut prev: IndexMap<String, String> = IndexMap::new();
                let record = &mut self.records[pos];
                for rec in recs {
                    if let Some(old) = record.value(&rec.column) {
                        prev.entry(rec.column.clone()).or_insert_with(|| old.to_string());
                    }
                    record.modify_existing(&rec.column, &rec.value);
                }

                let new_ant = record.pattern(constraint.antecedent_cols());
                let new_full = record.pattern(&full_cols);
                self.stats
                    .apply_pattern_change(constraint, rid, new_ant, new_full)?;

                if ci < last {
                    // Provisional: later constraints must observe the
                    // original before-state for their own delta.
                    let record = &mut self.records[pos];
                    for (col, old) in &prev {
                        record.modify_existing(col, old);
                    }
                } else {
                    committed.insert(rid, prev);
                }
            }
        }

        // One diff per repaired record per batch, timestamped by its
        // position in that record's history.
        let repaired = committed.len().to_string();
        for (rid, prev) in committed {
            let history = self.repair_history.entry(rid).or_default();
            let diff = DiffRecord::new(rid, prev, history.len());
            history.push(diff);
        }

        let n_constraints = constraints.len().to_string();
        Logger::info(
            "REPAIR_SET_APPLIED",
            &[
                ("constraints", n_constraints.as_str()),
                ("records", repaired.as_str()),
            ],
        );
        Ok(())
    }

    /// Reverts every repaired record to its pre-first-repair values and
    /// clears the repair history.
    ///
    /// Only the oldest diff per record is replayed: rollback always
    /// returns to the original state, not the previous one. Statistics
    /// are NOT refreshed here and are stale afterwards; call
    /// `rebuild_stats` to bring them current. In memory-saver mode this
    /// is a no-op (history kept, nothing restored).
    pub fn rollback_all_repairs(&mut self) {
        if self.config.memory_saver {
            return;
        }

        let mut restored = 0usize;
        for (rid, history) in &self.repair_history {
            let Some(oldest) = history.first() else {
                continue;
            };
            let Some(&pos) = self.id_index.get(rid) else {
                continue;
            };
            let record = &mut self.records[pos];
            for (col, val) in oldest.changed_columns() {
                record.modify_existing(col, val);
            }
            restored += 1;
        }
        self.repair_history.clear();

        let restored = restored.to_string();
        Logger::info("REPAIRS_ROLLED_BACK", &[("records", restored.as_str())]);
    }

    /// The full repair history, keyed by record id
    pub fn repair_history(&self) -> &HashMap<RecordId, Vec<DiffRecord>> {
        &self.repair_history
    }

    /// Repair diffs for one record, oldest first
    pub fn history_for(&self, id: RecordId) -> &[DiffRecord] {
        self.repair_history.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Installs a repair history wholesale; the dataset takes ownership
    pub fn set_repair_history(&mut self, history: HashMap<RecordId, Vec<DiffRecord>>) {
        self.repair_history = history;
    }

    /// The entropy ledger
    pub fn stats(&self) -> &DatasetStats {
        &self.stats
    }

    /// Installs a statistics ledger wholesale; the dataset takes ownership
    pub fn set_stats(&mut self, stats: DatasetStats) {
        self.stats = stats;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    const TOL: f64 = 1e-9;

    fn record(id: RecordId, cols: &[(&str, &str)]) -> Record {
        let mut columns = IndexMap::new();
        for (col, val) in cols {
            columns.insert(col.to_string(), val.to_string());
        }
        Record::new(id, columns).unwrap()
    }

    fn fd(ants: &[&str], cons: &[&str]) -> Constraint {
        Constraint::new(
            ants.iter().map(|s| s.to_string()).collect(),
            cons.iter().map(|s| s.to_string()).collect(),
        )
    }

    fn dataset() -> TargetDataset {
        let mut ds = TargetDataset::new(vec![
            record(1, &[("A", "x"), ("B", "1")]),
            record(2, &[("A", "x"), ("B", "1")]),
            record(3, &[("A", "y"), ("B", "1")]),
            record(4, &[("A", "y"), ("B", "2")]),
        ]);
        ds.set_constraints(vec![fd(&["A"], &["B"])]).unwrap();
        ds
    }

    #[test]
    fn test_apply_mutates_record_and_stats() {
        let mut ds = dataset();
        let constraint = fd(&["A"], &["B"]);

        ds.apply_recommendation_set(&[Some(Recommendation::new(4, "B", "1"))])
            .unwrap();

        assert_eq!(ds.record(4).unwrap().value("B"), Some("1"));
        assert!((ds.stats().full_entropy(&constraint).unwrap() - 1.0).abs() < TOL);
        assert!((ds.stats().antecedent_entropy(&constraint).unwrap() - 1.0).abs() < TOL);
    }

    #[test]
    fn test_history_timestamps_increase() {
        let mut ds = dataset();
        ds.apply_recommendation_set(&[Some(Recommendation::new(4, "B", "1"))])
            .unwrap();
        ds.apply_recommendation_set(&[Some(Recommendation::new(4, "B", "3"))])
            .unwrap();

        let history = ds.history_for(4);
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].timestamp(), 0);
        assert_eq!(history[1].timestamp(), 1);
        // Oldest diff holds the original value.
        assert_eq!(
            history[0].changed_columns().get("B").map(String::as_str),
            Some("2")
        );
    }

    #[test]
    fn test_none_and_unknown_ids_skipped() {
        let mut ds = dataset();
        ds.apply_recommendation_set(&[
            None,
            Some(Recommendation::new(99, "B", "1")), // unknown id
            Some(Recommendation::new(4, "B", "1")),
        ])
        .unwrap();

        assert_eq!(ds.record(4).unwrap().value("B"), Some("1"));
        assert!(ds.history_for(99).is_empty());
    }

    #[test]
    fn test_empty_constraint_list_is_noop() {
        let mut ds = TargetDataset::new(vec![record(1, &[("A", "x")])]);
        ds.apply_recommendation_set(&[Some(Recommendation::new(1, "A", "z"))])
            .unwrap();

        assert_eq!(ds.record(1).unwrap().value("A"), Some("x"));
        assert!(ds.history_for(1).is_empty());
    }

    #[test]
    fn test_build_stats_requires_records() {
        let mut ds = TargetDataset::new(Vec::new());
        assert!(ds.set_constraints(vec![fd(&["A"], &["B"])]).is_err());
    }

    #[test]
    fn test_rebuild_stats_refreshes_after_rollback() {
        let mut ds = dataset();
        let constraint = fd(&["A"], &["B"]);

        ds.apply_recommendation_set(&[Some(Recommendation::new(4, "B", "1"))])
            .unwrap();
        ds.rollback_all_repairs();

        // Stale until explicitly rebuilt.
        assert!((ds.stats().full_entropy(&constraint).unwrap() - 1.0).abs() < TOL);
        ds.rebuild_stats().unwrap();
        assert!((ds.stats().full_entropy(&constraint).unwrap() - 1.5).abs() < TOL);
    }
}
