//! Functional-dependency constraints

use serde::{Deserialize, Serialize};

/// A functional dependency: the antecedent columns determine the
/// consequent columns.
///
/// Both column lists are ordered; pattern strings are rendered in this
/// order. Immutable once built, and hashable so it can key the entropy
/// ledger.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Constraint {
    antecedent: Vec<String>,
    consequent: Vec<String>,
}

impl Constraint {
    /// Creates a constraint from ordered antecedent and consequent column
    /// lists
    pub fn new(antecedent: Vec<String>, consequent: Vec<String>) -> Self {
        Self {
            antecedent,
            consequent,
        }
    }

    /// The ordered antecedent column names
    pub fn antecedent_cols(&self) -> &[String] {
        &self.antecedent
    }

    /// The ordered consequent column names
    pub fn consequent_cols(&self) -> &[String] {
        &self.consequent
    }

    /// Antecedent columns followed by consequent columns; the column order
    /// of the full pattern string
    pub fn full_cols(&self) -> Vec<String> {
        let mut cols = Vec::with_capacity(self.antecedent.len() + self.consequent.len());
        cols.extend_from_slice(&self.antecedent);
        cols.extend_from_slice(&self.consequent);
        cols
    }
}
