//! Match resolution and positional deletion.
//!
//! Positions in a [`MatchSet`] always refer to offsets into the record
//! sequence as it was when the selector was resolved.

use crate::record::{loose_eq, Record};
use crate::selector::{Clause, Selector};
use std::collections::BTreeSet;

/// Records matched by a selector together with their original positions.
///
/// `records[i]` is the record found at `positions[i]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchSet {
    /// The matched records.
    pub records: Vec<Record>,
    /// Positions of the matched records in the table.
    pub positions: Vec<usize>,
}

impl MatchSet {
    /// Creates an empty match set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of matches, duplicates included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Returns true if nothing matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Iterates over `(position, record)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Record)> {
        self.positions.iter().copied().zip(self.records.iter())
    }

    /// Returns the matched positions, deduplicated and ascending.
    #[must_use]
    pub fn distinct_positions(&self) -> Vec<usize> {
        self.positions
            .iter()
            .copied()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Splits into `(records, positions)`.
    #[must_use]
    pub fn into_parts(self) -> (Vec<Record>, Vec<usize>) {
        (self.records, self.positions)
    }

    fn push(&mut self, position: usize, record: &Record) {
        self.positions.push(position);
        self.records.push(record.clone());
    }
}

/// Resolves `selector` against `records`.
///
/// Index selectors keep the order they were given in and skip positions
/// past the end. Conjunctions start from every position and keep only the
/// survivors of each clause in turn, so their positions are ascending.
pub fn resolve(records: &[Record], selector: &Selector) -> MatchSet {
    let mut matches = MatchSet::new();

    match selector {
        Selector::All => {
            for (position, record) in records.iter().enumerate() {
                matches.push(position, record);
            }
        }
        Selector::Index(position) => {
            if let Some(record) = records.get(*position) {
                matches.push(*position, record);
            }
        }
        Selector::Indices(positions) => {
            for &position in positions {
                if let Some(record) = records.get(position) {
                    matches.push(position, record);
                }
            }
        }
        Selector::Where(clauses) => {
            for position in narrow(records, clauses) {
                matches.push(position, &records[position]);
            }
        }
    }

    matches
}

/// Successive narrowing: each clause filters the survivors of the previous one.
fn narrow(records: &[Record], clauses: &[Clause]) -> Vec<usize> {
    if clauses.is_empty() {
        return Vec::new();
    }

    let mut survivors: Vec<usize> = (0..records.len()).collect();
    for clause in clauses {
        survivors.retain(|&position| clause_holds(&records[position], clause));
        if survivors.is_empty() {
            break;
        }
    }
    survivors
}

fn clause_holds(record: &Record, clause: &Clause) -> bool {
    record
        .get(&clause.field)
        .is_some_and(|value| loose_eq(value, &clause.value))
}

/// Deletes the records at `positions`, returning how many were removed.
///
/// Positions are treated as a set against the sequence as it was before the
/// call: duplicates collapse, out-of-range positions are skipped, and
/// deletion runs from the highest position down so no removal shifts a
/// record into a slot that is still to be deleted.
pub fn remove_positions(records: &mut Vec<Record>, positions: &[usize]) -> usize {
    let targets: BTreeSet<usize> = positions
        .iter()
        .copied()
        .filter(|&p| p < records.len())
        .collect();

    for &position in targets.iter().rev() {
        records.remove(position);
    }
    targets.len()
}
