//! Property-based test generators using proptest.
//!
//! Provides strategies for generating records, tables and selectors
//! that stay within the selector grammar.

use localtable_core::{Clause, Record, Selector};
use proptest::prelude::*;
use serde_json::Value;

/// Strategy for generating field names that satisfy the selector grammar.
pub fn field_name_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z][a-z0-9_]{0,5}").expect("Invalid regex")
}

/// Strategy for generating valid table names.
pub fn table_name_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z][a-zA-Z0-9_]{0,31}")
        .expect("Invalid regex")
        .prop_filter("Table name must not be empty", |s| !s.is_empty())
}

/// Strategy for generating scalar field values.
///
/// Numbers and words are drawn from small ranges so that generated
/// conjunctions actually match something.
pub fn scalar_value_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        1 => Just(Value::Null),
        1 => any::<bool>().prop_map(Value::Bool),
        3 => (0i64..4).prop_map(Value::from),
        3 => prop::sample::select(vec!["x", "y", "z", "1"]).prop_map(Value::from),
    ]
}

/// Strategy for generating a record over a small set of field names.
pub fn record_strategy() -> impl Strategy<Value = Record> {
    prop::collection::vec(
        (prop::sample::select(vec!["a", "b", "c", "d"]), scalar_value_strategy()),
        0..4,
    )
    .prop_map(|fields| {
        fields
            .into_iter()
            .map(|(name, value)| (name.to_string(), value))
            .collect()
    })
}

/// Strategy for generating a table of up to `max_len` records.
pub fn table_strategy(max_len: usize) -> impl Strategy<Value = Vec<Record>> {
    prop::collection::vec(record_strategy(), 0..=max_len)
}

/// Strategy for generating a table together with positions into it.
///
/// Positions may repeat and may run up to two past the end.
pub fn table_with_positions_strategy(
    max_len: usize,
) -> impl Strategy<Value = (Vec<Record>, Vec<usize>)> {
    table_strategy(max_len).prop_flat_map(|table| {
        let bound = table.len() + 2;
        let positions = prop::collection::vec(0..bound, 0..=bound);
        (Just(table), positions)
    })
}

/// Strategy for generating string-form conjunction clauses.
pub fn clause_strategy() -> impl Strategy<Value = Clause> {
    (
        prop::sample::select(vec!["a", "b", "c", "d"]),
        prop::sample::select(vec!["0", "1", "2", "3", "x", "y", "z"]),
    )
        .prop_map(|(field, value)| Clause::new(field, value))
}

/// Strategy for generating selectors of every kind.
pub fn selector_strategy() -> impl Strategy<Value = Selector> {
    prop_oneof![
        1 => Just(Selector::All),
        2 => (0usize..8).prop_map(Selector::Index),
        2 => prop::collection::vec(0usize..8, 0..6).prop_map(Selector::Indices),
        3 => prop::collection::vec(clause_strategy(), 1..4).prop_map(Selector::Where),
    ]
}

/// Configuration for property tests.
#[derive(Debug, Clone)]
pub struct PropTestConfig {
    /// Number of test cases to run.
    pub cases: u32,
    /// Maximum shrink iterations.
    pub max_shrink_iters: u32,
}

impl Default for PropTestConfig {
    fn default() -> Self {
        Self {
            cases: 256,
            max_shrink_iters: 1000,
        }
    }
}

impl PropTestConfig {
    /// Creates a configuration for quick tests.
    #[must_use]
    pub fn quick() -> Self {
        Self {
            cases: 32,
            max_shrink_iters: 100,
        }
    }

    /// Converts to proptest config.
    #[must_use]
    pub fn to_proptest_config(&self) -> ProptestConfig {
        ProptestConfig {
            cases: self.cases,
            max_shrink_iters: self.max_shrink_iters,
            ..ProptestConfig::default()
        }
    }
}
