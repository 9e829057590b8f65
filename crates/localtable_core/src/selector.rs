//! Selectors: which records of a table an operation applies to.
//!
//! A selector identifies records by *position*, never by a stable identity.
//! The variant is always explicit; nothing is inferred from the shape of a
//! runtime value.
//!
//! # String form
//!
//! ```text
//! *                 all records
//! name=ann          records whose `name` loosely equals "ann"
//! name=ann, age=30  both clauses must hold
//! ```
//!
//! Whitespace around clauses and around `=` is ignored. A field name must be
//! one or more ASCII word characters; a value must be non-empty and contain no `=`.
//! A single bad clause rejects the whole selector.

use crate::error::{CollectionError, CollectionResult};
use crate::record::Record;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// One `field=value` equality test.
#[derive(Debug, Clone, PartialEq)]
pub struct Clause {
    /// Field name to test.
    pub field: String,
    /// Value the field must loosely equal.
    pub value: Value,
}

impl Clause {
    /// Creates a new clause.
    pub fn new(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// An expression denoting a subset of a table's records by position.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Selector {
    /// Every record.
    #[default]
    All,
    /// A single position. Out of range matches nothing.
    Index(usize),
    /// Positions in the given order. Out-of-range entries are skipped.
    Indices(Vec<usize>),
    /// Records satisfying every clause, narrowed clause by clause.
    ///
    /// An empty clause list matches nothing.
    Where(Vec<Clause>),
}

impl Selector {
    /// Parses the string form of a selector.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::SelectorSyntax`] naming the first clause
    /// that is not `field=value`.
    pub fn parse(text: &str) -> CollectionResult<Self> {
        if text.trim() == "*" {
            return Ok(Self::All);
        }
        let clauses = split_clauses(text)?
            .into_iter()
            .map(|(field, value)| Clause::new(field, value))
            .collect();
        Ok(Self::Where(clauses))
    }

    /// Builds a conjunction from a key/value map.
    ///
    /// Clauses follow the map's iteration order. Values keep their JSON type,
    /// so `{"age": 30}` matches a record holding `30` or `"30"`.
    pub fn from_record(record: &Record) -> Self {
        Self::Where(
            record
                .iter()
                .map(|(field, value)| Clause::new(field.clone(), value.clone()))
                .collect(),
        )
    }

    /// Builds a single-clause conjunction.
    pub fn equals(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Where(vec![Clause::new(field, value)])
    }

    /// Adds a clause, turning `All` into a conjunction.
    ///
    /// Index selectors are returned unchanged.
    #[must_use]
    pub fn and(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        match self {
            Self::All => Self::equals(field, value),
            Self::Where(mut clauses) => {
                clauses.push(Clause::new(field, value));
                Self::Where(clauses)
            }
            other => other,
        }
    }

    /// Returns true for the wildcard selector.
    #[must_use]
    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

impl FromStr for Selector {
    type Err = CollectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<usize> for Selector {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl From<Vec<usize>> for Selector {
    fn from(indices: Vec<usize>) -> Self {
        Self::Indices(indices)
    }
}

impl From<&[usize]> for Selector {
    fn from(indices: &[usize]) -> Self {
        Self::Indices(indices.to_vec())
    }
}

impl From<Record> for Selector {
    fn from(record: Record) -> Self {
        Self::from_record(&record)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "*"),
            Self::Index(i) => write!(f, "{i}"),
            Self::Indices(indices) => {
                let parts: Vec<String> = indices.iter().map(ToString::to_string).collect();
                write!(f, "[{}]", parts.join(","))
            }
            Self::Where(clauses) => {
                let parts: Vec<String> = clauses
                    .iter()
                    .map(|c| match &c.value {
                        Value::String(s) => format!("{}={}", c.field, s),
                        other => format!("{}={}", c.field, other),
                    })
                    .collect();
                write!(f, "{}", parts.join(","))
            }
        }
    }
}

/// Splits `a=1, b=2` into `(field, value)` pairs.
pub(crate) fn split_clauses(text: &str) -> CollectionResult<Vec<(String, String)>> {
    text.split(',')
        .map(|raw| {
            parse_clause(raw.trim())
                .ok_or_else(|| CollectionError::selector_syntax(text, raw.trim()))
        })
        .collect()
}

fn parse_clause(clause: &str) -> Option<(String, String)> {
    let (field, value) = clause.split_once('=')?;
    let (field, value) = (field.trim(), value.trim());

    if field.is_empty() || !field.chars().all(is_word_char) {
        return None;
    }
    if value.is_empty() || value.contains('=') {
        return None;
    }
    Some((field.to_string(), value.to_string()))
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
