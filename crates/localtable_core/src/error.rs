//! Error types for LocalTable core.

use thiserror::Error;

/// Result type for collection operations.
pub type CollectionResult<T> = Result<T, CollectionError>;

/// Errors that can occur in collection operations.
///
/// Every variant except [`CollectionError::CorruptedTable`] and
/// [`CollectionError::Store`] is a recoverable rejection: the store is left
/// exactly as it was before the call.
#[derive(Debug, Error)]
pub enum CollectionError {
    /// Store error.
    #[error("store error: {0}")]
    Store(#[from] localtable_storage::StoreError),

    /// `create` without `force` on a table that already holds data.
    #[error("table already exists: {table}")]
    TableAlreadyExists {
        /// Name of the table.
        table: String,
    },

    /// The table has no entry in the store.
    #[error("table not found: {table}")]
    TableNotFound {
        /// Name of the table.
        table: String,
    },

    /// The table entry exists but holds an empty value.
    #[error("table is empty: {table}")]
    EmptyTable {
        /// Name of the table.
        table: String,
    },

    /// A selector clause does not match `field=value`.
    #[error("invalid selector clause {clause:?} in {selector:?}")]
    SelectorSyntax {
        /// The full selector text.
        selector: String,
        /// The offending clause.
        clause: String,
    },

    /// A single-record operation matched more than one record.
    #[error("selector matched {count} records in {table}, expected exactly one")]
    AmbiguousMatch {
        /// Name of the table.
        table: String,
        /// Number of distinct positions matched.
        count: usize,
    },

    /// The selector matched no records.
    #[error("selector matched no records in {table}")]
    NoMatch {
        /// Name of the table.
        table: String,
    },

    /// The persisted table value is not a valid record sequence.
    #[error("table {table} is corrupted: {message}")]
    CorruptedTable {
        /// Name of the table.
        table: String,
        /// Description of the corruption.
        message: String,
    },

    /// Table names must be non-empty.
    #[error("invalid table name: {name:?}")]
    InvalidTableName {
        /// The rejected name.
        name: String,
    },

    /// The table could not be encoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CollectionError {
    /// Creates a table already exists error.
    pub fn table_already_exists(table: impl Into<String>) -> Self {
        Self::TableAlreadyExists {
            table: table.into(),
        }
    }

    /// Creates a table not found error.
    pub fn table_not_found(table: impl Into<String>) -> Self {
        Self::TableNotFound {
            table: table.into(),
        }
    }

    /// Creates an empty table error.
    pub fn empty_table(table: impl Into<String>) -> Self {
        Self::EmptyTable {
            table: table.into(),
        }
    }

    /// Creates a selector syntax error.
    pub fn selector_syntax(selector: impl Into<String>, clause: impl Into<String>) -> Self {
        Self::SelectorSyntax {
            selector: selector.into(),
            clause: clause.into(),
        }
    }

    /// Creates an ambiguous match error.
    pub fn ambiguous_match(table: impl Into<String>, count: usize) -> Self {
        Self::AmbiguousMatch {
            table: table.into(),
            count,
        }
    }

    /// Creates a no match error.
    pub fn no_match(table: impl Into<String>) -> Self {
        Self::NoMatch {
            table: table.into(),
        }
    }

    /// Creates a corrupted table error.
    pub fn corrupted_table(table: impl Into<String>, message: impl Into<String>) -> Self {
        Self::CorruptedTable {
            table: table.into(),
            message: message.into(),
        }
    }

    /// Returns true if the error is a rejection that left the store unchanged
    /// and can be handled by the caller.
    ///
    /// Corrupted tables and store failures point at external damage and
    /// should be escalated.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            Self::CorruptedTable { .. } | Self::Store(_) | Self::Serialization(_)
        )
    }
}
