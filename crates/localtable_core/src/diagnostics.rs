//! Diagnostics sink for collection operations.
//!
//! A [`crate::CollectionStore`] reports every rejection and every table
//! write to the [`Diagnostics`] it was built with. The default sink forwards
//! to `tracing`; tests can install a recording sink instead.

/// Something worth reporting about a collection operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// `create` refused to overwrite a table holding data.
    CreateRejected {
        /// Table name.
        table: String,
    },
    /// The table has no entry in the store.
    TableMissing {
        /// Table name.
        table: String,
    },
    /// The table entry holds an empty value.
    EmptyTable {
        /// Table name.
        table: String,
    },
    /// A table name was rejected.
    InvalidTableName {
        /// The rejected name.
        name: String,
    },
    /// A selector failed to parse.
    SelectorRejected {
        /// Selector text.
        selector: String,
        /// The offending clause.
        clause: String,
    },
    /// A single-record operation matched several records.
    AmbiguousUpdate {
        /// Table name.
        table: String,
        /// Distinct positions matched.
        count: usize,
    },
    /// A selector matched no records.
    NoMatch {
        /// Table name.
        table: String,
        /// Selector in string form.
        selector: String,
    },
    /// The persisted table could not be decoded.
    CorruptedTable {
        /// Table name.
        table: String,
        /// Decoder message.
        message: String,
    },
    /// A table was written back to the store.
    TableWritten {
        /// Table name.
        table: String,
        /// Records now in the table.
        records: usize,
    },
    /// A table entry was deleted from the store.
    TableDropped {
        /// Table name.
        table: String,
    },
}

/// Receives collection events.
pub trait Diagnostics: Send + Sync {
    /// Handles one event.
    fn emit(&self, event: &Event);
}

/// Forwards events to `tracing`.
///
/// Rejections are logged at `warn`, corruption at `error` and writes at `debug`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn emit(&self, event: &Event) {
        match event {
            Event::CreateRejected { table } => {
                tracing::warn!(table = %table, "table already exists, not overwriting");
            }
            Event::TableMissing { table } => {
                tracing::warn!(table = %table, "table is not defined");
            }
            Event::EmptyTable { table } => {
                tracing::warn!(table = %table, "table is empty");
            }
            Event::InvalidTableName { name } => {
                tracing::warn!(name = %name, "invalid table name");
            }
            Event::SelectorRejected { selector, clause } => {
                tracing::warn!(selector = %selector, clause = %clause, "invalid selector");
            }
            Event::AmbiguousUpdate { table, count } => {
                tracing::warn!(table = %table, count, "selector matched more than one record");
            }
            Event::NoMatch { table, selector } => {
                tracing::warn!(table = %table, selector = %selector, "selector matched nothing");
            }
            Event::CorruptedTable { table, message } => {
                tracing::error!(table = %table, error = %message, "table value is corrupted");
            }
            Event::TableWritten { table, records } => {
                tracing::debug!(table = %table, records, "table written");
            }
            Event::TableDropped { table } => {
                tracing::debug!(table = %table, "table dropped");
            }
        }
    }
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentDiagnostics;

impl Diagnostics for SilentDiagnostics {
    fn emit(&self, _event: &Event) {}
}
