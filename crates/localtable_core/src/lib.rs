//! # LocalTable Core
//!
//! Table-like access to records persisted as JSON text in a key-value store.
//!
//! This crate provides:
//! - [`Selector`] parsing and [`MatchSet`] resolution
//! - [`CollectionStore`] with create, select, insert, update, replace and remove
//! - Position-safe batch deletion
//! - Pluggable [`Diagnostics`] and [`CollectionStats`] counters
//!
//! A table is one store value: a JSON array of objects. Records are
//! addressed by position, so selectors are resolved against the table as it
//! is read at the start of each call.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod codec;
mod collection;
mod config;
mod diagnostics;
mod error;
mod record;
mod resolve;
mod selector;
mod stats;

pub use codec::{decode_table, encode_table};
pub use collection::{CollectionStore, Removal, Rows};
pub use config::Config;
pub use diagnostics::{Diagnostics, Event, SilentDiagnostics, TracingDiagnostics};
pub use error::{CollectionError, CollectionResult};
pub use record::{loose_eq, merge, parse_assignments, Record};
pub use resolve::{remove_positions, resolve, MatchSet};
pub use selector::{Clause, Selector};
pub use stats::{CollectionStats, StatsSnapshot};
