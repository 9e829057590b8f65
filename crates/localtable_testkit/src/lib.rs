//! # LocalTable Testkit
//!
//! Test utilities for LocalTable.
//!
//! This crate provides:
//! - Test fixtures backed by in-memory or temporary file stores
//! - Property-based test generators using proptest
//! - A diagnostics sink that records events for assertions
//!
//! ## Usage
//!
//! ```rust
//! use localtable_testkit::prelude::*;
//! use localtable_core::Selector;
//!
//! with_temp_tables(|tables| {
//!     tables.create("notes", None, false).unwrap();
//!     assert!(tables.select("notes", &Selector::All).unwrap().is_empty());
//! });
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod diagnostics;
pub mod fixtures;
pub mod generators;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::diagnostics::*;
    pub use crate::fixtures::*;
    pub use crate::generators::*;
}

pub use diagnostics::*;
pub use fixtures::*;
pub use generators::*;
