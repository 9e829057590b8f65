//! # LocalTable Storage
//!
//! Key-value store trait and implementations for LocalTable.
//!
//! This crate provides the lowest-level storage abstraction for LocalTable.
//! Stores are **opaque string stores** - they do not interpret the values
//! they hold. Table encoding belongs to `localtable_core`.
//!
//! ## Design Principles
//!
//! - Stores are simple string maps (get, set, remove, has)
//! - A single `set` is the unit of atomicity
//! - Must be `Send + Sync` so one store can back several collections
//!
//! ## Available Stores
//!
//! - [`InMemoryStore`] - For testing and ephemeral storage
//! - [`FileStore`] - Persistent storage in a single JSON file
//!
//! ## Example
//!
//! ```rust
//! use localtable_storage::{KeyValueStore, InMemoryStore};
//!
//! let store = InMemoryStore::new();
//! store.set("users", "[]").unwrap();
//! assert_eq!(store.get("users").unwrap().as_deref(), Some("[]"));
//! assert!(store.has("users").unwrap());
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod file;
mod memory;
mod store;

pub use error::{StoreError, StoreResult};
pub use file::FileStore;
pub use memory::InMemoryStore;
pub use store::KeyValueStore;
