//! Collection store configuration.

use std::collections::HashMap;

/// Configuration for a [`crate::CollectionStore`].
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Prefix prepended to every storage key.
    pub key_prefix: Option<String>,

    /// Logical table names mapped to storage keys.
    ///
    /// Lets callers use a short name for a table whose key is long or
    /// shared with another application.
    pub aliases: HashMap<String, String>,

    /// Whether to write pretty-printed table text.
    pub pretty: bool,
}

impl Config {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the storage key prefix.
    #[must_use]
    pub fn key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = Some(prefix.into());
        self
    }

    /// Maps a logical table name to a storage key.
    #[must_use]
    pub fn alias(mut self, table: impl Into<String>, key: impl Into<String>) -> Self {
        self.aliases.insert(table.into(), key.into());
        self
    }

    /// Sets whether table text is pretty-printed.
    #[must_use]
    pub fn pretty(mut self, value: bool) -> Self {
        self.pretty = value;
        self
    }

    /// Returns the storage key for `table`: alias first, then prefix.
    #[must_use]
    pub fn storage_key(&self, table: &str) -> String {
        let base = self.aliases.get(table).map_or(table, String::as_str);
        match &self.key_prefix {
            Some(prefix) => format!("{prefix}{base}"),
            None => base.to_string(),
        }
    }
}
