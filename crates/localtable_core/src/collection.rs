//! The collection store: tables of records on top of a key-value store.

use crate::codec::{decode_table, encode_table};
use crate::config::Config;
use crate::diagnostics::{Diagnostics, Event, TracingDiagnostics};
use crate::error::{CollectionError, CollectionResult};
use crate::record::{merge, Record};
use crate::resolve::{remove_positions, resolve, MatchSet};
use crate::selector::Selector;
use crate::stats::CollectionStats;
use localtable_storage::KeyValueStore;
use std::fmt;
use std::sync::Arc;

/// Records handed to [`CollectionStore::insert`].
#[derive(Debug, Clone, PartialEq)]
pub enum Rows {
    /// A single record.
    One(Record),
    /// Several records, appended in order.
    Many(Vec<Record>),
}

impl Rows {
    fn into_vec(self) -> Vec<Record> {
        match self {
            Self::One(record) => vec![record],
            Self::Many(records) => records,
        }
    }
}

impl From<Record> for Rows {
    fn from(record: Record) -> Self {
        Self::One(record)
    }
}

impl From<Vec<Record>> for Rows {
    fn from(records: Vec<Record>) -> Self {
        Self::Many(records)
    }
}

/// What a successful [`CollectionStore::remove`] deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    /// The whole table entry was deleted from the store.
    Table,
    /// This many records were deleted; the table remains.
    Records(usize),
}

/// How the store currently holds a table.
enum TableState {
    Missing,
    Empty,
    Loaded(Vec<Record>),
}

/// Tables of records kept as JSON text under string keys.
///
/// Every call re-reads the whole table from the store, works on an
/// in-memory copy and writes the whole table back with a single `set`.
/// Nothing is cached between calls, and a rejected call never writes.
///
/// Sequences of calls are not transactions: a `select` followed by an
/// `update` can race with other writers to the same store.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use localtable_core::{CollectionStore, Selector};
/// use localtable_storage::InMemoryStore;
/// use serde_json::json;
///
/// let tables = CollectionStore::new(Arc::new(InMemoryStore::new()));
/// tables.create("users", None, false).unwrap();
///
/// let ann = json!({"name": "ann", "age": 30}).as_object().unwrap().clone();
/// tables.insert("users", ann).unwrap();
///
/// let found = tables.select("users", &Selector::parse("name=ann").unwrap()).unwrap();
/// assert_eq!(found.positions, vec![0]);
/// ```
pub struct CollectionStore {
    store: Arc<dyn KeyValueStore>,
    config: Config,
    diagnostics: Arc<dyn Diagnostics>,
    stats: CollectionStats,
}

impl fmt::Debug for CollectionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollectionStore")
            .field("config", &self.config)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

impl CollectionStore {
    /// Creates a collection store with default configuration.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_config(store, Config::default())
    }

    /// Creates a collection store with the given configuration.
    pub fn with_config(store: Arc<dyn KeyValueStore>, config: Config) -> Self {
        Self {
            store,
            config,
            diagnostics: Arc::new(TracingDiagnostics),
            stats: CollectionStats::new(),
        }
    }

    /// Replaces the diagnostics sink.
    #[must_use]
    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn Diagnostics>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// Returns the configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the operation counters.
    pub fn stats(&self) -> &CollectionStats {
        &self.stats
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }

    /// Parses a selector, reporting a rejection to diagnostics.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::SelectorSyntax`] for a malformed clause.
    pub fn parse_selector(&self, text: &str) -> CollectionResult<Selector> {
        Selector::parse(text).map_err(|err| {
            if let CollectionError::SelectorSyntax { selector, clause } = &err {
                let event = Event::SelectorRejected {
                    selector: selector.clone(),
                    clause: clause.clone(),
                };
                return self.reject(event, err);
            }
            err
        })
    }

    /// Creates (or with `force`, re-initializes) a table.
    ///
    /// The table holds `initial` if given, otherwise no records. A table
    /// whose stored value is non-empty is only overwritten when `force` is
    /// set; an empty stored value counts as no table.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::TableAlreadyExists`] if the table holds
    /// data and `force` is false.
    pub fn create(
        &self,
        table: &str,
        initial: Option<Vec<Record>>,
        force: bool,
    ) -> CollectionResult<()> {
        let key = self.key(table)?;

        if !force {
            let occupied = self.store.get(&key)?.is_some_and(|text| !text.is_empty());
            if occupied {
                return Err(self.reject(
                    Event::CreateRejected {
                        table: table.to_string(),
                    },
                    CollectionError::table_already_exists(table),
                ));
            }
        }

        self.write(table, &key, &initial.unwrap_or_default())?;
        self.stats.record_create();
        Ok(())
    }

    /// Returns the records matched by `selector` with their positions.
    ///
    /// Read-only.
    ///
    /// # Errors
    ///
    /// - [`CollectionError::TableNotFound`] if the table has no entry
    /// - [`CollectionError::EmptyTable`] if the entry holds an empty value
    /// - [`CollectionError::CorruptedTable`] if the entry cannot be decoded
    pub fn select(&self, table: &str, selector: &Selector) -> CollectionResult<MatchSet> {
        let key = self.key(table)?;
        match self.load(table, &key)? {
            TableState::Missing => Err(self.missing(table)),
            TableState::Empty => Err(self.reject(
                Event::EmptyTable {
                    table: table.to_string(),
                },
                CollectionError::empty_table(table),
            )),
            TableState::Loaded(records) => {
                self.stats.record_select();
                Ok(resolve(&records, selector))
            }
        }
    }

    /// Appends one or more records, keeping their order.
    ///
    /// Returns the number of records in the table afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::TableNotFound`] if the table has no entry.
    pub fn insert(&self, table: &str, rows: impl Into<Rows>) -> CollectionResult<usize> {
        let (key, mut records) = self.existing(table)?;
        let rows = rows.into().into_vec();
        let added = rows.len() as u64;

        records.extend(rows);
        self.write(table, &key, &records)?;
        self.stats.record_inserted(added);
        Ok(records.len())
    }

    /// Merges `patch` into the one record matched by `selector`.
    ///
    /// Fields in `patch` overwrite the record's fields; other fields are
    /// kept. Returns the position of the updated record.
    ///
    /// # Errors
    ///
    /// - [`CollectionError::TableNotFound`] if the table has no entry
    /// - [`CollectionError::NoMatch`] if nothing matched
    /// - [`CollectionError::AmbiguousMatch`] if more than one record matched
    pub fn update(
        &self,
        table: &str,
        selector: &Selector,
        patch: &Record,
    ) -> CollectionResult<usize> {
        let (key, mut records) = self.existing(table)?;
        let position = self.unique_position(table, &records, selector)?;

        merge(&mut records[position], patch);
        self.write(table, &key, &records)?;
        self.stats.record_updated();
        Ok(position)
    }

    /// Replaces the one record matched by `selector` with `record`.
    ///
    /// Returns the position of the replaced record.
    ///
    /// # Errors
    ///
    /// Same as [`CollectionStore::update`].
    pub fn replace(
        &self,
        table: &str,
        selector: &Selector,
        record: Record,
    ) -> CollectionResult<usize> {
        let (key, mut records) = self.existing(table)?;
        let position = self.unique_position(table, &records, selector)?;

        records[position] = record;
        self.write(table, &key, &records)?;
        self.stats.record_replaced();
        Ok(position)
    }

    /// Removes records, or with [`Selector::All`] the whole table.
    ///
    /// A wildcard deletes the table entry from the store; it does not leave
    /// an empty table behind. Any other selector deletes exactly the records
    /// it matched, as they were positioned before the call.
    ///
    /// # Errors
    ///
    /// - [`CollectionError::TableNotFound`] if the table has no entry
    /// - [`CollectionError::NoMatch`] if a non-wildcard selector matched nothing
    pub fn remove(&self, table: &str, selector: &Selector) -> CollectionResult<Removal> {
        if selector.is_all() {
            return self.drop_entry(table);
        }

        let (key, mut records) = self.existing(table)?;
        let matches = resolve(&records, selector);
        if matches.is_empty() {
            return Err(self.no_match(table, selector));
        }

        let removed = remove_positions(&mut records, &matches.positions);
        self.write(table, &key, &records)?;
        self.stats.record_removed(removed as u64);
        Ok(Removal::Records(removed))
    }

    /// Deletes the table entry. Same as `remove(table, &Selector::All)`.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::TableNotFound`] if the table has no entry.
    pub fn drop_table(&self, table: &str) -> CollectionResult<()> {
        self.drop_entry(table).map(|_| ())
    }

    /// Returns true if the table has an entry in the store, empty or not.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn exists(&self, table: &str) -> CollectionResult<bool> {
        let key = self.key(table)?;
        Ok(self.store.has(&key)?)
    }

    /// Returns the number of records in the table.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::TableNotFound`] if the table has no entry.
    pub fn count(&self, table: &str) -> CollectionResult<usize> {
        self.existing(table).map(|(_, records)| records.len())
    }

    fn drop_entry(&self, table: &str) -> CollectionResult<Removal> {
        let key = self.key(table)?;
        if !self.store.has(&key)? {
            return Err(self.missing(table));
        }

        self.store.remove(&key)?;
        self.stats.record_drop();
        self.diagnostics.emit(&Event::TableDropped {
            table: table.to_string(),
        });
        Ok(Removal::Table)
    }

    /// The single distinct position `selector` matches.
    fn unique_position(
        &self,
        table: &str,
        records: &[Record],
        selector: &Selector,
    ) -> CollectionResult<usize> {
        let positions = resolve(records, selector).distinct_positions();
        match positions.as_slice() {
            [] => Err(self.no_match(table, selector)),
            [position] => Ok(*position),
            _ => Err(self.reject(
                Event::AmbiguousUpdate {
                    table: table.to_string(),
                    count: positions.len(),
                },
                CollectionError::ambiguous_match(table, positions.len()),
            )),
        }
    }

    fn key(&self, table: &str) -> CollectionResult<String> {
        if table.is_empty() {
            return Err(self.reject(
                Event::InvalidTableName {
                    name: table.to_string(),
                },
                CollectionError::InvalidTableName {
                    name: table.to_string(),
                },
            ));
        }
        Ok(self.config.storage_key(table))
    }

    fn load(&self, table: &str, key: &str) -> CollectionResult<TableState> {
        let Some(text) = self.store.get(key)? else {
            return Ok(TableState::Missing);
        };
        if text.is_empty() {
            return Ok(TableState::Empty);
        }

        self.stats.record_read(text.len() as u64);
        match decode_table(table, &text) {
            Ok(records) => Ok(TableState::Loaded(records)),
            Err(err) => {
                if let CollectionError::CorruptedTable { message, .. } = &err {
                    self.diagnostics.emit(&Event::CorruptedTable {
                        table: table.to_string(),
                        message: message.clone(),
                    });
                }
                Err(err)
            }
        }
    }

    /// Loads a table that must exist; an empty value reads as no records.
    fn existing(&self, table: &str) -> CollectionResult<(String, Vec<Record>)> {
        let key = self.key(table)?;
        match self.load(table, &key)? {
            TableState::Missing => Err(self.missing(table)),
            TableState::Empty => Ok((key, Vec::new())),
            TableState::Loaded(records) => Ok((key, records)),
        }
    }

    fn write(&self, table: &str, key: &str, records: &[Record]) -> CollectionResult<()> {
        let text = encode_table(records, self.config.pretty)?;
        self.store.set(key, &text)?;
        self.stats.record_write(text.len() as u64);
        self.diagnostics.emit(&Event::TableWritten {
            table: table.to_string(),
            records: records.len(),
        });
        Ok(())
    }

    fn missing(&self, table: &str) -> CollectionError {
        self.reject(
            Event::TableMissing {
                table: table.to_string(),
            },
            CollectionError::table_not_found(table),
        )
    }

    fn no_match(&self, table: &str, selector: &Selector) -> CollectionError {
        self.reject(
            Event::NoMatch {
                table: table.to_string(),
                selector: selector.to_string(),
            },
            CollectionError::no_match(table),
        )
    }

    fn reject(&self, event: Event, err: CollectionError) -> CollectionError {
        self.stats.record_rejection();
        self.diagnostics.emit(&event);
        err
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use localtable_storage::InMemoryStore;
    use parking_lot::Mutex;
    use serde_json::{json, Value};

    #[derive(Default)]
    struct Recorder(Mutex<Vec<Event>>);

    impl Diagnostics for Recorder {
        fn emit(&self, event: &Event) {
            self.0.lock().push(event.clone());
        }
    }

    fn rec(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    fn recs(value: Value) -> Vec<Record> {
        serde_json::from_value(value).unwrap()
    }

    fn setup() -> (Arc<InMemoryStore>, CollectionStore) {
        let store = Arc::new(InMemoryStore::new());
        let tables = CollectionStore::new(store.clone());
        (store, tables)
    }

    fn all(tables: &CollectionStore, table: &str) -> Vec<Record> {
        tables.select(table, &Selector::All).unwrap().records
    }

    #[test]
    fn create_empty_table() {
        let (store, tables) = setup();
        tables.create("t", None, false).unwrap();
        assert_eq!(store.get("t").unwrap().as_deref(), Some("[]"));
        assert!(tables.exists("t").unwrap());
    }

    #[test]
    fn create_twice_keeps_first() {
        let (_, tables) = setup();
        let x = recs(json!([{"v": "x"}]));
        tables.create("t", Some(x.clone()), false).unwrap();

        let err = tables
            .create("t", Some(recs(json!([{"v": "y"}]))), false)
            .unwrap_err();
        assert!(matches!(err, CollectionError::TableAlreadyExists { .. }));
        assert_eq!(all(&tables, "t"), x);
    }

    #[test]
    fn create_rejects_even_empty_array() {
        let (_, tables) = setup();
        tables.create("t", None, false).unwrap();
        assert!(tables.create("t", None, false).is_err());
    }

    #[test]
    fn create_force_overwrites() {
        let (_, tables) = setup();
        tables.create("t", Some(recs(json!([{"v": 1}]))), false).unwrap();
        tables.create("t", Some(recs(json!([{"v": 2}]))), true).unwrap();
        assert_eq!(all(&tables, "t"), recs(json!([{"v": 2}])));
    }

    #[test]
    fn create_over_empty_value_without_force() {
        let store = Arc::new(InMemoryStore::with_entries([("t", "")]));
        let tables = CollectionStore::new(store.clone());
        tables.create("t", None, false).unwrap();
        assert_eq!(store.get("t").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn empty_name_emits_one_event() {
        let recorder = Arc::new(Recorder::default());
        let tables = CollectionStore::new(Arc::new(InMemoryStore::new()))
            .with_diagnostics(recorder.clone());

        let err = tables.insert("", Record::new()).unwrap_err();
        assert!(matches!(err, CollectionError::InvalidTableName { .. }));
        assert_eq!(
            recorder.0.lock().as_slice(),
            [Event::InvalidTableName { name: String::new() }]
        );
        assert_eq!(tables.stats().rejections(), 1);
    }

    #[test]
    fn create_rejects_empty_name() {
        let (_, tables) = setup();
        let err = tables.create("", None, false).unwrap_err();
        assert!(matches!(err, CollectionError::InvalidTableName { .. }));
    }

    #[test]
    fn select_round_trips_in_order() {
        let (_, tables) = setup();
        let rows = recs(json!([{"b": 2, "a": 1}, {"c": [1, 2]}, {}]));
        tables.create("t", Some(rows.clone()), false).unwrap();

        let matches = tables.select("t", &Selector::parse("*").unwrap()).unwrap();
        assert_eq!(matches.records, rows);
        assert_eq!(matches.positions, vec![0, 1, 2]);
    }

    #[test]
    fn select_missing_and_empty_are_distinct() {
        let store = Arc::new(InMemoryStore::with_entries([("blank", "")]));
        let tables = CollectionStore::new(store);

        assert!(matches!(
            tables.select("nope", &Selector::All),
            Err(CollectionError::TableNotFound { .. })
        ));
        assert!(matches!(
            tables.select("blank", &Selector::All),
            Err(CollectionError::EmptyTable { .. })
        ));
    }

    #[test]
    fn select_out_of_range_is_empty() {
        let (_, tables) = setup();
        tables
            .create("t", Some(recs(json!([{}, {}, {}]))), false)
            .unwrap();
        let matches = tables.select("t", &Selector::Index(99)).unwrap();
        assert!(matches.is_empty());
    }

    #[test]
    fn select_corrupted_table_escalates() {
        let store = Arc::new(InMemoryStore::with_entries([("t", "{not json")]));
        let recorder = Arc::new(Recorder::default());
        let tables = CollectionStore::new(store).with_diagnostics(recorder.clone());

        let err = tables.select("t", &Selector::All).unwrap_err();
        assert!(matches!(err, CollectionError::CorruptedTable { .. }));
        assert!(!err.is_recoverable());
        assert!(matches!(
            recorder.0.lock().as_slice(),
            [Event::CorruptedTable { .. }]
        ));
    }

    #[test]
    fn insert_appends_in_order() {
        let (_, tables) = setup();
        tables
            .create("t", Some(recs(json!([{"id": "a"}, {"id": "b"}]))), false)
            .unwrap();

        let count = tables
            .insert("t", recs(json!([{"id": "x"}, {"id": "y"}])))
            .unwrap();
        assert_eq!(count, 4);
        assert_eq!(
            all(&tables, "t"),
            recs(json!([{"id": "a"}, {"id": "b"}, {"id": "x"}, {"id": "y"}]))
        );
    }

    #[test]
    fn insert_single_record() {
        let (_, tables) = setup();
        tables.create("t", None, false).unwrap();
        tables.insert("t", rec(json!({"id": 1}))).unwrap();
        assert_eq!(tables.count("t").unwrap(), 1);
    }

    #[test]
    fn insert_into_missing_table_fails() {
        let (store, tables) = setup();
        let err = tables.insert("t", rec(json!({"id": 1}))).unwrap_err();
        assert!(matches!(err, CollectionError::TableNotFound { .. }));
        assert!(store.is_empty());
    }

    #[test]
    fn insert_into_empty_value() {
        let store = Arc::new(InMemoryStore::with_entries([("t", "")]));
        let tables = CollectionStore::new(store);
        tables.insert("t", rec(json!({"id": 1}))).unwrap();
        assert_eq!(all(&tables, "t"), recs(json!([{"id": 1}])));
    }

    #[test]
    fn update_merges_fields() {
        let (_, tables) = setup();
        tables
            .create("t", Some(recs(json!([{"k": 1, "name": "a"}, {"k": 2, "name": "b"}]))), false)
            .unwrap();

        let position = tables
            .update("t", &Selector::parse("k=2").unwrap(), &rec(json!({"name": "z", "new": true})))
            .unwrap();
        assert_eq!(position, 1);
        assert_eq!(
            all(&tables, "t"),
            recs(json!([{"k": 1, "name": "a"}, {"k": 2, "name": "z", "new": true}]))
        );
    }

    #[test]
    fn update_rejects_ambiguous_match() {
        let (store, tables) = setup();
        tables
            .create("t", Some(recs(json!([{"k": 1}, {"k": 1}]))), false)
            .unwrap();
        let before = store.get("t").unwrap();

        let err = tables
            .update("t", &Selector::parse("k=1").unwrap(), &rec(json!({"k": 9})))
            .unwrap_err();
        assert!(matches!(err, CollectionError::AmbiguousMatch { count: 2, .. }));
        assert_eq!(store.get("t").unwrap(), before);
    }

    #[test]
    fn update_rejects_no_match() {
        let (_, tables) = setup();
        tables.create("t", Some(recs(json!([{"k": 1}]))), false).unwrap();
        let err = tables
            .update("t", &Selector::Index(5), &rec(json!({"k": 2})))
            .unwrap_err();
        assert!(matches!(err, CollectionError::NoMatch { .. }));
    }

    #[test]
    fn update_with_repeated_index_is_one_match() {
        let (_, tables) = setup();
        tables.create("t", Some(recs(json!([{"k": 1}]))), false).unwrap();
        let position = tables
            .update("t", &Selector::Indices(vec![0, 0]), &rec(json!({"k": 2})))
            .unwrap();
        assert_eq!(position, 0);
    }

    #[test]
    fn update_missing_table_fails() {
        let (_, tables) = setup();
        let err = tables
            .update("t", &Selector::Index(0), &rec(json!({})))
            .unwrap_err();
        assert!(matches!(err, CollectionError::TableNotFound { .. }));
    }

    #[test]
    fn update_with_assignment_patch() {
        let (_, tables) = setup();
        tables.create("t", Some(recs(json!([{"k": 1}]))), false).unwrap();
        let patch = crate::parse_assignments("name=bob,k=3").unwrap();
        tables.update("t", &Selector::Index(0), &patch).unwrap();
        assert_eq!(all(&tables, "t"), recs(json!([{"k": "3", "name": "bob"}])));
    }

    #[test]
    fn replace_swaps_whole_record() {
        let (_, tables) = setup();
        tables
            .create("t", Some(recs(json!([{"k": 1, "keep": "no"}]))), false)
            .unwrap();
        tables
            .replace("t", &Selector::equals("k", 1), rec(json!({"fresh": 1})))
            .unwrap();
        assert_eq!(all(&tables, "t"), recs(json!([{"fresh": 1}])));
    }

    #[test]
    fn remove_wildcard_deletes_entry() {
        let (store, tables) = setup();
        tables.create("t", Some(recs(json!([{}]))), false).unwrap();

        assert_eq!(tables.remove("t", &Selector::All).unwrap(), Removal::Table);
        assert!(!store.has("t").unwrap());
        assert!(matches!(
            tables.select("t", &Selector::All),
            Err(CollectionError::TableNotFound { .. })
        ));
    }

    #[test]
    fn remove_wildcard_on_empty_value() {
        let store = Arc::new(InMemoryStore::with_entries([("t", "")]));
        let tables = CollectionStore::new(store.clone());
        tables.drop_table("t").unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn remove_wildcard_on_missing_table_fails() {
        let (_, tables) = setup();
        assert!(matches!(
            tables.remove("t", &Selector::All),
            Err(CollectionError::TableNotFound { .. })
        ));
    }

    #[test]
    fn remove_batch_compensates_shift() {
        let (_, tables) = setup();
        tables
            .create(
                "t",
                Some(recs(json!([{"id": "a"}, {"id": "b"}, {"id": "c"}, {"id": "d"}]))),
                false,
            )
            .unwrap();

        let removal = tables.remove("t", &Selector::Indices(vec![0, 2])).unwrap();
        assert_eq!(removal, Removal::Records(2));
        assert_eq!(all(&tables, "t"), recs(json!([{"id": "b"}, {"id": "d"}])));
    }

    #[test]
    fn remove_by_conjunction() {
        let (_, tables) = setup();
        tables
            .create(
                "t",
                Some(recs(json!([{"g": 1, "id": 0}, {"g": 2, "id": 1}, {"g": 1, "id": 2}]))),
                false,
            )
            .unwrap();

        tables.remove("t", &Selector::parse("g=1").unwrap()).unwrap();
        assert_eq!(all(&tables, "t"), recs(json!([{"g": 2, "id": 1}])));
    }

    #[test]
    fn remove_every_record_leaves_empty_table() {
        let (store, tables) = setup();
        tables.create("t", Some(recs(json!([{}, {}]))), false).unwrap();
        tables.remove("t", &Selector::Indices(vec![1, 0])).unwrap();
        assert_eq!(store.get("t").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn remove_no_match_leaves_table() {
        let (store, tables) = setup();
        tables.create("t", Some(recs(json!([{"k": 1}]))), false).unwrap();
        let before = store.get("t").unwrap();

        let err = tables.remove("t", &Selector::equals("k", 2)).unwrap_err();
        assert!(matches!(err, CollectionError::NoMatch { .. }));
        assert_eq!(store.get("t").unwrap(), before);
    }

    #[test]
    fn parse_selector_reports_rejection() {
        let recorder = Arc::new(Recorder::default());
        let tables = CollectionStore::new(Arc::new(InMemoryStore::new()))
            .with_diagnostics(recorder.clone());

        assert!(tables.parse_selector("a=1,bad").is_err());
        assert_eq!(
            recorder.0.lock().as_slice(),
            [Event::SelectorRejected {
                selector: "a=1,bad".into(),
                clause: "bad".into(),
            }]
        );
        assert_eq!(tables.stats().rejections(), 1);
    }

    #[test]
    fn rejections_emit_one_event_each() {
        let recorder = Arc::new(Recorder::default());
        let tables = CollectionStore::new(Arc::new(InMemoryStore::new()))
            .with_diagnostics(recorder.clone());
        tables
            .create("t", Some(recs(json!([{"k": 1}, {"k": 1}]))), false)
            .unwrap();
        recorder.0.lock().clear();

        let _ = tables.create("t", None, false);
        let _ = tables.update("t", &Selector::equals("k", 1), &Record::new());
        let _ = tables.insert("missing", Record::new());

        let events = recorder.0.lock().clone();
        assert_eq!(
            events,
            vec![
                Event::CreateRejected { table: "t".into() },
                Event::AmbiguousUpdate {
                    table: "t".into(),
                    count: 2
                },
                Event::TableMissing {
                    table: "missing".into()
                },
            ]
        );
    }

    #[test]
    fn config_prefix_and_alias() {
        let store = Arc::new(InMemoryStore::new());
        let config = Config::new().key_prefix("app/").alias("u", "users");
        let tables = CollectionStore::with_config(store.clone(), config);

        tables.create("u", None, false).unwrap();
        tables.create("notes", None, false).unwrap();
        assert_eq!(store.keys().unwrap(), vec!["app/notes", "app/users"]);
    }

    #[test]
    fn two_stores_share_one_backend() {
        let store = Arc::new(InMemoryStore::new());
        let a = CollectionStore::new(store.clone());
        let b = CollectionStore::new(store);

        a.create("t", None, false).unwrap();
        b.insert("t", rec(json!({"from": "b"}))).unwrap();
        assert_eq!(a.count("t").unwrap(), 1);
    }

    #[test]
    fn stats_track_operations() {
        let (_, tables) = setup();
        tables.create("t", None, false).unwrap();
        tables
            .insert("t", recs(json!([{"k": 1}, {"k": 2}])))
            .unwrap();
        tables
            .update("t", &Selector::Index(0), &rec(json!({"k": 5})))
            .unwrap();
        tables
            .replace("t", &Selector::Index(1), rec(json!({"k": 7})))
            .unwrap();
        tables.select("t", &Selector::All).unwrap();
        tables.remove("t", &Selector::Index(1)).unwrap();
        tables.drop_table("t").unwrap();

        let snap = tables.stats().snapshot();
        assert_eq!(snap.tables_created, 1);
        assert_eq!(snap.records_inserted, 2);
        assert_eq!(snap.records_updated, 1);
        assert_eq!(snap.records_replaced, 1);
        assert_eq!(snap.selects, 1);
        assert_eq!(snap.records_removed, 1);
        assert_eq!(snap.tables_dropped, 1);
        assert_eq!(snap.table_writes, 5);
        assert_eq!(snap.rejections, 0);
    }
}
