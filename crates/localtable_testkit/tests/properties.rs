//! Property tests for selector resolution and positional mutation.

use localtable_core::{loose_eq, remove_positions, resolve, Removal, Selector};
use localtable_testkit::prelude::*;
use proptest::prelude::*;
use std::collections::BTreeSet;

proptest! {
    #![proptest_config(PropTestConfig::default().to_proptest_config())]

    #[test]
    fn batch_delete_keeps_exactly_the_unselected(
        (table, positions) in table_with_positions_strategy(8)
    ) {
        let doomed: BTreeSet<usize> = positions.iter().copied().collect();
        let expected: Vec<_> = table
            .iter()
            .enumerate()
            .filter(|(i, _)| !doomed.contains(i))
            .map(|(_, r)| r.clone())
            .collect();

        let mut remaining = table.clone();
        let removed = remove_positions(&mut remaining, &positions);

        prop_assert_eq!(removed, table.len() - expected.len());
        prop_assert_eq!(remaining, expected);
    }

    #[test]
    fn conjunction_equals_filter_of_all_clauses(
        table in table_strategy(8),
        clauses in prop::collection::vec(clause_strategy(), 1..4),
    ) {
        let expected: Vec<usize> = table
            .iter()
            .enumerate()
            .filter(|(_, r)| {
                clauses.iter().all(|c| r.get(&c.field).is_some_and(|v| loose_eq(v, &c.value)))
            })
            .map(|(i, _)| i)
            .collect();

        let matches = resolve(&table, &Selector::Where(clauses));
        prop_assert_eq!(matches.positions, expected);
    }

    #[test]
    fn resolved_positions_point_at_their_records(
        table in table_strategy(8),
        selector in selector_strategy(),
    ) {
        let matches = resolve(&table, &selector);
        prop_assert_eq!(matches.records.len(), matches.positions.len());
        for (position, record) in matches.iter() {
            prop_assert_eq!(&table[position], record);
        }
    }

    #[test]
    fn select_all_round_trips(table in table_strategy(10), name in table_name_strategy()) {
        let store = TestStore::memory();
        prop_assert!(store.create(&name, Some(table.clone()), false).is_ok());
        let matches = store.select(&name, &Selector::All);
        prop_assert!(matches.is_ok());
        prop_assert_eq!(matches.unwrap().records, table);
    }

    #[test]
    fn store_remove_matches_model(
        (table, positions) in table_with_positions_strategy(8)
    ) {
        let store = TestStore::memory();
        store.create("t", Some(table.clone()), false).unwrap();

        let mut model = table.clone();
        let expected_removed = remove_positions(&mut model, &positions);
        let result = store.remove("t", &Selector::Indices(positions));

        if expected_removed == 0 {
            prop_assert!(result.is_err());
            prop_assert_eq!(store.count("t").unwrap(), table.len());
        } else {
            prop_assert_eq!(result.unwrap(), Removal::Records(expected_removed));
            prop_assert_eq!(store.select("t", &Selector::All).unwrap().records, model);
        }
    }

    #[test]
    fn insert_appends_after_existing(
        existing in table_strategy(5),
        added in table_strategy(5),
    ) {
        let store = TestStore::memory();
        store.create("t", Some(existing.clone()), false).unwrap();
        let count = store.insert("t", added.clone()).unwrap();

        let mut expected = existing;
        expected.extend(added);
        prop_assert_eq!(count, expected.len());
        prop_assert_eq!(store.select("t", &Selector::All).unwrap().records, expected);
    }

    #[test]
    fn update_succeeds_only_on_unique_match(
        table in table_strategy(6),
        selector in selector_strategy(),
        patch in record_strategy(),
    ) {
        let store = TestStore::memory();
        store.create("t", Some(table.clone()), false).unwrap();
        let distinct = resolve(&table, &selector).distinct_positions();

        let result = store.update("t", &selector, &patch);
        if distinct.len() == 1 {
            prop_assert_eq!(result.unwrap(), distinct[0]);
        } else {
            prop_assert!(result.is_err());
            prop_assert_eq!(store.select("t", &Selector::All).unwrap().records, table);
        }
    }
}
