use std::collections::BTreeMap;

use proptest::prelude::*;

use dualindex::{
    core::{index::KeyedIndex, store::DualIndexStore},
    record::Record,
};

#[derive(Debug, Clone)]
enum Action {
    Create { key_idx: u8, tag: u16 },
    Update { key_idx: u8, tag: u16 },
    Delete { key_idx: u8 },
}

fn action_strategy() -> impl Strategy<Value = Action> {
    prop_oneof![
        (0u8..32, 0u16..500).prop_map(|(key_idx, tag)| Action::Create { key_idx, tag }),
        (0u8..32, 0u16..500).prop_map(|(key_idx, tag)| Action::Update { key_idx, tag }),
        (0u8..32).prop_map(|key_idx| Action::Delete { key_idx }),
    ]
}

fn key_of(idx: u8) -> String {
    const BASES: [char; 4] = ['A', 'C', 'G', 'T'];
    (0..3)
        .map(|shift| BASES[usize::from((idx >> (shift * 2)) & 3)])
        .collect()
}

fn record_of(tag: u16) -> Record {
    Record::new(format!("sp{tag}"), format!("mut{}", tag % 7))
}

fn hash_keys(store: &DualIndexStore) -> Vec<String> {
    let mut keys: Vec<String> = store.hash_index().keys().map(str::to_string).collect();
    keys.sort();
    keys
}

fn ordered_keys(store: &DualIndexStore) -> Vec<String> {
    store.ordered_index().keys().map(str::to_string).collect()
}

proptest! {
    #[test]
    fn random_sequences_keep_indexes_consistent(actions in prop::collection::vec(action_strategy(), 1..200)) {
        let mut store = DualIndexStore::new();
        let mut model = BTreeMap::<String, Record>::new();

        for action in actions {
            match action {
                Action::Create { key_idx, tag } => {
                    let key = key_of(key_idx);
                    let out = store.create(&key, record_of(tag));
                    let expected = !model.contains_key(&key);
                    prop_assert_eq!(out.hash.value, expected);
                    prop_assert_eq!(out.ordered.value, expected);
                    model.entry(key).or_insert_with(|| record_of(tag));
                }
                Action::Update { key_idx, tag } => {
                    let key = key_of(key_idx);
                    let out = store.update(&key, record_of(tag));
                    let expected = model.contains_key(&key);
                    prop_assert_eq!(out.hash.value, expected);
                    prop_assert_eq!(out.ordered.value, expected);
                    if let Some(slot) = model.get_mut(&key) {
                        *slot = record_of(tag);
                    }
                }
                Action::Delete { key_idx } => {
                    let key = key_of(key_idx);
                    let out = store.delete(&key);
                    let expected = model.remove(&key).is_some();
                    prop_assert_eq!(out.hash.value, expected);
                    prop_assert_eq!(out.ordered.value, expected);
                }
            }

            prop_assert!(store.is_consistent());
            prop_assert_eq!(hash_keys(&store), ordered_keys(&store));
            prop_assert_eq!(ordered_keys(&store), model.keys().cloned().collect::<Vec<_>>());
        }

        for (key, record) in &model {
            prop_assert_eq!(store.hash_index().get(key), Some(record));
            prop_assert_eq!(store.ordered_index().get(key), Some(record));
        }
    }

    #[test]
    fn prefix_scan_matches_full_filter(
        keys in prop::collection::vec("[ACGT]{1,5}", 0..60),
        prefix in "[ACGT]{0,3}",
    ) {
        let records: Vec<(String, Record)> = keys
            .iter()
            .map(|k| (k.clone(), Record::new("sp", "m")))
            .collect();
        let mut store = DualIndexStore::new();
        store.bulk_load(&records);

        let scanned: Vec<String> = store
            .ordered_index()
            .prefix_scan(&prefix)
            .into_iter()
            .map(|e| e.key)
            .collect();
        let filtered: Vec<String> = ordered_keys(&store)
            .into_iter()
            .filter(|k| k.starts_with(prefix.as_str()))
            .collect();
        prop_assert_eq!(scanned, filtered);
    }

    #[test]
    fn nearest_is_lower_bound_or_max(
        keys in prop::collection::vec("[ACGT]{1,4}", 0..40),
        query in "[ACGTZ]{1,4}",
    ) {
        let records: Vec<(String, Record)> = keys
            .iter()
            .map(|k| (k.clone(), Record::new("sp", "m")))
            .collect();
        let mut store = DualIndexStore::new();
        store.bulk_load(&records);

        let all = ordered_keys(&store);
        let expected = all
            .iter()
            .find(|k| k.as_str() >= query.as_str())
            .or_else(|| all.last())
            .cloned();
        let nearest = store.ordered_index().nearest(&query).map(|(k, _)| k.to_string());
        prop_assert_eq!(nearest, expected);
    }
}
