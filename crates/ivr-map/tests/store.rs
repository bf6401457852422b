use std::fs;
use std::path::PathBuf;

use ivr_map::MappingStore;
use ivr_model::{FieldMapping, MatchType};

fn temp_store_dir(tag: &str) -> PathBuf {
    let stamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    std::env::temp_dir().join(format!("ivr_map_store_{tag}_{stamp}"))
}

fn sample_row() -> FieldMapping {
    FieldMapping::new(
        4,
        "tpl_biowound_ivr",
        "Patient DOB",
        "patient.dob",
        0.95,
        MatchType::Exact,
        "curator@example.test",
    )
}

#[test]
fn insert_then_load_round_trips() {
    let dir = temp_store_dir("round");
    let store = MappingStore::new(&dir).expect("create store");

    assert!(store.insert(&sample_row()).expect("insert"));
    let rows = store.load(4, "tpl_biowound_ivr").expect("load");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].source_field, "Patient DOB");

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn duplicate_natural_key_is_a_no_op() {
    let dir = temp_store_dir("idempotent");
    let store = MappingStore::new(&dir).expect("create store");

    assert!(store.insert(&sample_row()).expect("first insert"));
    assert!(!store.insert(&sample_row()).expect("second insert"));

    // Same key with a different confidence is still the same row.
    let mut retry = sample_row();
    retry.confidence = 0.99;
    assert!(!store.insert(&retry).expect("retry insert"));

    let rows = store.load(4, "tpl_biowound_ivr").expect("load");
    assert_eq!(rows.len(), 1);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn batch_insert_reports_new_rows_only() {
    let dir = temp_store_dir("batch");
    let store = MappingStore::new(&dir).expect("create store");

    let second = FieldMapping::new(
        4,
        "tpl_biowound_ivr",
        "Physician NPI",
        "provider.npi",
        0.95,
        MatchType::Exact,
        "curator@example.test",
    );
    let batch = vec![sample_row(), second, sample_row()];
    assert_eq!(store.insert_all(&batch).expect("batch insert"), 2);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn usage_count_increments() {
    let dir = temp_store_dir("usage");
    let store = MappingStore::new(&dir).expect("create store");

    store.insert(&sample_row()).expect("insert");
    assert!(
        store
            .record_use(4, "tpl_biowound_ivr", "Patient DOB", "patient.dob")
            .expect("record use")
    );
    assert!(
        !store
            .record_use(4, "tpl_biowound_ivr", "Unknown Field", "patient.dob")
            .expect("record use of unknown row")
    );

    let rows = store.load(4, "tpl_biowound_ivr").expect("load");
    assert_eq!(rows[0].usage_count, 1);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn missing_file_loads_empty() {
    let dir = temp_store_dir("missing");
    let store = MappingStore::new(&dir).expect("create store");
    assert!(store.load(9, "tpl_none").expect("load").is_empty());
    let _ = fs::remove_dir_all(&dir);
}
