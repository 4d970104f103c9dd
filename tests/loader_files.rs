use std::{fs, io::Write};

use tempfile::TempDir;

use dualindex::{
    core::store::DualIndexStore,
    loader::{self, LoadError},
    record::Record,
};

#[test]
fn file_round_trips_into_store() {
    let tmp = TempDir::new().expect("tmp");
    let path = tmp.path().join("dna_data_100.csv");
    let mut file = fs::File::create(&path).expect("create");
    writeln!(file, "key,species,mutation").expect("write");
    writeln!(file, "AAC,human,none").expect("write");
    writeln!(file, "AGT,mouse,BRCA1 del  \r").expect("write");
    writeln!(file, "broken line").expect("write");
    writeln!(file).expect("write");
    writeln!(file, "AAC,dog,snp").expect("write");
    drop(file);

    let dataset = loader::load_path(&path).expect("load");
    assert_eq!(dataset.len(), 3);
    assert_eq!(dataset.skipped, 1);

    let mut store = DualIndexStore::new();
    let report = store.bulk_load(&dataset.records);
    assert_eq!(report.records, 3);
    assert_eq!(store.len(), 2);

    let read = store.read("AGT");
    assert_eq!(read.ordered.value, Some(Record::new("mouse", "BRCA1 del")));
    assert_eq!(store.read("AAC").hash.value, Some(Record::new("dog", "snp")));
}

#[test]
fn missing_file_is_an_open_error() {
    let tmp = TempDir::new().expect("tmp");
    let path = tmp.path().join("absent.csv");

    let err = loader::load_path(&path).unwrap_err();
    assert!(matches!(err, LoadError::Open { .. }));
    assert!(err.to_string().contains("absent.csv"));
}

#[test]
fn header_only_file_is_an_empty_dataset() {
    let tmp = TempDir::new().expect("tmp");
    let path = tmp.path().join("empty.csv");
    fs::write(&path, "key,species,mutation\n").expect("write");

    let dataset = loader::load_path(&path).expect("load");
    assert!(dataset.is_empty());
    assert_eq!(dataset.skipped, 0);

    let mut store = DualIndexStore::new();
    store.bulk_load(&dataset.records);
    assert!(store.is_empty());
    assert!(store.find_with_fallback("AAC").fallback.is_none());
}

#[test]
fn invalid_utf8_line_is_dropped() {
    let tmp = TempDir::new().expect("tmp");
    let path = tmp.path().join("bad.csv");
    fs::write(&path, b"AAC,human,none\n\xff\xfe,x,y\nTTG,fly,del\n").expect("write");

    let dataset = loader::load_path(&path).expect("load");
    assert_eq!(dataset.len(), 2);
    assert_eq!(dataset.skipped, 1);
    assert_eq!(dataset.records[0], ("AAC".to_string(), Record::new("human", "none")));
    assert_eq!(dataset.records[1], ("TTG".to_string(), Record::new("fly", "del")));
}
