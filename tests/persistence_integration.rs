//! Integration tests for snapshot persistence and startup rehydration

mod common;

use common::builders::{RowBuilder, SeriesBuilder, SessionBuilder};
use common::wait_ready;
use data_charts::storage::{FileStorage, MemoryStorage, StorageAdapter};
use data_charts::store::{snapshot, ConfigStore, PersistentStore, SNAPSHOT_NAME};
use data_charts::types::ChartType;
use tempfile::TempDir;

#[test]
fn test_fresh_start_uses_defaults() {
    let storage = MemoryStorage::new();
    let mut store = PersistentStore::open(storage.clone()).unwrap();
    assert!(store.loading());

    wait_ready(&mut store);
    assert_eq!(store.chart_type(), ChartType::Bar);
    assert_eq!(store.axis_key(), Some("x-axis"));
    assert!(store.tooltip());
    assert!(storage.is_empty());
}

#[test]
fn test_restart_restores_session() {
    let storage = MemoryStorage::new();

    {
        let mut store = PersistentStore::open(storage.clone()).unwrap();
        wait_ready(&mut store);
        store.append_series_config(SeriesBuilder::new().series("sales", "#fff").build());
        store.append_row(RowBuilder::new("Q1").value("sales", 42.0).build());
        store.set_chart_type(ChartType::Area);
        store.set_y_hidden(true);
        store.flush().unwrap();
    }

    let mut store = PersistentStore::open(storage).unwrap();
    wait_ready(&mut store);
    assert_eq!(store.chart_type(), ChartType::Area);
    assert!(store.y_hidden());
    assert_eq!(store.rows().len(), 1);
    assert_eq!(store.rows()[0].label, "Q1");
    assert!(store.series_config().unwrap().contains_key("sales"));
}

#[test]
fn test_last_write_wins() {
    let storage = MemoryStorage::new();
    let mut store = PersistentStore::open(storage.clone()).unwrap();
    wait_ready(&mut store);

    for i in 0..50 {
        store.append_row(RowBuilder::new(&format!("r{}", i)).build());
    }
    store.flush().unwrap();

    let saved = snapshot::decode(&storage.get(SNAPSHOT_NAME).unwrap().unwrap()).unwrap();
    assert_eq!(saved.rows.len(), 50);
    assert_eq!(saved.rows[49].label, "r49");
}

#[test]
fn test_corrupt_snapshot_falls_back_to_defaults() {
    let storage = MemoryStorage::new();
    storage.set(SNAPSHOT_NAME, b"{ not json").unwrap();

    let mut store = PersistentStore::open(storage.clone()).unwrap();
    wait_ready(&mut store);
    assert!(store.rows().is_empty());

    // the next mutation overwrites the broken blob
    store.set_labels(true);
    store.flush().unwrap();
    let saved = snapshot::decode(&storage.get(SNAPSHOT_NAME).unwrap().unwrap()).unwrap();
    assert!(saved.labels_enabled);
}

#[test]
fn test_unknown_version_is_discarded() {
    let storage = MemoryStorage::new();
    storage
        .set(SNAPSHOT_NAME, br#"{"version":42,"state":{"chartType":"line"}}"#)
        .unwrap();

    let mut store = PersistentStore::open(storage.clone()).unwrap();
    wait_ready(&mut store);
    assert_eq!(store.chart_type(), ChartType::Bar);

    store.flush().unwrap();
    assert!(storage.get(SNAPSHOT_NAME).unwrap().is_none());
}

#[test]
fn test_discard_snapshot() {
    let storage = MemoryStorage::new();
    let state = SessionBuilder::new().chart_type(ChartType::Line).build();
    storage
        .set(SNAPSHOT_NAME, &snapshot::encode(&state).unwrap())
        .unwrap();

    let mut store = PersistentStore::open(storage.clone()).unwrap();
    wait_ready(&mut store);
    assert_eq!(store.chart_type(), ChartType::Line);

    store.discard_snapshot();
    store.flush().unwrap();
    assert!(storage.is_empty());
    assert_eq!(store.chart_type(), ChartType::Line);
}

#[test]
fn test_file_storage_session_roundtrip() {
    let dir = TempDir::new().unwrap();

    {
        let mut store = PersistentStore::open(FileStorage::new(dir.path())).unwrap();
        wait_ready(&mut store);
        store.append_series_config(SeriesBuilder::new().series("a", "#ff0000").build());
        store.append_row(RowBuilder::new("Mon").value("a", 3.5).build());
        store.flush().unwrap();
    }

    let file = FileStorage::new(dir.path()).path_for(SNAPSHOT_NAME);
    assert!(file.exists());
    assert_eq!(
        file.file_name().and_then(|n| n.to_str()),
        Some("data-charts_config.json")
    );

    let mut store = PersistentStore::open(FileStorage::new(dir.path())).unwrap();
    wait_ready(&mut store);
    common::assert_float_eq(store.rows()[0].value("a").unwrap(), 3.5, 1e-9);
}

#[test]
fn test_loading_flag_not_persisted() {
    let storage = MemoryStorage::new();
    let state = SessionBuilder::new().labels(true).build();
    let bytes = snapshot::encode(&state).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert!(value["state"].get("loading").is_none());

    storage.set(SNAPSHOT_NAME, &bytes).unwrap();
    let mut store = PersistentStore::open(storage).unwrap();
    wait_ready(&mut store);
    assert!(store.labels());
}
