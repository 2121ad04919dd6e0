//! Commit lifecycle against the SQLite backend, including reopen.

#![cfg(feature = "sqlite")]

mod common;

use common::rows;
use querylog_engine::features::query::Query;
use querylog_engine::shared::models::LogItem;
use querylog_storage::{KeyValueStore, SqliteStore, QUERIES_DOMAIN};
use tempfile::TempDir;

const TEXT: &str = "SELECT name FROM kernel_modules";

fn commit(store: &SqliteStore, epoch: u64, values: &[&str]) -> LogItem {
    let query = Query::new("modules", TEXT, store);
    let mut item = LogItem::new("modules", "host-1", epoch);
    query
        .add_new_results(rows("name", values), &mut item, true)
        .unwrap();
    item
}

#[test]
fn test_state_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("querylog.db");

    {
        let store = SqliteStore::open(&path).unwrap();
        assert_eq!(commit(&store, 1, &["ext4", "nf_tables"]).counter, 1);
        assert_eq!(commit(&store, 1, &["ext4"]).counter, 2);
    }

    let store = SqliteStore::open(&path).unwrap();
    let query = Query::new("modules", TEXT, &store);
    assert!(!query.is_new_query().unwrap());
    assert_eq!(query.get_previous_epoch().unwrap(), Some(1));
    assert_eq!(query.get_current_results().unwrap(), rows("name", &["ext4"]));

    let item = commit(&store, 1, &["ext4", "vfat"]);
    assert_eq!(item.results.added, rows("name", &["vfat"]));
    assert_eq!(item.counter, 3);
}

#[test]
fn test_epoch_rollover_on_sqlite() {
    let store = SqliteStore::in_memory().unwrap();
    commit(&store, 1, &["ext4"]);
    commit(&store, 1, &["ext4", "btrfs"]);

    let rolled = commit(&store, 2, &["btrfs"]);
    assert_eq!(rolled.previous_remaining.removed, rows("name", &["ext4"]));
    assert_eq!(rolled.previous_remaining_counter, 3);
    assert_eq!(rolled.counter, 0);
    assert_eq!(
        store.get(QUERIES_DOMAIN, "modulesepoch").unwrap().as_deref(),
        Some("2")
    );
}

#[test]
fn test_stored_names_on_sqlite() {
    let store = SqliteStore::in_memory().unwrap();
    for name in ["pack_b", "pack_a"] {
        let query = Query::new(name, TEXT, &store);
        let mut item = LogItem::new(name, "host-1", 1);
        query.add_new_results(rows("name", &["x"]), &mut item, true).unwrap();
    }
    assert_eq!(
        Query::get_stored_query_names(&store).unwrap(),
        vec!["pack_a", "pack_b"]
    );
}
