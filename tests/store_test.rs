//! # Session Store Tests
//!
//! These tests exercise the store operations against a SQLite database in a
//! temporary directory: fresh-id assignment on session creation, the
//! upload round trip, and the independence of the two part tables.
//!
//! ## Running the Tests
//!
//! ```bash
//! cargo test --test store_test
//! ```

use speaking_test_server::store::{create_test_store_in_temporary_file, SessionStore};
use speaking_test_server::Part;
use tempfile::TempDir;

async fn test_store() -> (SessionStore, TempDir) {
    create_test_store_in_temporary_file().await
}

#[tokio::test]
async fn test_create_session_assigns_fresh_id_pairs() {
    let (store, _guard) = test_store().await;

    let first = store.create_session(1730000000.0).await.unwrap();
    assert_eq!(first, (1, 1), "Empty tables should assign id 1 in each");

    let second = store.create_session(1730000060.0).await.unwrap();
    assert_eq!(second, (2, 2), "Counters advance independently per table");
    assert_ne!(first.0, second.0, "Part A ids must be fresh");
    assert_ne!(first.1, second.1, "Part B ids must be fresh");
}

#[tokio::test]
async fn test_part_result_is_none_for_unknown_id() {
    let (store, _guard) = test_store().await;

    assert_eq!(store.part_result(99, Part::A).await.unwrap(), None);
    assert_eq!(store.part_result(99, Part::B).await.unwrap(), None);
}

#[tokio::test]
async fn test_part_result_is_none_before_upload() {
    let (store, _guard) = test_store().await;

    let (id_a, id_b) = store.create_session(1730000000.0).await.unwrap();

    // Rows exist but speechace_json is still NULL
    assert_eq!(store.part_result(id_a, Part::A).await.unwrap(), None);
    assert_eq!(store.part_result(id_b, Part::B).await.unwrap(), None);
}

#[tokio::test]
async fn test_update_then_fetch_round_trips_exactly() {
    let (store, _guard) = test_store().await;

    let (id_a, _id_b) = store.create_session(1730000000.0).await.unwrap();

    // Content that needs SQL escaping must still round trip byte-for-byte
    let json = "{\n    \"text\": \"it's a 'quoted' answer \\\\ with a backslash\",\n    \"score\": 87.5\n}";
    let rows = store
        .update_part(id_a, Part::A, "", "", 1730000123.25, json)
        .await
        .unwrap();
    assert_eq!(rows, 1, "Exactly one row should be updated");

    let stored = store.part_result(id_a, Part::A).await.unwrap();
    assert_eq!(stored.as_deref(), Some(json), "Stored JSON must be exact");
}

#[tokio::test]
async fn test_update_nonexistent_id_reports_zero_rows() {
    let (store, _guard) = test_store().await;

    let rows = store
        .update_part(12345, Part::A, "", "", 1730000123.0, "{}")
        .await
        .unwrap();
    assert_eq!(rows, 0, "No row should match an id that was never created");
}

#[tokio::test]
async fn test_parts_with_equal_ids_are_independent() {
    let (store, _guard) = test_store().await;

    let (id_a, id_b) = store.create_session(1730000000.0).await.unwrap();
    assert_eq!(id_a, id_b, "Fresh tables assign the same numeric id");

    let json_a = "{\"part\": \"A\"}";
    store
        .update_part(id_a, Part::A, "", "", 1730000100.0, json_a)
        .await
        .unwrap();

    // Part B row with the same id must be untouched
    assert_eq!(store.part_result(id_b, Part::B).await.unwrap(), None);

    let json_b = "{\"part\": \"B\"}";
    store
        .update_part(id_b, Part::B, "", "", 1730000200.0, json_b)
        .await
        .unwrap();

    assert_eq!(
        store.part_result(id_a, Part::A).await.unwrap().as_deref(),
        Some(json_a)
    );
    assert_eq!(
        store.part_result(id_b, Part::B).await.unwrap().as_deref(),
        Some(json_b)
    );
}

#[tokio::test]
async fn test_update_is_idempotent_per_row() {
    let (store, _guard) = test_store().await;

    let (id_a, _) = store.create_session(1730000000.0).await.unwrap();

    store
        .update_part(id_a, Part::A, "", "", 1730000100.0, "{\"take\": 1}")
        .await
        .unwrap();
    // A second upload overwrites the first - the row has no history
    store
        .update_part(id_a, Part::A, "", "", 1730000200.0, "{\"take\": 2}")
        .await
        .unwrap();

    assert_eq!(
        store.part_result(id_a, Part::A).await.unwrap().as_deref(),
        Some("{\"take\": 2}")
    );
}
