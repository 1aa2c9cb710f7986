//! Store Round-Trip Tests
//!
//! Tests for:
//! - retrieve(store(x)) == x when nothing is dropped
//! - content survives a fresh Store on the same grid file
//! - digest rules for plain, tagged and file stores

use curvegrid::config::StoreConfig;
use curvegrid::digest::{digest, digest_tagged};
use curvegrid::layout::MAX_PAYLOAD;
use curvegrid::persistence::LoadOutcome;
use curvegrid::retrieval::RetrievedChunk;
use curvegrid::store::{Phase, Store, NOTE};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

// =============================================================================
// Test Utilities
// =============================================================================

fn open_store(dir: &Path) -> Store {
    let mut config = StoreConfig::with_grid_path(dir.join("curve.grid"));
    config.sync_on_save = false;
    Store::new(config)
}

fn text_of_len(len: usize) -> Vec<u8> {
    (0..len).map(|i| b"abcdefghij klmnop\n"[i % 18]).collect()
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn test_short_literal_is_one_chunk_at_candidate() {
    let temp_dir = TempDir::new().unwrap();
    let mut store = open_store(temp_dir.path());
    let content = text_of_len(370);

    let outcome = store.reset_and_store(&content).unwrap();
    assert_eq!(outcome.chunks_stored, 1);
    assert_eq!(outcome.chunks_dropped, 0);
    assert_eq!(outcome.digest, digest(&content));
    assert_eq!(store.state().probes().get(0), 0);

    let retrieval = store.retrieve().unwrap();
    let expected_slot = store.placement().candidate_slot(0);
    match &retrieval.chunks()[0] {
        RetrievedChunk::Recovered { slot, payload, .. } => {
            assert_eq!(*slot, expected_slot);
            assert_eq!(payload, &content);
        }
        other => panic!("expected recovered chunk, got {:?}", other),
    }
}

#[test]
fn test_multi_chunk_round_trip_across_stores() {
    let temp_dir = TempDir::new().unwrap();
    let content = text_of_len(MAX_PAYLOAD * 7 + 11);

    {
        let mut store = open_store(temp_dir.path());
        let outcome = store.reset_and_store(&content).unwrap();
        assert_eq!(outcome.chunks_stored, 8);
    }

    let mut store = open_store(temp_dir.path());
    let retrieval = store.retrieve().unwrap();
    assert_eq!(store.phase(), Phase::Loaded(LoadOutcome::Loaded { chunk_count: 8 }));
    assert!(retrieval.is_complete());
    assert_eq!(retrieval.content(), content);
    assert_eq!(retrieval.digest(), &digest(&content));
}

#[test]
fn test_exact_window_multiple_has_no_empty_tail() {
    let temp_dir = TempDir::new().unwrap();
    let mut store = open_store(temp_dir.path());

    let outcome = store.reset_and_store(&text_of_len(MAX_PAYLOAD * 2)).unwrap();
    assert_eq!(outcome.chunks_stored, 2);
    assert_eq!(store.chunk_count(), 2);
}

#[test]
fn test_store_file_strips_carriage_returns() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("notes.txt");
    let raw = b"first line\r\nsecond line\r\n".to_vec();
    fs::write(&input, &raw).unwrap();

    let mut store = open_store(temp_dir.path());
    let outcome = store.store_file(&input).unwrap();

    // Digest covers the bytes on disk, content loses the CRs
    assert_eq!(outcome.digest, digest(&raw));
    assert_eq!(store.retrieve().unwrap().content(), b"first line\nsecond line\n");
}

#[test]
fn test_tagged_literal_digest() {
    let temp_dir = TempDir::new().unwrap();
    let mut store = open_store(temp_dir.path());
    let text = br#"{"open":1.0,"close":1.2}"#;

    let outcome = store.store_literal(text, "candles").unwrap();
    assert_eq!(outcome.digest, digest_tagged("candles", text));
    assert_ne!(outcome.digest, digest(text));
    assert_eq!(store.retrieve().unwrap().content(), text);
}

#[test]
fn test_note_round_trip_and_verify() {
    let temp_dir = TempDir::new().unwrap();
    let outcome = open_store(temp_dir.path()).store_note().unwrap();
    assert_eq!(
        outcome.digest.to_hex(),
        "d833c000ca8293dd4e61c3b4e4f44c61f74f62f9c2ae71ba16af6be96d6f4ca1"
    );

    let mut store = open_store(temp_dir.path());
    let retrieval = store.retrieve_verified(&outcome.digest).unwrap();
    assert_eq!(retrieval.content(), NOTE.as_bytes());
}

#[test]
fn test_retrieve_without_grid_file_is_empty() {
    let temp_dir = TempDir::new().unwrap();
    let mut store = open_store(temp_dir.path());

    let retrieval = store.retrieve().unwrap();
    assert!(retrieval.content().is_empty());
    assert!(retrieval.digest().is_zero());
    assert!(!temp_dir.path().join("curve.grid").exists());
}

#[test]
fn test_open_loads_immediately() {
    let temp_dir = TempDir::new().unwrap();
    open_store(temp_dir.path()).reset_and_store(b"eager").unwrap();

    let config = StoreConfig::with_grid_path(temp_dir.path().join("curve.grid"));
    let store = Store::open(config).unwrap();
    assert_eq!(store.chunk_count(), 1);
    assert_eq!(store.master_digest(), &digest(b"eager"));
}
