//! The owned store
//!
//! One `Store` per process, passed by reference to every operation. It holds
//! the configuration, the placement function and the resident StoreState.
//!
//! Lifecycle:
//!
//! ```text
//! Unloaded -> Loaded(outcome) -> Populated -> Persisted
//!     \___________________________/^
//! ```
//!
//! A store operation does not need the previous content, so it may start
//! from `Unloaded`. Retrieval loads lazily and never advances the phase.

use std::fs;
use std::path::Path;

use crate::chunker::Chunker;
use crate::config::StoreConfig;
use crate::digest::{digest, digest_tagged, MasterDigest};
use crate::observability::{log_event_with_fields, Event, Logger, Severity};
use crate::persistence::{self, LoadOutcome};
use crate::placement::Placement;
use crate::retrieval::{self, PlacementRecord, Retrieval};

use super::errors::{StoreError, StoreResult};
use super::state::{ChunkOutcome, StoreState};

/// Built-in note stored by `store_note`
pub const NOTE: &str = "To whoever finds this\u{2014}\n\
This line was folded into a curve.\n\
A place where text isn't stored,\n\
it's remembered.\n\
So if you're reading it,\n\
that means you didn't break it.\n\
You didn't lose it.\n\
And somewhere,\n\
a heart that wrote it\n\
is smiling.";

/// Where the resident state came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nothing read from disk yet
    Unloaded,
    /// Read from disk (possibly reset on corruption)
    Loaded(LoadOutcome),
    /// Re-populated in memory, not yet saved
    Populated,
    /// Written to disk
    Persisted,
}

/// Result of a store operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreOutcome {
    /// Whole-input fingerprint
    pub digest: MasterDigest,
    /// Chunks written to the grid
    pub chunks_stored: u64,
    /// Chunks not written (grid full, zero bytes, no probe entry)
    pub chunks_dropped: u64,
}

/// Content-addressed chunk store bound to one grid file
#[derive(Debug)]
pub struct Store {
    config: StoreConfig,
    placement: Placement,
    state: StoreState,
    phase: Phase,
}

impl Store {
    /// Creates a store without touching disk
    pub fn new(config: StoreConfig) -> Self {
        let placement = config.placement();
        Self {
            config,
            placement,
            state: StoreState::empty(),
            phase: Phase::Unloaded,
        }
    }

    /// Creates a store and loads its grid file
    pub fn open(config: StoreConfig) -> StoreResult<Self> {
        let mut store = Self::new(config);
        store.load()?;
        Ok(store)
    }

    /// Configuration in use
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Placement function in use
    pub fn placement(&self) -> &Placement {
        &self.placement
    }

    /// Resident state
    pub fn state(&self) -> &StoreState {
        &self.state
    }

    /// Lifecycle phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Digest of the resident content
    pub fn master_digest(&self) -> &MasterDigest {
        self.state.digest()
    }

    /// Chunk count of the resident content
    pub fn chunk_count(&self) -> u64 {
        self.state.chunk_count()
    }

    /// Replaces the resident state with the grid file's content
    pub fn load(&mut self) -> StoreResult<LoadOutcome> {
        let (state, outcome) = persistence::load(&self.config.grid_path)?;
        self.state = state;
        self.phase = Phase::Loaded(outcome);
        Ok(outcome)
    }

    /// Loads the grid file unless a state is already resident
    pub fn ensure_loaded(&mut self) -> StoreResult<()> {
        if self.phase == Phase::Unloaded {
            self.load()?;
        }
        Ok(())
    }

    /// Writes the resident state to the grid file
    pub fn save(&mut self) -> StoreResult<()> {
        persistence::save(&self.config.grid_path, &self.state, self.config.sync_on_save)?;
        self.phase = Phase::Persisted;
        Ok(())
    }

    /// Wipes the grid and stores `content` as a literal.
    ///
    /// The digest covers `content` alone.
    pub fn reset_and_store(&mut self, content: &[u8]) -> StoreResult<StoreOutcome> {
        self.populate(digest(content), Chunker::literal(content), "literal")
    }

    /// Wipes the grid and stores the file at `path`.
    ///
    /// The digest covers the raw file bytes; chunks have `\r` removed.
    pub fn store_file(&mut self, path: &Path) -> StoreResult<StoreOutcome> {
        let bytes = fs::read(path).map_err(|e| StoreError::read_failed(path, e))?;
        self.populate(digest(&bytes), Chunker::file(&bytes), "file")
    }

    /// Wipes the grid and stores `text` under `type_tag`.
    ///
    /// The digest covers `type_tag` followed by `text`.
    pub fn store_literal(&mut self, text: &[u8], type_tag: &str) -> StoreResult<StoreOutcome> {
        self.populate(digest_tagged(type_tag, text), Chunker::literal(text), type_tag)
    }

    /// Wipes the grid and stores the built-in note
    pub fn store_note(&mut self) -> StoreResult<StoreOutcome> {
        self.reset_and_store(NOTE.as_bytes())
    }

    fn populate(
        &mut self,
        master: MasterDigest,
        chunker: Chunker<'_>,
        source: &str,
    ) -> StoreResult<StoreOutcome> {
        log_event_with_fields(
            Event::StoreBegin,
            &[
                ("grid_path", &self.config.grid_path.display().to_string()),
                ("source", source),
            ],
        );

        self.state.reset();
        self.state.set_digest(master);

        let mut chunks_stored = 0u64;
        let mut chunks_dropped = 0u64;

        for chunk in chunker {
            match self.state.insert(&chunk, &self.placement) {
                ChunkOutcome::Placed { slot, probes } => {
                    chunks_stored += 1;
                    if Logger::enabled(Severity::Trace) {
                        log_event_with_fields(
                            Event::ChunkPlaced,
                            &[
                                ("chunk_index", &chunk.index.to_string()),
                                ("probes", &probes.to_string()),
                                ("slot", &slot.to_string()),
                            ],
                        );
                    }
                }
                ChunkOutcome::Dropped(reason) => {
                    chunks_dropped += 1;
                    log_event_with_fields(
                        reason.event(),
                        &[
                            ("candidate_slot", &self.placement.candidate_slot(chunk.index).to_string()),
                            ("chunk_index", &chunk.index.to_string()),
                            ("reason", reason.as_str()),
                        ],
                    );
                }
            }
        }
        self.phase = Phase::Populated;

        self.save()?;

        let outcome = StoreOutcome {
            digest: master,
            chunks_stored,
            chunks_dropped,
        };
        log_event_with_fields(
            Event::StoreComplete,
            &[
                ("chunks_dropped", &chunks_dropped.to_string()),
                ("chunks_stored", &chunks_stored.to_string()),
                ("digest", &master.to_hex()),
            ],
        );
        Ok(outcome)
    }

    /// Reads the resident content back in chunk order.
    ///
    /// Loads the grid file first if nothing is resident.
    pub fn retrieve(&mut self) -> StoreResult<Retrieval> {
        self.ensure_loaded()?;
        Ok(retrieval::retrieve(&self.state, &self.placement))
    }

    /// Like `retrieve`, but only if the resident digest equals `expected`
    pub fn retrieve_verified(&mut self, expected: &MasterDigest) -> StoreResult<Retrieval> {
        self.ensure_loaded()?;
        let actual = *self.state.digest();
        if actual != *expected {
            log_event_with_fields(
                Event::DigestMismatch,
                &[("expected", &expected.to_hex()), ("stored", &actual.to_hex())],
            );
            return Err(StoreError::digest_mismatch(expected, &actual));
        }
        Ok(retrieval::retrieve(&self.state, &self.placement))
    }

    /// Placement details of every resident chunk
    pub fn placements(&mut self) -> StoreResult<Vec<PlacementRecord>> {
        self.ensure_loaded()?;
        Ok(retrieval::placements(&self.state, &self.placement))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{CAPACITY, MAX_PAYLOAD};
    use tempfile::TempDir;

    fn temp_store(temp_dir: &TempDir) -> Store {
        let mut config = StoreConfig::with_grid_path(temp_dir.path().join("curve.grid"));
        config.sync_on_save = false;
        Store::new(config)
    }

    #[test]
    fn test_note_is_one_chunk_with_known_digest() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = temp_store(&temp_dir);

        let outcome = store.store_note().unwrap();
        assert_eq!(NOTE.len(), 235);
        assert_eq!(outcome.chunks_stored, 1);
        assert_eq!(
            outcome.digest.to_hex(),
            "d833c000ca8293dd4e61c3b4e4f44c61f74f62f9c2ae71ba16af6be96d6f4ca1"
        );
    }

    #[test]
    fn test_phase_transitions() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = temp_store(&temp_dir);
        assert_eq!(store.phase(), Phase::Unloaded);

        store.reset_and_store(b"abc").unwrap();
        assert_eq!(store.phase(), Phase::Persisted);

        // Retrieval of a resident state does not reload or advance
        store.retrieve().unwrap();
        assert_eq!(store.phase(), Phase::Persisted);
    }

    #[test]
    fn test_retrieve_loads_lazily() {
        let temp_dir = TempDir::new().unwrap();
        temp_store(&temp_dir).reset_and_store(b"persisted text").unwrap();

        let mut fresh = temp_store(&temp_dir);
        let retrieval = fresh.retrieve().unwrap();
        assert_eq!(fresh.phase(), Phase::Loaded(LoadOutcome::Loaded { chunk_count: 1 }));
        assert_eq!(retrieval.content(), b"persisted text");
    }

    #[test]
    fn test_store_replaces_previous_content() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = temp_store(&temp_dir);

        store.reset_and_store(&vec![b'o'; 3000]).unwrap();
        store.reset_and_store(b"new").unwrap();

        assert_eq!(store.chunk_count(), 1);
        assert_eq!(store.state().grid().occupied_count(), 1);
        assert_eq!(store.retrieve().unwrap().content(), b"new");
    }

    #[test]
    fn test_store_literal_digest_includes_tag() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = temp_store(&temp_dir);

        let outcome = store.store_literal(b"{\"close\":2}", "candles").unwrap();
        assert_eq!(outcome.digest, digest(b"candles{\"close\":2}"));
    }

    #[test]
    fn test_store_file_missing_input() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = temp_store(&temp_dir);

        let err = store.store_file(&temp_dir.path().join("absent.txt")).unwrap_err();
        assert_eq!(err.code().code(), "CURVE_STORE_READ_FAILED");
        assert_eq!(store.phase(), Phase::Unloaded);
    }

    #[test]
    fn test_retrieve_verified_rejects_other_digest() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = temp_store(&temp_dir);
        let outcome = store.reset_and_store(b"content").unwrap();

        assert!(store.retrieve_verified(&outcome.digest).is_ok());
        let err = store.retrieve_verified(&digest(b"other")).unwrap_err();
        assert_eq!(err.code().code(), "CURVE_DIGEST_MISMATCH");
    }

    #[test]
    fn test_nul_chunk_counted_as_dropped() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = temp_store(&temp_dir);

        let mut content = vec![b'a'; 1023];
        content.push(0);
        content.extend_from_slice(b"rest");

        let outcome = store.reset_and_store(&content).unwrap();
        assert_eq!(outcome.chunks_stored, 1);
        assert_eq!(outcome.chunks_dropped, 1);

        let retrieval = store.retrieve().unwrap();
        assert_eq!(retrieval.missing(), vec![1]);
    }

    #[test]
    fn test_failed_save_keeps_new_state_resident() {
        let temp_dir = TempDir::new().unwrap();
        let grid_path = temp_dir.path().join("curve.grid");
        std::fs::create_dir(&grid_path).unwrap();
        let mut store = temp_store(&temp_dir);

        let err = store.reset_and_store(b"unsaved").unwrap_err();
        assert_eq!(err.code().code(), "CURVE_STORE_WRITE_FAILED");
        assert_eq!(store.phase(), Phase::Populated);
        assert_eq!(store.chunk_count(), 1);

        // Resident state is served without touching the unreadable path
        assert_eq!(store.retrieve().unwrap().content(), b"unsaved");
        assert_eq!(store.phase(), Phase::Populated);

        std::fs::remove_dir(&grid_path).unwrap();
        store.save().unwrap();
        assert_eq!(store.phase(), Phase::Persisted);

        let mut reopened = temp_store(&temp_dir);
        assert_eq!(reopened.retrieve().unwrap().content(), b"unsaved");
    }

    #[test]
    fn test_window_beyond_capacity_is_dropped() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = temp_store(&temp_dir);
        let content = vec![b'w'; MAX_PAYLOAD * (CAPACITY + 1)];

        let outcome = store.reset_and_store(&content).unwrap();
        assert_eq!(outcome.chunks_stored, CAPACITY as u64);
        assert_eq!(outcome.chunks_dropped, 1);
        assert_eq!(store.chunk_count(), CAPACITY as u64);

        // The last window leaves no trace in the state
        let retrieval = store.retrieve().unwrap();
        assert!(retrieval.is_complete());
        assert_eq!(retrieval.content().len(), MAX_PAYLOAD * CAPACITY);
    }
}
