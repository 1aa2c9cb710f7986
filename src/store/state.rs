//! StoreState: the unit of persistence
//!
//! (MasterDigest, chunk_count, Grid, ProbeTable). `chunk_count` is the number
//! of chunk indices assigned by the last store, dropped chunks included, and
//! never exceeds `CAPACITY`.

use crate::chunker::Chunk;
use crate::digest::MasterDigest;
use crate::grid::{Grid, InsertOutcome, ProbeTable};
use crate::layout::CAPACITY;
use crate::observability::Event;
use crate::placement::Placement;

/// Why a chunk was not written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    /// No free slot within one full wrap
    GridFull,
    /// Payload contains a zero byte
    EmbeddedNul,
    /// Index has no probe table entry
    IndexBeyondCapacity,
}

impl DropReason {
    /// Short label used in log fields
    pub fn as_str(&self) -> &'static str {
        match self {
            DropReason::GridFull => "grid_full",
            DropReason::EmbeddedNul => "embedded_nul",
            DropReason::IndexBeyondCapacity => "index_beyond_capacity",
        }
    }

    /// Event logged when a chunk is dropped for this reason
    pub fn event(&self) -> Event {
        match self {
            DropReason::GridFull => Event::GridFull,
            DropReason::EmbeddedNul => Event::ChunkRejectedNul,
            DropReason::IndexBeyondCapacity => Event::ChunkBeyondCapacity,
        }
    }
}

/// Result of inserting one chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkOutcome {
    /// Written at `slot` after `probes` steps
    Placed { slot: usize, probes: u16 },
    /// Not written
    Dropped(DropReason),
}

/// Digest, chunk count, grid and probe table
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StoreState {
    digest: MasterDigest,
    chunk_count: u64,
    grid: Grid,
    probes: ProbeTable,
}

impl StoreState {
    /// Zeroed state
    pub fn empty() -> Self {
        Self::default()
    }

    /// Assembles a state from loaded parts. `chunk_count` must not exceed
    /// `CAPACITY`.
    pub(crate) fn from_parts(
        digest: MasterDigest,
        chunk_count: u64,
        grid: Grid,
        probes: ProbeTable,
    ) -> Self {
        debug_assert!(chunk_count <= CAPACITY as u64);
        Self {
            digest,
            chunk_count,
            grid,
            probes,
        }
    }

    /// Wipes grid and probe table and zeroes count and digest
    pub fn reset(&mut self) {
        self.digest = MasterDigest::ZERO;
        self.chunk_count = 0;
        self.grid.clear();
        self.probes.clear();
    }

    /// Whole-input fingerprint of the last store
    pub fn digest(&self) -> &MasterDigest {
        &self.digest
    }

    /// Sets the whole-input fingerprint
    pub fn set_digest(&mut self, digest: MasterDigest) {
        self.digest = digest;
    }

    /// Number of chunk indices assigned
    pub fn chunk_count(&self) -> u64 {
        self.chunk_count
    }

    /// The slot table
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The probe table
    pub fn probes(&self) -> &ProbeTable {
        &self.probes
    }

    /// Whether no chunk is recorded
    pub fn is_empty(&self) -> bool {
        self.chunk_count == 0
    }

    /// Places `chunk` at its computed candidate slot
    pub fn insert(&mut self, chunk: &Chunk, placement: &Placement) -> ChunkOutcome {
        let candidate = placement.candidate_slot(chunk.index);
        self.insert_at(chunk, candidate)
    }

    /// Places `chunk` starting the probe at `candidate`.
    ///
    /// Chunks must arrive in index order. The probe count, or the dropped
    /// marker, is recorded at the chunk's index.
    pub fn insert_at(&mut self, chunk: &Chunk, candidate: usize) -> ChunkOutcome {
        let index = chunk.index as usize;
        if index >= CAPACITY {
            return ChunkOutcome::Dropped(DropReason::IndexBeyondCapacity);
        }
        self.chunk_count = self.chunk_count.max(chunk.index + 1);

        match self.grid.probe_insert(&chunk.payload, candidate) {
            InsertOutcome::Placed { slot, probes } => {
                self.probes.set(index, probes);
                ChunkOutcome::Placed { slot, probes }
            }
            InsertOutcome::GridFull => {
                self.probes.mark_dropped(index);
                ChunkOutcome::Dropped(DropReason::GridFull)
            }
            InsertOutcome::RejectedNul => {
                self.probes.mark_dropped(index);
                ChunkOutcome::Dropped(DropReason::EmbeddedNul)
            }
        }
    }
}
