//! Retrieval: rebuild content from placement plus probe counts
//!
//! For every chunk index `i` below `chunk_count`, the candidate slot is
//! recomputed and the recorded probe count added:
//!
//! ```text
//! slot(i) = (candidate_slot(i) + probes[i]) mod CAPACITY
//! ```
//!
//! No slot is searched. Probe counts are trusted, not re-validated; an empty
//! slot at the computed position is reported as a missing chunk and
//! retrieval carries on with the next index. Retrieval never mutates state.

use serde::Serialize;

use crate::digest::MasterDigest;
use crate::layout::{CAPACITY, SLOT_MASK};
use crate::observability::{log_event_with_fields, Event};
use crate::placement::{prime_composite_index, Placement};
use crate::store::StoreState;

/// One chunk position in a retrieval
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetrievedChunk {
    /// Payload read back from `slot`
    Recovered {
        index: u64,
        slot: usize,
        payload: Vec<u8>,
    },
    /// Nothing at the probed slot, or the chunk was dropped when stored
    /// (`slot` is `None` then)
    Missing { index: u64, slot: Option<usize> },
}

impl RetrievedChunk {
    /// Sequence index of this chunk
    pub fn index(&self) -> u64 {
        match self {
            RetrievedChunk::Recovered { index, .. } | RetrievedChunk::Missing { index, .. } => {
                *index
            }
        }
    }

    /// Payload, if recovered
    pub fn payload(&self) -> Option<&[u8]> {
        match self {
            RetrievedChunk::Recovered { payload, .. } => Some(payload),
            RetrievedChunk::Missing { .. } => None,
        }
    }
}

/// Ordered result of a retrieval
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Retrieval {
    digest: MasterDigest,
    chunks: Vec<RetrievedChunk>,
}

impl Retrieval {
    /// Digest recorded with the stored content
    pub fn digest(&self) -> &MasterDigest {
        &self.digest
    }

    /// Every chunk position in index order
    pub fn chunks(&self) -> &[RetrievedChunk] {
        &self.chunks
    }

    /// Recovered payloads concatenated in index order
    pub fn content(&self) -> Vec<u8> {
        self.chunks
            .iter()
            .filter_map(RetrievedChunk::payload)
            .flatten()
            .copied()
            .collect()
    }

    /// Indices that could not be recovered
    pub fn missing(&self) -> Vec<u64> {
        self.chunks
            .iter()
            .filter(|c| matches!(c, RetrievedChunk::Missing { .. }))
            .map(RetrievedChunk::index)
            .collect()
    }

    /// Number of recovered chunks
    pub fn recovered_count(&self) -> usize {
        self.chunks.iter().filter(|c| c.payload().is_some()).count()
    }

    /// Whether every chunk below `chunk_count` was recovered.
    ///
    /// Chunks whose index reached `CAPACITY` at store time have no probe
    /// entry and are not counted, so the grid file cannot record them. Such
    /// a store reports them in `StoreOutcome::chunks_dropped` only; a later
    /// retrieval still reports complete.
    pub fn is_complete(&self) -> bool {
        self.recovered_count() == self.chunks.len()
    }
}

/// Slot holding chunk `index`, or `None` if it was dropped when stored.
pub fn locate(state: &StoreState, placement: &Placement, index: u64) -> Option<usize> {
    let i = index as usize;
    if i >= CAPACITY || state.probes().is_dropped(i) {
        return None;
    }
    let candidate = placement.candidate_slot(index);
    let steps = state.probes().get(i) as usize;
    Some((candidate + steps) & SLOT_MASK as usize)
}

/// Reads every chunk of `state` back in index order
pub fn retrieve(state: &StoreState, placement: &Placement) -> Retrieval {
    let count = state.chunk_count();
    log_event_with_fields(Event::RetrieveBegin, &[("chunk_count", &count.to_string())]);

    let mut chunks = Vec::with_capacity(count as usize);
    for index in 0..count {
        let slot = locate(state, placement, index);
        let chunk = match slot.and_then(|s| state.grid().read(s).map(|p| (s, p))) {
            Some((slot, payload)) => RetrievedChunk::Recovered {
                index,
                slot,
                payload: payload.to_vec(),
            },
            None => {
                let slot_str = slot.map_or_else(|| "dropped".to_string(), |s| s.to_string());
                log_event_with_fields(
                    Event::ChunkMissing,
                    &[("chunk_index", &index.to_string()), ("slot", &slot_str)],
                );
                RetrievedChunk::Missing { index, slot }
            }
        };
        chunks.push(chunk);
    }

    let retrieval = Retrieval {
        digest: *state.digest(),
        chunks,
    };
    log_event_with_fields(
        Event::RetrieveComplete,
        &[
            ("missing", &retrieval.missing().len().to_string()),
            ("recovered", &retrieval.recovered_count().to_string()),
        ],
    );
    retrieval
}

/// Where one chunk index was placed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlacementRecord {
    pub index: u64,
    pub seed: u64,
    pub theta: u32,
    pub candidate_slot: usize,
    /// `None` if the chunk was dropped
    pub probes: Option<u16>,
    /// `None` if the chunk was dropped
    pub slot: Option<usize>,
    pub occupied: bool,
}

/// Placement details for every chunk index of `state`
pub fn placements(state: &StoreState, placement: &Placement) -> Vec<PlacementRecord> {
    (0..state.chunk_count())
        .map(|index| {
            let slot = locate(state, placement, index);
            PlacementRecord {
                index,
                seed: prime_composite_index(index),
                theta: Placement::theta(index),
                candidate_slot: placement.candidate_slot(index),
                probes: slot.map(|_| state.probes().get(index as usize)),
                slot,
                occupied: slot.is_some_and(|s| state.grid().is_occupied(s)),
            }
        })
        .collect()
}
