//! Observable events for curvegrid
//!
//! Every line the logger writes names one of these events.

use std::fmt;

use super::logger::Severity;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Configuration
    /// Configuration loaded and validated
    ConfigLoaded,

    // Store path
    /// Store operation begins (grid wiped)
    StoreBegin,
    /// A chunk was written to a slot
    ChunkPlaced,
    /// No free slot within one full wrap; chunk dropped
    GridFull,
    /// Payload contains a zero byte and cannot be represented; chunk dropped
    ChunkRejectedNul,
    /// Chunk index has no probe table entry; chunk dropped
    ChunkBeyondCapacity,
    /// Store operation complete
    StoreComplete,

    // Persistence
    /// Grid file loaded
    GridLoaded,
    /// No grid file present; starting empty
    GridLoadEmpty,
    /// Persisted chunk_count was implausible; state discarded
    GridResetCorruptCount,
    /// Grid file shorter than the fixed layout; state discarded
    GridResetTruncated,
    /// Grid file written and synced
    GridSaved,

    // Retrieval
    /// Retrieval begins
    RetrieveBegin,
    /// Expected chunk not found at its probed slot
    ChunkMissing,
    /// Retrieval complete
    RetrieveComplete,
    /// Persisted digest does not match the requested one
    DigestMismatch,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",

            Event::StoreBegin => "STORE_BEGIN",
            Event::ChunkPlaced => "CHUNK_PLACED",
            Event::GridFull => "GRID_FULL",
            Event::ChunkRejectedNul => "CHUNK_REJECTED_NUL",
            Event::ChunkBeyondCapacity => "CHUNK_BEYOND_CAPACITY",
            Event::StoreComplete => "STORE_COMPLETE",

            Event::GridLoaded => "GRID_LOADED",
            Event::GridLoadEmpty => "GRID_LOAD_EMPTY",
            Event::GridResetCorruptCount => "GRID_RESET_CORRUPT_COUNT",
            Event::GridResetTruncated => "GRID_RESET_TRUNCATED",
            Event::GridSaved => "GRID_SAVED",

            Event::RetrieveBegin => "RETRIEVE_BEGIN",
            Event::ChunkMissing => "CHUNK_MISSING",
            Event::RetrieveComplete => "RETRIEVE_COMPLETE",
            Event::DigestMismatch => "DIGEST_MISMATCH",
        }
    }

    /// Severity this event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::ChunkPlaced => Severity::Trace,
            Event::GridFull
            | Event::ChunkRejectedNul
            | Event::ChunkBeyondCapacity
            | Event::GridResetCorruptCount
            | Event::GridResetTruncated
            | Event::ChunkMissing => Severity::Warn,
            Event::DigestMismatch => Severity::Error,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
