//! Store subsystem for curvegrid
//!
//! Ties chunker, placement, grid, persistence and retrieval together behind
//! one owned `Store`.
//!
//! # Invariants Enforced
//!
//! - Every store operation wipes the grid first (single generation)
//! - The state is saved after every store operation
//! - `chunk_count <= CAPACITY`
//! - Retrieval never mutates the resident state

mod engine;
mod errors;
mod state;

pub use engine::{Phase, Store, StoreOutcome, NOTE};
pub use errors::{StoreError, StoreErrorCode, StoreResult};
pub use state::{ChunkOutcome, DropReason, StoreState};
