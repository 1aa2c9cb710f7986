//! Grid store: the slot table and its probe table
//!
//! # Invariants
//!
//! - At most `CAPACITY` payloads are resident
//! - A payload never contains a zero byte
//! - For every placed chunk `i`:
//!   `(candidate_slot(i) + probes[i]) mod CAPACITY` is the slot holding it

mod probe;
mod slots;

pub use probe::ProbeTable;
pub use slots::{Grid, InsertOutcome};
