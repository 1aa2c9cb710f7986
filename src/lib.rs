//! curvegrid - A content-addressed chunk store on a fixed 4096-slot grid
//!
//! Content is cut into chunks, each placed in one slot of a fixed grid by a
//! keyed permutation of its index, with linear probing on collision. A
//! probe table records the steps taken so retrieval never searches. The
//! grid, the probe table, the chunk count and a SHA-256 digest of the input
//! persist as one fixed-size file.

pub mod chunker;
pub mod cli;
pub mod config;
pub mod digest;
pub mod grid;
pub mod layout;
pub mod observability;
pub mod persistence;
pub mod placement;
pub mod retrieval;
pub mod store;
