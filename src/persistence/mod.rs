//! Persistence of the store to a single grid file
//!
//! The file is a flat image with no framing or padding; see `crate::layout`
//! for offsets. This is the only bit-exact contract of the crate.
//!
//! # Guarantees
//!
//! - Every save rewrites the whole image and fsyncs it
//! - `load(save(S)) == S` for any state S
//! - Implausible or short files load as an empty state and are reported
//!
//! # Limitations
//!
//! - No locking: two processes on one file race
//! - A save interrupted by a crash may leave a short or mixed file; only the
//!   short case is detected

mod reader;
mod writer;

pub use reader::{load, LoadOutcome};
pub use writer::{encode, save};
