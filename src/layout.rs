//! Fixed geometry of the grid and its on-disk image
//!
//! ```text
//! +--------------------+  offset 0
//! | MasterDigest       |  32 bytes
//! +--------------------+  offset 32
//! | chunk_count        |  u64 LE
//! +--------------------+  offset 40
//! | Grid               |  CAPACITY x SLOT_SIZE bytes, zero = empty
//! +--------------------+  offset 40 + 4 MiB
//! | ProbeTable         |  CAPACITY x u16 LE, by chunk index
//! +--------------------+
//! ```

use crate::digest::DIGEST_LEN;

/// Number of slots in the grid. Must be a power of two.
pub const CAPACITY: usize = 4096;

/// Mask for reducing a mixed value to a slot index
pub const SLOT_MASK: u64 = (CAPACITY as u64) - 1;

/// Bytes per slot, terminator included
pub const SLOT_SIZE: usize = 1024;

/// Largest chunk payload (one byte is reserved for the terminator)
pub const MAX_PAYLOAD: usize = SLOT_SIZE - 1;

/// Probe table sentinel for a chunk that was dropped at insertion.
/// Real probe counts are always below `CAPACITY`.
pub const DROPPED_PROBE: u16 = u16::MAX;

/// Offset of the chunk_count field
pub const COUNT_OFFSET: u64 = DIGEST_LEN as u64;

/// Offset of the grid section
pub const GRID_OFFSET: u64 = COUNT_OFFSET + 8;

/// Size of the grid section in bytes
pub const GRID_BYTES: usize = CAPACITY * SLOT_SIZE;

/// Offset of the probe table section
pub const PROBE_OFFSET: u64 = GRID_OFFSET + GRID_BYTES as u64;

/// Size of the probe table section in bytes
pub const PROBE_BYTES: usize = CAPACITY * 2;

/// Exact size of a grid file
pub const FILE_SIZE: u64 = PROBE_OFFSET + PROBE_BYTES as u64;

const _: () = assert!(CAPACITY.is_power_of_two());
const _: () = assert!(CAPACITY <= DROPPED_PROBE as usize);
