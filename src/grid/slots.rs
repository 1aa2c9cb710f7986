//! Slot table with linear-probe insertion
//!
//! The grid is one heap buffer of `CAPACITY * SLOT_SIZE` bytes allocated once.
//! Occupancy is tracked in a separate bitmap. In the persisted image an empty
//! slot is all zero, so a loaded grid rebuilds the bitmap from the first byte
//! of each slot; payloads containing a zero byte are refused for that reason.

use crate::layout::{CAPACITY, GRID_BYTES, MAX_PAYLOAD, SLOT_MASK, SLOT_SIZE};

/// Result of a single insertion attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// Written at `slot` after `probes` linear-probe steps
    Placed { slot: usize, probes: u16 },
    /// Every slot is occupied; nothing was written
    GridFull,
    /// Payload contains a zero byte (or is empty) and was not written
    RejectedNul,
}

impl InsertOutcome {
    /// Whether the payload was written
    pub fn is_placed(&self) -> bool {
        matches!(self, InsertOutcome::Placed { .. })
    }
}

/// Fixed-capacity slot table
#[derive(Clone, PartialEq, Eq)]
pub struct Grid {
    bytes: Vec<u8>,
    occupied: Vec<bool>,
}

impl std::fmt::Debug for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Grid")
            .field("capacity", &CAPACITY)
            .field("occupied", &self.occupied_count())
            .finish()
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl Grid {
    /// Creates an empty grid
    pub fn new() -> Self {
        Self {
            bytes: vec![0u8; GRID_BYTES],
            occupied: vec![false; CAPACITY],
        }
    }

    /// Rebuilds a grid from its raw image.
    ///
    /// Returns `None` if `bytes` is not exactly `GRID_BYTES` long.
    pub fn from_bytes(bytes: Vec<u8>) -> Option<Self> {
        if bytes.len() != GRID_BYTES {
            return None;
        }
        let occupied = bytes.chunks_exact(SLOT_SIZE).map(|slot| slot[0] != 0).collect();
        Some(Self { bytes, occupied })
    }

    /// Raw image, `GRID_BYTES` long
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Wipes every slot
    pub fn clear(&mut self) {
        self.bytes.fill(0);
        self.occupied.fill(false);
    }

    /// Whether `slot` holds a payload
    pub fn is_occupied(&self, slot: usize) -> bool {
        self.occupied[slot & SLOT_MASK as usize]
    }

    /// Number of occupied slots
    pub fn occupied_count(&self) -> usize {
        self.occupied.iter().filter(|&&o| o).count()
    }

    /// Payload stored at `slot`, up to its terminator
    pub fn read(&self, slot: usize) -> Option<&[u8]> {
        let slot = slot & SLOT_MASK as usize;
        if !self.occupied[slot] {
            return None;
        }
        let cell = &self.bytes[slot * SLOT_SIZE..(slot + 1) * SLOT_SIZE];
        let end = cell.iter().position(|&b| b == 0).unwrap_or(SLOT_SIZE);
        Some(&cell[..end])
    }

    fn write(&mut self, slot: usize, payload: &[u8]) {
        let cell = &mut self.bytes[slot * SLOT_SIZE..(slot + 1) * SLOT_SIZE];
        cell.fill(0);
        cell[..payload.len()].copy_from_slice(payload);
        self.occupied[slot] = true;
    }

    /// Inserts `payload` at `candidate` or the next free slot after it.
    ///
    /// Steps `slot = (slot + 1) mod CAPACITY` until a free slot is found or
    /// the search wraps back to `candidate`. The returned probe count
    /// satisfies `(candidate + probes) mod CAPACITY == slot`.
    pub fn probe_insert(&mut self, payload: &[u8], candidate: usize) -> InsertOutcome {
        debug_assert!(payload.len() <= MAX_PAYLOAD);
        if payload.is_empty() || payload.contains(&0) {
            return InsertOutcome::RejectedNul;
        }

        let candidate = candidate & SLOT_MASK as usize;
        let mut slot = candidate;
        let mut probes: u16 = 0;

        while self.occupied[slot] {
            slot = (slot + 1) & SLOT_MASK as usize;
            probes += 1;
            if slot == candidate {
                return InsertOutcome::GridFull;
            }
        }

        self.write(slot, payload);
        InsertOutcome::Placed { slot, probes }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_into_empty_slot() {
        let mut grid = Grid::new();
        let outcome = grid.probe_insert(b"payload", 10);

        assert_eq!(outcome, InsertOutcome::Placed { slot: 10, probes: 0 });
        assert_eq!(grid.read(10), Some(&b"payload"[..]));
        assert_eq!(grid.occupied_count(), 1);
    }

    #[test]
    fn test_collision_probes_forward() {
        let mut grid = Grid::new();
        grid.probe_insert(b"first", 10);
        grid.probe_insert(b"second", 11);

        let outcome = grid.probe_insert(b"third", 10);
        assert_eq!(outcome, InsertOutcome::Placed { slot: 12, probes: 2 });
    }

    #[test]
    fn test_probe_wraps_past_last_slot() {
        let mut grid = Grid::new();
        let last = CAPACITY - 1;
        grid.probe_insert(b"a", last);

        let outcome = grid.probe_insert(b"b", last);
        assert_eq!(outcome, InsertOutcome::Placed { slot: 0, probes: 1 });
    }

    #[test]
    fn test_full_grid_rejects_insert() {
        let mut grid = Grid::new();
        for _ in 0..CAPACITY {
            assert!(grid.probe_insert(b"x", 0).is_placed());
        }
        assert_eq!(grid.probe_insert(b"overflow", 0), InsertOutcome::GridFull);
        assert_eq!(grid.occupied_count(), CAPACITY);
    }

    #[test]
    fn test_zero_bytes_are_rejected() {
        let mut grid = Grid::new();
        assert_eq!(grid.probe_insert(b"\0lead", 3), InsertOutcome::RejectedNul);
        assert_eq!(grid.probe_insert(b"mid\0dle", 3), InsertOutcome::RejectedNul);
        assert_eq!(grid.probe_insert(b"", 3), InsertOutcome::RejectedNul);
        assert!(!grid.is_occupied(3));
    }

    #[test]
    fn test_max_payload_keeps_terminator() {
        let mut grid = Grid::new();
        let payload = vec![b'q'; MAX_PAYLOAD];
        grid.probe_insert(&payload, 0);
        grid.probe_insert(b"neighbour", 1);

        assert_eq!(grid.read(0).unwrap().len(), MAX_PAYLOAD);
        assert_eq!(grid.read(1), Some(&b"neighbour"[..]));
    }

    #[test]
    fn test_from_bytes_rebuilds_occupancy() {
        let mut grid = Grid::new();
        grid.probe_insert(b"kept", 42);
        grid.probe_insert(b"also", 4000);

        let rebuilt = Grid::from_bytes(grid.as_bytes().to_vec()).unwrap();
        assert_eq!(rebuilt, grid);
        assert!(rebuilt.is_occupied(42));
        assert!(!rebuilt.is_occupied(43));
    }

    #[test]
    fn test_from_bytes_rejects_wrong_size() {
        assert!(Grid::from_bytes(vec![0u8; 16]).is_none());
    }

    #[test]
    fn test_clear_wipes_everything() {
        let mut grid = Grid::new();
        grid.probe_insert(b"gone", 5);
        grid.clear();
        assert_eq!(grid.occupied_count(), 0);
        assert!(grid.as_bytes().iter().all(|&b| b == 0));
    }
}
