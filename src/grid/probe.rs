//! Per-chunk probe counts
//!
//! Indexed by chunk sequence index, not by slot. Retrieval adds the stored
//! count to the recomputed candidate slot to land on the written slot
//! without searching.

use crate::layout::{CAPACITY, DROPPED_PROBE, PROBE_BYTES};

/// Probe step counts for every chunk index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeTable {
    steps: Vec<u16>,
}

impl Default for ProbeTable {
    fn default() -> Self {
        Self::new()
    }
}

impl ProbeTable {
    /// All-zero table
    pub fn new() -> Self {
        Self {
            steps: vec![0u16; CAPACITY],
        }
    }

    /// Probe count recorded for chunk `index`
    pub fn get(&self, index: usize) -> u16 {
        self.steps[index]
    }

    /// Records the probe count for chunk `index`
    pub fn set(&mut self, index: usize, steps: u16) {
        self.steps[index] = steps;
    }

    /// Marks chunk `index` as dropped at insertion
    pub fn mark_dropped(&mut self, index: usize) {
        self.steps[index] = DROPPED_PROBE;
    }

    /// Whether chunk `index` was dropped at insertion
    pub fn is_dropped(&self, index: usize) -> bool {
        self.steps[index] == DROPPED_PROBE
    }

    /// Resets every entry to zero
    pub fn clear(&mut self) {
        self.steps.fill(0);
    }

    /// Little-endian image, `PROBE_BYTES` long
    pub fn to_le_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(PROBE_BYTES);
        for steps in &self.steps {
            out.extend_from_slice(&steps.to_le_bytes());
        }
        out
    }

    /// Parses a little-endian image. Returns `None` on a size mismatch.
    pub fn from_le_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() != PROBE_BYTES {
            return None;
        }
        let steps = bytes
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
            .collect();
        Some(Self { steps })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_table_is_zero() {
        let table = ProbeTable::new();
        assert!((0..CAPACITY).all(|i| table.get(i) == 0));
    }

    #[test]
    fn test_le_image_layout() {
        let mut table = ProbeTable::new();
        table.set(0, 0x0201);
        table.set(CAPACITY - 1, 7);

        let bytes = table.to_le_bytes();
        assert_eq!(bytes.len(), PROBE_BYTES);
        assert_eq!(&bytes[0..2], &[0x01, 0x02]);
        assert_eq!(&bytes[PROBE_BYTES - 2..], &[7, 0]);
        assert_eq!(ProbeTable::from_le_bytes(&bytes).unwrap(), table);
    }

    #[test]
    fn test_dropped_marker() {
        let mut table = ProbeTable::new();
        table.mark_dropped(9);
        assert!(table.is_dropped(9));
        assert!(!table.is_dropped(8));

        table.clear();
        assert!(!table.is_dropped(9));
    }

    #[test]
    fn test_from_le_bytes_rejects_wrong_size() {
        assert!(ProbeTable::from_le_bytes(&[0u8; 3]).is_none());
    }
}
