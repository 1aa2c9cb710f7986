//! Placement: chunk index -> candidate slot
//!
//! Placement is a pure function of the chunk's sequence index and the
//! configured key and round count. Nothing about the mapping is stored; the
//! retrieval path recomputes it.
//!
//! ```text
//! seed      = prime_composite_index(index)
//! mixed     = reversible_helix(seed ^ index, key, rounds, index % 360)
//! candidate = mixed & (CAPACITY - 1)
//! ```

mod helix;
mod seed;

pub use helix::{
    inverse_helix, reversible_helix, round_key, DEFAULT_KEY, DEFAULT_ROUNDS, GOLDEN,
    KAPPA_FIXED, THETA_PERIOD,
};
pub use seed::{prime_composite_index, MAX_EXPONENT, PRIMES};

use crate::layout::SLOT_MASK;

/// Keyed placement function
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    key: u64,
    rounds: u32,
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            key: DEFAULT_KEY,
            rounds: DEFAULT_ROUNDS,
        }
    }
}

impl Placement {
    /// Placement with an explicit key and round count
    pub fn new(key: u64, rounds: u32) -> Self {
        Self { key, rounds }
    }

    /// Base key
    pub fn key(&self) -> u64 {
        self.key
    }

    /// Feistel round count
    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    /// Angle in whole degrees for a chunk index
    pub fn theta(index: u64) -> u32 {
        (index % THETA_PERIOD) as u32
    }

    /// Mixed 64-bit value for a chunk index
    pub fn mixed(&self, index: u64) -> u64 {
        let seed = prime_composite_index(index);
        reversible_helix(seed ^ index, self.key, self.rounds, Self::theta(index))
    }

    /// Candidate slot for a chunk index
    pub fn candidate_slot(&self, index: u64) -> usize {
        (self.mixed(index) & SLOT_MASK) as usize
    }

    /// Recovers `seed ^ index` from a mixed value
    pub fn unmix(&self, index: u64, mixed: u64) -> u64 {
        inverse_helix(mixed, self.key, self.rounds, Self::theta(index))
    }
}
