//! Reversible helix: a keyed 64-bit Feistel permutation
//!
//! The input is split into a high half `L` and a low half `R`, both 32 bits.
//! Each round computes
//!
//! ```text
//! f = rotl64((R * GOLDEN) ^ round_key ^ (round + 1), 13)
//! L = L ^ low32(f)
//! (L, R) = (R, L)
//! ```
//!
//! The round key folds a fixed kappa constant and the chunk angle `theta`
//! into the caller's key. The permutation is cheap and exactly invertible;
//! it is not a cipher.

/// 64-bit golden ratio multiplier
pub const GOLDEN: u64 = 0x9e37_79b9_7f4a_7c15;

/// Default base key
pub const DEFAULT_KEY: u64 = GOLDEN;

/// Default number of rounds
pub const DEFAULT_ROUNDS: u32 = 4;

/// Kappa (0.3536) in 32.32 fixed point
pub const KAPPA_FIXED: u64 = 1_518_700_435;

/// Angle period; theta is the chunk index modulo this
pub const THETA_PERIOD: u64 = 360;

const ROTATION: u32 = 13;

/// Folds kappa and theta into the base key
pub fn round_key(key: u64, theta: u32) -> u64 {
    let theta_fixed = (theta as u64) << 32;
    key ^ theta_fixed ^ KAPPA_FIXED
}

#[inline]
fn round_function(right: u32, round_key: u64, round: u32) -> u32 {
    let f = ((right as u64).wrapping_mul(GOLDEN) ^ round_key ^ (round as u64 + 1))
        .rotate_left(ROTATION);
    f as u32
}

#[inline]
fn split(x: u64) -> (u32, u32) {
    ((x >> 32) as u32, x as u32)
}

#[inline]
fn join(left: u32, right: u32) -> u64 {
    ((left as u64) << 32) | right as u64
}

/// Applies the forward permutation.
pub fn reversible_helix(x: u64, key: u64, rounds: u32, theta: u32) -> u64 {
    let k = round_key(key, theta);
    let (mut left, mut right) = split(x);

    for round in 0..rounds {
        left ^= round_function(right, k, round);
        std::mem::swap(&mut left, &mut right);
    }

    join(left, right)
}

/// Undoes `reversible_helix` for the same key, rounds and theta.
pub fn inverse_helix(y: u64, key: u64, rounds: u32, theta: u32) -> u64 {
    let k = round_key(key, theta);
    let (mut left, mut right) = split(y);

    for round in (0..rounds).rev() {
        std::mem::swap(&mut left, &mut right);
        left ^= round_function(right, k, round);
    }

    join(left, right)
}
