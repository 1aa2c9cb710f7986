//! Placement Determinism Tests
//!
//! Tests for:
//! - candidate_slot depends only on index, key and rounds
//! - the helix is a bijection for fixed key, rounds and theta
//! - the prime-composite seed for known indices

use curvegrid::layout::CAPACITY;
use curvegrid::placement::{
    inverse_helix, prime_composite_index, reversible_helix, Placement, DEFAULT_KEY,
};
use std::collections::HashSet;

// =============================================================================
// Candidate Slot
// =============================================================================

#[test]
fn test_candidate_slot_is_stable_across_instances() {
    let a = Placement::default();
    let b = Placement::new(DEFAULT_KEY, 4);

    for index in 0..CAPACITY as u64 {
        assert_eq!(a.candidate_slot(index), b.candidate_slot(index));
        assert!(a.candidate_slot(index) < CAPACITY);
    }
}

#[test]
fn test_candidate_slot_depends_on_key_and_rounds() {
    let base = Placement::default();
    let other_key = Placement::new(DEFAULT_KEY ^ 1, 4);
    let other_rounds = Placement::new(DEFAULT_KEY, 5);

    let differs = |p: &Placement| (0..64u64).any(|i| p.candidate_slot(i) != base.candidate_slot(i));
    assert!(differs(&other_key));
    assert!(differs(&other_rounds));
}

#[test]
fn test_theta_cycles_every_360_indices() {
    assert_eq!(Placement::theta(0), 0);
    assert_eq!(Placement::theta(359), 359);
    assert_eq!(Placement::theta(360), 0);
    assert_eq!(Placement::theta(725), 5);
}

// =============================================================================
// Helix Bijection
// =============================================================================

#[test]
fn test_helix_inverts_for_every_theta_sample() {
    let inputs = [0u64, 1, 42, 0xdead_beef, u64::MAX, 1 << 63, 0x0123_4567_89ab_cdef];
    for rounds in [1u32, 4, 16] {
        for theta in [0u32, 1, 180, 359] {
            for &x in &inputs {
                let y = reversible_helix(x, DEFAULT_KEY, rounds, theta);
                assert_eq!(inverse_helix(y, DEFAULT_KEY, rounds, theta), x);
            }
        }
    }
}

#[test]
fn test_placement_unmix_recovers_input() {
    let placement = Placement::default();
    for index in (0..10_000u64).step_by(97) {
        let mixed = placement.mixed(index);
        assert_eq!(
            placement.unmix(index, mixed),
            prime_composite_index(index) ^ index
        );
    }
}

#[test]
fn test_helix_is_injective_on_sample() {
    let mut seen = HashSet::new();
    for x in 0..20_000u64 {
        assert!(seen.insert(reversible_helix(x, DEFAULT_KEY, 4, 7)));
    }
}

// =============================================================================
// Prime-Composite Seed
// =============================================================================

#[test]
fn test_prime_composite_known_values() {
    // Base-5 digits become exponents of 2, 3, 5, 7, ...
    assert_eq!(prime_composite_index(0), 1);
    assert_eq!(prime_composite_index(1), 2);
    assert_eq!(prime_composite_index(4), 16);
    assert_eq!(prime_composite_index(5), 3);
    assert_eq!(prime_composite_index(7), 12);
    assert_eq!(prime_composite_index(30), 15);
}
