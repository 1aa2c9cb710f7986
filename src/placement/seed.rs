//! Prime-composite seed derivation
//!
//! The chunk index is read as base-5 digits, least significant first. Digit
//! `k` becomes the exponent of the `k`-th prime and the prime powers are
//! multiplied together. Sequential indices thereby land on unrelated seeds.
//! The map is not injective and does not need to be.

/// Lane primes, one per base-5 digit
pub const PRIMES: [u64; 8] = [2, 3, 5, 7, 11, 13, 17, 19];

/// Largest exponent a lane can take
pub const MAX_EXPONENT: u64 = 4;

/// Derives the placement seed for a chunk index.
///
/// Stops at the first lane whose prime power, or whose product with the
/// running seed, would overflow `u64`, returning the partial product.
pub fn prime_composite_index(index: u64) -> u64 {
    let mut seed: u64 = 1;
    let mut n = index;

    for &prime in PRIMES.iter() {
        if n == 0 {
            break;
        }
        let exponent = n % (MAX_EXPONENT + 1);

        let mut power: u64 = 1;
        for _ in 0..exponent {
            match power.checked_mul(prime) {
                Some(p) => power = p,
                None => return seed,
            }
        }
        match seed.checked_mul(power) {
            Some(s) => seed = s,
            None => return seed,
        }

        n /= MAX_EXPONENT + 1;
    }

    seed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_zero_is_unit() {
        assert_eq!(prime_composite_index(0), 1);
    }

    #[test]
    fn test_single_digit_indices() {
        assert_eq!(prime_composite_index(1), 2);
        assert_eq!(prime_composite_index(2), 4);
        assert_eq!(prime_composite_index(3), 8);
        assert_eq!(prime_composite_index(4), 16);
    }

    #[test]
    fn test_multi_digit_indices() {
        // 5 = (0, 1) in base 5 -> 2^0 * 3^1
        assert_eq!(prime_composite_index(5), 3);
        // 7 = (2, 1) -> 2^2 * 3^1
        assert_eq!(prime_composite_index(7), 12);
        // 30 = (0, 1, 1) -> 3 * 5
        assert_eq!(prime_composite_index(30), 15);
    }

    #[test]
    fn test_digits_beyond_eight_lanes_are_ignored() {
        let lanes = 5u64.pow(8);
        assert_eq!(prime_composite_index(lanes), 1);
        assert_eq!(prime_composite_index(lanes + 3), prime_composite_index(3));
    }

    #[test]
    fn test_all_max_digits_do_not_panic() {
        // Every lane at exponent 4: 2^4 * 3^4 * ... * 19^4 overflows u64.
        let index = 5u64.pow(8) - 1;
        let seed = prime_composite_index(index);

        // The partial product stops before the overflowing lane.
        let mut expected: u64 = 1;
        for &p in PRIMES.iter() {
            match expected.checked_mul(p.pow(4)) {
                Some(v) => expected = v,
                None => break,
            }
        }
        assert_eq!(seed, expected);
    }

    #[test]
    fn test_deterministic() {
        for i in 0..1000 {
            assert_eq!(prime_composite_index(i), prime_composite_index(i));
        }
    }
}
