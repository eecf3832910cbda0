//! Cryptographically secure sampling of big integers.
//!
//! Everything draws from `rand::rng()`, the thread-local CSPRNG that is
//! reseeded from the operating system.

use crate::errors::PheError;
use crate::preset::MAX_RANDOM_ATTEMPTS;

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};
use rand::RngCore;

/// Uniform random integer in `[0, 2^bits)`.
pub fn random_bits(bits: usize) -> BigUint {
    if bits == 0 {
        return BigUint::zero();
    }

    let mut bytes = vec![0u8; bits.div_ceil(8)];
    rand::rng().fill_bytes(&mut bytes);

    let excess = bytes.len() * 8 - bits;
    if let Some(last) = bytes.last_mut() {
        *last &= 0xFF >> excess;
    }

    BigUint::from_bytes_le(&bytes)
}

/// Uniform random integer in `[0, bound)` by rejection sampling.
pub fn random_below(bound: &BigUint) -> Result<BigUint, PheError> {
    if bound.is_zero() {
        return Err(PheError::InvalidParameters(
            "Sampling bound must be positive".to_string(),
        ));
    }

    let bits = bound.bits() as usize;
    for _ in 0..MAX_RANDOM_ATTEMPTS {
        let candidate = random_bits(bits);
        if &candidate < bound {
            return Ok(candidate);
        }
    }

    Err(PheError::RandomnessExhausted(format!(
        "No sample below a {}-bit bound after {} draws",
        bits, MAX_RANDOM_ATTEMPTS
    )))
}

/// Uniform random unit of Z_n, i.e. `x` in `[1, n)` with `gcd(x, n) = 1`.
pub fn random_unit(n: &BigUint) -> Result<BigUint, PheError> {
    for _ in 0..MAX_RANDOM_ATTEMPTS {
        let candidate = random_below(n)?;
        if !candidate.is_zero() && candidate.gcd(n).is_one() {
            return Ok(candidate);
        }
    }

    Err(PheError::RandomnessExhausted(format!(
        "No unit of Z_n found after {} draws",
        MAX_RANDOM_ATTEMPTS
    )))
}

/// 64 uniform random bytes, used for wide reduction into a curve scalar.
pub fn random_wide_bytes() -> [u8; 64] {
    let mut bytes = [0u8; 64];
    rand::rng().fill_bytes(&mut bytes);
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_bits_respects_width() {
        for bits in [1usize, 7, 8, 9, 63, 64, 65, 300] {
            for _ in 0..20 {
                assert!(random_bits(bits).bits() as usize <= bits);
            }
        }
        assert!(random_bits(0).is_zero());
    }

    #[test]
    fn test_random_below() -> Result<(), PheError> {
        let bound = BigUint::from(1000u32);
        for _ in 0..200 {
            assert!(random_below(&bound)? < bound);
        }
        assert!(random_below(&BigUint::zero()).is_err());
        Ok(())
    }

    #[test]
    fn test_random_unit_is_coprime() -> Result<(), PheError> {
        let n = BigUint::from(2u32 * 3 * 5 * 7 * 11 * 13);
        for _ in 0..50 {
            let unit = random_unit(&n)?;
            assert!(unit.gcd(&n).is_one());
        }
        Ok(())
    }

    #[test]
    fn test_wide_bytes_differ() {
        assert_ne!(random_wide_bytes(), random_wide_bytes());
    }
}
