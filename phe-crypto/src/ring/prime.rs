//! Random prime generation for key material.

use crate::errors::PheError;
use crate::preset::MAX_PRIME_CANDIDATES;
use crate::preset::small_primes::SMALL_PRIMES;
use crate::ring::random::random_bits;

use log::debug;
use num_bigint::BigUint;
use num_prime::PrimalityTestConfig;
use num_prime::nt_funcs::is_prime;
use num_traits::{ToPrimitive, Zero};

/// Smallest prime width accepted by [`random_prime`].
pub const MIN_PRIME_BITS: usize = 16;

/// Probabilistic primality test (BPSW) on top of a small-prime sieve.
pub fn is_probable_prime(candidate: &BigUint) -> bool {
    if candidate < &BigUint::from(2u32) {
        return false;
    }
    if !candidate.bit(0) {
        return candidate == &BigUint::from(2u32);
    }
    if !passes_sieve(candidate) {
        return false;
    }

    is_prime(candidate, Some(PrimalityTestConfig::default())).probably()
}

/// Generates a random prime of exactly `bits` bits whose two top bits are set.
///
/// Setting both top bits guarantees that the product of two such primes of
/// widths `a` and `b` has exactly `a + b` bits.
pub fn random_prime(bits: usize) -> Result<BigUint, PheError> {
    if bits < MIN_PRIME_BITS {
        return Err(PheError::InvalidParameters(format!(
            "Prime width must be at least {} bits, got {}",
            MIN_PRIME_BITS, bits
        )));
    }

    for attempt in 1..=MAX_PRIME_CANDIDATES {
        let mut candidate = random_bits(bits);
        candidate.set_bit(bits as u64 - 1, true);
        candidate.set_bit(bits as u64 - 2, true);
        candidate.set_bit(0, true);

        if is_probable_prime(&candidate) {
            debug!("found {}-bit prime after {} candidates", bits, attempt);
            return Ok(candidate);
        }
    }

    Err(PheError::KeyGeneration(format!(
        "No {}-bit prime found after {} candidates",
        bits, MAX_PRIME_CANDIDATES
    )))
}

/// Returns false when `candidate` has a small odd prime factor other than itself.
fn passes_sieve(candidate: &BigUint) -> bool {
    let small = candidate.to_u32();

    for &p in SMALL_PRIMES.iter() {
        if small == Some(p) {
            return true;
        }
        if (candidate % p).is_zero() {
            return false;
        }
    }

    true
}
