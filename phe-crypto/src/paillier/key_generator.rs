use crate::errors::PheError;
use crate::paillier::keys::{PublicKey, SecretKey};
use crate::preset::{MAX_KEYGEN_ATTEMPTS, MIN_KEY_SIZE};
use crate::ring::prime::random_prime;
use crate::ring::random::random_unit;
use crate::spi;

use log::{debug, trace};
use num_bigint::BigUint;
use num_integer::Integer;

/// Paillier key generation.
///
/// p and q are drawn with `⌈k/2⌉` and `⌊k/2⌋` bits and their top two bits set,
/// so n always has exactly `k` bits. Pairs are re-drawn until
/// `gcd(p − 1, q − 1) = 2`.
pub struct KeyGenerator;

impl spi::KeyGenerator for KeyGenerator {
    type SecretKey = SecretKey;
    type PublicKey = PublicKey;

    fn generate(key_size: usize) -> Result<(SecretKey, PublicKey), PheError> {
        if key_size < MIN_KEY_SIZE {
            return Err(PheError::InvalidParameters(format!(
                "Key size {} is below the minimum of {} bits",
                key_size, MIN_KEY_SIZE
            )));
        }

        let p_bits = key_size.div_ceil(2);
        let q_bits = key_size / 2;

        for attempt in 1..=MAX_KEYGEN_ATTEMPTS {
            let p = random_prime(p_bits)?;
            let q = random_prime(q_bits)?;
            if p == q {
                continue;
            }
            if (&p - 1u32).gcd(&(&q - 1u32)) != BigUint::from(2u32) {
                trace!("discarding prime pair, gcd(p - 1, q - 1) != 2");
                continue;
            }

            let sk = SecretKey::from_primes(p, q)?;

            // h = -x² mod n for a random unit x, h_s = h^n mod n²
            let n_ring = sk.n_ring();
            let x = random_unit(n_ring.modulus())?;
            let h = n_ring.neg(&n_ring.mul(&x, &x));
            let h_s = sk.pow_mod_n_square_crt(&h, n_ring.modulus());

            let pk = PublicKey::from_parts(n_ring.modulus().clone(), h_s)?;
            debug!(
                "generated {}-bit Paillier key pair after {} attempt(s)",
                key_size, attempt
            );
            return Ok((sk, pk));
        }

        Err(PheError::KeyGeneration(format!(
            "No suitable Paillier primes after {} attempts",
            MAX_KEYGEN_ATTEMPTS
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spi::KeyGenerator as _;

    #[test]
    fn test_modulus_has_requested_width() -> Result<(), PheError> {
        for key_size in [512, 513, 768] {
            let (sk, pk) = KeyGenerator::generate(key_size)?;
            assert_eq!(pk.key_size(), key_size);
            assert_eq!(pk.n().bits() as usize, key_size);
            assert_eq!(sk.n(), pk.n());
        }
        Ok(())
    }

    #[test]
    fn test_prime_structure() -> Result<(), PheError> {
        let (sk, _) = KeyGenerator::generate(512)?;
        let p_minus_1 = sk.p() - 1u32;
        let q_minus_1 = sk.q() - 1u32;

        assert_ne!(sk.p(), sk.q());
        assert_eq!(p_minus_1.gcd(&q_minus_1), BigUint::from(2u32));
        assert_eq!(sk.lambda(), &(&p_minus_1 * &q_minus_1 / 2u32));
        Ok(())
    }

    #[test]
    fn test_undersized_key_is_rejected() {
        assert!(matches!(
            KeyGenerator::generate(MIN_KEY_SIZE - 1),
            Err(PheError::InvalidParameters(_))
        ));
    }
}
