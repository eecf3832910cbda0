use crate::errors::PheError;
use crate::ou::keys::{PublicKey, SecretKey};
use crate::preset::{MAX_KEYGEN_ATTEMPTS, MIN_KEY_SIZE};
use crate::ring::{Ring, l_function};
use crate::ring::prime::random_prime;
use crate::ring::random::random_unit;
use crate::spi;

use log::{debug, trace};
use num_traits::One;

/// Okamoto–Uchiyama key generation: `n = p²q` of exactly `k` bits, with p of
/// `⌈k/3⌉` bits and q taking the remaining `k − 2⌈k/3⌉`.
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

        let p_bits = key_size.div_ceil(3);
        let q_bits = key_size - 2 * p_bits;
        for attempt in 1..=MAX_KEYGEN_ATTEMPTS {
            let p = random_prime(p_bits)?;
            let q = random_prime(q_bits)?;
            if p == q {
                continue;
            }

            let p_ring = Ring::try_with(p.clone())?;
            let p_square = Ring::try_with(&p * &p)?;
            let n = Ring::try_with(p_square.modulus() * &q)?;
            // p²q lands on k or k − 1 bits
            if n.modulus().bits() != key_size as u64 {
                trace!("discarding {}-bit OU modulus", n.modulus().bits());
                continue;
            }
            let p_minus_1 = &p - 1u32;

            // G must have order divisible by p in (Z/p²Z)*
            let g = random_unit(n.modulus())?;
            let gp = p_square.reduce(&g).modpow(&p_minus_1, p_square.modulus());
            if gp.is_one() {
                trace!("discarding OU generator with trivial p-component");
                continue;
            }
            let gp_inv = p_ring.inv(&l_function(&gp, &p))?;
            let h = g.modpow(n.modulus(), n.modulus());

            let sk = SecretKey::from_parts(p, q, gp_inv)?;
            let pk = PublicKey::from_parts(n.modulus().clone(), g, h)?;
            debug!(
                "generated {}-bit OU key pair after {} attempt(s)",
                pk.key_size(),
                attempt
            );
            return Ok((sk, pk));
        }

        Err(PheError::KeyGeneration(format!(
            "No suitable OU parameters after {} attempts",
            MAX_KEYGEN_ATTEMPTS
        )))
    }
}
