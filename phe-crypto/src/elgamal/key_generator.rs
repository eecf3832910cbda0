use crate::elgamal::curve::EcGroup;
use crate::elgamal::keys::{PublicKey, SecretKey, random_scalar};
use crate::errors::PheError;
use crate::preset::{DEFAULT_EC_MAX_PLAINTEXT, DEFAULT_EC_TABLE_BITS, MAX_RANDOM_ATTEMPTS};
use crate::spi;

use curve25519_dalek::scalar::Scalar;
use log::debug;

use std::sync::Arc;

pub struct KeyGenerator;

impl KeyGenerator {
    /// Draws `x` and derives `Y = x·G` on `group`, with plaintexts bounded by
    /// `max_plaintext` and a decryption table of `2^table_bits` entries.
    pub fn generate_with(
        group: Arc<EcGroup>,
        max_plaintext: u64,
        table_bits: u32,
    ) -> Result<(SecretKey, PublicKey), PheError> {
        for _ in 0..MAX_RANDOM_ATTEMPTS {
            let x = random_scalar();
            if x == Scalar::ZERO {
                continue;
            }

            let sk = SecretKey::from_parts(group, x, max_plaintext, table_bits)?;
            let pk = sk.public_key()?;
            debug!(
                "generated EC-ElGamal key pair on {} (B = {}, t = {})",
                sk.group().curve_name(),
                max_plaintext,
                table_bits
            );
            return Ok((sk, pk));
        }

        Err(PheError::RandomnessExhausted(
            "No non-zero scalar drawn".into(),
        ))
    }
}

impl spi::KeyGenerator for KeyGenerator {
    type SecretKey = SecretKey;
    type PublicKey = PublicKey;

    /// The curve fixes the group order, so `key_size` is not used; keys are
    /// generated on ristretto255 with the default bound and table size.
    fn generate(key_size: usize) -> Result<(SecretKey, PublicKey), PheError> {
        debug!("EC-ElGamal ignores key size {}", key_size);
        Self::generate_with(
            Arc::new(EcGroup::ristretto255()),
            DEFAULT_EC_MAX_PLAINTEXT,
            DEFAULT_EC_TABLE_BITS,
        )
    }
}
