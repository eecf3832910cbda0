use crate::codec;
use crate::errors::PheError;
use crate::paillier::keys::{Ciphertext, PublicKey};
use crate::ring::helper::signed_to_hex;
use crate::ring::random::random_bits;
use crate::ring::to_hex;
use crate::spi::{self, Plaintext};

use num_bigint::BigUint;
use num_traits::Zero;
use serde::Serialize;

use std::sync::Arc;

/// Randomness used by one encryption, as hex strings.
#[derive(Serialize)]
struct AuditRecord {
    m: String,
    r: String,
    hs_r: String,
    c: String,
}

#[derive(Debug, Clone)]
pub struct Encryptor {
    pk: Arc<PublicKey>,
}

impl Encryptor {
    pub fn new(pk: Arc<PublicKey>) -> Self {
        Self { pk }
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.pk
    }

    /// Encrypts with a caller-supplied blinding exponent `r`.
    ///
    /// `c = (1 + m·n) · h_s^r mod n²`. Deterministic for a fixed `r`, so only
    /// meant for reproducing a ciphertext from an audit record.
    pub fn encrypt_with_randomness(
        &self,
        plaintext: &Plaintext,
        r: &BigUint,
    ) -> Result<Ciphertext, PheError> {
        let (ct, _) = self.encrypt_raw(plaintext, r)?;
        Ok(ct)
    }

    fn encrypt_raw(
        &self,
        plaintext: &Plaintext,
        r: &BigUint,
    ) -> Result<(Ciphertext, BigUint), PheError> {
        self.pk.check_plaintext(plaintext)?;

        let gm = self.pk.encode_plaintext(plaintext);
        let hs_r = self.pk.hs_pow(r);
        let c = self.pk.n_square_ring().mul(&gm, &hs_r);

        Ok((Ciphertext::new(c), hs_r))
    }

    fn fresh_exponent(&self) -> BigUint {
        random_bits(self.pk.random_exponent_bits())
    }
}

impl spi::Encryptor for Encryptor {
    type Ciphertext = Ciphertext;

    fn encrypt_zero(&self) -> Result<Ciphertext, PheError> {
        self.encrypt(&Plaintext::zero())
    }

    fn encrypt(&self, plaintext: &Plaintext) -> Result<Ciphertext, PheError> {
        self.encrypt_with_randomness(plaintext, &self.fresh_exponent())
    }

    fn encrypt_with_audit(&self, plaintext: &Plaintext) -> Result<(Ciphertext, String), PheError> {
        let r = self.fresh_exponent();
        let (ct, hs_r) = self.encrypt_raw(plaintext, &r)?;

        let record = AuditRecord {
            m: signed_to_hex(plaintext),
            r: to_hex(&r),
            hs_r: to_hex(&hs_r),
            c: to_hex(ct.value()),
        };
        Ok((ct, codec::to_json(&record)?))
    }
}
