use crate::codec;
use crate::errors::PheError;
use crate::ou::keys::{Ciphertext, PublicKey};
use crate::ring::helper::signed_to_hex;
use crate::ring::random::random_bits;
use crate::ring::to_hex;
use crate::spi::{self, Plaintext};

use num_bigint::BigUint;
use num_traits::Zero;
use serde::Serialize;

use std::sync::Arc;

#[derive(Serialize)]
struct AuditRecord {
    m: String,
    r: String,
    h_r: String,
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

    /// `c = G^m · H^r mod n` with a caller-supplied `r`.
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

        let gm = self.pk.g_pow(plaintext)?;
        let h_r = self.pk.h_pow(r);
        let c = self.pk.n_ring().mul(&gm, &h_r);

        Ok((Ciphertext::new(c), h_r))
    }
}

impl spi::Encryptor for Encryptor {
    type Ciphertext = Ciphertext;

    fn encrypt_zero(&self) -> Result<Ciphertext, PheError> {
        self.encrypt(&Plaintext::zero())
    }

    fn encrypt(&self, plaintext: &Plaintext) -> Result<Ciphertext, PheError> {
        let r = random_bits(self.pk.random_exponent_bits());
        self.encrypt_with_randomness(plaintext, &r)
    }

    fn encrypt_with_audit(&self, plaintext: &Plaintext) -> Result<(Ciphertext, String), PheError> {
        let r = random_bits(self.pk.random_exponent_bits());
        let (ct, h_r) = self.encrypt_raw(plaintext, &r)?;

        let record = AuditRecord {
            m: signed_to_hex(plaintext),
            r: to_hex(&r),
            h_r: to_hex(&h_r),
            c: to_hex(ct.value()),
        };
        Ok((ct, codec::to_json(&record)?))
    }
}
