use crate::codec::{self, bytes_to_hex};
use crate::elgamal::ciphertext::Ciphertext;
use crate::elgamal::keys::{PublicKey, random_scalar};
use crate::errors::PheError;
use crate::ring::helper::signed_to_hex;
use crate::spi::{self, Plaintext};

use curve25519_dalek::scalar::Scalar;
use num_traits::Zero;
use serde::Serialize;

use std::sync::Arc;

#[derive(Serialize)]
struct AuditRecord {
    m: String,
    r: String,
    c1: String,
    c2: String,
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

    /// `(r·G, m·G + r·Y)` with a caller-supplied `r`.
    pub fn encrypt_with_randomness(
        &self,
        plaintext: &Plaintext,
        r: &Scalar,
    ) -> Result<Ciphertext, PheError> {
        let m = self.pk.plaintext_scalar(plaintext)?;
        let group = self.pk.group();

        let c1 = group.mul_base(r);
        let c2 = group.mul_base(&m) + self.pk.y() * r;
        Ok(Ciphertext::new(group.clone(), c1, c2))
    }
}

impl spi::Encryptor for Encryptor {
    type Ciphertext = Ciphertext;

    fn encrypt_zero(&self) -> Result<Ciphertext, PheError> {
        self.encrypt(&Plaintext::zero())
    }

    fn encrypt(&self, plaintext: &Plaintext) -> Result<Ciphertext, PheError> {
        self.encrypt_with_randomness(plaintext, &random_scalar())
    }

    fn encrypt_with_audit(&self, plaintext: &Plaintext) -> Result<(Ciphertext, String), PheError> {
        let r = random_scalar();
        let ct = self.encrypt_with_randomness(plaintext, &r)?;

        let group = ct.group();
        let record = AuditRecord {
            m: signed_to_hex(plaintext),
            r: bytes_to_hex(r.as_bytes()),
            c1: group.point_to_hex(ct.c1()),
            c2: group.point_to_hex(ct.c2()),
        };
        Ok((ct, codec::to_json(&record)?))
    }
}
