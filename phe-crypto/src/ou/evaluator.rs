use crate::errors::PheError;
use crate::ou::keys::{Ciphertext, PublicKey};
use crate::ring::random::random_bits;
use crate::spi::{self, Plaintext};

use num_bigint::BigUint;

use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct Evaluator {
    pk: Arc<PublicKey>,
}

impl Evaluator {
    pub fn new(pk: Arc<PublicKey>) -> Self {
        Self { pk }
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.pk
    }

    fn operand<'a>(&self, ct: &'a Ciphertext) -> Result<&'a BigUint, PheError> {
        self.pk.check_ciphertext(ct)?;
        Ok(ct.value())
    }
}

impl spi::Evaluator for Evaluator {
    type Ciphertext = Ciphertext;

    fn add(&self, a: &Ciphertext, b: &Ciphertext) -> Result<Ciphertext, PheError> {
        let c = self.pk.n_ring().mul(self.operand(a)?, self.operand(b)?);
        Ok(Ciphertext::new(c))
    }

    fn add_plain(&self, a: &Ciphertext, p: &Plaintext) -> Result<Ciphertext, PheError> {
        let a = self.operand(a)?;
        self.pk.check_plaintext(p)?;

        let gm = self.pk.g_pow(p)?;
        Ok(Ciphertext::new(self.pk.n_ring().mul(a, &gm)))
    }

    fn sub(&self, a: &Ciphertext, b: &Ciphertext) -> Result<Ciphertext, PheError> {
        let ring = self.pk.n_ring();
        let b_inv = ring.inv(self.operand(b)?)?;
        Ok(Ciphertext::new(ring.mul(self.operand(a)?, &b_inv)))
    }

    fn negate(&self, a: &Ciphertext) -> Result<Ciphertext, PheError> {
        Ok(Ciphertext::new(self.pk.n_ring().inv(self.operand(a)?)?))
    }

    fn mul(&self, a: &Ciphertext, p: &Plaintext) -> Result<Ciphertext, PheError> {
        let a = self.operand(a)?;
        self.pk.check_plaintext(p)?;

        Ok(Ciphertext::new(self.pk.n_ring().pow(a, p)?))
    }

    fn randomize(&self, a: &Ciphertext) -> Result<Ciphertext, PheError> {
        let a = self.operand(a)?;
        let blind = self.pk.h_pow(&random_bits(self.pk.random_exponent_bits()));
        Ok(Ciphertext::new(self.pk.n_ring().mul(a, &blind)))
    }
}
