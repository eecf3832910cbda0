use crate::elgamal::ciphertext::Ciphertext;
use crate::elgamal::keys::{PublicKey, random_scalar};
use crate::errors::PheError;
use crate::spi::{self, Plaintext};

use std::sync::Arc;

/// Componentwise point arithmetic on `(c1, c2)`.
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

    fn operand<'a>(&self, ct: &'a Ciphertext) -> Result<&'a Ciphertext, PheError> {
        self.pk.check_group(ct.group())?;
        Ok(ct)
    }
}

impl spi::Evaluator for Evaluator {
    type Ciphertext = Ciphertext;

    fn add(&self, a: &Ciphertext, b: &Ciphertext) -> Result<Ciphertext, PheError> {
        let (a, b) = (self.operand(a)?, self.operand(b)?);
        Ok(Ciphertext::new(
            a.group().clone(),
            a.c1() + b.c1(),
            a.c2() + b.c2(),
        ))
    }

    fn add_plain(&self, a: &Ciphertext, p: &Plaintext) -> Result<Ciphertext, PheError> {
        let a = self.operand(a)?;
        let m = self.pk.plaintext_scalar(p)?;
        Ok(Ciphertext::new(
            a.group().clone(),
            *a.c1(),
            a.c2() + a.group().mul_base(&m),
        ))
    }

    fn sub(&self, a: &Ciphertext, b: &Ciphertext) -> Result<Ciphertext, PheError> {
        let (a, b) = (self.operand(a)?, self.operand(b)?);
        Ok(Ciphertext::new(
            a.group().clone(),
            a.c1() - b.c1(),
            a.c2() - b.c2(),
        ))
    }

    fn negate(&self, a: &Ciphertext) -> Result<Ciphertext, PheError> {
        let a = self.operand(a)?;
        Ok(Ciphertext::new(a.group().clone(), -a.c1(), -a.c2()))
    }

    /// `(k·c1, k·c2)`; `k = 0` gives the pair of identity points.
    fn mul(&self, a: &Ciphertext, p: &Plaintext) -> Result<Ciphertext, PheError> {
        let a = self.operand(a)?;
        let k = self.pk.plaintext_scalar(p)?;
        Ok(Ciphertext::new(a.group().clone(), a.c1() * k, a.c2() * k))
    }

    fn randomize(&self, a: &Ciphertext) -> Result<Ciphertext, PheError> {
        let a = self.operand(a)?;
        let r = random_scalar();
        Ok(Ciphertext::new(
            a.group().clone(),
            a.c1() + a.group().mul_base(&r),
            a.c2() + self.pk.y() * r,
        ))
    }
}
