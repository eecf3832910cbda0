use crate::elgamal::ciphertext::Ciphertext;
use crate::elgamal::keys::SecretKey;
use crate::errors::PheError;
use crate::spi::{self, Plaintext};

#[derive(Debug, Clone)]
pub struct Decryptor {
    sk: SecretKey,
}

impl Decryptor {
    pub fn new(sk: SecretKey) -> Self {
        Self { sk }
    }

    pub fn secret_key(&self) -> &SecretKey {
        &self.sk
    }
}

impl spi::Decryptor for Decryptor {
    type Ciphertext = Ciphertext;

    /// Computes `M = c2 − x·c1` and searches `m` with `M = m·G`.
    ///
    /// # Errors
    ///
    /// Returns `PheError::Domain` when the result lies outside `[−B, B]`,
    /// which includes sums that overflowed the bound.
    fn decrypt(&self, ciphertext: &Ciphertext) -> Result<Plaintext, PheError> {
        if ciphertext.group().id() != self.sk.group().id() {
            return Err(PheError::Domain(format!(
                "Ciphertext is on {} but the key is on {}",
                ciphertext.group().curve_name(),
                self.sk.group().curve_name()
            )));
        }

        let point = ciphertext.c2() - ciphertext.c1() * self.sk.x();
        self.sk.solve(&point).map(Plaintext::from).ok_or_else(|| {
            PheError::Domain(format!(
                "Decrypted value is outside [-{0}, {0}]",
                self.sk.max_plaintext()
            ))
        })
    }
}
