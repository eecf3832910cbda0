use crate::errors::PheError;
use crate::paillier::keys::{Ciphertext, SecretKey};
use crate::ring::l_function;
use crate::spi::{self, Plaintext};

/// Owns the secret key; the only role that can recover plaintexts.
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

    /// `m = L(c^λ mod n²) · μ mod n`, centered into `(−n/2, n/2]`.
    fn decrypt(&self, ciphertext: &Ciphertext) -> Result<Plaintext, PheError> {
        if !self.sk.n_square_ring().contains(ciphertext.value()) {
            return Err(PheError::Domain("Ciphertext must lie in (0, n²)".into()));
        }

        let u = self.sk.pow_mod_n_square_crt(ciphertext.value(), self.sk.lambda());
        let n_ring = self.sk.n_ring();
        let m = n_ring.mul(&l_function(&u, n_ring.modulus()), self.sk.mu());

        Ok(n_ring.center(&m))
    }
}
