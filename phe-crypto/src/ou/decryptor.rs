use crate::errors::PheError;
use crate::ou::keys::{Ciphertext, SecretKey};
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

    /// `m = L_p(c^(p−1) mod p²) · gp_inv mod p`, centered modulo p.
    fn decrypt(&self, ciphertext: &Ciphertext) -> Result<Plaintext, PheError> {
        if !self.sk.n_ring().contains(ciphertext.value()) {
            return Err(PheError::Domain("Ciphertext must lie in (0, n)".into()));
        }

        let p_ring = self.sk.p_ring();
        let m = p_ring.mul(&self.sk.log_p(ciphertext.value()), self.sk.gp_inv());

        Ok(p_ring.center(&m))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ou::{Encryptor, KeyGenerator};
    use crate::spi::{Decryptor as _, Encryptor as _, KeyGenerator as _};

    use num_bigint::{BigInt, BigUint};
    use num_traits::Zero;

    use std::sync::Arc;

    #[test]
    fn test_round_trip_edge_values() -> Result<(), PheError> {
        let (sk, pk) = KeyGenerator::generate(512)?;
        let encryptor = Encryptor::new(Arc::new(pk));
        let decryptor = Decryptor::new(sk);
        let bound = BigInt::from(encryptor.public_key().plaintext_bound().clone());

        for m in [
            BigInt::zero(),
            BigInt::from(1),
            BigInt::from(-1),
            BigInt::from(-123_456_789),
            bound.clone(),
            -bound,
        ] {
            assert_eq!(decryptor.decrypt(&encryptor.encrypt(&m)?)?, m);
        }
        Ok(())
    }

    #[test]
    fn test_out_of_range_ciphertext_is_rejected() -> Result<(), PheError> {
        let (sk, _) = KeyGenerator::generate(512)?;
        let n = sk.n().clone();
        let decryptor = Decryptor::new(sk);

        assert!(decryptor.decrypt(&Ciphertext::new(BigUint::zero())).is_err());
        assert!(decryptor.decrypt(&Ciphertext::new(n)).is_err());
        Ok(())
    }
}
