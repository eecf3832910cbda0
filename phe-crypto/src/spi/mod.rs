//! # Scalar SPI
//!
//! Role traits shared by every scheme. Each scheme provides one concrete type
//! per role, so calls on the hot arithmetic path are statically dispatched;
//! [`crate::phe`] layers an enum facade on top for callers that pick the
//! scheme at runtime.
//!
//! Ciphertexts carry no link to the key that produced them. Feeding a
//! ciphertext to the decryptor or evaluator of another key pair is not
//! detected and yields a meaningless plaintext.

use crate::errors::PheError;

use num_bigint::BigInt;

use std::fmt::{Debug, Display};

/// Signed plaintext; every scheme interprets it in a symmetric range `[-B, B]`.
pub type Plaintext = BigInt;

/// Value types (ciphertexts) produced and consumed by the role objects.
pub trait HeObject: Clone + PartialEq + Debug + Display + Send + Sync {}

pub trait KeyGenerator {
    type SecretKey;
    type PublicKey;

    /// Generates a fresh key pair whose modulus has `key_size` bits.
    fn generate(key_size: usize) -> Result<(Self::SecretKey, Self::PublicKey), PheError>;

    /// Generates a key pair of [`crate::preset::DEFAULT_KEY_SIZE`] bits.
    fn generate_default() -> Result<(Self::SecretKey, Self::PublicKey), PheError> {
        Self::generate(crate::preset::DEFAULT_KEY_SIZE)
    }
}

pub trait Encryptor {
    type Ciphertext: HeObject;

    /// Encryption of zero with fresh randomness, used to seed accumulators.
    fn encrypt_zero(&self) -> Result<Self::Ciphertext, PheError>;

    /// Encrypts `plaintext` with fresh randomness.
    ///
    /// # Errors
    ///
    /// Returns `PheError::Domain` if the plaintext exceeds the key's bound.
    fn encrypt(&self, plaintext: &Plaintext) -> Result<Self::Ciphertext, PheError>;

    /// Same as [`Encryptor::encrypt`], additionally returning a JSON record of
    /// the randomness used so the ciphertext can be re-derived externally.
    fn encrypt_with_audit(
        &self,
        plaintext: &Plaintext,
    ) -> Result<(Self::Ciphertext, String), PheError>;
}

pub trait Decryptor {
    type Ciphertext: HeObject;

    fn decrypt(&self, ciphertext: &Self::Ciphertext) -> Result<Plaintext, PheError>;
}

/// Homomorphic operations that only need the public key.
///
/// Value-returning methods borrow their operands; `*_inplace` methods take the
/// first operand by exclusive reference and overwrite it only on success.
pub trait Evaluator {
    type Ciphertext: HeObject;

    fn add(
        &self,
        a: &Self::Ciphertext,
        b: &Self::Ciphertext,
    ) -> Result<Self::Ciphertext, PheError>;

    fn add_plain(&self, a: &Self::Ciphertext, p: &Plaintext)
    -> Result<Self::Ciphertext, PheError>;

    fn sub(
        &self,
        a: &Self::Ciphertext,
        b: &Self::Ciphertext,
    ) -> Result<Self::Ciphertext, PheError>;

    fn negate(&self, a: &Self::Ciphertext) -> Result<Self::Ciphertext, PheError>;

    /// Multiplies the encrypted value by a plaintext scalar.
    fn mul(&self, a: &Self::Ciphertext, p: &Plaintext) -> Result<Self::Ciphertext, PheError>;

    /// Re-blinds a ciphertext without changing the value it encrypts.
    fn randomize(&self, a: &Self::Ciphertext) -> Result<Self::Ciphertext, PheError>;

    fn sub_plain(&self, a: &Self::Ciphertext, p: &Plaintext)
    -> Result<Self::Ciphertext, PheError> {
        self.add_plain(a, &-p)
    }

    fn add_inplace(&self, a: &mut Self::Ciphertext, b: &Self::Ciphertext) -> Result<(), PheError> {
        *a = self.add(a, b)?;
        Ok(())
    }

    fn add_plain_inplace(&self, a: &mut Self::Ciphertext, p: &Plaintext) -> Result<(), PheError> {
        *a = self.add_plain(a, p)?;
        Ok(())
    }

    fn sub_inplace(&self, a: &mut Self::Ciphertext, b: &Self::Ciphertext) -> Result<(), PheError> {
        *a = self.sub(a, b)?;
        Ok(())
    }

    fn sub_plain_inplace(&self, a: &mut Self::Ciphertext, p: &Plaintext) -> Result<(), PheError> {
        *a = self.sub_plain(a, p)?;
        Ok(())
    }

    fn negate_inplace(&self, a: &mut Self::Ciphertext) -> Result<(), PheError> {
        *a = self.negate(a)?;
        Ok(())
    }

    fn mul_inplace(&self, a: &mut Self::Ciphertext, p: &Plaintext) -> Result<(), PheError> {
        *a = self.mul(a, p)?;
        Ok(())
    }

    fn randomize_inplace(&self, a: &mut Self::Ciphertext) -> Result<(), PheError> {
        *a = self.randomize(a)?;
        Ok(())
    }
}
