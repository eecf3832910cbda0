//! Data-parallel helpers over slices of ciphertexts.

use crate::errors::PheError;
use crate::spi::{Decryptor, Encryptor, Evaluator, Plaintext};

use rayon::prelude::*;

/// `a[i] + b[i]` for every index, evaluated in parallel.
pub fn add_elementwise<E>(
    evaluator: &E,
    a: &[E::Ciphertext],
    b: &[E::Ciphertext],
) -> Result<Vec<E::Ciphertext>, PheError>
where
    E: Evaluator + Sync,
{
    if a.len() != b.len() {
        return Err(PheError::InvalidParameters(format!(
            "Operand lengths differ: {} vs {}",
            a.len(),
            b.len()
        )));
    }

    a.par_iter()
        .zip(b.par_iter())
        .map(|(x, y)| evaluator.add(x, y))
        .collect()
}

/// Sum of all ciphertexts as a parallel tree reduction.
pub fn sum<E>(evaluator: &E, cts: &[E::Ciphertext]) -> Result<E::Ciphertext, PheError>
where
    E: Evaluator + Sync,
{
    cts.par_iter()
        .cloned()
        .map(Ok::<_, PheError>)
        .try_reduce_with(|acc, ct| evaluator.add(&acc, &ct))
        .unwrap_or_else(|| {
            Err(PheError::InvalidParameters(
                "Cannot sum an empty slice".into(),
            ))
        })
}

pub fn encrypt_all<E>(encryptor: &E, plaintexts: &[Plaintext]) -> Result<Vec<E::Ciphertext>, PheError>
where
    E: Encryptor + Sync,
{
    plaintexts.par_iter().map(|m| encryptor.encrypt(m)).collect()
}

pub fn decrypt_all<D>(decryptor: &D, cts: &[D::Ciphertext]) -> Result<Vec<Plaintext>, PheError>
where
    D: Decryptor + Sync,
{
    cts.par_iter().map(|ct| decryptor.decrypt(ct)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phe::{HeKit, SchemaType};

    use num_bigint::BigInt;

    #[test]
    fn test_elementwise_and_sum() -> Result<(), PheError> {
        let kit = HeKit::generate(SchemaType::Paillier, 512)?;
        let left: Vec<_> = (1..=8).map(BigInt::from).collect();
        let right: Vec<_> = (1..=8).map(|i| BigInt::from(-2 * i)).collect();

        let a = encrypt_all(kit.encryptor(), &left)?;
        let b = encrypt_all(kit.encryptor(), &right)?;

        let sums = add_elementwise(kit.evaluator(), &a, &b)?;
        let expected: Vec<_> = (1..=8).map(|i| BigInt::from(-i)).collect();
        assert_eq!(decrypt_all(kit.decryptor(), &sums)?, expected);

        let total = sum(kit.evaluator(), &a)?;
        assert_eq!(kit.decryptor().decrypt(&total)?, BigInt::from(36));
        Ok(())
    }

    #[test]
    fn test_invalid_inputs() -> Result<(), PheError> {
        let kit = HeKit::generate(SchemaType::Ou, 512)?;
        let a = encrypt_all(kit.encryptor(), &[BigInt::from(1), BigInt::from(2)])?;

        assert!(add_elementwise(kit.evaluator(), &a, &a[..1]).is_err());
        assert!(sum(kit.evaluator(), &[]).is_err());
        Ok(())
    }
}
