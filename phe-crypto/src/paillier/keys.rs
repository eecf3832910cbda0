use crate::codec;
use crate::errors::PheError;
use crate::preset::MIN_KEY_SIZE;
use crate::ring::prime::is_probable_prime;
use crate::ring::{FixedBaseTable, Ring, lcm, to_hex};
use crate::spi::{HeObject, Plaintext};

use log::warn;
use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// A Paillier ciphertext: one residue modulo n².
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ciphertext {
    pub(crate) c: BigUint,
}

impl Ciphertext {
    pub fn new(c: BigUint) -> Self {
        Self { c }
    }

    pub fn value(&self) -> &BigUint {
        &self.c
    }

    /// A single length-prefixed big integer.
    pub fn to_bytes(&self) -> Result<Vec<u8>, PheError> {
        codec::to_bytes(&self.c)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PheError> {
        Ok(Self::new(codec::from_bytes(bytes)?))
    }
}

impl fmt::Display for Ciphertext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&to_hex(&self.c))
    }
}

impl HeObject for Ciphertext {}

/// Paillier secret key.
///
/// Only `(p, q, λ, μ)` are persisted; everything else is re-derived by
/// [`SecretKey::from_parts`] and never changes afterwards.
#[derive(Debug, Clone)]
pub struct SecretKey {
    p: BigUint,
    q: BigUint,
    /// λ = lcm(p − 1, q − 1)
    lambda: BigUint,
    /// μ = λ⁻¹ mod n
    mu: BigUint,

    n: Ring,
    p_square: Ring,
    q_square: Ring,
    n_square: Ring,
    /// (q²)⁻¹ mod p² · q², which is 1 mod p² and 0 mod q²
    q_square_inv_mul_q_square: BigUint,
    /// φ(p²) = p(p − 1)
    phi_p_square: BigUint,
    /// φ(q²) = q(q − 1)
    phi_q_square: BigUint,
}

impl SecretKey {
    /// Builds a secret key from its primes, computing λ and μ.
    pub fn from_primes(p: BigUint, q: BigUint) -> Result<Self, PheError> {
        if p.is_zero() || q.is_zero() {
            return Err(PheError::KeyState("Primes p and q must be non-zero".into()));
        }

        let lambda = lcm(&(&p - 1u32), &(&q - 1u32));
        let n = &p * &q;
        let mu = lambda
            .modinv(&n)
            .ok_or_else(|| PheError::KeyState("λ is not invertible modulo n".into()))?;

        Self::from_parts(p, q, lambda, mu)
    }

    /// Validated factory: checks the persisted fields and derives every cached one.
    ///
    /// # Errors
    ///
    /// Returns `PheError::KeyState` if p or q is zero or not a probable prime,
    /// if p = q, if n is shorter than [`MIN_KEY_SIZE`] bits, or if λ/μ do not
    /// belong to (p, q).
    pub fn from_parts(
        p: BigUint,
        q: BigUint,
        lambda: BigUint,
        mu: BigUint,
    ) -> Result<Self, PheError> {
        if p.is_zero() || q.is_zero() {
            return Err(PheError::KeyState("Primes p and q must be non-zero".into()));
        }
        if p == q {
            return Err(PheError::KeyState("Primes p and q must differ".into()));
        }
        if !is_probable_prime(&p) || !is_probable_prime(&q) {
            warn!("rejected Paillier secret key with composite factor");
            return Err(PheError::KeyState("p and q must be prime".into()));
        }

        let n = &p * &q;
        if (n.bits() as usize) < MIN_KEY_SIZE {
            return Err(PheError::KeyState(format!(
                "Modulus has {} bits, at least {} required",
                n.bits(),
                MIN_KEY_SIZE
            )));
        }
        if lambda != lcm(&(&p - 1u32), &(&q - 1u32)) {
            return Err(PheError::KeyState("λ must equal lcm(p - 1, q - 1)".into()));
        }
        if !((&lambda * &mu) % &n).is_one() {
            return Err(PheError::KeyState("μ must be the inverse of λ mod n".into()));
        }

        let p_square = Ring::try_with(&p * &p)?;
        let q_square = Ring::try_with(&q * &q)?;
        let n_square = Ring::try_with(&n * &n)?;
        let q_square_inv = q_square.modulus().modinv(p_square.modulus()).ok_or_else(|| {
            PheError::KeyState("q² is not invertible modulo p²".into())
        })?;
        let q_square_inv_mul_q_square = q_square_inv * q_square.modulus();
        let phi_p_square = &p * (&p - 1u32);
        let phi_q_square = &q * (&q - 1u32);

        Ok(Self {
            p,
            q,
            lambda,
            mu,
            n: Ring::try_with(n)?,
            p_square,
            q_square,
            n_square,
            q_square_inv_mul_q_square,
            phi_p_square,
            phi_q_square,
        })
    }

    pub fn p(&self) -> &BigUint {
        &self.p
    }

    pub fn q(&self) -> &BigUint {
        &self.q
    }

    pub fn lambda(&self) -> &BigUint {
        &self.lambda
    }

    pub fn mu(&self) -> &BigUint {
        &self.mu
    }

    pub fn n(&self) -> &BigUint {
        self.n.modulus()
    }

    pub fn n_square(&self) -> &BigUint {
        self.n_square.modulus()
    }

    pub(crate) fn n_ring(&self) -> &Ring {
        &self.n
    }

    pub(crate) fn n_square_ring(&self) -> &Ring {
        &self.n_square
    }

    /// `base^exp mod n²` through two half-width exponentiations mod p² and
    /// mod q², recombined with the CRT.
    pub fn pow_mod_n_square_crt(&self, base: &BigUint, exp: &BigUint) -> BigUint {
        let exp_p = exp % &self.phi_p_square;
        let exp_q = exp % &self.phi_q_square;

        let mp = self.p_square.reduce(base).modpow(&exp_p, self.p_square.modulus());
        let mq = self.q_square.reduce(base).modpow(&exp_q, self.q_square.modulus());

        // x = mq + (mp - mq) * q²·(q²⁻¹ mod p²)
        let diff = self.n_square.sub(&mp, &mq);
        let lifted = self.n_square.mul(&diff, &self.q_square_inv_mul_q_square);
        self.n_square.add(&mq, &lifted)
    }

    /// Exactly `(p, q, λ, μ)`, each a length-prefixed big integer.
    pub fn to_bytes(&self) -> Result<Vec<u8>, PheError> {
        codec::to_bytes(&(&self.p, &self.q, &self.lambda, &self.mu))
    }

    pub fn load_from(bytes: &[u8]) -> Result<Self, PheError> {
        let (p, q, lambda, mu): (BigUint, BigUint, BigUint, BigUint) = codec::from_bytes(bytes)?;
        Self::from_parts(p, q, lambda, mu)
    }

    pub fn list_params(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            ("p".to_string(), self.p.to_string()),
            ("q".to_string(), self.q.to_string()),
            ("lambda".to_string(), self.lambda.to_string()),
            ("mu".to_string(), self.mu.to_string()),
        ])
    }
}

/// Paillier public key.
///
/// Only `(n, h_s)` are persisted. `h_s = h^n mod n²` for a secret unit
/// `h = −x²`, so `h_s^r` is an n-th residue usable as the blinding factor.
#[derive(Debug, Clone)]
pub struct PublicKey {
    n: Ring,
    h_s: BigUint,
    n_square: Ring,
    key_size: usize,
    hs_table: Arc<FixedBaseTable>,
}

impl PublicKey {
    /// Validated factory deriving n², n/2 and the fixed-base table of `h_s`.
    pub fn from_parts(n: BigUint, h_s: BigUint) -> Result<Self, PheError> {
        if n.is_zero() {
            return Err(PheError::KeyState("Modulus n must be non-zero".into()));
        }
        if n.is_even() {
            return Err(PheError::KeyState("Modulus n must be odd".into()));
        }
        let key_size = n.bits() as usize;
        if key_size < MIN_KEY_SIZE {
            return Err(PheError::KeyState(format!(
                "Modulus has {} bits, at least {} required",
                key_size, MIN_KEY_SIZE
            )));
        }

        let n_square = Ring::try_with(&n * &n)?;
        if !n_square.contains(&h_s) || !h_s.gcd(&n).is_one() {
            warn!("rejected Paillier public key with invalid h_s");
            return Err(PheError::KeyState("h_s must be a unit modulo n²".into()));
        }

        let hs_table = FixedBaseTable::new(&h_s, &n_square, key_size.div_ceil(2));

        Ok(Self {
            n: Ring::try_with(n)?,
            h_s,
            n_square,
            key_size,
            hs_table: Arc::new(hs_table),
        })
    }

    pub fn n(&self) -> &BigUint {
        self.n.modulus()
    }

    pub fn h_s(&self) -> &BigUint {
        &self.h_s
    }

    pub fn n_square(&self) -> &BigUint {
        self.n_square.modulus()
    }

    pub fn key_size(&self) -> usize {
        self.key_size
    }

    /// Valid plaintexts satisfy `|m| <= n / 2`.
    pub fn plaintext_bound(&self) -> &BigUint {
        self.n.half()
    }

    pub(crate) fn n_square_ring(&self) -> &Ring {
        &self.n_square
    }

    /// Width of the blinding exponent r.
    pub(crate) fn random_exponent_bits(&self) -> usize {
        self.hs_table.max_exp_bits()
    }

    /// `h_s^r mod n²` through the fixed-base table.
    pub(crate) fn hs_pow(&self, r: &BigUint) -> BigUint {
        self.hs_table.pow(r)
    }

    /// `1 + m·n mod n²`, the encoding of `m` as `(1 + n)^m`.
    pub(crate) fn encode_plaintext(&self, m: &Plaintext) -> BigUint {
        self.n.normalize(m) * self.n.modulus() + 1u32
    }

    pub(crate) fn check_plaintext(&self, m: &Plaintext) -> Result<(), PheError> {
        if m.magnitude() > self.plaintext_bound() {
            return Err(PheError::Domain(format!(
                "Plaintext exceeds the {}-bit key's bound n/2",
                self.key_size
            )));
        }

        Ok(())
    }

    pub(crate) fn check_ciphertext(&self, ct: &Ciphertext) -> Result<(), PheError> {
        if !self.n_square.contains(&ct.c) {
            return Err(PheError::Domain(
                "Ciphertext must lie in (0, n²)".into(),
            ));
        }

        Ok(())
    }

    /// Exactly `(n, h_s)`, each a length-prefixed big integer.
    pub fn to_bytes(&self) -> Result<Vec<u8>, PheError> {
        codec::to_bytes(&(self.n.modulus(), &self.h_s))
    }

    pub fn load_from(bytes: &[u8]) -> Result<Self, PheError> {
        let (n, h_s): (BigUint, BigUint) = codec::from_bytes(bytes)?;
        Self::from_parts(n, h_s)
    }

    pub fn list_params(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            ("key_size".to_string(), self.key_size.to_string()),
            ("n".to_string(), self.n.modulus().to_string()),
            ("h_s".to_string(), self.h_s.to_string()),
        ])
    }
}

impl PartialEq for PublicKey {
    fn eq(&self, other: &Self) -> bool {
        self.n == other.n && self.h_s == other.h_s
    }
}

impl Eq for PublicKey {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paillier::KeyGenerator;
    use crate::spi::KeyGenerator as _;

    use num_bigint::BigInt;

    #[test]
    fn test_crt_matches_plain_exponentiation() -> Result<(), PheError> {
        let (sk, _) = KeyGenerator::generate(512)?;
        let base = BigUint::from(0xdead_beef_u64) << 300u32;
        let exp = BigUint::from(0x1234_5678_9abc_u64) << 200u32;

        assert_eq!(
            sk.pow_mod_n_square_crt(&base, &exp),
            base.modpow(&exp, sk.n_square())
        );
        Ok(())
    }

    #[test]
    fn test_secret_key_reload() -> Result<(), PheError> {
        let (sk, _) = KeyGenerator::generate(512)?;
        let reloaded = SecretKey::load_from(&sk.to_bytes()?)?;

        assert_eq!(reloaded.list_params(), sk.list_params());
        assert_eq!(reloaded.n_square(), sk.n_square());
        Ok(())
    }

    #[test]
    fn test_public_key_reload() -> Result<(), PheError> {
        let (_, pk) = KeyGenerator::generate(512)?;
        let reloaded = PublicKey::load_from(&pk.to_bytes()?)?;

        assert_eq!(reloaded, pk);
        assert_eq!(reloaded.plaintext_bound(), pk.plaintext_bound());
        assert_eq!(reloaded.n_square(), pk.n_square());
        Ok(())
    }

    #[test]
    fn test_invalid_secret_parts_are_rejected() -> Result<(), PheError> {
        let (sk, _) = KeyGenerator::generate(512)?;
        let p = sk.p().clone();
        let q = sk.q().clone();

        let wrong_mu = sk.mu() + 1u32;
        assert!(matches!(
            SecretKey::from_parts(p.clone(), q.clone(), sk.lambda().clone(), wrong_mu),
            Err(PheError::KeyState(_))
        ));

        let composite = &p + 1u32;
        assert!(matches!(
            SecretKey::from_primes(composite, q.clone()),
            Err(PheError::KeyState(_))
        ));

        assert!(matches!(
            SecretKey::from_primes(BigUint::zero(), q.clone()),
            Err(PheError::KeyState(_))
        ));
        assert!(matches!(
            SecretKey::from_primes(p.clone(), p),
            Err(PheError::KeyState(_))
        ));
        Ok(())
    }

    #[test]
    fn test_small_modulus_is_rejected() {
        let p = BigUint::from(1_000_003u32);
        let q = BigUint::from(1_000_033u32);
        assert!(matches!(
            SecretKey::from_primes(p.clone(), q.clone()),
            Err(PheError::KeyState(_))
        ));
        assert!(matches!(
            PublicKey::from_parts(p * q, BigUint::from(4u32)),
            Err(PheError::KeyState(_))
        ));
    }

    #[test]
    fn test_invalid_public_parts_are_rejected() -> Result<(), PheError> {
        let (_, pk) = KeyGenerator::generate(512)?;

        assert!(PublicKey::from_parts(BigUint::zero(), pk.h_s().clone()).is_err());
        assert!(PublicKey::from_parts(pk.n() + 1u32, pk.h_s().clone()).is_err());
        assert!(PublicKey::from_parts(pk.n().clone(), BigUint::zero()).is_err());
        assert!(PublicKey::from_parts(pk.n().clone(), pk.n_square().clone()).is_err());
        Ok(())
    }

    #[test]
    fn test_plaintext_bound_checks() -> Result<(), PheError> {
        let (_, pk) = KeyGenerator::generate(512)?;
        let bound = BigInt::from(pk.plaintext_bound().clone());

        assert!(pk.check_plaintext(&bound).is_ok());
        assert!(pk.check_plaintext(&-&bound).is_ok());
        assert!(pk.check_plaintext(&(&bound + 1)).is_err());
        assert!(pk.check_plaintext(&(-&bound - 1)).is_err());
        Ok(())
    }

    #[test]
    fn test_ciphertext_bytes() -> Result<(), PheError> {
        let ct = Ciphertext::new(BigUint::from(0xabcdef_u32));
        assert_eq!(Ciphertext::from_bytes(&ct.to_bytes()?)?, ct);
        assert_eq!(ct.to_string(), "abcdef");
        Ok(())
    }
}
