use crate::codec;
use crate::errors::PheError;
use crate::preset::MIN_KEY_SIZE;
use crate::ring::prime::is_probable_prime;
use crate::ring::{FixedBaseTable, Ring, l_function, to_hex};
use crate::spi::{HeObject, Plaintext};

use log::warn;
use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, Signed, Zero};

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// An Okamoto–Uchiyama ciphertext: one residue modulo n.
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

/// `2^(⌈bits(n)/3⌉ − 2)`, which stays below p/2 for the primes keygen draws.
fn plaintext_bound_for(n: &BigUint) -> BigUint {
    let bits = (n.bits() as usize).div_ceil(3);
    BigUint::one() << (bits.saturating_sub(2))
}

/// Okamoto–Uchiyama secret key `(p, q, gp_inv)`.
#[derive(Debug, Clone)]
pub struct SecretKey {
    p: BigUint,
    q: BigUint,
    /// L_p(G^(p−1) mod p²)⁻¹ mod p
    gp_inv: BigUint,

    p_ring: Ring,
    p_square: Ring,
    n: Ring,
    p_minus_1: BigUint,
}

impl SecretKey {
    pub fn from_parts(p: BigUint, q: BigUint, gp_inv: BigUint) -> Result<Self, PheError> {
        if p.is_zero() || q.is_zero() {
            return Err(PheError::KeyState("Primes p and q must be non-zero".into()));
        }
        if p == q {
            return Err(PheError::KeyState("Primes p and q must differ".into()));
        }
        if !is_probable_prime(&p) || !is_probable_prime(&q) {
            warn!("rejected OU secret key with composite factor");
            return Err(PheError::KeyState("p and q must be prime".into()));
        }

        let p_square = Ring::try_with(&p * &p)?;
        let n = p_square.modulus() * &q;
        if (n.bits() as usize) < MIN_KEY_SIZE {
            return Err(PheError::KeyState(format!(
                "Modulus has {} bits, at least {} required",
                n.bits(),
                MIN_KEY_SIZE
            )));
        }
        let p_ring = Ring::try_with(p.clone())?;
        if !p_ring.contains(&gp_inv) {
            return Err(PheError::KeyState("gp_inv must lie in (0, p)".into()));
        }

        Ok(Self {
            p_minus_1: &p - 1u32,
            p,
            q,
            gp_inv,
            p_ring,
            p_square,
            n: Ring::try_with(n)?,
        })
    }

    pub fn p(&self) -> &BigUint {
        &self.p
    }

    pub fn q(&self) -> &BigUint {
        &self.q
    }

    pub fn gp_inv(&self) -> &BigUint {
        &self.gp_inv
    }

    pub fn n(&self) -> &BigUint {
        self.n.modulus()
    }

    pub(crate) fn n_ring(&self) -> &Ring {
        &self.n
    }

    pub(crate) fn p_ring(&self) -> &Ring {
        &self.p_ring
    }

    /// `L_p(x^(p−1) mod p²)`, the discrete log of `x` in the p-subgroup up to
    /// the factor `gp_inv`.
    pub(crate) fn log_p(&self, x: &BigUint) -> BigUint {
        let u = self
            .p_square
            .reduce(x)
            .modpow(&self.p_minus_1, self.p_square.modulus());
        l_function(&u, &self.p)
    }

    /// Exactly `(p, q, gp_inv)`.
    pub fn to_bytes(&self) -> Result<Vec<u8>, PheError> {
        codec::to_bytes(&(&self.p, &self.q, &self.gp_inv))
    }

    pub fn load_from(bytes: &[u8]) -> Result<Self, PheError> {
        let (p, q, gp_inv): (BigUint, BigUint, BigUint) = codec::from_bytes(bytes)?;
        Self::from_parts(p, q, gp_inv)
    }

    pub fn list_params(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            ("p".to_string(), self.p.to_string()),
            ("q".to_string(), self.q.to_string()),
            ("gp_inv".to_string(), self.gp_inv.to_string()),
        ])
    }
}

/// Okamoto–Uchiyama public key `(n, G, H)` with `H = G^n mod n`.
#[derive(Debug, Clone)]
pub struct PublicKey {
    n: Ring,
    g: BigUint,
    h: BigUint,
    key_size: usize,
    bound: BigUint,
    g_table: Arc<FixedBaseTable>,
    h_table: Arc<FixedBaseTable>,
}

impl PublicKey {
    pub fn from_parts(n: BigUint, g: BigUint, h: BigUint) -> Result<Self, PheError> {
        if n.is_zero() || n.is_even() {
            return Err(PheError::KeyState("Modulus n must be odd and non-zero".into()));
        }
        let key_size = n.bits() as usize;
        if key_size < MIN_KEY_SIZE {
            return Err(PheError::KeyState(format!(
                "Modulus has {} bits, at least {} required",
                key_size, MIN_KEY_SIZE
            )));
        }

        let n = Ring::try_with(n)?;
        for (name, value) in [("G", &g), ("H", &h)] {
            if !n.contains(value) || !value.gcd(n.modulus()).is_one() {
                warn!("rejected OU public key with invalid {}", name);
                return Err(PheError::KeyState(format!("{} must be a unit modulo n", name)));
            }
        }

        let bound = plaintext_bound_for(n.modulus());
        let g_table = FixedBaseTable::new(&g, &n, bound.bits() as usize);
        let h_table = FixedBaseTable::new(&h, &n, key_size);

        Ok(Self {
            n,
            g,
            h,
            key_size,
            bound,
            g_table: Arc::new(g_table),
            h_table: Arc::new(h_table),
        })
    }

    pub fn n(&self) -> &BigUint {
        self.n.modulus()
    }

    pub fn g(&self) -> &BigUint {
        &self.g
    }

    pub fn h(&self) -> &BigUint {
        &self.h
    }

    pub fn key_size(&self) -> usize {
        self.key_size
    }

    pub fn plaintext_bound(&self) -> &BigUint {
        &self.bound
    }

    pub(crate) fn n_ring(&self) -> &Ring {
        &self.n
    }

    pub(crate) fn random_exponent_bits(&self) -> usize {
        self.h_table.max_exp_bits()
    }

    /// `G^m mod n`; negative `m` goes through `G⁻¹`.
    pub(crate) fn g_pow(&self, m: &Plaintext) -> Result<BigUint, PheError> {
        let positive = self.g_table.pow(m.magnitude());
        if m.is_negative() {
            return self.n.inv(&positive);
        }

        Ok(positive)
    }

    pub(crate) fn h_pow(&self, r: &BigUint) -> BigUint {
        self.h_table.pow(r)
    }

    pub(crate) fn check_plaintext(&self, m: &Plaintext) -> Result<(), PheError> {
        if m.magnitude() > &self.bound {
            return Err(PheError::Domain(format!(
                "Plaintext exceeds the OU bound of {} bits",
                self.bound.bits()
            )));
        }

        Ok(())
    }

    pub(crate) fn check_ciphertext(&self, ct: &Ciphertext) -> Result<(), PheError> {
        if !self.n.contains(&ct.c) {
            return Err(PheError::Domain("Ciphertext must lie in (0, n)".into()));
        }

        Ok(())
    }

    /// Exactly `(n, G, H)`.
    pub fn to_bytes(&self) -> Result<Vec<u8>, PheError> {
        codec::to_bytes(&(self.n.modulus(), &self.g, &self.h))
    }

    pub fn load_from(bytes: &[u8]) -> Result<Self, PheError> {
        let (n, g, h): (BigUint, BigUint, BigUint) = codec::from_bytes(bytes)?;
        Self::from_parts(n, g, h)
    }

    pub fn list_params(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            ("key_size".to_string(), self.key_size.to_string()),
            ("n".to_string(), self.n.modulus().to_string()),
            ("G".to_string(), self.g.to_string()),
            ("H".to_string(), self.h.to_string()),
        ])
    }
}

impl PartialEq for PublicKey {
    fn eq(&self, other: &Self) -> bool {
        self.n == other.n && self.g == other.g && self.h == other.h
    }
}

impl Eq for PublicKey {}
