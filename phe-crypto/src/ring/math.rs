//! Implementation of ring ops using modular arithmetic over big integers.

use crate::errors::PheError;

use num_bigint::{BigInt, BigUint, Sign};
use num_integer::Integer;
use num_traits::{One, Signed, Zero};

/// Represents a residue ring Z_m for an arbitrary-precision modulus `m`.
///
/// The modulus and `floor(m / 2)` are computed once; every scheme caches its
/// rings (n, n², p², ...) on the key that owns them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ring {
    modulus: BigUint,
    signed_modulus: BigInt,
    half: BigUint,
}

impl Ring {
    /// Create a new Ring with the given modulus.
    ///
    /// The modulus must be greater than 1.
    pub fn try_with(modulus: BigUint) -> Result<Self, PheError> {
        if modulus <= BigUint::one() {
            return Err(PheError::InvalidModulus(format!(
                "Modulus must be greater than 1, got {}",
                modulus
            )));
        }

        let half = &modulus >> 1u32;
        let signed_modulus = BigInt::from_biguint(Sign::Plus, modulus.clone());

        Ok(Ring {
            modulus,
            signed_modulus,
            half,
        })
    }

    /// Returns the modulus of the ring.
    ///
    /// # Example
    ///
    /// ```
    /// # use num_bigint::BigUint;
    /// # use phe_crypto::ring::Ring;
    /// let ring = Ring::try_with(BigUint::from(13u32)).unwrap();
    /// assert_eq!(ring.modulus(), &BigUint::from(13u32));
    /// ```
    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    /// Returns `floor(modulus / 2)`, the bound of the symmetric residue range.
    pub fn half(&self) -> &BigUint {
        &self.half
    }

    /// Normalizes a signed value to be within the range `[0, modulus - 1]`.
    ///
    /// # Example
    ///
    /// ```
    /// # use num_bigint::{BigInt, BigUint};
    /// # use phe_crypto::ring::Ring;
    /// let ring = Ring::try_with(BigUint::from(10u32)).unwrap();
    /// assert_eq!(ring.normalize(&BigInt::from(15)), BigUint::from(5u32));
    /// assert_eq!(ring.normalize(&BigInt::from(-3)), BigUint::from(7u32));
    /// assert_eq!(ring.normalize(&BigInt::from(10)), BigUint::from(0u32));
    /// ```
    pub fn normalize(&self, value: &BigInt) -> BigUint {
        let (_, magnitude) = value.mod_floor(&self.signed_modulus).into_parts();
        magnitude
    }

    /// Reduces an unsigned value into `[0, modulus - 1]`.
    pub fn reduce(&self, value: &BigUint) -> BigUint {
        value % &self.modulus
    }

    /// Computes `(a + b) mod modulus`.
    pub fn add(&self, a: &BigUint, b: &BigUint) -> BigUint {
        (a + b) % &self.modulus
    }

    /// Computes `(a - b) mod modulus`.
    ///
    /// # Example
    ///
    /// ```
    /// # use num_bigint::BigUint;
    /// # use phe_crypto::ring::Ring;
    /// let ring = Ring::try_with(BigUint::from(10u32)).unwrap();
    /// assert_eq!(ring.sub(&BigUint::from(3u32), &BigUint::from(5u32)), BigUint::from(8u32));
    /// ```
    pub fn sub(&self, a: &BigUint, b: &BigUint) -> BigUint {
        let a_norm = self.reduce(a);
        let b_norm = self.reduce(b);

        (a_norm + &self.modulus - b_norm) % &self.modulus
    }

    /// Computes `(a * b) mod modulus`.
    pub fn mul(&self, a: &BigUint, b: &BigUint) -> BigUint {
        (a * b) % &self.modulus
    }

    /// Computes the additive inverse `-a mod modulus`.
    pub fn neg(&self, a: &BigUint) -> BigUint {
        let a_norm = self.reduce(a);
        if a_norm.is_zero() {
            return a_norm;
        }

        &self.modulus - a_norm
    }

    /// Computes the modular multiplicative inverse `a^-1 mod modulus`.
    ///
    /// # Errors
    ///
    /// Returns `PheError::NoInverse` if `gcd(a, modulus) != 1` or `a` is 0.
    ///
    /// # Example
    ///
    /// ```
    /// # use num_bigint::BigUint;
    /// # use phe_crypto::ring::Ring;
    /// let ring = Ring::try_with(BigUint::from(10u32)).unwrap();
    /// assert_eq!(ring.inv(&BigUint::from(3u32)).unwrap(), BigUint::from(7u32));
    /// assert!(ring.inv(&BigUint::from(2u32)).is_err());
    /// assert!(ring.inv(&BigUint::from(0u32)).is_err());
    /// ```
    pub fn inv(&self, a: &BigUint) -> Result<BigUint, PheError> {
        let a_norm = self.reduce(a);
        if a_norm.is_zero() {
            return Err(PheError::NoInverse(format!(
                "Cannot invert 0 in mod {}",
                self.modulus
            )));
        }

        a_norm.modinv(&self.modulus).ok_or_else(|| {
            PheError::NoInverse(format!(
                "Modular inverse does not exist for {} mod {}",
                a_norm, self.modulus
            ))
        })
    }

    /// Computes `base^exp mod modulus`; a negative exponent inverts the base first.
    pub fn pow(&self, base: &BigUint, exp: &BigInt) -> Result<BigUint, PheError> {
        if exp.is_negative() {
            let inverse = self.inv(base)?;
            return Ok(inverse.modpow(exp.magnitude(), &self.modulus));
        }

        Ok(base.modpow(exp.magnitude(), &self.modulus))
    }

    /// Maps a residue into the symmetric range `(-modulus/2, modulus/2]`.
    ///
    /// # Example
    ///
    /// ```
    /// # use num_bigint::{BigInt, BigUint};
    /// # use phe_crypto::ring::Ring;
    /// let ring = Ring::try_with(BigUint::from(11u32)).unwrap();
    /// assert_eq!(ring.center(&BigUint::from(5u32)), BigInt::from(5));
    /// assert_eq!(ring.center(&BigUint::from(6u32)), BigInt::from(-5));
    /// ```
    pub fn center(&self, value: &BigUint) -> BigInt {
        let value = self.reduce(value);
        if value > self.half {
            return BigInt::from_biguint(Sign::Plus, value) - &self.signed_modulus;
        }

        BigInt::from_biguint(Sign::Plus, value)
    }

    /// Returns true when `0 < value < modulus`.
    pub fn contains(&self, value: &BigUint) -> bool {
        !value.is_zero() && value < &self.modulus
    }
}
