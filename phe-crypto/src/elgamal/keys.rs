use crate::codec::{self, bytes_to_hex};
use crate::elgamal::baby_step::{BabyStepTable, check_max_plaintext, check_params};
use crate::elgamal::curve::{EcGroup, POINT_BYTES};
use crate::elgamal::registry::CurveRegistry;
use crate::errors::PheError;
use crate::ring::random::random_wide_bytes;
use crate::spi::Plaintext;

use curve25519_dalek::ristretto::RistrettoPoint;
use curve25519_dalek::scalar::Scalar;
use curve25519_dalek::traits::Identity;
use log::warn;
use num_traits::{Signed, ToPrimitive};
use serde::{Deserialize, Serialize};

use std::collections::BTreeMap;
use std::sync::Arc;

/// Uniform scalar from 64 random bytes reduced modulo the group order.
pub(crate) fn random_scalar() -> Scalar {
    Scalar::from_bytes_mod_order_wide(&random_wide_bytes())
}

fn scalar_from_i64(value: i64) -> Scalar {
    let magnitude = Scalar::from(value.unsigned_abs());
    if value < 0 { -magnitude } else { magnitude }
}

#[derive(Serialize, Deserialize)]
struct SecretKeyWire {
    curve_name: String,
    library_name: String,
    x: [u8; POINT_BYTES],
    max_plaintext: u64,
    table_bits: u32,
}

#[derive(Serialize, Deserialize)]
struct PublicKeyWire {
    curve_name: String,
    library_name: String,
    y: [u8; POINT_BYTES],
    max_plaintext: u64,
}

/// EC-ElGamal secret scalar `x` together with its decryption table.
#[derive(Debug, Clone)]
pub struct SecretKey {
    group: Arc<EcGroup>,
    x: Scalar,
    max_plaintext: u64,
    table: Arc<BabyStepTable>,
}

impl SecretKey {
    /// Validated factory; builds the `2^table_bits` baby-step table.
    pub fn from_parts(
        group: Arc<EcGroup>,
        x: Scalar,
        max_plaintext: u64,
        table_bits: u32,
    ) -> Result<Self, PheError> {
        if x == Scalar::ZERO {
            return Err(PheError::KeyState("Secret scalar must be non-zero".into()));
        }
        check_params(max_plaintext, table_bits)?;

        Ok(Self {
            group,
            x,
            max_plaintext,
            table: Arc::new(BabyStepTable::new(table_bits)),
        })
    }

    pub fn group(&self) -> &Arc<EcGroup> {
        &self.group
    }

    pub fn x(&self) -> &Scalar {
        &self.x
    }

    pub fn max_plaintext(&self) -> u64 {
        self.max_plaintext
    }

    pub fn table_bits(&self) -> u32 {
        self.table.table_bits()
    }

    /// `Y = x·G` with the same plaintext bound.
    pub fn public_key(&self) -> Result<PublicKey, PheError> {
        PublicKey::from_parts(
            self.group.clone(),
            self.group.mul_base(&self.x),
            self.max_plaintext,
        )
    }

    /// Recovers `m` from `M = m·G`, provided `|m| <= B`.
    pub(crate) fn solve(&self, point: &RistrettoPoint) -> Option<i64> {
        self.table.solve(point, self.max_plaintext)
    }

    /// Self-describing: carries the curve and library names.
    pub fn to_bytes(&self) -> Result<Vec<u8>, PheError> {
        codec::to_bytes(&SecretKeyWire {
            curve_name: self.group.curve_name().to_string(),
            library_name: self.group.library_name().to_string(),
            x: self.x.to_bytes(),
            max_plaintext: self.max_plaintext,
            table_bits: self.table.table_bits(),
        })
    }

    /// Decodes a key and enables its curve in `registry`.
    pub fn load_from(bytes: &[u8], registry: &CurveRegistry) -> Result<Self, PheError> {
        let wire: SecretKeyWire = codec::from_bytes(bytes)?;
        let group = EcGroup::create(&wire.curve_name, &wire.library_name)?;
        let group = registry.enable_ec_group(Arc::new(group));

        let x = Option::<Scalar>::from(Scalar::from_canonical_bytes(wire.x)).ok_or_else(|| {
            warn!("rejected EC secret key with non-canonical scalar");
            PheError::KeyState("Secret scalar is not canonical".into())
        })?;

        Self::from_parts(group, x, wire.max_plaintext, wire.table_bits)
    }

    pub fn list_params(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            ("curve".to_string(), self.group.curve_name().to_string()),
            ("library".to_string(), self.group.library_name().to_string()),
            ("x".to_string(), bytes_to_hex(self.x.as_bytes())),
            ("max_plaintext".to_string(), self.max_plaintext.to_string()),
            ("table_bits".to_string(), self.table.table_bits().to_string()),
        ])
    }
}

/// EC-ElGamal public point `Y = x·G`.
#[derive(Debug, Clone)]
pub struct PublicKey {
    group: Arc<EcGroup>,
    y: RistrettoPoint,
    max_plaintext: u64,
}

impl PublicKey {
    pub fn from_parts(
        group: Arc<EcGroup>,
        y: RistrettoPoint,
        max_plaintext: u64,
    ) -> Result<Self, PheError> {
        if y == RistrettoPoint::identity() {
            return Err(PheError::KeyState("Public point must not be the identity".into()));
        }
        check_max_plaintext(max_plaintext)?;

        Ok(Self {
            group,
            y,
            max_plaintext,
        })
    }

    pub fn group(&self) -> &Arc<EcGroup> {
        &self.group
    }

    pub fn y(&self) -> &RistrettoPoint {
        &self.y
    }

    pub fn max_plaintext(&self) -> u64 {
        self.max_plaintext
    }

    /// Maps `m` to a scalar after checking `|m| <= B`.
    pub(crate) fn plaintext_scalar(&self, m: &Plaintext) -> Result<Scalar, PheError> {
        let value = m
            .to_i64()
            .filter(|v| v.unsigned_abs() <= self.max_plaintext)
            .ok_or_else(|| {
                PheError::Domain(format!(
                    "{}plaintext exceeds the EC bound {}",
                    if m.is_negative() { "negative " } else { "" },
                    self.max_plaintext
                ))
            })?;

        Ok(scalar_from_i64(value))
    }

    pub(crate) fn check_group(&self, group: &EcGroup) -> Result<(), PheError> {
        if group.id() != self.group.id() {
            return Err(PheError::Domain(format!(
                "Ciphertext is on {} but the key is on {}",
                group.curve_name(),
                self.group.curve_name()
            )));
        }

        Ok(())
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, PheError> {
        codec::to_bytes(&PublicKeyWire {
            curve_name: self.group.curve_name().to_string(),
            library_name: self.group.library_name().to_string(),
            y: self.group.serialize_point(&self.y),
            max_plaintext: self.max_plaintext,
        })
    }

    pub fn load_from(bytes: &[u8], registry: &CurveRegistry) -> Result<Self, PheError> {
        let wire: PublicKeyWire = codec::from_bytes(bytes)?;
        let group = EcGroup::create(&wire.curve_name, &wire.library_name)?;
        let group = registry.enable_ec_group(Arc::new(group));
        let y = group.deserialize_point(&wire.y)?;

        Self::from_parts(group, y, wire.max_plaintext)
    }

    pub fn list_params(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            ("curve".to_string(), self.group.curve_name().to_string()),
            ("library".to_string(), self.group.library_name().to_string()),
            ("y".to_string(), self.group.point_to_hex(&self.y)),
            ("max_plaintext".to_string(), self.max_plaintext.to_string()),
        ])
    }
}

impl PartialEq for PublicKey {
    fn eq(&self, other: &Self) -> bool {
        self.group.id() == other.group.id()
            && self.group.point_equal(&self.y, &other.y)
            && self.max_plaintext == other.max_plaintext
    }
}

impl Eq for PublicKey {}

#[cfg(test)]
mod tests {
    use super::*;

    use num_bigint::BigInt;

    fn secret_key() -> Result<SecretKey, PheError> {
        SecretKey::from_parts(Arc::new(EcGroup::ristretto255()), random_scalar(), 1_000, 6)
    }

    #[test]
    fn test_public_key_matches_secret() -> Result<(), PheError> {
        let sk = secret_key()?;
        let pk = sk.public_key()?;
        assert_eq!(pk.y(), &RistrettoPoint::mul_base(sk.x()));
        assert_eq!(pk.max_plaintext(), 1_000);
        Ok(())
    }

    #[test]
    fn test_keys_reload_and_register_curve() -> Result<(), PheError> {
        let sk = secret_key()?;
        let pk = sk.public_key()?;
        let registry = CurveRegistry::new();

        let sk2 = SecretKey::load_from(&sk.to_bytes()?, &registry)?;
        let pk2 = PublicKey::load_from(&pk.to_bytes()?, &registry)?;

        assert_eq!(sk2.list_params(), sk.list_params());
        assert_eq!(pk2, pk);
        assert!(registry.contains(pk.group().id()));
        Ok(())
    }

    #[test]
    fn test_invalid_parts_are_rejected() {
        let group = Arc::new(EcGroup::ristretto255());
        assert!(matches!(
            SecretKey::from_parts(group.clone(), Scalar::ZERO, 1_000, 6),
            Err(PheError::KeyState(_))
        ));
        assert!(matches!(
            SecretKey::from_parts(group.clone(), Scalar::ONE, 1_000, 0),
            Err(PheError::InvalidParameters(_))
        ));
        assert!(matches!(
            PublicKey::from_parts(group, RistrettoPoint::identity(), 1_000),
            Err(PheError::KeyState(_))
        ));
    }

    #[test]
    fn test_public_key_with_oversized_bound_fails_to_load() -> Result<(), PheError> {
        let pk = secret_key()?.public_key()?;
        let forged = codec::to_bytes(&PublicKeyWire {
            curve_name: pk.group().curve_name().to_string(),
            library_name: pk.group().library_name().to_string(),
            y: pk.group().serialize_point(pk.y()),
            max_plaintext: u64::MAX,
        })?;

        assert!(matches!(
            PublicKey::load_from(&forged, &CurveRegistry::new()),
            Err(PheError::InvalidParameters(_))
        ));
        assert!(PublicKey::from_parts(pk.group().clone(), *pk.y(), 0).is_err());
        Ok(())
    }

    #[test]
    fn test_plaintext_scalar_bounds() -> Result<(), PheError> {
        let pk = secret_key()?.public_key()?;

        assert_eq!(pk.plaintext_scalar(&BigInt::from(-1_000))?, -Scalar::from(1_000u64));
        assert!(pk.plaintext_scalar(&BigInt::from(1_001)).is_err());
        assert!(pk.plaintext_scalar(&(BigInt::from(u64::MAX) * 4)).is_err());
        Ok(())
    }
}
