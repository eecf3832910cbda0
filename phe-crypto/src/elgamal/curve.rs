use crate::codec::bytes_to_hex;
use crate::errors::PheError;

use curve25519_dalek::ristretto::{CompressedRistretto, RistrettoPoint};
use curve25519_dalek::scalar::Scalar;
use sha2::{Digest, Sha256};

/// Curve name of the only supported group.
pub const RISTRETTO255: &str = "ristretto255";
/// Backing library of [`RISTRETTO255`].
pub const CURVE25519_DALEK: &str = "curve25519-dalek";

/// Length of a compressed point on the wire.
pub const POINT_BYTES: usize = 32;

/// Stable 64-bit identifier of a (curve, library) pair.
///
/// First eight bytes of `SHA-256(curve ‖ 0x00 ‖ library)`, little-endian.
pub fn curve_id(curve_name: &str, library_name: &str) -> u64 {
    let digest = Sha256::new()
        .chain_update(curve_name.as_bytes())
        .chain_update([0u8])
        .chain_update(library_name.as_bytes())
        .finalize();

    let mut id = [0u8; 8];
    id.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(id)
}

/// An elliptic-curve group identified by curve name and backing library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EcGroup {
    curve_name: String,
    library_name: String,
    id: u64,
}

impl EcGroup {
    /// Resolves a (curve, library) pair to a group backend.
    ///
    /// # Errors
    ///
    /// Returns `PheError::UnsupportedCurve` for any pair other than
    /// `ristretto255` on `curve25519-dalek`.
    pub fn create(curve_name: &str, library_name: &str) -> Result<Self, PheError> {
        let curve = curve_name.to_ascii_lowercase();
        let library = library_name.to_ascii_lowercase();
        if curve != RISTRETTO255 || library != CURVE25519_DALEK {
            return Err(PheError::UnsupportedCurve(format!(
                "{} from {}",
                curve_name, library_name
            )));
        }

        Ok(Self {
            id: curve_id(&curve, &library),
            curve_name: curve,
            library_name: library,
        })
    }

    pub fn ristretto255() -> Self {
        Self {
            curve_name: RISTRETTO255.to_string(),
            library_name: CURVE25519_DALEK.to_string(),
            id: curve_id(RISTRETTO255, CURVE25519_DALEK),
        }
    }

    pub fn curve_name(&self) -> &str {
        &self.curve_name
    }

    pub fn library_name(&self) -> &str {
        &self.library_name
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn mul_base(&self, scalar: &Scalar) -> RistrettoPoint {
        RistrettoPoint::mul_base(scalar)
    }

    pub fn serialize_point(&self, point: &RistrettoPoint) -> [u8; POINT_BYTES] {
        point.compress().to_bytes()
    }

    /// Decompresses a 32-byte encoding, rejecting anything that is not a
    /// canonical ristretto255 point.
    pub fn deserialize_point(&self, bytes: &[u8]) -> Result<RistrettoPoint, PheError> {
        CompressedRistretto::from_slice(bytes)
            .map_err(|_| {
                PheError::Serialization(format!(
                    "Expected {} point bytes, got {}",
                    POINT_BYTES,
                    bytes.len()
                ))
            })?
            .decompress()
            .ok_or_else(|| {
                PheError::Serialization(format!("Invalid point encoding {}", bytes_to_hex(bytes)))
            })
    }

    pub fn point_equal(&self, a: &RistrettoPoint, b: &RistrettoPoint) -> bool {
        a == b
    }

    pub fn point_to_hex(&self, point: &RistrettoPoint) -> String {
        bytes_to_hex(&self.serialize_point(point))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use curve25519_dalek::traits::Identity;

    #[test]
    fn test_create_resolves_known_pair() -> Result<(), PheError> {
        let group = EcGroup::create("Ristretto255", "curve25519-dalek")?;
        assert_eq!(group, EcGroup::ristretto255());
        assert_eq!(group.id(), curve_id(RISTRETTO255, CURVE25519_DALEK));
        Ok(())
    }

    #[test]
    fn test_create_rejects_unknown_pair() {
        assert!(matches!(
            EcGroup::create("secp256k1", "openssl"),
            Err(PheError::UnsupportedCurve(_))
        ));
        assert!(matches!(
            EcGroup::create(RISTRETTO255, "openssl"),
            Err(PheError::UnsupportedCurve(_))
        ));
    }

    #[test]
    fn test_curve_id_separates_fields() {
        assert_ne!(curve_id("ab", "c"), curve_id("a", "bc"));
        assert_eq!(curve_id("a", "b"), curve_id("a", "b"));
    }

    #[test]
    fn test_point_encoding() -> Result<(), PheError> {
        let group = EcGroup::ristretto255();
        let point = group.mul_base(&Scalar::from(12_345u64));

        let bytes = group.serialize_point(&point);
        assert!(group.point_equal(&group.deserialize_point(&bytes)?, &point));

        let identity = RistrettoPoint::identity();
        assert_eq!(group.deserialize_point(&group.serialize_point(&identity))?, identity);

        assert!(group.deserialize_point(&bytes[..31]).is_err());
        assert!(group.deserialize_point(&[0xff; POINT_BYTES]).is_err());
        Ok(())
    }
}
