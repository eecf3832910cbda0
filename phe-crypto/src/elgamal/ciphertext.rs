use crate::codec;
use crate::elgamal::curve::{EcGroup, POINT_BYTES};
use crate::elgamal::registry::CurveRegistry;
use crate::errors::PheError;
use crate::spi::HeObject;

use curve25519_dalek::ristretto::RistrettoPoint;
use serde::{Deserialize, Serialize};

use std::fmt;
use std::sync::Arc;

/// Serialized form of an EC ciphertext.
///
/// `WithMeta` is self-contained; `Compact` names its curve only by id and
/// decodes only against a registry where that curve is enabled.
#[derive(Debug, Serialize, Deserialize)]
enum CiphertextWire {
    WithMeta {
        curve_name: String,
        library_name: String,
        c1: [u8; POINT_BYTES],
        c2: [u8; POINT_BYTES],
    },
    Compact {
        curve_id: u64,
        c1: [u8; POINT_BYTES],
        c2: [u8; POINT_BYTES],
    },
}

/// EC-ElGamal ciphertext `(c1, c2) = (r·G, m·G + r·Y)`.
#[derive(Debug, Clone)]
pub struct Ciphertext {
    group: Arc<EcGroup>,
    c1: RistrettoPoint,
    c2: RistrettoPoint,
}

impl Ciphertext {
    pub fn new(group: Arc<EcGroup>, c1: RistrettoPoint, c2: RistrettoPoint) -> Self {
        Self { group, c1, c2 }
    }

    pub fn group(&self) -> &Arc<EcGroup> {
        &self.group
    }

    pub fn c1(&self) -> &RistrettoPoint {
        &self.c1
    }

    pub fn c2(&self) -> &RistrettoPoint {
        &self.c2
    }

    /// Compact encoding: curve id plus both points.
    pub fn to_bytes(&self) -> Result<Vec<u8>, PheError> {
        codec::to_bytes(&CiphertextWire::Compact {
            curve_id: self.group.id(),
            c1: self.group.serialize_point(&self.c1),
            c2: self.group.serialize_point(&self.c2),
        })
    }

    /// Self-contained encoding carrying curve and library names.
    pub fn to_bytes_with_meta(&self) -> Result<Vec<u8>, PheError> {
        codec::to_bytes(&CiphertextWire::WithMeta {
            curve_name: self.group.curve_name().to_string(),
            library_name: self.group.library_name().to_string(),
            c1: self.group.serialize_point(&self.c1),
            c2: self.group.serialize_point(&self.c2),
        })
    }

    /// Decodes either form. A `WithMeta` payload enables its curve in
    /// `registry`; a `Compact` one fails with `PheError::UnknownCurve` unless
    /// the curve was enabled beforehand.
    pub fn from_bytes(bytes: &[u8], registry: &CurveRegistry) -> Result<Self, PheError> {
        let (group, c1, c2) = match codec::from_bytes(bytes)? {
            CiphertextWire::WithMeta {
                curve_name,
                library_name,
                c1,
                c2,
            } => {
                let group = EcGroup::create(&curve_name, &library_name)?;
                (registry.enable_ec_group(Arc::new(group)), c1, c2)
            }
            CiphertextWire::Compact { curve_id, c1, c2 } => (registry.lookup(curve_id)?, c1, c2),
        };

        let c1 = group.deserialize_point(&c1)?;
        let c2 = group.deserialize_point(&c2)?;
        Ok(Self::new(group, c1, c2))
    }
}

impl PartialEq for Ciphertext {
    fn eq(&self, other: &Self) -> bool {
        self.group.id() == other.group.id()
            && self.group.point_equal(&self.c1, &other.c1)
            && self.group.point_equal(&self.c2, &other.c2)
    }
}

impl fmt::Display for Ciphertext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{c1={}, c2={}}}",
            self.group.point_to_hex(&self.c1),
            self.group.point_to_hex(&self.c2)
        )
    }
}

impl HeObject for Ciphertext {}
