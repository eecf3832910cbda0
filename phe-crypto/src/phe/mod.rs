//! # Scheme-agnostic facade
//!
//! Enum wrappers over the per-scheme types, selected by [`SchemaType`] at
//! runtime. Each wrapper implements the same [`crate::spi`] traits, so
//! callers written against the traits work with either layer. Mixing values
//! of different schemes fails with `PheError::SchemaMismatch`.
//!
//! On the wire every facade value is one schema tag byte followed by the
//! scheme's own encoding.

pub mod batch;
pub mod config;
pub mod kit;
pub mod roles;

pub use config::KitConfig;
pub use kit::{DestinationHeKit, HeKit};
pub use roles::{Decryptor, Encryptor, Evaluator};

use crate::elgamal::CurveRegistry;
use crate::errors::PheError;
use crate::spi::HeObject;
use crate::{elgamal, ou, paillier};

use serde::{Deserialize, Serialize};

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    Paillier,
    Ou,
    ElGamal,
}

impl SchemaType {
    fn tag(self) -> u8 {
        match self {
            SchemaType::Paillier => 1,
            SchemaType::Ou => 2,
            SchemaType::ElGamal => 3,
        }
    }

    fn from_tag(tag: u8) -> Result<Self, PheError> {
        match tag {
            1 => Ok(SchemaType::Paillier),
            2 => Ok(SchemaType::Ou),
            3 => Ok(SchemaType::ElGamal),
            other => Err(PheError::Serialization(format!(
                "Unknown schema tag {}",
                other
            ))),
        }
    }
}

impl fmt::Display for SchemaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SchemaType::Paillier => "paillier",
            SchemaType::Ou => "ou",
            SchemaType::ElGamal => "elgamal",
        };
        f.write_str(name)
    }
}

impl FromStr for SchemaType {
    type Err = PheError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "paillier" => Ok(SchemaType::Paillier),
            "ou" => Ok(SchemaType::Ou),
            "elgamal" => Ok(SchemaType::ElGamal),
            _ => Err(PheError::InvalidParameters(format!(
                "Unknown schema '{}'",
                s
            ))),
        }
    }
}

pub(crate) fn mismatch(expected: SchemaType, got: SchemaType) -> PheError {
    PheError::SchemaMismatch(format!("expected a {} value, got {}", expected, got))
}

fn split_tag(bytes: &[u8]) -> Result<(SchemaType, &[u8]), PheError> {
    let (tag, payload) = bytes
        .split_first()
        .ok_or_else(|| PheError::Serialization("Empty buffer".into()))?;
    Ok((SchemaType::from_tag(*tag)?, payload))
}

fn with_tag(schema: SchemaType, payload: Vec<u8>) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(payload.len() + 1);
    bytes.push(schema.tag());
    bytes.extend(payload);
    bytes
}

#[derive(Debug, Clone, PartialEq)]
pub enum Ciphertext {
    Paillier(paillier::Ciphertext),
    Ou(ou::Ciphertext),
    ElGamal(elgamal::Ciphertext),
}

impl Ciphertext {
    pub fn schema(&self) -> SchemaType {
        match self {
            Ciphertext::Paillier(_) => SchemaType::Paillier,
            Ciphertext::Ou(_) => SchemaType::Ou,
            Ciphertext::ElGamal(_) => SchemaType::ElGamal,
        }
    }

    /// Tag byte plus the scheme payload; EC ciphertexts use the compact form.
    pub fn to_bytes(&self) -> Result<Vec<u8>, PheError> {
        let payload = match self {
            Ciphertext::Paillier(ct) => ct.to_bytes()?,
            Ciphertext::Ou(ct) => ct.to_bytes()?,
            Ciphertext::ElGamal(ct) => ct.to_bytes()?,
        };
        Ok(with_tag(self.schema(), payload))
    }

    /// Like [`Ciphertext::to_bytes`], but EC ciphertexts carry curve metadata.
    pub fn to_bytes_with_meta(&self) -> Result<Vec<u8>, PheError> {
        match self {
            Ciphertext::ElGamal(ct) => Ok(with_tag(SchemaType::ElGamal, ct.to_bytes_with_meta()?)),
            _ => self.to_bytes(),
        }
    }

    pub fn from_bytes(bytes: &[u8], registry: &CurveRegistry) -> Result<Self, PheError> {
        let (schema, payload) = split_tag(bytes)?;
        Ok(match schema {
            SchemaType::Paillier => Ciphertext::Paillier(paillier::Ciphertext::from_bytes(payload)?),
            SchemaType::Ou => Ciphertext::Ou(ou::Ciphertext::from_bytes(payload)?),
            SchemaType::ElGamal => {
                Ciphertext::ElGamal(elgamal::Ciphertext::from_bytes(payload, registry)?)
            }
        })
    }
}

impl fmt::Display for Ciphertext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ciphertext::Paillier(ct) => write!(f, "{}", ct),
            Ciphertext::Ou(ct) => write!(f, "{}", ct),
            Ciphertext::ElGamal(ct) => write!(f, "{}", ct),
        }
    }
}

impl HeObject for Ciphertext {}

/// Public keys are shared with encryptors and evaluators through `Arc`.
#[derive(Debug, Clone, PartialEq)]
pub enum PublicKey {
    Paillier(Arc<paillier::PublicKey>),
    Ou(Arc<ou::PublicKey>),
    ElGamal(Arc<elgamal::PublicKey>),
}

impl PublicKey {
    pub fn schema(&self) -> SchemaType {
        match self {
            PublicKey::Paillier(_) => SchemaType::Paillier,
            PublicKey::Ou(_) => SchemaType::Ou,
            PublicKey::ElGamal(_) => SchemaType::ElGamal,
        }
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, PheError> {
        let payload = match self {
            PublicKey::Paillier(pk) => pk.to_bytes()?,
            PublicKey::Ou(pk) => pk.to_bytes()?,
            PublicKey::ElGamal(pk) => pk.to_bytes()?,
        };
        Ok(with_tag(self.schema(), payload))
    }

    pub fn from_bytes(bytes: &[u8], registry: &CurveRegistry) -> Result<Self, PheError> {
        let (schema, payload) = split_tag(bytes)?;
        Ok(match schema {
            SchemaType::Paillier => {
                PublicKey::Paillier(Arc::new(paillier::PublicKey::load_from(payload)?))
            }
            SchemaType::Ou => PublicKey::Ou(Arc::new(ou::PublicKey::load_from(payload)?)),
            SchemaType::ElGamal => {
                PublicKey::ElGamal(Arc::new(elgamal::PublicKey::load_from(payload, registry)?))
            }
        })
    }

    pub fn list_params(&self) -> BTreeMap<String, String> {
        match self {
            PublicKey::Paillier(pk) => pk.list_params(),
            PublicKey::Ou(pk) => pk.list_params(),
            PublicKey::ElGamal(pk) => pk.list_params(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum SecretKey {
    Paillier(paillier::SecretKey),
    Ou(ou::SecretKey),
    ElGamal(elgamal::SecretKey),
}

impl SecretKey {
    pub fn schema(&self) -> SchemaType {
        match self {
            SecretKey::Paillier(_) => SchemaType::Paillier,
            SecretKey::Ou(_) => SchemaType::Ou,
            SecretKey::ElGamal(_) => SchemaType::ElGamal,
        }
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, PheError> {
        let payload = match self {
            SecretKey::Paillier(sk) => sk.to_bytes()?,
            SecretKey::Ou(sk) => sk.to_bytes()?,
            SecretKey::ElGamal(sk) => sk.to_bytes()?,
        };
        Ok(with_tag(self.schema(), payload))
    }

    pub fn from_bytes(bytes: &[u8], registry: &CurveRegistry) -> Result<Self, PheError> {
        let (schema, payload) = split_tag(bytes)?;
        Ok(match schema {
            SchemaType::Paillier => SecretKey::Paillier(paillier::SecretKey::load_from(payload)?),
            SchemaType::Ou => SecretKey::Ou(ou::SecretKey::load_from(payload)?),
            SchemaType::ElGamal => {
                SecretKey::ElGamal(elgamal::SecretKey::load_from(payload, registry)?)
            }
        })
    }

    pub fn list_params(&self) -> BTreeMap<String, String> {
        match self {
            SecretKey::Paillier(sk) => sk.list_params(),
            SecretKey::Ou(sk) => sk.list_params(),
            SecretKey::ElGamal(sk) => sk.list_params(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use num_bigint::BigUint;

    #[test]
    fn test_schema_names() -> Result<(), PheError> {
        assert_eq!("Paillier".parse::<SchemaType>()?, SchemaType::Paillier);
        assert_eq!("OU".parse::<SchemaType>()?, SchemaType::Ou);
        assert_eq!("elgamal".parse::<SchemaType>()?, SchemaType::ElGamal);
        assert!("rsa".parse::<SchemaType>().is_err());

        assert_eq!(serde_json::to_string(&SchemaType::ElGamal)?, "\"elgamal\"");
        assert_eq!(SchemaType::Ou.to_string(), "ou");
        Ok(())
    }

    #[test]
    fn test_tagged_ciphertext_bytes() -> Result<(), PheError> {
        let registry = CurveRegistry::new();
        let ct = Ciphertext::Ou(ou::Ciphertext::new(BigUint::from(77u32)));

        let bytes = ct.to_bytes()?;
        assert_eq!(bytes[0], SchemaType::Ou.tag());
        assert_eq!(Ciphertext::from_bytes(&bytes, &registry)?, ct);

        // the tag decides the decoder, so a relabelled payload decodes as another scheme
        let mut relabelled = bytes.clone();
        relabelled[0] = SchemaType::Paillier.tag();
        assert_eq!(
            Ciphertext::from_bytes(&relabelled, &registry)?.schema(),
            SchemaType::Paillier
        );
        Ok(())
    }

    #[test]
    fn test_bad_tags_fail() {
        let registry = CurveRegistry::new();
        assert!(Ciphertext::from_bytes(&[], &registry).is_err());
        assert!(Ciphertext::from_bytes(&[9, 0, 0], &registry).is_err());
        assert!(PublicKey::from_bytes(&[0], &registry).is_err());
    }
}
