//! Wire format shared by keys and ciphertexts.
//!
//! Binary payloads are `bincode` with fixed-width integers: every big integer
//! is a `u64` length prefix followed by its little-endian 32-bit digits.
//! Trailing bytes are rejected and the total size is capped, so a truncated
//! or padded buffer is a serialization error instead of a silent misread.

use crate::errors::PheError;
use crate::spi::Plaintext;

use bincode::Options;
use itertools::Itertools;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Upper bound on any single decoded payload.
pub const MAX_WIRE_BYTES: u64 = 1 << 20;

fn options() -> impl Options {
    bincode::DefaultOptions::new()
        .with_limit(MAX_WIRE_BYTES)
        .with_fixint_encoding()
        .reject_trailing_bytes()
}

pub fn to_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, PheError> {
    Ok(options().serialize(value)?)
}

pub fn from_bytes<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, PheError> {
    Ok(options().deserialize(bytes)?)
}

/// Serializes a plaintext as a single length-prefixed signed integer.
pub fn plaintext_to_bytes(plaintext: &Plaintext) -> Result<Vec<u8>, PheError> {
    to_bytes(plaintext)
}

pub fn plaintext_from_bytes(bytes: &[u8]) -> Result<Plaintext, PheError> {
    from_bytes(bytes)
}

/// Lower-case hex of a raw byte string (compressed curve points, scalars).
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).join("")
}

/// Serializes any value as compact JSON (audit records, parameter listings).
pub fn to_json<T: Serialize>(value: &T) -> Result<String, PheError> {
    Ok(serde_json::to_string(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    use num_bigint::{BigInt, BigUint};

    #[test]
    fn test_big_integers_are_length_prefixed() -> Result<(), PheError> {
        let value = BigUint::from(1u64) << 100u32;
        let bytes = to_bytes(&value)?;

        // u64 digit count followed by four u32 digits
        assert_eq!(bytes.len(), 8 + 4 * 4);
        assert_eq!(&bytes[..8], &4u64.to_le_bytes());
        Ok(())
    }

    #[test]
    fn test_truncated_and_padded_buffers_fail() -> Result<(), PheError> {
        let bytes = to_bytes(&(BigUint::from(7u32), BigUint::from(9u32)))?;

        assert!(from_bytes::<(BigUint, BigUint)>(&bytes[..bytes.len() - 1]).is_err());
        assert!(from_bytes::<(BigUint, BigUint)>(&[]).is_err());

        let mut padded = bytes.clone();
        padded.push(0);
        assert!(from_bytes::<(BigUint, BigUint)>(&padded).is_err());
        Ok(())
    }

    #[test]
    fn test_negative_plaintext() -> Result<(), PheError> {
        let value = BigInt::from(-123_456_789_i64);
        let decoded = plaintext_from_bytes(&plaintext_to_bytes(&value)?)?;
        assert_eq!(decoded, value);
        Ok(())
    }

    #[test]
    fn test_oversized_length_prefix_is_rejected() {
        let mut bytes = u64::MAX.to_le_bytes().to_vec();
        bytes.extend_from_slice(&[1, 0, 0, 0]);
        assert!(from_bytes::<BigUint>(&bytes).is_err());
    }

    #[test]
    fn test_bytes_to_hex() {
        assert_eq!(bytes_to_hex(&[0x00, 0x0f, 0xa0, 0xff]), "000fa0ff");
        assert_eq!(bytes_to_hex(&[]), "");
    }
}
