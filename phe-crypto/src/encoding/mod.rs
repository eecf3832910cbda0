//! Fixed-point encoding of real numbers into integer plaintexts.

use crate::errors::PheError;
use crate::preset::DEFAULT_SCALE;
use crate::spi::Plaintext;

use num_bigint::BigInt;
use num_traits::{FromPrimitive, ToPrimitive};

/// Scales reals by a fixed factor: `encode(x) = round(x · scale)`.
///
/// Sums of encoded values decode exactly; products with encoded scalars carry
/// `scale²` and must be decoded accordingly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlainEncoder {
    scale: i64,
}

impl PlainEncoder {
    pub fn new(scale: i64) -> Result<Self, PheError> {
        if scale <= 0 {
            return Err(PheError::InvalidParameters(format!(
                "Encoder scale must be positive, got {}",
                scale
            )));
        }

        Ok(Self { scale })
    }

    pub fn scale(&self) -> i64 {
        self.scale
    }

    /// # Example
    ///
    /// ```
    /// # use num_bigint::BigInt;
    /// # use phe_crypto::encoding::PlainEncoder;
    /// let encoder = PlainEncoder::new(10_000).unwrap();
    /// assert_eq!(encoder.encode_f64(2.8).unwrap(), BigInt::from(28_000));
    /// assert_eq!(encoder.encode_f64(-0.012).unwrap(), BigInt::from(-120));
    /// ```
    pub fn encode_f64(&self, value: f64) -> Result<Plaintext, PheError> {
        BigInt::from_f64((value * self.scale as f64).round()).ok_or_else(|| {
            PheError::InvalidParameters(format!("Cannot encode non-finite value {}", value))
        })
    }

    pub fn encode_i64(&self, value: i64) -> Plaintext {
        BigInt::from(value) * self.scale
    }

    /// Lossy beyond 53 bits of magnitude.
    pub fn decode_f64(&self, plaintext: &Plaintext) -> f64 {
        plaintext.to_f64().unwrap_or(f64::NAN) / self.scale as f64
    }

    /// Truncates toward zero.
    pub fn decode_i64(&self, plaintext: &Plaintext) -> Result<i64, PheError> {
        (plaintext / self.scale).to_i64().ok_or_else(|| {
            PheError::Domain(format!("Decoded value {} does not fit in i64", plaintext))
        })
    }
}

impl Default for PlainEncoder {
    fn default() -> Self {
        Self {
            scale: DEFAULT_SCALE,
        }
    }
}
