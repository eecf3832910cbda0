use crate::elgamal::baby_step::check_params;
use crate::errors::PheError;
use crate::phe::SchemaType;
use crate::preset::{
    DEFAULT_EC_MAX_PLAINTEXT, DEFAULT_EC_TABLE_BITS, DEFAULT_KEY_SIZE, DEFAULT_SCALE, MIN_KEY_SIZE,
};

use serde::{Deserialize, Serialize};

/// Parameters of an [`crate::phe::HeKit`].
///
/// Missing JSON fields take their default values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KitConfig {
    pub schema: SchemaType,
    /// Modulus size in bits for Paillier and OU.
    pub key_size: usize,
    pub elgamal_max_plaintext: u64,
    pub elgamal_table_bits: u32,
    pub encoder_scale: i64,
}

impl Default for KitConfig {
    fn default() -> Self {
        Self {
            schema: SchemaType::Paillier,
            key_size: DEFAULT_KEY_SIZE,
            elgamal_max_plaintext: DEFAULT_EC_MAX_PLAINTEXT,
            elgamal_table_bits: DEFAULT_EC_TABLE_BITS,
            encoder_scale: DEFAULT_SCALE,
        }
    }
}

impl KitConfig {
    /// Default configuration for `schema` with the given key size.
    pub fn try_with(schema: SchemaType, key_size: usize) -> Result<Self, PheError> {
        let config = Self {
            schema,
            key_size,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), PheError> {
        if self.key_size < MIN_KEY_SIZE {
            return Err(PheError::InvalidParameters(format!(
                "Key size {} is below the minimum of {} bits",
                self.key_size, MIN_KEY_SIZE
            )));
        }
        if self.encoder_scale <= 0 {
            return Err(PheError::InvalidParameters(format!(
                "Encoder scale must be positive, got {}",
                self.encoder_scale
            )));
        }

        check_params(self.elgamal_max_plaintext, self.elgamal_table_bits)
    }

    pub fn from_json(json: &str) -> Result<Self, PheError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, PheError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
