use crate::elgamal::{self, CurveRegistry, EcGroup};
use crate::encoding::PlainEncoder;
use crate::errors::PheError;
use crate::phe::{
    Decryptor, Encryptor, Evaluator, KitConfig, PublicKey, SchemaType, SecretKey, mismatch,
};
use crate::spi::KeyGenerator as _;
use crate::{ou, paillier};

use log::debug;

use std::sync::Arc;

fn generate_keys(
    config: &KitConfig,
    registry: &CurveRegistry,
) -> Result<(PublicKey, SecretKey), PheError> {
    Ok(match config.schema {
        SchemaType::Paillier => {
            let (sk, pk) = paillier::KeyGenerator::generate(config.key_size)?;
            (PublicKey::Paillier(Arc::new(pk)), SecretKey::Paillier(sk))
        }
        SchemaType::Ou => {
            let (sk, pk) = ou::KeyGenerator::generate(config.key_size)?;
            (PublicKey::Ou(Arc::new(pk)), SecretKey::Ou(sk))
        }
        SchemaType::ElGamal => {
            let group = registry.enable_ec_group(Arc::new(EcGroup::ristretto255()));
            let (sk, pk) = elgamal::KeyGenerator::generate_with(
                group,
                config.elgamal_max_plaintext,
                config.elgamal_table_bits,
            )?;
            (PublicKey::ElGamal(Arc::new(pk)), SecretKey::ElGamal(sk))
        }
    })
}

fn register_curve(public_key: &PublicKey, registry: &CurveRegistry) {
    if let PublicKey::ElGamal(pk) = public_key {
        registry.enable_ec_group(pk.group().clone());
    }
}

/// Everything the key owner needs: both keys and all three roles.
#[derive(Debug, Clone)]
pub struct HeKit {
    public_key: PublicKey,
    encryptor: Encryptor,
    decryptor: Decryptor,
    evaluator: Evaluator,
    registry: Arc<CurveRegistry>,
    encoder: PlainEncoder,
}

impl HeKit {
    pub fn new(config: &KitConfig) -> Result<Self, PheError> {
        Self::with_registry(config, Arc::new(CurveRegistry::new()))
    }

    /// Generates keys for `config`, registering EC curves in `registry`.
    pub fn with_registry(config: &KitConfig, registry: Arc<CurveRegistry>) -> Result<Self, PheError> {
        config.validate()?;
        let (public_key, secret_key) = generate_keys(config, &registry)?;
        debug!("set up {} kit", config.schema);

        let kit = Self::from_keys(public_key, secret_key, registry)?;
        Ok(Self {
            encoder: PlainEncoder::new(config.encoder_scale)?,
            ..kit
        })
    }

    pub fn generate(schema: SchemaType, key_size: usize) -> Result<Self, PheError> {
        Self::new(&KitConfig::try_with(schema, key_size)?)
    }

    /// Rebuilds a kit from existing keys, e.g. after loading them.
    ///
    /// Only the schemas are compared; a public key that does not belong to
    /// `secret_key` is not detected.
    pub fn from_keys(
        public_key: PublicKey,
        secret_key: SecretKey,
        registry: Arc<CurveRegistry>,
    ) -> Result<Self, PheError> {
        if public_key.schema() != secret_key.schema() {
            return Err(mismatch(public_key.schema(), secret_key.schema()));
        }
        register_curve(&public_key, &registry);

        Ok(Self {
            encryptor: Encryptor::new(&public_key),
            evaluator: Evaluator::new(&public_key),
            decryptor: Decryptor::new(secret_key),
            public_key,
            registry,
            encoder: PlainEncoder::default(),
        })
    }

    pub fn schema(&self) -> SchemaType {
        self.public_key.schema()
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    pub fn secret_key(&self) -> SecretKey {
        self.decryptor.secret_key()
    }

    pub fn encryptor(&self) -> &Encryptor {
        &self.encryptor
    }

    pub fn decryptor(&self) -> &Decryptor {
        &self.decryptor
    }

    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    pub fn registry(&self) -> &Arc<CurveRegistry> {
        &self.registry
    }

    pub fn encoder(&self) -> &PlainEncoder {
        &self.encoder
    }

    /// Public half of this kit, for handing to a party without the secret key.
    pub fn destination(&self) -> DestinationHeKit {
        DestinationHeKit {
            public_key: self.public_key.clone(),
            encryptor: self.encryptor.clone(),
            evaluator: self.evaluator.clone(),
            registry: self.registry.clone(),
            encoder: self.encoder,
        }
    }
}

/// Encrypt-and-evaluate kit built from a public key alone.
#[derive(Debug, Clone)]
pub struct DestinationHeKit {
    public_key: PublicKey,
    encryptor: Encryptor,
    evaluator: Evaluator,
    registry: Arc<CurveRegistry>,
    encoder: PlainEncoder,
}

impl DestinationHeKit {
    pub fn from_public_key(public_key: PublicKey, registry: Arc<CurveRegistry>) -> Self {
        register_curve(&public_key, &registry);

        Self {
            encryptor: Encryptor::new(&public_key),
            evaluator: Evaluator::new(&public_key),
            public_key,
            registry,
            encoder: PlainEncoder::default(),
        }
    }

    /// Decodes a facade public key and builds the kit around it.
    pub fn from_bytes(bytes: &[u8], registry: Arc<CurveRegistry>) -> Result<Self, PheError> {
        let public_key = PublicKey::from_bytes(bytes, &registry)?;
        Ok(Self::from_public_key(public_key, registry))
    }

    pub fn with_encoder(self, encoder: PlainEncoder) -> Self {
        Self { encoder, ..self }
    }

    pub fn schema(&self) -> SchemaType {
        self.public_key.schema()
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    pub fn encryptor(&self) -> &Encryptor {
        &self.encryptor
    }

    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    pub fn registry(&self) -> &Arc<CurveRegistry> {
        &self.registry
    }

    pub fn encoder(&self) -> &PlainEncoder {
        &self.encoder
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phe::Ciphertext;
    use crate::spi::{Decryptor as _, Encryptor as _, Evaluator as _};

    use num_bigint::BigInt;

    fn ec_config() -> KitConfig {
        KitConfig {
            schema: SchemaType::ElGamal,
            elgamal_max_plaintext: 1 << 12,
            elgamal_table_bits: 6,
            ..KitConfig::default()
        }
    }

    #[test]
    fn test_generate_each_schema() -> Result<(), PheError> {
        for schema in [SchemaType::Paillier, SchemaType::Ou] {
            let kit = HeKit::generate(schema, 512)?;
            assert_eq!(kit.schema(), schema);

            let ct = kit.encryptor().encrypt(&BigInt::from(-3))?;
            let doubled = kit.evaluator().add(&ct, &ct)?;
            assert_eq!(kit.decryptor().decrypt(&doubled)?, BigInt::from(-6));
        }

        let kit = HeKit::new(&ec_config())?;
        assert!(kit.registry().contains(EcGroup::ristretto255().id()));
        let ct = kit.encryptor().encrypt(&BigInt::from(-3))?;
        assert_eq!(kit.decryptor().decrypt(&ct)?, BigInt::from(-3));
        Ok(())
    }

    #[test]
    fn test_mixed_schemas_are_rejected() -> Result<(), PheError> {
        let paillier = HeKit::generate(SchemaType::Paillier, 512)?;
        let ec = HeKit::new(&ec_config())?;

        let p_ct = paillier.encryptor().encrypt(&BigInt::from(1))?;
        let e_ct = ec.encryptor().encrypt(&BigInt::from(1))?;

        assert!(matches!(
            paillier.evaluator().add(&p_ct, &e_ct),
            Err(PheError::SchemaMismatch(_))
        ));
        assert!(matches!(
            ec.decryptor().decrypt(&p_ct),
            Err(PheError::SchemaMismatch(_))
        ));
        assert!(matches!(
            HeKit::from_keys(
                ec.public_key().clone(),
                paillier.secret_key(),
                ec.registry().clone()
            ),
            Err(PheError::SchemaMismatch(_))
        ));
        Ok(())
    }

    #[test]
    fn test_destination_kit_works_without_secret() -> Result<(), PheError> {
        let kit = HeKit::generate(SchemaType::Paillier, 512)?;
        let bytes = kit.public_key().to_bytes()?;

        let remote = DestinationHeKit::from_bytes(&bytes, Arc::new(CurveRegistry::new()))?;
        assert_eq!(remote.public_key(), kit.public_key());

        let a = remote.encryptor().encrypt(&BigInt::from(20))?;
        let b = remote.evaluator().mul(&a, &BigInt::from(5))?;
        let wire = b.to_bytes()?;

        let received = Ciphertext::from_bytes(&wire, kit.registry())?;
        assert_eq!(kit.decryptor().decrypt(&received)?, BigInt::from(100));
        Ok(())
    }

    #[test]
    fn test_config_scale_reaches_encoder() -> Result<(), PheError> {
        let config = KitConfig {
            encoder_scale: 100,
            ..KitConfig::try_with(SchemaType::Ou, 512)?
        };
        let kit = HeKit::new(&config)?;
        assert_eq!(kit.encoder().scale(), 100);
        assert_eq!(kit.destination().encoder().scale(), 100);
        Ok(())
    }

    #[test]
    fn test_destination_encoder_override() -> Result<(), PheError> {
        let kit = HeKit::generate(SchemaType::Paillier, 512)?;
        let remote = kit.destination().with_encoder(PlainEncoder::new(1_000)?);
        assert_eq!(remote.encoder().scale(), 1_000);

        let encoded = remote.encoder().encode_f64(1.25)?;
        let ct = remote.encryptor().encrypt(&encoded)?;
        let decoded = kit.encoder().decode_f64(&kit.decryptor().decrypt(&ct)?);
        assert!((decoded - 0.125).abs() < 1e-9);
        Ok(())
    }
}
