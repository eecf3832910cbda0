//! # EC-ElGamal
//!
//! Additive ElGamal over ristretto255: `m` is encoded as `m·G`, so decryption
//! ends in a bounded discrete-log search and plaintexts must stay within a
//! configured `[−B, B]`.
//!
//! Curves are named by (curve, library) and identified on the wire by a
//! 64-bit hash; see [`CurveRegistry`].

pub(crate) mod baby_step;
pub mod ciphertext;
pub mod curve;
pub mod decryptor;
pub mod encryptor;
pub mod evaluator;
pub mod key_generator;
pub mod keys;
pub mod registry;

pub use ciphertext::Ciphertext;
pub use curve::{EcGroup, curve_id};
pub use decryptor::Decryptor;
pub use encryptor::Encryptor;
pub use evaluator::Evaluator;
pub use key_generator::KeyGenerator;
pub use keys::{PublicKey, SecretKey};
pub use registry::CurveRegistry;
