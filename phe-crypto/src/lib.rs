//! Partial homomorphic encryption: Paillier, Okamoto–Uchiyama and EC-ElGamal
//! behind one set of role traits.
//!
//! Pick a scheme module ([`paillier`], [`ou`], [`elgamal`]) for statically
//! dispatched types, or [`phe::HeKit`] to choose the scheme at runtime.

pub mod codec;
pub mod elgamal;
pub mod encoding;
pub mod errors;
pub mod ou;
pub mod paillier;
pub mod phe;
pub mod preset;
pub mod ring;
pub mod spi;

pub use errors::PheError;
pub use phe::{DestinationHeKit, HeKit, KitConfig, SchemaType};
pub use spi::{Decryptor, Encryptor, Evaluator, KeyGenerator, Plaintext};
