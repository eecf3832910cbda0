//! # Paillier
//!
//! Additively homomorphic scheme over Z_{n²} with `n = p·q`. Encryption uses
//! the `h_s` variant: the blinding factor is `h_s^r` for a short `r`, computed
//! through a fixed-base table, instead of a full-width `r^n`.
//!
//! Plaintexts live in `[−n/2, n/2]`; results of homomorphic operations are
//! reduced modulo n and come back centered into that range.

pub mod decryptor;
pub mod encryptor;
pub mod evaluator;
pub mod key_generator;
pub mod keys;

pub use decryptor::Decryptor;
pub use encryptor::Encryptor;
pub use evaluator::Evaluator;
pub use key_generator::KeyGenerator;
pub use keys::{Ciphertext, PublicKey, SecretKey};
