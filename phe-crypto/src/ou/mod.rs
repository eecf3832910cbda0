//! # Okamoto–Uchiyama
//!
//! Additively homomorphic scheme over Z_n with `n = p²q`. Ciphertexts are
//! half the size of Paillier's for the same modulus, at the price of a much
//! smaller plaintext space: `|m| <= 2^(⌈bits(n)/3⌉ − 2)`.

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
