//! # Ring Module
//!
//! Provides the [`Ring`] struct for representing residue rings Z_m over
//! arbitrary-precision integers, together with the number-theoretic helpers
//! every scheme is built from: fixed-base exponentiation tables, prime
//! generation and cryptographically secure sampling.

pub mod fixed_base;
pub mod helper;
pub mod math;
pub mod prime;
pub mod random;

pub use fixed_base::FixedBaseTable;
pub use helper::{l_function, lcm, to_hex};
pub use math::Ring;
