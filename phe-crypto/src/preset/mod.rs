//! Fixed parameters shared by every scheme.

pub mod small_primes;

/// Key size used by `generate_default` and by [`crate::phe::KitConfig::default`].
pub const DEFAULT_KEY_SIZE: usize = 2048;
/// Smallest modulus, in bits, accepted by key generation and key loading.
pub const MIN_KEY_SIZE: usize = 512;

/// Upper limit of structural retries (p == q, gcd constraints) during key generation.
pub const MAX_KEYGEN_ATTEMPTS: usize = 1_000;
/// Upper limit of candidates tested while searching for a single prime.
pub const MAX_PRIME_CANDIDATES: usize = 100_000;
/// Upper limit of draws when sampling a unit modulo n.
pub const MAX_RANDOM_ATTEMPTS: usize = 1_000;

/// Window width of [`crate::ring::FixedBaseTable`].
pub const FIXED_BASE_WINDOW_BITS: usize = 4;

/// Default fixed-point scale of [`crate::encoding::PlainEncoder`].
pub const DEFAULT_SCALE: i64 = 10_000;

/// Default bound |m| <= B of EC-ElGamal plaintexts.
pub const DEFAULT_EC_MAX_PLAINTEXT: u64 = 1 << 24;
/// Default baby-step table size (log2) of EC-ElGamal decryption.
pub const DEFAULT_EC_TABLE_BITS: u32 = 12;
/// Largest accepted baby-step table size (log2).
pub const MAX_EC_TABLE_BITS: u32 = 20;
/// Largest accepted EC-ElGamal plaintext bound.
pub const MAX_EC_MAX_PLAINTEXT: u64 = 1 << 44;
/// Largest accepted `B / 2^t`, which bounds the giant steps of one decryption.
pub const MAX_EC_GIANT_STEPS: u64 = 1 << 24;
