#[derive(thiserror::Error, Debug)]
pub enum PheError {
    /// Plaintext outside the symmetric domain, or ciphertext outside (0, modulus).
    #[error("DomainError: {0}")]
    Domain(String),
    /// Structurally invalid key material (zero modulus, non-prime factors, ...).
    #[error("KeyStateError: {0}")]
    KeyState(String),
    /// Error when trying to find a modular inverse that doesn't exist (gcd(a, m) != 1).
    #[error("NoInverse: {0}")]
    NoInverse(String),
    /// Error when creating a ring with an invalid modulus (m <= 1).
    #[error("InvalidModulus: {0}")]
    InvalidModulus(String),

    #[error("InvalidParameters: {0}")]
    InvalidParameters(String),
    #[error("Key generation failed: {0}")]
    KeyGeneration(String),
    #[error("Randomness source exhausted: {0}")]
    RandomnessExhausted(String),

    #[error("Schema mismatch: {0}")]
    SchemaMismatch(String),
    #[error("Curve with id {0:#018x} is not registered")]
    UnknownCurve(u64),
    #[error("Unsupported curve: {0}")]
    UnsupportedCurve(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Binary serialization: {0}")]
    Bincode(#[from] bincode::Error),
    #[error("Data serialization: {0}")]
    Json(#[from] serde_json::Error),
}
