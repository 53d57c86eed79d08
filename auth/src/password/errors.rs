use thiserror::Error;

/// Error type for password operations.
///
/// A malformed stored hash is reported as an error and is never folded
/// into a `false` verification result.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Malformed password hash: {0}")]
    MalformedHash(String),

    #[error("Unsupported hash algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("Password verification failed: {0}")]
    VerificationFailed(String),
}
