use thiserror::Error;

/// Error for credential extraction from request metadata.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CredentialError {
    #[error("No authorization credentials found")]
    Missing,

    #[error("Invalid authorization header: expected {expected}")]
    Malformed { expected: &'static str },
}
