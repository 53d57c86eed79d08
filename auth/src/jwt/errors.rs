use thiserror::Error;

/// Error type for access token operations.
///
/// The three verification failures are kept apart for diagnostics only;
/// callers at the API boundary treat all of them as "unauthorized".
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is malformed: {0}")]
    Malformed(String),

    #[error("Token signature is invalid")]
    BadSignature,

    #[error("Token is expired")]
    Expired,
}
