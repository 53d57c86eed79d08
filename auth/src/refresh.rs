//! Opaque refresh token generation.
//!
//! Refresh tokens carry no claims. They are 256 random bits rendered as
//! lowercase hex, and their validity lives entirely in the persistence layer.

use rand::rngs::OsRng;
use rand::RngCore;
use thiserror::Error;

/// Number of random bytes in a refresh token.
pub const REFRESH_TOKEN_BYTES: usize = 32;

/// Length of the hex-encoded refresh token.
pub const REFRESH_TOKEN_LENGTH: usize = REFRESH_TOKEN_BYTES * 2;

/// Error type for refresh token generation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RefreshTokenError {
    #[error("Random source failed: {0}")]
    RandomSourceFailed(String),
}

/// Generate a new refresh token from the operating system's CSPRNG.
///
/// # Returns
/// 64 character lowercase hex string
///
/// # Errors
/// * `RandomSourceFailed` - The OS random source could not be read
pub fn generate_refresh_token() -> Result<String, RefreshTokenError> {
    let mut bytes = [0u8; REFRESH_TOKEN_BYTES];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| RefreshTokenError::RandomSourceFailed(e.to_string()))?;

    Ok(hex::encode(bytes))
}
