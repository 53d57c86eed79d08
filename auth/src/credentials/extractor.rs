//! Parsing of `Authorization` header values.
//!
//! Both extractors are pure: they take the raw header value (or `None` when
//! the header is absent) and never touch I/O.

use super::errors::CredentialError;

/// Bearer scheme prefix, including the separating space.
pub const BEARER_PREFIX: &str = "Bearer ";

/// API key scheme prefix. No separator is required before trimming.
pub const API_KEY_PREFIX: &str = "ApiKey";

/// Extract a bearer token from an `Authorization` header value.
///
/// The prefix match is exact and case-sensitive.
///
/// # Errors
/// * `Missing` - Header absent or empty
/// * `Malformed` - Header does not start with `"Bearer "`
pub fn bearer_token(header: Option<&str>) -> Result<String, CredentialError> {
    strip_scheme(header, BEARER_PREFIX)
}

/// Extract an API key from an `Authorization` header value.
///
/// # Errors
/// * `Missing` - Header absent or empty
/// * `Malformed` - Header does not start with `"ApiKey"`
pub fn api_key(header: Option<&str>) -> Result<String, CredentialError> {
    strip_scheme(header, API_KEY_PREFIX)
}

fn strip_scheme(header: Option<&str>, prefix: &'static str) -> Result<String, CredentialError> {
    let value = match header {
        Some(value) if !value.is_empty() => value,
        _ => return Err(CredentialError::Missing),
    };

    value
        .strip_prefix(prefix)
        .map(|rest| rest.trim().to_string())
        .ok_or(CredentialError::Malformed { expected: prefix })
}
