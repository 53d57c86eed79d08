use chrono::Duration;
use uuid::Uuid;

use crate::credentials;
use crate::credentials::CredentialError;
use crate::jwt::JwtHandler;
use crate::jwt::TokenError;
use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::refresh;
use crate::refresh::RefreshTokenError;

/// Lifetime in seconds of every access token issued at login or refresh.
pub const ACCESS_TOKEN_TTL_SECONDS: i64 = 60 * 60;

/// Authentication coordinator combining password verification, access token
/// signing and refresh token generation.
///
/// Holds the process-wide signing secret and API key as plain values, so a
/// test can build as many independently keyed instances as it needs.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
    api_key: Option<String>,
}

/// Result of successful authentication.
#[derive(Debug, Clone)]
pub struct AuthenticationResult {
    /// Short-lived signed access token
    pub access_token: String,
    /// Long-lived opaque refresh token (not yet persisted)
    pub refresh_token: String,
}

/// Authentication operation errors.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The stored hash could not be used. Callers report this exactly like
    /// `InvalidCredentials`; the cause is kept for diagnostics.
    #[error("Stored password hash unusable: {0}")]
    UnusableHash(PasswordError),

    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("Credential error: {0}")]
    Credential(#[from] CredentialError),

    #[error("Token error: {0}")]
    Token(#[from] TokenError),

    #[error("Refresh token error: {0}")]
    RefreshToken(#[from] RefreshTokenError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for access token signing
    ///
    /// # Returns
    /// Authenticator with default password hashing and no API key configured
    pub fn new(jwt_secret: &[u8]) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler: JwtHandler::new(jwt_secret),
            api_key: None,
        }
    }

    /// Set the shared API key accepted for service-to-service calls.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Replace the password hasher (e.g. with different cost parameters).
    pub fn with_password_hasher(mut self, password_hasher: PasswordHasher) -> Self {
        self.password_hasher = password_hasher;
        self
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and mint a token pair for `subject`.
    ///
    /// A wrong password yields `InvalidCredentials`. An unreadable stored hash
    /// yields `UnusableHash`, which carries the hashing error and must be
    /// surfaced to callers as `InvalidCredentials`.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `subject` - User the tokens are issued for
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `UnusableHash` - Stored hash is malformed or uses another algorithm
    /// * `Token` - Access token signing failed
    /// * `RefreshToken` - Random source failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        subject: Uuid,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        match self.password_hasher.verify(password, stored_hash) {
            Ok(true) => {}
            Ok(false) => return Err(AuthenticationError::InvalidCredentials),
            Err(e) => return Err(AuthenticationError::UnusableHash(e)),
        }

        let access_token = self.issue_access_token(subject)?;
        let refresh_token = refresh::generate_refresh_token()?;

        Ok(AuthenticationResult {
            access_token,
            refresh_token,
        })
    }

    /// Issue an access token without password verification.
    ///
    /// Used by the refresh flow once the refresh token has been resolved.
    pub fn issue_access_token(&self, subject: Uuid) -> Result<String, TokenError> {
        self.jwt_handler
            .issue(subject, Duration::seconds(ACCESS_TOKEN_TTL_SECONDS))
    }

    /// Validate an access token and return its subject.
    pub fn validate_token(&self, token: &str) -> Result<Uuid, TokenError> {
        self.jwt_handler.verify(token)
    }

    /// Authorize a request from its `Authorization` header value.
    ///
    /// # Errors
    /// * `Credential` - Header missing or not a bearer credential
    /// * `Token` - Access token is malformed, badly signed or expired
    pub fn authorize(&self, authorization: Option<&str>) -> Result<Uuid, AuthenticationError> {
        let token = credentials::bearer_token(authorization)?;
        Ok(self.validate_token(&token)?)
    }

    /// Check an `ApiKey` authorization header against the configured key.
    ///
    /// Fails closed when no key is configured.
    ///
    /// # Errors
    /// * `Credential` - Header missing or not an API key credential
    /// * `InvalidApiKey` - Key does not match
    pub fn verify_api_key(&self, authorization: Option<&str>) -> Result<(), AuthenticationError> {
        let presented = credentials::api_key(authorization)?;

        match &self.api_key {
            Some(expected) if constant_time_eq(&presented, expected) => Ok(()),
            _ => Err(AuthenticationError::InvalidApiKey),
        }
    }
}

/// Compare two strings without short-circuiting on the first difference.
pub fn constant_time_eq(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    a.bytes()
        .zip(b.bytes())
        .fold(0u8, |acc, (x, y)| acc | (x ^ y))
        == 0
}
