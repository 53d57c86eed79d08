use auth::AuthenticationError;
use auth::CredentialError;
use auth::PasswordError;
use auth::TokenError;
use thiserror::Error;

/// Error for UserId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// How an error surfaces at the API boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    BadRequest,
    Unauthorized,
    NotFound,
    Conflict,
    Internal,
}

/// Top-level error for all session operations
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    // Value object validation errors (automatically converted via #[from])
    #[error("Invalid user ID: {0}")]
    InvalidUserId(#[from] UserIdError),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    // Authentication failures
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("Credential error: {0}")]
    Credential(#[from] CredentialError),

    #[error("Token error: {0}")]
    Token(#[from] TokenError),

    /// Absent and revoked refresh tokens are deliberately indistinguishable.
    #[error("Refresh token not found")]
    RefreshTokenNotFound,

    // Domain-level errors
    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Email already exists: {0}")]
    EmailAlreadyExists(String),

    // Infrastructure errors
    #[error("Password hashing error: {0}")]
    Hashing(#[from] PasswordError),

    #[error("Token generation failed: {0}")]
    TokenGeneration(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl AuthError {
    /// Classify the error for the API boundary.
    ///
    /// Every token, credential and refresh-token failure collapses into
    /// `Unauthorized`; only internal diagnostics see the specific variant.
    pub fn class(&self) -> ErrorClass {
        match self {
            AuthError::InvalidUserId(_) | AuthError::InvalidEmail(_) => ErrorClass::BadRequest,
            AuthError::InvalidCredentials
            | AuthError::InvalidApiKey
            | AuthError::Credential(_)
            | AuthError::Token(TokenError::Malformed(_))
            | AuthError::Token(TokenError::BadSignature)
            | AuthError::Token(TokenError::Expired)
            | AuthError::RefreshTokenNotFound => ErrorClass::Unauthorized,
            AuthError::UserNotFound(_) => ErrorClass::NotFound,
            AuthError::EmailAlreadyExists(_) => ErrorClass::Conflict,
            AuthError::Token(TokenError::EncodingFailed(_))
            | AuthError::Hashing(_)
            | AuthError::TokenGeneration(_)
            | AuthError::DatabaseError(_) => ErrorClass::Internal,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.class() == ErrorClass::Unauthorized
    }
}

impl From<AuthenticationError> for AuthError {
    fn from(err: AuthenticationError) -> Self {
        match err {
            AuthenticationError::InvalidCredentials | AuthenticationError::UnusableHash(_) => {
                AuthError::InvalidCredentials
            }
            AuthenticationError::InvalidApiKey => AuthError::InvalidApiKey,
            AuthenticationError::Credential(e) => AuthError::Credential(e),
            AuthenticationError::Token(e) => AuthError::Token(e),
            AuthenticationError::RefreshToken(e) => AuthError::TokenGeneration(e.to_string()),
        }
    }
}
