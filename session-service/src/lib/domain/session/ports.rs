use async_trait::async_trait;

use crate::session::errors::AuthError;
use crate::session::models::EmailAddress;
use crate::session::models::RefreshToken;
use crate::session::models::RegisterCommand;
use crate::session::models::Session;
use crate::session::models::UpdateCredentialsCommand;
use crate::session::models::User;
use crate::session::models::UserId;

/// Port for the authentication operations the application layer calls.
///
/// Header-bearing operations take the raw `Authorization` header value
/// (`None` when the header is absent).
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new user.
    ///
    /// # Errors
    /// * `Hashing` - Password hashing failed
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn register(&self, command: RegisterCommand) -> Result<User, AuthError>;

    /// Verify email and password and open a session.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email, wrong password or unusable stored hash
    /// * `DatabaseError` - Database operation failed
    async fn login(&self, email: &str, password: &str) -> Result<Session, AuthError>;

    /// Mint a new access token from a bearer refresh token.
    ///
    /// The refresh token is not rotated.
    ///
    /// # Errors
    /// * `Credential` - Header missing or not a bearer credential
    /// * `RefreshTokenNotFound` - Token unknown or revoked
    async fn refresh(&self, authorization: Option<&str>) -> Result<String, AuthError>;

    /// Revoke a bearer refresh token. Idempotent.
    ///
    /// # Errors
    /// * `Credential` - Header missing or not a bearer credential
    /// * `DatabaseError` - Database operation failed
    async fn revoke(&self, authorization: Option<&str>) -> Result<(), AuthError>;

    /// Resolve a bearer access token to its user.
    ///
    /// # Errors
    /// * `Credential` - Header missing or not a bearer credential
    /// * `Token` - Token malformed, badly signed or expired
    async fn authorize(&self, authorization: Option<&str>) -> Result<UserId, AuthError>;

    /// Check a service-to-service `ApiKey` header.
    ///
    /// # Errors
    /// * `Credential` - Header missing or not an API key credential
    /// * `InvalidApiKey` - Key does not match the configured value
    async fn authorize_api_key(&self, authorization: Option<&str>) -> Result<(), AuthError>;

    /// Replace the email and password of the user owning the access token.
    ///
    /// # Errors
    /// * `Credential` / `Token` - Request is not authorized
    /// * `UserNotFound` - User no longer exists
    /// * `EmailAlreadyExists` - New email is already registered
    async fn update_credentials(
        &self,
        authorization: Option<&str>,
        command: UpdateCredentialsCommand,
    ) -> Result<User, AuthError>;

    /// Retrieve a user by identifier.
    ///
    /// # Errors
    /// * `UserNotFound` - User does not exist
    async fn get_user(&self, id: &UserId) -> Result<User, AuthError>;
}

/// Persistence operations for user credentials.
#[async_trait]
pub trait CredentialRepository: Send + Sync + 'static {
    /// Persist a new user.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, email: &EmailAddress, password_hash: &str) -> Result<User, AuthError>;

    /// Retrieve user by email address.
    ///
    /// # Errors
    /// * `UserNotFound` - No user with this email
    /// * `DatabaseError` - Database operation failed
    async fn find_by_email(&self, email: &EmailAddress) -> Result<User, AuthError>;

    /// Retrieve user by identifier.
    ///
    /// # Errors
    /// * `UserNotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &UserId) -> Result<User, AuthError>;

    /// Replace email and password hash of an existing user.
    ///
    /// # Errors
    /// * `UserNotFound` - User does not exist
    /// * `EmailAlreadyExists` - New email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn update(
        &self,
        id: &UserId,
        email: &EmailAddress,
        password_hash: &str,
    ) -> Result<User, AuthError>;
}

/// Persistence operations for refresh tokens.
///
/// Implementations must make a revocation visible to every later lookup of
/// the same token.
#[async_trait]
pub trait RefreshTokenRepository: Send + Sync + 'static {
    /// Store a freshly generated token for `user_id`.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn insert(&self, user_id: &UserId, token: &str) -> Result<RefreshToken, AuthError>;

    /// Resolve a token to the user it is bound to.
    ///
    /// # Errors
    /// * `RefreshTokenNotFound` - Token does not exist or has been revoked
    /// * `DatabaseError` - Database operation failed
    async fn find_user_by_token(&self, token: &str) -> Result<UserId, AuthError>;

    /// Mark a token as revoked, keeping the record.
    ///
    /// Revoking an unknown or already revoked token succeeds and leaves the
    /// original revocation time untouched.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn mark_revoked(&self, token: &str) -> Result<(), AuthError>;
}
