use std::sync::Arc;

use async_trait::async_trait;
use auth::credentials;
use auth::AuthenticationError;
use auth::Authenticator;

use crate::session::errors::AuthError;
use crate::session::models::EmailAddress;
use crate::session::models::RegisterCommand;
use crate::session::models::Session;
use crate::session::models::UpdateCredentialsCommand;
use crate::session::models::User;
use crate::session::models::UserId;
use crate::session::ports::AuthServicePort;
use crate::session::ports::CredentialRepository;
use crate::session::ports::RefreshTokenRepository;

/// Domain service implementation for authentication and sessions.
///
/// Concrete implementation of AuthServicePort with dependency injection.
/// Holds no mutable state of its own; the only shared state is whatever the
/// injected repositories persist.
pub struct AuthService<CR, RR>
where
    CR: CredentialRepository,
    RR: RefreshTokenRepository,
{
    credentials: Arc<CR>,
    refresh_tokens: Arc<RR>,
    authenticator: Arc<Authenticator>,
}

impl<CR, RR> AuthService<CR, RR>
where
    CR: CredentialRepository,
    RR: RefreshTokenRepository,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `credentials` - User credential persistence
    /// * `refresh_tokens` - Refresh token persistence
    /// * `authenticator` - Hashing and token primitives bound to the process secret
    pub fn new(
        credentials: Arc<CR>,
        refresh_tokens: Arc<RR>,
        authenticator: Arc<Authenticator>,
    ) -> Self {
        Self {
            credentials,
            refresh_tokens,
            authenticator,
        }
    }
}

#[async_trait]
impl<CR, RR> AuthServicePort for AuthService<CR, RR>
where
    CR: CredentialRepository,
    RR: RefreshTokenRepository,
{
    async fn register(&self, command: RegisterCommand) -> Result<User, AuthError> {
        let password_hash = self.authenticator.hash_password(&command.password)?;

        let user = self
            .credentials
            .create(&command.email, &password_hash)
            .await?;

        tracing::info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    async fn login(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        // Unparseable, unknown and wrong-password logins must look identical.
        let email =
            EmailAddress::new(email.to_string()).map_err(|_| AuthError::InvalidCredentials)?;

        let user = match self.credentials.find_by_email(&email).await {
            Ok(user) => user,
            Err(AuthError::UserNotFound(_)) => {
                tracing::debug!("Login rejected: unknown email");
                return Err(AuthError::InvalidCredentials);
            }
            Err(e) => return Err(e),
        };

        let tokens = self
            .authenticator
            .authenticate(password, &user.password_hash, user.id.0)
            .map_err(|e| {
                match &e {
                    AuthenticationError::UnusableHash(cause) => tracing::warn!(
                        user_id = %user.id,
                        error = %cause,
                        "Stored password hash unusable"
                    ),
                    _ => tracing::debug!(user_id = %user.id, error = %e, "Login rejected"),
                }
                AuthError::from(e)
            })?;

        let stored = self
            .refresh_tokens
            .insert(&user.id, &tokens.refresh_token)
            .await?;

        tracing::info!(user_id = %user.id, "User logged in");
        Ok(Session {
            user,
            access_token: tokens.access_token,
            refresh_token: stored.token,
        })
    }

    async fn refresh(&self, authorization: Option<&str>) -> Result<String, AuthError> {
        let token = credentials::bearer_token(authorization)?;

        let user_id = self
            .refresh_tokens
            .find_user_by_token(&token)
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Refresh rejected");
                e
            })?;

        let access_token = self.authenticator.issue_access_token(user_id.0)?;

        tracing::debug!(user_id = %user_id, "Access token refreshed");
        Ok(access_token)
    }

    async fn revoke(&self, authorization: Option<&str>) -> Result<(), AuthError> {
        let token = credentials::bearer_token(authorization)?;

        self.refresh_tokens.mark_revoked(&token).await?;

        tracing::info!("Refresh token revoked");
        Ok(())
    }

    async fn authorize(&self, authorization: Option<&str>) -> Result<UserId, AuthError> {
        self.authenticator
            .authorize(authorization)
            .map(UserId)
            .map_err(|e| {
                tracing::warn!(error = %e, "Access token rejected");
                AuthError::from(e)
            })
    }

    async fn authorize_api_key(&self, authorization: Option<&str>) -> Result<(), AuthError> {
        self.authenticator
            .verify_api_key(authorization)
            .map_err(|e| {
                tracing::warn!(error = %e, "API key rejected");
                AuthError::from(e)
            })
    }

    async fn update_credentials(
        &self,
        authorization: Option<&str>,
        command: UpdateCredentialsCommand,
    ) -> Result<User, AuthError> {
        let user_id = self.authorize(authorization).await?;

        let password_hash = self.authenticator.hash_password(&command.password)?;

        let user = self
            .credentials
            .update(&user_id, &command.email, &password_hash)
            .await?;

        tracing::info!(user_id = %user.id, "User credentials updated");
        Ok(user)
    }

    async fn get_user(&self, id: &UserId) -> Result<User, AuthError> {
        self.credentials.find_by_id(id).await
    }
}
