//! In-memory repositories.
//!
//! Suitable for tests and for embedding the service without a database.
//! Each map sits behind a [`tokio::sync::RwLock`], so a write (e.g. a
//! revocation) is visible to every read that starts after it.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::session::models::EmailAddress;
use crate::domain::session::models::RefreshToken;
use crate::domain::session::models::User;
use crate::domain::session::models::UserId;
use crate::domain::session::ports::CredentialRepository;
use crate::domain::session::ports::RefreshTokenRepository;
use crate::session::errors::AuthError;

#[derive(Default)]
pub struct InMemoryCredentialRepository {
    users: RwLock<HashMap<UserId, User>>,
}

impl InMemoryCredentialRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialRepository for InMemoryCredentialRepository {
    async fn create(&self, email: &EmailAddress, password_hash: &str) -> Result<User, AuthError> {
        let mut users = self.users.write().await;

        if users.values().any(|u| &u.email == email) {
            return Err(AuthError::EmailAlreadyExists(email.to_string()));
        }

        let now = Utc::now();
        let user = User {
            id: UserId::new(),
            email: email.clone(),
            password_hash: password_hash.to_string(),
            created_at: now,
            updated_at: now,
        };
        users.insert(user.id, user.clone());

        Ok(user)
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<User, AuthError> {
        self.users
            .read()
            .await
            .values()
            .find(|u| &u.email == email)
            .cloned()
            .ok_or_else(|| AuthError::UserNotFound(email.to_string()))
    }

    async fn find_by_id(&self, id: &UserId) -> Result<User, AuthError> {
        self.users
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| AuthError::UserNotFound(id.to_string()))
    }

    async fn update(
        &self,
        id: &UserId,
        email: &EmailAddress,
        password_hash: &str,
    ) -> Result<User, AuthError> {
        let mut users = self.users.write().await;

        if users.values().any(|u| &u.email == email && u.id != *id) {
            return Err(AuthError::EmailAlreadyExists(email.to_string()));
        }

        let user = users
            .get_mut(id)
            .ok_or_else(|| AuthError::UserNotFound(id.to_string()))?;
        user.email = email.clone();
        user.password_hash = password_hash.to_string();
        user.updated_at = Utc::now();

        Ok(user.clone())
    }
}

#[derive(Default)]
pub struct InMemoryRefreshTokenRepository {
    tokens: RwLock<HashMap<String, RefreshToken>>,
}

impl InMemoryRefreshTokenRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the full record, revoked or not. Intended for audits and tests.
    pub async fn get(&self, token: &str) -> Option<RefreshToken> {
        self.tokens.read().await.get(token).cloned()
    }
}

#[async_trait]
impl RefreshTokenRepository for InMemoryRefreshTokenRepository {
    async fn insert(&self, user_id: &UserId, token: &str) -> Result<RefreshToken, AuthError> {
        let mut tokens = self.tokens.write().await;

        if tokens.contains_key(token) {
            return Err(AuthError::DatabaseError(
                "duplicate refresh token".to_string(),
            ));
        }

        let now = Utc::now();
        let record = RefreshToken {
            token: token.to_string(),
            user_id: *user_id,
            created_at: now,
            updated_at: now,
            revoked_at: None,
        };
        tokens.insert(record.token.clone(), record.clone());

        Ok(record)
    }

    async fn find_user_by_token(&self, token: &str) -> Result<UserId, AuthError> {
        match self.tokens.read().await.get(token) {
            Some(record) if !record.is_revoked() => Ok(record.user_id),
            _ => Err(AuthError::RefreshTokenNotFound),
        }
    }

    async fn mark_revoked(&self, token: &str) -> Result<(), AuthError> {
        if let Some(record) = self.tokens.write().await.get_mut(token) {
            if record.revoked_at.is_none() {
                let now = Utc::now();
                record.revoked_at = Some(now);
                record.updated_at = now;
            }
        }

        Ok(())
    }
}
