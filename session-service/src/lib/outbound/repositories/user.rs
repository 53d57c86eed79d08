use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::session::models::EmailAddress;
use crate::domain::session::models::User;
use crate::domain::session::models::UserId;
use crate::domain::session::ports::CredentialRepository;
use crate::session::errors::AuthError;

const USER_COLUMNS: &str = "id, email, password_hash, created_at, updated_at";

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = AuthError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        // A stored email that no longer validates is a data fault, not bad input.
        let id = UserId(row.id);
        let email = EmailAddress::new(row.email).map_err(|e| {
            AuthError::DatabaseError(format!("Stored user {} is corrupt: {}", id, e))
        })?;

        Ok(User {
            id,
            email,
            password_hash: row.password_hash,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_write_error(e: sqlx::Error, email: &EmailAddress) -> AuthError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() && db_err.constraint() == Some("users_email_key") {
            return AuthError::EmailAlreadyExists(email.to_string());
        }
    }
    AuthError::DatabaseError(e.to_string())
}

#[async_trait]
impl CredentialRepository for PostgresUserRepository {
    async fn create(&self, email: &EmailAddress, password_hash: &str) -> Result<User, AuthError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            INSERT INTO users (id, email, password_hash, created_at, updated_at)
            VALUES ($1, $2, $3, NOW(), NOW())
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(email.as_str())
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, email))?;

        row.try_into()
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<User, AuthError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {} FROM users WHERE email = $1",
            USER_COLUMNS
        ))
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AuthError::DatabaseError(e.to_string()))?;

        row.ok_or_else(|| AuthError::UserNotFound(email.to_string()))?
            .try_into()
    }

    async fn find_by_id(&self, id: &UserId) -> Result<User, AuthError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {} FROM users WHERE id = $1",
            USER_COLUMNS
        ))
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AuthError::DatabaseError(e.to_string()))?;

        row.ok_or_else(|| AuthError::UserNotFound(id.to_string()))?
            .try_into()
    }

    async fn update(
        &self,
        id: &UserId,
        email: &EmailAddress,
        password_hash: &str,
    ) -> Result<User, AuthError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            UPDATE users
            SET email = $2, password_hash = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(id.0)
        .bind(email.as_str())
        .bind(password_hash)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, email))?;

        row.ok_or_else(|| AuthError::UserNotFound(id.to_string()))?
            .try_into()
    }
}
