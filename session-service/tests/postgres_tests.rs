//! PostgreSQL adapter tests.
//!
//! Run with a disposable database:
//! `DATABASE_URL=postgres://... cargo test -p session-service -- --ignored`

use session_service::domain::session::errors::AuthError;
use session_service::domain::session::models::EmailAddress;
use session_service::domain::session::ports::CredentialRepository;
use session_service::domain::session::ports::RefreshTokenRepository;
use session_service::repositories::run_migrations;
use session_service::repositories::PostgresRefreshTokenRepository;
use session_service::repositories::PostgresUserRepository;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

async fn pool() -> PgPool {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&url)
        .await
        .expect("Failed to connect to PostgreSQL");
    run_migrations(&pool).await.expect("Failed to run migrations");
    pool
}

fn unique_email() -> EmailAddress {
    EmailAddress::new(format!("{}@example.com", Uuid::new_v4().simple())).unwrap()
}

#[tokio::test]
#[ignore = "requires PostgreSQL via DATABASE_URL"]
async fn test_user_repository_round_trip() {
    let repository = PostgresUserRepository::new(pool().await);
    let email = unique_email();

    let created = repository.create(&email, "$argon2id$hash").await.unwrap();
    let found = repository.find_by_email(&email).await.unwrap();
    assert_eq!(found.id, created.id);

    let duplicate = repository.create(&email, "$argon2id$other").await;
    assert!(matches!(duplicate, Err(AuthError::EmailAlreadyExists(_))));

    let new_email = unique_email();
    let updated = repository
        .update(&created.id, &new_email, "$argon2id$new")
        .await
        .unwrap();
    assert_eq!(updated.email, new_email);
    assert_eq!(updated.password_hash, "$argon2id$new");

    assert!(matches!(
        repository.find_by_email(&email).await,
        Err(AuthError::UserNotFound(_))
    ));
}

#[tokio::test]
#[ignore = "requires PostgreSQL via DATABASE_URL"]
async fn test_refresh_token_revocation() {
    let pool = pool().await;
    let users = PostgresUserRepository::new(pool.clone());
    let tokens = PostgresRefreshTokenRepository::new(pool);

    let user = users.create(&unique_email(), "$argon2id$hash").await.unwrap();
    let token = auth::generate_refresh_token().unwrap();

    let record = tokens.insert(&user.id, &token).await.unwrap();
    assert!(!record.is_revoked());
    assert_eq!(tokens.find_user_by_token(&token).await.unwrap(), user.id);

    tokens.mark_revoked(&token).await.unwrap();
    tokens.mark_revoked(&token).await.unwrap();

    assert!(matches!(
        tokens.find_user_by_token(&token).await,
        Err(AuthError::RefreshTokenNotFound)
    ));
    assert!(matches!(
        tokens.find_user_by_token("unknown").await,
        Err(AuthError::RefreshTokenNotFound)
    ));
}
