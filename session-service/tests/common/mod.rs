#![allow(dead_code)]

use std::sync::Arc;

use auth::Authenticator;
use auth::HashParams;
use auth::JwtHandler;
use auth::PasswordHasher;
use session_service::domain::session::models::EmailAddress;
use session_service::domain::session::models::RegisterCommand;
use session_service::domain::session::service::AuthService;
use session_service::repositories::InMemoryCredentialRepository;
use session_service::repositories::InMemoryRefreshTokenRepository;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const API_KEY: &str = "f271c81ff7084ee5b99a5091b42d486e";

pub type InMemoryAuthService =
    AuthService<InMemoryCredentialRepository, InMemoryRefreshTokenRepository>;

/// Test application wired to in-memory persistence
pub struct TestApp {
    pub service: InMemoryAuthService,
    pub credentials: Arc<InMemoryCredentialRepository>,
    pub refresh_tokens: Arc<InMemoryRefreshTokenRepository>,
    pub jwt_handler: JwtHandler,
}

impl TestApp {
    pub fn spawn() -> Self {
        let credentials = Arc::new(InMemoryCredentialRepository::new());
        let refresh_tokens = Arc::new(InMemoryRefreshTokenRepository::new());

        let service = AuthService::new(
            Arc::clone(&credentials),
            Arc::clone(&refresh_tokens),
            Arc::new(authenticator()),
        );

        Self {
            service,
            credentials,
            refresh_tokens,
            jwt_handler: JwtHandler::new(JWT_SECRET),
        }
    }
}

/// Authenticator with cheap Argon2 parameters to keep tests fast
pub fn authenticator() -> Authenticator {
    Authenticator::new(JWT_SECRET)
        .with_api_key(API_KEY)
        .with_password_hasher(PasswordHasher::with_params(HashParams {
            memory_kib: 1024,
            iterations: 1,
            ..HashParams::DEFAULT
        }))
}

pub fn register_command(email: &str, password: &str) -> RegisterCommand {
    RegisterCommand::new(
        EmailAddress::new(email.to_string()).expect("Invalid test email"),
        password.to_string(),
    )
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}
