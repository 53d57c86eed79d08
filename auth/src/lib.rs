//! Authentication primitives library
//!
//! Provides the credential and token building blocks used by services:
//! - Password hashing (Argon2id)
//! - Signed, time-bounded access tokens (HS256 JWT)
//! - Opaque refresh token generation
//! - `Authorization` header parsing (bearer tokens and API keys)
//! - Authentication coordination
//!
//! Nothing here performs I/O. Persistence of users and refresh tokens belongs
//! to the calling service.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Access Tokens
//! ```
//! use auth::JwtHandler;
//! use chrono::Duration;
//! use uuid::Uuid;
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!");
//! let user_id = Uuid::new_v4();
//! let token = handler.issue(user_id, Duration::hours(1)).unwrap();
//! assert_eq!(handler.verify(&token).unwrap(), user_id);
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::Authenticator;
//! use uuid::Uuid;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!");
//! let user_id = Uuid::new_v4();
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and mint tokens
//! let result = auth.authenticate("password123", &hash, user_id).unwrap();
//!
//! // Authorize a request
//! let header = format!("Bearer {}", result.access_token);
//! assert_eq!(auth.authorize(Some(header.as_str())).unwrap(), user_id);
//! ```

pub mod authenticator;
pub mod credentials;
pub mod jwt;
pub mod password;
pub mod refresh;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use authenticator::ACCESS_TOKEN_TTL_SECONDS;
pub use credentials::CredentialError;
pub use jwt::Claims;
pub use jwt::JwtHandler;
pub use jwt::TokenError;
pub use password::HashParams;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use refresh::generate_refresh_token;
pub use refresh::RefreshTokenError;
