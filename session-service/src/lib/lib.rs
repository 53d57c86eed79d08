//! Credential and session layer.
//!
//! [`AuthService`](domain::session::service::AuthService) is the single entry
//! point for the host application: register, login, refresh, revoke and
//! request authorization, backed by pluggable persistence ports.

pub mod config;
pub mod domain;
pub mod outbound;

pub use domain::session;
pub use outbound::repositories;
