use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// Access token claims.
///
/// Carries only what an access token needs to prove: who the bearer is and
/// the window in which that proof holds. `jti` makes every issued token
/// distinct, even two minted for the same subject within one second.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user identifier)
    pub sub: Uuid,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// JWT ID (unique token identifier)
    pub jti: Uuid,
}

impl Claims {
    /// Create claims for `subject`, issued now and expiring after `ttl`.
    ///
    /// A negative `ttl` produces claims that are already expired.
    pub fn for_subject(subject: Uuid, ttl: Duration) -> Self {
        let now = Utc::now();
        let expiration = now + ttl;

        Self {
            sub: subject,
            iat: now.timestamp(),
            exp: expiration.timestamp(),
            jti: Uuid::new_v4(),
        }
    }

    /// Set issued at (Unix timestamp).
    pub fn with_issued_at(mut self, iat: i64) -> Self {
        self.iat = iat;
        self
    }

    /// Set expiration (Unix timestamp).
    pub fn with_expiration(mut self, exp: i64) -> Self {
        self.exp = exp;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_subject() {
        let user_id = Uuid::new_v4();
        let claims = Claims::for_subject(user_id, Duration::hours(1));

        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.exp - claims.iat, 60 * 60);
    }

    #[test]
    fn test_token_ids_are_unique() {
        let user_id = Uuid::new_v4();
        let first = Claims::for_subject(user_id, Duration::hours(1));
        let second = Claims::for_subject(user_id, Duration::hours(1));

        assert_ne!(first.jti, second.jti);
    }

    #[test]
    fn test_negative_ttl_is_already_expired() {
        let claims = Claims::for_subject(Uuid::new_v4(), Duration::seconds(-1));

        assert_eq!(claims.exp - claims.iat, -1);
    }

    #[test]
    fn test_with_timestamps() {
        let claims = Claims::for_subject(Uuid::new_v4(), Duration::zero())
            .with_issued_at(900)
            .with_expiration(1000);

        assert_eq!(claims.iat, 900);
        assert_eq!(claims.exp, 1000);
    }
}
