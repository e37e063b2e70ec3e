use std::fmt;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// Discriminates access tokens from refresh tokens.
///
/// A refresh-kind token must never be accepted where an access token
/// is expected, and vice versa; the codec enforces this on decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Access => write!(f, "access"),
            TokenKind::Refresh => write!(f, "refresh"),
        }
    }
}

/// Signed claim set carried inside a token.
///
/// Invariant: `exp > iat`, guaranteed by construction from a positive
/// lifetime.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClaimSet {
    /// Subject (opaque user identifier)
    pub sub: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// OAuth2 scope, may be empty
    #[serde(default)]
    pub scope: String,

    /// Token kind discriminator
    pub kind: TokenKind,

    /// Unique token identifier; makes concurrently issued tokens for
    /// the same subject distinct
    pub jti: String,
}

impl ClaimSet {
    /// Build a claim set for `subject` issued at `now` with the given
    /// lifetime.
    pub fn new(
        subject: impl Into<String>,
        kind: TokenKind,
        now: DateTime<Utc>,
        lifetime: Duration,
    ) -> Self {
        Self {
            sub: subject.into(),
            iat: now.timestamp(),
            exp: (now + lifetime).timestamp(),
            scope: String::new(),
            kind,
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// Set the scope claim.
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = scope.into();
        self
    }

    /// Issuance time as a UTC timestamp.
    pub fn issued_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.iat, 0).unwrap_or_default()
    }

    /// Expiration time as a UTC timestamp.
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_default()
    }

    /// Check whether the claim set is expired at `now`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_claims() {
        let now = Utc::now();
        let claims = ClaimSet::new("user123", TokenKind::Access, now, Duration::minutes(15));

        assert_eq!(claims.sub, "user123");
        assert_eq!(claims.kind, TokenKind::Access);
        assert_eq!(claims.exp - claims.iat, 15 * 60);
        assert!(claims.exp > claims.iat);
        assert!(claims.scope.is_empty());
        assert!(!claims.jti.is_empty());
    }

    #[test]
    fn test_jti_is_unique_per_claim_set() {
        let now = Utc::now();
        let first = ClaimSet::new("user123", TokenKind::Access, now, Duration::minutes(15));
        let second = ClaimSet::new("user123", TokenKind::Access, now, Duration::minutes(15));

        assert_ne!(first.jti, second.jti);
    }

    #[test]
    fn test_with_scope() {
        let now = Utc::now();
        let claims = ClaimSet::new("user123", TokenKind::Refresh, now, Duration::days(7))
            .with_scope("read write");

        assert_eq!(claims.scope, "read write");
    }

    #[test]
    fn test_is_expired() {
        let issued = DateTime::from_timestamp(1_000_000, 0).unwrap();
        let claims = ClaimSet::new("user123", TokenKind::Access, issued, Duration::seconds(60));

        assert!(!claims.is_expired(issued));
        assert!(!claims.is_expired(issued + Duration::seconds(59)));
        // Expiry is inclusive: now == exp counts as expired
        assert!(claims.is_expired(issued + Duration::seconds(60)));
        assert!(claims.is_expired(issued + Duration::seconds(61)));
    }

    #[test]
    fn test_timestamp_round_trip() {
        let issued = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let claims = ClaimSet::new("user123", TokenKind::Access, issued, Duration::minutes(5));

        assert_eq!(claims.issued_at(), issued);
        assert_eq!(claims.expires_at(), issued + Duration::minutes(5));
    }

    #[test]
    fn test_kind_serializes_lowercase() {
        let json = serde_json::to_string(&TokenKind::Refresh).unwrap();
        assert_eq!(json, "\"refresh\"");
    }
}
