use std::sync::Arc;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Serialize;
use thiserror::Error;

use crate::jwt::ClaimSet;
use crate::jwt::ClaimsCodec;
use crate::jwt::JwtError;
use crate::jwt::TokenKind;

/// Token type constant for issued pairs (RFC 6750).
pub const TOKEN_TYPE_BEARER: &str = "Bearer";

/// Error type for token lifetime configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenTtlError {
    #[error("Token lifetime must be positive: {0}")]
    NonPositive(&'static str),

    #[error("Access lifetime ({access_secs}s) must not exceed refresh lifetime ({refresh_secs}s)")]
    AccessExceedsRefresh { access_secs: i64, refresh_secs: i64 },
}

/// Validated access and refresh token lifetimes.
///
/// The two lifetimes are configured independently; a refresh token
/// must live at least as long as the access token it renews.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenTtl {
    access: Duration,
    refresh: Duration,
}

impl TokenTtl {
    /// Create a validated lifetime pair.
    ///
    /// # Errors
    /// * `NonPositive` - Either lifetime is zero or negative
    /// * `AccessExceedsRefresh` - Access lifetime exceeds refresh lifetime
    pub fn new(access: Duration, refresh: Duration) -> Result<Self, TokenTtlError> {
        if access <= Duration::zero() {
            return Err(TokenTtlError::NonPositive("access"));
        }
        if refresh <= Duration::zero() {
            return Err(TokenTtlError::NonPositive("refresh"));
        }
        if access > refresh {
            return Err(TokenTtlError::AccessExceedsRefresh {
                access_secs: access.num_seconds(),
                refresh_secs: refresh.num_seconds(),
            });
        }

        Ok(Self { access, refresh })
    }

    /// Create a lifetime pair from whole minutes.
    pub fn from_minutes(access_minutes: i64, refresh_minutes: i64) -> Result<Self, TokenTtlError> {
        Self::new(
            Duration::minutes(access_minutes),
            Duration::minutes(refresh_minutes),
        )
    }

    /// Access token lifetime.
    pub fn access(&self) -> Duration {
        self.access
    }

    /// Refresh token lifetime.
    pub fn refresh(&self) -> Duration {
        self.refresh
    }
}

/// Access/refresh token pair returned from a successful login.
///
/// Immutable value type; never persisted server-side. Validity is
/// recomputable from the signed claims plus the current time, so there
/// is no session table to consult or invalidate. `refresh_token` is
/// `None` once redacted for cookie delivery.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TokenPair {
    pub access_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    pub token_type: String,
    /// Seconds until the access token expires.
    pub expires_in: i64,
    pub expires_at: DateTime<Utc>,
    pub issued_at: DateTime<Utc>,
    pub scope: String,
}

/// Issues access/refresh token pairs for authenticated subjects.
///
/// Pure function of `(subject, now, config)`; performs no I/O.
pub struct TokenIssuer {
    codec: Arc<ClaimsCodec>,
    ttl: TokenTtl,
}

impl TokenIssuer {
    /// Create an issuer over a shared codec with validated lifetimes.
    pub fn new(codec: Arc<ClaimsCodec>, ttl: TokenTtl) -> Self {
        Self { codec, ttl }
    }

    /// Issue a token pair for `subject` at `now`.
    ///
    /// The pair's `expires_in`, `expires_at`, and `issued_at` are taken
    /// from the access claim set; the refresh token carries its own,
    /// longer expiry inside its claims.
    ///
    /// # Errors
    /// * `SigningFailed` - Either token could not be signed
    pub fn issue(&self, subject: &str, now: DateTime<Utc>) -> Result<TokenPair, JwtError> {
        let access_claims = ClaimSet::new(subject, TokenKind::Access, now, self.ttl.access());
        let refresh_claims = ClaimSet::new(subject, TokenKind::Refresh, now, self.ttl.refresh());

        let access_token = self.codec.encode(&access_claims)?;
        let refresh_token = self.codec.encode(&refresh_claims)?;

        Ok(TokenPair {
            access_token,
            refresh_token: Some(refresh_token),
            token_type: TOKEN_TYPE_BEARER.to_string(),
            expires_in: access_claims.exp - access_claims.iat,
            expires_at: access_claims.expires_at(),
            issued_at: access_claims.issued_at(),
            scope: access_claims.scope,
        })
    }
}
