use std::sync::Arc;

use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::issuer::TokenIssuer;
use crate::jwt::ClaimsCodec;
use crate::jwt::JwtError;
use crate::jwt::TokenKind;

/// Result of redeeming a refresh token.
///
/// Carries only the new access token and its expiry; a new refresh
/// token is present only when rotation is enabled.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RefreshedAccess {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub expires_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

/// Redeems refresh tokens for new access tokens.
///
/// Validates the inbound token as refresh-kind and re-issues through
/// the shared issuer. Rotation of the refresh token itself is off by
/// default; the presented refresh token stays valid until it expires.
pub struct TokenRefresher {
    codec: Arc<ClaimsCodec>,
    issuer: Arc<TokenIssuer>,
    rotate_refresh: bool,
}

impl TokenRefresher {
    /// Create a refresher over a shared codec and issuer.
    pub fn new(codec: Arc<ClaimsCodec>, issuer: Arc<TokenIssuer>) -> Self {
        Self {
            codec,
            issuer,
            rotate_refresh: false,
        }
    }

    /// Enable refresh token rotation: each redemption also returns a
    /// newly issued refresh token.
    pub fn with_rotation(mut self) -> Self {
        self.rotate_refresh = true;
        self
    }

    /// Redeem a refresh token for a new access token.
    ///
    /// # Errors
    /// * `InvalidToken` - Signature mismatch or structural corruption
    /// * `WrongTokenKind` - An access-kind token was presented
    /// * `TokenExpired` - The refresh token has expired
    /// * `SigningFailed` - Re-issuance failed
    pub fn refresh(
        &self,
        refresh_token: &str,
        now: DateTime<Utc>,
    ) -> Result<RefreshedAccess, JwtError> {
        let claims = self.codec.decode(refresh_token, TokenKind::Refresh, now)?;

        let pair = self.issuer.issue(&claims.sub, now)?;

        Ok(RefreshedAccess {
            access_token: pair.access_token,
            token_type: pair.token_type,
            expires_in: pair.expires_in,
            expires_at: pair.expires_at,
            refresh_token: if self.rotate_refresh {
                pair.refresh_token
            } else {
                None
            },
        })
    }
}
