use std::sync::Arc;

use async_trait::async_trait;
use auth::ClaimsCodec;
use auth::PasswordError;
use auth::PasswordHasher;
use auth::RefreshedAccess;
use auth::TokenIssuer;
use auth::TokenPair;
use auth::TokenRefresher;
use auth::TokenTtl;
use chrono::DateTime;
use chrono::Utc;

use crate::session::errors::SessionError;
use crate::session::ports::CredentialStore;
use crate::session::ports::SessionServicePort;

/// Session authentication flow.
///
/// Orchestrates credential lookup through the store port, password
/// verification, last-login bookkeeping, and token issuance. Holds no
/// mutable state; the signing key and lifetimes are read-only after
/// construction.
pub struct SessionService<CS>
where
    CS: CredentialStore,
{
    store: Arc<CS>,
    password_hasher: PasswordHasher,
    issuer: Arc<TokenIssuer>,
    refresher: TokenRefresher,
}

impl<CS> SessionService<CS>
where
    CS: CredentialStore,
{
    /// Create a new session service with injected dependencies.
    ///
    /// # Arguments
    /// * `store` - Credential store implementation
    /// * `codec` - Shared claims codec built from the signing secret
    /// * `ttl` - Validated access/refresh lifetimes
    pub fn new(store: Arc<CS>, codec: Arc<ClaimsCodec>, ttl: TokenTtl) -> Self {
        let issuer = Arc::new(TokenIssuer::new(Arc::clone(&codec), ttl));
        let refresher = TokenRefresher::new(codec, Arc::clone(&issuer));

        Self {
            store,
            password_hasher: PasswordHasher::new(),
            issuer,
            refresher,
        }
    }
}

#[async_trait]
impl<CS> SessionServicePort for SessionService<CS>
where
    CS: CredentialStore,
{
    async fn authenticate(
        &self,
        username_or_email: &str,
        password: &str,
        now: DateTime<Utc>,
    ) -> Result<TokenPair, SessionError> {
        // Try username first, then email
        let credential = match self.store.find_by_username(username_or_email).await? {
            Some(credential) => Some(credential),
            None => self.store.find_by_email(username_or_email).await?,
        };

        let Some(credential) = credential else {
            // Same error as a wrong password; must not leak which
            // field failed
            return Err(SessionError::InvalidCredentials);
        };

        let verified = self
            .password_hasher
            .verify(password, &credential.password_hash)
            .map_err(|e| match e {
                PasswordError::MalformedHash(msg) => {
                    tracing::error!(
                        subject_id = %credential.subject_id,
                        "Stored password hash is malformed"
                    );
                    SessionError::MalformedCredential(msg)
                }
                PasswordError::HashingFailed(msg) => SessionError::MalformedCredential(msg),
            })?;

        if !verified {
            return Err(SessionError::InvalidCredentials);
        }

        self.store
            .record_authentication(&credential.subject_id, now)
            .await?;

        let pair = self.issuer.issue(&credential.subject_id, now)?;

        tracing::info!(subject_id = %credential.subject_id, "Authentication succeeded");

        Ok(pair)
    }

    async fn refresh(
        &self,
        refresh_token: &str,
        now: DateTime<Utc>,
    ) -> Result<RefreshedAccess, SessionError> {
        let refreshed = self.refresher.refresh(refresh_token, now)?;

        Ok(refreshed)
    }
}
