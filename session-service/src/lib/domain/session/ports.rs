use async_trait::async_trait;
use auth::RefreshedAccess;
use auth::TokenPair;
use chrono::DateTime;
use chrono::Utc;

use crate::session::errors::CredentialStoreError;
use crate::session::errors::SessionError;
use crate::session::models::Credential;

/// Port for session authentication operations.
#[async_trait]
pub trait SessionServicePort: Send + Sync + 'static {
    /// Verify a credential and issue a token pair.
    ///
    /// The identifier is tried as a username first, then as an email
    /// address.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown identifier or wrong password
    ///   (indistinguishable by design)
    /// * `MalformedCredential` - Stored hash is unparseable
    /// * `Token` - Token signing failed
    /// * `DependencyUnavailable` - Credential store unreachable
    async fn authenticate(
        &self,
        username_or_email: &str,
        password: &str,
        now: DateTime<Utc>,
    ) -> Result<TokenPair, SessionError>;

    /// Redeem a refresh token for a new access token.
    ///
    /// # Errors
    /// * `Token` - Invalid, expired, or wrong-kind token; failures are
    ///   terminal for the request and never retried
    async fn refresh(
        &self,
        refresh_token: &str,
        now: DateTime<Utc>,
    ) -> Result<RefreshedAccess, SessionError>;
}

/// Port to the externally owned user store.
///
/// The store handles its own pooling, retries, and transactions; this
/// domain only needs lookups and a timestamp write-back.
#[async_trait]
pub trait CredentialStore: Send + Sync + 'static {
    /// Look up a credential by username.
    ///
    /// # Returns
    /// `None` when no such user exists (not an error)
    ///
    /// # Errors
    /// * `Unavailable` - Store unreachable or query failed
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<Credential>, CredentialStoreError>;

    /// Look up a credential by email address.
    ///
    /// # Returns
    /// `None` when no such user exists (not an error)
    ///
    /// # Errors
    /// * `Unavailable` - Store unreachable or query failed
    async fn find_by_email(&self, email: &str)
        -> Result<Option<Credential>, CredentialStoreError>;

    /// Persist a new last-authenticated timestamp for the subject.
    ///
    /// # Errors
    /// * `Unavailable` - Store unreachable or query failed
    async fn record_authentication(
        &self,
        subject_id: &str,
        at: DateTime<Utc>,
    ) -> Result<(), CredentialStoreError>;
}
