use auth::JwtError;
use thiserror::Error;

/// Error for credential store operations.
///
/// "Not found" is not an error; lookups return `Option`. Only
/// transient infrastructure failures surface here.
#[derive(Debug, Clone, Error)]
pub enum CredentialStoreError {
    #[error("Credential store unavailable: {0}")]
    Unavailable(String),
}

/// Top-level error for session authentication operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Wrong username/email or wrong password. Deliberately one
    /// variant: callers must not be able to tell which field failed.
    #[error("Incorrect username or password")]
    InvalidCredentials,

    /// Stored hash did not parse as a supported scheme. A server
    /// fault, not a client one.
    #[error("Stored credential is malformed: {0}")]
    MalformedCredential(String),

    /// Token validation or signing failure, propagated unchanged so
    /// the boundary can log the precise kind.
    #[error(transparent)]
    Token(#[from] JwtError),

    /// The credential store could not be reached. Distinct from
    /// `InvalidCredentials` so clients can tell "try again" from
    /// "re-authenticate".
    #[error("Authentication dependency unavailable: {0}")]
    DependencyUnavailable(String),
}

impl From<CredentialStoreError> for SessionError {
    fn from(err: CredentialStoreError) -> Self {
        match err {
            CredentialStoreError::Unavailable(msg) => SessionError::DependencyUnavailable(msg),
        }
    }
}
