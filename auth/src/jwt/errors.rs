use thiserror::Error;

use super::claims::TokenKind;

/// Error type for token signing and validation.
#[derive(Debug, Clone, Error)]
pub enum JwtError {
    /// Rejected at codec construction, before any request is served.
    #[error("Signing key too short: minimum {min} bytes, got {actual}")]
    KeyTooShort { min: usize, actual: usize },

    #[error("Failed to sign token: {0}")]
    SigningFailed(String),

    #[error("Token is invalid: {0}")]
    InvalidToken(String),

    #[error("Token is expired")]
    TokenExpired,

    #[error("Wrong token kind: expected '{expected}', got '{actual}'")]
    WrongTokenKind {
        expected: TokenKind,
        actual: TokenKind,
    },
}
