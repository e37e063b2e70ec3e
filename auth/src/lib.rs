//! Session-authentication core library
//!
//! Provides the stateless building blocks for password-based login and
//! token-based sessions:
//! - Password hashing and verification (Argon2id)
//! - Signed claim-set encoding and decoding (HS256)
//! - Access/refresh token pair issuance with independent lifetimes
//! - Refresh token redemption
//! - Platform-aware refresh token delivery (cookie vs body)
//!
//! Every component is a pure computation over injected configuration
//! and an injected clock; there is no I/O, no global state, and no
//! server-side session registry. Two concurrent logins for the same
//! subject yield two independently valid, unrelated token pairs.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! ```
//!
//! ## Issuing and refreshing tokens
//! ```
//! use std::sync::Arc;
//!
//! use auth::{ClaimsCodec, TokenIssuer, TokenRefresher, TokenTtl};
//! use chrono::Utc;
//!
//! let codec = Arc::new(ClaimsCodec::new(b"secret_key_at_least_32_bytes_long!").unwrap());
//! let ttl = TokenTtl::from_minutes(15, 60 * 24 * 7).unwrap();
//! let issuer = Arc::new(TokenIssuer::new(Arc::clone(&codec), ttl));
//! let refresher = TokenRefresher::new(Arc::clone(&codec), Arc::clone(&issuer));
//!
//! let pair = issuer.issue("user123", Utc::now()).unwrap();
//! let refreshed = refresher
//!     .refresh(pair.refresh_token.as_deref().unwrap(), Utc::now())
//!     .unwrap();
//! ```
//!
//! ## Delivery policy
//! ```
//! use std::sync::Arc;
//!
//! use auth::{ClaimsCodec, Platform, TokenDeliveryPolicy, TokenIssuer, TokenTtl};
//! use chrono::Utc;
//!
//! let codec = Arc::new(ClaimsCodec::new(b"secret_key_at_least_32_bytes_long!").unwrap());
//! let issuer = TokenIssuer::new(codec, TokenTtl::from_minutes(15, 120).unwrap());
//! let pair = issuer.issue("user123", Utc::now()).unwrap();
//!
//! let policy = TokenDeliveryPolicy::new();
//! let (body, cookie) = policy.apply(Platform::Web, pair);
//! assert!(body.refresh_token.is_none());
//! assert!(cookie.is_some());
//! ```

pub mod delivery;
pub mod issuer;
pub mod jwt;
pub mod password;
pub mod refresher;

// Re-export commonly used items
pub use delivery::CookieDirective;
pub use delivery::Platform;
pub use delivery::SameSite;
pub use delivery::TokenDeliveryPolicy;
pub use delivery::REFRESH_COOKIE_NAME;
pub use issuer::TokenIssuer;
pub use issuer::TokenPair;
pub use issuer::TokenTtl;
pub use issuer::TokenTtlError;
pub use issuer::TOKEN_TYPE_BEARER;
pub use jwt::ClaimSet;
pub use jwt::ClaimsCodec;
pub use jwt::JwtError;
pub use jwt::TokenKind;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use refresher::RefreshedAccess;
pub use refresher::TokenRefresher;
