use std::fmt;
use std::fmt::Write;

use chrono::Duration;
use serde::Deserialize;
use serde::Serialize;

use crate::issuer::TokenPair;

/// Cookie name used for web refresh token delivery.
pub const REFRESH_COOKIE_NAME: &str = "refresh_token";

/// Client platform category, supplied by the caller at login.
///
/// Selects the delivery channel for the refresh token: cookie for web
/// clients, response body for mobile clients.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Web,
    #[default]
    Mobile,
}

/// SameSite attribute values for the refresh cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SameSite {
    Strict,
    Lax,
    None,
}

impl fmt::Display for SameSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SameSite::Strict => write!(f, "Strict"),
            SameSite::Lax => write!(f, "Lax"),
            SameSite::None => write!(f, "None"),
        }
    }
}

/// Instruction for the HTTP boundary to set a refresh token cookie.
///
/// The policy never sets the cookie itself; it only describes the
/// cookie for the boundary to emit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieDirective {
    pub name: &'static str,
    pub value: String,
    pub http_only: bool,
    pub same_site: SameSite,
    pub secure: bool,
    /// `None` means a session cookie (no explicit Max-Age).
    pub max_age: Option<Duration>,
}

impl CookieDirective {
    /// Render the directive as a `Set-Cookie` header value.
    pub fn header_value(&self) -> String {
        let mut value = format!("{}={}", self.name, self.value);
        if self.http_only {
            value.push_str("; HttpOnly");
        }
        let _ = write!(value, "; SameSite={}", self.same_site);
        if self.secure {
            value.push_str("; Secure");
        }
        if let Some(max_age) = self.max_age {
            let _ = write!(value, "; Max-Age={}", max_age.num_seconds());
        }
        value
    }
}

/// Decides, per platform, where the refresh token travels.
///
/// For `web` the refresh token is removed from the response body and
/// returned as a cookie directive (HttpOnly, SameSite=Strict, Secure).
/// For `mobile` the pair passes through untouched. Pure decision
/// function with no side effects.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenDeliveryPolicy {
    cookie_max_age: Option<Duration>,
}

impl TokenDeliveryPolicy {
    /// Create a policy issuing session cookies (no explicit Max-Age).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a policy whose web cookies carry an explicit Max-Age.
    pub fn with_cookie_max_age(max_age: Duration) -> Self {
        Self {
            cookie_max_age: Some(max_age),
        }
    }

    /// Apply the policy to an issued pair.
    ///
    /// Returns the (possibly redacted) body payload and an optional
    /// cookie directive. For `web`, the returned pair's refresh token
    /// is absent, never an empty string.
    pub fn apply(&self, platform: Platform, mut pair: TokenPair) -> (TokenPair, Option<CookieDirective>) {
        match platform {
            Platform::Mobile => (pair, None),
            Platform::Web => {
                let directive = pair.refresh_token.take().map(|value| CookieDirective {
                    name: REFRESH_COOKIE_NAME,
                    value,
                    http_only: true,
                    same_site: SameSite::Strict,
                    secure: true,
                    max_age: self.cookie_max_age,
                });
                (pair, directive)
            }
        }
    }
}
