use chrono::DateTime;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::ClaimSet;
use super::claims::TokenKind;
use super::errors::JwtError;

/// Minimum signing key length for HS256 (256 bits).
const MIN_SECRET_BYTES: usize = 32;

/// Encodes and decodes signed claim sets.
///
/// Uses HS256 (HMAC with SHA-256) with a process-wide secret. Expiry is
/// checked against a caller-supplied clock rather than the system
/// clock, so validation is deterministic and testable.
pub struct ClaimsCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl ClaimsCodec {
    /// Create a codec from the shared signing secret.
    ///
    /// # Errors
    /// * `KeyTooShort` - Secret is shorter than 32 bytes. Callers are
    ///   expected to treat this as fatal at startup.
    pub fn new(secret: &[u8]) -> Result<Self, JwtError> {
        if secret.len() < MIN_SECRET_BYTES {
            return Err(JwtError::KeyTooShort {
                min: MIN_SECRET_BYTES,
                actual: secret.len(),
            });
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        })
    }

    /// Serialize and sign a claim set into an opaque token string.
    ///
    /// # Errors
    /// * `SigningFailed` - Token encoding failed
    pub fn encode(&self, claims: &ClaimSet) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::SigningFailed(e.to_string()))
    }

    /// Verify and decode a token, expecting a specific kind.
    ///
    /// Checks run in order: signature and structure, kind, expiry. Kind
    /// is checked before expiry so that a mis-kinded token is rejected
    /// as malformed rather than merely expired.
    ///
    /// # Arguments
    /// * `token` - Encoded token string
    /// * `expected` - Kind the caller requires (access vs refresh)
    /// * `now` - Current time for expiry validation
    ///
    /// # Errors
    /// * `InvalidToken` - Signature mismatch or structural corruption
    /// * `WrongTokenKind` - Token kind does not match `expected`
    /// * `TokenExpired` - `now` is at or past the expiration time
    pub fn decode(
        &self,
        token: &str,
        expected: TokenKind,
        now: DateTime<Utc>,
    ) -> Result<ClaimSet, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        // Expiry is validated below against the injected clock
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        let token_data = decode::<ClaimSet>(token, &self.decoding_key, &validation)
            .map_err(|e| JwtError::InvalidToken(e.to_string()))?;
        let claims = token_data.claims;

        if claims.kind != expected {
            return Err(JwtError::WrongTokenKind {
                expected,
                actual: claims.kind,
            });
        }

        if claims.is_expired(now) {
            return Err(JwtError::TokenExpired);
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    const SECRET: &[u8] = b"my_secret_key_at_least_32_bytes_long!";

    fn codec() -> ClaimsCodec {
        ClaimsCodec::new(SECRET).expect("Failed to build codec")
    }

    #[test]
    fn test_rejects_short_secret() {
        let result = ClaimsCodec::new(b"too_short");
        assert!(matches!(
            result,
            Err(JwtError::KeyTooShort { min: 32, actual: 9 })
        ));
    }

    #[test]
    fn test_encode_and_decode() {
        let codec = codec();
        let now = Utc::now();
        let claims = ClaimSet::new("user123", TokenKind::Access, now, Duration::minutes(15));

        let token = codec.encode(&claims).expect("Failed to encode token");
        assert!(!token.is_empty());

        let decoded = codec
            .decode(&token, TokenKind::Access, now)
            .expect("Failed to decode token");
        assert_eq!(decoded, claims);
    }

    #[test]
    fn test_decode_invalid_token() {
        let codec = codec();

        let result = codec.decode("invalid.token.here", TokenKind::Access, Utc::now());
        assert!(matches!(result, Err(JwtError::InvalidToken(_))));
    }

    #[test]
    fn test_decode_with_wrong_secret() {
        let codec1 = codec();
        let codec2 = ClaimsCodec::new(b"another_secret_at_least_32_bytes!").unwrap();

        let now = Utc::now();
        let claims = ClaimSet::new("user123", TokenKind::Access, now, Duration::minutes(15));
        let token = codec1.encode(&claims).expect("Failed to encode token");

        let result = codec2.decode(&token, TokenKind::Access, now);
        assert!(matches!(result, Err(JwtError::InvalidToken(_))));
    }

    #[test]
    fn test_decode_expired_token() {
        let codec = codec();
        let issued = Utc::now();
        let claims = ClaimSet::new("user123", TokenKind::Access, issued, Duration::minutes(15));
        let token = codec.encode(&claims).expect("Failed to encode token");

        let result = codec.decode(&token, TokenKind::Access, issued + Duration::minutes(15));
        assert!(matches!(result, Err(JwtError::TokenExpired)));
    }

    #[test]
    fn test_decode_wrong_kind() {
        let codec = codec();
        let now = Utc::now();
        let refresh = ClaimSet::new("user123", TokenKind::Refresh, now, Duration::days(7));
        let token = codec.encode(&refresh).expect("Failed to encode token");

        let result = codec.decode(&token, TokenKind::Access, now);
        assert!(matches!(
            result,
            Err(JwtError::WrongTokenKind {
                expected: TokenKind::Access,
                actual: TokenKind::Refresh,
            })
        ));

        let access = ClaimSet::new("user123", TokenKind::Access, now, Duration::minutes(15));
        let token = codec.encode(&access).expect("Failed to encode token");

        let result = codec.decode(&token, TokenKind::Refresh, now);
        assert!(matches!(
            result,
            Err(JwtError::WrongTokenKind {
                expected: TokenKind::Refresh,
                actual: TokenKind::Access,
            })
        ));
    }

    #[test]
    fn test_wrong_kind_takes_precedence_over_expiry() {
        let codec = codec();
        let issued = Utc::now();
        let refresh = ClaimSet::new("user123", TokenKind::Refresh, issued, Duration::minutes(1));
        let token = codec.encode(&refresh).expect("Failed to encode token");

        // Token is both expired and the wrong kind; kind wins
        let result = codec.decode(&token, TokenKind::Access, issued + Duration::hours(1));
        assert!(matches!(result, Err(JwtError::WrongTokenKind { .. })));
    }
}
