/// Bearer token issuance and verification
///
/// Tokens are JWTs signed with HS256 (HMAC-SHA256). A token carries
/// the user id as its subject plus issued-at and expiry timestamps;
/// nothing is persisted and there is no revocation list, so validity
/// is fully determined by the signature and the expiry window.
///
/// The signing secret lives in a [`TokenSigner`] constructed once at
/// startup and passed through application state. There is no
/// module-level singleton, which keeps tests isolated and leaves room
/// for key rotation.
///
/// # Example
///
/// ```
/// use taskdeck_shared::auth::jwt::TokenSigner;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let signer = TokenSigner::new("a-secret-key-at-least-32-bytes-long");
/// let token = signer.issue(42)?;
/// assert_eq!(signer.verify(&token)?, 42);
/// # Ok(())
/// # }
/// ```

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Token lifetime, fixed at issuance. Not configurable per call.
pub const TOKEN_TTL_MINUTES: i64 = 60;

/// Error type for token operations
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    /// Token is past its expiry timestamp
    #[error("Token has expired")]
    Expired,

    /// Signature invalid, structure unparseable, or subject not a user id
    #[error("Malformed token: {0}")]
    Malformed(String),

    /// Failed to sign a new token
    #[error("Failed to create token: {0}")]
    Signing(String),
}

/// JWT claims structure
///
/// - `sub`: subject, the user id as a decimal string
/// - `iat`: issued at (Unix timestamp)
/// - `exp`: expiration time (Unix timestamp)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

/// Issues and verifies signed bearer tokens for a single secret key
///
/// Cheap to clone; holds pre-built encoding and decoding keys.
#[derive(Clone)]
pub struct TokenSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenSigner {
    /// Creates a signer from a shared secret
    ///
    /// The secret should be at least 32 bytes of random data; the
    /// config layer enforces that at startup.
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Issues a token for `user_id`, expiring in [`TOKEN_TTL_MINUTES`]
    ///
    /// # Errors
    ///
    /// Returns `JwtError::Signing` if encoding fails
    pub fn issue(&self, user_id: i64) -> Result<String, JwtError> {
        self.issue_with_ttl(user_id, Duration::minutes(TOKEN_TTL_MINUTES))
    }

    /// Issues a token with an explicit lifetime
    ///
    /// The fixed 60-minute window is the only lifetime used by the
    /// service itself; this exists so tests can mint already-expired
    /// tokens.
    pub fn issue_with_ttl(&self, user_id: i64, ttl: Duration) -> Result<String, JwtError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| JwtError::Signing(format!("Token encoding failed: {}", e)))
    }

    /// Verifies a token and returns the user id it was issued for
    ///
    /// # Errors
    ///
    /// - `JwtError::Expired` if the expiry timestamp has passed
    /// - `JwtError::Malformed` if the signature is invalid, the token
    ///   is structurally unparseable, or the subject is missing or
    ///   non-numeric
    pub fn verify(&self, token: &str) -> Result<i64, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::Expired,
                _ => JwtError::Malformed(format!("Token validation failed: {}", e)),
            }
        })?;

        token_data
            .claims
            .sub
            .parse::<i64>()
            .map_err(|_| JwtError::Malformed("Subject is not a numeric user id".to_string()))
    }
}

impl std::fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print key material
        f.debug_struct("TokenSigner").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-at-least-32-bytes-long";

    #[test]
    fn test_issue_and_verify_roundtrip() {
        let signer = TokenSigner::new(SECRET);

        let token = signer.issue(42).expect("Should create token");
        let user_id = signer.verify(&token).expect("Should validate token");

        assert_eq!(user_id, 42);
    }

    #[test]
    fn test_verify_with_wrong_secret() {
        let signer = TokenSigner::new(SECRET);
        let other = TokenSigner::new("a-completely-different-32-byte-secret!");

        let token = signer.issue(7).expect("Should create token");
        let result = other.verify(&token);

        assert!(matches!(result, Err(JwtError::Malformed(_))));
    }

    #[test]
    fn test_verify_expired_token() {
        let signer = TokenSigner::new(SECRET);

        // Expired an hour ago
        let token = signer
            .issue_with_ttl(42, Duration::seconds(-3600))
            .expect("Should create token");

        let result = signer.verify(&token);
        assert!(matches!(result, Err(JwtError::Expired)));
    }

    #[test]
    fn test_verify_garbage_token() {
        let signer = TokenSigner::new(SECRET);

        let result = signer.verify("not.a.jwt");
        assert!(matches!(result, Err(JwtError::Malformed(_))));
    }

    #[test]
    fn test_verify_non_numeric_subject() {
        let signer = TokenSigner::new(SECRET);

        let now = Utc::now();
        let claims = Claims {
            sub: "alice".to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::minutes(5)).timestamp(),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        let result = signer.verify(&token);
        assert!(matches!(result, Err(JwtError::Malformed(_))));
    }

    #[test]
    fn test_expired_token_never_yields_a_user_id() {
        let signer = TokenSigner::new(SECRET);

        let token = signer
            .issue_with_ttl(42, Duration::seconds(-10))
            .expect("Should create token");

        // Expiry must win; it never decodes to some other id
        assert!(signer.verify(&token).is_err());
    }

    #[test]
    fn test_token_expiry_window() {
        let signer = TokenSigner::new(SECRET);
        let before = Utc::now().timestamp();

        let token = signer.issue(1).expect("Should create token");

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        let data = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(SECRET.as_bytes()),
            &validation,
        )
        .unwrap();

        let window = data.claims.exp - data.claims.iat;
        assert_eq!(window, TOKEN_TTL_MINUTES * 60);
        assert!(data.claims.iat >= before);
    }
}
