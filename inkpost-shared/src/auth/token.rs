/// Bearer token issuance and validation
///
/// Tokens are JWTs signed with a server-held symmetric secret. The signing
/// algorithm is chosen at deployment time (any of the HMAC family accepted
/// by [`jsonwebtoken::Algorithm`]); the secret and algorithm are loaded
/// once at startup, so a missing or misconfigured key is a fatal
/// configuration error rather than a per-request failure.
///
/// Both [`TokenIssuer::issue`] and [`TokenVerifier::verify`] take `now` as
/// an argument instead of reading the system clock. Expiry behavior is
/// therefore deterministic under test: issue a token, move the clock past
/// its expiry, and verification fails with [`TokenError::Expired`].
///
/// # Example
///
/// ```
/// use chrono::{Duration, Utc};
/// use inkpost_shared::auth::token::{TokenIssuer, TokenVerifier};
/// use jsonwebtoken::Algorithm;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let secret = "a-signing-secret-of-at-least-32-bytes!!";
/// let issuer = TokenIssuer::new(secret, Algorithm::HS256, Duration::minutes(30));
/// let verifier = TokenVerifier::new(secret, Algorithm::HS256);
///
/// let now = Utc::now();
/// let (token, expiry) = issuer.issue("alice", now)?;
/// assert!(expiry > now);
///
/// let subject = verifier.verify(&token, now)?;
/// assert_eq!(subject, "alice");
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Error type for token operations
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    /// Signature does not match, e.g. tampered payload or wrong key
    #[error("token signature is invalid")]
    InvalidSignature,

    /// Token expiry has elapsed
    #[error("token has expired")]
    Expired,

    /// Token is not a decodable JWT at all
    #[error("malformed token: {0}")]
    Malformed(String),

    /// Signing failed while issuing a token
    #[error("failed to sign token: {0}")]
    Signing(String),
}

/// Claim set embedded in every token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - the username the token was issued to
    pub sub: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// Mints signed, time-bound bearer tokens
///
/// Constructed once at startup from the configured secret and algorithm.
pub struct TokenIssuer {
    header: Header,
    key: EncodingKey,
    default_ttl: Duration,
}

impl TokenIssuer {
    /// Creates an issuer with the given secret, algorithm and default TTL
    pub fn new(secret: &str, algorithm: Algorithm, default_ttl: Duration) -> Self {
        Self {
            header: Header::new(algorithm),
            key: EncodingKey::from_secret(secret.as_bytes()),
            default_ttl,
        }
    }

    /// Issues a token for `subject` expiring after the default TTL
    ///
    /// Returns the opaque token string and the computed expiry, so callers
    /// can report the expiry without decoding the token again.
    pub fn issue(
        &self,
        subject: &str,
        now: DateTime<Utc>,
    ) -> Result<(String, DateTime<Utc>), TokenError> {
        self.issue_with_ttl(subject, now, self.default_ttl)
    }

    /// Issues a token with a caller-supplied TTL
    ///
    /// Used by tests to exercise expiry deterministically; production
    /// callers normally go through [`TokenIssuer::issue`].
    pub fn issue_with_ttl(
        &self,
        subject: &str,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<(String, DateTime<Utc>), TokenError> {
        let expiry = now + ttl;
        let claims = Claims {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: expiry.timestamp(),
        };

        let token = encode(&self.header, &claims, &self.key)
            .map_err(|e| TokenError::Signing(e.to_string()))?;

        Ok((token, expiry))
    }
}

/// Validates tokens and extracts their subject
///
/// Checks run in a fixed order: signature first, then expiry, then claim
/// extraction. A payload that fails the signature check is never inspected
/// further. The verifier does not resolve the subject to a user; that
/// separation keeps "is this token well-formed and fresh" apart from
/// "does this subject still exist".
pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    /// Creates a verifier for tokens signed with `secret` and `algorithm`
    pub fn new(secret: &str, algorithm: Algorithm) -> Self {
        let mut validation = Validation::new(algorithm);
        // Expiry is checked against the caller-supplied clock below, not
        // the system clock inside the jwt library. The exp claim itself
        // stays required.
        validation.validate_exp = false;

        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Verifies `token` as of `now` and returns its subject
    ///
    /// # Errors
    ///
    /// - [`TokenError::InvalidSignature`] if the signature does not match
    /// - [`TokenError::Malformed`] if the token is not a decodable JWT
    /// - [`TokenError::Expired`] if `exp <= now`
    pub fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<String, TokenError> {
        let data = decode::<Claims>(token, &self.key, &self.validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                _ => TokenError::Malformed(e.to_string()),
            }
        })?;

        if data.claims.exp <= now.timestamp() {
            return Err(TokenError::Expired);
        }

        Ok(data.claims.sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-at-least-32-bytes-long";

    fn issuer() -> TokenIssuer {
        TokenIssuer::new(SECRET, Algorithm::HS256, Duration::minutes(30))
    }

    fn verifier() -> TokenVerifier {
        TokenVerifier::new(SECRET, Algorithm::HS256)
    }

    #[test]
    fn test_issue_returns_expiry() {
        let now = Utc::now();
        let (_, expiry) = issuer().issue("alice", now).expect("should issue");

        assert_eq!(expiry.timestamp(), (now + Duration::minutes(30)).timestamp());
    }

    #[test]
    fn test_issue_and_verify_roundtrip() {
        let now = Utc::now();
        let (token, _) = issuer().issue("alice", now).expect("should issue");

        let subject = verifier().verify(&token, now).expect("should verify");
        assert_eq!(subject, "alice");
    }

    #[test]
    fn test_verify_just_before_expiry_succeeds() {
        let now = Utc::now();
        let ttl = Duration::minutes(5);
        let (token, _) = issuer()
            .issue_with_ttl("alice", now, ttl)
            .expect("should issue");

        let just_before = now + ttl - Duration::seconds(1);
        assert!(verifier().verify(&token, just_before).is_ok());
    }

    #[test]
    fn test_verify_after_expiry_fails() {
        let now = Utc::now();
        let ttl = Duration::minutes(5);
        let (token, _) = issuer()
            .issue_with_ttl("alice", now, ttl)
            .expect("should issue");

        let just_after = now + ttl + Duration::seconds(1);
        let result = verifier().verify(&token, just_after);
        assert!(matches!(result, Err(TokenError::Expired)));
    }

    #[test]
    fn test_verify_at_exact_expiry_fails() {
        let now = Utc::now();
        let (token, expiry) = issuer()
            .issue_with_ttl("alice", now, Duration::minutes(5))
            .expect("should issue");

        let result = verifier().verify(&token, expiry);
        assert!(matches!(result, Err(TokenError::Expired)));
    }

    #[test]
    fn test_wrong_key_is_invalid_signature() {
        let now = Utc::now();
        let other = TokenIssuer::new(
            "a-completely-different-32-byte-secret!!!",
            Algorithm::HS256,
            Duration::minutes(30),
        );
        let (token, _) = other.issue("alice", now).expect("should issue");

        let result = verifier().verify(&token, now);
        assert!(matches!(result, Err(TokenError::InvalidSignature)));
    }

    #[test]
    fn test_wrong_key_fails_even_when_expired() {
        // Signature check comes first: a tampered token is rejected as such
        // even though its claims are also stale.
        let now = Utc::now();
        let other = TokenIssuer::new(
            "a-completely-different-32-byte-secret!!!",
            Algorithm::HS256,
            Duration::minutes(30),
        );
        let (token, _) = other
            .issue_with_ttl("alice", now - Duration::hours(2), Duration::minutes(5))
            .expect("should issue");

        let result = verifier().verify(&token, now);
        assert!(matches!(result, Err(TokenError::InvalidSignature)));
    }

    #[test]
    fn test_garbage_token_is_malformed() {
        let result = verifier().verify("not.a.jwt", Utc::now());
        assert!(matches!(result, Err(TokenError::Malformed(_))));

        let result = verifier().verify("", Utc::now());
        assert!(matches!(result, Err(TokenError::Malformed(_))));
    }

    #[test]
    fn test_subject_is_preserved() {
        let now = Utc::now();
        for subject in ["alice", "bob", "user-with-dash", "ünïcode"] {
            let (token, _) = issuer().issue(subject, now).expect("should issue");
            assert_eq!(verifier().verify(&token, now).unwrap(), subject);
        }
    }
}
