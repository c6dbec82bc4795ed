//! Token Issuer
//!
//! HS256 JWTs carrying `{sub, iat, exp}`. Tokens are stateless: once
//! issued they stay valid until `exp`, logout included.

use std::fmt;
use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::config::MIN_SECRET_LENGTH;
use crate::error::{AuthError, AuthResult};

/// Why a token was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("Token signature is invalid")]
    InvalidSignature,
    #[error("Token has expired")]
    Expired,
    #[error("Token is malformed")]
    Malformed,
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    iat: i64,
    exp: i64,
}

/// A freshly minted token
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    /// Unix seconds
    pub expires_at: i64,
}

/// Signs and validates session tokens
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenIssuer {
    /// Fails if the secret is shorter than 32 bytes
    pub fn new(secret: &[u8]) -> AuthResult<Self> {
        if secret.len() < MIN_SECRET_LENGTH {
            return Err(AuthError::Configuration(format!(
                "Signing secret must be at least {MIN_SECRET_LENGTH} bytes (got {})",
                secret.len()
            )));
        }

        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked by hand so that `now == exp` is already expired
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Ok(Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
        })
    }

    pub fn issue(&self, subject: &str, ttl: Duration) -> AuthResult<IssuedToken> {
        self.issue_at(subject, ttl, Utc::now().timestamp())
    }

    pub fn issue_at(&self, subject: &str, ttl: Duration, now: i64) -> AuthResult<IssuedToken> {
        let exp = i64::try_from(ttl.as_secs())
            .ok()
            .and_then(|secs| now.checked_add(secs))
            .ok_or_else(|| AuthError::Configuration("Token lifetime out of range".into()))?;

        let claims = Claims {
            sub: subject.to_string(),
            iat: now,
            exp,
        };

        let token = jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AuthError::Internal(format!("Token encoding failed: {e}")))?;

        Ok(IssuedToken {
            token,
            expires_at: claims.exp,
        })
    }

    /// Returns the subject of a valid token
    pub fn validate(&self, token: &str) -> Result<String, TokenError> {
        self.validate_at(token, Utc::now().timestamp())
    }

    pub fn validate_at(&self, token: &str, now: i64) -> Result<String, TokenError> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(|e| match e.kind() {
                JwtErrorKind::InvalidSignature | JwtErrorKind::InvalidAlgorithm => {
                    TokenError::InvalidSignature
                }
                JwtErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Malformed,
            })?;

        if now >= data.claims.exp {
            return Err(TokenError::Expired);
        }

        Ok(data.claims.sub)
    }
}

impl fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("algorithm", &"HS256")
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"0123456789abcdef0123456789abcdef";
    const NOW: i64 = 1_700_000_000;
    const TTL: Duration = Duration::from_secs(30 * 60);

    fn issuer() -> TokenIssuer {
        TokenIssuer::new(SECRET).unwrap()
    }

    #[test]
    fn test_short_secret_rejected() {
        assert!(matches!(
            TokenIssuer::new(b"too-short"),
            Err(AuthError::Configuration(_))
        ));
        assert!(matches!(TokenIssuer::new(b""), Err(AuthError::Configuration(_))));
    }

    #[test]
    fn test_issue_then_validate() {
        let issuer = issuer();
        let issued = issuer.issue_at("alice", TTL, NOW).unwrap();

        assert_eq!(issued.expires_at, NOW + 1800);
        assert_eq!(issuer.validate_at(&issued.token, NOW).unwrap(), "alice");
        assert_eq!(issuer.validate_at(&issued.token, NOW + 1799).unwrap(), "alice");
    }

    #[test]
    fn test_unrepresentable_lifetime_rejected() {
        let issuer = issuer();
        assert!(matches!(
            issuer.issue_at("alice", Duration::from_secs(u64::MAX), NOW),
            Err(AuthError::Configuration(_))
        ));
        assert!(matches!(
            issuer.issue_at("alice", Duration::from_secs(i64::MAX as u64), NOW),
            Err(AuthError::Configuration(_))
        ));
    }

    #[test]
    fn test_expired_at_exact_exp() {
        let issuer = issuer();
        let issued = issuer.issue_at("alice", TTL, NOW).unwrap();

        assert_eq!(
            issuer.validate_at(&issued.token, NOW + 1800),
            Err(TokenError::Expired)
        );
        assert_eq!(
            issuer.validate_at(&issued.token, NOW + 86_400),
            Err(TokenError::Expired)
        );
    }

    #[test]
    fn test_validate_uses_wall_clock() {
        let issuer = issuer();
        let fresh = issuer.issue("alice", TTL).unwrap();
        assert_eq!(issuer.validate(&fresh.token).unwrap(), "alice");

        let stale = issuer.issue_at("alice", TTL, NOW).unwrap();
        assert_eq!(issuer.validate(&stale.token), Err(TokenError::Expired));
    }

    #[test]
    fn test_wrong_secret() {
        let issued = issuer().issue_at("alice", TTL, NOW).unwrap();
        let other = TokenIssuer::new(b"another-secret-another-secret-xx").unwrap();

        assert_eq!(
            other.validate_at(&issued.token, NOW),
            Err(TokenError::InvalidSignature)
        );
    }

    #[test]
    fn test_tampered_signature() {
        let issuer = issuer();
        let token = issuer.issue_at("alice", TTL, NOW).unwrap().token;

        let sig_start = token.rfind('.').unwrap() + 1;
        let target = sig_start + 5;
        let mut bytes = token.into_bytes();
        bytes[target] = if bytes[target] == b'A' { b'B' } else { b'A' };
        let tampered = String::from_utf8(bytes).unwrap();

        let err = issuer.validate_at(&tampered, NOW).unwrap_err();
        assert!(matches!(err, TokenError::InvalidSignature | TokenError::Malformed));
    }

    #[test]
    fn test_tampered_payload() {
        let issuer = issuer();
        let token = issuer.issue_at("alice", TTL, NOW).unwrap().token;

        let payload_start = token.find('.').unwrap() + 1;
        let target = payload_start + 3;
        let mut bytes = token.into_bytes();
        bytes[target] = if bytes[target] == b'x' { b'y' } else { b'x' };
        let tampered = String::from_utf8(bytes).unwrap();

        assert!(issuer.validate_at(&tampered, NOW).is_err());
    }

    #[test]
    fn test_garbage_is_malformed() {
        let issuer = issuer();
        assert_eq!(issuer.validate_at("", NOW), Err(TokenError::Malformed));
        assert_eq!(issuer.validate_at("a.b", NOW), Err(TokenError::Malformed));
        assert_eq!(
            issuer.validate_at("not-a-token-at-all", NOW),
            Err(TokenError::Malformed)
        );
    }

    #[test]
    fn test_missing_claims_is_malformed() {
        #[derive(Serialize)]
        struct NoExp {
            sub: String,
        }

        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &NoExp { sub: "alice".into() },
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();

        assert_eq!(issuer().validate_at(&token, NOW), Err(TokenError::Malformed));
    }

    #[test]
    fn test_other_algorithm_rejected() {
        let claims = Claims {
            sub: "alice".into(),
            iat: NOW,
            exp: NOW + 60,
        };
        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS512),
            &claims,
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();

        assert_eq!(
            issuer().validate_at(&token, NOW),
            Err(TokenError::InvalidSignature)
        );
    }
}
