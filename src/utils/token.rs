//! Session tokens: HS256 JWTs carrying the caller's id, email and role.
//!
//! Tokens are stateless. There is no revocation list, so logging out is a
//! client-side discard and a token stays valid until `exp`.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::models::user::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Access token is missing")]
    MissingToken,
    #[error("Invalid token")]
    InvalidToken,
    #[error("Token has expired")]
    ExpiredToken,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub role: Option<Role>,
    pub iat: usize,
    pub exp: usize,
}

/// Caller identity attached to a request once its token validates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: Uuid,
    pub email: String,
}

#[derive(Clone)]
pub struct TokenIssuer {
    keys: Arc<Keys>,
    ttl: Duration,
}

struct Keys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenIssuer {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            keys: Arc::new(Keys {
                encoding: EncodingKey::from_secret(secret.as_bytes()),
                decoding: DecodingKey::from_secret(secret.as_bytes()),
            }),
            ttl,
        }
    }

    pub fn issue(&self, user_id: Uuid, email: &str, role: Role) -> crate::error::Result<String> {
        let now = Utc::now();
        let exp = (now + self.ttl).timestamp().max(0) as usize;
        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            role: Some(role),
            iat: now.timestamp() as usize,
            exp,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.keys.encoding)
            .map_err(|e| crate::error::Error::Internal(format!("token signing failed: {}", e)))
    }

    pub fn validate(&self, token: &str) -> Result<Identity, AuthError> {
        if token.trim().is_empty() {
            return Err(AuthError::MissingToken);
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;

        let data = decode::<Claims>(token, &self.keys.decoding, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::ExpiredToken,
                _ => AuthError::InvalidToken,
            }
        })?;

        let user_id = Uuid::parse_str(&data.claims.sub).map_err(|_| AuthError::InvalidToken)?;
        Ok(Identity {
            user_id,
            email: data.claims.email,
        })
    }
}

/// Pulls the credential out of an `Authorization: Bearer <token>` value.
///
/// No header or an empty token is `MissingToken`; any other scheme or shape
/// is `InvalidToken`.
pub fn bearer_token(header: Option<&str>) -> Result<&str, AuthError> {
    let value = header.map(str::trim).ok_or(AuthError::MissingToken)?;
    if value.is_empty() {
        return Err(AuthError::MissingToken);
    }
    let (scheme, token) = match value.split_once(' ') {
        Some(parts) => parts,
        None if value.eq_ignore_ascii_case("bearer") => return Err(AuthError::MissingToken),
        None => return Err(AuthError::InvalidToken),
    };
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(AuthError::InvalidToken);
    }
    match token.trim() {
        "" => Err(AuthError::MissingToken),
        token => Ok(token),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-for-jwt-validation-256bits";

    fn issuer() -> TokenIssuer {
        TokenIssuer::new(SECRET, Duration::hours(1))
    }

    #[test]
    fn issued_token_validates_to_identity() {
        let user_id = Uuid::new_v4();
        let token = issuer()
            .issue(user_id, "alice@example.com", Role::JobSeeker)
            .unwrap();

        let identity = issuer().validate(&token).unwrap();
        assert_eq!(identity.user_id, user_id);
        assert_eq!(identity.email, "alice@example.com");
    }

    #[test]
    fn token_expires_one_ttl_after_issue() {
        let token = issuer()
            .issue(Uuid::new_v4(), "a@example.com", Role::Employer)
            .unwrap();
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        let claims = decode::<Claims>(&token, &DecodingKey::from_secret(SECRET.as_bytes()), &validation)
            .unwrap()
            .claims;
        assert_eq!(claims.exp - claims.iat, 3600);
        assert_eq!(claims.role, Some(Role::Employer));
    }

    #[test]
    fn expired_token_is_rejected_as_expired() {
        let stale = TokenIssuer::new(SECRET, Duration::seconds(-30));
        let token = stale
            .issue(Uuid::new_v4(), "a@example.com", Role::JobSeeker)
            .unwrap();
        assert_eq!(issuer().validate(&token), Err(AuthError::ExpiredToken));
    }

    #[test]
    fn foreign_signature_is_invalid() {
        let other = TokenIssuer::new("another-secret", Duration::hours(1));
        let token = other
            .issue(Uuid::new_v4(), "a@example.com", Role::JobSeeker)
            .unwrap();
        assert_eq!(issuer().validate(&token), Err(AuthError::InvalidToken));
    }

    #[test]
    fn garbage_is_invalid_and_empty_is_missing() {
        assert_eq!(
            issuer().validate("malformed.token.format"),
            Err(AuthError::InvalidToken)
        );
        assert_eq!(issuer().validate(""), Err(AuthError::MissingToken));
    }

    #[test]
    fn bearer_header_parsing() {
        assert_eq!(bearer_token(Some("Bearer abc.def")), Ok("abc.def"));
        assert_eq!(bearer_token(Some("bearer abc")), Ok("abc"));
        assert_eq!(bearer_token(None), Err(AuthError::MissingToken));
        assert_eq!(bearer_token(Some("")), Err(AuthError::MissingToken));
        assert_eq!(bearer_token(Some("Bearer ")), Err(AuthError::MissingToken));
        assert_eq!(bearer_token(Some("Basic dXNlcg==")), Err(AuthError::InvalidToken));
        assert_eq!(bearer_token(Some("abc.def")), Err(AuthError::InvalidToken));
    }
}
