//! JWT-backed `TokenIssuer` adapter using HS256.
//!
//! The `sub` claim carries the user id; `exp` bounds the credential's
//! lifetime. Verification is stateless: the same inputs always produce the
//! same outcome.

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::domain::ports::{TokenError, TokenIssuer};
use crate::domain::{AccessToken, UserId};

/// Claims embedded in issued tokens.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// Subject claim containing the user identifier.
    sub: String,
    /// Issued-at timestamp, seconds since the epoch.
    iat: i64,
    /// Expiry timestamp, seconds since the epoch.
    exp: i64,
}

/// HS256 implementation of the `TokenIssuer` port.
pub struct JwtTokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_seconds: i64,
}

impl JwtTokenIssuer {
    /// Create an issuer for the given shared secret and token lifetime.
    pub fn new(secret: &[u8], ttl: std::time::Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl_seconds: ttl.as_secs() as i64,
        }
    }
}

fn map_jwt_error(error: jsonwebtoken::errors::Error) -> TokenError {
    use jsonwebtoken::errors::ErrorKind;

    match error.kind() {
        ErrorKind::InvalidSignature => TokenError::InvalidSignature,
        ErrorKind::ExpiredSignature => TokenError::Expired,
        ErrorKind::MissingRequiredClaim(_) => TokenError::MissingSubject,
        _ => TokenError::Malformed,
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn issue(&self, user: &UserId) -> Result<AccessToken, TokenError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user.to_string(),
            iat: now,
            exp: now + self.ttl_seconds,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map(AccessToken::new)
            .map_err(|err| TokenError::issuance(err.to_string()))
    }

    fn verify(&self, token: &str) -> Result<UserId, TokenError> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::new(Algorithm::HS256))
            .map_err(map_jwt_error)?;

        UserId::parse(&data.claims.sub).map_err(|_| TokenError::MissingSubject)
    }
}
