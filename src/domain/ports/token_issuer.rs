//! Port abstraction for bearer-credential issuing and verification.

use crate::domain::auth::AccessToken;
use crate::domain::user::UserId;

/// Errors raised by token adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    /// The token signature does not match.
    #[error("invalid token signature")]
    InvalidSignature,

    /// The token has expired.
    #[error("token has expired")]
    Expired,

    /// The token is malformed or cannot be parsed.
    #[error("malformed token")]
    Malformed,

    /// The token does not carry a usable subject.
    #[error("token subject is missing or invalid")]
    MissingSubject,

    /// Issuing a new token failed.
    #[error("token issuance failed: {message}")]
    Issuance { message: String },
}

impl TokenError {
    /// Create an issuance error with the given message.
    pub fn issuance(message: impl Into<String>) -> Self {
        Self::Issuance {
            message: message.into(),
        }
    }
}

/// Driven port turning a proven identity into an opaque bearer credential
/// and back.
pub trait TokenIssuer: Send + Sync {
    /// Issue a bearer credential for the given user.
    fn issue(&self, user: &UserId) -> Result<AccessToken, TokenError>;

    /// Verify a presented credential and extract the user it proves.
    fn verify(&self, token: &str) -> Result<UserId, TokenError>;
}
