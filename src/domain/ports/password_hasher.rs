//! Port abstraction for credential-secret hashing.

/// Errors raised by password hashing adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PasswordHashError {
    /// Hashing the supplied password failed.
    #[error("password hashing failed: {message}")]
    Hashing { message: String },

    /// A stored hash could not be parsed for verification.
    #[error("stored password hash is malformed: {message}")]
    MalformedHash { message: String },
}

impl PasswordHashError {
    /// Create a hashing error with the given message.
    pub fn hashing(message: impl Into<String>) -> Self {
        Self::Hashing {
            message: message.into(),
        }
    }

    /// Create a malformed-hash error with the given message.
    pub fn malformed_hash(message: impl Into<String>) -> Self {
        Self::MalformedHash {
            message: message.into(),
        }
    }
}

/// Driven port turning raw passwords into stored hashes and back.
///
/// Verification returns `Ok(false)` for a wrong password; errors are reserved
/// for malformed stored material or hasher failures.
pub trait PasswordHasher: Send + Sync {
    /// Hash a raw password with a fresh salt.
    fn hash(&self, password: &str) -> Result<String, PasswordHashError>;

    /// Check a raw password against a stored hash.
    fn verify(&self, password: &str, stored_hash: &str) -> Result<bool, PasswordHashError>;
}
