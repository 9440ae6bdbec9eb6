//! Argon2-backed `PasswordHasher` adapter.
//!
//! Stores credentials as PHC-format strings with a fresh salt per hash, so
//! the stored form carries its own parameters and verification needs no
//! out-of-band configuration.

use argon2::password_hash::{rand_core::OsRng, PasswordHash, SaltString};
use argon2::PasswordHasher as _;
use argon2::{Argon2, PasswordVerifier};

use crate::domain::ports::{PasswordHashError, PasswordHasher};

/// Argon2id implementation of the `PasswordHasher` port.
#[derive(Debug, Default, Clone)]
pub struct Argon2Hasher;

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> Result<String, PasswordHashError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|err| PasswordHashError::hashing(err.to_string()))
    }

    fn verify(&self, password: &str, stored_hash: &str) -> Result<bool, PasswordHashError> {
        let parsed = PasswordHash::new(stored_hash)
            .map_err(|err| PasswordHashError::malformed_hash(err.to_string()))?;

        match Argon2::default().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(err) => Err(PasswordHashError::hashing(err.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    #[test]
    fn hash_then_verify_round_trips() {
        let hasher = Argon2Hasher;
        let hash = hasher.hash("hunter2").expect("hashing should succeed");

        assert!(hash.starts_with("$argon2"), "hash should be PHC format");
        assert!(hasher.verify("hunter2", &hash).expect("verify should run"));
    }

    #[test]
    fn wrong_passwords_verify_to_false() {
        let hasher = Argon2Hasher;
        let hash = hasher.hash("hunter2").expect("hashing should succeed");

        assert!(!hasher.verify("hunter3", &hash).expect("verify should run"));
    }

    #[test]
    fn fresh_salts_produce_distinct_hashes() {
        let hasher = Argon2Hasher;
        let first = hasher.hash("hunter2").expect("hashing should succeed");
        let second = hasher.hash("hunter2").expect("hashing should succeed");
        assert_ne!(first, second);
    }

    #[test]
    fn malformed_stored_hashes_are_rejected() {
        let hasher = Argon2Hasher;
        let err = hasher
            .verify("hunter2", "not-a-phc-string")
            .expect_err("malformed hash must fail");
        assert!(matches!(err, PasswordHashError::MalformedHash { .. }));
    }
}
