//! Credential adapters: password hashing and bearer-token issuing.

pub mod argon2_hasher;
pub mod jwt_tokens;

pub use argon2_hasher::Argon2Hasher;
pub use jwt_tokens::JwtTokenIssuer;
