//! Driving port for registration and login use-cases.
//!
//! Inbound adapters call this to manage accounts without knowing the backing
//! infrastructure, which keeps handler tests deterministic: they substitute a
//! test double instead of wiring persistence and hashing.

use async_trait::async_trait;

use crate::domain::auth::{AccessToken, Credentials};
use crate::domain::error::Error;
use crate::domain::user::User;

/// Domain use-case port for account management.
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Register a new user from validated credentials.
    ///
    /// Fails with a conflict when the username is already registered.
    async fn register(&self, credentials: &Credentials) -> Result<User, Error>;

    /// Validate credentials and mint a bearer credential for the user.
    ///
    /// An unknown username and a wrong password produce the same failure.
    async fn login(&self, credentials: &Credentials) -> Result<AccessToken, Error>;
}
