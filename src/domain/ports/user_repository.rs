//! Port abstraction for user persistence adapters and their errors.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::user::{User, UserId, Username};

/// Persistence errors raised by user repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserPersistenceError {
    /// Repository connection could not be established.
    #[error("user repository connection failed: {message}")]
    Connection { message: String },

    /// Query or mutation failed during execution.
    #[error("user repository query failed: {message}")]
    Query { message: String },

    /// The username is already registered.
    #[error("username is already taken")]
    DuplicateUsername,
}

impl UserPersistenceError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// A user record about to be stored, with its hashed credential secret.
#[derive(Debug, Clone)]
pub struct NewUserRecord {
    user: User,
    password_hash: String,
}

impl NewUserRecord {
    /// Pair a validated user with the hash of its credential secret.
    pub fn new(user: User, password_hash: String) -> Self {
        Self {
            user,
            password_hash,
        }
    }

    /// The user entity being stored.
    pub fn user(&self) -> &User {
        &self.user
    }

    /// Hashed credential secret; never the raw password.
    pub fn password_hash(&self) -> &str {
        self.password_hash.as_str()
    }
}

/// A stored user together with its credential hash, for login verification.
#[derive(Debug, Clone)]
pub struct StoredCredentials {
    user: User,
    password_hash: String,
}

impl StoredCredentials {
    /// Pair a stored user with its credential hash.
    pub fn new(user: User, password_hash: String) -> Self {
        Self {
            user,
            password_hash,
        }
    }

    /// The stored user entity.
    pub fn user(&self) -> &User {
        &self.user
    }

    /// Hashed credential secret for verification.
    pub fn password_hash(&self) -> &str {
        self.password_hash.as_str()
    }
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Store a new user record.
    ///
    /// Fails with [`UserPersistenceError::DuplicateUsername`] when the
    /// username is already registered, including when a concurrent
    /// registration wins the race.
    async fn create(&self, record: &NewUserRecord) -> Result<(), UserPersistenceError>;

    /// Fetch a user and its credential hash by username.
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<StoredCredentials>, UserPersistenceError>;
}

/// In-memory user store used until persistence is wired, and by tests.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    records: Mutex<HashMap<String, StoredCredentials>>,
}

impl InMemoryUserStore {
    /// Resolve the username of a stored user id, for read-time joins.
    pub fn username_of(&self, id: &UserId) -> Option<Username> {
        self.records
            .lock()
            .expect("user store lock")
            .values()
            .find(|stored| stored.user().id() == id)
            .map(|stored| stored.user().username().clone())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserStore {
    async fn create(&self, record: &NewUserRecord) -> Result<(), UserPersistenceError> {
        let mut records = self.records.lock().expect("user store lock");
        let key = record.user().username().as_ref().to_owned();
        if records.contains_key(&key) {
            return Err(UserPersistenceError::DuplicateUsername);
        }
        records.insert(
            key,
            StoredCredentials::new(record.user().clone(), record.password_hash().to_owned()),
        );
        Ok(())
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<StoredCredentials>, UserPersistenceError> {
        let records = self.records.lock().expect("user store lock");
        Ok(records.get(username.as_ref()).cloned())
    }
}
