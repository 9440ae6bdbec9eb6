//! Account service backed by the user repository, a password hasher, and a
//! token issuer.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::auth::{AccessToken, Credentials};
use crate::domain::error::Error;
use crate::domain::ports::{
    AccountService, NewUserRecord, PasswordHashError, PasswordHasher, TokenError, TokenIssuer,
    UserPersistenceError, UserRepository,
};
use crate::domain::user::{User, UserId};

const BAD_CREDENTIALS: &str = "invalid credentials";

/// [`AccountService`] implementation storing Argon2-style password hashes and
/// minting bearer credentials on successful login.
#[derive(Clone)]
pub struct PasswordAccountService {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenIssuer>,
}

impl PasswordAccountService {
    /// Create a service over the given ports.
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }
}

fn map_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => Error::service_unavailable(message),
        UserPersistenceError::Query { message } => Error::internal(message),
        UserPersistenceError::DuplicateUsername => Error::conflict("username is already taken"),
    }
}

fn map_hash_error(error: PasswordHashError) -> Error {
    Error::internal(error.to_string())
}

fn map_token_error(error: TokenError) -> Error {
    Error::internal(error.to_string())
}

#[async_trait]
impl AccountService for PasswordAccountService {
    async fn register(&self, credentials: &Credentials) -> Result<User, Error> {
        let password_hash = self
            .hasher
            .hash(credentials.password())
            .map_err(map_hash_error)?;
        let user = User::new(UserId::random(), credentials.username().clone());

        // The repository enforces uniqueness; a concurrent registration that
        // wins the race still surfaces as a duplicate here.
        self.users
            .create(&NewUserRecord::new(user.clone(), password_hash))
            .await
            .map_err(map_persistence_error)?;

        info!(username = %user.username(), "user registered");
        Ok(user)
    }

    async fn login(&self, credentials: &Credentials) -> Result<AccessToken, Error> {
        let stored = self
            .users
            .find_by_username(credentials.username())
            .await
            .map_err(map_persistence_error)?;

        // One indistinguishable failure for an unknown username and a wrong
        // password.
        let Some(stored) = stored else {
            return Err(Error::unauthorized(BAD_CREDENTIALS));
        };
        let matches = self
            .hasher
            .verify(credentials.password(), stored.password_hash())
            .map_err(map_hash_error)?;
        if !matches {
            return Err(Error::unauthorized(BAD_CREDENTIALS));
        }

        self.tokens
            .issue(stored.user().id())
            .map_err(map_token_error)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for registration and login flows.
    use super::*;
    use crate::domain::error::ErrorCode;
    use crate::domain::ports::InMemoryUserStore;
    use rstest::rstest;

    struct PlainHasher;

    impl PasswordHasher for PlainHasher {
        fn hash(&self, password: &str) -> Result<String, PasswordHashError> {
            Ok(format!("plain:{password}"))
        }

        fn verify(&self, password: &str, stored_hash: &str) -> Result<bool, PasswordHashError> {
            Ok(stored_hash == format!("plain:{password}"))
        }
    }

    struct StaticTokens;

    impl TokenIssuer for StaticTokens {
        fn issue(&self, user: &UserId) -> Result<AccessToken, TokenError> {
            Ok(AccessToken::new(format!("token-for-{user}")))
        }

        fn verify(&self, _token: &str) -> Result<UserId, TokenError> {
            Err(TokenError::Malformed)
        }
    }

    fn service() -> PasswordAccountService {
        PasswordAccountService::new(
            Arc::new(InMemoryUserStore::default()),
            Arc::new(PlainHasher),
            Arc::new(StaticTokens),
        )
    }

    fn credentials(username: &str, password: &str) -> Credentials {
        Credentials::try_from_parts(username, password).expect("valid test credentials")
    }

    #[tokio::test]
    async fn register_then_login_round_trips() {
        let service = service();
        let user = service
            .register(&credentials("ada", "pw"))
            .await
            .expect("registration should succeed");
        assert_eq!(user.username().as_ref(), "ada");

        let token = service
            .login(&credentials("ada", "pw"))
            .await
            .expect("login should succeed");
        assert_eq!(token.as_ref(), format!("token-for-{}", user.id()));
    }

    #[tokio::test]
    async fn duplicate_registration_is_a_conflict() {
        let service = service();
        service
            .register(&credentials("ada", "pw"))
            .await
            .expect("first registration");

        let err = service
            .register(&credentials("ada", "other"))
            .await
            .expect_err("second registration must fail");
        assert_eq!(err.code(), ErrorCode::Conflict);
    }

    #[rstest]
    #[case("ghost", "pw")]
    #[case("ada", "wrong")]
    #[tokio::test]
    async fn unknown_user_and_wrong_password_fail_identically(
        #[case] username: &str,
        #[case] password: &str,
    ) {
        let service = service();
        service
            .register(&credentials("ada", "pw"))
            .await
            .expect("registration");

        let err = service
            .login(&credentials(username, password))
            .await
            .expect_err("login must fail");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
        assert_eq!(err.message(), BAD_CREDENTIALS);
    }
}
