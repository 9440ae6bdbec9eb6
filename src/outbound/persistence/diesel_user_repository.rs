//! Diesel-backed `UserRepository` adapter.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{
    NewUserRecord, StoredCredentials, UserPersistenceError, UserRepository,
};
use crate::domain::{User, UserId, Username};

use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            UserPersistenceError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        // The unique index on username is the authoritative duplicate check;
        // a concurrent registration losing the race lands here.
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            UserPersistenceError::DuplicateUsername
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            UserPersistenceError::connection("database connection error")
        }
        _ => UserPersistenceError::query("database error"),
    }
}

fn row_to_credentials(row: UserRow) -> Result<StoredCredentials, UserPersistenceError> {
    let username = Username::new(row.username)
        .map_err(|err| UserPersistenceError::query(format!("stored username is invalid: {err}")))?;
    let user = User::new(UserId::from_uuid(row.id), username);
    Ok(StoredCredentials::new(user, row.password_hash))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn create(&self, record: &NewUserRecord) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = NewUserRow {
            id: *record.user().id().as_uuid(),
            username: record.user().username().as_ref(),
            password_hash: record.password_hash(),
        };
        diesel::insert_into(users::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<StoredCredentials>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::username.eq(username.as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_credentials).transpose()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for error and row mapping; queries themselves are
    //! validated by Diesel at compile time.
    use super::*;
    use diesel::result::{DatabaseErrorKind, Error as DieselError};
    use rstest::rstest;
    use uuid::Uuid;

    #[derive(Debug)]
    struct BoxedMessage(String);

    impl diesel::result::DatabaseErrorInformation for BoxedMessage {
        fn message(&self) -> &str {
            &self.0
        }
        fn details(&self) -> Option<&str> {
            None
        }
        fn hint(&self) -> Option<&str> {
            None
        }
        fn table_name(&self) -> Option<&str> {
            None
        }
        fn column_name(&self) -> Option<&str> {
            None
        }
        fn constraint_name(&self) -> Option<&str> {
            None
        }
        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    fn database_error(kind: DatabaseErrorKind) -> DieselError {
        DieselError::DatabaseError(kind, Box::new(BoxedMessage("boom".to_owned())))
    }

    #[rstest]
    #[case(database_error(DatabaseErrorKind::UniqueViolation), UserPersistenceError::DuplicateUsername)]
    #[case(
        database_error(DatabaseErrorKind::ClosedConnection),
        UserPersistenceError::connection("database connection error")
    )]
    #[case(DieselError::NotFound, UserPersistenceError::query("database error"))]
    fn diesel_errors_map_to_port_errors(
        #[case] error: DieselError,
        #[case] expected: UserPersistenceError,
    ) {
        assert_eq!(map_diesel_error(error), expected);
    }

    #[test]
    fn rows_convert_to_stored_credentials() {
        let id = Uuid::new_v4();
        let row = UserRow {
            id,
            username: "ada".to_owned(),
            password_hash: "hash".to_owned(),
        };

        let stored = row_to_credentials(row).expect("row should convert");
        assert_eq!(stored.user().id().as_uuid(), &id);
        assert_eq!(stored.user().username().as_ref(), "ada");
        assert_eq!(stored.password_hash(), "hash");
    }

    #[test]
    fn corrupt_usernames_surface_as_query_errors() {
        let row = UserRow {
            id: Uuid::new_v4(),
            username: "has space".to_owned(),
            password_hash: "hash".to_owned(),
        };

        let err = row_to_credentials(row).expect_err("corrupt row must fail");
        assert!(matches!(err, UserPersistenceError::Query { .. }));
    }
}
