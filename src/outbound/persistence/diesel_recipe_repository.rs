//! Diesel-backed `RecipeRepository` adapter.
//!
//! The two guarded mutations lock the target row with `FOR UPDATE` and run
//! the ownership check and the write inside one transaction, so a concurrent
//! request on the same id cannot slip between check and mutation.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use tracing::debug;

use crate::domain::ownership::authorize;
use crate::domain::ports::{RecipePersistenceError, RecipeRepository};
use crate::domain::{PublicRecipe, Recipe, RecipeId, Title, UserId, Username};

use super::models::{NewRecipeRow, RecipeRow};
use super::pool::{DbPool, PoolError};
use super::schema::{recipes, users};

/// Diesel-backed implementation of the `RecipeRepository` port.
#[derive(Clone)]
pub struct DieselRecipeRepository {
    pool: DbPool,
}

impl DieselRecipeRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> RecipePersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            RecipePersistenceError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> RecipePersistenceError {
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
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            RecipePersistenceError::connection("database connection error")
        }
        _ => RecipePersistenceError::query("database error"),
    }
}

fn row_to_recipe(row: RecipeRow) -> Result<Recipe, RecipePersistenceError> {
    let title = Title::new(row.title)
        .map_err(|err| RecipePersistenceError::query(format!("stored title is invalid: {err}")))?;
    Ok(Recipe::new(
        RecipeId::from_uuid(row.id),
        title,
        row.description,
        row.is_public,
        UserId::from_uuid(row.owner_id),
    ))
}

fn row_to_public(row: RecipeRow, username: String) -> Result<PublicRecipe, RecipePersistenceError> {
    let author = Username::new(username).map_err(|err| {
        RecipePersistenceError::query(format!("stored username is invalid: {err}"))
    })?;
    Ok(PublicRecipe::new(row_to_recipe(row)?, author))
}

/// Failure inside a guarded transaction: either the database itself or the
/// row-to-domain mapping.
enum TxError {
    Db(diesel::result::Error),
    Mapping(RecipePersistenceError),
}

impl From<diesel::result::Error> for TxError {
    fn from(error: diesel::result::Error) -> Self {
        Self::Db(error)
    }
}

fn map_tx_error(error: TxError) -> RecipePersistenceError {
    match error {
        TxError::Db(err) => map_diesel_error(err),
        TxError::Mapping(err) => err,
    }
}

#[async_trait]
impl RecipeRepository for DieselRecipeRepository {
    async fn insert(&self, recipe: &Recipe) -> Result<(), RecipePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = NewRecipeRow {
            id: *recipe.id().as_uuid(),
            title: recipe.title().as_ref(),
            description: recipe.description(),
            is_public: recipe.is_public(),
            owner_id: *recipe.owner_id().as_uuid(),
        };
        diesel::insert_into(recipes::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Recipe>, RecipePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<RecipeRow> = recipes::table
            .filter(recipes::owner_id.eq(owner.as_uuid()))
            .order_by((recipes::created_at.asc(), recipes::id.asc()))
            .select(RecipeRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_recipe).collect()
    }

    async fn list_public(&self) -> Result<Vec<PublicRecipe>, RecipePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        // Ascending id keeps the composition prompt reproducible; the join
        // resolves the owner's current username at read time.
        let rows: Vec<(RecipeRow, String)> = recipes::table
            .inner_join(users::table)
            .filter(recipes::is_public.eq(true))
            .order_by(recipes::id.asc())
            .select((RecipeRow::as_select(), users::username))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter()
            .map(|(row, username)| row_to_public(row, username))
            .collect()
    }

    async fn delete_owned(
        &self,
        id: &RecipeId,
        actor: &UserId,
    ) -> Result<bool, RecipePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let recipe_id = *id.as_uuid();
        let actor = *actor;

        conn.transaction::<bool, TxError, _>(|conn| {
            async move {
                let row: Option<RecipeRow> = recipes::table
                    .find(recipe_id)
                    .select(RecipeRow::as_select())
                    .for_update()
                    .first(conn)
                    .await
                    .optional()?;
                let Some(row) = row else {
                    return Ok(false);
                };
                let recipe = row_to_recipe(row).map_err(TxError::Mapping)?;
                if authorize(&actor, &recipe).is_err() {
                    return Ok(false);
                }

                diesel::delete(recipes::table.find(recipe_id))
                    .execute(conn)
                    .await?;
                Ok(true)
            }
            .scope_boxed()
        })
        .await
        .map_err(map_tx_error)
    }

    async fn set_visibility_owned(
        &self,
        id: &RecipeId,
        actor: &UserId,
        is_public: bool,
    ) -> Result<Option<bool>, RecipePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let recipe_id = *id.as_uuid();
        let actor = *actor;

        conn.transaction::<Option<bool>, TxError, _>(|conn| {
            async move {
                let row: Option<RecipeRow> = recipes::table
                    .find(recipe_id)
                    .select(RecipeRow::as_select())
                    .for_update()
                    .first(conn)
                    .await
                    .optional()?;
                let Some(row) = row else {
                    return Ok(None);
                };
                let recipe = row_to_recipe(row).map_err(TxError::Mapping)?;
                if authorize(&actor, &recipe).is_err() {
                    return Ok(None);
                }

                diesel::update(recipes::table.find(recipe_id))
                    .set(recipes::is_public.eq(is_public))
                    .execute(conn)
                    .await?;
                Ok(Some(is_public))
            }
            .scope_boxed()
        })
        .await
        .map_err(map_tx_error)
    }
}
