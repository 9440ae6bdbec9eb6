//! Recipe service backed by the recipe repository.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::error::Error;
use crate::domain::ports::{RecipePersistenceError, RecipeRepository, RecipeService};
use crate::domain::recipe::{PublicRecipe, Recipe, RecipeDraft, RecipeId};
use crate::domain::user::UserId;

const NOT_FOUND: &str = "recipe not found or not authorized";

/// [`RecipeService`] implementation delegating ownership enforcement to the
/// repository's guarded mutations and translating the guarded outcome into
/// the merged not-found response.
#[derive(Clone)]
pub struct OwnedRecipeService {
    recipes: Arc<dyn RecipeRepository>,
}

impl OwnedRecipeService {
    /// Create a service over the given repository.
    pub fn new(recipes: Arc<dyn RecipeRepository>) -> Self {
        Self { recipes }
    }
}

fn map_persistence_error(error: RecipePersistenceError) -> Error {
    match error {
        RecipePersistenceError::Connection { message } => Error::service_unavailable(message),
        RecipePersistenceError::Query { message } => Error::internal(message),
    }
}

#[async_trait]
impl RecipeService for OwnedRecipeService {
    async fn create(&self, owner: &UserId, draft: RecipeDraft) -> Result<Recipe, Error> {
        let recipe = draft.into_recipe(RecipeId::random(), *owner);
        self.recipes
            .insert(&recipe)
            .await
            .map_err(map_persistence_error)?;
        info!(recipe_id = %recipe.id(), "recipe created");
        Ok(recipe)
    }

    async fn list_owned(&self, owner: &UserId) -> Result<Vec<Recipe>, Error> {
        self.recipes
            .list_by_owner(owner)
            .await
            .map_err(map_persistence_error)
    }

    async fn list_public(&self) -> Result<Vec<PublicRecipe>, Error> {
        self.recipes
            .list_public()
            .await
            .map_err(map_persistence_error)
    }

    async fn delete(&self, actor: &UserId, id: &RecipeId) -> Result<(), Error> {
        let removed = self
            .recipes
            .delete_owned(id, actor)
            .await
            .map_err(map_persistence_error)?;
        if !removed {
            return Err(Error::not_found(NOT_FOUND));
        }
        info!(recipe_id = %id, "recipe deleted");
        Ok(())
    }

    async fn set_visibility(
        &self,
        actor: &UserId,
        id: &RecipeId,
        is_public: bool,
    ) -> Result<bool, Error> {
        let updated = self
            .recipes
            .set_visibility_owned(id, actor, is_public)
            .await
            .map_err(map_persistence_error)?;
        updated.ok_or_else(|| Error::not_found(NOT_FOUND))
    }
}
