//! Driving port for recipe management use-cases.

use async_trait::async_trait;

use crate::domain::error::Error;
use crate::domain::recipe::{PublicRecipe, Recipe, RecipeDraft, RecipeId};
use crate::domain::user::UserId;

/// Domain use-case port for recipe management.
///
/// Mutating operations report a missing id and a foreign owner with one
/// identical not-found outcome.
#[async_trait]
pub trait RecipeService: Send + Sync {
    /// Store a new recipe for `owner`.
    async fn create(&self, owner: &UserId, draft: RecipeDraft) -> Result<Recipe, Error>;

    /// All recipes of the authenticated owner, private ones included.
    async fn list_owned(&self, owner: &UserId) -> Result<Vec<Recipe>, Error>;

    /// All public recipes with their owner's current username.
    async fn list_public(&self) -> Result<Vec<PublicRecipe>, Error>;

    /// Delete `id` on behalf of `actor`.
    async fn delete(&self, actor: &UserId, id: &RecipeId) -> Result<(), Error>;

    /// Set the visibility of `id` on behalf of `actor`; returns the new flag.
    async fn set_visibility(
        &self,
        actor: &UserId,
        id: &RecipeId,
        is_public: bool,
    ) -> Result<bool, Error>;
}
