//! Port abstraction for recipe persistence adapters and their errors.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::ownership::authorize;
use crate::domain::ports::user_repository::InMemoryUserStore;
use crate::domain::recipe::{PublicRecipe, Recipe, RecipeId};
use crate::domain::user::{UserId, Username};

/// Persistence errors raised by recipe repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecipePersistenceError {
    /// Repository connection could not be established.
    #[error("recipe repository connection failed: {message}")]
    Connection { message: String },

    /// Query or mutation failed during execution.
    #[error("recipe repository query failed: {message}")]
    Query { message: String },
}

impl RecipePersistenceError {
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

/// Recipe storage port.
///
/// The two mutating operations are owner-guarded: the ownership check and the
/// mutation happen inside one store transaction, so no concurrent request can
/// slip between them. A failed guard and a missing id are reported the same
/// way, leaving the two cases indistinguishable to callers.
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    /// Store a new recipe record.
    async fn insert(&self, recipe: &Recipe) -> Result<(), RecipePersistenceError>;

    /// All recipes owned by `owner`, private ones included.
    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Recipe>, RecipePersistenceError>;

    /// All public recipes joined with their owner's current username,
    /// ordered by ascending recipe id.
    async fn list_public(&self) -> Result<Vec<PublicRecipe>, RecipePersistenceError>;

    /// Delete `id` iff `actor` owns it. Returns whether a row was removed;
    /// `false` covers both a missing id and a foreign owner.
    async fn delete_owned(
        &self,
        id: &RecipeId,
        actor: &UserId,
    ) -> Result<bool, RecipePersistenceError>;

    /// Set the visibility flag of `id` iff `actor` owns it. Returns the new
    /// flag, or `None` when the id is missing or owned by someone else.
    async fn set_visibility_owned(
        &self,
        id: &RecipeId,
        actor: &UserId,
        is_public: bool,
    ) -> Result<Option<bool>, RecipePersistenceError>;
}

/// In-memory recipe store used until persistence is wired, and by tests.
///
/// Joins public listings against an [`InMemoryUserStore`] the same way the
/// database adapter joins against the users table.
#[derive(Debug)]
pub struct InMemoryRecipeStore {
    users: Arc<InMemoryUserStore>,
    recipes: Mutex<Vec<Recipe>>,
}

impl InMemoryRecipeStore {
    /// Create a store resolving usernames from `users`.
    pub fn new(users: Arc<InMemoryUserStore>) -> Self {
        Self {
            users,
            recipes: Mutex::new(Vec::new()),
        }
    }

    fn author_of(&self, owner: &UserId) -> Username {
        self.users
            .username_of(owner)
            .unwrap_or_else(|| Username::new("unknown").expect("fallback username"))
    }
}

#[async_trait]
impl RecipeRepository for InMemoryRecipeStore {
    async fn insert(&self, recipe: &Recipe) -> Result<(), RecipePersistenceError> {
        self.recipes
            .lock()
            .expect("recipe store lock")
            .push(recipe.clone());
        Ok(())
    }

    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Recipe>, RecipePersistenceError> {
        let recipes = self.recipes.lock().expect("recipe store lock");
        Ok(recipes
            .iter()
            .filter(|recipe| recipe.owner_id() == owner)
            .cloned()
            .collect())
    }

    async fn list_public(&self) -> Result<Vec<PublicRecipe>, RecipePersistenceError> {
        let mut public: Vec<Recipe> = {
            let recipes = self.recipes.lock().expect("recipe store lock");
            recipes
                .iter()
                .filter(|recipe| recipe.is_public())
                .cloned()
                .collect()
        };
        public.sort_by_key(|recipe| *recipe.id().as_uuid());
        Ok(public
            .into_iter()
            .map(|recipe| {
                let author = self.author_of(recipe.owner_id());
                PublicRecipe::new(recipe, author)
            })
            .collect())
    }

    async fn delete_owned(
        &self,
        id: &RecipeId,
        actor: &UserId,
    ) -> Result<bool, RecipePersistenceError> {
        let mut recipes = self.recipes.lock().expect("recipe store lock");
        let Some(index) = recipes.iter().position(|recipe| recipe.id() == id) else {
            return Ok(false);
        };
        if authorize(actor, &recipes[index]).is_err() {
            return Ok(false);
        }
        recipes.remove(index);
        Ok(true)
    }

    async fn set_visibility_owned(
        &self,
        id: &RecipeId,
        actor: &UserId,
        is_public: bool,
    ) -> Result<Option<bool>, RecipePersistenceError> {
        let mut recipes = self.recipes.lock().expect("recipe store lock");
        let Some(recipe) = recipes.iter_mut().find(|recipe| recipe.id() == id) else {
            return Ok(None);
        };
        if authorize(actor, recipe).is_err() {
            return Ok(None);
        }
        *recipe = recipe.clone().with_visibility(is_public);
        Ok(Some(is_public))
    }
}
