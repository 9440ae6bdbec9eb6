//! Domain ports.
//!
//! Driving ports (`account`, `recipes`, `mixer`) are the use-case traits
//! inbound adapters call. Driven ports (`user_repository`,
//! `recipe_repository`, `generation_source`, `password_hasher`,
//! `token_issuer`) are implemented by outbound adapters; each carries its own
//! error enum so adapters never leak framework errors into the domain.

pub mod account;
pub mod generation_source;
pub mod mixer;
pub mod password_hasher;
pub mod recipe_repository;
pub mod recipes;
pub mod token_issuer;
pub mod user_repository;

pub use account::AccountService;
pub use generation_source::{
    CompletionRequest, FixtureGenerationSource, GenerationSource, GenerationSourceError,
};
pub use mixer::MixService;
pub use password_hasher::{PasswordHashError, PasswordHasher};
pub use recipe_repository::{InMemoryRecipeStore, RecipePersistenceError, RecipeRepository};
pub use recipes::RecipeService;
pub use token_issuer::{TokenError, TokenIssuer};
pub use user_repository::{
    InMemoryUserStore, NewUserRecord, StoredCredentials, UserPersistenceError, UserRepository,
};
