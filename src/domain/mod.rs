//! Domain model: entities, value types, services, and ports.
//!
//! Everything in this module is transport and storage agnostic. Inbound
//! adapters translate HTTP requests into these types; outbound adapters
//! implement the driven ports declared under [`ports`].

pub mod account_service;
pub mod auth;
pub mod error;
pub mod mix;
pub mod mix_service;
pub mod ownership;
pub mod ports;
pub mod recipe;
pub mod recipe_service;
pub mod user;

pub use account_service::PasswordAccountService;
pub use auth::{AccessToken, Credentials, CredentialsValidationError};
pub use error::{Error, ErrorCode};
pub use mix::{MixedRecipe, render_mix_prompt, MIX_PERSONA};
pub use mix_service::PublicRecipeMixService;
pub use ownership::{authorize, OwnershipError};
pub use recipe::{PublicRecipe, Recipe, RecipeDraft, RecipeId, RecipeValidationError, Title};
pub use recipe_service::OwnedRecipeService;
pub use user::{User, UserId, UserValidationError, Username};
