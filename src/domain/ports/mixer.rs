//! Driving port for the creative-composition use-case.

use async_trait::async_trait;

use crate::domain::error::Error;
use crate::domain::mix::MixedRecipe;

/// Domain use-case port for deriving one mixed recipe from the public set.
#[async_trait]
pub trait MixService: Send + Sync {
    /// Collect the public recipes, invoke the generation service, and return
    /// the derived recipe. Never persists anything.
    async fn mix(&self) -> Result<MixedRecipe, Error>;
}
