//! Creative-composition pipeline over the public recipe set.
//!
//! Single pass per request: collect public recipes, render the prompt,
//! invoke the generation source, parse the completion. Nothing is persisted
//! and nothing is retried; a single upstream failure terminates the request.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::domain::error::Error;
use crate::domain::mix::{render_mix_prompt, MixedRecipe, MIX_PERSONA};
use crate::domain::ports::{
    CompletionRequest, GenerationSource, MixService, RecipePersistenceError, RecipeRepository,
};

const NO_PUBLIC_RECIPES: &str = "no public recipes available to mix";
const UNCONFIGURED: &str = "recipe mixing is not configured";

/// [`MixService`] implementation deriving one recipe from all public records.
///
/// The generation source is optional: when no credential was supplied at
/// startup the service holds `None` and reports the unconfigured condition
/// per request instead of failing at boot.
#[derive(Clone)]
pub struct PublicRecipeMixService {
    recipes: Arc<dyn RecipeRepository>,
    generator: Option<Arc<dyn GenerationSource>>,
}

impl PublicRecipeMixService {
    /// Create a pipeline over the given repository and optional source.
    pub fn new(
        recipes: Arc<dyn RecipeRepository>,
        generator: Option<Arc<dyn GenerationSource>>,
    ) -> Self {
        Self { recipes, generator }
    }
}

fn map_persistence_error(error: RecipePersistenceError) -> Error {
    match error {
        RecipePersistenceError::Connection { message } => Error::service_unavailable(message),
        RecipePersistenceError::Query { message } => Error::internal(message),
    }
}

#[async_trait]
impl MixService for PublicRecipeMixService {
    async fn mix(&self) -> Result<MixedRecipe, Error> {
        let public = self
            .recipes
            .list_public()
            .await
            .map_err(map_persistence_error)?;
        if public.is_empty() {
            return Err(Error::not_found(NO_PUBLIC_RECIPES));
        }

        // Checked before any prompt work so a missing credential never
        // reaches the network path.
        let Some(generator) = self.generator.as_ref() else {
            return Err(Error::service_unavailable(UNCONFIGURED));
        };

        let request = CompletionRequest {
            system: MIX_PERSONA.to_owned(),
            prompt: render_mix_prompt(&public),
        };
        debug!(recipes = public.len(), "requesting recipe mix");

        let text = generator.complete(&request).await.map_err(|error| {
            warn!(error = %error, "recipe mix generation failed");
            Error::upstream(error.to_string())
        })?;

        Ok(MixedRecipe::from_generated_text(&text))
    }
}
