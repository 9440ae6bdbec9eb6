//! Public-surface HTTP handlers: the public listing and the recipe mix.
//!
//! ```text
//! GET /recipes/public
//! GET /recipes/mix
//! ```

use actix_web::{get, web};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{MixedRecipe, PublicRecipe};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Response payload for one public recipe with its owner's username.
#[derive(Debug, Serialize, ToSchema)]
pub struct PublicRecipeResponse {
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub username: String,
}

impl From<PublicRecipe> for PublicRecipeResponse {
    fn from(value: PublicRecipe) -> Self {
        Self {
            id: *value.recipe().id().as_uuid(),
            title: value.recipe().title().to_string(),
            description: value.recipe().description().to_owned(),
            username: value.author().to_string(),
        }
    }
}

/// The derived recipe inside a mix response.
#[derive(Debug, Serialize, ToSchema)]
pub struct MixedRecipeBody {
    pub title: String,
    pub description: String,
}

/// Response payload for one composition request.
#[derive(Debug, Serialize, ToSchema)]
pub struct MixResponse {
    pub creative_recipe: MixedRecipeBody,
}

impl From<MixedRecipe> for MixResponse {
    fn from(value: MixedRecipe) -> Self {
        Self {
            creative_recipe: MixedRecipeBody {
                title: value.title().to_owned(),
                description: value.description().to_owned(),
            },
        }
    }
}

/// List all public recipes with their owner's username.
#[utoipa::path(
    get,
    path = "/recipes/public",
    responses(
        (status = 200, description = "Public recipes", body = [PublicRecipeResponse])
    ),
    tags = ["recipes"],
    operation_id = "listPublicRecipes"
)]
#[get("/recipes/public")]
pub async fn list_public(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<PublicRecipeResponse>>> {
    let recipes = state.recipes.list_public().await?;
    Ok(web::Json(
        recipes
            .into_iter()
            .map(PublicRecipeResponse::from)
            .collect(),
    ))
}

/// Derive one creative recipe from all public recipes.
#[utoipa::path(
    get,
    path = "/recipes/mix",
    responses(
        (status = 200, description = "Derived recipe", body = MixResponse),
        (status = 404, description = "No public recipes", body = crate::inbound::http::ApiError),
        (status = 502, description = "Generation service failed", body = crate::inbound::http::ApiError),
        (status = 503, description = "Generation service not configured", body = crate::inbound::http::ApiError)
    ),
    tags = ["recipes"],
    operation_id = "mixRecipes"
)]
#[get("/recipes/mix")]
pub async fn mix(state: web::Data<HttpState>) -> ApiResult<web::Json<MixResponse>> {
    let mixed = state.mixer.mix().await?;
    Ok(web::Json(MixResponse::from(mixed)))
}
