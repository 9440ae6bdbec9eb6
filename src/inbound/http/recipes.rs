//! Owned-recipe HTTP handlers.
//!
//! ```text
//! GET    /user/recipes
//! POST   /user/recipes
//! DELETE /user/recipes/{id}
//! PUT    /user/recipes/{id}/toggle_public
//! ```

use actix_web::{delete, get, post, put, web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{Error, Recipe, RecipeDraft, RecipeId, Title};
use crate::inbound::http::bearer::AuthenticatedUser;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::missing_field_error;
use crate::inbound::http::ApiResult;

/// Request payload for creating a recipe.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateRecipeRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub is_public: Option<bool>,
}

/// Response payload for a recipe owned by the caller.
#[derive(Debug, Serialize, ToSchema)]
pub struct OwnedRecipeResponse {
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub is_public: bool,
}

impl From<Recipe> for OwnedRecipeResponse {
    fn from(value: Recipe) -> Self {
        Self {
            id: *value.id().as_uuid(),
            title: value.title().to_string(),
            description: value.description().to_owned(),
            is_public: value.is_public(),
        }
    }
}

/// Request payload for the visibility toggle.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ToggleVisibilityRequest {
    pub is_public: Option<bool>,
}

/// Response payload carrying the new visibility flag.
#[derive(Debug, Serialize, ToSchema)]
pub struct VisibilityResponse {
    pub is_public: bool,
}

fn parse_draft(payload: CreateRecipeRequest) -> Result<RecipeDraft, Error> {
    let title = payload.title.ok_or_else(|| missing_field_error("title"))?;
    let title = Title::new(title).map_err(|err| Error::invalid_request(err.to_string()))?;
    Ok(RecipeDraft::new(title, payload.description, payload.is_public))
}

/// List the caller's recipes, private ones included.
#[utoipa::path(
    get,
    path = "/user/recipes",
    responses(
        (status = 200, description = "Owned recipes", body = [OwnedRecipeResponse]),
        (status = 401, description = "Unauthorised", body = crate::inbound::http::ApiError)
    ),
    tags = ["recipes"],
    operation_id = "listOwnedRecipes"
)]
#[get("/user/recipes")]
pub async fn list_owned(
    state: web::Data<HttpState>,
    identity: AuthenticatedUser,
) -> ApiResult<web::Json<Vec<OwnedRecipeResponse>>> {
    let recipes = state.recipes.list_owned(identity.user_id()).await?;
    Ok(web::Json(
        recipes.into_iter().map(OwnedRecipeResponse::from).collect(),
    ))
}

/// Store a new recipe for the caller.
#[utoipa::path(
    post,
    path = "/user/recipes",
    request_body = CreateRecipeRequest,
    responses(
        (status = 201, description = "Recipe created", body = OwnedRecipeResponse),
        (status = 400, description = "Invalid payload", body = crate::inbound::http::ApiError),
        (status = 401, description = "Unauthorised", body = crate::inbound::http::ApiError)
    ),
    tags = ["recipes"],
    operation_id = "createRecipe"
)]
#[post("/user/recipes")]
pub async fn create(
    state: web::Data<HttpState>,
    identity: AuthenticatedUser,
    payload: web::Json<CreateRecipeRequest>,
) -> ApiResult<HttpResponse> {
    let draft = parse_draft(payload.into_inner())?;
    let recipe = state.recipes.create(identity.user_id(), draft).await?;
    Ok(HttpResponse::Created().json(OwnedRecipeResponse::from(recipe)))
}

/// Delete one of the caller's recipes.
#[utoipa::path(
    delete,
    path = "/user/recipes/{id}",
    params(("id" = String, Path, description = "Recipe identifier")),
    responses(
        (status = 200, description = "Recipe deleted"),
        (status = 401, description = "Unauthorised", body = crate::inbound::http::ApiError),
        (status = 404, description = "Not found or not authorised", body = crate::inbound::http::ApiError)
    ),
    tags = ["recipes"],
    operation_id = "deleteRecipe"
)]
#[delete("/user/recipes/{id}")]
pub async fn remove(
    state: web::Data<HttpState>,
    identity: AuthenticatedUser,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let id = RecipeId::from_uuid(path.into_inner());
    state.recipes.delete(identity.user_id(), &id).await?;
    Ok(HttpResponse::Ok().finish())
}

/// Set the visibility of one of the caller's recipes.
#[utoipa::path(
    put,
    path = "/user/recipes/{id}/toggle_public",
    params(("id" = String, Path, description = "Recipe identifier")),
    request_body = ToggleVisibilityRequest,
    responses(
        (status = 200, description = "Visibility updated", body = VisibilityResponse),
        (status = 400, description = "Missing is_public field", body = crate::inbound::http::ApiError),
        (status = 401, description = "Unauthorised", body = crate::inbound::http::ApiError),
        (status = 404, description = "Not found or not authorised", body = crate::inbound::http::ApiError)
    ),
    tags = ["recipes"],
    operation_id = "toggleRecipeVisibility"
)]
#[put("/user/recipes/{id}/toggle_public")]
pub async fn toggle_public(
    state: web::Data<HttpState>,
    identity: AuthenticatedUser,
    path: web::Path<Uuid>,
    payload: web::Json<ToggleVisibilityRequest>,
) -> ApiResult<web::Json<VisibilityResponse>> {
    let requested = payload
        .into_inner()
        .is_public
        .ok_or_else(|| missing_field_error("is_public"))?;
    let id = RecipeId::from_uuid(path.into_inner());
    let is_public = state
        .recipes
        .set_visibility(identity.user_id(), &id, requested)
        .await?;
    Ok(web::Json(VisibilityResponse { is_public }))
}
